use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use super::model::{Dataset, Domains, Record, MIN_RELEASE_YEAR};

/// How many genres and ratings are pre-selected on startup.
pub const INITIAL_SELECTION: usize = 3;

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// The user's current selection.
///
/// No validation happens here: an inverted year range or an empty set is a
/// valid query that simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub from_year: i32,
    pub till_year: i32,
    pub genres: BTreeSet<String>,
    pub ratings: BTreeSet<String>,
}

impl FilterCriteria {
    /// Whole year range, first few genres and ratings.
    pub fn initial(domains: &Domains) -> Self {
        FilterCriteria {
            from_year: domains.years.first().copied().unwrap_or(MIN_RELEASE_YEAR),
            till_year: domains.years.last().copied().unwrap_or(MIN_RELEASE_YEAR),
            genres: domains.genres.iter().take(INITIAL_SELECTION).cloned().collect(),
            ratings: domains.ratings.iter().take(INITIAL_SELECTION).cloned().collect(),
        }
    }

    /// Year range, genre and rating predicates AND-ed together.
    pub fn matches(&self, record: &Record) -> bool {
        (self.from_year..=self.till_year).contains(&record.year_of_release)
            && self.genres.contains(&record.genre)
            && self.ratings.contains(&record.rating)
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// A retained record together with its group count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRow {
    /// Position in [`Dataset::records`].
    pub index: usize,
    /// Distinct names sharing this row's platform and year within the view.
    pub games_released: usize,
}

/// Records matching a [`FilterCriteria`], in dataset order.
#[derive(Debug, Clone)]
pub struct FilteredView {
    dataset: Arc<Dataset>,
    rows: Vec<ViewRow>,
}

impl FilteredView {
    pub fn rows(&self) -> &[ViewRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Retained records paired with their `games_released` value.
    pub fn iter(&self) -> impl Iterator<Item = (&Record, usize)> + '_ {
        let records = self.dataset.records();
        self.rows
            .iter()
            .map(move |row| (&records[row.index], row.games_released))
    }
}

/// Return the records of `dataset` that match `criteria`, each annotated
/// with the number of distinct game names released on the same platform in
/// the same year among the retained records.
pub fn filter(dataset: &Arc<Dataset>, criteria: &FilterCriteria) -> FilteredView {
    let records = dataset.records();
    let retained: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| criteria.matches(r))
        .map(|(i, _)| i)
        .collect();

    let mut names_per_group: BTreeMap<(&str, i32), BTreeSet<&str>> = BTreeMap::new();
    for &i in &retained {
        let r = &records[i];
        names_per_group
            .entry((r.platform.as_str(), r.year_of_release))
            .or_default()
            .insert(r.name.as_str());
    }

    let rows = retained
        .into_iter()
        .map(|index| {
            let r = &records[index];
            let games_released = names_per_group
                .get(&(r.platform.as_str(), r.year_of_release))
                .map_or(0, BTreeSet::len);
            ViewRow {
                index,
                games_released,
            }
        })
        .collect();

    FilteredView {
        dataset: Arc::clone(dataset),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn criteria(from: i32, till: i32, genres: &[&str], ratings: &[&str]) -> FilterCriteria {
        FilterCriteria {
            from_year: from,
            till_year: till,
            genres: set(genres),
            ratings: set(ratings),
        }
    }

    fn sample() -> Arc<Dataset> {
        Arc::new(Dataset::from_records(vec![
            record("Halo 3", "X360", 2007, "Shooter", "M"),
            record("Gears", "X360", 2006, "Shooter", "M"),
            record("Wii Sports", "Wii", 2006, "Sports", "E"),
            record("Mario Kart", "Wii", 2008, "Racing", "E"),
            record("GTA IV", "PS3", 2008, "Action", "M"),
            record("GTA IV", "X360", 2008, "Action", "M"),
            record("LBP", "PS3", 2008, "Platform", "E"),
            record("Uncharted", "PS3", 2007, "Action", "T"),
        ]))
    }

    #[test]
    fn duplicate_names_count_once_per_group() {
        let dataset = Arc::new(Dataset::from_records(vec![
            record("A", "PS4", 2015, "Action", "M"),
            record("B", "PS4", 2015, "Action", "M"),
            record("A", "PS4", 2015, "Action", "M"),
        ]));
        let view = filter(&dataset, &criteria(2010, 2020, &["Action"], &["M"]));
        assert_eq!(view.len(), 3);
        assert!(view.rows().iter().all(|row| row.games_released == 2));
    }

    #[test]
    fn inverted_range_is_empty() {
        let view = filter(
            &sample(),
            &criteria(2020, 2010, &["Shooter", "Action", "Sports"], &["M", "E", "T"]),
        );
        assert!(view.is_empty());
    }

    #[test]
    fn empty_genre_selection_is_empty() {
        let view = filter(&sample(), &criteria(2000, 2030, &[], &["M", "E", "T"]));
        assert!(view.is_empty());
    }

    #[test]
    fn empty_rating_selection_is_empty() {
        let view = filter(&sample(), &criteria(2000, 2030, &["Action"], &[]));
        assert!(view.is_empty());
    }

    #[test]
    fn range_outside_available_years_is_empty() {
        let view = filter(&sample(), &criteria(2015, 2020, &["Action"], &["M", "T"]));
        assert!(view.is_empty());
    }

    #[test]
    fn retained_records_satisfy_all_predicates() {
        let c = criteria(2007, 2008, &["Action", "Shooter"], &["M"]);
        let view = filter(&sample(), &c);
        let names: Vec<&str> = view.iter().map(|(r, _)| r.name.as_str()).collect();
        assert_eq!(names, vec!["Halo 3", "GTA IV", "GTA IV"]);
        for (r, _) in view.iter() {
            assert!((c.from_year..=c.till_year).contains(&r.year_of_release));
            assert!(c.genres.contains(&r.genre));
            assert!(c.ratings.contains(&r.rating));
        }
    }

    #[test]
    fn view_is_subset_in_dataset_order() {
        let dataset = sample();
        let view = filter(&dataset, &criteria(2000, 2030, &["Action", "Racing"], &["E", "M", "T"]));
        let indices: Vec<usize> = view.rows().iter().map(|row| row.index).collect();
        assert_eq!(indices, vec![3, 4, 5, 7]);
        for (r, _) in view.iter() {
            assert!(dataset.records().contains(r));
        }
    }

    #[test]
    fn group_counts_only_consider_retained_records() {
        let dataset = sample();
        // Both 2008 PS3 games are in the dataset but only one survives.
        let view = filter(&dataset, &criteria(2008, 2008, &["Action"], &["M"]));
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|(_, games)| games == 1));

        let view = filter(&dataset, &criteria(2008, 2008, &["Action", "Platform"], &["M", "E"]));
        for (r, games) in view.iter() {
            let expected = if r.platform == "PS3" { 2 } else { 1 };
            assert_eq!(games, expected, "{} on {}", r.name, r.platform);
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let dataset = sample();
        let c = criteria(2006, 2008, &["Shooter", "Sports", "Action"], &["M", "E"]);
        let first = filter(&dataset, &c);
        let second = filter(&dataset, &c);
        assert_eq!(first.rows(), second.rows());
    }

    #[test]
    fn initial_criteria_cover_all_years_and_first_three_values() {
        let dataset = sample();
        let c = FilterCriteria::initial(dataset.domains());
        assert_eq!((c.from_year, c.till_year), (2006, 2008));
        assert_eq!(c.genres, set(&["Shooter", "Sports", "Racing"]));
        assert_eq!(c.ratings, set(&["M", "E", "T"]));
    }
}
