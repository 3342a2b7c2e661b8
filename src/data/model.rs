use std::collections::BTreeSet;

/// Releases before this year are dropped while cleaning.
pub const MIN_RELEASE_YEAR: i32 = 2000;

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// A single game release (one row of the source file).
///
/// Only produced by cleaning, so every attribute is present.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub platform: String,
    pub year_of_release: i32,
    pub genre: String,
    pub rating: String,
    pub critic_score: f64,
    pub user_score: f64,
}

// ---------------------------------------------------------------------------
// Domains – distinct values offered by the filter controls
// ---------------------------------------------------------------------------

/// Distinct values per categorical column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Domains {
    /// Ascending.
    pub years: Vec<i32>,
    /// First-seen order.
    pub genres: Vec<String>,
    /// First-seen order.
    pub ratings: Vec<String>,
    /// First-seen order, used for chart colours.
    pub platforms: Vec<String>,
}

impl Domains {
    fn from_records(records: &[Record]) -> Self {
        let years: BTreeSet<i32> = records.iter().map(|r| r.year_of_release).collect();
        Domains {
            years: years.into_iter().collect(),
            genres: first_seen(records.iter().map(|r| r.genre.as_str())),
            ratings: first_seen(records.iter().map(|r| r.rating.as_str())),
            platforms: first_seen(records.iter().map(|r| r.platform.as_str())),
        }
    }
}

fn first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_owned)
        .collect()
}

// ---------------------------------------------------------------------------
// Dataset – the complete cleaned table
// ---------------------------------------------------------------------------

/// The cleaned dataset with pre-computed domains.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    domains: Domains,
}

impl Dataset {
    /// Build domains from already cleaned records.
    pub fn from_records(records: Vec<Record>) -> Self {
        debug_assert!(records
            .iter()
            .all(|r| r.year_of_release >= MIN_RELEASE_YEAR));
        let domains = Domains::from_records(&records);
        Dataset { records, domains }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn domains(&self) -> &Domains {
        &self.domains
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn record(
    name: &str,
    platform: &str,
    year: i32,
    genre: &str,
    rating: &str,
) -> Record {
    Record {
        name: name.to_owned(),
        platform: platform.to_owned(),
        year_of_release: year,
        genre: genre.to_owned(),
        rating: rating.to_owned(),
        critic_score: 80.0,
        user_score: 8.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domains_keep_first_seen_order_and_sorted_years() {
        let dataset = Dataset::from_records(vec![
            record("A", "Wii", 2008, "Sports", "E"),
            record("B", "PS3", 2003, "Action", "M"),
            record("C", "Wii", 2005, "Sports", "T"),
            record("D", "X360", 2003, "Racing", "E"),
        ]);
        let domains = dataset.domains();
        assert_eq!(domains.years, vec![2003, 2005, 2008]);
        assert_eq!(domains.genres, vec!["Sports", "Action", "Racing"]);
        assert_eq!(domains.ratings, vec!["E", "M", "T"]);
        assert_eq!(domains.platforms, vec!["Wii", "PS3", "X360"]);
    }

    #[test]
    fn empty_dataset_has_empty_domains() {
        let dataset = Dataset::from_records(Vec::new());
        assert!(dataset.is_empty());
        assert_eq!(dataset.domains(), &Domains::default());
    }
}
