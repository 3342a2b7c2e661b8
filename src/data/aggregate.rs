//! Reductions of a [`FilteredView`] into the shapes the charts consume.

use std::collections::{BTreeMap, BTreeSet};

use super::filter::FilteredView;

/// Number of games currently selected.
pub fn count(view: &FilteredView) -> usize {
    view.len()
}

// ---------------------------------------------------------------------------
// Area chart
// ---------------------------------------------------------------------------

/// `(platform, year) → games_released` over the view.
pub type AreaSeries = BTreeMap<(String, i32), usize>;

pub fn area_series(view: &FilteredView) -> AreaSeries {
    view.iter()
        .map(|(r, games)| ((r.platform.clone(), r.year_of_release), games))
        .collect()
}

/// One platform's band in the stacked area chart.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaLayer {
    pub platform: String,
    /// `(year, lower, upper)` for every year of the chart, ascending.
    pub bands: Vec<(i32, f64, f64)>,
}

/// Stack the series platform by platform (alphabetical) over the union of
/// years. A platform without releases in a year contributes a zero-height
/// band there, so the layers above stay continuous.
pub fn stack_area(series: &AreaSeries) -> Vec<AreaLayer> {
    let years: BTreeSet<i32> = series.keys().map(|(_, year)| *year).collect();
    let platforms: BTreeSet<&str> = series.keys().map(|(p, _)| p.as_str()).collect();

    let mut baseline: BTreeMap<i32, f64> = years.iter().map(|&y| (y, 0.0)).collect();
    platforms
        .into_iter()
        .map(|platform| {
            let bands = baseline
                .iter_mut()
                .map(|(&year, lower)| {
                    let height = series
                        .get(&(platform.to_owned(), year))
                        .copied()
                        .unwrap_or(0) as f64;
                    let band = (year, *lower, *lower + height);
                    *lower += height;
                    band
                })
                .collect();
            AreaLayer {
                platform: platform.to_owned(),
                bands,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub user_score: f64,
    pub critic_score: f64,
    pub games_released: usize,
    pub genre: String,
}

pub fn scatter_points(view: &FilteredView) -> Vec<ScatterPoint> {
    view.iter()
        .map(|(r, games)| ScatterPoint {
            user_score: r.user_score,
            critic_score: r.critic_score,
            games_released: games,
            genre: r.genre.clone(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Year pickers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearBound {
    LessThan,
    GreaterThan,
}

/// Available years strictly on one side of `bound`, ascending.
///
/// Picking an end year offers start years `LessThan` it and vice versa, which
/// keeps both pickers consistent with each other.
pub fn year_options(bound: i32, available_years: &[i32], direction: YearBound) -> Vec<i32> {
    let mut years: Vec<i32> = available_years
        .iter()
        .copied()
        .filter(|&year| match direction {
            YearBound::LessThan => year < bound,
            YearBound::GreaterThan => year > bound,
        })
        .collect();
    years.sort_unstable();
    years
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::data::filter::{filter, FilterCriteria};
    use crate::data::model::{record, Dataset};

    fn view() -> FilteredView {
        let mut halo = record("Halo 3", "X360", 2007, "Shooter", "M");
        halo.critic_score = 94.0;
        halo.user_score = 7.8;
        let dataset = Arc::new(Dataset::from_records(vec![
            halo,
            record("Gears", "X360", 2006, "Shooter", "M"),
            record("Mass Effect", "X360", 2007, "Role-Playing", "M"),
            record("Uncharted", "PS3", 2007, "Action", "T"),
            record("Resistance", "PS3", 2006, "Shooter", "M"),
            record("Bioshock", "PC", 2007, "Shooter", "M"),
        ]));
        let genres = ["Shooter", "Role-Playing", "Action"];
        let ratings = ["M", "T"];
        filter(
            &dataset,
            &FilterCriteria {
                from_year: 2006,
                till_year: 2007,
                genres: genres.iter().map(|g| g.to_string()).collect(),
                ratings: ratings.iter().map(|r| r.to_string()).collect(),
            },
        )
    }

    #[test]
    fn count_matches_view_length() {
        assert_eq!(count(&view()), 6);
    }

    #[test]
    fn area_series_has_one_entry_per_group() {
        let series = area_series(&view());
        let expected: AreaSeries = [
            (("PC".to_owned(), 2007), 1),
            (("PS3".to_owned(), 2006), 1),
            (("PS3".to_owned(), 2007), 1),
            (("X360".to_owned(), 2006), 1),
            (("X360".to_owned(), 2007), 2),
        ]
        .into_iter()
        .collect();
        assert_eq!(series, expected);
    }

    #[test]
    fn stacked_layers_accumulate() {
        let layers = stack_area(&area_series(&view()));
        let platforms: Vec<&str> = layers.iter().map(|l| l.platform.as_str()).collect();
        assert_eq!(platforms, vec!["PC", "PS3", "X360"]);

        // PC has nothing in 2006 but still gets a flat band there.
        assert_eq!(layers[0].bands, vec![(2006, 0.0, 0.0), (2007, 0.0, 1.0)]);
        assert_eq!(layers[1].bands, vec![(2006, 0.0, 1.0), (2007, 1.0, 2.0)]);
        assert_eq!(layers[2].bands, vec![(2006, 1.0, 2.0), (2007, 2.0, 4.0)]);
    }

    #[test]
    fn stacking_empty_series_yields_no_layers() {
        assert!(stack_area(&AreaSeries::new()).is_empty());
    }

    #[test]
    fn scatter_points_follow_view_order() {
        let points = scatter_points(&view());
        assert_eq!(points.len(), 6);
        assert_eq!(
            points[0],
            ScatterPoint {
                user_score: 7.8,
                critic_score: 94.0,
                games_released: 2,
                genre: "Shooter".to_owned(),
            }
        );
        assert_eq!(points[3].genre, "Action");
    }

    #[test]
    fn start_picker_offers_years_before_end() {
        let years: Vec<i32> = (2001..=2020).collect();
        assert_eq!(
            year_options(2010, &years, YearBound::LessThan),
            (2001..=2009).collect::<Vec<_>>()
        );
    }

    #[test]
    fn end_picker_offers_years_after_start() {
        let years = [2004, 2001, 2010, 2007];
        assert_eq!(
            year_options(2004, &years, YearBound::GreaterThan),
            vec![2007, 2010]
        );
        assert!(year_options(2010, &years, YearBound::GreaterThan).is_empty());
    }
}
