use std::collections::BTreeMap;

use eframe::egui::{Stroke, Ui};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoints, Points, Polygon};

use crate::data::aggregate::{area_series, scatter_points, stack_area};
use crate::state::AppState;

/// Diameter of the largest scatter marker, in points.
const SIZE_MAX: f32 = 25.0;

// ---------------------------------------------------------------------------
// Stacked area chart: releases per platform per year
// ---------------------------------------------------------------------------

pub fn area_plot(ui: &mut Ui, state: &AppState) {
    let layers = stack_area(&area_series(&state.view));

    Plot::new("area_plot")
        .legend(Legend::default())
        .x_axis_label("Year_of_Release")
        .y_axis_label("Games_released")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for layer in &layers {
                let color = state.platform_colors.color_for(&layer.platform);

                // egui_plot only fills convex polygons, so each year-to-year
                // segment of the band is its own quad.
                for pair in layer.bands.windows(2) {
                    let (x0, lo0, hi0) = pair[0];
                    let (x1, lo1, hi1) = pair[1];
                    let quad: PlotPoints = vec![
                        [x0 as f64, lo0],
                        [x1 as f64, lo1],
                        [x1 as f64, hi1],
                        [x0 as f64, hi0],
                    ]
                    .into();
                    plot_ui.polygon(
                        Polygon::new(quad)
                            .name(&layer.platform)
                            .fill_color(color.gamma_multiply(0.5))
                            .stroke(Stroke::NONE),
                    );
                }

                let upper: PlotPoints = layer
                    .bands
                    .iter()
                    .map(|&(year, _, hi)| [year as f64, hi])
                    .collect();
                plot_ui.line(
                    Line::new(upper)
                        .name(&layer.platform)
                        .color(color)
                        .width(1.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter chart: critic vs. user score
// ---------------------------------------------------------------------------

/// Marker radius whose area is proportional to `games`.
pub fn marker_radius(games: usize, max_games: usize) -> f32 {
    if max_games == 0 {
        return 0.0;
    }
    let scale = (games as f32 / max_games as f32).sqrt();
    (SIZE_MAX / 2.0 * scale).max(1.5)
}

pub fn scatter_plot(ui: &mut Ui, state: &AppState) {
    let points = scatter_points(&state.view);
    let max_games = points.iter().map(|p| p.games_released).max().unwrap_or(0);

    // One series per (genre, size) keeps the draw calls bounded.
    let mut groups: BTreeMap<(&str, usize), Vec<[f64; 2]>> = BTreeMap::new();
    for p in &points {
        groups
            .entry((p.genre.as_str(), p.games_released))
            .or_default()
            .push([p.user_score, p.critic_score]);
    }

    Plot::new("scatter_plot")
        .legend(Legend::default())
        .x_axis_label("User_Score")
        .y_axis_label("Critic_Score")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for ((genre, games), coords) in groups {
                plot_ui.points(
                    Points::new(coords)
                        .name(genre)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(marker_radius(games, max_games))
                        .color(state.genre_colors.color_for(genre)),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn largest_group_gets_full_size() {
        assert_eq!(marker_radius(8, 8), SIZE_MAX / 2.0);
        assert_eq!(marker_radius(2, 8), SIZE_MAX / 4.0);
    }

    #[test]
    fn tiny_groups_stay_visible() {
        assert_eq!(marker_radius(1, 10_000), 1.5);
        assert_eq!(marker_radius(0, 0), 0.0);
    }
}
