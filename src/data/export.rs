use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use super::filter::FilteredView;

/// One exported row, keyed by the source file's column names.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Platform")]
    platform: &'a str,
    #[serde(rename = "Year_of_Release")]
    year_of_release: i32,
    #[serde(rename = "Genre")]
    genre: &'a str,
    #[serde(rename = "Rating")]
    rating: &'a str,
    #[serde(rename = "Critic_Score")]
    critic_score: f64,
    #[serde(rename = "User_Score")]
    user_score: f64,
    #[serde(rename = "Games_released")]
    games_released: usize,
}

fn export_rows(view: &FilteredView) -> impl Iterator<Item = ExportRow<'_>> {
    view.iter().map(|(r, games_released)| ExportRow {
        name: &r.name,
        platform: &r.platform,
        year_of_release: r.year_of_release,
        genre: &r.genre,
        rating: &r.rating,
        critic_score: r.critic_score,
        user_score: r.user_score,
        games_released,
    })
}

/// Write the view as CSV with a header row.
pub fn write_csv<W: Write>(view: &FilteredView, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in export_rows(view) {
        csv.serialize(row).context("writing CSV row")?;
    }
    csv.flush().context("flushing CSV")?;
    Ok(())
}

/// Write the view as a JSON array of records.
pub fn write_json<W: Write>(view: &FilteredView, writer: W) -> Result<()> {
    let rows: Vec<ExportRow<'_>> = export_rows(view).collect();
    serde_json::to_writer_pretty(writer, &rows).context("writing JSON")?;
    Ok(())
}

/// Export to `path`.  Dispatch by extension (`.csv` or `.json`).
pub fn export_file(view: &FilteredView, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "csv" && ext != "json" {
        bail!("Unsupported export extension: .{ext}");
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = std::io::BufWriter::new(file);
    match ext.as_str() {
        "csv" => write_csv(view, &mut writer)?,
        _ => write_json(view, &mut writer)?,
    }
    writer
        .flush()
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported {} games to {}", view.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::data::filter::{filter, FilterCriteria};
    use crate::data::model::{record, Dataset};

    fn view() -> FilteredView {
        let dataset = Arc::new(Dataset::from_records(vec![
            record("Okami", "PS2", 2006, "Action", "T"),
            record("Bully", "PS2", 2006, "Action", "T"),
            record("Skipped", "PS2", 2006, "Puzzle", "E"),
        ]));
        filter(
            &dataset,
            &FilterCriteria {
                from_year: 2000,
                till_year: 2010,
                genres: ["Action".to_owned()].into(),
                ratings: ["T".to_owned()].into(),
            },
        )
    }

    #[test]
    fn csv_has_header_and_one_line_per_row() {
        let mut out = Vec::new();
        write_csv(&view(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Name,Platform,Year_of_Release,Genre,Rating,Critic_Score,User_Score,Games_released"
        );
        assert_eq!(lines[1], "Okami,PS2,2006,Action,T,80.0,8.0,2");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn json_is_an_array_of_records() {
        let mut out = Vec::new();
        write_json(&view(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["Name"], "Bully");
        assert_eq!(rows[1]["Games_released"], 2);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(export_file(&view(), Path::new("view.parquet")).is_err());
    }
}
