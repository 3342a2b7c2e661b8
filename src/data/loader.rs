use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{Dataset, Record, MIN_RELEASE_YEAR};

/// Columns every source file must provide.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Name",
    "Platform",
    "Year_of_Release",
    "Genre",
    "Rating",
    "Critic_Score",
    "User_Score",
];

/// Cell values treated as missing, in addition to blank cells.
const NA_TOKENS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "#N/A", "<NA>",
];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed delimited data: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and clean a games dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` – comma separated, header row
/// * `.tsv` – tab separated, header row
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let delimiter = match ext.as_str() {
        "csv" => b',',
        "tsv" => b'\t',
        other => return Err(LoadError::UnsupportedFormat(other.to_owned())),
    };

    let file = std::fs::File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = load_reader(file, delimiter)?;
    log::info!(
        "Loaded {} games from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

/// Load and clean a games dataset from any delimited source.
pub fn load_reader<R: Read>(source: R, delimiter: u8) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(source);
    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::locate(&headers)?;

    let mut records = Vec::new();
    let mut stats = CleanStats::default();

    for result in reader.records() {
        let row = result?;
        stats.read += 1;

        // Short rows lack trailing cells, which counts as missing.
        if row.len() != headers.len() || row.iter().any(is_missing) {
            stats.incomplete += 1;
            continue;
        }
        let Some(record) = columns.parse(&row) else {
            stats.unparseable += 1;
            continue;
        };
        if record.year_of_release < MIN_RELEASE_YEAR {
            stats.too_old += 1;
            continue;
        }
        records.push(record);
    }

    log::debug!(
        "Read {} rows: dropped {} incomplete, {} unparseable, {} before {MIN_RELEASE_YEAR}",
        stats.read,
        stats.incomplete,
        stats.unparseable,
        stats.too_old
    );

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Cleaning helpers
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct CleanStats {
    read: usize,
    incomplete: usize,
    unparseable: usize,
    too_old: usize,
}

fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || NA_TOKENS.contains(&cell)
}

/// Positions of the required columns within the header row.
struct ColumnIndex {
    name: usize,
    platform: usize,
    year: usize,
    genre: usize,
    rating: usize,
    critic_score: usize,
    user_score: usize,
}

impl ColumnIndex {
    fn locate(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let position = |column: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or(LoadError::MissingColumn(column))
        };
        let [name, platform, year, genre, rating, critic_score, user_score] = REQUIRED_COLUMNS;
        Ok(ColumnIndex {
            name: position(name)?,
            platform: position(platform)?,
            year: position(year)?,
            genre: position(genre)?,
            rating: position(rating)?,
            critic_score: position(critic_score)?,
            user_score: position(user_score)?,
        })
    }

    /// `None` when a typed column does not parse, e.g. a `tbd` user score.
    fn parse(&self, row: &csv::StringRecord) -> Option<Record> {
        let text = |idx: usize| row.get(idx).map(str::to_owned);
        Some(Record {
            name: text(self.name)?,
            platform: text(self.platform)?,
            year_of_release: parse_year(row.get(self.year)?)?,
            genre: text(self.genre)?,
            rating: text(self.rating)?,
            critic_score: parse_score(row.get(self.critic_score)?)?,
            user_score: parse_score(row.get(self.user_score)?)?,
        })
    }
}

/// Accepts `2006` as well as the float spelling `2006.0`.
fn parse_year(s: &str) -> Option<i32> {
    let s = s.trim();
    if let Ok(year) = s.parse::<i32>() {
        return Some(year);
    }
    let year = s.parse::<f64>().ok()?;
    if year.fract() != 0.0 || year < i32::MIN as f64 || year > i32::MAX as f64 {
        return None;
    }
    Some(year as i32)
}

fn parse_score(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
