//! Readers for the per-tract metric table.
//!
//! Two layouts are accepted: a GeoJSON `FeatureCollection` whose feature
//! properties hold the metric columns, and a flat CSV export with the same
//! columns. Header names are matched loosely through an alias table.

mod geojson;
mod mapping;
mod normalizer;
mod parser;
mod rows;

use crate::readiness::domain::AreaUnit;
use std::fmt;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Input layouts understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    GeoJson,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "geojson" | "json" => Ok(Self::GeoJson),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    UnsupportedFormat(String),
    NotFeatureCollection,
    MissingColumn {
        column: &'static str,
    },
    MissingValue {
        row: usize,
        column: &'static str,
    },
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
    OutOfRange {
        geoid: String,
        column: &'static str,
        value: f64,
    },
    DuplicateGeoid(String),
    EmptyAreaSet,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "failed to read metric data: {}", err),
            LoadError::Csv(err) => write!(f, "invalid CSV metric data: {}", err),
            LoadError::Json(err) => write!(f, "invalid GeoJSON metric data: {}", err),
            LoadError::UnsupportedFormat(path) => write!(
                f,
                "unsupported data file '{}': expected .geojson, .json or .csv",
                path
            ),
            LoadError::NotFeatureCollection => {
                write!(f, "GeoJSON input must be a FeatureCollection")
            }
            LoadError::MissingColumn { column } => {
                write!(f, "required column '{}' is missing", column)
            }
            LoadError::MissingValue { row, column } => {
                write!(f, "row {}: column '{}' has no value", row, column)
            }
            LoadError::InvalidNumber { row, column, value } => write!(
                f,
                "row {}: column '{}' value '{}' is not a number",
                row, column, value
            ),
            LoadError::OutOfRange {
                geoid,
                column,
                value,
            } => write!(
                f,
                "tract {}: column '{}' value {} is outside [0, 1]",
                geoid, column, value
            ),
            LoadError::DuplicateGeoid(geoid) => write!(f, "GEOID {} appears more than once", geoid),
            LoadError::EmptyAreaSet => write!(f, "metric data contains no census tracts"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            LoadError::Csv(err) => Some(err),
            LoadError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Reads a metric file, choosing the layout from its extension.
pub fn read_path<P: AsRef<Path>>(path: P) -> Result<Vec<AreaUnit>, LoadError> {
    let path = path.as_ref();
    let format = SourceFormat::from_path(path)?;
    let file = std::fs::File::open(path)?;
    debug!(path = %path.display(), ?format, "reading metric file");
    read(std::io::BufReader::new(file), format)
}

pub fn read<R: Read>(reader: R, format: SourceFormat) -> Result<Vec<AreaUnit>, LoadError> {
    match format {
        SourceFormat::Csv => parser::parse_csv(reader),
        SourceFormat::GeoJson => geojson::parse_geojson(reader),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_the_file_extension() {
        assert_eq!(
            SourceFormat::from_path(Path::new("data/NC_data.geojson")).expect("geojson"),
            SourceFormat::GeoJson
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("export.CSV")).expect("csv"),
            SourceFormat::Csv
        );
        assert!(matches!(
            SourceFormat::from_path(Path::new("tracts.shp")),
            Err(LoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn missing_files_surface_io_errors() {
        let error = read_path("does/not/exist.csv").expect_err("missing file");
        assert!(matches!(error, LoadError::Io(_)));
        assert!(error.to_string().starts_with("failed to read metric data"));
    }
}
