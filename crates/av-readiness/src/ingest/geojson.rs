use super::mapping::column_for_header;
use super::rows::{Cell, RowBuilder};
use super::LoadError;
use crate::readiness::domain::AreaUnit;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::io::Read;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<Feature>,
}

/// Geometry is left unparsed; only the properties carry metrics.
#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

pub(crate) fn parse_geojson<R: Read>(reader: R) -> Result<Vec<AreaUnit>, LoadError> {
    let collection: FeatureCollection = serde_json::from_reader(reader)?;
    if collection.kind != "FeatureCollection" {
        return Err(LoadError::NotFeatureCollection);
    }

    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| {
            let mut builder = RowBuilder::default();
            for (key, value) in feature.properties.unwrap_or_default() {
                if let Some(column) = column_for_header(&key) {
                    builder.insert(column, cell_from_value(value));
                }
            }
            builder.build(index + 1)
        })
        .collect()
}

fn cell_from_value(value: Value) -> Cell {
    match value {
        Value::Null => Cell::Empty,
        Value::Number(number) => number.as_f64().map(Cell::Number).unwrap_or(Cell::Empty),
        Value::String(text) if text.trim().is_empty() => Cell::Empty,
        Value::String(text) => Cell::Text(text),
        other => Cell::Text(other.to_string()),
    }
}
