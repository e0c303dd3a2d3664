use super::mapping::{column_for_header, Column};
use super::rows::{Cell, RowBuilder};
use super::LoadError;
use crate::readiness::domain::AreaUnit;
use std::io::Read;

/// Reads a headered CSV export into area units.
pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<Vec<AreaUnit>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let layout: Vec<Option<Column>> = csv_reader
        .headers()?
        .iter()
        .map(column_for_header)
        .collect();
    check_layout(&layout)?;

    let mut units = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let mut builder = RowBuilder::default();
        for (column, value) in layout.iter().zip(record.iter()) {
            if let Some(column) = column {
                let cell = if value.is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(value.to_string())
                };
                builder.insert(*column, cell);
            }
        }
        units.push(builder.build(index + 1)?);
    }

    Ok(units)
}

fn check_layout(layout: &[Option<Column>]) -> Result<(), LoadError> {
    let has = |wanted: Column| layout.iter().flatten().any(|column| *column == wanted);

    if !has(Column::GeoId) && !has(Column::Fips) {
        return Err(LoadError::MissingColumn {
            column: Column::GeoId.name(),
        });
    }
    match Column::required().find(|column| !has(*column)) {
        Some(missing) => Err(LoadError::MissingColumn {
            column: missing.name(),
        }),
        None => Ok(()),
    }
}
