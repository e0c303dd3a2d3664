use super::mapping::Column;
use super::normalizer::{identifier_from_number, identifier_from_text};
use super::LoadError;
use crate::readiness::domain::{AreaUnit, RawMetrics, SubIndexScores};
use std::collections::HashMap;

/// A single input value before it is typed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

/// Collects the recognised cells of one row and assembles an [`AreaUnit`].
#[derive(Debug, Default)]
pub(crate) struct RowBuilder {
    cells: HashMap<Column, Cell>,
}

impl RowBuilder {
    /// Records a cell. The first occurrence of a column wins.
    pub(crate) fn insert(&mut self, column: Column, cell: Cell) {
        self.cells.entry(column).or_insert(cell);
    }

    /// `row` is the 1-based data row, used in error messages.
    pub(crate) fn build(mut self, row: usize) -> Result<AreaUnit, LoadError> {
        let geoid = match self.identifier(Column::GeoId, row)? {
            Some(geoid) => geoid,
            None => self
                .identifier(Column::Fips, row)?
                .ok_or(LoadError::MissingColumn {
                    column: Column::GeoId.name(),
                })?,
        };

        let county = match self.take(Column::County)? {
            Cell::Text(text) if !text.trim().is_empty() => text.trim().to_string(),
            Cell::Number(number) => identifier_from_number(number),
            Cell::Text(_) | Cell::Empty => {
                return Err(LoadError::MissingValue {
                    row,
                    column: Column::County.name(),
                })
            }
        };

        let mut sub_indices = SubIndexScores::default();
        let mut metrics = RawMetrics::default();
        for column in Column::required() {
            match column {
                Column::SubIndex(index) => sub_indices.set(index, self.number(column, row)?),
                Column::Metric(metric) => metrics.set(metric, self.number(column, row)?),
                Column::GeoId | Column::Fips | Column::County => {}
            }
        }

        Ok(AreaUnit {
            geoid,
            county,
            sub_indices,
            metrics,
        })
    }

    fn take(&mut self, column: Column) -> Result<Cell, LoadError> {
        self.cells.remove(&column).ok_or(LoadError::MissingColumn {
            column: column.name(),
        })
    }

    fn identifier(&mut self, column: Column, row: usize) -> Result<Option<String>, LoadError> {
        match self.cells.remove(&column) {
            None => Ok(None),
            Some(Cell::Number(number)) => Ok(Some(identifier_from_number(number))),
            Some(Cell::Text(text)) if !text.trim().is_empty() => {
                Ok(Some(identifier_from_text(&text)))
            }
            Some(Cell::Text(_)) | Some(Cell::Empty) => Err(LoadError::MissingValue {
                row,
                column: column.name(),
            }),
        }
    }

    fn number(&mut self, column: Column, row: usize) -> Result<f64, LoadError> {
        match self.take(column)? {
            Cell::Number(number) => Ok(number),
            Cell::Text(text) if text.trim().is_empty() => Err(LoadError::MissingValue {
                row,
                column: column.name(),
            }),
            Cell::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| LoadError::InvalidNumber {
                    row,
                    column: column.name(),
                    value: text,
                }),
            Cell::Empty => Err(LoadError::MissingValue {
                row,
                column: column.name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readiness::domain::{RawMetric, SubIndex};

    fn complete_row() -> RowBuilder {
        let mut builder = RowBuilder::default();
        builder.insert(Column::County, Cell::Text("Wake".to_string()));
        for column in Column::required().skip(1) {
            builder.insert(column, Cell::Number(0.5));
        }
        builder
    }

    #[test]
    fn fips_stands_in_for_missing_geoid() {
        let mut builder = complete_row();
        builder.insert(Column::Fips, Cell::Number(37183052101.0));

        let unit = builder.build(1).expect("row builds");
        assert_eq!(unit.geoid, "37183052101");
        assert_eq!(unit.county, "Wake");
        assert_eq!(unit.sub_index(SubIndex::SocialVulnerability), 0.5);
    }

    #[test]
    fn geoid_takes_precedence_over_fips() {
        let mut builder = complete_row();
        builder.insert(Column::GeoId, Cell::Text("100".to_string()));
        builder.insert(Column::Fips, Cell::Text("200".to_string()));

        assert_eq!(builder.build(1).expect("row builds").geoid, "100");
    }

    #[test]
    fn reports_unparseable_numbers_with_their_row() {
        let mut builder = RowBuilder::default();
        builder.insert(Column::GeoId, Cell::Text("1".to_string()));
        builder.insert(
            Column::Metric(RawMetric::UploadSpeed),
            Cell::Text("fast".to_string()),
        );
        let mut rest = complete_row();
        rest.cells.remove(&Column::Metric(RawMetric::UploadSpeed));
        for (column, cell) in rest.cells {
            builder.insert(column, cell);
        }

        match builder.build(4).expect_err("bad number") {
            LoadError::InvalidNumber { row, column, value } => {
                assert_eq!(row, 4);
                assert_eq!(column, "B_upload_percent");
                assert_eq!(value, "fast");
            }
            other => panic!("expected invalid number, got {other:?}"),
        }
    }

    #[test]
    fn missing_identifier_is_a_missing_column() {
        let error = complete_row().build(1).expect_err("no identifier");
        assert!(matches!(error, LoadError::MissingColumn { column: "GEOID" }));
    }

    #[test]
    fn blank_values_are_missing() {
        let mut builder = complete_row();
        builder.insert(Column::GeoId, Cell::Text("1".to_string()));
        builder
            .cells
            .insert(Column::SubIndex(SubIndex::PhysicalInfrastructure), Cell::Empty);

        let error = builder.build(2).expect_err("blank");
        assert!(matches!(
            error,
            LoadError::MissingValue {
                row: 2,
                column: "S_PI"
            }
        ));
    }
}
