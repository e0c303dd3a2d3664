use super::normalizer::normalize_header;
use crate::readiness::domain::{RawMetric, SubIndex};
use std::collections::HashMap;
use std::sync::OnceLock;

/// A recognised input column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Column {
    GeoId,
    Fips,
    County,
    SubIndex(SubIndex),
    Metric(RawMetric),
}

impl Column {
    /// Columns every row must provide. The tract identifier is checked
    /// separately since either `GEOID` or `FIPS` satisfies it.
    pub(crate) fn required() -> impl Iterator<Item = Column> {
        std::iter::once(Column::County)
            .chain(SubIndex::ordered().into_iter().map(Column::SubIndex))
            .chain(RawMetric::ordered().into_iter().map(Column::Metric))
    }

    pub(crate) const fn name(self) -> &'static str {
        match self {
            Column::GeoId => "GEOID",
            Column::Fips => "FIPS",
            Column::County => "COUNTY",
            Column::SubIndex(index) => index.column(),
            Column::Metric(metric) => metric.column(),
        }
    }
}

static COLUMN_MAP: OnceLock<HashMap<String, Column>> = OnceLock::new();

pub(crate) fn column_for_header(header: &str) -> Option<Column> {
    column_map().get(&normalize_header(header)).copied()
}

fn column_map() -> &'static HashMap<String, Column> {
    COLUMN_MAP.get_or_init(|| {
        const ALIASES: &[(&str, Column)] = &[
            ("GEOID20", Column::GeoId),
            ("GEOID10", Column::GeoId),
            ("GEO_ID", Column::GeoId),
            ("Tract GEOID", Column::GeoId),
            ("FIPS Code", Column::Fips),
            ("STCNTYTRACT", Column::Fips),
            ("County Name", Column::County),
            ("COUNTY_NAME", Column::County),
            ("CountyName", Column::County),
        ];

        let canonical = [Column::GeoId, Column::Fips]
            .into_iter()
            .chain(Column::required());

        let mut map = HashMap::with_capacity(ALIASES.len() + 16);
        for column in canonical {
            map.insert(normalize_header(column.name()), column);
        }
        for (alias, column) in ALIASES {
            map.insert(normalize_header(alias), *column);
        }
        map
    })
}
