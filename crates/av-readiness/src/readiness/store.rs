use super::domain::AreaUnit;
use crate::ingest::{self, LoadError, SourceFormat};
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashSet};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// Immutable table of per-tract metrics, validated on construction.
#[derive(Debug, Clone)]
pub struct MetricStore {
    units: Vec<AreaUnit>,
    source: Option<PathBuf>,
    loaded_at: DateTime<Utc>,
}

impl MetricStore {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let units = ingest::read_path(path)?;
        let mut store = Self::from_units(units)?;
        store.source = Some(path.to_path_buf());

        info!(
            path = %path.display(),
            tracts = store.len(),
            counties = store.county_names().len(),
            "loaded readiness metrics"
        );

        Ok(store)
    }

    pub fn from_reader<R: Read>(reader: R, format: SourceFormat) -> Result<Self, LoadError> {
        Self::from_units(ingest::read(reader, format)?)
    }

    /// Checks the table invariants: at least one row, unique GEOIDs, and every
    /// value finite within [0,1].
    pub fn from_units(units: Vec<AreaUnit>) -> Result<Self, LoadError> {
        if units.is_empty() {
            return Err(LoadError::EmptyAreaSet);
        }

        let mut seen = HashSet::with_capacity(units.len());
        for unit in &units {
            if !seen.insert(unit.geoid.as_str()) {
                return Err(LoadError::DuplicateGeoid(unit.geoid.clone()));
            }
            check_fractions(unit)?;
        }

        Ok(Self {
            units,
            source: None,
            loaded_at: Utc::now(),
        })
    }

    /// Re-reads the source file into a fresh store. Stores built from readers
    /// or in-memory rows have no source and are returned as-is.
    pub fn reload(&self) -> Result<Self, LoadError> {
        match &self.source {
            Some(path) => Self::load(path),
            None => Ok(self.clone()),
        }
    }

    pub fn units(&self) -> &[AreaUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn get(&self, geoid: &str) -> Option<&AreaUnit> {
        self.units.iter().find(|unit| unit.geoid == geoid)
    }

    pub fn units_in<'a>(&'a self, county: &'a str) -> impl Iterator<Item = &'a AreaUnit> + 'a {
        self.units.iter().filter(move |unit| unit.county == county)
    }

    /// Unique county names in ascending order.
    pub fn county_names(&self) -> Vec<String> {
        self.units
            .iter()
            .map(|unit| unit.county.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

fn check_fractions(unit: &AreaUnit) -> Result<(), LoadError> {
    let sub_indices = unit
        .sub_indices
        .iter()
        .map(|(index, value)| (index.column(), value));
    let metrics = unit
        .metrics
        .iter()
        .map(|(metric, value)| (metric.column(), value));

    for (column, value) in sub_indices.chain(metrics) {
        if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
            return Err(LoadError::OutOfRange {
                geoid: unit.geoid.clone(),
                column,
                value,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readiness::domain::{RawMetric, RawMetrics, SubIndexScores};

    fn tract(geoid: &str, county: &str) -> AreaUnit {
        AreaUnit {
            geoid: geoid.to_string(),
            county: county.to_string(),
            sub_indices: SubIndexScores::new(0.5, 0.5, 0.5),
            metrics: RawMetrics::default(),
        }
    }

    #[test]
    fn rejects_empty_tables() {
        assert!(matches!(
            MetricStore::from_units(Vec::new()),
            Err(LoadError::EmptyAreaSet)
        ));
    }

    #[test]
    fn rejects_duplicate_geoids() {
        let error = MetricStore::from_units(vec![tract("1", "Wake"), tract("1", "Hyde")])
            .expect_err("duplicate");
        assert!(matches!(error, LoadError::DuplicateGeoid(geoid) if geoid == "1"));
    }

    #[test]
    fn rejects_values_outside_unit_interval() {
        let mut unit = tract("1", "Wake");
        unit.metrics.set(RawMetric::DownloadSpeed, 1.2);

        match MetricStore::from_units(vec![unit]).expect_err("out of range") {
            LoadError::OutOfRange { column, value, .. } => {
                assert_eq!(column, "B_download_percent");
                assert_eq!(value, 1.2);
            }
            other => panic!("expected range error, got {other:?}"),
        }
    }

    #[test]
    fn county_names_are_sorted_and_unique() {
        let store = MetricStore::from_units(vec![
            tract("1", "Wake"),
            tract("2", "Hyde"),
            tract("3", "Wake"),
            tract("4", "Durham"),
        ])
        .expect("valid store");

        assert_eq!(store.county_names(), vec!["Durham", "Hyde", "Wake"]);
        assert_eq!(store.units_in("Wake").count(), 2);
        assert_eq!(store.get("2").map(|unit| unit.county.as_str()), Some("Hyde"));
    }

    #[test]
    fn in_memory_reload_returns_identical_rows() {
        let store = MetricStore::from_units(vec![tract("1", "Wake")]).expect("valid store");
        let reloaded = store.reload().expect("reload");
        assert_eq!(store.units(), reloaded.units());
        assert!(reloaded.source().is_none());
    }
}
