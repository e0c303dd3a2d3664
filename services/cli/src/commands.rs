use av_readiness::error::AppError;
use av_readiness::readiness::compare::STATE_LEVEL_ID;
use av_readiness::readiness::{
    ChoroplethLayer, ComparisonInsights, ComparisonResult, FocusReadout, Granularity,
    MapSelection, ReadinessEngine, ScoreKind, StateAggregate, SubIndex, WeightSet,
};
use chrono::SecondsFormat;
use clap::Args;
use serde::Serialize;
use std::io::Write;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Debug)]
pub(crate) struct MapArgs {
    /// Areal resolution: tract or county
    #[arg(long, default_value = "tract", value_parser = crate::infra::parse_granularity)]
    pub(crate) granularity: Granularity,
    /// Score column: readiness_score, S_PI, S_DI or S_SVI
    #[arg(long, default_value = "readiness_score")]
    pub(crate) score: String,
    /// County to focus; restricts tract output to that county and adds a readout
    #[arg(long)]
    pub(crate) county: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// Baseline county, or "state level"
    #[arg(long, default_value = STATE_LEVEL_ID)]
    pub(crate) baseline: String,
    /// County to compare against the baseline, or "state level"
    #[arg(long, default_value = STATE_LEVEL_ID)]
    pub(crate) compare: String,
}

#[derive(Args, Debug)]
pub(crate) struct CountyArgs {
    /// County to report on
    #[arg(long)]
    pub(crate) name: String,
}

#[derive(Serialize)]
struct SummaryView<'a> {
    source: Option<String>,
    loaded_at: String,
    tracts: usize,
    counties: usize,
    weights: &'a WeightSet,
    state: &'a StateAggregate,
}

#[derive(Serialize)]
struct MapView<'a> {
    layer: &'a ChoroplethLayer,
    focus: Option<&'a FocusReadout>,
}

#[derive(Serialize)]
struct CompareView<'a> {
    result: &'a ComparisonResult,
    insights: &'a ComparisonInsights,
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub(crate) fn summary<W: Write>(
    out: &mut W,
    engine: &ReadinessEngine,
    weights: &WeightSet,
    format: OutputFormat,
) -> Result<(), AppError> {
    let counties = engine.county_aggregates(weights);
    let state = engine.state_aggregate(&counties)?;
    let store = engine.store();

    if format == OutputFormat::Json {
        return write_json(
            out,
            &SummaryView {
                source: store.source().map(|path| path.display().to_string()),
                loaded_at: store.loaded_at().to_rfc3339_opts(SecondsFormat::Secs, true),
                tracts: store.len(),
                counties: counties.len(),
                weights,
                state: &state,
            },
        );
    }

    let source = store
        .source()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "in-memory table".to_string());
    writeln!(out, "AV readiness summary")?;
    writeln!(
        out,
        "- Dataset: {} ({} tracts across {} counties, loaded {})",
        source,
        store.len(),
        counties.len(),
        store.loaded_at().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(
        out,
        "- Weights: PI {:.2} | DI {:.2} | SVI {:.2}",
        weights.pi(),
        weights.di(),
        weights.svi()
    )?;
    writeln!(out, "State averages:")?;
    writeln!(out, "  - Overall Readiness: {:.2}%", state.readiness_score)?;
    for (index, value) in state.sub_indices.iter() {
        writeln!(out, "  - {}: {:.2}%", index.label(), value * 100.0)?;
    }

    if let (Some(top), Some(bottom)) = (
        counties
            .values()
            .max_by(|a, b| a.readiness_score.total_cmp(&b.readiness_score)),
        counties
            .values()
            .min_by(|a, b| a.readiness_score.total_cmp(&b.readiness_score)),
    ) {
        writeln!(
            out,
            "Highest readiness: {} ({:.2}%) | Lowest readiness: {} ({:.2}%)",
            top.county, top.readiness_score, bottom.county, bottom.readiness_score
        )?;
    }

    Ok(())
}

pub(crate) fn counties<W: Write>(
    out: &mut W,
    engine: &ReadinessEngine,
    format: OutputFormat,
) -> Result<(), AppError> {
    let names = engine.county_list();
    if format == OutputFormat::Json {
        return write_json(out, &names);
    }

    for name in names {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

pub(crate) fn map<W: Write>(
    out: &mut W,
    engine: &ReadinessEngine,
    weights: &WeightSet,
    args: &MapArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let score = ScoreKind::from_selector_or_overall(&args.score);
    if ScoreKind::parse(&args.score).is_none() {
        warn!(selector = %args.score, "unknown score selector, showing overall readiness");
    }

    let selection = MapSelection::new(args.granularity, score);
    let mut layer = engine.map_layer(selection, weights);
    let focus = match &args.county {
        Some(county) => {
            let readout = engine.focus_readout(county, score, weights)?;
            if args.granularity == Granularity::Tract {
                layer.features.retain(|feature| &feature.county == county);
            }
            Some(readout)
        }
        None => None,
    };

    if format == OutputFormat::Json {
        return write_json(
            out,
            &MapView {
                layer: &layer,
                focus: focus.as_ref(),
            },
        );
    }

    writeln!(
        out,
        "{} | {} ({})",
        selection.granularity.label(),
        score.label(),
        layer.value_column
    )?;
    for feature in &layer.features {
        match selection.granularity {
            Granularity::Tract => writeln!(
                out,
                "  {:<14} {:<20} {:>7.2}%",
                feature.key, feature.county, feature.percent
            )?,
            Granularity::County => {
                writeln!(out, "  {:<20} {:>7.2}%", feature.key, feature.percent)?
            }
        }
    }
    if let Some(readout) = focus {
        writeln!(out, "{}", readout.message)?;
    }

    Ok(())
}

pub(crate) fn compare<W: Write>(
    out: &mut W,
    engine: &ReadinessEngine,
    weights: &WeightSet,
    args: &CompareArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let result = engine.compare_areas(&args.baseline, &args.compare, weights)?;
    let insights = result.insights();

    if format == OutputFormat::Json {
        return write_json(
            out,
            &CompareView {
                result: &result,
                insights: &insights,
            },
        );
    }

    let (left, right) = (&result.baseline, &result.compare);
    writeln!(out, "{} vs {}", left.label, right.label)?;
    writeln!(
        out,
        "  {:<32} {:>9.2}% {:>9.2}%",
        "Overall Readiness", left.readiness_score, right.readiness_score
    )?;
    for index in SubIndex::ordered() {
        writeln!(
            out,
            "  {:<32} {:>9.2}% {:>9.2}%",
            index.label(),
            left.summary_percent(index),
            right.summary_percent(index)
        )?;
    }
    writeln!(out, "Detailed metrics:")?;
    for (a, b) in left.detail.iter().zip(&right.detail) {
        writeln!(
            out,
            "  {:<32} {:>9.2}% {:>9.2}%",
            a.label, a.percent, b.percent
        )?;
    }

    writeln!(out, "\n{} insights:", left.label)?;
    for line in &insights.baseline {
        writeln!(out, "  - {line}")?;
    }
    writeln!(out, "\n{} insights:", right.label)?;
    for line in &insights.compare {
        writeln!(out, "  - {line}")?;
    }
    writeln!(out, "\nComparison:")?;
    for line in &insights.comparison {
        writeln!(out, "  - {line}")?;
    }

    Ok(())
}

pub(crate) fn county<W: Write>(
    out: &mut W,
    engine: &ReadinessEngine,
    weights: &WeightSet,
    args: &CountyArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let panel = engine.county_metrics(&args.name, weights)?;
    if format == OutputFormat::Json {
        return write_json(out, &panel);
    }

    writeln!(out, "{} ({} tracts)", panel.county, panel.tract_count)?;
    writeln!(
        out,
        "  {:<32} {:>7.2}%",
        "Overall Readiness", panel.readiness_score
    )?;
    for entry in &panel.sub_indices {
        writeln!(out, "  {:<32} {:>7.2}%", entry.label, entry.percent)?;
    }
    writeln!(out, "Input metrics:")?;
    for entry in &panel.metrics {
        writeln!(out, "  {:<32} {:>7.2}%", entry.label, entry.percent)?;
    }
    writeln!(out, "  {:<32} {:>7.2}%", "Paved Roads", panel.paved_percent)?;

    Ok(())
}

pub(crate) fn weights<W: Write>(
    out: &mut W,
    weights: &WeightSet,
    format: OutputFormat,
) -> Result<(), AppError> {
    if format == OutputFormat::Json {
        return write_json(out, weights);
    }

    writeln!(
        out,
        "Weights accepted: PI {:.2} | DI {:.2} | SVI {:.2}",
        weights.pi(),
        weights.di(),
        weights.svi()
    )?;
    Ok(())
}
