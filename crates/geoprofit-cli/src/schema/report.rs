use chrono::{DateTime, Utc};
use geoprofit_analysis::{
    comparator::RankedRegion,
    config::PipelineConfig,
    pipeline::{PipelineReport, RegionReport},
};
use geoprofit_data::RegionId;
use serde::Serialize;

/// JSON document written by `analyze`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub config: PipelineConfig,
    pub inputs: Vec<String>,
    pub regions: Vec<RegionReport>,
    pub ranking: Vec<RankedRegion>,
    pub recommended_region: Option<RegionId>,
    /// Why no region was recommended, if none was.
    pub no_viable_region: Option<String>,
}

impl AnalysisReport {
    pub fn new(config: PipelineConfig, inputs: Vec<String>, report: PipelineReport) -> Self {
        let PipelineReport {
            regions,
            ranking,
            recommendation,
        } = report;
        let (recommended_region, no_viable_region) = match recommendation {
            Ok(region) => (Some(region), None),
            Err(err) => (None, Some(err.to_string())),
        };
        Self {
            generated_at: Utc::now(),
            config,
            inputs,
            regions,
            ranking,
            recommended_region,
            no_viable_region,
        }
    }
}
