//! View state for the track analyzer.

use crate::features::TrackFeatures;
use crate::spotify::Track;

/// Progress of the search action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching,
    ResultsShown,
    SearchFailed,
}

/// Progress of the feature lookup for the selected track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisPhase {
    #[default]
    Idle,
    Analyzing,
    FeaturesShown,
    AnalysisFailed,
}

#[derive(Debug, Clone, Default)]
pub struct AnalyzerState {
    pub query: String,
    pub results: Vec<Track>,
    pub selected: Option<Track>,
    pub features: Option<TrackFeatures>,
    pub error: Option<String>,
    pub search: SearchPhase,
    pub analysis: AnalysisPhase,
    pub(super) search_generation: u64,
    pub(super) analysis_generation: u64,
}

impl AnalyzerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a search or a feature lookup is outstanding.
    pub fn is_loading(&self) -> bool {
        self.search == SearchPhase::Searching || self.analysis == AnalysisPhase::Analyzing
    }

    /// Generation of the most recently issued search.
    pub fn search_generation(&self) -> u64 {
        self.search_generation
    }

    /// Generation of the most recently issued feature lookup.
    pub fn analysis_generation(&self) -> u64 {
        self.analysis_generation
    }
}
