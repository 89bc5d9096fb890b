//! Message and command types for the analyzer.

use crate::error::AppError;
use crate::spotify::{AudioFeatures, Track};

/// Everything that can change analyzer state.
#[derive(Debug, Clone)]
pub enum Message {
    QueryChanged(String),
    SearchPressed,
    SearchCompleted {
        generation: u64,
        result: Result<Vec<Track>, AppError>,
    },
    /// Index into the current result list.
    TrackSelected(usize),
    FeaturesLoaded {
        generation: u64,
        result: Result<AudioFeatures, AppError>,
    },
}

/// Side effect requested by `update`, executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search { generation: u64, query: String },
    Analyze { generation: u64, track_id: String },
}
