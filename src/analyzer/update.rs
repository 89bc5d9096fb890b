//! State transitions for analyzer messages.

use super::messages::{Command, Message};
use super::state::{AnalysisPhase, AnalyzerState, SearchPhase};
use crate::features::TrackFeatures;

pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search tracks. Please try again.";
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to get audio features. Please try again.";

/// Applies `message` to `state` and returns the side effect to run, if any.
///
/// Results tagged with an older generation than the latest issued one are
/// dropped, so a slow response can never overwrite a newer action.
pub fn update(state: &mut AnalyzerState, message: Message) -> Option<Command> {
    match message {
        Message::QueryChanged(query) => {
            state.query = query;
            None
        }
        Message::SearchPressed => handle_search_pressed(state),
        Message::SearchCompleted { generation, result } => {
            if generation != state.search_generation {
                tracing::debug!(
                    "dropping stale search result (generation {}, latest {})",
                    generation,
                    state.search_generation
                );
                return None;
            }
            match result {
                Ok(tracks) => {
                    state.results = tracks;
                    state.search = SearchPhase::ResultsShown;
                }
                Err(e) => {
                    tracing::error!("search failed: {}", e);
                    state.error = Some(SEARCH_FAILED_MESSAGE.to_string());
                    state.search = SearchPhase::SearchFailed;
                }
            }
            None
        }
        Message::TrackSelected(index) => handle_track_selected(state, index),
        Message::FeaturesLoaded { generation, result } => {
            if generation != state.analysis_generation {
                tracing::debug!(
                    "dropping stale feature result (generation {}, latest {})",
                    generation,
                    state.analysis_generation
                );
                return None;
            }
            match result {
                Ok(raw) => {
                    state.features = Some(TrackFeatures::from_audio_features(&raw));
                    state.analysis = AnalysisPhase::FeaturesShown;
                }
                Err(e) => {
                    tracing::error!("audio feature lookup failed: {}", e);
                    state.error = Some(ANALYSIS_FAILED_MESSAGE.to_string());
                    state.analysis = AnalysisPhase::AnalysisFailed;
                }
            }
            None
        }
    }
}

fn handle_search_pressed(state: &mut AnalyzerState) -> Option<Command> {
    // The search control is disabled while anything is loading.
    if state.is_loading() {
        return None;
    }
    let query = state.query.trim();
    if query.is_empty() {
        return None;
    }
    let query = query.to_string();

    state.search_generation += 1;
    state.search = SearchPhase::Searching;
    state.error = None;

    Some(Command::Search {
        generation: state.search_generation,
        query,
    })
}

fn handle_track_selected(state: &mut AnalyzerState, index: usize) -> Option<Command> {
    let track = state.results.get(index)?.clone();
    let track_id = track.id.clone();

    state.analysis_generation += 1;
    state.selected = Some(track);
    state.features = None;
    state.analysis = AnalysisPhase::Analyzing;
    state.error = None;

    Some(Command::Analyze {
        generation: state.analysis_generation,
        track_id,
    })
}
