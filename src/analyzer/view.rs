//! Terminal rendering of the analyzer screen.

use std::fmt::Write;

use super::state::{AnalysisPhase, AnalyzerState};
use crate::radar::RadarChart;

const BAR_WIDTH: usize = 24;

pub fn render(state: &AnalyzerState) -> String {
    let mut out = String::new();

    let button = if state.is_loading() { "Searching..." } else { "Search" };
    let _ = writeln!(out, "Track Analyzer");
    let _ = writeln!(out, "Search: [{}] <{}>", state.query, button);
    if let Some(error) = &state.error {
        let _ = writeln!(out, "! {}", error);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Search Results");
    for (i, track) in state.results.iter().enumerate() {
        let marker = match &state.selected {
            Some(selected) if selected.id == track.id => '>',
            _ => ' ',
        };
        let _ = writeln!(
            out,
            "{} {:>2}. {} — {}",
            marker,
            i + 1,
            track.name,
            track.primary_artist().unwrap_or("Unknown artist")
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Audio Features");
    match (&state.analysis, &state.selected, &state.features) {
        (AnalysisPhase::Analyzing, _, _) => {
            let _ = writeln!(out, "Loading...");
        }
        (_, Some(_), Some(features)) => {
            let _ = writeln!(out, "BPM: {}", features.display_bpm());
            let _ = writeln!(out, "Key: {}", features.key);
            out.push_str(&RadarChart::from_features(features).to_text(BAR_WIDTH));
        }
        _ => {
            let _ = writeln!(out, "Select a track to view its audio features");
        }
    }

    out
}
