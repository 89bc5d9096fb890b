//! Presentation layer: search, select, and chart a track's audio features.
//!
//! State changes go through [`update`], which returns a [`Command`] for the
//! [`Runtime`] to execute. Each command carries a generation number so that
//! a superseded request can never overwrite newer state.

mod client;
mod messages;
mod runtime;
mod state;
mod update;
pub mod view;

pub use client::{CatalogApi, ProxyClient};
pub use messages::{Command, Message};
pub use runtime::Runtime;
pub use state::{AnalysisPhase, AnalyzerState, SearchPhase};
pub use update::{update, ANALYSIS_FAILED_MESSAGE, SEARCH_FAILED_MESSAGE};
