use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use track_analyzer::analyzer::{view, AnalysisPhase, AnalyzerState, Message, ProxyClient, Runtime};
use track_analyzer::radar::RadarChart;

/// Interactive track analyzer. Talks to a running track-analyzer-server.
#[derive(Parser, Debug)]
struct CliArgs {
    /// Base URL of the proxy server.
    #[clap(long, env = "ANALYZER_PROXY_URL", default_value = "http://127.0.0.1:8081")]
    pub proxy_url: String,

    /// Write the radar chart of the selected track to this SVG file.
    #[clap(long)]
    pub svg_out: Option<PathBuf>,
}

fn print_help() {
    println!("Type a query to search, a result number to analyze it, or 'quit' to exit.");
}

async fn write_svg(path: &Path, state: &AnalyzerState) -> Result<()> {
    if let Some(features) = &state.features {
        let svg = RadarChart::from_features(features).to_svg(480);
        tokio::fs::write(path, svg)
            .await
            .with_context(|| format!("writing radar chart to {}", path.display()))?;
        println!("Radar chart written to {}", path.display());
    }
    Ok(())
}

/// Writes the chart if one is shown. Failures are logged and leave the session running.
async fn export_radar(path: &Path, state: &AnalyzerState) -> bool {
    match write_svg(path, state).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("{:#}", e);
            false
        }
    }
}

/// What a line typed at the prompt asks for.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Empty,
    Quit,
    Help,
    /// Zero-based index into the current results.
    Select(usize),
    Search(String),
}

/// A number picks a result only when it names one on screen; anything else is a query.
fn classify_input(line: &str, result_count: usize) -> Input {
    let input = line.trim();
    match input {
        "" => return Input::Empty,
        "quit" | "exit" => return Input::Quit,
        "help" => return Input::Help,
        _ => {}
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=result_count).contains(&n) => Input::Select(n - 1),
        _ => Input::Search(input.to_string()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();
    let api = Arc::new(ProxyClient::new(&args.proxy_url));
    let (mut runtime, mut results) = Runtime::new(api);
    let mut state = AnalyzerState::new();

    print_help();
    print!("{}", view::render(&state));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match classify_input(&line, state.results.len()) {
                    Input::Empty => continue,
                    Input::Quit => break,
                    Input::Help => {
                        print_help();
                        continue;
                    }
                    Input::Select(index) => runtime.dispatch(&mut state, Message::TrackSelected(index)),
                    Input::Search(query) => {
                        runtime.dispatch(&mut state, Message::QueryChanged(query));
                        runtime.dispatch(&mut state, Message::SearchPressed);
                    }
                }
            }
            Some(message) = results.recv() => {
                let features_arrived = matches!(message, Message::FeaturesLoaded { .. });
                runtime.dispatch(&mut state, message);
                if features_arrived && state.analysis == AnalysisPhase::FeaturesShown {
                    if let Some(path) = &args.svg_out {
                        export_radar(path, &state).await;
                    }
                }
            }
        }
        print!("{}", view::render(&state));
    }

    Ok(())
}
