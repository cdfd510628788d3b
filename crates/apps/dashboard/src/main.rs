use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use catalog::CityCatalog;
use clap::Parser;
use dashboard::{DashboardConfig, DashboardContext, SessionHandle};
use feeds::HttpEventSource;
use layers::Tooltip;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless idling-vehicle dashboard")]
struct Args {
    /// City code to select after the initial load (e.g. BOS)
    #[arg(long)]
    city: Option<String>,

    /// API origin; overrides GEOJSON_DATA
    #[arg(long)]
    api: Option<String>,

    /// Seconds to run before unmounting
    #[arg(long, default_value_t = 10)]
    seconds: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = DashboardConfig::from_env().context("reading dashboard config")?;
    if let Some(api) = args.api {
        config.api_base = api;
    }
    info!("idle API at {}", config.api_base);

    let source = Arc::new(HttpEventSource::new(config.api_base.clone()));
    let handle = SessionHandle::spawn(DashboardContext::new(config), source);

    if let Some(code) = args.city.as_deref() {
        handle
            .bridge()
            .select_code(&CityCatalog::live(), code)
            .with_context(|| format!("selecting {code}"))?;
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    for _ in 0..=args.seconds {
        ticker.tick().await;
        let Some(frame) = handle.frame().await else {
            break;
        };
        info!(
            "{} | {:?} at {} | {} visible | bearing {:.1} zoom {:.1}",
            frame.selected.as_deref().unwrap_or("-"),
            frame.playback,
            frame
                .current
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string()),
            frame.layer.len(),
            frame.viewport.normalized_bearing(),
            frame.viewport.zoom,
        );
    }

    let dashboard = handle.unmount().await.context("dashboard session panicked")?;
    if let Some(event) = dashboard.timeline().visible().last() {
        for line in Tooltip::for_event(event).lines() {
            info!("{line}");
        }
    }
    for event in dashboard.bus().events() {
        info!("event {}: {} {}", event.index, event.kind, event.message);
    }
    Ok(())
}
