use std::env;
use std::time::Duration;

use camera::{ZoomBand, ROTATION_TICK_INTERVAL};
use thiserror::Error;
use timeline::PLAYBACK_TICK_INTERVAL;

use crate::context::Theme;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8080";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Startup configuration, read once at mount.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Origin of the idle-event API (`GEOJSON_DATA`).
    pub api_base: String,
    pub theme: Theme,
    pub playback_interval: Duration,
    pub rotation_interval: Duration,
    /// Zoom range external view changes are clamped to; also the reset zoom.
    pub zoom_band: ZoomBand,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            theme: Theme::Dark,
            playback_interval: PLAYBACK_TICK_INTERVAL,
            rotation_interval: ROTATION_TICK_INTERVAL,
            zoom_band: ZoomBand::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (the environment in
    /// production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base = lookup("GEOJSON_DATA")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_base);

        let theme = match lookup("DASHBOARD_THEME") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "DASHBOARD_THEME",
                value: raw.clone(),
                reason: "expected light or dark",
            })?,
            None => defaults.theme,
        };

        let playback_interval = interval_ms(
            &lookup,
            "DASHBOARD_PLAYBACK_INTERVAL_MS",
            defaults.playback_interval,
        )?;
        let rotation_interval = interval_ms(
            &lookup,
            "DASHBOARD_ROTATION_INTERVAL_MS",
            defaults.rotation_interval,
        )?;

        let zoom_band = match lookup("DASHBOARD_ZOOM_BAND") {
            Some(raw) => parse_zoom_band(&raw).ok_or(ConfigError::Invalid {
                key: "DASHBOARD_ZOOM_BAND",
                value: raw,
                reason: "expected <baseline>:<half width>, e.g. 12:2",
            })?,
            None => defaults.zoom_band,
        };

        Ok(Self {
            api_base,
            theme,
            playback_interval,
            rotation_interval,
            zoom_band,
        })
    }
}

fn parse_zoom_band(raw: &str) -> Option<ZoomBand> {
    let (baseline, half_width) = raw.trim().split_once(':')?;
    let baseline: f64 = baseline.trim().parse().ok()?;
    let half_width: f64 = half_width.trim().parse().ok()?;
    (baseline.is_finite() && half_width.is_finite() && half_width >= 0.0)
        .then(|| ZoomBand::new(baseline, half_width))
}

fn interval_ms<F>(lookup: &F, key: &'static str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            key,
            value: raw,
            reason: "interval must be positive",
        }),
        Ok(ms) => Ok(Duration::from_millis(ms)),
        Err(_) => Err(ConfigError::Invalid {
            key,
            value: raw,
            reason: "expected milliseconds",
        }),
    }
}
