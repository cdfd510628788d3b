use std::str::FromStr;

use crate::config::DashboardConfig;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Basemap style matching the theme.
    pub fn map_style(self) -> &'static str {
        match self {
            Theme::Light => "mapbox://styles/mapbox/light-v9",
            Theme::Dark => "mapbox://styles/mapbox/dark-v9",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme {other:?}")),
        }
    }
}

/// Everything a dashboard page needs from its surroundings.
///
/// Created at mount and passed down explicitly; dropped at unmount.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardContext {
    pub theme: Theme,
    pub config: DashboardConfig,
}

impl DashboardContext {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            theme: config.theme,
            config,
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggle();
        self.theme
    }
}

impl Default for DashboardContext {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}
