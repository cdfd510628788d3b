//! Selection bridge between the city list and the page-level state.
//!
//! The bridge adds nothing of its own: whatever the list emits is forwarded
//! to the session unchanged, including repeats of the current city.

use catalog::{City, CityCatalog};
use foundation::geo::LonLat;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use crate::session::Command;

/// A city picked from the list: where to fly and which agency to query.
#[derive(Debug, Clone, PartialEq)]
pub struct CitySelection {
    pub coordinates: LonLat,
    pub code: String,
}

impl CitySelection {
    pub fn new(coordinates: LonLat, code: impl Into<String>) -> Self {
        Self {
            coordinates,
            code: code.into(),
        }
    }
}

impl From<&City> for CitySelection {
    fn from(city: &City) -> Self {
        Self::new(city.coordinates, city.code)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("unknown city code {0:?}")]
    UnknownCity(String),
    #[error("dashboard session has stopped")]
    SessionClosed,
}

#[derive(Debug, Clone)]
pub struct SelectionBridge {
    tx: UnboundedSender<Command>,
}

impl SelectionBridge {
    pub fn new(tx: UnboundedSender<Command>) -> Self {
        Self { tx }
    }

    pub fn select(&self, selection: CitySelection) -> Result<(), SelectionError> {
        self.tx
            .send(Command::SelectCity(selection))
            .map_err(|_| SelectionError::SessionClosed)
    }

    /// Looks `code` up in `catalog` and forwards the match.
    pub fn select_code(&self, catalog: &CityCatalog, code: &str) -> Result<(), SelectionError> {
        let city = catalog
            .find(code)
            .ok_or_else(|| SelectionError::UnknownCity(code.to_string()))?;
        self.select(CitySelection::from(city))
    }
}

#[cfg(test)]
mod tests {
    use super::{CitySelection, SelectionBridge, SelectionError};
    use crate::session::Command;
    use catalog::CityCatalog;
    use foundation::geo::LonLat;
    use tokio::sync::mpsc;

    #[test]
    fn forwards_selection_unchanged() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let bridge = SelectionBridge::new(tx);
        let pick = CitySelection::new(LonLat::new(-71.0589, 42.3601), "BOS");

        bridge.select(pick.clone()).unwrap();
        bridge.select(pick.clone()).unwrap();

        for _ in 0..2 {
            match rx.try_recv() {
                Ok(Command::SelectCity(got)) => assert_eq!(got, pick),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn resolves_codes_from_catalog() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let bridge = SelectionBridge::new(tx);
        let catalog = CityCatalog::live();

        bridge.select_code(&catalog, "sfo").unwrap();
        match rx.try_recv() {
            Ok(Command::SelectCity(got)) => assert_eq!(got.code, "SFO"),
            other => panic!("unexpected {other:?}"),
        }

        assert_eq!(
            bridge.select_code(&catalog, "XXX"),
            Err(SelectionError::UnknownCity("XXX".to_string()))
        );
    }

    #[test]
    fn reports_closed_session() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let bridge = SelectionBridge::new(tx);
        assert_eq!(
            bridge.select(CitySelection::new(LonLat::new(0.0, 0.0), "NYC")),
            Err(SelectionError::SessionClosed)
        );
    }
}
