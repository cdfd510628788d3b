use foundation::time::EpochMillis;
use reqwest::Url;

use crate::error::FeedError;

/// Path of the idle-event endpoint relative to the API origin.
pub const IDLE_PATH: &str = "idle";

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Parameters of one `GET /idle` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdleQuery {
    /// Agency code sent as `iata_id`.
    pub agency: String,
    /// Lower bound in epoch seconds, sent as `start_datetime`.
    pub start_datetime: Option<i64>,
}

impl IdleQuery {
    /// Query without a time bound.
    pub fn for_agency(agency: impl Into<String>) -> Self {
        Self {
            agency: agency.into(),
            start_datetime: None,
        }
    }

    /// Query for the 24 hours preceding `now`, rounded down to the second.
    pub fn last_24h(agency: impl Into<String>, now: EpochMillis) -> Self {
        Self {
            agency: agency.into(),
            start_datetime: Some((now - DAY_MS).as_secs()),
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("iata_id", self.agency.clone())];
        if let Some(start) = self.start_datetime {
            params.push(("start_datetime", start.to_string()));
        }
        params
    }

    /// Full request URL under `base` (an origin, optionally with a path prefix).
    pub fn url(&self, base: &str) -> Result<Url, FeedError> {
        let endpoint = format!("{}/{IDLE_PATH}", base.trim_end_matches('/'));
        Url::parse_with_params(&endpoint, self.params())
            .map_err(|e| FeedError::InvalidUrl(format!("{endpoint}: {e}")))
    }
}

impl std::fmt::Display for IdleQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.start_datetime {
            Some(start) => write!(f, "{} since {start}", self.agency),
            None => write!(f, "{}", self.agency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::IdleQuery;
    use foundation::time::EpochMillis;

    #[test]
    fn url_without_lower_bound() {
        let url = IdleQuery::for_agency("NYC").url("http://api.local/").unwrap();
        assert_eq!(url.as_str(), "http://api.local/idle?iata_id=NYC");
    }

    #[test]
    fn last_24h_rounds_down_to_seconds() {
        let now = EpochMillis(1_700_000_123_999);
        let q = IdleQuery::last_24h("BOS", now);
        assert_eq!(q.start_datetime, Some(1_700_000_123 - 86_400));
        let url = q.url("http://api.local").unwrap();
        assert_eq!(
            url.as_str(),
            "http://api.local/idle?iata_id=BOS&start_datetime=1699913723"
        );
    }

    #[test]
    fn agency_is_percent_encoded() {
        let url = IdleQuery::for_agency("A&B").url("http://api.local").unwrap();
        assert_eq!(url.query(), Some("iata_id=A%26B"));
    }

    #[test]
    fn relative_base_is_rejected() {
        assert!(IdleQuery::for_agency("NYC").url("/proxy").is_err());
    }
}
