//! Wire types for the idle-event feature collection and the client-side
//! [`IdleEvent`] record derived from each feature.

use chrono::{DateTime, NaiveDateTime};
use foundation::geo::LonLat;
use foundation::time::EpochMillis;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::FeedError;

#[derive(Debug, Clone, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
struct Feature {
    geometry: Geometry,
    properties: IdleProperties,
}

#[derive(Debug, Clone, Deserialize)]
struct Geometry {
    coordinates: Vec<f64>,
}

/// Properties bag of one idling feature, as sent by the API.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct IdleProperties {
    /// Idling duration in seconds.
    #[serde(default)]
    pub duration: f64,
    /// Source datetime; see [`parse_datetime`] for the accepted shapes.
    #[serde(default)]
    pub datetime: Value,
    #[serde(default, deserialize_with = "opaque_string")]
    pub agency: Option<String>,
    #[serde(default, deserialize_with = "opaque_string")]
    pub vehicle_id: Option<String>,
    #[serde(default, deserialize_with = "opaque_string")]
    pub route_id: Option<String>,
    #[serde(default, deserialize_with = "opaque_string")]
    pub trip_id: Option<String>,
    #[serde(default, deserialize_with = "opaque_string")]
    pub iata_id: Option<String>,
    #[serde(default, deserialize_with = "opaque_string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "opaque_string")]
    pub country: Option<String>,
    #[serde(default)]
    pub height: Option<f64>,
    /// Keys this client does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Identifiers arrive as strings or numbers depending on the agency.
fn opaque_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// One idling occurrence. Immutable once fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct IdleEvent {
    pub position: LonLat,
    /// Epoch milliseconds derived from `properties.datetime`.
    pub timestamp: EpochMillis,
    pub properties: IdleProperties,
}

impl IdleEvent {
    pub fn duration_s(&self) -> f64 {
        self.properties.duration
    }

    pub fn agency(&self) -> Option<&str> {
        self.properties.agency.as_deref()
    }

    pub fn vehicle_id(&self) -> Option<&str> {
        self.properties.vehicle_id.as_deref()
    }

    pub fn route_id(&self) -> Option<&str> {
        self.properties.route_id.as_deref()
    }

    pub fn height(&self) -> Option<f64> {
        self.properties.height
    }
}

/// Decodes a feature-collection body into events, in feed order.
///
/// A body without a `features` array, a feature without a `[lon, lat]` pair,
/// or a feature whose datetime cannot be read is rejected as malformed.
pub fn parse_collection(body: &[u8]) -> Result<Vec<IdleEvent>, FeedError> {
    let collection: FeatureCollection =
        serde_json::from_slice(body).map_err(|e| FeedError::malformed(e.to_string()))?;

    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(i, feature)| {
            let position = match feature.geometry.coordinates.as_slice() {
                [lon, lat, ..] => LonLat::new(*lon, *lat),
                _ => {
                    return Err(FeedError::malformed(format!(
                        "feature {i}: expected [lon, lat] coordinates"
                    )));
                }
            };
            let timestamp = parse_datetime(&feature.properties.datetime).ok_or_else(|| {
                FeedError::malformed(format!(
                    "feature {i}: unreadable datetime {}",
                    feature.properties.datetime
                ))
            })?;
            Ok(IdleEvent {
                position,
                timestamp,
                properties: feature.properties,
            })
        })
        .collect()
}

/// Normalizes a source datetime to epoch milliseconds.
///
/// Accepted shapes:
/// - RFC 3339 strings (`2024-03-01T12:00:00Z`)
/// - RFC 2822 / HTTP dates (`Fri, 01 Mar 2024 12:00:00 GMT`)
/// - naive `YYYY-MM-DD HH:MM:SS[.fff]` strings, read as UTC
/// - JSON numbers or numeric strings, read as epoch seconds
pub fn parse_datetime(raw: &Value) -> Option<EpochMillis> {
    match raw {
        Value::Number(n) => n.as_f64().and_then(seconds_to_millis),
        Value::String(s) => parse_datetime_str(s),
        _ => None,
    }
}

fn parse_datetime_str(raw: &str) -> Option<EpochMillis> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(EpochMillis(dt.timestamp_millis()));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(EpochMillis(dt.timestamp_millis()));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(EpochMillis(naive.and_utc().timestamp_millis()));
        }
    }
    s.parse::<f64>().ok().and_then(seconds_to_millis)
}

fn seconds_to_millis(secs: f64) -> Option<EpochMillis> {
    secs.is_finite()
        .then(|| EpochMillis((secs * 1000.0).round() as i64))
}

#[cfg(test)]
mod tests {
    use super::{parse_collection, parse_datetime};
    use crate::error::FeedError;
    use foundation::time::EpochMillis;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn feature(datetime: serde_json::Value) -> serde_json::Value {
        json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [-73.98, 40.74] },
            "properties": {
                "duration": 125,
                "datetime": datetime,
                "agency": "MTA New York City Transit",
                "vehicle_id": 7421,
                "route_id": "M15",
                "trip_id": null,
                "continent": "North America"
            }
        })
    }

    #[test]
    fn derives_timestamps_and_keeps_properties() {
        let body = json!({
            "type": "FeatureCollection",
            "features": [feature(json!("2024-03-01T12:00:00Z"))]
        });
        let events = parse_collection(body.to_string().as_bytes()).unwrap();
        assert_eq!(events.len(), 1);
        let e = &events[0];
        assert_eq!(e.timestamp, EpochMillis(1_709_294_400_000));
        assert_eq!(e.position.lon, -73.98);
        assert_eq!(e.duration_s(), 125.0);
        assert_eq!(e.vehicle_id(), Some("7421"));
        assert_eq!(e.route_id(), Some("M15"));
        assert_eq!(e.properties.trip_id, None);
        assert_eq!(e.properties.extra.get("continent"), Some(&json!("North America")));
    }

    #[test]
    fn empty_collection_is_not_an_error() {
        let events = parse_collection(br#"{"features": []}"#).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn missing_features_is_malformed() {
        let err = parse_collection(br#"{"message": "No data found."}"#).unwrap_err();
        assert!(matches!(err, FeedError::Malformed(_)));
    }

    #[test]
    fn non_json_is_malformed() {
        let err = parse_collection(b"<html>502</html>").unwrap_err();
        assert!(matches!(err, FeedError::Malformed(_)));
    }

    #[test]
    fn short_coordinates_are_malformed() {
        let mut f = feature(json!("2024-03-01T12:00:00Z"));
        f["geometry"]["coordinates"] = json!([1.0]);
        let body = json!({ "features": [f] }).to_string();
        assert!(matches!(
            parse_collection(body.as_bytes()),
            Err(FeedError::Malformed(_))
        ));
    }

    #[test]
    fn unreadable_datetime_is_malformed() {
        let body = json!({ "features": [feature(json!("yesterday"))] }).to_string();
        assert!(matches!(
            parse_collection(body.as_bytes()),
            Err(FeedError::Malformed(_))
        ));
    }

    #[test]
    fn datetime_shapes_agree() {
        let expected = Some(EpochMillis(1_709_294_400_000));
        assert_eq!(parse_datetime(&json!("2024-03-01T12:00:00Z")), expected);
        assert_eq!(parse_datetime(&json!("2024-03-01T07:00:00-05:00")), expected);
        assert_eq!(parse_datetime(&json!("Fri, 01 Mar 2024 12:00:00 GMT")), expected);
        assert_eq!(parse_datetime(&json!("2024-03-01 12:00:00")), expected);
        assert_eq!(parse_datetime(&json!(1_709_294_400)), expected);
        assert_eq!(parse_datetime(&json!("1709294400")), expected);
        assert_eq!(
            parse_datetime(&json!("2024-03-01 12:00:00.250")),
            Some(EpochMillis(1_709_294_400_250))
        );
        assert_eq!(parse_datetime(&json!(null)), None);
    }
}
