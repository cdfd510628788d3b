use chrono::DateTime;
use feeds::IdleEvent;

/// Hover text for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub agency: String,
    pub vehicle: String,
    pub duration: String,
    pub datetime: String,
}

impl Tooltip {
    pub fn for_event(event: &IdleEvent) -> Self {
        Self {
            agency: event.agency().unwrap_or("unknown").to_string(),
            vehicle: event.vehicle_id().unwrap_or("unknown").to_string(),
            duration: format_duration(event.duration_s()),
            datetime: format_utc(event.timestamp.0),
        }
    }

    pub fn lines(&self) -> [String; 4] {
        [
            format!("Agency: {}", self.agency),
            format!("Vehicle: {}", self.vehicle),
            format!("Duration: {}", self.duration),
            format!("Datetime: {}", self.datetime),
        ]
    }
}

/// `"M Minutes S Seconds"`, truncating fractional seconds.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() {
        seconds.max(0.0) as u64
    } else {
        0
    };
    format!("{} Minutes {} Seconds", total / 60, total % 60)
}

fn format_utc(epoch_ms: i64) -> String {
    match DateTime::from_timestamp_millis(epoch_ms) {
        Some(dt) => format!("{} (UTC)", dt.format("%Y-%m-%d %H:%M:%S")),
        None => "invalid time (UTC)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{format_duration, Tooltip};
    use feeds::{IdleEvent, IdleProperties};
    use foundation::geo::LonLat;
    use foundation::time::EpochMillis;
    use pretty_assertions::assert_eq;

    #[test]
    fn duration_splits_minutes_and_seconds() {
        assert_eq!(format_duration(125.0), "2 Minutes 5 Seconds");
        assert_eq!(format_duration(59.9), "0 Minutes 59 Seconds");
        assert_eq!(format_duration(-3.0), "0 Minutes 0 Seconds");
    }

    #[test]
    fn tooltip_lines() {
        let event = IdleEvent {
            position: LonLat::new(-73.98, 40.74),
            timestamp: EpochMillis(1_709_294_400_000),
            properties: IdleProperties {
                duration: 61.0,
                agency: Some("MTA".to_string()),
                vehicle_id: Some("7421".to_string()),
                ..IdleProperties::default()
            },
        };
        let tip = Tooltip::for_event(&event);
        assert_eq!(
            tip.lines(),
            [
                "Agency: MTA".to_string(),
                "Vehicle: 7421".to_string(),
                "Duration: 1 Minutes 1 Seconds".to_string(),
                "Datetime: 2024-03-01 12:00:00 (UTC)".to_string(),
            ]
        );
    }
}
