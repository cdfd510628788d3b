use feeds::IdleEvent;
use foundation::geo::LonLat;
use timeline::TimelineController;

use crate::symbology::duration_color;

/// One drawable idling point.
#[derive(Debug, Clone, PartialEq)]
pub struct EventPoint {
    pub position: LonLat,
    /// Column height; the idling duration in seconds.
    pub elevation: f64,
    pub color: [u8; 3],
    pub height: Option<f64>,
}

impl EventPoint {
    pub fn new(event: &IdleEvent, max_duration: f64) -> Self {
        Self {
            position: event.position,
            elevation: event.duration_s(),
            color: duration_color(event.duration_s(), max_duration),
            height: event.height(),
        }
    }
}

/// Points visible at the playhead, in feed order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EventLayerSnapshot {
    pub points: Vec<EventPoint>,
    /// Longest duration across the whole dataset; the color ramp's scale.
    pub max_duration: f64,
}

impl EventLayerSnapshot {
    /// Colors are scaled against the full dataset so a point keeps its color
    /// as the playhead moves.
    pub fn extract(timeline: &TimelineController) -> Self {
        let max_duration = timeline.max_duration();
        Self {
            points: timeline
                .visible()
                .into_iter()
                .map(|e| EventPoint::new(e, max_duration))
                .collect(),
            max_duration,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::EventLayerSnapshot;
    use feeds::{IdleEvent, IdleProperties};
    use foundation::geo::LonLat;
    use foundation::time::EpochMillis;
    use timeline::TimelineController;

    fn event(ms: i64, duration: f64) -> IdleEvent {
        IdleEvent {
            position: LonLat::new(0.0, 0.0),
            timestamp: EpochMillis(ms),
            properties: IdleProperties {
                duration,
                ..IdleProperties::default()
            },
        }
    }

    #[test]
    fn extracts_visible_points_scaled_to_full_dataset() {
        let mut tl = TimelineController::new();
        tl.load(vec![event(0, 100.0), event(5_000, 400.0)]);

        let snap = EventLayerSnapshot::extract(&tl);
        assert_eq!(snap.len(), 1);
        assert_eq!(snap.max_duration, 400.0);
        assert_eq!(snap.points[0].elevation, 100.0);
        assert_eq!(snap.points[0].color, [255, 128, 0]);
    }

    #[test]
    fn idle_timeline_has_no_points() {
        assert!(EventLayerSnapshot::extract(&TimelineController::new()).is_empty());
    }
}
