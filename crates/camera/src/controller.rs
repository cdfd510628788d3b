//! Camera pose arbitration between autonomous rotation and user gestures.
//!
//! - The rotation tick turns the bearing by a small fixed step.
//! - A pan, zoom or drag gesture sets a sticky interaction flag that suspends
//!   rotation until the next city reset.
//! - Every externally driven pose change has its zoom clamped to the band;
//!   the rotation tick never touches zoom.

use std::time::Duration;

use foundation::geo::LonLat;

use crate::viewport::{Viewport, ZoomBand};

/// Bearing added per rotation tick (degrees).
pub const ROTATION_STEP_DEG: f64 = 0.1;

/// Wall-clock interval between rotation ticks.
pub const ROTATION_TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Interaction state reported alongside a renderer-driven pose change.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Gesture {
    pub panning: bool,
    pub zooming: bool,
    pub dragging: bool,
    /// Modifier-drag rotation. Does not count as taking manual control.
    pub rotating: bool,
}

impl Gesture {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn pan() -> Self {
        Self {
            panning: true,
            ..Self::default()
        }
    }

    pub fn zoom() -> Self {
        Self {
            zooming: true,
            ..Self::default()
        }
    }

    pub fn drag() -> Self {
        Self {
            dragging: true,
            ..Self::default()
        }
    }

    /// Whether this gesture takes the camera away from autonomous rotation.
    pub fn is_manual(&self) -> bool {
        self.panning || self.zooming || self.dragging
    }
}

#[derive(Debug, Clone)]
pub struct ViewportController {
    /// Current camera pose.
    viewport: Viewport,

    /// Allowed zoom range for external changes.
    band: ZoomBand,

    /// Sticky; set by manual gestures, cleared only by `reset_to`.
    interacted: bool,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            band: ZoomBand::default(),
            interacted: false,
        }
    }
}

impl ViewportController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the zoom band. The pose moves to the new baseline zoom.
    pub fn with_band(mut self, band: ZoomBand) -> Self {
        self.band = band;
        self.viewport.zoom = band.baseline;
        self
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn band(&self) -> ZoomBand {
        self.band
    }

    /// True once the user panned, zoomed or dragged since the last reset.
    pub fn interacted(&self) -> bool {
        self.interacted
    }

    pub fn auto_rotating(&self) -> bool {
        !self.interacted
    }

    /// Autonomous rotation step. Returns `true` if the bearing changed.
    pub fn rotate_tick(&mut self) -> bool {
        if self.interacted {
            return false;
        }
        self.viewport.bearing += ROTATION_STEP_DEG;
        true
    }

    /// Accepts a pose requested by the renderer (user gesture or controller
    /// animation). Zoom is clamped to the band; manual gestures set the
    /// interaction flag. Returns the pose actually stored.
    pub fn apply_view_change(&mut self, requested: Viewport, gesture: Gesture) -> Viewport {
        self.viewport = Viewport {
            zoom: self.band.clamp(requested.zoom),
            ..requested
        };
        if gesture.is_manual() {
            self.interacted = true;
        }
        self.viewport
    }

    /// Compound reset for a city selection: baseline pose at `center` and
    /// autonomous rotation resumes.
    pub fn reset_to(&mut self, center: LonLat) {
        self.viewport = Viewport {
            zoom: self.band.baseline,
            ..Viewport::centered_on(center)
        };
        self.interacted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::{BASELINE_BEARING, BASELINE_PITCH, BASELINE_ZOOM};

    #[test]
    fn rotation_advances_bearing_only() {
        let mut ctrl = ViewportController::new();
        let before = ctrl.viewport();
        assert!(ctrl.rotate_tick());
        let after = ctrl.viewport();
        assert!((after.bearing - before.bearing - ROTATION_STEP_DEG).abs() < 1e-12);
        assert_eq!(after.zoom, before.zoom);
        assert_eq!(after.center(), before.center());
    }

    #[test]
    fn drag_suspends_rotation_until_reset() {
        let mut ctrl = ViewportController::new();
        let pose = ctrl.viewport();
        ctrl.apply_view_change(pose, Gesture::drag());
        assert!(ctrl.interacted());

        let bearing = ctrl.viewport().bearing;
        for _ in 0..10 {
            assert!(!ctrl.rotate_tick());
        }
        assert_eq!(ctrl.viewport().bearing, bearing);

        ctrl.reset_to(LonLat::new(-71.0589, 42.3601));
        assert!(!ctrl.interacted());
        assert!(ctrl.rotate_tick());
    }

    #[test]
    fn non_manual_change_keeps_rotation() {
        let mut ctrl = ViewportController::new();
        let pose = ctrl.viewport();
        ctrl.apply_view_change(pose, Gesture::none());
        ctrl.apply_view_change(
            pose,
            Gesture {
                rotating: true,
                ..Gesture::none()
            },
        );
        assert!(!ctrl.interacted());
    }

    #[test]
    fn zoom_five_above_baseline_clamps_to_band_edge() {
        let mut ctrl = ViewportController::new();
        let requested = Viewport {
            zoom: BASELINE_ZOOM + 5.0,
            ..ctrl.viewport()
        };
        let stored = ctrl.apply_view_change(requested, Gesture::zoom());
        assert_eq!(stored.zoom, BASELINE_ZOOM + 2.0);
        assert_eq!(ctrl.viewport().zoom, BASELINE_ZOOM + 2.0);
    }

    #[test]
    fn custom_band_sets_baseline_zoom_and_limits() {
        let mut ctrl = ViewportController::new().with_band(ZoomBand::new(10.0, 1.0));
        assert_eq!(ctrl.viewport().zoom, 10.0);

        let requested = Viewport {
            zoom: 4.0,
            ..ctrl.viewport()
        };
        assert_eq!(ctrl.apply_view_change(requested, Gesture::zoom()).zoom, 9.0);

        ctrl.reset_to(LonLat::new(-71.0589, 42.3601));
        assert_eq!(ctrl.viewport().zoom, 10.0);
    }

    #[test]
    fn pan_moves_center_and_sets_flag() {
        let mut ctrl = ViewportController::new();
        let requested = Viewport {
            longitude: -74.1,
            latitude: 40.6,
            ..ctrl.viewport()
        };
        let stored = ctrl.apply_view_change(requested, Gesture::pan());
        assert_eq!(stored.center(), LonLat::new(-74.1, 40.6));
        assert!(ctrl.interacted());
    }

    #[test]
    fn reset_restores_baseline_pose() {
        let mut ctrl = ViewportController::new();
        let wild = Viewport {
            longitude: 10.0,
            latitude: 10.0,
            zoom: 13.5,
            bearing: 400.0,
            pitch: 10.0,
        };
        ctrl.apply_view_change(wild, Gesture::drag());
        let sydney = LonLat::new(151.2093, -33.8688);
        ctrl.reset_to(sydney);

        let v = ctrl.viewport();
        assert_eq!(v.center(), sydney);
        assert_eq!(v.zoom, BASELINE_ZOOM);
        assert_eq!(v.bearing, BASELINE_BEARING);
        assert_eq!(v.pitch, BASELINE_PITCH);
    }
}
