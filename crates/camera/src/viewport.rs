use foundation::geo::LonLat;

/// Baseline zoom level for city views.
pub const BASELINE_ZOOM: f64 = 12.0;

/// Default camera heading in degrees.
pub const BASELINE_BEARING: f64 = 60.0;

/// Default camera tilt in degrees.
pub const BASELINE_PITCH: f64 = 55.0;

/// Allowed deviation from [`BASELINE_ZOOM`] for user-driven zoom.
pub const ZOOM_BAND_HALF_WIDTH: f64 = 2.0;

/// Zoom level of the overview inset.
pub const MINIMAP_ZOOM: f64 = 1.0;

/// Center shown before any city has been chosen (Midtown Manhattan).
pub const OVERVIEW_CENTER: LonLat = LonLat::new(-73.9776, 40.7420);

/// Camera pose handed to the renderer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
    /// Heading in degrees. Unbounded; wraps conceptually every 360.
    pub bearing: f64,
    /// Tilt in degrees from straight down.
    pub pitch: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::centered_on(OVERVIEW_CENTER)
    }
}

impl Viewport {
    /// Baseline pose centered on `center`.
    pub fn centered_on(center: LonLat) -> Self {
        Self {
            longitude: center.lon,
            latitude: center.lat,
            zoom: BASELINE_ZOOM,
            bearing: BASELINE_BEARING,
            pitch: BASELINE_PITCH,
        }
    }

    pub fn center(&self) -> LonLat {
        LonLat::new(self.longitude, self.latitude)
    }

    /// Bearing folded into `[0, 360)` for display.
    pub fn normalized_bearing(&self) -> f64 {
        self.bearing.rem_euclid(360.0)
    }

    /// North-up, flat overview of the same center for the inset map.
    pub fn minimap(&self) -> Self {
        Self {
            zoom: MINIMAP_ZOOM,
            bearing: 0.0,
            pitch: 0.0,
            ..*self
        }
    }
}

/// Closed zoom range `[baseline - half_width, baseline + half_width]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ZoomBand {
    pub baseline: f64,
    pub half_width: f64,
}

impl Default for ZoomBand {
    fn default() -> Self {
        Self {
            baseline: BASELINE_ZOOM,
            half_width: ZOOM_BAND_HALF_WIDTH,
        }
    }
}

impl ZoomBand {
    pub fn new(baseline: f64, half_width: f64) -> Self {
        Self {
            baseline,
            half_width: half_width.abs(),
        }
    }

    pub fn min(&self) -> f64 {
        self.baseline - self.half_width
    }

    pub fn max(&self) -> f64 {
        self.baseline + self.half_width
    }

    /// Clamps `zoom` into the band. Non-finite input falls back to the baseline.
    pub fn clamp(&self, zoom: f64) -> f64 {
        if !zoom.is_finite() {
            return self.baseline;
        }
        zoom.clamp(self.min(), self.max())
    }
}
