//! Static catalog of cities with live idling data.

use foundation::geo::LonLat;

/// Agency code queried when the dashboard first mounts.
pub const DEFAULT_CITY_CODE: &str = "NYC";

#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub name: &'static str,
    /// Short agency code sent as `iata_id`.
    pub code: &'static str,
    pub coordinates: LonLat,
}

const fn city(name: &'static str, code: &'static str, lon: f64, lat: f64) -> City {
    City {
        name,
        code,
        coordinates: LonLat::new(lon, lat),
    }
}

static LIVE: [City; 50] = [
    city("New York", "NYC", -74.0060, 40.7128),
    city("Philadelphia", "PHL", -75.1652, 39.9526),
    city("Washington D.C.", "DCA", -77.0369, 38.9072),
    city("Boston", "BOS", -71.0589, 42.3601),
    city("Pittsburgh", "PIT", -79.9959, 40.4406),
    city("Los Angeles", "LAX", -118.2437, 34.0522),
    city("San Francisco", "SFO", -122.41669, 37.7853),
    city("Seattle", "SEA", -122.3321, 47.6062),
    city("Sacramento", "SMF", -121.4944, 38.5816),
    city("Portland", "PDX", -122.6784, 45.5152),
    city("Atlanta", "ATL", -84.3880, 33.7490),
    city("Miami", "MIA", -80.1918, 25.7617),
    city("Tampa", "TPA", -82.4572, 27.9506),
    city("Louisville", "SDF", -85.7585, 38.2527),
    city("Nashville", "BNA", -86.7816, 36.1627),
    city("Minneapolis", "MSP", -93.2650, 44.9778),
    city("St. Louis", "STL", -90.1994, 38.6270),
    city("Madison", "MSN", -89.4012, 43.0731),
    city("Columbus", "CMH", -82.9988, 39.9612),
    city("Des Moines", "DSM", -93.6250, 41.5868),
    city("Denver", "DEN", -104.9903, 39.7392),
    city("Phoenix", "PHX", -112.0740, 33.4484),
    city("San Antonio", "SAT", -98.4936, 29.4241),
    city("Billings", "BIL", -108.5007, 45.7833),
    city("Austin", "AUS", -97.7431, 30.2672),
    city("Montreal", "YUL", -73.5673, 45.5017),
    city("York", "YYZ", -79.3832, 43.6532),
    city("Hamilton", "YHM", -79.8711, 43.2557),
    city("Halifax", "YHZ", -63.5752, 44.6488),
    city("Thunder Bay", "YQT", -89.2477, 48.3809),
    city("Vancouver", "YVR", -123.1216, 49.2827),
    city("Calgary", "YYC", -114.0719, 51.0447),
    city("Edmonton", "YEG", -113.4909, 53.5461),
    city("Saskatoon", "YXE", -106.6700, 52.1579),
    city("Victoria", "YYJ", -123.3656, 48.4284),
    city("Amsterdam", "AMS", 4.8952, 52.3676),
    city("Stockholm", "ARN", 18.0686, 59.3293),
    city("Helsinki", "HEL", 24.9384, 60.1699),
    city("Dublin", "DUB", -6.2603, 53.3498),
    city("Rome", "FCO", 12.4964, 41.9028),
    city("Warsaw", "WAW", 21.0122, 52.2297),
    city("Kraków", "KRK", 19.9350, 50.0647),
    city("Gdańsk", "GDN", 18.6466, 54.3520),
    city("Prague", "PRG", 14.4378, 50.0755),
    city("Sydney", "SYD", 151.2093, -33.8688),
    city("Brisbane", "BNE", 153.0251, -27.4698),
    city("Adelaide", "ADL", 138.6007, -34.9285),
    city("Auckland", "AKL", 174.7633, -36.8485),
    city("Christchurch", "CHC", 172.6362, -43.5321),
    city("Delhi", "DEL", 77.1025, 28.7041),
];

/// Read-only list of selectable cities, in sidebar order.
#[derive(Debug, Clone, Copy)]
pub struct CityCatalog {
    cities: &'static [City],
}

impl CityCatalog {
    pub fn live() -> Self {
        Self { cities: &LIVE }
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static City> {
        self.cities.iter()
    }

    /// Looks up a city by agency code, ignoring ASCII case.
    pub fn find(&self, code: &str) -> Option<&'static City> {
        let code = code.trim();
        self.cities.iter().find(|c| c.code.eq_ignore_ascii_case(code))
    }
}

impl Default for CityCatalog {
    fn default() -> Self {
        Self::live()
    }
}
