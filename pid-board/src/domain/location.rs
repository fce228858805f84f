//! Geographic positions.

/// A WGS84 coordinate pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Whether both components are finite and within WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// A position fix as reported by the caller's geolocation provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub coordinates: Coordinates,

    /// Horizontal accuracy radius in metres, when the provider reports one.
    pub horizontal_accuracy: Option<f64>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            coordinates: Coordinates::new(latitude, longitude),
            horizontal_accuracy: None,
        }
    }

    /// Attach an accuracy radius. Non-finite or negative values are ignored.
    pub fn with_accuracy(mut self, metres: f64) -> Self {
        self.horizontal_accuracy = (metres.is_finite() && metres >= 0.0).then_some(metres);
        self
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates.lat
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates.lon
    }
}
