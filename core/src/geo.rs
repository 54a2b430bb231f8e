use serde::Deserialize;

/// Mean Earth radius of the haversine distance, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
/// Default radius around a reference point considered "at location", in meters.
pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 250.0;
/// Distances strictly above this are rendered in kilometers.
const KILOMETER_SWITCH_METERS: f64 = 999.0;
const MAP_BASE_URL: &str = "https://maps.google.com/?q=";

pub const NO_VALID_POSITION: &str = "🚨 no valid GPS position";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Coarse sanity check applied to every fix reported by the tracker.
    ///
    /// A fix is rejected when `latitude * longitude <= 0`: a zero coordinate
    /// (no GPS lock) is rejected, but so is every fix whose coordinates have
    /// opposite signs (north-west and south-east quadrants).
    pub fn passes_sanity_check(&self) -> bool {
        self.latitude * self.longitude > 0.0
    }

    /// Map link embedding the coordinates exactly as parsed.
    pub fn map_link(&self) -> String {
        format!("{MAP_BASE_URL}{},{}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReferencePoint {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    pub label: String,
}

impl ReferencePoint {
    pub fn new(latitude: f64, longitude: f64, label: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            label: label.into(),
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.latitude, self.longitude)
    }
}

/// Great-circle distance between two positions, in meters.
pub fn distance(from: Position, to: Position) -> f64 {
    haversine::distance(
        haversine::Location {
            latitude: from.latitude,
            longitude: from.longitude,
        },
        haversine::Location {
            latitude: to.latitude,
            longitude: to.longitude,
        },
        haversine::Units::Kilometers,
    ) * 1000.0
}

/// Closest reference point and its distance. On ties the first configured point wins.
pub fn nearest(position: Position, points: &[ReferencePoint]) -> Option<(&ReferencePoint, f64)> {
    let mut best: Option<(&ReferencePoint, f64)> = None;
    for point in points {
        let dist = distance(position, point.position());
        match best {
            Some((_, min)) if dist >= min => {}
            _ => best = Some((point, dist)),
        }
    }
    best
}

#[derive(Debug, Clone, PartialEq)]
pub enum Proximity {
    AtLocation { label: String },
    Away { label: String, distance: f64 },
}

impl Proximity {
    pub fn classify(position: Position, points: &[ReferencePoint], threshold: f64) -> Option<Self> {
        let (point, dist) = nearest(position, points)?;
        let label = point.label.clone();
        if dist > threshold {
            Some(Proximity::Away {
                label,
                distance: dist,
            })
        } else {
            Some(Proximity::AtLocation { label })
        }
    }

    /// Message lines for this classification: one when at a known place, two otherwise.
    pub fn lines(&self, position: Position) -> Vec<String> {
        let map_link = position.map_link();
        match self {
            Proximity::AtLocation { label } => {
                vec![format!("🌍 position: <a href=\"{map_link}\">{label}</a>")]
            }
            Proximity::Away { label, distance } => vec![
                format!(
                    "🌍 <a href=\"{map_link}\">location: {}, {}</a>",
                    position.latitude, position.longitude
                ),
                format!("🚨 {} distance to {label}", format_distance(*distance)),
            ],
        }
    }
}

pub fn format_distance(meters: f64) -> String {
    if meters > KILOMETER_SWITCH_METERS {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{meters:.0} m")
    }
}
