use serde::{Deserialize, Serialize};

/// A WGS84 position in degrees.
///
/// Deserializes from either `{"lat": .., "lng": ..}` or a `[lat, lng]` pair;
/// host pages have written both shapes.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LatLngRepr")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite, with latitude in [-90, 90] and longitude in [-180, 180].
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self::new(lat, lng)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LatLngRepr {
    Object { lat: f64, lng: f64 },
    Pair([f64; 2]),
}

impl From<LatLngRepr> for LatLng {
    fn from(repr: LatLngRepr) -> Self {
        match repr {
            LatLngRepr::Object { lat, lng } => LatLng::new(lat, lng),
            LatLngRepr::Pair(pair) => pair.into(),
        }
    }
}

/// A single coordinate rendered as a marker.
///
/// Pins carry no id; their identity is their index in the sequence they were
/// supplied in.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pin {
    pub position: LatLng,
}

impl Pin {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self {
            position: LatLng::new(lat, lng),
        }
    }

    pub fn lat(&self) -> f64 {
        self.position.lat
    }

    pub fn lng(&self) -> f64 {
        self.position.lng
    }
}

impl From<LatLng> for Pin {
    fn from(position: LatLng) -> Self {
        Self { position }
    }
}

#[cfg(test)]
mod tests {
    use super::{LatLng, Pin};

    #[test]
    fn deserializes_object_form() {
        let p: LatLng = serde_json::from_str(r#"{"lat":52.5,"lng":13.4}"#).unwrap();
        assert_eq!(p, LatLng::new(52.5, 13.4));
    }

    #[test]
    fn deserializes_pair_form() {
        let p: LatLng = serde_json::from_str("[48.72, 9.152]").unwrap();
        assert_eq!(p, LatLng::new(48.72, 9.152));
    }

    #[test]
    fn serializes_as_object() {
        let json = serde_json::to_string(&LatLng::new(1.0, 2.0)).unwrap();
        assert_eq!(json, r#"{"lat":1.0,"lng":2.0}"#);
    }

    #[test]
    fn pins_keep_sequence_order() {
        let pins: Vec<Pin> =
            serde_json::from_str(r#"[{"lat":1,"lng":2},{"lat":3,"lng":4}]"#).unwrap();
        assert_eq!(pins, vec![Pin::new(1.0, 2.0), Pin::new(3.0, 4.0)]);
    }

    #[test]
    fn rejects_missing_component() {
        assert!(serde_json::from_str::<LatLng>(r#"{"lat":1}"#).is_err());
    }

    #[test]
    fn validity_covers_range_and_finiteness() {
        assert!(LatLng::new(0.0, 0.0).is_valid());
        assert!(LatLng::new(-90.0, 180.0).is_valid());
        assert!(!LatLng::new(f64::NAN, 0.0).is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
        assert!(!LatLng::new(0.0, -180.5).is_valid());
    }
}
