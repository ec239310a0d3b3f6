//! Spherical web mercator in normalized world coordinates.
//!
//! `x` grows eastwards and `y` southwards, both in `[0, 1]` across the whole
//! world, which is what slippy-map tile pyramids use.

use std::f64::consts::PI;

/// Latitude limit of the square web mercator world (degrees).
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

/// Edge length of one map tile in pixels.
pub const TILE_SIZE_PX: f64 = 256.0;

pub fn lng_to_x(lng_deg: f64) -> f64 {
    (lng_deg + 180.0) / 360.0
}

pub fn lat_to_y(lat_deg: f64) -> f64 {
    let lat = lat_deg.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0
}

pub fn x_to_lng(x: f64) -> f64 {
    x * 360.0 - 180.0
}

pub fn y_to_lat(y: f64) -> f64 {
    let n = PI * (1.0 - 2.0 * y);
    n.sinh().atan().to_degrees()
}

/// World width in pixels at `zoom`.
pub fn world_size_px(zoom: u8) -> f64 {
    TILE_SIZE_PX * (1u64 << zoom) as f64
}

#[cfg(test)]
mod tests {
    use super::{MAX_MERCATOR_LAT, lat_to_y, lng_to_x, world_size_px, x_to_lng, y_to_lat};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn equator_and_prime_meridian_are_centered() {
        assert_close(lng_to_x(0.0), 0.5, 1e-12);
        assert_close(lat_to_y(0.0), 0.5, 1e-12);
    }

    #[test]
    fn mercator_limit_maps_to_world_edge() {
        assert_close(lat_to_y(MAX_MERCATOR_LAT), 0.0, 1e-9);
        assert_close(lat_to_y(-MAX_MERCATOR_LAT), 1.0, 1e-9);
        assert_close(lat_to_y(89.9), 0.0, 1e-9);
    }

    #[test]
    fn inverse_recovers_degrees() {
        assert_close(y_to_lat(lat_to_y(48.72)), 48.72, 1e-9);
        assert_close(x_to_lng(lng_to_x(9.152)), 9.152, 1e-9);
    }

    #[test]
    fn world_size_doubles_per_zoom() {
        assert_eq!(world_size_px(0), 256.0);
        assert_eq!(world_size_px(3), 2048.0);
    }
}
