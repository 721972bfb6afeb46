// Reference Distance Kernel

/*
 * HAVERSINE BENCH - REFERENCE HAVERSINE FORMULA
 * =================================================================
 * Component Name: engine/src/geo/haversine.rs
 * Core Responsibility: حساب مسافة الدائرة العظمى بين نقطتين (Correctness Pillar).
 * Design Pattern: Pure Function
 * Forensic Impact: المولد والماسح يستدعيان نفس الدالة حرفياً. أي اختلاف في الترتيب
 *                  الحسابي يكسر المقارنة بين القيمة المتوقعة والقيمة المرصودة.
 * =================================================================
 */

use crate::models::point::PointPair;

/// نصف قطر الأرض المعتاد (كيلومتر)
pub const EARTH_RADIUS: f64 = 6372.8;

#[inline(always)]
fn square(a: f64) -> f64 {
    a * a
}

#[inline(always)]
fn radians_from_degrees(degrees: f64) -> f64 {
    0.01745329251994329577 * degrees
}

/// مسافة هافرساين المرجعية.
///
/// Textbook `asin` form. The generator and the scanner must both go through
/// this function so their means round identically.
pub fn reference_haversine(x0: f64, y0: f64, x1: f64, y1: f64, earth_radius: f64) -> f64 {
    let lat1 = y0;
    let lat2 = y1;
    let lon1 = x0;
    let lon2 = x1;

    let d_lat = radians_from_degrees(lat2 - lat1);
    let d_lon = radians_from_degrees(lon2 - lon1);
    let lat1 = radians_from_degrees(lat1);
    let lat2 = radians_from_degrees(lat2);

    let a = square((d_lat / 2.0).sin()) + lat1.cos() * lat2.cos() * square((d_lon / 2.0).sin());
    let c = 2.0 * a.sqrt().asin();

    earth_radius * c
}

/// نفس الحساب لكن على زوج نقاط جاهز
#[inline]
pub fn pair_distance(pair: &PointPair, earth_radius: f64) -> f64 {
    reference_haversine(pair.x0, pair.y0, pair.x1, pair.y1, earth_radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identical_points_are_zero() {
        assert_eq!(reference_haversine(12.5, -45.0, 12.5, -45.0, EARTH_RADIUS), 0.0);
    }

    #[test]
    fn test_quarter_meridian() {
        // من خط الاستواء إلى القطب = ربع محيط الدائرة
        let d = reference_haversine(0.0, 0.0, 0.0, 90.0, EARTH_RADIUS);
        let expected = EARTH_RADIUS * std::f64::consts::FRAC_PI_2;
        assert!((d - expected).abs() < 1e-9, "got {d}, expected {expected}");
    }

    #[test]
    fn test_antipodal_on_equator() {
        let d = reference_haversine(-90.0, 0.0, 90.0, 0.0, EARTH_RADIUS);
        let expected = EARTH_RADIUS * std::f64::consts::PI;
        assert!((d - expected).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_symmetric(
            x0 in -180.0f64..180.0, y0 in -180.0f64..180.0,
            x1 in -180.0f64..180.0, y1 in -180.0f64..180.0,
        ) {
            let forward = reference_haversine(x0, y0, x1, y1, EARTH_RADIUS);
            let backward = reference_haversine(x1, y1, x0, y0, EARTH_RADIUS);
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn prop_same_point_is_zero(x in -180.0f64..180.0, y in -180.0f64..180.0) {
            prop_assert_eq!(reference_haversine(x, y, x, y, EARTH_RADIUS), 0.0);
        }

        #[test]
        fn prop_bounded_by_half_circumference(
            x0 in -180.0f64..180.0, y0 in -90.0f64..90.0,
            x1 in -180.0f64..180.0, y1 in -90.0f64..90.0,
        ) {
            let d = reference_haversine(x0, y0, x1, y1, EARTH_RADIUS);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= EARTH_RADIUS * std::f64::consts::PI + 1e-9);
        }
    }
}
