use proptest::prelude::*;

use lumen_server::lod_interval;
use lumen_shared::{LOD_BANDS, LOD_FAR_INTERVAL};

proptest! {
    /// Farther observers are never updated more often than nearer ones
    #[test]
    fn prop_interval_never_decreases_with_distance(
        range in 0.5f32..500.0,
        a in 0.0f32..1.5,
        b in 0.0f32..1.5,
    ) {
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(lod_interval(near * range, range) <= lod_interval(far * range, range));
    }

    #[test]
    fn prop_interval_is_a_known_band(distance in 0.0f32..1000.0, range in 0.0f32..500.0) {
        let interval = lod_interval(distance, range);
        let known = LOD_BANDS.iter().any(|(_, band)| *band == interval) || interval == LOD_FAR_INTERVAL;
        prop_assert!(known);
    }
}
