use lumen_shared::{LOD_BANDS, LOD_FAR_INTERVAL};

/// How many ticks apart UPDATEs go to an observer at `distance` from an
/// instance with the given visible range. Never decreases as distance grows.
pub fn lod_interval(distance: f32, visible_range: f32) -> u32 {
    let ratio = if visible_range > 0.0 {
        distance / visible_range
    } else {
        0.0
    };

    for (bound, interval) in LOD_BANDS {
        if ratio < bound {
            return interval;
        }
    }
    LOD_FAR_INTERVAL
}
