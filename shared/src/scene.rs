use crate::{ObserverKey, Position, RegionKey};

/// Spatial and presence queries the engine needs from the host simulation.
/// All methods are expected to be cheap and must never block.
pub trait Scene {
    /// Every observer currently known to the scene
    fn observers(&self) -> Vec<ObserverKey>;

    /// Whether the observer still has an open connection
    fn is_connected(&self, observer: &ObserverKey) -> bool;

    /// Whether the observer may perceive effects at all. Disconnected,
    /// spectating or dead observers are not eligible.
    fn eligible(&self, observer: &ObserverKey) -> bool;

    fn same_region(&self, observer: &ObserverKey, region: &RegionKey) -> bool;

    /// Distance from the observer to a point, `None` if the observer has no
    /// position
    fn distance(&self, observer: &ObserverKey, position: &Position) -> Option<f32>;

    /// Distance from a point to the closest eligible observer in the region
    fn nearest_observer_distance(&self, region: &RegionKey, position: &Position) -> Option<f32> {
        self.observers()
            .iter()
            .filter(|observer| self.eligible(observer) && self.same_region(observer, region))
            .filter_map(|observer| self.distance(observer, position))
            .reduce(f32::min)
    }
}
