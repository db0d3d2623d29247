//! In-memory stop directory with an R-tree for radius and nearest queries.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use rstar::RTree;
use tracing::{debug, warn};

use crate::identifiers::StopIdentifier;
use crate::models::{BusStop, GeoPoint};
use crate::spatial::index::{candidate_search, query_point, CandidateSearch, StopNode};
use crate::spatial::queries::{haversine_distance, round_to_hundredths};

/// Half of the 10 m resolution radius checks compare at
const ROUNDING_SLACK_M: f64 = 5.0;

/// A stop together with its exact distance from the query point
#[derive(Clone, Debug)]
pub struct StopMatch {
    pub stop: Arc<BusStop>,
    pub distance_m: f64,
}

impl StopMatch {
    fn new(stop: Arc<BusStop>, point: GeoPoint) -> Self {
        let distance_m = haversine_distance(point, stop.location);
        Self { stop, distance_m }
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }

    /// Distance at the two-decimal resolution radius checks use
    pub fn rounded_km(&self) -> f64 {
        round_to_hundredths(self.distance_km())
    }
}

/// Stop directory with id lookups and spatial queries
///
/// Cheap to clone; every stop lives behind an `Arc`.
#[derive(Clone, Default)]
pub struct StopIndex {
    stops: Vec<Arc<BusStop>>,
    stop_map: HashMap<StopIdentifier, Arc<BusStop>>,
    stop_tree: RTree<StopNode>,
}

impl StopIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index; a repeated stop id replaces the earlier stop
    pub fn from_stops(input: Vec<BusStop>) -> Self {
        let mut stops: Vec<Arc<BusStop>> = Vec::with_capacity(input.len());
        let mut stop_map = HashMap::with_capacity(input.len());

        for stop in input.into_iter().map(Arc::new) {
            if let Some(replaced) = stop_map.insert(stop.id.clone(), stop.clone()) {
                warn!(stop_id = %stop.id, "duplicate stop id, keeping the later entry");
                stops.retain(|s| !Arc::ptr_eq(s, &replaced));
            }
            stops.push(stop);
        }

        let stop_tree = RTree::bulk_load(stops.iter().cloned().map(StopNode::new).collect());

        Self {
            stops,
            stop_map,
            stop_tree,
        }
    }

    /// Look up a stop by its id or by the id's text
    pub fn get_stop<Q>(&self, id: &Q) -> Option<Arc<BusStop>>
    where
        StopIdentifier: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.stop_map.get(id).cloned()
    }

    pub fn all_stops(&self) -> &[Arc<BusStop>] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Stops within `radius_km` (inclusive), closest first
    ///
    /// Radius checks use the two-decimal kilometre distance, matching
    /// [`find_nearby_buses`](crate::spatial::find_nearby_buses).
    pub fn stops_within(&self, point: GeoPoint, radius_km: f64) -> Vec<StopMatch> {
        if radius_km <= 0.0 || !radius_km.is_finite() {
            return Vec::new();
        }

        let mut matches: Vec<StopMatch> = self
            .candidates(point, radius_km * 1000.0 + ROUNDING_SLACK_M)
            .into_iter()
            .map(|stop| StopMatch::new(stop, point))
            .filter(|m| m.rounded_km() <= radius_km)
            .collect();

        matches.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
        matches
    }

    /// Closest stop strictly inside `radius_km`, compared like
    /// [`find_nearest_stop`](crate::spatial::find_nearest_stop)
    pub fn nearest_stop(&self, point: GeoPoint, radius_km: f64) -> Option<StopMatch> {
        self.stops_within(point, radius_km)
            .into_iter()
            .next()
            .filter(|m| m.rounded_km() < radius_km)
    }

    fn candidates(&self, point: GeoPoint, radius_m: f64) -> Vec<Arc<BusStop>> {
        match candidate_search(point, radius_m) {
            CandidateSearch::Tree { centers, radius_2 } => centers
                .iter()
                .flat_map(|center| self.stop_tree.locate_within_distance(*center, radius_2))
                .map(|node| node.stop.clone())
                .collect(),
            CandidateSearch::FullScan => {
                debug!(radius_m, "degree-space bound unusable here, scanning all stops");
                self.stops.clone()
            }
        }
    }

    /// The `n` stops closest to `point`, regardless of distance
    ///
    /// Ordered by planar degree distance, which tracks great-circle order
    /// closely at city scale.
    pub fn nearest_stops(&self, point: GeoPoint, n: usize) -> Vec<StopMatch> {
        self.stop_tree
            .nearest_neighbor_iter(&query_point(point))
            .take(n)
            .map(|node| StopMatch::new(node.stop.clone(), point))
            .collect()
    }
}
