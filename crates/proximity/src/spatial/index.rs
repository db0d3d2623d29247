//! R-tree nodes for spatial indexing.
//!
//! ## Two-Stage Filtering
//!
//! Stop queries filter in two passes:
//! 1. **R-tree filter**: Euclidean distance in degree space. The search radius
//!    is the arc in degrees, widened by `1/cos` of the most poleward latitude
//!    the circle can reach. Circles crossing ±180° are also searched from a
//!    copy of the centre shifted by 360°.
//! 2. **Haversine filter**: exact great-circle distance on the survivors
//!
//! Near the poles, or for continent-sized radii, the degree-space bound stops
//! being useful and the query checks every stop instead.

use std::sync::Arc;

use geo::Point;
use rstar::{PointDistance, RTreeObject, AABB};

use crate::models::{BusStop, GeoPoint};
use crate::spatial::queries::meters_to_degrees_approx;

/// Stage-one slack over the exact arc, for the planar approximation
const CANDIDATE_MARGIN: f64 = 1.01;

/// Circles reaching this latitude are checked with a full scan
const POLAR_SCAN_LATITUDE: f64 = 80.0;

/// Longitude half-width above which a full scan is used instead of the tree
const MAX_TREE_SPAN_DEG: f64 = 10.0;

#[derive(Clone, Debug)]
pub struct StopNode {
    pub stop: Arc<BusStop>,
    point: [f64; 2],
}

impl StopNode {
    pub fn new(stop: Arc<BusStop>) -> Self {
        let location = Point::from(stop.location);
        Self {
            stop,
            point: [location.x(), location.y()],
        }
    }
}

impl RTreeObject for StopNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StopNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

/// How stage one gathers candidates for a radius query
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum CandidateSearch {
    /// Every stop within `sqrt(radius_2)` degrees of any of `centers`
    Tree { centers: Vec<[f64; 2]>, radius_2: f64 },
    /// Every stop in the index
    FullScan,
}

/// Stage-one plan covering every stop within `radius_m` meters of `center`
pub(crate) fn candidate_search(center: GeoPoint, radius_m: f64) -> CandidateSearch {
    let arc_deg = meters_to_degrees_approx(radius_m) * CANDIDATE_MARGIN;
    let poleward = center.latitude().abs() + arc_deg;
    if poleward >= POLAR_SCAN_LATITUDE {
        return CandidateSearch::FullScan;
    }

    let span = arc_deg / poleward.to_radians().cos();
    if span > MAX_TREE_SPAN_DEG {
        return CandidateSearch::FullScan;
    }

    let [lng, lat] = query_point(center);
    let mut centers = vec![[lng, lat]];
    if lng + span > 180.0 {
        centers.push([lng - 360.0, lat]);
    }
    if lng - span < -180.0 {
        centers.push([lng + 360.0, lat]);
    }

    CandidateSearch::Tree {
        centers,
        radius_2: span * span,
    }
}

pub(crate) fn query_point(center: GeoPoint) -> [f64; 2] {
    [center.longitude(), center.latitude()]
}
