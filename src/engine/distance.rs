use serde::Serialize;

use crate::error::ComputationError;
use crate::geo::haversine_km;
use crate::models::waypoint::Waypoint;

const DISPLAY_DECIMALS_FACTOR: f64 = 1_000.0;

/// Result of running the calculator over one waypoint set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteDistance {
    waypoints: Vec<Waypoint>,
    segments_km: Vec<f64>,
    total_km: f64,
}

impl RouteDistance {
    /// Waypoints in the order the distance was summed in.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn into_waypoints(self) -> Vec<Waypoint> {
        self.waypoints
    }

    /// One entry per consecutive pair, full precision.
    pub fn segments_km(&self) -> &[f64] {
        &self.segments_km
    }

    /// Unrounded total.
    pub fn total_km(&self) -> f64 {
        self.total_km
    }

    /// Total rounded for display and storage.
    pub fn total_distance_km(&self) -> f64 {
        round_km(self.total_km)
    }
}

/// Rounds to three decimals, halves away from zero.
pub fn round_km(km: f64) -> f64 {
    (km * DISPLAY_DECIMALS_FACTOR).round() / DISPLAY_DECIMALS_FACTOR
}

/// Stable sort by `order`: equal orders keep their input sequence.
pub fn sort_by_order(waypoints: &[Waypoint]) -> Vec<Waypoint> {
    let mut sorted = waypoints.to_vec();
    sorted.sort_by_key(|waypoint| waypoint.order);
    sorted
}

/// Distances between consecutive waypoints of an already sorted sequence.
pub fn segment_distances_km(sorted: &[Waypoint]) -> Result<Vec<f64>, ComputationError> {
    if let Some(index) = sorted
        .iter()
        .position(|waypoint| !waypoint.coordinate().is_finite())
    {
        return Err(ComputationError::NonFiniteCoordinate { index });
    }

    sorted
        .windows(2)
        .enumerate()
        .map(|(from, pair)| {
            let distance = haversine_km(&pair[0].coordinate(), &pair[1].coordinate());
            if distance.is_finite() {
                Ok(distance)
            } else {
                Err(ComputationError::NonFiniteDistance { from, to: from + 1 })
            }
        })
        .collect()
}

pub fn compute(waypoints: &[Waypoint]) -> Result<RouteDistance, ComputationError> {
    let sorted = sort_by_order(waypoints);
    let segments_km = segment_distances_km(&sorted)?;
    let total_km = segments_km.iter().sum();

    Ok(RouteDistance {
        waypoints: sorted,
        segments_km,
        total_km,
    })
}

/// Rounded total for `waypoints` in any input sequence.
pub fn total_distance_km(waypoints: &[Waypoint]) -> Result<f64, ComputationError> {
    compute(waypoints).map(|distance| distance.total_distance_km())
}
