use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::distance::RouteDistance;
use crate::engine::PlannedRoute;
use crate::models::waypoint::{StoredWaypoint, Waypoint, WaypointCandidate};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRouteRequest {
    /// `null` and absent are treated like an empty name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub waypoints: Vec<WaypointCandidate>,
}

/// A full waypoint set, used both to replace a stored route's waypoints and
/// to preview a distance while editing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaypointSetRequest {
    #[serde(default)]
    pub waypoints: Vec<WaypointCandidate>,
}

/// A stored route. Waypoints are kept in the order used for the distance
/// computation and the total can only change together with them.
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    id: Uuid,
    name: String,
    waypoints: Vec<StoredWaypoint>,
    total_distance_km: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Route {
    pub fn new(planned: PlannedRoute) -> Self {
        let now = Utc::now();
        let total_distance_km = planned.distance.total_distance_km();

        Self {
            id: Uuid::new_v4(),
            name: planned.name,
            waypoints: store_waypoints(planned.distance),
            total_distance_km,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn waypoints(&self) -> &[StoredWaypoint] {
        &self.waypoints
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Swaps the whole waypoint set. Previous waypoint ids are discarded.
    pub fn replace_waypoints(&mut self, distance: RouteDistance) {
        self.total_distance_km = distance.total_distance_km();
        self.waypoints = store_waypoints(distance);
        self.updated_at = Utc::now();
    }

    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            id: self.id,
            name: self.name.clone(),
            waypoint_count: self.waypoints.len(),
            total_distance_km: self.total_distance_km,
            created_at: self.created_at,
        }
    }

    /// The stored waypoints as engine input.
    pub fn engine_waypoints(&self) -> Vec<Waypoint> {
        self.waypoints.iter().map(Waypoint::from).collect()
    }
}

fn store_waypoints(distance: RouteDistance) -> Vec<StoredWaypoint> {
    distance
        .into_waypoints()
        .into_iter()
        .map(StoredWaypoint::from)
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSummary {
    pub id: Uuid,
    pub name: String,
    pub waypoint_count: usize,
    pub total_distance_km: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePreview {
    pub waypoints: Vec<Waypoint>,
    pub segments_km: Vec<f64>,
    pub total_distance_km: f64,
    pub dropped_candidates: usize,
}
