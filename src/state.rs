use dashmap::DashMap;
use uuid::Uuid;

use crate::engine::validator::ValidationLimits;
use crate::models::route::Route;
use crate::observability::metrics::Metrics;

pub struct AppState {
    pub routes: DashMap<Uuid, Route>,
    pub limits: ValidationLimits,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(limits: ValidationLimits) -> Self {
        Self {
            routes: DashMap::new(),
            limits,
            metrics: Metrics::new(),
        }
    }

    /// Stores a fully planned route. The caller only gets here after the
    /// engine succeeded, so a rejected submission never leaves a trace.
    pub fn insert_route(&self, route: Route) -> Route {
        self.routes.insert(route.id(), route.clone());
        self.metrics.routes_stored.set(self.routes.len() as i64);
        route
    }

    /// Removes the route together with the waypoints it owns.
    pub fn remove_route(&self, id: &Uuid) -> Option<Route> {
        let removed = self.routes.remove(id).map(|(_, route)| route);
        self.metrics.routes_stored.set(self.routes.len() as i64);
        removed
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ValidationLimits::default())
    }
}
