use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::Json;
use axum::Router;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::rest::extract::JsonBody;
use crate::engine;
use crate::error::AppError;
use crate::models::route::{
    CreateRouteRequest, Route, RoutePreview, RouteSummary, WaypointSetRequest,
};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/routes", post(create_route).get(list_routes))
        .route("/api/routes/preview", post(preview_route))
        .route("/api/routes/:id", get(get_route).delete(delete_route))
        .route("/api/routes/:id/waypoints", put(replace_waypoints))
}

fn observe_compute(state: &AppState, operation: &str, start: Instant) {
    state
        .metrics
        .route_compute_seconds
        .with_label_values(&[operation])
        .observe(start.elapsed().as_secs_f64());
}

fn route_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("route {} not found", id))
}

async fn create_route(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<CreateRouteRequest>,
) -> Result<Json<Route>, AppError> {
    let start = Instant::now();
    let planned = engine::plan_route(&payload, &state.limits);
    observe_compute(&state, "create", start);

    let planned = match planned {
        Ok(planned) => planned,
        Err(err) => {
            state
                .metrics
                .routes_created_total
                .with_label_values(&["rejected"])
                .inc();
            warn!(error = %err, "route submission rejected");
            return Err(err.into());
        }
    };

    state
        .metrics
        .waypoints_dropped_total
        .inc_by(planned.dropped_candidates as u64);
    state
        .metrics
        .routes_created_total
        .with_label_values(&["created"])
        .inc();

    let route = state.insert_route(Route::new(planned));

    info!(
        route_id = %route.id(),
        waypoints = route.waypoints().len(),
        total_distance_km = route.total_distance_km(),
        "route created"
    );

    Ok(Json(route))
}

async fn list_routes(State(state): State<Arc<AppState>>) -> Json<Vec<RouteSummary>> {
    let mut summaries: Vec<RouteSummary> = state
        .routes
        .iter()
        .map(|entry| entry.value().summary())
        .collect();

    summaries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    Json(summaries)
}

async fn get_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Route>, AppError> {
    let route = state.routes.get(&id).ok_or_else(|| route_not_found(id))?;

    Ok(Json(route.value().clone()))
}

async fn replace_waypoints(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    JsonBody(payload): JsonBody<WaypointSetRequest>,
) -> Result<Json<Route>, AppError> {
    if !state.routes.contains_key(&id) {
        return Err(route_not_found(id));
    }

    let start = Instant::now();
    let planned = engine::plan_waypoints(&payload.waypoints);
    observe_compute(&state, "replace", start);

    let planned = planned.inspect_err(|err| {
        warn!(route_id = %id, error = %err, "waypoint replacement rejected");
    })?;

    let mut route = state.routes.get_mut(&id).ok_or_else(|| route_not_found(id))?;
    route.replace_waypoints(planned.distance);

    state
        .metrics
        .waypoints_dropped_total
        .inc_by(planned.dropped_candidates as u64);

    info!(
        route_id = %id,
        waypoints = route.waypoints().len(),
        total_distance_km = route.total_distance_km(),
        "route waypoints replaced"
    );

    Ok(Json(route.clone()))
}

async fn delete_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let route = state.remove_route(&id).ok_or_else(|| route_not_found(id))?;

    info!(
        route_id = %id,
        waypoints = route.waypoints().len(),
        "route deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

async fn preview_route(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<WaypointSetRequest>,
) -> Result<Json<RoutePreview>, AppError> {
    let start = Instant::now();
    let preview = engine::preview(&payload.waypoints);
    observe_compute(&state, "preview", start);

    Ok(Json(preview?))
}
