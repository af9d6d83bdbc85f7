//! Route distance engine.
//!
//! Every caller that needs a distance goes through [`plan_route`],
//! [`plan_waypoints`] or [`preview`], so a previewed total and a stored total
//! for the same input are always identical. Nothing here holds state.

pub mod distance;
pub mod validator;

use crate::error::EngineError;
use crate::models::route::{CreateRouteRequest, RoutePreview};
use crate::models::waypoint::WaypointCandidate;

use self::distance::{round_km, RouteDistance};
use self::validator::ValidationLimits;

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRoute {
    pub name: String,
    pub distance: RouteDistance,
    pub dropped_candidates: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedWaypoints {
    pub distance: RouteDistance,
    pub dropped_candidates: usize,
}

/// Validates a creation request and computes its distance.
pub fn plan_route(
    request: &CreateRouteRequest,
    limits: &ValidationLimits,
) -> Result<PlannedRoute, EngineError> {
    let validated = validator::validate_route(
        request.name.as_deref().unwrap_or_default(),
        &request.waypoints,
        limits,
    )?;
    let dropped_candidates = request.waypoints.len() - validated.waypoints.len();
    let distance = distance::compute(&validated.waypoints)?;

    Ok(PlannedRoute {
        name: validated.name,
        distance,
        dropped_candidates,
    })
}

/// Validates a replacement waypoint set for an existing route.
pub fn plan_waypoints(candidates: &[WaypointCandidate]) -> Result<PlannedWaypoints, EngineError> {
    let waypoints = validator::validate_waypoints(candidates)?;
    let dropped_candidates = candidates.len() - waypoints.len();
    let distance = distance::compute(&waypoints)?;

    Ok(PlannedWaypoints {
        distance,
        dropped_candidates,
    })
}

/// Distance of a route still being edited. An empty set is allowed and
/// yields zero.
pub fn preview(candidates: &[WaypointCandidate]) -> Result<RoutePreview, EngineError> {
    let waypoints = validator::filter_candidates(candidates)?;
    let dropped_candidates = candidates.len() - waypoints.len();
    let distance = distance::compute(&waypoints)?;

    Ok(RoutePreview {
        segments_km: distance.segments_km().iter().copied().map(round_km).collect(),
        total_distance_km: distance.total_distance_km(),
        waypoints: distance.into_waypoints(),
        dropped_candidates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn request(name: &str, waypoints: Vec<WaypointCandidate>) -> CreateRouteRequest {
        CreateRouteRequest {
            name: Some(name.to_string()),
            waypoints,
        }
    }

    #[test]
    fn plans_route_a() {
        let planned = plan_route(
            &request(
                "A",
                vec![
                    WaypointCandidate::new(0.0, 0.0, 1),
                    WaypointCandidate::new(0.0, 1.0, 2),
                ],
            ),
            &ValidationLimits::default(),
        )
        .unwrap();

        assert_eq!(planned.name, "A");
        assert_eq!(planned.distance.total_distance_km(), 111.195);
        assert_eq!(planned.dropped_candidates, 0);
    }

    #[test]
    fn plan_counts_dropped_candidates() {
        let planned = plan_route(
            &request(
                "partial",
                vec![
                    WaypointCandidate::new(0.0, 0.0, 1),
                    WaypointCandidate::new("", "5", 2),
                    WaypointCandidate::new("0", "1", 3),
                ],
            ),
            &ValidationLimits::default(),
        )
        .unwrap();

        assert_eq!(planned.distance.waypoints().len(), 2);
        assert_eq!(planned.dropped_candidates, 1);
        assert_eq!(planned.distance.total_distance_km(), 111.195);
    }

    #[test]
    fn rejections_are_distinguishable() {
        let limits = ValidationLimits::default();

        let missing_name = plan_route(
            &request("", vec![WaypointCandidate::new(1.0, 1.0, 1)]),
            &limits,
        );
        assert_eq!(
            missing_name,
            Err(EngineError::Validation(ValidationError::NameRequired))
        );

        let no_waypoints = plan_route(
            &request("Test", vec![WaypointCandidate::new("", "", 1)]),
            &limits,
        );
        assert_eq!(
            no_waypoints,
            Err(EngineError::Validation(ValidationError::NoWaypoints))
        );
    }

    #[test]
    fn null_name_is_a_missing_name() {
        let result = plan_route(
            &CreateRouteRequest {
                name: None,
                waypoints: vec![WaypointCandidate::new(1.0, 1.0, 1)],
            },
            &ValidationLimits::default(),
        );
        assert_eq!(
            result,
            Err(EngineError::Validation(ValidationError::NameRequired))
        );
    }

    #[test]
    fn replacement_requires_a_usable_waypoint() {
        assert_eq!(
            plan_waypoints(&[]),
            Err(EngineError::Validation(ValidationError::NoWaypoints))
        );
    }

    #[test]
    fn preview_matches_stored_total() {
        let candidates = vec![
            WaypointCandidate::new(48.8566, 2.3522, 3),
            WaypointCandidate::new(51.5074, -0.1278, 1),
            WaypointCandidate::new("", "", 4),
            WaypointCandidate::new(50.8503, 4.3517, 2),
        ];

        let preview = preview(&candidates).unwrap();
        let planned = plan_route(
            &request("London-Brussels-Paris", candidates),
            &ValidationLimits::default(),
        )
        .unwrap();

        assert_eq!(preview.total_distance_km, planned.distance.total_distance_km());
        assert_eq!(preview.waypoints, planned.distance.waypoints());
        assert_eq!(preview.segments_km.len(), 2);
        assert_eq!(preview.dropped_candidates, 1);
    }

    #[test]
    fn preview_of_nothing_is_zero() {
        let preview = preview(&[WaypointCandidate::default()]).unwrap();
        assert!(preview.waypoints.is_empty());
        assert_eq!(preview.total_distance_km, 0.0);
        assert_eq!(preview.dropped_candidates, 1);
    }
}
