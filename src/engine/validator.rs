use crate::error::ValidationError;
use crate::models::waypoint::{NumericInput, Waypoint, WaypointCandidate};

pub const DEFAULT_ORDER: i64 = 1;
pub const DEFAULT_MAX_NAME_LEN: usize = 100;

const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationLimits {
    pub max_name_len: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_name_len: DEFAULT_MAX_NAME_LEN,
        }
    }
}

/// Returns the number carried by `input`, or `None` when it is absent,
/// blank, unparseable, mistyped or not finite.
pub fn parse_coordinate(input: Option<&NumericInput>) -> Option<f64> {
    let value = match input? {
        NumericInput::Number(value) => *value,
        NumericInput::Text(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        NumericInput::Other(_) => return None,
    };

    value.is_finite().then_some(value)
}

/// Reads the order hint. Anything that is not a whole number in `i64`
/// range, numeric text included, falls back to [`DEFAULT_ORDER`].
pub fn parse_order(input: Option<&NumericInput>) -> i64 {
    parse_coordinate(input)
        .filter(|value| value.fract() == 0.0)
        .filter(|value| (i64::MIN as f64..i64::MAX as f64).contains(value))
        .map(|value| value as i64)
        .unwrap_or(DEFAULT_ORDER)
}

/// Trims the name and checks it against `limits`.
pub fn validate_name(name: &str, limits: &ValidationLimits) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::NameRequired);
    }

    if trimmed.chars().count() > limits.max_name_len {
        return Err(ValidationError::NameTooLong {
            max: limits.max_name_len,
        });
    }

    Ok(trimmed.to_string())
}

/// Keeps candidates with both coordinates present and range-checks them.
/// Incomplete candidates are dropped silently; the result may be empty.
pub fn filter_candidates(
    candidates: &[WaypointCandidate],
) -> Result<Vec<Waypoint>, ValidationError> {
    let mut waypoints = Vec::with_capacity(candidates.len());

    for (index, candidate) in candidates.iter().enumerate() {
        let (Some(latitude), Some(longitude)) = (
            parse_coordinate(candidate.latitude.as_ref()),
            parse_coordinate(candidate.longitude.as_ref()),
        ) else {
            continue;
        };

        if !LATITUDE_RANGE.contains(&latitude) {
            return Err(ValidationError::LatitudeOutOfRange {
                index,
                value: latitude,
            });
        }
        if !LONGITUDE_RANGE.contains(&longitude) {
            return Err(ValidationError::LongitudeOutOfRange {
                index,
                value: longitude,
            });
        }

        waypoints.push(Waypoint::new(
            latitude,
            longitude,
            parse_order(candidate.order.as_ref()),
        ));
    }

    Ok(waypoints)
}

/// Like [`filter_candidates`] but rejects a set with no usable waypoint.
pub fn validate_waypoints(
    candidates: &[WaypointCandidate],
) -> Result<Vec<Waypoint>, ValidationError> {
    let waypoints = filter_candidates(candidates)?;
    if waypoints.is_empty() {
        return Err(ValidationError::NoWaypoints);
    }
    Ok(waypoints)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRoute {
    pub name: String,
    pub waypoints: Vec<Waypoint>,
}

/// The name is checked before any waypoint is looked at.
pub fn validate_route(
    name: &str,
    candidates: &[WaypointCandidate],
    limits: &ValidationLimits,
) -> Result<ValidatedRoute, ValidationError> {
    let name = validate_name(name, limits)?;
    let waypoints = validate_waypoints(candidates)?;
    Ok(ValidatedRoute { name, waypoints })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(order: i64) -> WaypointCandidate {
        WaypointCandidate::new("", "", order)
    }

    #[test]
    fn parses_numbers_and_trimmed_text() {
        assert_eq!(parse_coordinate(Some(&NumericInput::Number(1.5))), Some(1.5));
        assert_eq!(parse_coordinate(Some(&" -33.25 ".into())), Some(-33.25));
        assert_eq!(parse_coordinate(Some(&"".into())), None);
        assert_eq!(parse_coordinate(Some(&"   ".into())), None);
        assert_eq!(parse_coordinate(Some(&"north".into())), None);
        assert_eq!(parse_coordinate(None), None);
    }

    #[test]
    fn non_finite_text_is_not_a_coordinate() {
        assert_eq!(parse_coordinate(Some(&"NaN".into())), None);
        assert_eq!(parse_coordinate(Some(&"inf".into())), None);
        assert_eq!(parse_coordinate(Some(&NumericInput::Number(f64::NAN))), None);
    }

    #[test]
    fn mistyped_coordinates_are_not_numbers() {
        assert_eq!(parse_coordinate(Some(&NumericInput::Other("true".into()))), None);
        assert_eq!(parse_coordinate(Some(&NumericInput::Other("1e400".into()))), None);
    }

    #[test]
    fn order_accepts_whole_numbers_and_numeric_text() {
        assert_eq!(parse_order(Some(&NumericInput::Number(4.0))), 4);
        assert_eq!(parse_order(Some(&" 2 ".into())), 2);
        assert_eq!(parse_order(Some(&"-3".into())), -3);
    }

    #[test]
    fn unusable_order_falls_back_to_default() {
        assert_eq!(parse_order(None), DEFAULT_ORDER);
        assert_eq!(parse_order(Some(&"".into())), DEFAULT_ORDER);
        assert_eq!(parse_order(Some(&"second".into())), DEFAULT_ORDER);
        assert_eq!(parse_order(Some(&NumericInput::Number(2.5))), DEFAULT_ORDER);
        assert_eq!(parse_order(Some(&NumericInput::Number(1e300))), DEFAULT_ORDER);
        assert_eq!(parse_order(Some(&NumericInput::Other("[]".into()))), DEFAULT_ORDER);
    }

    #[test]
    fn mistyped_candidates_are_dropped_silently() {
        let candidates = vec![
            WaypointCandidate {
                latitude: Some(NumericInput::Other("true".into())),
                longitude: Some(1.0.into()),
                order: Some(1i64.into()),
            },
            WaypointCandidate::new(5.0, 6.0, 2),
        ];

        let waypoints = validate_waypoints(&candidates).unwrap();
        assert_eq!(waypoints, vec![Waypoint::new(5.0, 6.0, 2)]);
    }

    #[test]
    fn empty_name_is_rejected_before_waypoints() {
        let result = validate_route("   ", &[], &ValidationLimits::default());
        assert_eq!(result, Err(ValidationError::NameRequired));

        let result = validate_route(
            "",
            &[WaypointCandidate::new(1.0, 1.0, 1)],
            &ValidationLimits::default(),
        );
        assert_eq!(result, Err(ValidationError::NameRequired));
    }

    #[test]
    fn name_is_trimmed_and_length_limited() {
        let limits = ValidationLimits { max_name_len: 5 };
        assert_eq!(validate_name("  Ruta ", &limits), Ok("Ruta".to_string()));
        assert_eq!(
            validate_name("Camino", &limits),
            Err(ValidationError::NameTooLong { max: 5 })
        );
    }

    #[test]
    fn incomplete_candidates_are_dropped_silently() {
        let candidates = vec![
            WaypointCandidate::new(0.0, 0.0, 1),
            WaypointCandidate {
                latitude: Some(2.0.into()),
                longitude: None,
                order: Some(2i64.into()),
            },
            blank(3),
            WaypointCandidate::new("0", "1", 4),
        ];

        let waypoints = validate_waypoints(&candidates).unwrap();
        assert_eq!(
            waypoints,
            vec![Waypoint::new(0.0, 0.0, 1), Waypoint::new(0.0, 1.0, 4)]
        );
    }

    #[test]
    fn no_usable_waypoints_is_rejected() {
        let result = validate_route("Test", &[blank(1)], &ValidationLimits::default());
        assert_eq!(result, Err(ValidationError::NoWaypoints));
    }

    #[test]
    fn filtering_alone_tolerates_an_empty_set() {
        assert_eq!(filter_candidates(&[blank(1)]), Ok(Vec::new()));
    }

    #[test]
    fn missing_order_defaults_to_one() {
        let candidate = WaypointCandidate {
            latitude: Some(10.0.into()),
            longitude: Some(20.0.into()),
            order: None,
        };
        let waypoints = validate_waypoints(&[candidate]).unwrap();
        assert_eq!(waypoints[0].order, DEFAULT_ORDER);
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let result = validate_waypoints(&[
            WaypointCandidate::new(0.0, 0.0, 1),
            WaypointCandidate::new(90.5, 0.0, 2),
        ]);
        assert_eq!(
            result,
            Err(ValidationError::LatitudeOutOfRange {
                index: 1,
                value: 90.5
            })
        );

        let result = validate_waypoints(&[WaypointCandidate::new(0.0, -180.01, 1)]);
        assert_eq!(
            result,
            Err(ValidationError::LongitudeOutOfRange {
                index: 0,
                value: -180.01
            })
        );
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let waypoints = validate_waypoints(&[
            WaypointCandidate::new(90.0, 180.0, 1),
            WaypointCandidate::new(-90.0, -180.0, 2),
        ])
        .unwrap();
        assert_eq!(waypoints.len(), 2);
    }
}
