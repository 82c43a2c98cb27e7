//! Tests for graph types (Distance, DistanceInput, RoutePath).

use super::types::{validate_city_name, Distance, DistanceInput, RoutePath, MAX_DISTANCE};
use crate::error::Error;

#[test]
fn test_distance_new() {
    let d = Distance::new("A", "B", 5).unwrap();
    assert_eq!(d.first_city(), "A");
    assert_eq!(d.second_city(), "B");
    assert_eq!(d.distance(), 5);
}

#[test]
fn test_distance_rejects_zero_and_blank() {
    assert!(matches!(
        Distance::new("A", "B", 0),
        Err(Error::InvalidDistance { distance: 0, .. })
    ));
    assert!(matches!(
        Distance::new("", "B", 1),
        Err(Error::InvalidCityName(_))
    ));
    assert!(matches!(
        Distance::new("A", "\t ", 1),
        Err(Error::InvalidCityName(_))
    ));
}

#[test]
fn test_distance_connects_both_orientations() {
    let d = Distance::new("A", "B", 5).unwrap();
    assert!(d.connects("A", "B"));
    assert!(d.connects("B", "A"));
    assert!(!d.connects("A", "C"));
}

#[test]
fn test_distance_input_validate() {
    let ok = DistanceInput::new("A", "B", 3).validate().unwrap();
    assert_eq!(ok, Distance::new("A", "B", 3).unwrap());

    let negative = DistanceInput::new("A", "B", -4).validate();
    assert!(matches!(
        negative,
        Err(Error::InvalidDistance { distance: -4, .. })
    ));
}

#[test]
fn test_distance_input_json_field_names() {
    let input: DistanceInput =
        serde_json::from_str(r#"{"cityA": "A", "cityB": "B", "distance": 5}"#).unwrap();
    assert_eq!(input, DistanceInput::new("A", "B", 5));
}

#[test]
fn test_validate_city_name_keeps_inner_spaces() {
    assert!(validate_city_name("New York").is_ok());
    assert!(validate_city_name("   ").is_err());
}

#[test]
fn test_route_path_serialize() {
    let path = RoutePath {
        path: vec!["A".to_string(), "B".to_string()],
        distance: 5,
    };
    assert_eq!(path.hops(), 1);
    let json = serde_json::to_value(&path).unwrap();
    assert_eq!(json, serde_json::json!({"path": ["A", "B"], "distance": 5}));
}

#[test]
fn test_distance_upper_bound() {
    assert!(Distance::new("A", "B", MAX_DISTANCE).is_ok());
    assert!(matches!(
        Distance::new("A", "B", MAX_DISTANCE + 1),
        Err(Error::InvalidDistance { .. })
    ));

    let huge = DistanceInput::new("A", "B", i64::MAX).validate();
    assert!(matches!(
        huge,
        Err(Error::InvalidDistance {
            distance: i64::MAX,
            ..
        })
    ));
}

#[test]
fn test_distance_deserialize_validates() {
    let ok: Distance =
        serde_json::from_str(r#"{"first_city": "A", "second_city": "B", "distance": 7}"#)
            .unwrap();
    assert_eq!(ok, Distance::new("A", "B", 7).unwrap());

    for bad in [
        r#"{"first_city": "A", "second_city": "B", "distance": 0}"#,
        r#"{"first_city": "", "second_city": "B", "distance": 1}"#,
        r#"{"first_city": "A", "second_city": "B", "distance": 4294967296}"#,
    ] {
        assert!(serde_json::from_str::<Distance>(bad).is_err(), "{bad}");
    }
}
