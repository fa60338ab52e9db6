use mva_core::dms::{parse_dms, to_dms};
use mva_core::geometry::Axis;
use proptest::prelude::*;

const ONE_ARC_SECOND: f64 = 1.0 / 3600.0;

proptest! {
    #[test]
    fn latitude_round_trips_within_one_arc_second(value in -90.0f64..=90.0) {
        let token = to_dms(value, Axis::Latitude);
        let (axis, parsed) = parse_dms(&token).expect("formatted token must parse");
        prop_assert_eq!(axis, Axis::Latitude);
        prop_assert!((parsed - value).abs() <= ONE_ARC_SECOND, "{} -> {} -> {}", value, token, parsed);
    }

    #[test]
    fn longitude_round_trips_within_one_arc_second(value in -180.0f64..=180.0) {
        let token = to_dms(value, Axis::Longitude);
        let (axis, parsed) = parse_dms(&token).expect("formatted token must parse");
        prop_assert_eq!(axis, Axis::Longitude);
        prop_assert!((parsed - value).abs() <= ONE_ARC_SECOND, "{} -> {} -> {}", value, token, parsed);
    }

    #[test]
    fn token_has_fixed_width(value in -180.0f64..=180.0) {
        let token = to_dms(value, Axis::Longitude);
        prop_assert_eq!(token.len(), 14);
        prop_assert!(token.ends_with(".000"));
    }
}
