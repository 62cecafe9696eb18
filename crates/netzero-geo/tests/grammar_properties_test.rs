//! Property tests for map-link extraction

use netzero_geo::{extract_coordinates, Extraction};
use proptest::prelude::*;

fn found(link: &str) -> Option<(f64, f64, &'static str)> {
    match extract_coordinates(link) {
        Extraction::Found(m) => Some((m.coordinates.lat, m.coordinates.lng, m.rule)),
        _ => None,
    }
}

proptest! {
    #[test]
    fn in_range_q_param_is_always_found(lat in -90.0f64..=90.0, lng in -180.0f64..=180.0) {
        let lat = (lat * 1e4).round() / 1e4;
        let lng = (lng * 1e4).round() / 1e4;
        let link = format!("https://maps.google.com/?q={:.4},{:.4}", lat, lng);

        let (found_lat, found_lng, rule) = found(&link).unwrap();
        prop_assert!((found_lat - lat).abs() < 1e-9);
        prop_assert!((found_lng - lng).abs() < 1e-9);
        prop_assert_eq!(rule, "q-param");
    }

    #[test]
    fn out_of_range_latitude_is_never_found(lat in 90.0001f64..999.0, lng in -180.0f64..=180.0) {
        let link = format!("https://www.google.com/maps/@{:.4},{:.4},12z", lat, lng);
        prop_assert_eq!(extract_coordinates(&link), Extraction::NotFound);
    }

    #[test]
    fn shortener_paths_always_need_expansion(path in "[A-Za-z0-9]{1,16}") {
        let link = format!("https://maps.app.goo.gl/{}", path);
        prop_assert_eq!(extract_coordinates(&link), Extraction::NeedsExpansion);
    }
}
