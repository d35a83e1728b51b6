use serde_json::json;
use windkit_core::layer::{HelicalWind, HelicalWindParams, HoopWind, Layer, WindType};
use windkit_core::LayerError;

#[test]
fn test_helical_layer_from_json() {
    let entry = json!({
        "windType": "helical",
        "towWidth": 0.5,
        "towThickness": "0.012",
        "windAngle": 45,
        "numStarts": 2,
        "skipIndex": 1,
        "lockAngle": 720,
        "leadInLength": 0.25,
        "leadOutLength": 0,
        "skipInitialLock": false
    });

    let layer = Layer::from_json(12.0, &entry).unwrap();
    assert_eq!(layer.wind_type(), WindType::Helical);
    assert_eq!(layer.wind_length(), 12.0);
    assert_eq!(layer.tow_thickness(), 0.012);

    let Layer::Helical(helical) = layer else {
        panic!("expected a helical layer");
    };
    assert_eq!(helical.wind_angle(), 45.0);
    assert_eq!(helical.num_starts(), 2);
    assert_eq!(helical.skip_index(), 1);
    assert_eq!(helical.lock_angle(), 720);
    assert_eq!(helical.lead_in_length(), 0.25);
    assert_eq!(helical.lead_out_length(), 0.0);
    assert!(!helical.skip_initial_lock());
}

#[test]
fn test_hoop_layer_from_json() {
    let entry = json!({
        "windType": "hoop",
        "towWidth": "0.25",
        "towThickness": 0.01,
        "terminal": true
    });

    let layer = Layer::from_json(30.0, &entry).unwrap();
    assert_eq!(layer.wind_type(), WindType::Hoop);
    assert_eq!(layer.tow_width(), 0.25);

    match layer {
        Layer::Hoop(hoop) => assert!(hoop.is_single_pass()),
        Layer::Helical(_) => panic!("expected a hoop layer"),
    }
}

#[test]
fn test_non_numeric_field_is_rejected() {
    let entry = json!({
        "windType": "helical",
        "towWidth": 0.5,
        "towThickness": 0.01,
        "windAngle": "steep",
        "numStarts": 2,
        "skipIndex": 0,
        "lockAngle": 720,
        "leadInLength": 0,
        "leadOutLength": 0,
        "skipInitialLock": false
    });

    let err = Layer::from_json(12.0, &entry).unwrap_err();
    match err {
        LayerError::TypeConversion { field, expected, .. } => {
            assert_eq!(field, "windAngle");
            assert_eq!(expected, "float");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unknown_wind_type() {
    let entry = json!({ "windType": "polar", "towWidth": 0.5 });
    let err = Layer::from_json(12.0, &entry).unwrap_err();
    assert_eq!(
        err,
        LayerError::UnknownWindType {
            wind_type: "polar".to_string()
        }
    );
}

#[test]
fn test_num_starts_not_validated_at_construction() {
    let layer = HelicalWind::new(
        10.0,
        HelicalWindParams {
            tow_width: 0.5,
            wind_angle: 30.0,
            num_starts: 0,
            ..Default::default()
        },
    );
    assert_eq!(layer.num_starts(), 0);
}

#[test]
fn test_layer_from_variants() {
    let hoop: Layer = HoopWind::new(5.0, 0.5, 0.01, false).into();
    assert_eq!(hoop.wind_type(), WindType::Hoop);

    let helical: Layer = HelicalWind::new(5.0, HelicalWindParams::default()).into();
    assert_eq!(helical.wind_type(), WindType::Helical);
    assert_eq!(helical.wind_length(), 5.0);
}
