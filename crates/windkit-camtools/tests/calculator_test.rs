use windkit_camtools::calculator::WindCalculator;
use windkit_camtools::planner::HelicalGeometry;
use windkit_camtools::{CamToolError, ParameterError};
use windkit_core::layer::{HelicalWind, HelicalWindParams};

#[test]
fn test_calculate_reference_mandrel() {
    let calc = WindCalculator::calculate(4.0, 0.5, 45.0).unwrap();
    assert_eq!(calc.num_circuits, 18);
    assert_eq!(calc.valid_start_counts, vec![1, 2, 3, 6, 9, 18]);
}

#[test]
fn test_calculate_prime_circuit_count() {
    // pi * 4.0 / 0.5 = 25.13, rounded up to 26
    let calc = WindCalculator::calculate(4.0, 0.5, 0.0).unwrap();
    assert_eq!(calc.num_circuits, 26);
    assert_eq!(calc.valid_start_counts, vec![1, 2, 13, 26]);
}

#[test]
fn test_every_suggested_start_count_plans() {
    let calc = WindCalculator::calculate(6.0, 0.25, 30.0).unwrap();

    for num_starts in &calc.valid_start_counts {
        let layer = HelicalWind::new(
            12.0,
            HelicalWindParams {
                tow_width: 0.25,
                wind_angle: 30.0,
                num_starts: *num_starts,
                lock_angle: 720,
                ..Default::default()
            },
        );
        let geometry = HelicalGeometry::compute(&layer, 6.0).unwrap();
        assert_eq!(geometry.num_circuits, calc.num_circuits);
    }
}

#[test]
fn test_out_of_range_angle() {
    let err = WindCalculator::calculate(4.0, 0.5, 95.0).unwrap_err();
    assert!(matches!(
        err,
        CamToolError::Parameter(ParameterError::OutOfRange { ref name, .. }) if name == "wind_angle"
    ));
}
