use approx::assert_relative_eq;
use tmj_symmetry_engine::{
    analyze, classify, resolve, validate, AnalysisError, BoundingBox, Classification,
    ComputationError, DegenerateReason, DetectionSet, OrderedPair, SymmetryAnalyzer,
    SymmetryParams, ValidationError,
};

const IMAGE_WIDTH: f64 = 1000.0;

fn pair_set(a: BoundingBox, b: BoundingBox) -> DetectionSet {
    DetectionSet::new(vec![a, b])
}

#[test]
fn symmetric_scenario_is_normal() {
    let set = pair_set(
        BoundingBox::new(100.0, 50.0, 300.0, 250.0),
        BoundingBox::new(700.0, 50.0, 900.0, 250.0),
    );
    let res = SymmetryAnalyzer::default()
        .analyze(&set, IMAGE_WIDTH)
        .expect("analysis");

    assert_eq!(res.geometry.image_center_x, 500.0);
    assert_eq!(res.geometry.left_center_x, 200.0);
    assert_eq!(res.geometry.right_center_x, 800.0);
    assert_eq!(res.geometry.left_distance, 300.0);
    assert_eq!(res.geometry.right_distance, 300.0);
    assert_eq!(res.metrics.asymmetry_percent, 0.0);
    assert_eq!(res.metrics.width_diff_percent, 0.0);
    assert_eq!(res.metrics.height_diff_percent, 0.0);
    assert_eq!(res.classification, Classification::Normal);
}

#[test]
fn asymmetric_scenario_is_suspected() {
    let set = pair_set(
        BoundingBox::new(700.0, 50.0, 900.0, 250.0),
        BoundingBox::new(50.0, 50.0, 250.0, 250.0),
    );
    let res = SymmetryAnalyzer::default()
        .analyze(&set, IMAGE_WIDTH)
        .expect("analysis");

    assert_eq!(res.pair.left.x_min, 50.0);
    assert_eq!(res.geometry.left_center_x, 150.0);
    assert_eq!(res.geometry.left_distance, 350.0);
    assert_eq!(res.geometry.right_distance, 300.0);
    assert_eq!(res.metrics.asymmetry_percent, 10.0);
    assert_eq!(res.classification, Classification::DeformationSuspected);
    assert!(res.is_deformation_suspected());
}

#[test]
fn repeated_runs_are_bit_identical() {
    let set = pair_set(
        BoundingBox::new(61.3, 47.9, 259.1, 251.7),
        BoundingBox::new(698.2, 55.5, 913.4, 240.25),
    );
    let params = SymmetryParams::default();
    let a = analyze(&set, 1023.0, &params).expect("first");
    let b = analyze(&set, 1023.0, &params).expect("second");
    assert_eq!(
        a.metrics.asymmetry_percent.to_bits(),
        b.metrics.asymmetry_percent.to_bits()
    );
    assert_eq!(
        a.metrics.width_diff_percent.to_bits(),
        b.metrics.width_diff_percent.to_bits()
    );
    assert_eq!(
        a.metrics.height_diff_percent.to_bits(),
        b.metrics.height_diff_percent.to_bits()
    );
    assert_eq!(a, b);
}

#[test]
fn mirroring_the_pair_keeps_asymmetry() {
    let params = SymmetryParams::default();
    let center = IMAGE_WIDTH / 2.0;
    let cases = [
        (
            BoundingBox::new(50.0, 50.0, 250.0, 250.0),
            BoundingBox::new(700.0, 50.0, 900.0, 250.0),
        ),
        (
            BoundingBox::new(120.5, 30.0, 310.0, 260.0),
            BoundingBox::new(640.0, 40.0, 870.25, 255.0),
        ),
        (
            BoundingBox::new(10.0, 0.0, 90.0, 80.0),
            BoundingBox::new(400.0, 0.0, 480.0, 80.0),
        ),
    ];

    for (left, right) in cases {
        let pair = OrderedPair { left, right };
        let mirrored = OrderedPair {
            left: right.mirrored_about(center),
            right: left.mirrored_about(center),
        };
        let (m, c) = classify(&resolve(&pair, IMAGE_WIDTH), &params).expect("original");
        let (mm, mc) = classify(&resolve(&mirrored, IMAGE_WIDTH), &params).expect("mirrored");
        assert_relative_eq!(m.asymmetry_percent, mm.asymmetry_percent, epsilon = 1e-9);
        assert_relative_eq!(m.width_diff_percent, mm.width_diff_percent, epsilon = 1e-9);
        assert_relative_eq!(m.height_diff_percent, mm.height_diff_percent, epsilon = 1e-9);
        assert_eq!(c, mc);
    }
}

#[test]
fn threshold_boundary() {
    // left offset 325, right offset 300: exactly 5%
    let at = pair_set(
        BoundingBox::new(75.0, 50.0, 275.0, 250.0),
        BoundingBox::new(700.0, 50.0, 900.0, 250.0),
    );
    let res = SymmetryAnalyzer::default()
        .analyze(&at, IMAGE_WIDTH)
        .expect("analysis");
    assert_eq!(res.metrics.asymmetry_percent, 5.0);
    assert_eq!(res.classification, Classification::Normal);

    // one thousandth of a pixel further out: 5.0002%
    let above = pair_set(
        BoundingBox::new(74.999, 50.0, 274.999, 250.0),
        BoundingBox::new(700.0, 50.0, 900.0, 250.0),
    );
    let res = SymmetryAnalyzer::default()
        .analyze(&above, IMAGE_WIDTH)
        .expect("analysis");
    assert!(res.metrics.asymmetry_percent > 5.0);
    assert_eq!(res.classification, Classification::DeformationSuspected);
}

#[test]
fn wrong_counts_never_produce_metrics() {
    let b = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    for n in [0usize, 1, 3] {
        let set = DetectionSet::new(vec![b; n]);
        assert_eq!(
            validate(&set),
            Err(ValidationError::UnexpectedDetectionCount { actual: n })
        );
        let err = analyze(&set, IMAGE_WIDTH, &SymmetryParams::default()).unwrap_err();
        assert_eq!(err.detection_count(), Some(n));
    }
    assert!(validate(&DetectionSet::new(vec![b, b])).is_ok());
}

#[test]
fn degenerate_inputs_are_errors_not_nan() {
    let params = SymmetryParams::default();
    let good = BoundingBox::new(100.0, 50.0, 300.0, 250.0);
    let other = BoundingBox::new(700.0, 50.0, 900.0, 250.0);

    let cases = [
        (pair_set(good, other), 0.0),
        (pair_set(good, BoundingBox::new(700.0, 50.0, 700.0, 250.0)), IMAGE_WIDTH),
        (pair_set(good, BoundingBox::new(700.0, 50.0, 900.0, 50.0)), IMAGE_WIDTH),
        (
            pair_set(
                BoundingBox::new(100.0, 50.0, 100.0, 50.0),
                BoundingBox::new(700.0, 50.0, 700.0, 50.0),
            ),
            IMAGE_WIDTH,
        ),
    ];

    for (set, width) in cases {
        let err = analyze(&set, width, &params).unwrap_err();
        assert!(
            matches!(
                err,
                AnalysisError::Computation(ComputationError::DegenerateGeometry { .. })
            ),
            "unexpected error {err:?}"
        );
    }
}

#[test]
fn overflowing_centers_are_errors_not_nan() {
    let set = pair_set(
        BoundingBox::new(1.7e308, 0.0, 1.75e308, 10.0),
        BoundingBox::new(1.72e308, 0.0, 1.77e308, 10.0),
    );
    let err = analyze(&set, IMAGE_WIDTH, &SymmetryParams::default()).unwrap_err();
    assert!(
        matches!(
            err,
            AnalysisError::Computation(ComputationError::DegenerateGeometry {
                reason: DegenerateReason::Offset { .. }
            })
        ),
        "unexpected error {err:?}"
    );
}
