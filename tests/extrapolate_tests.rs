use approx::assert_abs_diff_eq;
use shadesmith::color::Channel;
use shadesmith::extrapolate::{
    ExtrapolationMode, anchor_extrapolate, extrapolate_with_fallback, linear_extrapolate,
};
use shadesmith::scale::ShadeScale;
use shadesmith::spline::{ControlPoint, catmull_rom, interpolate};

fn targets() -> Vec<f32> {
    (0..10).map(|i| i as f32).collect()
}

fn two_points(a: f32, b: f32) -> Vec<ControlPoint> {
    vec![ControlPoint::new(2.0, a), ControlPoint::new(7.0, b)]
}

#[test]
fn linear_extends_boundary_slopes() {
    let pts = vec![
        ControlPoint::new(2.0, 40.0),
        ControlPoint::new(4.0, 50.0),
        ControlPoint::new(6.0, 80.0),
    ];
    let values = linear_extrapolate(&pts, &targets());
    // left slope 5/step, right slope 15/step
    assert_abs_diff_eq!(values[0], 30.0, epsilon = 1e-4);
    assert_abs_diff_eq!(values[1], 35.0, epsilon = 1e-4);
    assert_abs_diff_eq!(values[9], 125.0, epsilon = 1e-4);
    assert_eq!(values[4], 50.0);
}

#[test]
fn linear_matches_spline_inside_span() {
    let pts = two_points(50.0, 20.0);
    let linear = linear_extrapolate(&pts, &targets());
    let spline = interpolate(&pts, &targets());
    for i in 2..=7 {
        assert_eq!(linear[i], spline[i]);
    }
}

#[test]
fn linear_single_point_is_constant() {
    let values = linear_extrapolate(&[ControlPoint::new(3.0, 12.0)], &targets());
    assert!(values.iter().all(|&v| v == 12.0));
}

#[test]
fn linear_can_leave_channel_range() {
    let values = linear_extrapolate(&two_points(10.0, 90.0), &targets());
    assert!(values[0] < 0.0);
    assert!(values[9] > 100.0);
}

#[test]
fn anchor_value_bends_toward_white_and_black() {
    let scale = ShadeScale::default();
    let values = anchor_extrapolate(
        &two_points(80.0, 30.0),
        &targets(),
        Channel::V,
        &scale,
        ExtrapolationMode::Functional,
    );
    assert!(values[0] > 80.0 && values[0] <= 100.0);
    assert!(values[9] < 30.0 && values[9] >= 0.0);
}

#[test]
fn anchor_interior_uses_virtual_neighbours() {
    let scale = ShadeScale::default();
    let values = anchor_extrapolate(
        &two_points(50.0, 20.0),
        &targets(),
        Channel::S,
        &scale,
        ExtrapolationMode::Functional,
    );
    // White anchor S=0 before index 2, functional black anchor S=0 after index 7
    for i in 3..=6 {
        let t = (i as f32 - 2.0) / 5.0;
        assert_abs_diff_eq!(values[i], catmull_rom(0.0, 50.0, 20.0, 0.0, t), epsilon = 1e-3);
    }
}

#[test]
fn saturation_black_anchor_depends_on_mode() {
    let scale = ShadeScale::default();
    let pts = two_points(50.0, 20.0);
    let run = |mode| anchor_extrapolate(&pts, &targets(), Channel::S, &scale, mode);

    let functional = run(ExtrapolationMode::Functional);
    let saturated = run(ExtrapolationMode::FunctionalSaturated);
    let expressive = run(ExtrapolationMode::Expressive);

    assert!(functional[9] < 20.0);
    assert!(saturated[9] > 20.0);
    // Expressive black anchor repeats the last real saturation, so it sits
    // between the natural and saturated pulls
    assert!(expressive[9] > functional[9] && expressive[9] < saturated[9]);
    assert!((expressive[9] - 20.0).abs() < 2.0);
    // White end is mode independent
    assert_eq!(functional[0], saturated[0]);
}

#[test]
fn hue_anchor_holds_nearest_hue() {
    let scale = ShadeScale::default();
    let values = anchor_extrapolate(
        &two_points(200.0, 200.0),
        &targets(),
        Channel::H,
        &scale,
        ExtrapolationMode::Functional,
    );
    for v in values {
        assert_abs_diff_eq!(v, 200.0, epsilon = 1e-3);
    }
}

#[test]
fn no_anchor_injected_when_span_covers_ramp() {
    let scale = ShadeScale::default();
    let pts = vec![ControlPoint::new(0.0, 90.0), ControlPoint::new(9.0, 10.0)];
    let anchored = anchor_extrapolate(
        &pts,
        &targets(),
        Channel::V,
        &scale,
        ExtrapolationMode::Functional,
    );
    assert_eq!(anchored, interpolate(&pts, &targets()));
}

#[test]
fn hue_never_reports_anchor() {
    let scale = ShadeScale::default();
    for mode in ExtrapolationMode::ALL {
        let result =
            extrapolate_with_fallback(&two_points(10.0, 40.0), &targets(), Channel::H, &scale, mode);
        assert!(!result.anchor_used, "hue anchored in {mode}");
        assert_eq!(result.values, linear_extrapolate(&two_points(10.0, 40.0), &targets()));
    }
}

#[test]
fn functional_modes_anchor_saturation_and_value() {
    let scale = ShadeScale::default();
    for mode in [
        ExtrapolationMode::Functional,
        ExtrapolationMode::FunctionalSaturated,
    ] {
        for channel in [Channel::S, Channel::V] {
            let result = extrapolate_with_fallback(
                &[ControlPoint::new(4.0, 60.0)],
                &targets(),
                channel,
                &scale,
                mode,
            );
            assert!(result.anchor_used, "{channel} in {mode}");
        }
    }
}

#[test]
fn expressive_clamps_into_range() {
    let scale = ShadeScale::default();
    for channel in [Channel::S, Channel::V] {
        let result = extrapolate_with_fallback(
            &two_points(10.0, 95.0),
            &targets(),
            channel,
            &scale,
            ExtrapolationMode::Expressive,
        );
        assert!(!result.anchor_used);
        assert!(result.values.iter().all(|v| (0.0..=100.0).contains(v)));
        assert_eq!(result.values[0], 0.0);
        assert_eq!(result.values[9], 100.0);
    }
}

#[test]
fn mode_parsing_fails_fast_on_unknown() {
    assert_eq!(
        "functional-saturated".parse::<ExtrapolationMode>(),
        Ok(ExtrapolationMode::FunctionalSaturated)
    );
    let err = "vivid".parse::<ExtrapolationMode>().unwrap_err();
    assert!(err.to_string().contains("vivid"));
}

#[test]
fn black_anchor_skipped_when_not_past_last_point() {
    // Labels past 1000 put the black index at 3.0, inside the ramp
    let scale = ShadeScale::new(vec![100, 400, 700, 1000, 1300]).unwrap();
    let targets = scale.targets();

    let on_last = vec![ControlPoint::new(0.0, 90.0), ControlPoint::new(3.0, 40.0)];
    let values =
        anchor_extrapolate(&on_last, &targets, Channel::V, &scale, ExtrapolationMode::Functional);
    assert_eq!(values, interpolate(&on_last, &targets));
    assert_eq!(values[4], 40.0);

    let past_black = vec![ControlPoint::new(0.0, 90.0), ControlPoint::new(3.5, 30.0)];
    let values =
        anchor_extrapolate(&past_black, &targets, Channel::V, &scale, ExtrapolationMode::Functional);
    assert_eq!(values, interpolate(&past_black, &targets));
}

#[test]
fn anchors_land_on_end_shades_for_full_range_scale() {
    // Labels 0 and 1000 put white and black exactly on the end shades
    let scale = ShadeScale::new(vec![0, 250, 500, 750, 1000]).unwrap();
    let targets = scale.targets();
    let pts = vec![ControlPoint::new(1.0, 80.0), ControlPoint::new(3.0, 30.0)];
    let values = anchor_extrapolate(&pts, &targets, Channel::V, &scale, ExtrapolationMode::Functional);
    assert_eq!(values[0], 100.0);
    assert_eq!(values[1], 80.0);
    assert_eq!(values[4], 0.0);
}
