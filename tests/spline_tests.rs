use approx::assert_abs_diff_eq;
use shadesmith::spline::{ControlPoint, NEUTRAL_DEFAULT, catmull_rom, interpolate};

fn points() -> Vec<ControlPoint> {
    vec![
        ControlPoint::new(1.0, 20.0),
        ControlPoint::new(3.0, 70.0),
        ControlPoint::new(6.0, 40.0),
        ControlPoint::new(8.0, 90.0),
    ]
}

#[test]
fn no_points_yield_neutral_default() {
    let values = interpolate(&[], &[0.0, 4.0, 9.0]);
    assert_eq!(values, vec![NEUTRAL_DEFAULT; 3]);
}

#[test]
fn single_point_is_constant() {
    let values = interpolate(&[ControlPoint::new(4.0, 33.0)], &[0.0, 4.0, 9.0]);
    assert_eq!(values, vec![33.0; 3]);
}

#[test]
fn passes_through_every_control_point() {
    let pts = points();
    let targets: Vec<f32> = pts.iter().map(|p| p.x).collect();
    let values = interpolate(&pts, &targets);
    for (p, v) in pts.iter().zip(values) {
        assert_eq!(v, p.y, "spline must hit control point at x={}", p.x);
    }
}

#[test]
fn clamps_outside_span() {
    let values = interpolate(&points(), &[-3.0, 0.0, 9.0, 20.0]);
    assert_eq!(values, vec![20.0, 20.0, 90.0, 90.0]);
}

#[test]
fn interior_uses_catmull_rom_with_neighbours() {
    let pts = points();
    let values = interpolate(&pts, &[4.5]);
    // Segment 3..6 with neighbours at x=1 and x=8
    let expected = catmull_rom(20.0, 70.0, 40.0, 90.0, 0.5);
    assert_abs_diff_eq!(values[0], expected, epsilon = 1e-4);
}

#[test]
fn first_segment_clamps_previous_neighbour() {
    let pts = points();
    let values = interpolate(&pts, &[2.0]);
    let expected = catmull_rom(20.0, 20.0, 70.0, 40.0, 0.5);
    assert_abs_diff_eq!(values[0], expected, epsilon = 1e-4);
}

#[test]
fn unsorted_input_is_sorted_first() {
    let mut shuffled = points();
    shuffled.reverse();
    let targets = [1.5, 2.5, 5.0, 7.0];
    assert_eq!(interpolate(&shuffled, &targets), interpolate(&points(), &targets));
}

#[test]
fn duplicate_x_does_not_divide_by_zero() {
    let pts = [
        ControlPoint::new(2.0, 10.0),
        ControlPoint::new(2.0, 80.0),
        ControlPoint::new(5.0, 40.0),
    ];
    let values = interpolate(&pts, &[2.0, 3.0, 4.0]);
    assert!(values.iter().all(|v| v.is_finite()));
    assert_eq!(values[0], 10.0);
}

#[test]
fn fractional_targets_are_supported() {
    let pts = [ControlPoint::new(0.0, 0.0), ControlPoint::new(1.0, 100.0)];
    let values = interpolate(&pts, &[0.25, 0.5, 0.75]);
    assert!(values[0] < values[1] && values[1] < values[2]);
    assert_abs_diff_eq!(values[1], 50.0, epsilon = 1e-4);
}
