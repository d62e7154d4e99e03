use super::*;

#[test]
fn linear_tween_interpolates_and_hits_endpoints() {
    let t = Tween::linear(320.0, 7920.0);
    assert_eq!(t.value_at(0.0), 320.0);
    assert_eq!(t.value_at(1.0), 7920.0);
    assert!((t.value_at(0.5) - 4120.0).abs() < 1e-9);
}

#[test]
fn progress_outside_range_is_clamped() {
    let t = Tween::linear(10.0, 20.0);
    assert_eq!(t.value_at(-1.0), 10.0);
    assert_eq!(t.value_at(2.0), 20.0);
}

#[test]
fn eased_tween_follows_curve() {
    let t = Tween {
        from: 0.0,
        to: 100.0,
        ease: Ease::InQuad,
    };
    assert!((t.value_at(0.5) - 25.0).abs() < 1e-9);
}
