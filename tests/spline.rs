//! Control point generation and curve evaluation.
use approx::assert_relative_eq;
use cashrun::numeric::index_to_f32;
use cashrun::SplinePath;
use glam::Vec3;
use rstest::rstest;
use test_utils::assert_vec3_near;
use test_utils::physics::{seeded_rng, straight_path};

#[test]
fn straight_path_points_split_the_segment_evenly() {
    let path = straight_path(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 2);
    let expected = [
        Vec3::ZERO,
        Vec3::new(10.0 / 3.0, 0.0, 0.0),
        Vec3::new(20.0 / 3.0, 0.0, 0.0),
        Vec3::new(10.0, 0.0, 0.0),
    ];
    assert_eq!(path.len(), expected.len());
    for (actual, wanted) in path.points().iter().zip(expected) {
        assert_vec3_near(*actual, wanted, 1e-5);
    }
}

#[test]
fn colinear_points_evaluate_on_the_line() {
    let path = straight_path(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 2);
    assert_vec3_near(path.evaluate(1.5), Vec3::new(5.0, 0.0, 0.0), 1e-4);
}

#[rstest]
#[case::no_jitter(0, 0.0)]
#[case::small_jitter(1, 0.3)]
#[case::large_jitter(2, 4.0)]
#[case::many_points(3, 1.0)]
fn endpoints_are_exact(#[case] seed: u64, #[case] jitter: f32) {
    let start = Vec3::new(-7.0, 0.0, 2.5);
    let end = Vec3::new(6.0, 0.0, -3.0);
    let mut rng = seeded_rng(seed);
    let path = SplinePath::generate(start, end, 2 + u32::try_from(seed).unwrap_or(0), jitter, &mut rng)
        .expect("valid path");
    assert_eq!(path.evaluate(0.0), start);
    assert_eq!(path.evaluate(path.max_t()), end);
}

#[test]
fn jitter_is_perpendicular_to_travel() {
    let mut rng = seeded_rng(21);
    let path = SplinePath::generate(Vec3::ZERO, Vec3::new(0.0, 0.0, 9.0), 2, 1.0, &mut rng)
        .expect("valid path");
    for (i, point) in path.points().iter().enumerate().skip(1).take(2) {
        let along = 3.0 * index_to_f32(i);
        assert_relative_eq!(point.z, along, epsilon = 1e-5);
        assert!(point.x.abs() <= 1.0);
    }
}

#[test]
fn same_seed_same_path() {
    let build = |seed| {
        SplinePath::generate(Vec3::ZERO, Vec3::new(5.0, 0.0, 5.0), 3, 0.5, &mut seeded_rng(seed))
            .expect("valid path")
    };
    assert_eq!(build(9), build(9));
}
