use std::f64::consts::{PI, TAU};

use doughnut_chart::api::{HitTester, plan_layer, stroke_intervals};
use doughnut_chart::core::{
    Point, RingRadii, StrokeInterval, arc_mid_point, arc_point, normalize_start_angle,
    point_in_annulus,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn intervals_tile_the_circle_in_order(
        values in prop::collection::vec(0.001f64..1_000.0, 1..40)
    ) {
        let intervals = stroke_intervals(&values);
        prop_assert_eq!(intervals.len(), values.len());
        prop_assert!(intervals[0].start.abs() <= 1e-12);
        prop_assert!((intervals[intervals.len() - 1].end - 1.0).abs() <= 1e-9);
        for pair in intervals.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
        }
        for interval in &intervals {
            prop_assert!(interval.start <= interval.end);
            prop_assert!(interval.end <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn plan_counts_match_target_slice_count(
        previous in 0usize..30,
        values in prop::collection::vec(0.0f64..100.0, 0..30)
    ) {
        let plan = plan_layer(previous, &values);
        let total: f64 = values.iter().sum();
        let expected = if total > 0.0 { values.len() } else { 0 };

        prop_assert_eq!(plan.effective_count, expected);
        prop_assert_eq!(previous + plan.to_create - plan.to_remove, expected);
        prop_assert!(plan.to_create == 0 || plan.to_remove == 0);
        prop_assert_eq!(plan.intervals.len(), expected);
    }

    #[test]
    fn start_angle_normalization_stays_in_range_and_keeps_direction(
        angle in -1_000.0f64..1_000.0
    ) {
        let normalized = normalize_start_angle(angle);
        prop_assert!((-PI..PI).contains(&normalized));

        let turns = (angle - normalized) / TAU;
        prop_assert!((turns - turns.round()).abs() <= 1e-6);
    }

    #[test]
    fn start_angle_normalization_accepts_any_finite_angle(
        angle in prop::num::f64::NORMAL | prop::num::f64::ZERO | prop::num::f64::SUBNORMAL
    ) {
        let normalized = normalize_start_angle(angle);
        prop_assert!((-PI..PI).contains(&normalized));
    }

    #[test]
    fn annulus_membership_rotates_with_start_angle(
        rotation in -3.1f64..3.1,
        interval_start in 0.0f64..0.5,
        interval_span in 0.05f64..0.5,
        fraction in 0.0f64..1.0,
        distance in 1.0f64..200.0
    ) {
        let interval = StrokeInterval::new(interval_start, interval_start + interval_span);
        prop_assume!((fraction - interval.start).abs() > 1e-6);
        prop_assume!((fraction - interval.end).abs() > 1e-6);
        prop_assume!(fraction > 1e-6 && fraction < 1.0 - 1e-6);
        prop_assume!((distance - 50.0).abs() > 1e-6 && (distance - 100.0).abs() > 1e-6);

        let center = Point::new(200.0, 200.0);
        let unrotated = arc_point(center, distance, fraction, 0.0);
        let rotated = arc_point(center, distance, fraction, rotation);

        let before = point_in_annulus(unrotated, center, 50.0, 100.0, 0.0, interval);
        let after = point_in_annulus(rotated, center, 50.0, 100.0, rotation, interval);
        prop_assert_eq!(before, after);
        prop_assert_eq!(
            before,
            fraction > interval.start
                && fraction < interval.end
                && distance > 50.0
                && distance < 100.0
        );
    }

    #[test]
    fn hit_layer_finds_the_slice_containing_a_mid_point(
        values in prop::collection::vec(1.0f64..50.0, 1..12),
        start_angle in -3.1f64..3.1
    ) {
        let center = Point::new(150.0, 150.0);
        let radii = RingRadii::new(40.0, 90.0).expect("valid radii");
        let intervals = stroke_intervals(&values);
        let tester = HitTester::new(center, start_angle);

        for (index, interval) in intervals.iter().enumerate() {
            let point = arc_mid_point(center, 65.0, *interval, start_angle);
            prop_assert_eq!(
                tester.hit_layer(point, radii, intervals.iter().copied()),
                Some(index)
            );
        }
    }
}
