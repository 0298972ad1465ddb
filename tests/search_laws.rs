//! Property-based tests for the biased searches.
//!
//! Every search must return exactly what `slice::partition_point` returns;
//! only the number of probes may differ.

use flat_containers::compare::Less;
use flat_containers::search::{
    LowerBounds, PartitionPoints, lower_bound_biased, lower_bound_hinted, partition_point_biased,
    partition_point_hinted, upper_bound_biased, upper_bound_hinted,
};
use proptest::prelude::*;

fn sorted(mut values: Vec<i32>) -> Vec<i32> {
    values.sort_unstable();
    values
}

// =============================================================================
// Biased Agreement Law
// Description: The biased search agrees with the standard partition point
// =============================================================================

proptest! {
    #[test]
    fn prop_biased_agrees_with_std(
        values in prop::collection::vec(-50..50i32, 0..300),
        pivot in -60..60i32
    ) {
        let values = sorted(values);

        prop_assert_eq!(
            partition_point_biased(&values, |value| *value < pivot),
            values.partition_point(|value| *value < pivot)
        );
        prop_assert_eq!(
            lower_bound_biased(&values, &pivot, &Less),
            values.partition_point(|value| *value < pivot)
        );
        prop_assert_eq!(
            upper_bound_biased(&values, &pivot, &Less),
            values.partition_point(|value| *value <= pivot)
        );
    }
}

proptest! {
    #[test]
    fn prop_biased_finds_every_split(len in 0..2000usize, split_seed in any::<usize>()) {
        let split = if len == 0 { 0 } else { split_seed % (len + 1) };
        let values: Vec<usize> = (0..len).collect();

        prop_assert_eq!(partition_point_biased(&values, |value| *value < split), split);
    }
}

// =============================================================================
// Hint Independence Law
// Description: The hinted search returns the same answer for every hint
// =============================================================================

proptest! {
    #[test]
    fn prop_hinted_agrees_with_unhinted(
        values in prop::collection::vec(-50..50i32, 0..300),
        pivot in -60..60i32,
        hint in 0..400usize
    ) {
        let values = sorted(values);

        prop_assert_eq!(
            partition_point_hinted(&values, hint, |value| *value < pivot),
            partition_point_biased(&values, |value| *value < pivot)
        );
        prop_assert_eq!(
            lower_bound_hinted(&values, hint, &pivot, &Less),
            lower_bound_biased(&values, &pivot, &Less)
        );
        prop_assert_eq!(
            upper_bound_hinted(&values, hint, &pivot, &Less),
            upper_bound_biased(&values, &pivot, &Less)
        );
    }
}

// =============================================================================
// Sentinel Law
// Description: A series of non-decreasing queries answered by one
// PartitionPoints agrees with independent searches
// =============================================================================

proptest! {
    #[test]
    fn prop_partition_points_agree_with_std(
        values in prop::collection::vec(-1000..1000i32, 0..500),
        queries in prop::collection::vec(-1100..1100i32, 0..60)
    ) {
        let values = sorted(values);
        let queries = sorted(queries);

        let mut points = PartitionPoints::new(values.len());
        let mut bounds = LowerBounds::new(&values, &Less);
        for query in queries {
            let expected = values.partition_point(|value| *value < query);
            prop_assert_eq!(points.next(&values, |value| *value < query), expected);
            prop_assert_eq!(bounds.next(&query), expected);
        }
    }
}
