//! Property-based tests for flags and recommendation overlap

use super::*;
use proptest::prelude::*;
use std::collections::HashSet;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_flags() -> impl Strategy<Value = UpdateFlags> {
    (any::<[bool; 6]>(), any::<[bool; 5]>()).prop_map(|(turn, other)| UpdateFlags {
        updated_preferences: turn[0],
        confirmation_received: turn[1],
        agent_should_respond: turn[2],
        style_changed: turn[3],
        should_reset_options: turn[4],
        unresolved_option: turn[5],
        confirmation_required: other[0],
        new_recommendations: other[1],
        has_preferences: other[2],
        new_discussion_topics: other[3],
        new_topic_suggestions: other[4],
    })
}

fn arb_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z]{1,4}", 1..10).prop_map(|ids| ids.into_iter().collect())
}

fn ranking_of(ids: &[String], scores: &[f64]) -> Ranking {
    Ranking::new(
        ids.iter()
            .zip(scores.iter().chain(std::iter::repeat(&0.0)))
            .map(|(id, score)| ScoredItem::new(id.clone(), *score)),
    )
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn flag_reset_is_idempotent(flags in arb_flags()) {
        let mut once = flags;
        once.reset();
        let mut twice = once;
        twice.reset();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn identical_id_sets_overlap_fully(
        ids in arb_ids(),
        scores in prop::collection::vec(0.0f64..1.0, 10),
    ) {
        let mut rec = Recommendation::default();
        rec.set(ranking_of(&ids, &scores));
        let mut reversed = ids.clone();
        reversed.reverse();
        rec.set(ranking_of(&reversed, &scores));

        prop_assert!((rec.overlap() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn disjoint_id_sets_do_not_overlap(previous in arb_ids(), current in arb_ids()) {
        let current: Vec<String> = current.into_iter().map(|id| format!("new-{id}")).collect();
        let mut rec = Recommendation::default();
        rec.set(ranking_of(&previous, &[]));
        rec.set(ranking_of(&current, &[]));

        prop_assert!(rec.overlap().abs() < f64::EPSILON);
    }

    #[test]
    fn overlap_is_a_share(previous in arb_ids(), current in arb_ids()) {
        let mut rec = Recommendation::default();
        rec.set(ranking_of(&previous, &[]));
        rec.set(ranking_of(&current, &[]));

        let overlap = rec.overlap();
        prop_assert!((0.0..=1.0).contains(&overlap));

        let previous: HashSet<_> = previous.iter().collect();
        let contained = current.iter().all(|id| previous.contains(id));
        prop_assert_eq!(contained, (overlap - 1.0).abs() < f64::EPSILON);
    }
}
