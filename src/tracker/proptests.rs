//! Property-based tests for the tracker's preference handling

use super::*;
use proptest::prelude::*;

fn act(intent: UserIntent, slot: &str, topic: &str) -> Action {
    Action::Act(DialogueAct::new(intent).with(slot, topic))
}

fn arb_topics(prefix: &'static str) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,6}", 0..5)
        .prop_map(move |topics| topics.into_iter().map(|t| format!("{prefix}{t}")).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Revealing a fresh topic and then removing it restores the preferences
    #[test]
    fn reveal_then_remove_restores_preferences(
        included in arb_topics("in-"),
        excluded in arb_topics("ex-"),
        fresh in "[a-z]{1,6}",
        style in prop_oneof![Just(Style::Default), Just(Style::Involved)],
    ) {
        let bus = EventBus::new();
        let mut tracker = DialogueStateTracker::new(style, DEFAULT_TOP_K);

        let setup: Vec<Action> = included
            .iter()
            .map(|t| act(UserIntent::RevealPreference, slots::TOPIC, t))
            .chain(excluded.iter().map(|t| act(UserIntent::RevealPreference, slots::EXCLUDE_TOPIC, t)))
            .collect();
        tracker.process_user_actions(setup, &bus).unwrap();
        let before = tracker.state().preferences().clone();

        let fresh = format!("fresh-{fresh}");
        tracker
            .process_user_actions(vec![act(UserIntent::RevealPreference, slots::TOPIC, &fresh)], &bus)
            .unwrap();
        prop_assert!(tracker.state().flags().updated_preferences);

        tracker
            .process_user_actions(vec![act(UserIntent::RemovePreference, slots::EXCLUDE_TOPIC, &fresh)], &bus)
            .unwrap();
        prop_assert_eq!(tracker.state().preferences(), &before);
    }

    /// Included and excluded lists never hold the same value twice
    #[test]
    fn preferences_stay_unique(
        reveals in prop::collection::vec("[a-c]", 0..12),
        removals in prop::collection::vec("[a-c]", 0..12),
    ) {
        let bus = EventBus::new();
        let mut tracker = DialogueStateTracker::default();

        for (reveal, remove) in reveals.iter().zip(removals.iter().chain(std::iter::repeat(&String::new()))) {
            let mut actions = vec![act(UserIntent::RevealPreference, slots::TOPIC, reveal)];
            if !remove.is_empty() {
                actions.push(act(UserIntent::RemovePreference, slots::EXCLUDE_TOPIC, remove));
            }
            tracker.process_user_actions(actions, &bus).unwrap();
        }

        let preferences = tracker.state().preferences();
        for values in [preferences.included_values(), preferences.excluded_values()] {
            let mut deduped = values.clone();
            deduped.sort();
            deduped.dedup();
            prop_assert_eq!(deduped.len(), values.len());
        }
    }
}
