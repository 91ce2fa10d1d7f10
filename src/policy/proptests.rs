//! Property-based tests for option merging

use super::*;
use crate::dialogue::{slots, Annotation, AnnotationValue, SystemIntent};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_option() -> impl Strategy<Value = DialogueAct> {
    "[a-z]{1,6}".prop_map(|topic| DialogueAct::new(UserIntent::RevealPreference).with(slots::TOPIC, topic))
}

fn arb_menu() -> impl Strategy<Value = DialogueAct> {
    prop::collection::vec(arb_option(), 0..4).prop_map(|options| {
        DialogueAct::with_annotations(SystemIntent::ProvideOptions, options.into_iter().map(Annotation::option))
    })
}

fn arb_plain_act() -> impl Strategy<Value = DialogueAct> {
    prop::sample::select(vec![
        SystemIntent::Elicit,
        SystemIntent::Recommend,
        SystemIntent::CantHelp,
        SystemIntent::SuggestTopics,
        SystemIntent::InformHelp,
    ])
    .prop_map(DialogueAct::new)
}

fn arb_acts() -> impl Strategy<Value = Vec<DialogueAct>> {
    prop::collection::vec(prop_oneof![arb_plain_act(), arb_menu()], 0..8)
}

fn menu_count(acts: &[DialogueAct]) -> usize {
    acts.iter().filter(|a| a.is(SystemIntent::ProvideOptions)).count()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn option_ids_are_positional(acts in arb_acts(), reset in any::<bool>()) {
        let expected: Vec<_> = acts
            .iter()
            .filter(|a| a.is(SystemIntent::ProvideOptions))
            .flat_map(DialogueAct::options)
            .filter_map(|o| o.text(slots::TOPIC).map(str::to_string))
            .collect();

        let merged = merge_options(acts, reset);
        let options: Vec<_> = merged.iter().flat_map(DialogueAct::options).collect();

        let topics: Vec<_> = options.iter().filter_map(|o| o.text(slots::TOPIC)).collect();
        prop_assert_eq!(topics, expected.iter().map(String::as_str).collect::<Vec<_>>());
        for (position, option) in options.iter().enumerate() {
            prop_assert_eq!(option.value(slots::ID).and_then(AnnotationValue::as_index), Some(position));
        }
    }

    #[test]
    fn at_most_one_menu_and_it_comes_last(acts in arb_acts(), reset in any::<bool>()) {
        let had_menu = menu_count(&acts) > 0;
        let merged = merge_options(acts, reset);

        let count = menu_count(&merged);
        prop_assert!(count <= 1);
        prop_assert_eq!(count == 1, had_menu || reset);
        if count == 1 {
            prop_assert!(merged.last().is_some_and(|a| a.is(SystemIntent::ProvideOptions)));
        }
    }

    #[test]
    fn other_acts_keep_their_order(acts in arb_acts(), reset in any::<bool>()) {
        let plain: Vec<_> = acts.iter().filter(|a| !a.is(SystemIntent::ProvideOptions)).cloned().collect();
        let merged = merge_options(acts, reset);
        let kept: Vec<_> = merged.into_iter().filter(|a| !a.is(SystemIntent::ProvideOptions)).collect();
        prop_assert_eq!(kept, plain);
    }

    #[test]
    fn merging_is_idempotent(acts in arb_acts(), reset in any::<bool>()) {
        let once = merge_options(acts, reset);
        let twice = merge_options(once.clone(), reset);
        prop_assert_eq!(twice, once);
    }
}
