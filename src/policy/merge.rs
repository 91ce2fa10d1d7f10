//! Option merging
//!
//! Every `provide_options` act produced during a turn is folded into a single
//! menu appended at the end. Options get their positional `id` here; it is
//! the only handle `select_option` resolves, and it is valid for one turn.

use crate::dialogue::{slots, AnnotationValue, DialogueAct, SystemIntent};

pub fn merge_options(acts: Vec<DialogueAct>, should_reset_options: bool) -> Vec<DialogueAct> {
    let (menus, mut merged): (Vec<_>, Vec<_>) = acts
        .into_iter()
        .partition(|act| act.is(SystemIntent::ProvideOptions));

    if menus.is_empty() {
        if should_reset_options {
            // clears the stale menu on the client
            merged.push(DialogueAct::new(SystemIntent::ProvideOptions));
        }
        return merged;
    }

    let options = menus
        .into_iter()
        .flat_map(|menu| menu.annotations)
        .filter(|annotation| annotation.slot == slots::OPTION)
        .enumerate()
        .map(|(id, mut annotation)| {
            if let AnnotationValue::Act(option) = &mut annotation.value {
                option.set(slots::ID, id);
            }
            annotation
        });

    merged.push(DialogueAct::with_annotations(SystemIntent::ProvideOptions, options));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::{Annotation, UserIntent};

    fn menu(topics: &[&str]) -> DialogueAct {
        DialogueAct::with_annotations(
            SystemIntent::ProvideOptions,
            topics.iter().map(|t| {
                Annotation::option(DialogueAct::new(UserIntent::RevealPreference).with(slots::TOPIC, *t))
            }),
        )
    }

    fn ids(act: &DialogueAct) -> Vec<usize> {
        act.options()
            .filter_map(|o| o.value(slots::ID).and_then(AnnotationValue::as_index))
            .collect()
    }

    #[test]
    fn test_scattered_menus_become_one_at_the_end() {
        let acts = vec![
            menu(&["a", "b"]),
            DialogueAct::new(SystemIntent::Recommend),
            menu(&["c"]),
            DialogueAct::new(SystemIntent::Elicit),
        ];

        let merged = merge_options(acts, false);
        assert_eq!(merged.len(), 3);
        assert!(merged[0].is(SystemIntent::Recommend));
        assert!(merged[1].is(SystemIntent::Elicit));
        assert_eq!(ids(&merged[2]), vec![0, 1, 2]);

        let topics: Vec<_> = merged[2].options().filter_map(|o| o.text(slots::TOPIC)).collect();
        assert_eq!(topics, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_reset_without_menus_adds_empty_menu() {
        let acts = vec![DialogueAct::new(SystemIntent::CantHelp)];
        assert_eq!(merge_options(acts.clone(), false), acts);

        let merged = merge_options(acts, true);
        assert_eq!(merged.len(), 2);
        assert!(merged[1].is(SystemIntent::ProvideOptions));
        assert!(merged[1].annotations.is_empty());
    }

    #[test]
    fn test_reset_with_menus_keeps_the_menu() {
        let merged = merge_options(vec![menu(&["a"])], true);
        assert_eq!(merged.len(), 1);
        assert_eq!(ids(&merged[0]), vec![0]);
    }
}
