//! Included and excluded topic preferences

use crate::dialogue::{slots, Annotation, AnnotationValue};

/// What a remove-preference toggle did to a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    RemovedExcluded,
    RemovedIncluded,
    Excluded,
}

/// Two topic lists, each unique by topic value
///
/// Included topics are stored under the `topic` slot and excluded ones under
/// `exclude_topic`, whatever slot they arrived with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopicPreferences {
    included: Vec<Annotation>,
    excluded: Vec<Annotation>,
}

impl TopicPreferences {
    pub fn included(&self) -> &[Annotation] {
        &self.included
    }

    pub fn excluded(&self) -> &[Annotation] {
        &self.excluded
    }

    /// Included then excluded annotations
    pub fn all(&self) -> impl Iterator<Item = &Annotation> + '_ {
        self.included.iter().chain(&self.excluded)
    }

    pub fn included_values(&self) -> Vec<String> {
        text_values(&self.included)
    }

    pub fn excluded_values(&self) -> Vec<String> {
        text_values(&self.excluded)
    }

    pub fn is_empty(&self) -> bool {
        self.included.is_empty() && self.excluded.is_empty()
    }

    pub fn is_included(&self, value: &AnnotationValue) -> bool {
        self.included.iter().any(|a| a.value == *value)
    }

    pub fn is_excluded(&self, value: &AnnotationValue) -> bool {
        self.excluded.iter().any(|a| a.value == *value)
    }

    /// Add to the included list; returns whether anything changed
    pub fn include(&mut self, value: &AnnotationValue) -> bool {
        if self.is_included(value) {
            return false;
        }
        self.included.push(Annotation::new(slots::TOPIC, value.clone()));
        true
    }

    /// Add to the excluded list; returns whether anything changed
    pub fn exclude(&mut self, value: &AnnotationValue) -> bool {
        if self.is_excluded(value) {
            return false;
        }
        self.excluded
            .push(Annotation::new(slots::EXCLUDE_TOPIC, value.clone()));
        true
    }

    /// Three-way toggle used by remove-preference
    ///
    /// An excluded topic is un-excluded, an included one is dropped and an
    /// unknown one becomes excluded.
    pub fn toggle(&mut self, value: &AnnotationValue) -> Toggle {
        if self.is_excluded(value) {
            self.excluded.retain(|a| a.value != *value);
            return Toggle::RemovedExcluded;
        }
        if self.is_included(value) {
            self.included.retain(|a| a.value != *value);
            return Toggle::RemovedIncluded;
        }
        self.excluded
            .push(Annotation::new(slots::EXCLUDE_TOPIC, value.clone()));
        Toggle::Excluded
    }

    pub fn clear(&mut self) {
        self.included.clear();
        self.excluded.clear();
    }
}

fn text_values(annotations: &[Annotation]) -> Vec<String> {
    annotations
        .iter()
        .filter_map(|a| a.value.as_text().map(str::to_string))
        .collect()
}
