//! Resource providers
//!
//! Recommenders and topic suggesters answer the bus's resource requests.
//! They are wired per conversation with `register_with`, which installs the
//! provider as the responder for its request kind.

mod catalog;
mod suggester;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::{Catalog, CatalogRecommender};
pub use suggester::KeywordTopicSuggester;

use crate::dialogue::Annotation;
use crate::event_bus::{EventBus, RequestRecommendations, RequestSuggestions};
use crate::state::Ranking;
use std::sync::Arc;

/// Produces a ranking for the current preferences
pub trait Recommender: Send + Sync + 'static {
    fn recommend(&self, request: &RequestRecommendations) -> Ranking;

    fn register_with(self, bus: &mut EventBus)
    where
        Self: Sized,
    {
        tracing::info!(
            provider = std::any::type_name::<Self>(),
            "Wiring recommender"
        );
        bus.register_responder(move |request: &RequestRecommendations| {
            Some(self.recommend(request))
        });
    }
}

/// Proposes new topics related to the current recommendation
pub trait TopicSuggester: Send + Sync + 'static {
    fn suggest(&self, request: &RequestSuggestions) -> Vec<Annotation>;

    fn register_with(self, bus: &mut EventBus)
    where
        Self: Sized,
    {
        tracing::info!(
            provider = std::any::type_name::<Self>(),
            "Wiring topic suggester"
        );
        bus.register_responder(move |request: &RequestSuggestions| Some(self.suggest(request)));
    }
}

// ============================================================================
// Arc implementations for shared providers
// ============================================================================

impl<T: Recommender + ?Sized> Recommender for Arc<T> {
    fn recommend(&self, request: &RequestRecommendations) -> Ranking {
        (**self).recommend(request)
    }
}

impl<T: TopicSuggester + ?Sized> TopicSuggester for Arc<T> {
    fn suggest(&self, request: &RequestSuggestions) -> Vec<Annotation> {
        (**self).suggest(request)
    }
}
