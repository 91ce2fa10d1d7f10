//! In-memory article catalog and the recommender built on it

use super::Recommender;
use crate::config::ConfigError;
use crate::event_bus::RequestRecommendations;
use crate::state::{Ranking, ScoredItem};
use ordered_float::OrderedFloat;
use std::path::Path;
use std::sync::Arc;

/// Articles available for recommendation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    articles: Vec<ScoredItem>,
}

impl Catalog {
    pub fn new(articles: Vec<ScoredItem>) -> Self {
        Self { articles }
    }

    /// Parse a JSON array of articles
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self::new)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::CatalogIo {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json).map_err(|source| ConfigError::CatalogFormat {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), articles = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    pub fn articles(&self) -> &[ScoredItem] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// Scores articles by how many included topics they mention
///
/// Articles mentioning any excluded topic, or no included topic, are left
/// out of the ranking.
#[derive(Debug, Clone)]
pub struct CatalogRecommender {
    catalog: Arc<Catalog>,
}

impl CatalogRecommender {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

fn mentions(article: &ScoredItem, topic: &str) -> bool {
    let topic = topic.to_lowercase();
    let in_text = |text: &Option<String>| {
        text.as_deref()
            .is_some_and(|text| text.to_lowercase().contains(&topic))
    };
    in_text(&article.title)
        || in_text(&article.abstract_text)
        || article.keywords.iter().any(|k| k.to_lowercase() == topic)
}

impl Recommender for CatalogRecommender {
    fn recommend(&self, request: &RequestRecommendations) -> Ranking {
        let scored = self.catalog.articles().iter().filter_map(|article| {
            if request
                .excluded_topics
                .iter()
                .any(|topic| mentions(article, topic))
            {
                return None;
            }
            let matched: Vec<&str> = request
                .included_topics
                .iter()
                .filter(|topic| mentions(article, topic))
                .map(String::as_str)
                .collect();
            if matched.is_empty() {
                return None;
            }

            let mut item = article.clone();
            #[allow(clippy::cast_precision_loss)] // a handful of topics
            let score = matched.len() as f64;
            item.score = OrderedFloat(score);
            item.explanation = Some(format!("Mentions {}", matched.join(", ")));
            Some(item)
        });

        let ranking = Ranking::new(scored).with_query_id(request.included_topics.join(" "));
        tracing::debug!(
            included = ?request.included_topics,
            excluded = ?request.excluded_topics,
            hits = ranking.len(),
            "Catalog ranking"
        );
        ranking
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::from_json(
                r#"[
                    {"item_id": "1", "title": "Contextual bandits at scale", "keywords": ["bandits"]},
                    {"item_id": "2", "title": "Learning to rank with bandits", "abstract": "Ranking and privacy"},
                    {"item_id": "3", "title": "Graph neural networks"}
                ]"#,
            )
            .unwrap(),
        )
    }

    fn request(included: &[&str], excluded: &[&str]) -> RequestRecommendations {
        RequestRecommendations {
            included_topics: included.iter().map(ToString::to_string).collect(),
            excluded_topics: excluded.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_scores_by_matched_topics() {
        let recommender = CatalogRecommender::new(catalog());
        let ranking = recommender.recommend(&request(&["bandits", "ranking"], &[]));

        let ids: Vec<_> = ranking.item_ids().collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert_eq!(ranking.items()[0].score, OrderedFloat(2.0));
        assert_eq!(ranking.query_id(), Some("bandits ranking"));
        assert!(ranking.items()[0]
            .explanation
            .as_deref()
            .unwrap()
            .contains("ranking"));
    }

    #[test]
    fn test_excluded_topics_drop_articles() {
        let recommender = CatalogRecommender::new(catalog());
        let ranking = recommender.recommend(&request(&["bandits"], &["privacy"]));
        let ids: Vec<_> = ranking.item_ids().collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn test_load_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::CatalogFormat { .. }));

        let err = Catalog::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::CatalogIo { .. }));
    }

    #[test]
    fn test_load_reads_articles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, r#"[{"item_id": "1", "title": "Bandits"}]"#).unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.articles()[0].title.as_deref(), Some("Bandits"));
    }
}
