//! Scored items, rankings and the current/previous recommendation pair

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A recommendable article with its retrieval score
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScoredItem {
    pub item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "abstract", default, skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub score: OrderedFloat<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl ScoredItem {
    pub fn new(item_id: impl Into<String>, score: f64) -> Self {
        Self {
            item_id: item_id.into(),
            score: OrderedFloat(score),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }
}

/// Items ordered by descending score
///
/// Ties keep the order the provider returned them in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ranking {
    query_id: Option<String>,
    items: Vec<ScoredItem>,
}

impl Ranking {
    pub fn new(items: impl IntoIterator<Item = ScoredItem>) -> Self {
        let mut items: Vec<_> = items.into_iter().collect();
        items.sort_by(|a, b| b.score.cmp(&a.score));
        Self {
            query_id: None,
            items,
        }
    }

    #[must_use]
    pub fn with_query_id(mut self, query_id: impl Into<String>) -> Self {
        self.query_id = Some(query_id.into());
        self
    }

    pub fn query_id(&self) -> Option<&str> {
        self.query_id.as_deref()
    }

    pub fn items(&self) -> &[ScoredItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().map(|item| item.item_id.as_str())
    }

    pub fn get(&self, item_id: &str) -> Option<&ScoredItem> {
        self.items.iter().find(|item| item.item_id == item_id)
    }

    /// The `k` highest scored items
    #[must_use]
    pub fn top_k(&self, k: usize) -> Ranking {
        Ranking {
            query_id: self.query_id.clone(),
            items: self.items.iter().take(k).cloned().collect(),
        }
    }
}

/// The stored ranking and the one it replaced
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Recommendation {
    current: Ranking,
    previous: Ranking,
}

impl Recommendation {
    pub fn current(&self) -> &Ranking {
        &self.current
    }

    pub fn previous(&self) -> &Ranking {
        &self.previous
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Store `ranking`, shifting the current one into `previous`
    pub fn set(&mut self, ranking: Ranking) {
        self.previous = std::mem::replace(&mut self.current, ranking);
    }

    pub fn clear(&mut self) {
        self.set(Ranking::default());
    }

    /// Share of current item ids that were also in the previous ranking
    ///
    /// Zero when the current ranking is empty.
    pub fn overlap(&self) -> f64 {
        let current: HashSet<&str> = self.current.item_ids().collect();
        if current.is_empty() {
            return 0.0;
        }
        let previous: HashSet<&str> = self.previous.item_ids().collect();
        let shared = current.intersection(&previous).count();

        #[allow(clippy::cast_precision_loss)] // rankings hold a handful of items
        let overlap = shared as f64 / current.len() as f64;
        overlap
    }
}
