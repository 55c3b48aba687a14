//! Portfolio domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::view_stats::ViewStats;
use crate::errors::{Error, Result, ValidationError};

/// Domain model representing a portfolio document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub user_id: String,
    pub views: ViewStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for creating a new portfolio.
///
/// Missing fields deserialize to empty strings and are rejected by `validate`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct NewPortfolio {
    pub title: String,
    pub description: String,
    pub content: String,
    pub user_id: String,
}

/// Partial update; absent or empty fields keep their stored value.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
}

impl NewPortfolio {
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("content", &self.content),
            ("userId", &self.user_id),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Validation(ValidationError::MissingField(
                    field.to_string(),
                )));
            }
        }
        Ok(())
    }
}

impl Portfolio {
    /// Merges `update` into the document and stamps `updated_at`.
    pub fn apply_update(&mut self, update: PortfolioUpdate, now: DateTime<Utc>) {
        fn merge(slot: &mut String, value: Option<String>) {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                *slot = value;
            }
        }

        merge(&mut self.title, update.title);
        merge(&mut self.description, update.description);
        merge(&mut self.content, update.content);
        self.updated_at = now;
    }
}
