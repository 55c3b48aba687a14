use chrono::{DateTime, NaiveDate, Utc};
use folio_core::portfolios as core_portfolios;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ViewStats {
    pub total: u64,
    pub daily: Vec<DailyBucket>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
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

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    pub total_views: u64,
    pub today_views: u64,
    pub daily_stats: Vec<DailyBucket>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct NewPortfolio {
    pub title: String,
    pub description: String,
    pub content: String,
    pub user_id: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

impl From<core_portfolios::DailyBucket> for DailyBucket {
    fn from(b: core_portfolios::DailyBucket) -> Self {
        Self {
            date: b.date,
            count: b.count,
        }
    }
}

impl From<core_portfolios::ViewStats> for ViewStats {
    fn from(v: core_portfolios::ViewStats) -> Self {
        Self {
            total: v.total,
            daily: v.daily.into_iter().map(DailyBucket::from).collect(),
        }
    }
}

impl From<core_portfolios::Portfolio> for Portfolio {
    fn from(p: core_portfolios::Portfolio) -> Self {
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            content: p.content,
            user_id: p.user_id,
            views: p.views.into(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<core_portfolios::StatsSummary> for PortfolioStats {
    fn from(s: core_portfolios::StatsSummary) -> Self {
        Self {
            total_views: s.total_views,
            today_views: s.today_views,
            daily_stats: s.daily_stats.into_iter().map(DailyBucket::from).collect(),
        }
    }
}

impl From<NewPortfolio> for core_portfolios::NewPortfolio {
    fn from(n: NewPortfolio) -> Self {
        Self {
            title: n.title,
            description: n.description,
            content: n.content,
            user_id: n.user_id,
        }
    }
}

impl From<PortfolioUpdate> for core_portfolios::PortfolioUpdate {
    fn from(u: PortfolioUpdate) -> Self {
        Self {
            title: u.title,
            description: u.description,
            content: u.content,
        }
    }
}
