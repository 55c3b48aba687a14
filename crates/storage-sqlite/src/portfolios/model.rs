//! Database models for portfolios.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;

use folio_core::portfolios::{DailyBucket, NewPortfolio, Portfolio, ViewStats};

/// Database model for portfolios
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolios)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PortfolioDB {
    pub id: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub user_id: String,
    pub views_total: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for creating a new portfolio
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolios)]
pub struct NewPortfolioDB {
    pub id: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub user_id: String,
    pub views_total: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// One day's view bucket. Row ids grow with insertion, so ordering by `id`
/// yields first-seen order.
#[derive(Queryable, Identifiable, Associations, Selectable, PartialEq, Debug, Clone)]
#[diesel(belongs_to(PortfolioDB, foreign_key = portfolio_id))]
#[diesel(table_name = crate::schema::portfolio_daily_views)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DailyViewDB {
    pub id: i32,
    pub portfolio_id: String,
    pub view_date: NaiveDate,
    pub view_count: i64,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolio_daily_views)]
pub struct NewDailyViewDB {
    pub portfolio_id: String,
    pub view_date: NaiveDate,
    pub view_count: i64,
}

fn to_counter(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

impl NewPortfolioDB {
    pub fn from_domain(id: String, domain: NewPortfolio, created_at: DateTime<Utc>) -> Self {
        let stamp = created_at.naive_utc();
        Self {
            id,
            title: domain.title,
            description: domain.description,
            content: domain.content,
            user_id: domain.user_id,
            views_total: 0,
            created_at: stamp,
            updated_at: stamp,
        }
    }
}

impl PortfolioDB {
    /// Assembles the domain document; `daily` must already be in row-id order.
    pub fn into_domain(self, daily: Vec<DailyViewDB>) -> Portfolio {
        Portfolio {
            id: self.id,
            title: self.title,
            description: self.description,
            content: self.content,
            user_id: self.user_id,
            views: ViewStats {
                total: to_counter(self.views_total),
                daily: daily.into_iter().map(DailyBucket::from).collect(),
            },
            created_at: self.created_at.and_utc(),
            updated_at: self.updated_at.and_utc(),
        }
    }
}

impl From<DailyViewDB> for DailyBucket {
    fn from(db: DailyViewDB) -> Self {
        Self {
            date: db.view_date,
            count: to_counter(db.view_count),
        }
    }
}
