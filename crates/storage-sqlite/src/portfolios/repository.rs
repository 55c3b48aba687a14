use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use folio_core::portfolios::{NewPortfolio, Portfolio, PortfolioRepositoryTrait};
use folio_core::errors::{DatabaseError, Error, Result};
use std::sync::Arc;
use uuid::Uuid;

use super::model::{DailyViewDB, NewDailyViewDB, NewPortfolioDB, PortfolioDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::{portfolio_daily_views, portfolios};

pub struct PortfolioRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PortfolioRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        PortfolioRepository { pool, writer }
    }
}

fn load_daily_views(conn: &mut SqliteConnection, portfolio_id: &str) -> Result<Vec<DailyViewDB>> {
    portfolio_daily_views::table
        .filter(portfolio_daily_views::portfolio_id.eq(portfolio_id))
        .order(portfolio_daily_views::id.asc())
        .select(DailyViewDB::as_select())
        .load(conn)
        .into_core()
}

fn load_portfolio_row(conn: &mut SqliteConnection, portfolio_id: &str) -> Result<PortfolioDB> {
    portfolios::table
        .find(portfolio_id)
        .select(PortfolioDB::as_select())
        .first(conn)
        .into_core()
}

fn load_portfolio(conn: &mut SqliteConnection, portfolio_id: &str) -> Result<Portfolio> {
    let row = load_portfolio_row(conn, portfolio_id)?;
    let daily = load_daily_views(conn, portfolio_id)?;
    Ok(row.into_domain(daily))
}

/// Runs several reads against one snapshot, so a record and its buckets are
/// never observed on different sides of a committed view.
fn read_snapshot<T, F>(conn: &mut SqliteConnection, read: F) -> Result<T>
where
    F: FnOnce(&mut SqliteConnection) -> Result<T>,
{
    conn.transaction::<_, StorageError, _>(|c| read(c).map_err(StorageError::from))
        .map_err(Error::from)
}

#[async_trait]
impl PortfolioRepositoryTrait for PortfolioRepository {
    fn load_portfolios(&self) -> Result<Vec<Portfolio>> {
        let mut conn = get_connection(&self.pool)?;
        read_snapshot(&mut conn, |conn| {
            let rows = portfolios::table
                .order((portfolios::created_at.asc(), portfolios::id.asc()))
                .select(PortfolioDB::as_select())
                .load::<PortfolioDB>(conn)
                .into_core()?;

            let daily = DailyViewDB::belonging_to(&rows)
                .order(portfolio_daily_views::id.asc())
                .select(DailyViewDB::as_select())
                .load::<DailyViewDB>(conn)
                .into_core()?
                .grouped_by(&rows);

            Ok(rows
                .into_iter()
                .zip(daily)
                .map(|(row, buckets)| row.into_domain(buckets))
                .collect())
        })
    }

    fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio> {
        let mut conn = get_connection(&self.pool)?;
        read_snapshot(&mut conn, |conn| load_portfolio(conn, portfolio_id))
    }

    async fn insert_new_portfolio(
        &self,
        new_portfolio: NewPortfolio,
        created_at: DateTime<Utc>,
    ) -> Result<Portfolio> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Portfolio> {
                let new_db = NewPortfolioDB::from_domain(
                    Uuid::new_v4().to_string(),
                    new_portfolio,
                    created_at,
                );
                let row = diesel::insert_into(portfolios::table)
                    .values(&new_db)
                    .returning(PortfolioDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(row.into_domain(Vec::new()))
            })
            .await
    }

    async fn update_portfolio(&self, portfolio: Portfolio) -> Result<Portfolio> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Portfolio> {
                // Columns are listed explicitly so views_total is never overwritten here.
                let updated = diesel::update(portfolios::table.find(portfolio.id.as_str()))
                    .set((
                        portfolios::title.eq(portfolio.title.as_str()),
                        portfolios::description.eq(portfolio.description.as_str()),
                        portfolios::content.eq(portfolio.content.as_str()),
                        portfolios::updated_at.eq(portfolio.updated_at.naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;
                if updated == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(format!(
                        "Portfolio {} not found",
                        portfolio.id
                    ))));
                }
                load_portfolio(conn, &portfolio.id)
            })
            .await
    }

    async fn delete_portfolio(&self, portfolio_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(portfolios::table.find(portfolio_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    async fn record_view(&self, portfolio_id: String, day: NaiveDate) -> Result<Portfolio> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Portfolio> {
                let mut portfolio = load_portfolio(conn, &portfolio_id)?;
                portfolio.views.record_view(day);

                diesel::update(portfolios::table.find(portfolio_id.as_str()))
                    .set(portfolios::views_total.eq(portfolios::views_total + 1))
                    .execute(conn)
                    .into_core()?;

                diesel::insert_into(portfolio_daily_views::table)
                    .values(NewDailyViewDB {
                        portfolio_id: portfolio_id.clone(),
                        view_date: day,
                        view_count: 1,
                    })
                    .on_conflict((
                        portfolio_daily_views::portfolio_id,
                        portfolio_daily_views::view_date,
                    ))
                    .do_update()
                    .set(portfolio_daily_views::view_count.eq(portfolio_daily_views::view_count + 1))
                    .execute(conn)
                    .into_core()?;

                Ok(portfolio)
            })
            .await
    }
}
