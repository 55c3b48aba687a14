use std::sync::Arc;

use async_trait::async_trait;
use chrono_tz::Tz;
use log::debug;

use super::portfolios_model::{NewPortfolio, Portfolio, PortfolioUpdate};
use super::portfolios_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};
use super::view_stats::StatsSummary;
use crate::errors::{DatabaseError, Error, Result};
use crate::utils::time_utils::{view_date_from_utc, Clock};

pub struct PortfolioService {
    portfolio_repo: Arc<dyn PortfolioRepositoryTrait>,
    clock: Arc<dyn Clock>,
    view_tz: Tz,
}

impl PortfolioService {
    pub fn new(
        portfolio_repo: Arc<dyn PortfolioRepositoryTrait>,
        clock: Arc<dyn Clock>,
        view_tz: Tz,
    ) -> Self {
        PortfolioService {
            portfolio_repo,
            clock,
            view_tz,
        }
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    fn get_portfolios(&self) -> Result<Vec<Portfolio>> {
        self.portfolio_repo.load_portfolios()
    }

    fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio> {
        self.portfolio_repo.get_portfolio(portfolio_id)
    }

    fn get_portfolio_stats(&self, portfolio_id: &str) -> Result<StatsSummary> {
        let portfolio = self.portfolio_repo.get_portfolio(portfolio_id)?;
        let today = view_date_from_utc(self.clock.now(), self.view_tz);
        Ok(portfolio.views.summary(today))
    }

    async fn create_portfolio(&self, new_portfolio: NewPortfolio) -> Result<Portfolio> {
        new_portfolio.validate()?;
        let created = self
            .portfolio_repo
            .insert_new_portfolio(new_portfolio, self.clock.now())
            .await?;
        debug!("Created portfolio {}", created.id);
        Ok(created)
    }

    async fn view_portfolio(&self, portfolio_id: String) -> Result<Portfolio> {
        let day = view_date_from_utc(self.clock.now(), self.view_tz);
        let viewed = self.portfolio_repo.record_view(portfolio_id, day).await?;
        debug!(
            "Recorded view of portfolio {} on {} (total {})",
            viewed.id, day, viewed.views.total
        );
        Ok(viewed)
    }

    async fn update_portfolio(
        &self,
        portfolio_id: String,
        update: PortfolioUpdate,
    ) -> Result<Portfolio> {
        let mut portfolio = self.portfolio_repo.get_portfolio(&portfolio_id)?;
        portfolio.apply_update(update, self.clock.now());
        self.portfolio_repo.update_portfolio(portfolio).await
    }

    async fn delete_portfolio(&self, portfolio_id: String) -> Result<usize> {
        let deleted = self
            .portfolio_repo
            .delete_portfolio(portfolio_id.clone())
            .await?;
        if deleted == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Portfolio {} not found",
                portfolio_id
            ))));
        }
        debug!("Deleted portfolio {}", portfolio_id);
        Ok(deleted)
    }
}
