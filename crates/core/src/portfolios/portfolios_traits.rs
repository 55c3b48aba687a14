use crate::errors::Result;
use crate::portfolios::portfolios_model::{NewPortfolio, Portfolio, PortfolioUpdate};
use crate::portfolios::view_stats::StatsSummary;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

/// Trait for portfolio repository operations
#[async_trait]
pub trait PortfolioRepositoryTrait: Send + Sync {
    fn load_portfolios(&self) -> Result<Vec<Portfolio>>;
    fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio>;
    async fn insert_new_portfolio(
        &self,
        new_portfolio: NewPortfolio,
        created_at: DateTime<Utc>,
    ) -> Result<Portfolio>;
    /// Persists the document fields of `portfolio`. View statistics are left untouched.
    async fn update_portfolio(&self, portfolio: Portfolio) -> Result<Portfolio>;
    async fn delete_portfolio(&self, portfolio_id: String) -> Result<usize>;
    /// Atomically counts one view on `day` and returns the updated document.
    async fn record_view(&self, portfolio_id: String, day: NaiveDate) -> Result<Portfolio>;
}

/// Trait for portfolio service operations
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    fn get_portfolios(&self) -> Result<Vec<Portfolio>>;
    fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio>;
    fn get_portfolio_stats(&self, portfolio_id: &str) -> Result<StatsSummary>;
    async fn create_portfolio(&self, new_portfolio: NewPortfolio) -> Result<Portfolio>;
    async fn view_portfolio(&self, portfolio_id: String) -> Result<Portfolio>;
    async fn update_portfolio(
        &self,
        portfolio_id: String,
        update: PortfolioUpdate,
    ) -> Result<Portfolio>;
    async fn delete_portfolio(&self, portfolio_id: String) -> Result<usize>;
}
