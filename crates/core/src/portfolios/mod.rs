//! Portfolios module - domain models, view accounting, services, and traits.

mod portfolios_model;
mod portfolios_service;
mod portfolios_traits;
pub mod view_stats;

pub use portfolios_model::{NewPortfolio, Portfolio, PortfolioUpdate};
pub use portfolios_service::PortfolioService;
pub use portfolios_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};
pub use view_stats::{accumulate, project, DailyBucket, StatsSummary, ViewStats};
