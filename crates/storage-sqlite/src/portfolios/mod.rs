//! SQLite storage implementation for portfolios.

mod model;
mod repository;

pub use model::{DailyViewDB, NewDailyViewDB, NewPortfolioDB, PortfolioDB};
pub use repository::PortfolioRepository;
