use events::Route;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DashboardError {
    #[error("Access denied, redirected to {0}")]
    AccessDenied(Route),

    #[error("User {0} not found")]
    UserNotFound(u32),

    #[error("Strategy {0} not found")]
    StrategyNotFound(u32),
}
