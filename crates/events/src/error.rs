use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EventsError {
    #[error("Unknown route: {0}")]
    UnknownRoute(String),
}
