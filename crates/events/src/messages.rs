use crate::error::EventsError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

/// A user-facing `{title, description, severity}` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub timestamp: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Info)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Error)
    }

    fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            timestamp: Utc::now(),
            title: title.into(),
            description: description.into(),
            severity,
        }
    }
}

/// The fixed set of destinations a view may redirect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    #[serde(rename = "/")]
    Home,
    #[serde(rename = "/login")]
    Login,
    #[serde(rename = "/dashboard")]
    Dashboard,
    #[serde(rename = "/admin")]
    Admin,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::Admin => "/admin",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = EventsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "/" => Ok(Route::Home),
            "/login" => Ok(Route::Login),
            "/dashboard" => Ok(Route::Dashboard),
            "/admin" => Ok(Route::Admin),
            other => Err(EventsError::UnknownRoute(other.to_string())),
        }
    }
}

/// Everything the core emits towards the presentation layer.
///
/// Serialized with `#[serde(tag = "type", content = "payload")]`, so a redirect
/// looks like `{"type": "Redirect", "payload": "/login"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum UiEvent {
    Notification(Notification),
    Redirect(Route),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths_parse_back() {
        for route in [Route::Home, Route::Login, Route::Dashboard, Route::Admin] {
            assert_eq!(route.path().parse::<Route>(), Ok(route));
        }
        assert_eq!(
            "/settings".parse::<Route>(),
            Err(EventsError::UnknownRoute("/settings".to_string()))
        );
    }

    #[test]
    fn test_ui_event_is_tagged() {
        let json = serde_json::to_value(UiEvent::Redirect(Route::Login)).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "Redirect", "payload": "/login" }));

        let json = serde_json::to_value(UiEvent::Notification(Notification::error(
            "Login failed",
            "Invalid username or password",
        )))
        .unwrap();
        assert_eq!(json["type"], "Notification");
        assert_eq!(json["payload"]["severity"], "error");
        assert_eq!(json["payload"]["title"], "Login failed");
    }
}
