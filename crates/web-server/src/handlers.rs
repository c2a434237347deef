use crate::auth::{AdminUser, CurrentUser};
use crate::{AppState, error::AppError};
use analytics::{DashboardStats, StrategyCriteria, UserCriteria};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use core_types::{PricingTier, RiskTier, SessionUser, User};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use session::{Authenticator, Registrar};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CredentialsBody {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: Uuid,
    pub user: SessionUser,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub search: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct StrategyQuery {
    pub risk: Option<String>,
    pub category: Option<String>,
    /// Comma-separated asset labels.
    pub assets: Option<String>,
    #[serde(default)]
    pub search: String,
}

impl StrategyQuery {
    fn into_criteria(self) -> Result<StrategyCriteria, AppError> {
        let mut criteria = StrategyCriteria::new().with_search(self.search);
        if let Some(risk) = self.risk.filter(|r| !r.trim().is_empty()) {
            let risk = risk
                .parse::<RiskTier>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            criteria.set_risk(Some(risk));
        }
        criteria.set_category(self.category);
        for asset in self.assets.iter().flat_map(|a| a.split(',')) {
            let asset = asset.trim();
            if !asset.is_empty() {
                criteria = criteria.with_asset(asset);
            }
        }
        Ok(criteria)
    }
}

/// # GET /api/health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "API is running" }))
}

/// # POST /api/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Option<Json<CredentialsBody>>,
) -> Result<Json<TokenResponse>, AppError> {
    let body = required_credentials(body)?;
    let user = state
        .identity
        .check_credentials(&body.username, &body.password)
        .ok_or(AppError::InvalidCredentials)?;
    let token = state.issue_token(user.clone());
    Ok(Json(TokenResponse { token, user }))
}

/// # POST /api/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Option<Json<CredentialsBody>>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    let body = required_credentials(body)?;
    let user = state.identity.register(&body.username, &body.password);
    let token = state.issue_token(user.clone());
    Ok((StatusCode::CREATED, Json(TokenResponse { token, user })))
}

/// # POST /api/logout
pub async fn logout(State(state): State<Arc<AppState>>, current: CurrentUser) -> StatusCode {
    state.revoke(&current.token);
    tracing::info!(user_id = current.user.id, "Token revoked.");
    StatusCode::NO_CONTENT
}

/// # GET /api/users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(query): Query<UserQuery>,
) -> Json<Value> {
    let users = state.users();
    let matched: Vec<User> = state
        .engine
        .filter_users(&users, &UserCriteria::new(query.search))
        .into_iter()
        .cloned()
        .collect();
    Json(json!({ "users": matched }))
}

/// # DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<u32>,
) -> Result<Json<Value>, AppError> {
    let mut users = state.users_mut();
    let Some(index) = users.iter().position(|u| u.id == id) else {
        return Err(AppError::NotFound("User not found".to_string()));
    };
    let removed = users.remove(index);
    tracing::info!(admin = %admin.username, user_id = removed.id, "User deleted.");
    Ok(Json(json!({ "message": "User deleted successfully" })))
}

/// # GET /api/stats
pub async fn stats(State(state): State<Arc<AppState>>, _admin: AdminUser) -> Json<DashboardStats> {
    let users = state.users();
    Json(state.engine.dashboard_stats(&users, &state.strategies))
}

/// # GET /api/strategies
pub async fn list_strategies(
    State(state): State<Arc<AppState>>,
    _current: CurrentUser,
    Query(query): Query<StrategyQuery>,
) -> Result<Json<Value>, AppError> {
    let criteria = query.into_criteria()?;
    let matched = state.engine.filter_strategies(&state.strategies, &criteria);
    Ok(Json(json!({ "strategies": matched })))
}

/// # GET /api/strategies/:id
pub async fn get_strategy(
    State(state): State<Arc<AppState>>,
    _current: CurrentUser,
    Path(id): Path<u32>,
) -> Result<Json<Value>, AppError> {
    let strategy = state
        .engine
        .strategy_by_id(&state.strategies, id)
        .ok_or_else(|| AppError::NotFound("Strategy not found".to_string()))?;
    Ok(Json(json!({ "strategy": strategy })))
}

/// # GET /api/user/strategies
pub async fn user_strategies(State(state): State<Arc<AppState>>, current: CurrentUser) -> Json<Value> {
    let subscriptions = dashboard::default_subscriptions(&current.user, &state.users(), &state.strategies);
    let subscribed = state.engine.strategies_by_ids(&subscriptions, &state.strategies);
    Json(json!({ "strategies": subscribed }))
}

/// # GET /api/options
/// The selectable values of the strategy filter panel.
pub async fn options() -> Json<Value> {
    Json(json!({
        "assetTypes": seed_data::asset_types(),
        "riskLevels": seed_data::risk_levels(),
        "strategyTypes": seed_data::strategy_types(),
    }))
}

/// # GET /api/pricing
pub async fn pricing(State(state): State<Arc<AppState>>) -> Json<Vec<PricingTier>> {
    Json(state.pricing.clone())
}

fn required_credentials(body: Option<Json<CredentialsBody>>) -> Result<CredentialsBody, AppError> {
    let Some(Json(body)) = body else {
        return Err(AppError::BadRequest("Missing JSON in request".to_string()));
    };
    if body.username.is_empty() || body.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }
    Ok(body)
}
