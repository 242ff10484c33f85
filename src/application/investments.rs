use crate::domain::error::AdminError;
use crate::domain::model::Investment;
use crate::state::AppState;
use serde_json::Value;

/// All investments from the investments service
pub async fn fetch_investments(state: &AppState) -> Result<Vec<Investment>, AdminError> {
    let body = state.fetcher.get_json(&state.config.investments_url()).await?;
    Ok(serde_json::from_value(body)?)
}

/// A single investment, passed through as the upstream returned it
pub async fn fetch_investment(state: &AppState, id: &str) -> Result<Value, AdminError> {
    state.fetcher.get_json(&state.config.investment_url(id)).await
}
