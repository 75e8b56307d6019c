//! Report handlers

use axum::{
    extract::{Query, State},
    Extension, Json,
};

use domain_billing::RevenueSummary;
use domain_identity::Session;

use crate::dto::bills::RevenueQuery;
use crate::{error::ApiError, AppState};

/// Revenue for bills issued between two dates, inclusive
pub async fn revenue_summary(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<RevenueQuery>,
) -> Result<Json<RevenueSummary>, ApiError> {
    session.require_admin()?;
    Ok(Json(state.billing.revenue_summary(query.from, query.to).await?))
}
