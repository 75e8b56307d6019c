//! Bill handlers

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use validator::Validate;

use core_kernel::BillId;
use domain_billing::{Bill, BillDetails};
use domain_identity::Session;

use crate::dto::bills::{BillNumberResponse, CreateBillBody};
use crate::{error::ApiError, AppState};

/// Reserves the next bill number for today
pub async fn generate_bill_number(
    State(state): State<AppState>,
) -> Result<Json<BillNumberResponse>, ApiError> {
    let bill_number = state.billing.generate_bill_number().await?;
    Ok(Json(BillNumberResponse { bill_number }))
}

pub async fn create_bill(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(body): Json<CreateBillBody>,
) -> Result<(StatusCode, Json<Bill>), ApiError> {
    body.validate()?;

    let bill = state.billing.create_bill(session.user_id(), body.into()).await?;
    Ok((StatusCode::CREATED, Json(bill)))
}

/// All bills, newest first
pub async fn list_bills(State(state): State<AppState>) -> Result<Json<Vec<BillDetails>>, ApiError> {
    Ok(Json(state.billing.list_bills().await?))
}

pub async fn get_bill(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BillDetails>, ApiError> {
    let id = BillId::new(id);
    state
        .billing
        .get_bill(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Bill not found: {}", id)))
}

/// The printable receipt as plain text
pub async fn print_bill(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let text = state.billing.print_bill(BillId::new(id)).await?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text))
}
