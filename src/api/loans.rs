//! Loan endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::CreateLoan,
    AppState,
};

/// Lend a book, identified by ISBN, to a customer
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    request_body = CreateLoan,
    responses(
        (status = 201, description = "Loan created, body is the loan id", body = i64),
        (status = 400, description = "Book not found for passed isbn", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_loan(
    State(state): State<AppState>,
    payload: Result<Json<CreateLoan>, JsonRejection>,
) -> AppResult<(StatusCode, Json<i64>)> {
    let Json(request) = payload?;
    request.validate()?;

    let loan = state
        .services
        .loans
        .create_loan(&request.customer, &request.isbn)
        .await
        .map_err(|err| match err {
            // an unknown isbn is a client mistake here, not a missing resource
            AppError::NotFound(reason) => AppError::BadRequest(reason),
            other => other,
        })?;

    Ok((StatusCode::CREATED, Json(loan.id)))
}
