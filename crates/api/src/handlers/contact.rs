//! Handler for the public contact form.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use fasl_core::error::CoreError;
use fasl_core::validation::{is_valid_phone, normalize_optional};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::mail::ContactMessage;
use crate::state::AppState;

/// Request body for `POST /contact`.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 2, max = 100, message = "must be 2-100 characters"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 10, max = 5000, message = "must be 10-5000 characters"))]
    pub message: String,
}

/// Response body for a successfully forwarded contact message.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub message: &'static str,
}

/// POST /api/v1/contact
///
/// Validate a contact-form submission and forward it to the site inbox.
/// Mail failure is surfaced distinctly (502) so the client can tell the
/// visitor their message did NOT go through.
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<ContactRequest>,
) -> AppResult<(StatusCode, Json<ContactResponse>)> {
    // 1. Field validation.
    input.validate()?;
    let phone = normalize_optional(input.phone);
    if let Some(phone) = &phone {
        if !is_valid_phone(phone) {
            return Err(AppError::Core(CoreError::Validation(vec![
                "phone: contains invalid characters".to_string(),
            ])));
        }
    }

    // 2. Hand off to the mailer.
    let mailer = state
        .mailer
        .as_ref()
        .ok_or_else(|| AppError::MailDelivery("mail delivery is not configured".into()))?;

    mailer
        .send_contact_message(&ContactMessage {
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            phone,
            message: input.message.trim().to_string(),
        })
        .await
        .map_err(|e| AppError::MailDelivery(e.to_string()))?;

    Ok((
        StatusCode::OK,
        Json(ContactResponse {
            message: "Thank you for contacting us. We will get back to you soon.",
        }),
    ))
}
