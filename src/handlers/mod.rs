pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod profile;

use actix_web::http::header;
use actix_web::HttpRequest;
use bigdecimal::{BigDecimal, RoundingMode};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::TokenManager;
use crate::domain::errors::DomainError;
use crate::errors::AppError;

/// Resolve the current user from the `Authorization: Bearer` header.
pub(crate) fn authenticated_user(
    req: &HttpRequest,
    tokens: &TokenManager,
) -> Result<Uuid, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(DomainError::AuthRequired)?;
    Ok(tokens.verify(token)?)
}

/// Amounts cross the wire as strings, rounded to two decimal places at
/// presentation time only.
pub(crate) fn money(amount: &BigDecimal) -> String {
    amount.with_scale_round(2, RoundingMode::HalfUp).to_string()
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 20, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl ListParams {
    pub fn clamped(&self) -> (i64, i64) {
        (self.page.max(1), self.limit.clamp(1, 100))
    }
}

pub(crate) fn default_page() -> i64 {
    1
}

pub(crate) fn default_limit() -> i64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn money_rounds_half_up_to_two_places() {
        let amount = BigDecimal::from_str("119.975").expect("valid decimal");
        assert_eq!(money(&amount), "119.98");
        assert_eq!(money(&BigDecimal::from(400)), "400.00");
    }

    #[test]
    fn list_params_clamp_page_and_limit() {
        let params = ListParams { page: 0, limit: 1000 };
        assert_eq!(params.clamped(), (1, 100));
        let params = ListParams { page: 3, limit: 0 };
        assert_eq!(params.clamped(), (3, 1));
    }
}
