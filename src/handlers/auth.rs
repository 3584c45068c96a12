use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::accounts::SignUpInput;
use crate::errors::AppError;
use crate::AppState;

use super::profile::ProfileResponse;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignUpRequest {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    pub user: ProfileResponse,
}

/// POST /auth/signup
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Email already registered"),
    ),
    tag = "auth"
)]
pub async fn sign_up(
    state: web::Data<AppState>,
    body: web::Json<SignUpRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let input = SignUpInput {
        name: body.name,
        address: body.address,
        phone: body.phone,
        email: body.email,
        password: body.password,
        confirm_password: body.confirm_password,
    };

    let st = state.clone();
    let profile = web::block(move || st.accounts.sign_up(input))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let token = state.tokens.issue(profile.id)?;
    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user: ProfileResponse::from(profile),
    }))
}

/// POST /auth/signin
#[utoipa::path(
    post,
    path = "/auth/signin",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid email or password"),
    ),
    tag = "auth"
)]
pub async fn sign_in(
    state: web::Data<AppState>,
    body: web::Json<SignInRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let st = state.clone();
    let profile = web::block(move || st.accounts.sign_in(&body.email, &body.password))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let token = state.tokens.issue(profile.id)?;
    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: ProfileResponse::from(profile),
    }))
}
