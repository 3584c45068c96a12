use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::profile::{ProfileUpdate, UserProfile};
use crate::errors::AppError;
use crate::AppState;

use super::authenticated_user;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl From<UserProfile> for ProfileResponse {
    fn from(p: UserProfile) -> Self {
        ProfileResponse {
            id: p.id,
            name: p.name,
            address: p.address,
            phone: p.phone,
            email: p.email,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// GET /profile
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Current user's profile", body = ProfileResponse),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tag = "profile"
)]
pub async fn get_profile(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req, &state.tokens)?;

    let st = state.clone();
    let profile = web::block(move || st.accounts.profile(user_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ProfileResponse::from(profile)))
}

/// PUT /profile
///
/// Replaces the editable profile fields; every field is required.
#[utoipa::path(
    put,
    path = "/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "A required field is missing or invalid"),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tag = "profile"
)]
pub async fn update_profile(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req, &state.tokens)?;
    let body = body.into_inner();

    let st = state.clone();
    let profile = web::block(move || {
        st.accounts.update_profile(
            user_id,
            ProfileUpdate {
                name: body.name,
                address: body.address,
                phone: body.phone,
                email: body.email,
            },
        )
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ProfileResponse::from(profile)))
}
