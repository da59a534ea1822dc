use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use jsonwebtoken::{decode, DecodingKey, Validation};
use log::warn;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::Claims;
use crate::AppState;

const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// The authenticated caller, taken from a bearer token or the access-token cookie.
/// Tokens are issued by the account service; this side only verifies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
}

fn token_from_request(req: &HttpRequest) -> Option<String> {
    let header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_owned());

    header.or_else(|| req.cookie(ACCESS_TOKEN_COOKIE).map(|c| c.value().to_owned()))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        warn!("Rejected access token: {}", e);
        ApiError::Unauthorized("Unauthorized: Invalid or missing token".to_string())
    })
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            return ready(Err(ApiError::Unauthorized("Authentication is not configured".to_string())));
        };

        let result = match token_from_request(req) {
            Some(token) => verify_token(&token, &state.jwt_secret).map(|claims| AuthUser { id: claims.user_id }),
            None => Err(ApiError::Unauthorized("Unauthorized: Invalid or missing token".to_string())),
        };
        ready(result)
    }
}
