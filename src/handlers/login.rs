use axum::{http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth;
use crate::config;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub usuario: Option<String>,
    pub senha: Option<String>,
}

/// POST /login - validate the single configured credential pair and issue
/// a bearer token. There is no credential store; this is a shared-secret
/// placeholder with a fixed expiry and no revocation.
pub async fn login_post(
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let security = &config::config().security;

    let credentials_match = payload.usuario.as_deref() == Some(security.login_user.as_str())
        && payload.senha.as_deref() == Some(security.login_password.as_str());

    if !credentials_match {
        return Ok((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "auth": false, "message": "Usuário ou senha inválidos." })),
        ));
    }

    let token = auth::issue(&security.login_user)
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;

    Ok((StatusCode::OK, Json(json!({ "auth": true, "token": token }))))
}
