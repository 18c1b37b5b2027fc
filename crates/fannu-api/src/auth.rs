use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use fannu_db::Database;
use fannu_types::api::{Claims, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

use crate::error::ApiError;
use crate::validation;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
}

/// POST /auth/register — credentials are validated before the uniqueness
/// check, so a malformed request never reveals whether a username exists.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut errors = vec![];
    validation::validate_username(&req.username, &mut errors);
    validation::validate_password(&req.password, &mut errors);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    if state.db.get_user_by_username(&req.username)?.is_some() {
        return Err(ApiError::Conflict(format!(
            "username '{}' is taken",
            req.username
        )));
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))?
        .to_string();

    let user_id = Uuid::new_v4();
    state
        .db
        .create_user(&user_id.to_string(), &req.username, &password_hash)?;

    let token = create_token(&state.jwt_secret, user_id, &req.username)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse { user_id, token }),
    ))
}

/// POST /auth/login — unknown username and wrong password are the same 401.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .db
        .get_user_by_username(&req.username)?
        .ok_or(ApiError::Unauthorized)?;

    let parsed_hash = PasswordHash::new(&user.password)
        .map_err(|e| anyhow::anyhow!("stored password hash unparseable: {}", e))?;

    if Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(ApiError::Unauthorized);
    }

    let user_id: Uuid = user
        .id
        .parse()
        .map_err(|e| anyhow::anyhow!("corrupt user id '{}': {}", user.id, e))?;

    let token = create_token(&state.jwt_secret, user_id, &user.username)?;

    Ok(Json(LoginResponse {
        user_id,
        username: user.username,
        token,
    }))
}

fn create_token(secret: &str, user_id: Uuid, username: &str) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::days(30)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::response::Response;

    use super::*;

    fn test_state() -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(&dir.path().join("test.db")).unwrap();
        let state = Arc::new(AppStateInner {
            db,
            jwt_secret: "test-secret".into(),
        });
        (state, dir)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn register_response(
        state: &AppState,
        username: &str,
        password: &str,
    ) -> (StatusCode, serde_json::Value) {
        let result = register(
            State(state.clone()),
            Json(RegisterRequest {
                username: username.to_string(),
                password: password.to_string(),
            }),
        )
        .await;

        let response = match result {
            Ok(ok) => ok.into_response(),
            Err(err) => err.into_response(),
        };
        (response.status(), body_json(response).await)
    }

    async fn login_response(
        state: &AppState,
        username: &str,
        password: &str,
    ) -> (StatusCode, serde_json::Value) {
        let result = login(
            State(state.clone()),
            Json(LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            }),
        )
        .await;

        let response = match result {
            Ok(ok) => ok.into_response(),
            Err(err) => err.into_response(),
        };
        (response.status(), body_json(response).await)
    }

    #[tokio::test]
    async fn register_then_login_roundtrip() {
        let (state, _dir) = test_state();

        let (status, body) = register_response(&state, "selam", "correct horse").await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

        let (status, body) = login_response(&state, "selam", "correct horse").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "selam");
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    }

    #[tokio::test]
    async fn register_rejects_bad_credentials_with_field_errors() {
        let (state, _dir) = test_state();

        let (status, body) = register_response(&state, "ab", "short").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"][0]["field"], "username");
        assert_eq!(body["errors"][1]["field"], "password");
    }

    #[tokio::test]
    async fn duplicate_username_is_conflict() {
        let (state, _dir) = test_state();

        register_response(&state, "selam", "correct horse").await;
        let (status, body) = register_response(&state, "selam", "battery staple").await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "conflict");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_are_both_401() {
        let (state, _dir) = test_state();

        register_response(&state, "selam", "correct horse").await;

        let (status, _) = login_response(&state, "selam", "wrong password").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = login_response(&state, "nobody", "correct horse").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
