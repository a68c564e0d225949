//! Account handlers.

use actix_web::{HttpResponse, web};

use scribe_core::domain::{RegistrationInput, User};
use scribe_core::validation::FieldErrors;
use scribe_infra::masking::mask_email;
use scribe_shared::ApiResponse;
use scribe_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /register/
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let registration = RegistrationInput {
        first_name: req.first_name.as_deref(),
        last_name: req.last_name.as_deref(),
        email: req.email.as_deref(),
        username: req.username.as_deref(),
        password: req.password.as_deref(),
        password2: req.password2.as_deref(),
    }
    .validate()?;

    let mut errors = FieldErrors::new();
    if state.users.find_by_email(&registration.email).await?.is_some() {
        errors.add("email", "User with this email already exists.");
    }
    if state
        .users
        .find_by_username(&registration.username)
        .await?
        .is_some()
    {
        errors.add("username", "User with this username already exists.");
    }
    errors.into_result()?;

    let password_hash = state.passwords.hash(&registration.password)?;
    let user = state.users.create(User::new(registration, password_hash)).await?;

    tracing::info!(
        user_id = %user.id,
        user_email = %mask_email(&user.email),
        "User registered"
    );

    Ok(HttpResponse::Created().json(ApiResponse::<()>::message("User created successfully")))
}

/// POST /login/
///
/// `username` may hold either the username or the email address.
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut errors = FieldErrors::new();
    let identifier = errors.require("username", req.username.as_deref());
    let password = errors.require("password", req.password.as_deref());
    let (Some(identifier), Some(password)) = (identifier, password) else {
        return Err(AppError::Validation(errors));
    };

    let Some(user) = state.users.find_by_login(identifier.trim()).await? else {
        tracing::info!("Login failed: unknown identifier");
        return Err(AppError::InvalidCredentials);
    };

    if !state.passwords.verify(password, &user.password_hash)? {
        tracing::info!(user_id = %user.id, "Login failed: wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let token = state.tokens.generate_token(user.id, &user.username)?;
    tracing::debug!(user_id = %user.id, "Issued access token");

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: u64::try_from(state.tokens.expiration_seconds()).unwrap_or(0),
    }))
}
