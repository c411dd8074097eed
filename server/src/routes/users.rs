//! User Routes
//!
//! Registration runs through an email OTP: register parks the data in
//! pending_registrations, verify-otp creates the account and hands back
//! a token pair. Token obtain/refresh rotates refresh tokens. Password
//! reset builds a one-time link against the frontend origin.
//!
//! No mail transport is wired up, so OTPs and reset links go to the log;
//! debug mode additionally returns the OTP in the response body.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::auth::{
    decode_uid, encode_uid, generate_otp, generate_token, hash_password, hash_token,
    issue_token_pair, otp_expiry, verify_password, TokenPair, RESET_TOKEN_HOURS,
};
use crate::domain::validation::{validate_email, validate_password, validate_phone};
use crate::domain::{DomainError, NewUser, ProfilePatch, User};
use crate::error::{ApiError, ApiResult};
use crate::extract::AuthUser;
use crate::repository::{PendingRegistration, TokenKind};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users/token/", post(obtain_token))
        .route("/api/users/token/refresh/", post(refresh_token))
        .route("/api/users/register/", post(register))
        .route("/api/users/verify-otp/", post(verify_otp))
        .route("/api/users/resend-otp/", post(resend_otp))
        .route("/api/users/cancel-registration/", post(cancel_registration))
        .route("/api/users/password-reset/", post(password_reset))
        .route("/api/users/password-reset/confirm/", post(password_reset_confirm))
        .route("/api/users/change-password/", post(change_password))
        .route("/api/users/profile/", get(profile))
        .route("/api/users/profile/update/", patch(update_profile).put(update_profile))
        .route("/api/users/me/", get(me))
}

#[derive(Deserialize)]
struct TokenRequest {
    email: Option<String>,
    password: Option<String>,
}

/// Log in with email and password, returning an access/refresh pair
async fn obtain_token(
    State(state): State<AppState>,
    Json(body): Json<TokenRequest>,
) -> ApiResult<Json<TokenPair>> {
    let email = require(body.email, "email")?;
    let password = require(body.password, "password")?;

    let (user_id, stored_hash) = state
        .users
        .credentials_by_email(&email)
        .await?
        .ok_or(ApiError::BadCredentials)?;
    if !verify_password(&password, &stored_hash) {
        return Err(ApiError::BadCredentials);
    }

    state.tokens.purge_expired().await?;
    let pair = issue_token_pair(&state.tokens, user_id).await?;
    Ok(Json(pair))
}

#[derive(Deserialize)]
struct RefreshRequest {
    refresh: Option<String>,
}

/// Exchange a refresh token for a new pair; the old refresh is revoked
async fn refresh_token(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> ApiResult<Json<TokenPair>> {
    let refresh = require(body.refresh, "refresh")?;
    let refresh_hash = hash_token(&refresh);

    let user_id = state
        .tokens
        .find_valid(&refresh_hash, TokenKind::Refresh)
        .await?
        .ok_or(ApiError::InvalidToken)?;

    state.tokens.revoke(&refresh_hash).await?;
    let pair = issue_token_pair(&state.tokens, user_id).await?;
    Ok(Json(pair))
}

#[derive(Deserialize)]
struct RegisterRequest {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    confirm_password: Option<String>,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
}

/// Start a registration: validate, stash the data, hand out an OTP
async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<Json<Value>> {
    let username = require(body.username, "username")?;
    let email = require(body.email, "email")?;
    let password = require(body.password, "password")?;
    let confirm_password = body.confirm_password.unwrap_or_default();

    if state.users.username_taken(&username).await? {
        return Err(ApiError::field(
            "username",
            "User with that username already exists. Please choose a different username.",
        ));
    }
    if state.users.email_taken(&email).await? {
        return Err(ApiError::field(
            "email",
            "User with that email address already exists. Please use a different email or try logging in.",
        ));
    }
    if let Err(DomainError::InvalidInput(msg)) = validate_email(&email) {
        return Err(ApiError::field("email", &msg));
    }
    if let Err(DomainError::InvalidInput(msg)) = validate_password(&password) {
        return Err(ApiError::field("password", &msg));
    }
    if password != confirm_password {
        return Err(ApiError::field("password", "Password fields didn't match."));
    }

    let otp = generate_otp();
    state
        .users
        .upsert_pending(&PendingRegistration {
            email: email.clone(),
            username,
            password_hash: hash_password(&password),
            first_name: body.first_name,
            last_name: body.last_name,
            otp_code: otp.clone(),
            otp_expires_at: otp_expiry(),
        })
        .await?;

    warn!("no mail transport configured, OTP for {email} is {otp}");
    let mut response = json!({
        "status": "success",
        "message": "Registration data received! Please verify your email with the OTP we sent.",
    });
    if state.config.debug {
        response["debug_otp"] = json!(otp);
    }
    Ok(Json(response))
}

#[derive(Deserialize)]
struct VerifyOtpRequest {
    email: Option<String>,
    otp: Option<String>,
}

/// Check the OTP and create the account
async fn verify_otp(
    State(state): State<AppState>,
    Json(body): Json<VerifyOtpRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let (Some(email), Some(otp)) = (body.email, body.otp) else {
        return Err(ApiError::StatusMessage("Email and OTP are required".into()));
    };

    let Some(pending) = state.users.find_pending(&email).await? else {
        return Err(ApiError::StatusMessage(
            "Your verification code has expired or is invalid. Please register again.".into(),
        ));
    };
    if Utc::now() > pending.otp_expires_at {
        state.users.delete_pending(&email).await?;
        return Err(ApiError::StatusMessage(
            "Your verification code has expired. Please register again.".into(),
        ));
    }
    if otp != pending.otp_code {
        return Err(ApiError::StatusMessage(
            "Invalid verification code. Please try again.".into(),
        ));
    }

    let user = state
        .users
        .create(&NewUser {
            username: pending.username,
            email: pending.email,
            password_hash: pending.password_hash,
            first_name: pending.first_name,
            last_name: pending.last_name,
            is_verified: true,
        })
        .await?;
    state.users.delete_pending(&email).await?;

    let pair = issue_token_pair(&state.tokens, user.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "Email verified and account created successfully",
            "access": pair.access,
            "refresh": pair.refresh,
        })),
    ))
}

#[derive(Deserialize)]
struct EmailRequest {
    email: Option<String>,
}

/// Issue a fresh OTP for a pending registration
async fn resend_otp(
    State(state): State<AppState>,
    Json(body): Json<EmailRequest>,
) -> ApiResult<Json<Value>> {
    let Some(email) = body.email else {
        return Err(ApiError::StatusMessage("Email is required".into()));
    };

    if state.users.find_pending(&email).await?.is_none() {
        return Err(ApiError::StatusMessage(
            "No pending registration found for this email. Please register again.".into(),
        ));
    }

    let otp = generate_otp();
    state.users.update_pending_otp(&email, &otp, otp_expiry()).await?;

    warn!("no mail transport configured, OTP for {email} is {otp}");
    let mut response = json!({
        "status": "success",
        "message": "A new verification code has been sent to your email",
    });
    if state.config.debug {
        response["debug_otp"] = json!(otp);
    }
    Ok(Json(response))
}

/// Throw away a pending registration
async fn cancel_registration(
    State(state): State<AppState>,
    Json(body): Json<EmailRequest>,
) -> ApiResult<Json<Value>> {
    let Some(email) = body.email else {
        return Err(ApiError::StatusMessage("Email is required".into()));
    };

    state.users.delete_pending(&email).await?;
    Ok(Json(json!({
        "status": "success",
        "message": "Registration cancelled successfully",
    })))
}

/// Start a password reset; the answer never reveals whether the email exists
async fn password_reset(
    State(state): State<AppState>,
    Json(body): Json<EmailRequest>,
) -> ApiResult<Json<Value>> {
    let email = body
        .email
        .ok_or_else(|| ApiError::field("email", "This field is required."))?;

    if let Some(user) = state.users.find_by_email(&email).await? {
        let token = generate_token();
        let expires = Utc::now() + Duration::hours(RESET_TOKEN_HOURS);
        state
            .users
            .create_reset(user.id, &hash_token(&token), expires)
            .await?;

        let frontend = state.config.frontend_origin.trim_end_matches('/');
        let reset_url = format!("{}/#/reset-password/{}/{}", frontend, encode_uid(user.id), token);
        warn!("no mail transport configured, password reset link for {email}: {reset_url}");
    }

    Ok(Json(json!({
        "message": "Password reset instructions sent if email exists",
    })))
}

#[derive(Deserialize)]
struct PasswordResetConfirmRequest {
    uid: Option<String>,
    token: Option<String>,
    new_password: Option<String>,
    confirm_password: Option<String>,
}

/// Finish a password reset with the uid and token from the emailed link
async fn password_reset_confirm(
    State(state): State<AppState>,
    Json(body): Json<PasswordResetConfirmRequest>,
) -> ApiResult<Json<Value>> {
    let (Some(uid), Some(token), Some(new_password)) = (body.uid, body.token, body.new_password)
    else {
        return Err(ApiError::BadRequest("Missing required fields".into()));
    };
    if let Some(confirm) = body.confirm_password {
        if new_password != confirm {
            return Err(ApiError::BadRequest("Passwords do not match".into()));
        }
    }

    let user_id = decode_uid(&uid).ok_or_else(|| ApiError::BadRequest("Invalid reset link".into()))?;
    if state.users.find_by_id(user_id).await?.is_none() {
        return Err(ApiError::BadRequest("Invalid reset link".into()));
    }

    let claimed = state.users.take_valid_reset(&hash_token(&token)).await?;
    if claimed != Some(user_id) {
        return Err(ApiError::BadRequest("Invalid or expired reset link".into()));
    }

    state.users.set_password(user_id, &hash_password(&new_password)).await?;
    Ok(Json(json!({ "message": "Password reset successful" })))
}

#[derive(Deserialize)]
struct ChangePasswordRequest {
    old_password: Option<String>,
    new_password: Option<String>,
}

/// Change the password of the logged-in account
async fn change_password(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(body): Json<ChangePasswordRequest>,
) -> ApiResult<Json<Value>> {
    let (Some(old_password), Some(new_password)) = (body.old_password, body.new_password) else {
        return Err(ApiError::BadRequest(
            "Both old and new passwords are required".into(),
        ));
    };

    let (_, stored_hash) = state
        .users
        .credentials_by_email(&user.email)
        .await?
        .ok_or(ApiError::InvalidToken)?;
    if !verify_password(&old_password, &stored_hash) {
        return Err(ApiError::BadRequest("Current password is incorrect".into()));
    }

    state.users.set_password(user.id, &hash_password(&new_password)).await?;
    Ok(Json(json!({ "message": "Password changed successfully" })))
}

/// Profile of the logged-in account
async fn profile(AuthUser(user): AuthUser) -> Json<User> {
    Json(user)
}

/// Merge the supplied fields into the profile
async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(patch): Json<ProfilePatch>,
) -> ApiResult<Json<User>> {
    if let Some(phone) = patch.phone_number.as_deref() {
        if let Err(DomainError::InvalidInput(msg)) = validate_phone(phone) {
            return Err(ApiError::field("phone_number", &msg));
        }
    }
    let updated = state.users.update_profile(user.id, &patch).await?;
    Ok(Json(updated))
}

/// Alias for profile, kept for clients using /users/me/
async fn me(AuthUser(user): AuthUser) -> Json<User> {
    Json(user)
}

fn require(value: Option<String>, field: &str) -> ApiResult<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::field(field, "This field is required.")),
    }
}
