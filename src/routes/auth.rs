use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use mongodb::bson::{doc, DateTime};

use crate::db::DbConn;
use crate::models::{
    Candidate, CreateAccountDto, LoginDto, SendOtpDto, User, UserResponse, VerifyOtpDto,
    ROLE_JOB_SEEKER,
};
use crate::services::{EmailService, JwtService, OtpStore, OtpVerifyError};
use crate::utils::{validate_email, ApiError, ApiResponse};

fn required<'a>(value: &'a Option<String>) -> Option<&'a str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// --------------------
/// Login
/// --------------------
#[openapi(tag = "Auth")]
#[post("/login", data = "<dto>")]
pub async fn login(
    db: &State<DbConn>,
    dto: Json<LoginDto>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let (email, password) = match (required(&dto.email), required(&dto.password)) {
        (Some(email), Some(password)) => (email, password),
        _ => return Err(ApiError::bad_request("Email and password are required.")),
    };

    let user = db
        .collection::<User>("users")
        .find_one(doc! { "email": email }, None)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password."))?;

    let password_ok = bcrypt::verify(password, &user.password_hash)
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    if !password_ok {
        return Err(ApiError::unauthorized("Invalid email or password."));
    }

    let user_id = user
        .id
        .ok_or_else(|| ApiError::internal_error("User record has no id"))?;

    let token = JwtService::generate_token(&user_id, &user.email)
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    let role = user.role.clone();

    Ok(Json(ApiResponse::success(serde_json::json!({
        "message": "Login successful!",
        "user": UserResponse::from(user),
        "role": role,
        "token": token
    }))))
}

/// --------------------
/// Send OTP
/// --------------------
#[openapi(tag = "Auth")]
#[post("/send-otp", data = "<dto>")]
pub async fn send_otp(
    db: &State<DbConn>,
    otp_store: &State<OtpStore>,
    dto: Json<SendOtpDto>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let email = required(&dto.email).ok_or_else(|| ApiError::bad_request("Email is required."))?;
    if !validate_email(email) {
        return Err(ApiError::bad_request("Invalid email"));
    }

    let existing = db
        .collection::<User>("users")
        .find_one(doc! { "email": email }, None)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    if existing.is_some() {
        return Err(ApiError::conflict("Email already registered."));
    }

    let code = OtpStore::generate_code();
    otp_store.put(email, &code);

    let full_name = dto.full_name.as_deref().unwrap_or("");
    if !EmailService::send_otp_email(email, full_name, &code).await {
        // Void the undelivered code so a retried request starts clean.
        otp_store.remove(email);
        return Err(ApiError::internal_error("Failed to send OTP"));
    }

    Ok(Json(ApiResponse::success(serde_json::json!({
        "message": "OTP sent successfully"
    }))))
}

/// --------------------
/// Verify OTP
/// --------------------
#[openapi(tag = "Auth")]
#[post("/verify-otp", data = "<dto>")]
pub async fn verify_otp(
    otp_store: &State<OtpStore>,
    dto: Json<VerifyOtpDto>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let (email, otp) = match (required(&dto.email), required(&dto.otp)) {
        (Some(email), Some(otp)) => (email, otp),
        _ => return Err(ApiError::bad_request("Email and OTP are required.")),
    };

    // The three failure kinds stay distinct so the client can tell the user
    // whether to re-request or just retype the code.
    match otp_store.verify(email, otp) {
        Ok(()) => Ok(Json(ApiResponse::success(serde_json::json!({
            "message": "OTP verified successfully"
        })))),
        Err(OtpVerifyError::NotFound) => Err(ApiError::bad_request(
            "No OTP request found. Please request a new OTP.",
        )),
        Err(OtpVerifyError::Expired) => Err(ApiError::bad_request(
            "OTP has expired. Please request a new OTP.",
        )),
        Err(OtpVerifyError::Mismatch) => Err(ApiError::bad_request("Invalid OTP.")),
    }
}

/// --------------------
/// Create account after OTP verification
/// --------------------
#[openapi(tag = "Auth")]
#[post("/create-account", data = "<dto>")]
pub async fn create_account(
    db: &State<DbConn>,
    dto: Json<CreateAccountDto>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let (full_name, email, password) = match (
        required(&dto.full_name),
        required(&dto.email),
        required(&dto.password),
    ) {
        (Some(full_name), Some(email), Some(password)) => (full_name, email, password),
        _ => return Err(ApiError::bad_request("All fields are required.")),
    };
    if !validate_email(email) {
        return Err(ApiError::bad_request("Invalid email"));
    }

    let existing = db
        .collection::<User>("users")
        .find_one(doc! { "email": email }, None)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    if existing.is_some() {
        return Err(ApiError::conflict("Email already registered."));
    }

    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    let user = User {
        id: None,
        name: full_name.to_string(),
        email: email.to_string(),
        password_hash,
        role: ROLE_JOB_SEEKER.to_string(),
        saved_jobs: Vec::new(),
        created_at: DateTime::now(),
    };

    let res = db
        .collection::<User>("users")
        .insert_one(&user, None)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    let user_id = res
        .inserted_id
        .as_object_id()
        .ok_or_else(|| ApiError::internal_error("Invalid user ID"))?;

    // Seed the candidate row so profile updates have a target.
    let candidate = Candidate {
        user_id: Some(user_id),
        full_name: Some(full_name.to_string()),
        email: Some(email.to_string()),
        ..Candidate::default()
    };
    db.collection::<Candidate>("user_details")
        .insert_one(&candidate, None)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    // Best-effort; a bounced welcome mail shouldn't undo the registration.
    EmailService::send_welcome_email(email, full_name).await;

    Ok(Json(ApiResponse::success_with_message(
        "Account created successfully".to_string(),
        serde_json::json!({ "user_id": user_id.to_hex() }),
    )))
}
