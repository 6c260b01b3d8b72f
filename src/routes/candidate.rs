use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::db::DbConn;
use crate::models::{Candidate, UpdateProfileDto, UpdateUserDetailsDto};
use crate::utils::{ApiError, ApiResponse};

#[openapi(tag = "Profile")]
#[get("/user-details/<user_id>")]
pub async fn get_user_details(
    db: &State<DbConn>,
    user_id: String,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let object_id = ObjectId::parse_str(&user_id)
        .map_err(|_| ApiError::bad_request("Invalid user id"))?;

    let candidate = db
        .collection::<Candidate>("user_details")
        .find_one(doc! { "user_id": object_id }, None)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(ApiResponse::success(serde_json::json!(candidate))))
}

#[openapi(tag = "Profile")]
#[put("/user-details/<user_id>", data = "<dto>")]
pub async fn update_user_details(
    db: &State<DbConn>,
    user_id: String,
    dto: Json<UpdateUserDetailsDto>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let object_id = ObjectId::parse_str(&user_id)
        .map_err(|_| ApiError::bad_request("Invalid user id"))?;

    let mut update_doc = Document::new();
    insert_opt(&mut update_doc, "full_name", &dto.full_name);
    insert_opt(&mut update_doc, "phone", &dto.phone);
    insert_opt(&mut update_doc, "email", &dto.email);
    insert_opt(&mut update_doc, "gender", &dto.gender);
    insert_opt(&mut update_doc, "dob", &dto.dob);
    insert_opt(&mut update_doc, "address", &dto.address);
    insert_opt(&mut update_doc, "education", &dto.education);
    insert_opt(&mut update_doc, "skills", &dto.skills);
    insert_opt(&mut update_doc, "curr_role", &dto.curr_role);
    insert_opt(&mut update_doc, "resume_link", &dto.resume_link);
    insert_opt(&mut update_doc, "languages", &dto.languages);
    insert_opt(&mut update_doc, "internships", &dto.internships);
    insert_opt(&mut update_doc, "projects", &dto.projects);
    insert_opt(&mut update_doc, "profile_summary", &dto.profile_summary);
    insert_opt(&mut update_doc, "accomplishments", &dto.accomplishments);
    insert_opt(&mut update_doc, "competitive_exams", &dto.competitive_exams);
    insert_opt(&mut update_doc, "employment", &dto.employment);
    insert_opt(&mut update_doc, "academic_achievements", &dto.academic_achievements);

    if update_doc.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }

    let result = db
        .collection::<Candidate>("user_details")
        .update_one(
            doc! { "user_id": object_id },
            doc! { "$set": update_doc },
            None,
        )
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?;

    if result.matched_count == 0 {
        return Err(ApiError::not_found("User not found"));
    }

    let candidate = db
        .collection::<Candidate>("user_details")
        .find_one(doc! { "user_id": object_id }, None)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(ApiResponse::success_with_message(
        "User details updated successfully".to_string(),
        serde_json::json!(candidate),
    )))
}

#[openapi(tag = "Profile")]
#[get("/profile/<email>")]
pub async fn get_profile(
    db: &State<DbConn>,
    email: String,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let candidate = db
        .collection::<Candidate>("user_details")
        .find_one(doc! { "email": &email }, None)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found("Profile not found"))?;

    Ok(Json(ApiResponse::success(serde_json::json!(candidate))))
}

#[openapi(tag = "Profile")]
#[post("/profile/update", data = "<dto>")]
pub async fn update_profile(
    db: &State<DbConn>,
    dto: Json<UpdateProfileDto>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let email = dto
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::bad_request("Email is required."))?
        .to_string();

    let mut update_doc = Document::new();
    insert_opt(&mut update_doc, "full_name", &dto.full_name);
    insert_opt(&mut update_doc, "phone", &dto.phone);
    insert_opt(&mut update_doc, "experience", &dto.experience);
    insert_opt(&mut update_doc, "education", &dto.education);
    insert_opt(&mut update_doc, "field_of_study", &dto.field_of_study);
    insert_opt(&mut update_doc, "institution", &dto.institution);
    if let Some(year) = dto.graduation_year {
        update_doc.insert("graduation_year", year);
    }
    insert_opt(&mut update_doc, "achievements", &dto.achievements);
    insert_opt(&mut update_doc, "skills", &dto.skills);
    insert_opt(&mut update_doc, "curr_role", &dto.curr_role);
    insert_opt(&mut update_doc, "resume_link", &dto.resume_link);
    insert_opt(&mut update_doc, "profile_picture", &dto.profile_picture);
    insert_opt(&mut update_doc, "portfolio_links", &dto.portfolio_links);
    if let Some(sync) = dto.linkedin_sync {
        update_doc.insert("linkedin_sync", sync);
    }

    if update_doc.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }

    let result = db
        .collection::<Candidate>("user_details")
        .update_one(doc! { "email": &email }, doc! { "$set": update_doc }, None)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?;

    if result.matched_count == 0 {
        return Err(ApiError::not_found("Profile not found"));
    }

    let candidate = db
        .collection::<Candidate>("user_details")
        .find_one(doc! { "email": &email }, None)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found("Profile not found"))?;

    Ok(Json(ApiResponse::success_with_message(
        "Profile updated successfully!".to_string(),
        serde_json::json!(candidate),
    )))
}

fn insert_opt(update_doc: &mut Document, field: &str, value: &Option<String>) {
    if let Some(v) = value {
        update_doc.insert(field, v);
    }
}
