use log::info;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use mongodb::bson::{doc, oid::ObjectId, DateTime};

use crate::db::DbConn;
use crate::guards::AuthGuard;
use crate::models::{
    ApplyJobDto, Candidate, Job, JobApplication, UpdateApplicationStatusDto, STATUS_APPLIED,
};
use crate::services::EmailService;
use crate::utils::{ApiError, ApiResponse};

#[openapi(tag = "Applications")]
#[post("/apply-job", data = "<dto>")]
pub async fn apply_job(
    db: &State<DbConn>,
    auth: AuthGuard,
    dto: Json<ApplyJobDto>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let job_id = dto
        .job_id
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request("Job ID is required"))?;
    let job_id =
        ObjectId::parse_str(job_id).map_err(|_| ApiError::bad_request("Invalid job id"))?;

    info!("{} applying to job {}", auth.email, job_id.to_hex());

    let job = db
        .collection::<Job>("jobs")
        .find_one(doc! { "_id": job_id, "is_active": true }, None)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?;

    if job.is_none() {
        return Err(ApiError::not_found("Job not found or no longer active"));
    }

    let existing = db
        .collection::<JobApplication>("job_applications")
        .find_one(doc! { "user_id": auth.user_id, "job_id": job_id }, None)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?;

    if existing.is_some() {
        return Err(ApiError::conflict("You have already applied to this job"));
    }

    let application = JobApplication {
        id: None,
        user_id: auth.user_id,
        job_id,
        status: STATUS_APPLIED.to_string(),
        created_at: DateTime::now(),
    };

    db.collection::<JobApplication>("job_applications")
        .insert_one(&application, None)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to apply to job: {}", e)))?;

    Ok(Json(ApiResponse::success_with_message(
        "Application submitted successfully".to_string(),
        serde_json::json!({
            "user_id": application.user_id.to_hex(),
            "job_id": application.job_id.to_hex(),
            "status": application.status,
            "created_at": application.created_at,
        }),
    )))
}

/// Job ids the caller has applied to.
#[openapi(tag = "Applications")]
#[get("/user-applications")]
pub async fn user_applications(
    db: &State<DbConn>,
    auth: AuthGuard,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let mut cursor = db
        .collection::<JobApplication>("job_applications")
        .find(doc! { "user_id": auth.user_id }, None)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?;

    let mut job_ids = Vec::new();
    while cursor
        .advance()
        .await
        .map_err(|e| ApiError::internal_error(format!("Cursor error: {}", e)))?
    {
        let application: JobApplication = cursor
            .deserialize_current()
            .map_err(|e| ApiError::internal_error(format!("Deserialization error: {}", e)))?;
        job_ids.push(application.job_id.to_hex());
    }

    Ok(Json(ApiResponse::success(serde_json::json!(job_ids))))
}

/// Applications for one of the caller's jobs, joined with candidate details.
#[openapi(tag = "Applications")]
#[get("/job-applications/<job_id>")]
pub async fn job_applications(
    db: &State<DbConn>,
    auth: AuthGuard,
    job_id: String,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let job_id =
        ObjectId::parse_str(&job_id).map_err(|_| ApiError::bad_request("Invalid job id"))?;

    let job = db
        .collection::<Job>("jobs")
        .find_one(doc! { "_id": job_id, "recruiter_id": auth.user_id }, None)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found("Job not found or you do not have permission"))?;

    let mut cursor = db
        .collection::<JobApplication>("job_applications")
        .find(doc! { "job_id": job_id }, None)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?;

    let mut applications = Vec::new();
    while cursor
        .advance()
        .await
        .map_err(|e| ApiError::internal_error(format!("Cursor error: {}", e)))?
    {
        let application: JobApplication = cursor
            .deserialize_current()
            .map_err(|e| ApiError::internal_error(format!("Deserialization error: {}", e)))?;
        applications.push(application);
    }

    let mut rows = Vec::with_capacity(applications.len());
    for application in applications {
        let candidate = db
            .collection::<Candidate>("user_details")
            .find_one(doc! { "user_id": application.user_id }, None)
            .await
            .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?;

        let candidate_details = candidate.map(|c| {
            serde_json::json!({
                "full_name": c.full_name,
                "email": c.email,
                "skills": c.skills,
                "experience": c.experience,
                "curr_role": c.curr_role,
                "education": c.education,
                "resume_link": c.resume_link,
            })
        });

        rows.push(serde_json::json!({
            "user_id": application.user_id.to_hex(),
            "job_id": application.job_id.to_hex(),
            "status": application.status,
            "created_at": application.created_at,
            "user_details": candidate_details,
            "jobs": {
                "job_title": job.job_title,
                "company": job.company,
            },
        }));
    }

    Ok(Json(ApiResponse::success(serde_json::json!(rows))))
}

/// Update an application's status and notify the candidate by mail.
#[openapi(tag = "Applications")]
#[put("/job-applications/<job_id>/<user_id>", data = "<dto>")]
pub async fn update_application_status(
    db: &State<DbConn>,
    auth: AuthGuard,
    job_id: String,
    user_id: String,
    dto: Json<UpdateApplicationStatusDto>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let status = dto
        .status
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request("Status is required"))?;

    let job_id =
        ObjectId::parse_str(&job_id).map_err(|_| ApiError::bad_request("Invalid job id"))?;
    let user_id =
        ObjectId::parse_str(&user_id).map_err(|_| ApiError::bad_request("Invalid user id"))?;

    let job = db
        .collection::<Job>("jobs")
        .find_one(doc! { "_id": job_id, "recruiter_id": auth.user_id }, None)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found("Job not found or you do not have permission"))?;

    let result = db
        .collection::<JobApplication>("job_applications")
        .update_one(
            doc! { "job_id": job_id, "user_id": user_id },
            doc! { "$set": { "status": status } },
            None,
        )
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?;

    if result.matched_count == 0 {
        return Err(ApiError::not_found("Application not found"));
    }

    let candidate = db
        .collection::<Candidate>("user_details")
        .find_one(doc! { "user_id": user_id }, None)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found("Candidate not found"))?;

    let candidate_email = candidate
        .email
        .as_deref()
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::not_found("Candidate not found"))?;
    let candidate_name = candidate.full_name.as_deref().unwrap_or("Candidate");

    let sent = EmailService::send_application_status_email(
        candidate_email,
        candidate_name,
        status,
        &job.job_title,
        &job.company,
    )
    .await;

    if !sent {
        // The status update has already been persisted; only delivery failed.
        return Err(ApiError::internal_error(
            "Failed to send status notification email",
        ));
    }

    Ok(Json(ApiResponse::success_with_message(
        "Application status updated successfully and email sent".to_string(),
        serde_json::json!({
            "job_id": job_id.to_hex(),
            "user_id": user_id.to_hex(),
            "status": status,
        }),
    )))
}
