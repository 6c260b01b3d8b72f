use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use mongodb::bson::{doc, oid::ObjectId, DateTime};

use crate::db::DbConn;
use crate::guards::AuthGuard;
use crate::models::{CreateJobDto, Job, JobApplication, SaveJobDto, User};
use crate::utils::{ApiError, ApiResponse};

#[openapi(tag = "Jobs")]
#[get("/jobs")]
pub async fn list_jobs(
    db: &State<DbConn>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let mut cursor = db
        .collection::<Job>("jobs")
        .find(doc! { "is_active": true }, None)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?;

    let mut jobs = Vec::new();
    while cursor
        .advance()
        .await
        .map_err(|e| ApiError::internal_error(format!("Cursor error: {}", e)))?
    {
        let job = cursor
            .deserialize_current()
            .map_err(|e| ApiError::internal_error(format!("Deserialization error: {}", e)))?;
        jobs.push(job);
    }

    Ok(Json(ApiResponse::success(serde_json::json!(jobs))))
}

#[openapi(tag = "Jobs")]
#[post("/jobs", data = "<dto>")]
pub async fn create_job(
    db: &State<DbConn>,
    auth: AuthGuard,
    dto: Json<CreateJobDto>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let dto = dto.into_inner();

    let (job_title, company) = match (dto.job_title, dto.company) {
        (Some(job_title), Some(company))
            if !job_title.trim().is_empty() && !company.trim().is_empty() =>
        {
            (job_title, company)
        }
        _ => return Err(ApiError::bad_request("Job title and company are required")),
    };

    let job = Job {
        id: None,
        recruiter_id: auth.user_id,
        company,
        job_title,
        location: dto.location,
        min_salary: dto.min_salary,
        max_salary: dto.max_salary,
        job_type: dto.job_type,
        job_description: dto.job_description,
        skills: dto.skills,
        min_experience: dto.min_experience,
        max_experience: dto.max_experience,
        work_mode: dto.work_mode,
        industry: dto.industry,
        qualification: dto.qualification,
        vacancies: dto.vacancies,
        requirements: dto.requirements,
        perks: dto.perks,
        candidate_profile: dto.candidate_profile,
        about_company: dto.about_company,
        employment_category: dto.employment_category,
        expiry_date: dto.expiry_date,
        is_active: true,
        created_at: DateTime::now(),
    };

    let result = db
        .collection::<Job>("jobs")
        .insert_one(&job, None)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to create job posting: {}", e)))?;

    Ok(Json(ApiResponse::success_with_message(
        "Job posted successfully".to_string(),
        serde_json::json!({
            "job_id": result.inserted_id.as_object_id().map(|id| id.to_hex())
        }),
    )))
}

#[openapi(tag = "Jobs")]
#[get("/jobs/<job_id>")]
pub async fn get_job(
    db: &State<DbConn>,
    job_id: String,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let object_id =
        ObjectId::parse_str(&job_id).map_err(|_| ApiError::bad_request("Invalid job id"))?;

    let job = db
        .collection::<Job>("jobs")
        .find_one(doc! { "_id": object_id, "is_active": true }, None)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;

    Ok(Json(ApiResponse::success(serde_json::json!(job))))
}

/// The caller's active postings, each annotated with its application count.
#[openapi(tag = "Jobs")]
#[get("/recruiter/jobs")]
pub async fn recruiter_jobs(
    db: &State<DbConn>,
    auth: AuthGuard,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let mut cursor = db
        .collection::<Job>("jobs")
        .find(
            doc! { "recruiter_id": auth.user_id, "is_active": true },
            None,
        )
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?;

    let mut jobs = Vec::new();
    while cursor
        .advance()
        .await
        .map_err(|e| ApiError::internal_error(format!("Cursor error: {}", e)))?
    {
        let job: Job = cursor
            .deserialize_current()
            .map_err(|e| ApiError::internal_error(format!("Deserialization error: {}", e)))?;
        jobs.push(job);
    }

    let mut annotated = Vec::with_capacity(jobs.len());
    for job in jobs {
        let applies = match job.id {
            Some(id) => db
                .collection::<JobApplication>("job_applications")
                .count_documents(doc! { "job_id": id }, None)
                .await
                .map_err(|e| ApiError::internal_error(format!("Count error: {}", e)))?,
            None => 0,
        };

        let mut row = serde_json::json!(job);
        row["applies"] = serde_json::json!(applies);
        annotated.push(row);
    }

    Ok(Json(ApiResponse::success(serde_json::json!(annotated))))
}

/// --------------------
/// Saved jobs
/// --------------------
#[openapi(tag = "SavedJobs")]
#[get("/user-saved-jobs")]
pub async fn get_saved_jobs(
    db: &State<DbConn>,
    auth: AuthGuard,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let user = db
        .collection::<User>("users")
        .find_one(doc! { "_id": auth.user_id }, None)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(ApiResponse::success(serde_json::json!(user.saved_jobs))))
}

#[openapi(tag = "SavedJobs")]
#[post("/save-job", data = "<dto>")]
pub async fn save_job(
    db: &State<DbConn>,
    auth: AuthGuard,
    dto: Json<SaveJobDto>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let job_id = parse_job_id(&dto.job_id)?;

    let result = db
        .collection::<User>("users")
        .update_one(
            doc! { "_id": auth.user_id },
            doc! { "$addToSet": { "saved_jobs": &job_id } },
            None,
        )
        .await
        .map_err(|e| ApiError::internal_error(format!("Error saving job: {}", e)))?;

    if result.matched_count == 0 {
        return Err(ApiError::not_found("User not found"));
    }

    let message = if result.modified_count > 0 {
        "Job saved successfully"
    } else {
        "Job already saved"
    };

    let saved_jobs = fetch_saved_jobs(db, auth.user_id).await?;
    Ok(Json(ApiResponse::success_with_message(
        message.to_string(),
        serde_json::json!({ "saved_jobs": saved_jobs }),
    )))
}

#[openapi(tag = "SavedJobs")]
#[post("/remove-saved-job", data = "<dto>")]
pub async fn remove_saved_job(
    db: &State<DbConn>,
    auth: AuthGuard,
    dto: Json<SaveJobDto>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let job_id = parse_job_id(&dto.job_id)?;

    let result = db
        .collection::<User>("users")
        .update_one(
            doc! { "_id": auth.user_id },
            doc! { "$pull": { "saved_jobs": &job_id } },
            None,
        )
        .await
        .map_err(|e| ApiError::internal_error(format!("Error removing saved job: {}", e)))?;

    if result.matched_count == 0 {
        return Err(ApiError::not_found("User not found"));
    }

    let saved_jobs = fetch_saved_jobs(db, auth.user_id).await?;
    Ok(Json(ApiResponse::success_with_message(
        "Job removed successfully".to_string(),
        serde_json::json!({ "saved_jobs": saved_jobs }),
    )))
}

fn parse_job_id(job_id: &Option<String>) -> Result<String, ApiError> {
    let job_id = job_id
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request("Job ID is required"))?;

    // Saved ids are kept as hex strings; reject anything that isn't one.
    ObjectId::parse_str(job_id).map_err(|_| ApiError::bad_request("Invalid job id"))?;
    Ok(job_id.to_string())
}

async fn fetch_saved_jobs(db: &DbConn, user_id: ObjectId) -> Result<Vec<String>, ApiError> {
    let user = db
        .collection::<User>("users")
        .find_one(doc! { "_id": user_id }, None)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(user.saved_jobs)
}
