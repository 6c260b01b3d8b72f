use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::FindOptions;

use crate::db::DbConn;
use crate::guards::AuthGuard;
use crate::models::{CreateReviewDto, Review, VoteReviewDto};
use crate::utils::{ApiError, ApiResponse};

async fn fetch_reviews(db: &DbConn, filter: Document) -> Result<Vec<Review>, ApiError> {
    let find_options = FindOptions::builder()
        .sort(doc! { "timestamp": -1 })
        .build();

    let mut cursor = db
        .collection::<Review>("reviews")
        .find(filter, find_options)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?;

    let mut reviews = Vec::new();
    while cursor
        .advance()
        .await
        .map_err(|e| ApiError::internal_error(format!("Cursor error: {}", e)))?
    {
        let review = cursor
            .deserialize_current()
            .map_err(|e| ApiError::internal_error(format!("Deserialization error: {}", e)))?;
        reviews.push(review);
    }

    Ok(reviews)
}

#[openapi(tag = "Reviews")]
#[get("/reviews")]
pub async fn list_reviews(
    db: &State<DbConn>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let reviews = fetch_reviews(db, Document::new()).await?;
    Ok(Json(ApiResponse::success(serde_json::json!(reviews))))
}

#[openapi(tag = "Reviews")]
#[get("/reviews/search?<company>")]
pub async fn search_reviews(
    db: &State<DbConn>,
    company: Option<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let filter = match company.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(company) => doc! {
            "company": { "$regex": regex::escape(company), "$options": "i" }
        },
        None => Document::new(),
    };

    let reviews = fetch_reviews(db, filter).await?;
    Ok(Json(ApiResponse::success(serde_json::json!(reviews))))
}

#[openapi(tag = "Reviews")]
#[get("/reviews/<review_id>")]
pub async fn get_review(
    db: &State<DbConn>,
    review_id: String,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let object_id = ObjectId::parse_str(&review_id)
        .map_err(|_| ApiError::bad_request("Invalid review ID"))?;

    let review = db
        .collection::<Review>("reviews")
        .find_one(doc! { "_id": object_id }, None)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found("Review not found"))?;

    Ok(Json(ApiResponse::success(serde_json::json!(review))))
}

#[openapi(tag = "Reviews")]
#[post("/reviews", data = "<dto>")]
pub async fn create_review(
    db: &State<DbConn>,
    _auth: AuthGuard,
    dto: Json<CreateReviewDto>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let dto = dto.into_inner();

    let (company, rating, review_text) = match (dto.company, dto.rating, dto.review) {
        (Some(company), Some(rating), Some(review))
            if !company.trim().is_empty() && !review.trim().is_empty() =>
        {
            (company, rating, review)
        }
        _ => {
            return Err(ApiError::bad_request(
                "Company, rating, and review are required",
            ))
        }
    };

    if !(1..=5).contains(&rating) {
        return Err(ApiError::bad_request("Rating must be between 1 and 5"));
    }

    let review = Review {
        id: None,
        company,
        department: dto.department,
        rating,
        review: review_text,
        work_life_balance: dto.work_life_balance,
        salary: dto.salary,
        promotions: dto.promotions,
        job_security: dto.job_security,
        skill_development: dto.skill_development,
        work_satisfaction: dto.work_satisfaction,
        company_culture: dto.company_culture,
        gender: dto.gender,
        likes: 0,
        dislikes: 0,
        timestamp: DateTime::now(),
    };

    let result = db
        .collection::<Review>("reviews")
        .insert_one(&review, None)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to submit review: {}", e)))?;

    Ok(Json(ApiResponse::success_with_message(
        "Review submitted successfully".to_string(),
        serde_json::json!({
            "review_id": result.inserted_id.as_object_id().map(|id| id.to_hex())
        }),
    )))
}

#[openapi(tag = "Reviews")]
#[put("/reviews/<review_id>/vote", data = "<dto>")]
pub async fn vote_review(
    db: &State<DbConn>,
    review_id: String,
    dto: Json<VoteReviewDto>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let action = match dto.action.as_deref() {
        Some(action @ ("like" | "dislike")) => action,
        _ => {
            return Err(ApiError::bad_request(
                "Invalid action. Use \"like\" or \"dislike\"",
            ))
        }
    };

    let object_id = ObjectId::parse_str(&review_id)
        .map_err(|_| ApiError::bad_request("Invalid review ID"))?;

    let update = if action == "like" {
        doc! { "$inc": { "likes": 1 } }
    } else {
        doc! { "$inc": { "dislikes": 1 } }
    };

    let result = db
        .collection::<Review>("reviews")
        .update_one(doc! { "_id": object_id }, update, None)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?;

    if result.matched_count == 0 {
        return Err(ApiError::not_found("Review not found"));
    }

    let review = db
        .collection::<Review>("reviews")
        .find_one(doc! { "_id": object_id }, None)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found("Review not found"))?;

    Ok(Json(ApiResponse::success_with_message(
        format!("Review {}d successfully", action),
        serde_json::json!(review),
    )))
}
