use chrono::{Datelike, Utc};
use log::error;
use rocket::serde::json::Json;
use rocket::State;

use crate::db::DbConn;
use crate::guards::AuthGuard;
use crate::models::{Candidate, CandidateSearchDto, ResumeSearchDto, SearchResults};
use crate::search::CandidateQuery;
use crate::utils::ApiError;

async fn fetch_candidates(db: &DbConn, query: &CandidateQuery) -> Result<Vec<Candidate>, ApiError> {
    let mut cursor = db
        .collection::<Candidate>("user_details")
        .find(query.filter_document(), None)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?;

    let mut candidates = Vec::new();
    while cursor
        .advance()
        .await
        .map_err(|e| ApiError::internal_error(format!("Cursor error: {}", e)))?
    {
        let candidate = cursor
            .deserialize_current()
            .map_err(|e| ApiError::internal_error(format!("Deserialization error: {}", e)))?;
        candidates.push(candidate);
    }

    Ok(query.apply_experience_bounds(candidates))
}

/// Recruiter dashboard search. Returns the matching candidate records as a
/// bare array.
#[post("/search-candidates", data = "<dto>")]
pub async fn search_candidates(
    db: &State<DbConn>,
    _auth: AuthGuard,
    dto: Json<CandidateSearchDto>,
) -> Result<Json<Vec<Candidate>>, ApiError> {
    let dto = dto.into_inner();
    let current_year = Utc::now().year();

    let query = CandidateQuery::new()
        .substring("full_name", dto.full_name.as_deref())
        .substring("skills", dto.skills.as_deref())
        .substring("curr_role", dto.curr_role.as_deref())
        .substring("education", dto.education.as_deref())
        .substring("field_of_study", dto.field_of_study.as_deref())
        .substring("institution", dto.institution.as_deref())
        .equals("job_type", dto.job_type.as_deref())
        .equals("availability", dto.availability.as_deref())
        .substring("pref_location", dto.pref_location.as_deref())
        .categorical("gender", dto.gender.as_deref())
        .substring("languages", dto.languages.as_deref())
        .at_least_int("graduation_year", dto.graduation_year)
        .age_range(dto.min_age, dto.max_age, current_year)
        .min_experience(dto.experience.as_deref());

    let candidates = fetch_candidates(db, &query).await.map_err(|e| {
        error!("Error searching candidates: {}", e.message);
        ApiError::internal_error("Failed to search candidates")
    })?;

    Ok(Json(candidates))
}

/// Resume search. Same collection, a wider criteria set, and an enveloped
/// response.
#[post("/search", data = "<dto>")]
pub async fn search_resumes(
    db: &State<DbConn>,
    _auth: AuthGuard,
    dto: Json<ResumeSearchDto>,
) -> Result<Json<SearchResults>, ApiError> {
    let dto = dto.into_inner();

    let mut query = CandidateQuery::new()
        .substring("full_name", dto.full_name.as_deref())
        .substring("email", dto.email.as_deref())
        .equals("phone", dto.phone.as_deref());

    if let Some(skills) = dto.skills.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        if dto.mark_all_skills_as_mandatory {
            // One predicate per skill, so every listed skill must match.
            for skill in skills.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                query = query.substring("skills", Some(skill));
            }
        } else {
            query = query.substring("skills", Some(skills));
        }
    }

    if let Some(experience) = &dto.experience {
        query = query
            .min_experience(experience.min.as_deref())
            .max_experience(experience.max.as_deref());
    }

    query = query.substring("address", dto.location.as_deref());
    if dto.include_relocate_willing {
        query = query.substring("pref_location", dto.pref_location.as_deref());
    }

    let query = query
        .equals("pin_code", dto.pin_code.as_deref())
        .substring("company", dto.company.as_deref())
        .substring("curr_role", dto.curr_role.as_deref())
        .substring("education", dto.education.as_deref())
        .substring("education_detailed", dto.education_detailed.as_deref())
        .substring("field_of_study", dto.field_of_study.as_deref())
        .substring("institution", dto.institution.as_deref())
        .equals_int("graduation_year", dto.graduation_year)
        .any_of("job_type", dto.job_type.as_deref())
        .categorical("gender", dto.gender.as_deref())
        .substring("achievements", dto.achievements.as_deref());

    let results = fetch_candidates(db, &query).await.map_err(|e| {
        error!("Search error: {}", e.message);
        ApiError::internal_error("An error occurred while searching.")
    })?;

    let total = results.len();
    Ok(Json(SearchResults {
        success: true,
        results,
        total,
    }))
}
