use serde::{Deserialize, Serialize};
use rocket_okapi::okapi::schemars::JsonSchema;

use crate::models::Candidate;

/// Body of `POST /api/search-candidates` (recruiter dashboard search).
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSearchDto {
    pub full_name: Option<String>,
    pub skills: Option<String>,
    /// Minimum years of experience, applied after the fetch because the
    /// stored value is free text.
    pub experience: Option<String>,
    pub curr_role: Option<String>,
    pub education: Option<String>,
    pub field_of_study: Option<String>,
    pub institution: Option<String>,
    pub job_type: Option<String>,
    pub availability: Option<String>,
    pub pref_location: Option<String>,
    pub gender: Option<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub languages: Option<String>,
    pub graduation_year: Option<i32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ExperienceRange {
    pub min: Option<String>,
    pub max: Option<String>,
}

/// Body of `POST /api/search` (resume search).
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSearchDto {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Option<String>,
    #[serde(default)]
    pub mark_all_skills_as_mandatory: bool,
    pub experience: Option<ExperienceRange>,
    pub location: Option<String>,
    pub pref_location: Option<String>,
    #[serde(default)]
    pub include_relocate_willing: bool,
    pub pin_code: Option<String>,
    pub company: Option<String>,
    pub curr_role: Option<String>,
    pub education: Option<String>,
    pub education_detailed: Option<String>,
    pub field_of_study: Option<String>,
    pub institution: Option<String>,
    pub graduation_year: Option<i32>,
    pub job_type: Option<Vec<String>>,
    pub gender: Option<String>,
    pub achievements: Option<String>,
    /// Accepted for wire compatibility; no matching column exists.
    pub active_period: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub success: bool,
    pub results: Vec<Candidate>,
    pub total: usize,
}
