use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use rocket_okapi::okapi::schemars::JsonSchema;

/// A candidate record in the `user_details` collection: one row per job
/// seeker, holding everything a recruiter can search on. Nearly all fields
/// are free text supplied by the candidate.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Candidate {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<ObjectId>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    /// ISO `YYYY-MM-DD`, compared lexically by the age filters.
    pub dob: Option<String>,
    pub address: Option<String>,
    pub education: Option<String>,
    pub education_detailed: Option<String>,
    pub skills: Option<String>,
    pub curr_role: Option<String>,
    pub experience: Option<String>,
    pub resume_link: Option<String>,
    pub languages: Option<String>,
    pub internships: Option<String>,
    pub projects: Option<String>,
    pub profile_summary: Option<String>,
    pub accomplishments: Option<String>,
    pub competitive_exams: Option<String>,
    pub employment: Option<String>,
    pub academic_achievements: Option<String>,
    pub field_of_study: Option<String>,
    pub institution: Option<String>,
    pub graduation_year: Option<i32>,
    pub achievements: Option<String>,
    pub profile_picture: Option<String>,
    pub portfolio_links: Option<String>,
    pub linkedin_sync: Option<bool>,
    pub company: Option<String>,
    pub pref_location: Option<String>,
    pub pin_code: Option<String>,
    pub job_type: Option<String>,
    pub availability: Option<String>,
}

/// Body of `PUT /api/user-details/<user_id>`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateUserDetailsDto {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<String>,
    pub address: Option<String>,
    pub education: Option<String>,
    pub skills: Option<String>,
    pub curr_role: Option<String>,
    pub resume_link: Option<String>,
    pub languages: Option<String>,
    pub internships: Option<String>,
    pub projects: Option<String>,
    pub profile_summary: Option<String>,
    pub accomplishments: Option<String>,
    pub competitive_exams: Option<String>,
    pub employment: Option<String>,
    pub academic_achievements: Option<String>,
}

/// Body of `POST /api/profile/update`, keyed by email.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateProfileDto {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub field_of_study: Option<String>,
    pub institution: Option<String>,
    pub graduation_year: Option<i32>,
    pub achievements: Option<String>,
    pub skills: Option<String>,
    pub curr_role: Option<String>,
    pub resume_link: Option<String>,
    pub profile_picture: Option<String>,
    pub portfolio_links: Option<String>,
    pub linkedin_sync: Option<bool>,
}
