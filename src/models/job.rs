use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use rocket_okapi::okapi::schemars::JsonSchema;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Job {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub recruiter_id: ObjectId,
    pub company: String,
    pub job_title: String,
    pub location: Option<String>,
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
    pub job_type: Option<String>,
    pub job_description: Option<String>,
    pub skills: Option<String>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
    pub work_mode: Option<String>,
    pub industry: Option<String>,
    pub qualification: Option<String>,
    pub vacancies: Option<i32>,
    pub requirements: Option<String>,
    pub perks: Option<String>,
    pub candidate_profile: Option<String>,
    pub about_company: Option<String>,
    pub employment_category: Option<String>,
    pub expiry_date: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateJobDto {
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
    pub job_type: Option<String>,
    pub job_description: Option<String>,
    pub skills: Option<String>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
    pub work_mode: Option<String>,
    pub industry: Option<String>,
    pub qualification: Option<String>,
    pub vacancies: Option<i32>,
    pub requirements: Option<String>,
    pub perks: Option<String>,
    pub candidate_profile: Option<String>,
    pub about_company: Option<String>,
    pub employment_category: Option<String>,
    pub expiry_date: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SaveJobDto {
    pub job_id: Option<String>,
}
