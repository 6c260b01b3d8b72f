use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use rocket_okapi::okapi::schemars::JsonSchema;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub company: String,
    pub department: Option<String>,
    pub rating: i32, // 1-5
    pub review: String,
    pub work_life_balance: Option<i32>,
    pub salary: Option<i32>,
    pub promotions: Option<i32>,
    pub job_security: Option<i32>,
    pub skill_development: Option<i32>,
    pub work_satisfaction: Option<i32>,
    pub company_culture: Option<i32>,
    pub gender: Option<String>,
    #[serde(default)]
    pub likes: i32,
    #[serde(default)]
    pub dislikes: i32,
    pub timestamp: DateTime,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateReviewDto {
    pub company: Option<String>,
    pub department: Option<String>,
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub work_life_balance: Option<i32>,
    pub salary: Option<i32>,
    pub promotions: Option<i32>,
    pub job_security: Option<i32>,
    pub skill_development: Option<i32>,
    pub work_satisfaction: Option<i32>,
    pub company_culture: Option<i32>,
    pub gender: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct VoteReviewDto {
    pub action: Option<String>, // "like" or "dislike"
}
