use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use rocket_okapi::okapi::schemars::JsonSchema;

pub const STATUS_APPLIED: &str = "applied";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JobApplication {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub job_id: ObjectId,
    pub status: String,
    pub created_at: DateTime,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ApplyJobDto {
    pub job_id: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateApplicationStatusDto {
    pub status: Option<String>,
}
