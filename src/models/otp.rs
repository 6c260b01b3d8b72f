use serde::Deserialize;
use rocket_okapi::okapi::schemars::JsonSchema;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SendOtpDto {
    pub email: Option<String>,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct VerifyOtpDto {
    pub email: Option<String>,
    pub otp: Option<String>,
}
