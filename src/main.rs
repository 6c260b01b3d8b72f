#[macro_use]
extern crate rocket;

mod config;
mod db;
mod guards;
mod models;
mod routes;
mod search;
mod services;
mod utils;

use dotenvy::dotenv;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::{Build, Request, Response, Rocket};
use rocket_okapi::swagger_ui::{SwaggerUIConfig, make_swagger_ui};

use services::OtpStore;

/* ----------------------------- CORS ----------------------------- */

pub struct CORS;

#[rocket::async_trait]
impl Fairing for CORS {
    fn info(&self) -> Info {
        Info {
            name: "CORS",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        if let Some(origin) = request.headers().get_one("Origin") {
            response.set_header(Header::new("Access-Control-Allow-Origin", origin));
        }

        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "GET, POST, PUT, DELETE, OPTIONS",
        ));

        response.set_header(Header::new(
            "Access-Control-Allow-Headers",
            "Content-Type, Authorization",
        ));

        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

/* ----------------------------- OPTIONS ----------------------------- */

#[options("/<_..>")]
fn options_handler() {}

#[get("/")]
fn index() -> &'static str {
    "Server is running!"
}

/* ----------------------------- ERRORS ----------------------------- */

#[catch(404)]
fn not_found() -> rocket::serde::json::Value {
    rocket::serde::json::json!({
        "success": false,
        "message": "Resource not found"
    })
}

#[catch(500)]
fn internal_error() -> rocket::serde::json::Value {
    rocket::serde::json::json!({
        "success": false,
        "message": "Internal server error"
    })
}

/* ----------------------------- SWAGGER ----------------------------- */

fn swagger_config() -> SwaggerUIConfig {
    SwaggerUIConfig {
        url: "/openapi.json".to_string(),
        ..Default::default()
    }
}

/* ----------------------------- LAUNCH ----------------------------- */

#[launch]
fn rocket() -> Rocket<Build> {
    dotenv().ok();
    env_logger::init();

    println!("🚀 ManageJob API running");
    println!("📚 Swagger UI → http://localhost:8000/api/docs");

    rocket::build()
        .attach(db::init())
        .attach(CORS)
        .manage(OtpStore::new())
        .mount("/", routes![options_handler, index, routes::auth::login])
        .mount(
            "/api",
            routes![
                // Auth
                routes::auth::send_otp,
                routes::auth::verify_otp,
                routes::auth::create_account,
                // Candidate profiles
                routes::candidate::get_user_details,
                routes::candidate::update_user_details,
                routes::candidate::get_profile,
                routes::candidate::update_profile,
                // Jobs
                routes::job::list_jobs,
                routes::job::create_job,
                routes::job::get_job,
                routes::job::recruiter_jobs,
                // Saved jobs
                routes::job::get_saved_jobs,
                routes::job::save_job,
                routes::job::remove_saved_job,
                // Applications
                routes::application::apply_job,
                routes::application::user_applications,
                routes::application::job_applications,
                routes::application::update_application_status,
                // Reviews
                routes::review::list_reviews,
                routes::review::search_reviews,
                routes::review::get_review,
                routes::review::create_review,
                routes::review::vote_review,
                // Candidate search
                routes::search::search_candidates,
                routes::search::search_resumes,
            ],
        )
        .mount("/api/docs", make_swagger_ui(&swagger_config()))
        .register("/", catchers![not_found, internal_error])
}
