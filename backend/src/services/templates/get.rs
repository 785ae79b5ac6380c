//! # Submission Retrieval Service
//!
//! Fetches a single stored template submission. It provides the backend logic
//! for the `GET /api/templates/{submission_id}` endpoint.
//!
//! The stored body is the exact JSON that passed validation at save time, so
//! it is returned verbatim with an `application/json` content type instead of
//! being deserialized and re-serialized.

use actix_web::web;
use rusqlite::params;

use crate::config::Config;
use crate::db;

/// Actix web handler for the `GET /api/templates/{submission_id}` endpoint.
///
/// # Returns
/// - `200 OK` with the stored template JSON on success.
/// - `404 Not Found` when no submission exists for the id.
/// - `503 Service Unavailable` when the database cannot be read.
pub async fn process(
    config: web::Data<Config>,
    submission_id: web::Path<String>,
) -> impl actix_web::Responder {
    match get_submission(&config, &submission_id) {
        Ok(body) => actix_web::HttpResponse::Ok()
            .content_type("application/json")
            .body(body),
        Err(e) if e == "Submission not found" => actix_web::HttpResponse::NotFound().body(e),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Error retrieving template: {}", e)),
    }
}

/// Fetches the stored template JSON for a submission id.
pub fn get_submission(config: &Config, submission_id: &str) -> Result<String, String> {
    let conn = db::open(&config.db_path)?;

    let mut stmt = conn
        .prepare("SELECT body FROM submissions WHERE id = ?1")
        .map_err(|e| e.to_string())?;
    let rows = stmt
        .query_map(params![submission_id], |row| row.get::<_, String>(0))
        .map_err(|e| e.to_string())?;

    let result = match rows.into_iter().next() {
        Some(Ok(body)) => Ok(body),
        Some(Err(e)) => Err(e.to_string()),
        None => Err("Submission not found".to_string()),
    };
    result
}
