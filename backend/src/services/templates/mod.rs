//! # Template Service Module
//!
//! Aggregates the API endpoints related to submitted templates. It acts as a
//! router, directing incoming HTTP requests under the `/api/templates` path to
//! the handler logic defined in its sub-modules.
//!
//! ## Sub-modules:
//! - `save`: Accepts a template submission from the editor, validates it and
//!   persists it in the database.
//! - `get`: Returns a previously stored submission by its id.

pub mod get;
pub mod save;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

/// The base path for all template-related API endpoints.
const API_PATH: &str = "/api/templates";

/// Configures and returns the Actix `Scope` for all template-related routes.
///
/// # Registered Routes:
///
/// *   **`POST /save`**:
///     - **Handler**: `save::process`
///     - **Description**: Accepts a JSON payload from the editor. The payload
///       is validated against the template shape before anything is written;
///       a valid submission is stored under a freshly generated id, which is
///       returned in the response body.
///
/// *   **`GET /{submission_id}`**:
///     - **Handler**: `get::process`
///     - **Description**: Returns the stored template JSON for the given
///       submission id.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/save", post().to(save::process))
        .route("/{submission_id}", get().to(get::process))
}
