use actix_web::{web, Responder};
use log::info;
use rusqlite::params;
use serde_json::Value;
use uuid::Uuid;

use common::check::check_template;

use crate::config::Config;
use crate::db;

#[derive(Debug)]
pub enum SaveError {
    Invalid(String),
    Storage(String),
}

pub async fn process(config: web::Data<Config>, payload: web::Json<Value>) -> impl Responder {
    match save_submission(&config, &payload) {
        Ok(id) => {
            info!("stored template submission {id}");
            actix_web::HttpResponse::Ok().body(id)
        }
        Err(SaveError::Invalid(e)) => {
            actix_web::HttpResponse::BadRequest().body(format!("Invalid template: {}", e))
        }
        Err(SaveError::Storage(e)) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Error storing template: {}", e)),
    }
}

pub fn save_submission(config: &Config, payload: &Value) -> Result<String, SaveError> {
    // Some clients stringify the template before putting it in the request
    // body, so a JSON string containing the template is unwrapped first.
    let value = match payload {
        Value::String(inner) => {
            serde_json::from_str::<Value>(inner).map_err(|e| SaveError::Invalid(e.to_string()))?
        }
        other => other.clone(),
    };

    let template = check_template(&value).map_err(|e| SaveError::Invalid(e.to_string()))?;
    let body = serde_json::to_string(&template).map_err(|e| SaveError::Storage(e.to_string()))?;

    let conn = db::open(&config.db_path).map_err(SaveError::Storage)?;
    let id = Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO submissions (id, body) VALUES (?1, ?2)",
        params![&id, &body],
    )
    .map_err(|e| SaveError::Storage(e.to_string()))?;

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::templates::get::get_submission;
    use common::model::template::BLANK_PDF;
    use serde_json::json;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            schemas_dir: dir.path().join("schemas"),
            db_path: dir.path().join("stencil.sqlite"),
            open_browser: false,
        }
    }

    fn sample_template() -> Value {
        json!({
            "basePdf": BLANK_PDF,
            "schemas": [{
                "title": {
                    "type": "text",
                    "position": { "x": 10.0, "y": 10.0 },
                    "width": 80.0,
                    "height": 12.0
                }
            }],
            "sampledata": [{ "title": "Hello" }]
        })
    }

    #[test]
    fn stores_and_returns_valid_submissions() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        let id = save_submission(&config, &sample_template()).unwrap();
        let body = get_submission(&config, &id).unwrap();
        let stored: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(stored["schemas"][0]["title"]["type"], "text");
    }

    #[test]
    fn unwraps_double_encoded_payloads() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        let wrapped = Value::String(sample_template().to_string());
        let id = save_submission(&config, &wrapped).unwrap();
        assert!(get_submission(&config, &id).is_ok());
    }

    #[test]
    fn rejects_malformed_templates() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        let err = save_submission(&config, &json!({ "schemas": [] }));
        assert!(matches!(err, Err(SaveError::Invalid(_))));
        // Nothing must be written for a rejected payload.
        assert!(get_submission(&config, "missing").is_err());
    }

    #[test]
    fn each_submission_gets_its_own_id() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        let first = save_submission(&config, &sample_template()).unwrap();
        let second = save_submission(&config, &sample_template()).unwrap();
        assert_ne!(first, second);
    }
}
