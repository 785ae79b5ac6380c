use std::env;
use std::path::PathBuf;

/// Runtime settings for the server process, read once at startup.
///
/// Every field can be overridden through a `STENCIL_*` environment
/// variable; the defaults match a local development setup where the
/// binary runs from the `backend` directory.
#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory served as the schema catalog under `/schemas`.
    pub schemas_dir: PathBuf,
    /// SQLite file holding submitted templates.
    pub db_path: PathBuf,
    pub open_browser: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let host = env::var("STENCIL_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("STENCIL_PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(8080);
        let schemas_dir = env::var_os("STENCIL_SCHEMAS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("schemas"));
        let db_path = env::var_os("STENCIL_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("stencil.sqlite"));
        let open_browser = env::var("STENCIL_OPEN_BROWSER")
            .map(|raw| raw != "0")
            .unwrap_or(true);

        Config {
            host,
            port,
            schemas_dir,
            db_path,
            open_browser,
        }
    }
}
