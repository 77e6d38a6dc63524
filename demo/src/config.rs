use std::path::PathBuf;

const LIBRARY_NAME: &str = "LIBRARY_NAME";
const LOG_DIRECTORY: &str = "LOG_DIRECTORY";

const DEFAULT_LIBRARY_NAME: &str = "Central Library";
const DEFAULT_LOG_DIRECTORY: &str = "./logs/";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub library_name: String,
    pub log_directory: PathBuf,
}

impl AppConfig {
    /// Reads `.env` (when present) and the process environment, falling back to defaults.
    pub fn load() -> Self {
        Self {
            library_name: dotenvy::var(LIBRARY_NAME)
                .unwrap_or_else(|_| DEFAULT_LIBRARY_NAME.to_string()),
            log_directory: dotenvy::var(LOG_DIRECTORY)
                .unwrap_or_else(|_| DEFAULT_LOG_DIRECTORY.to_string())
                .into(),
        }
    }
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use super::{AppConfig, LIBRARY_NAME, LOG_DIRECTORY};

    #[test]
    fn falls_back_to_defaults_then_honours_environment() {
        std::env::remove_var(LIBRARY_NAME);
        std::env::remove_var(LOG_DIRECTORY);
        let config = AppConfig::load();
        assert_eq!(config.library_name, "Central Library");
        assert_eq!(config.log_directory, PathBuf::from("./logs/"));

        std::env::set_var(LIBRARY_NAME, "Biblioteca Central de Quito");
        std::env::set_var(LOG_DIRECTORY, "/tmp/library-logs");
        let config = AppConfig::load();
        assert_eq!(config.library_name, "Biblioteca Central de Quito");
        assert_eq!(config.log_directory, PathBuf::from("/tmp/library-logs"));

        std::env::remove_var(LIBRARY_NAME);
        std::env::remove_var(LOG_DIRECTORY);
    }
}
