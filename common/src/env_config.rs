use std::{env, sync::Arc};

#[derive(Clone, Debug)]
/// Configuration struct for the server.
///
/// Holds the database connection details, the server host and port,
/// the number of worker threads, CORS and logging preferences, and
/// the page size used by the key list.
pub struct Config {
    // environment
    pub environment: String, // development or production
    /// The URL of the database to connect to.
    pub database_url: String,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS (Cross-Origin Resource Sharing).
    pub cors_allowed_origin: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// File the logger appends to next to stdout.
    pub log_file: String,
    /// Number of keys shown per page of the list.
    pub page_size: usize,
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// # Environment Variables
    ///
    /// Required:
    /// - `ENVIRONMENT`: `development` or `production`
    /// - `DATABASE_URL`: Connection string for the database
    ///
    /// Optional (with defaults):
    /// - `IP`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `WORKERS`: Number of worker threads (default: 4)
    /// - `CORS_ALLOWED_ORIGIN`: Allowed CORS origin (default: "http://localhost:3000")
    /// - `ENABLE_CONSOLE_LOGGING`: Whether to enable console logging (default: true)
    /// - `LOG_FILE`: Log file path (default: "keydash.log")
    /// - `PAGE_SIZE`: Keys per page (default: 10, minimum 1)
    ///
    /// # Panics
    ///
    /// This function will panic if required environment variables are missing.
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();

        Arc::new(Config {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            ..Config::from_lookup(|name| env::var(name).ok())
        })
    }

    /// Builds the optional part of the configuration from any variable source.
    /// Required values are left empty.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Config {
            environment: lookup("ENVIRONMENT").unwrap_or_default(),
            database_url: lookup("DATABASE_URL").unwrap_or_default(),
            server_host: lookup("IP").unwrap_or_else(|| "127.0.0.1".to_string()),
            server_port: lookup("PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or(8080),
            num_workers: lookup("WORKERS")
                .and_then(|workers| workers.parse().ok())
                .unwrap_or(4),
            cors_allowed_origin: lookup("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            console_logging_enabled: lookup("ENABLE_CONSOLE_LOGGING")
                .unwrap_or_else(|| "true".to_string())
                .to_lowercase()
                == "true",
            log_file: lookup("LOG_FILE").unwrap_or_else(|| "keydash.log".to_string()),
            page_size: lookup("PAGE_SIZE")
                .and_then(|size| size.parse().ok())
                .unwrap_or(10)
                .max(1),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.num_workers, 4);
        assert_eq!(config.page_size, 10);
        assert!(config.console_logging_enabled);
        assert_eq!(config.log_file, "keydash.log");
    }

    #[test]
    fn values_are_parsed_and_page_size_floored() {
        let config = Config::from_lookup(lookup_from(&[
            ("ENVIRONMENT", "production"),
            ("PORT", "9000"),
            ("PAGE_SIZE", "0"),
            ("ENABLE_CONSOLE_LOGGING", "FALSE"),
        ]));
        assert!(config.is_production());
        assert_eq!(config.server_port, 9000);
        assert_eq!(config.page_size, 1);
        assert!(!config.console_logging_enabled);
    }

    #[test]
    fn unparsable_numbers_fall_back() {
        let config = Config::from_lookup(lookup_from(&[("PORT", "eighty"), ("WORKERS", "-2")]));
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.num_workers, 4);
    }
}
