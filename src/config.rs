use std::env;

const DEFAULT_MONGO_URL: &str = "mongodb://localhost:27017";

/// Settings read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongo_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("⚠️  Invalid PORT '{}', falling back to 3000", raw);
                3000
            }),
            None => 3000,
        };

        let mongo_url = lookup("MONGO_URL").unwrap_or_else(|| {
            log::warn!("⚠️  MONGO_URL not set, using {}", DEFAULT_MONGO_URL);
            DEFAULT_MONGO_URL.to_string()
        });

        Self {
            host,
            port,
            mongo_url,
        }
    }
}
