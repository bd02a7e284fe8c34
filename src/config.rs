use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        elasticsearch_url: get_env_or_default("ELASTICSEARCH_URL", "http://localhost:9200"),
        port: get_env_or_default("PORT", "4000")
            .parse()
            .expect("PORT must be a valid port number"),
    }
});

pub struct Config {
    pub elasticsearch_url: String,
    pub port: u16,
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
