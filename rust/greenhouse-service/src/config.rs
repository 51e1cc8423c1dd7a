use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("GREENHOUSE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("GREENHOUSE_PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);
        let db_path = env::var("GREENHOUSE_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("greenhouse.db"));

        Ok(Self { host, port, db_path })
    }
}
