use crate::storage::resolve_data_path;
use std::{env, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_OWNER: &str = "local";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    /// Identity every request acts as. Sign-in lives outside this service.
    pub owner: String,
}

impl Config {
    pub fn from_env() -> Result<Self, std::io::Error> {
        Ok(Self {
            port: parse_port(env::var("PORT").ok().as_deref()),
            data_path: resolve_data_path()?,
            owner: parse_owner(env::var("APP_OWNER").ok().as_deref()),
        })
    }
}

fn parse_port(value: Option<&str>) -> u16 {
    value
        .and_then(|value| value.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

fn parse_owner(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(owner) if !owner.is_empty() => owner.to_string(),
        _ => DEFAULT_OWNER.to_string(),
    }
}
