use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

use crate::domains::students::models::Branch;
use crate::domains::students::validation::{DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR};
use crate::domains::students::StudentRules;

const DEFAULT_DATABASE_URL: &str = "sqlite://students.db?mode=rwc";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub min_year: i32,
    pub max_year: i32,
    pub allowed_branches: Vec<Branch>,
    pub face_model_path: Option<PathBuf>,
    pub max_upload_bytes: usize,
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
    pub db_max_connections: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Blank values count as unset
        let var = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let min_year = match var("MIN_YEAR") {
            Some(v) => v.trim().parse().context("MIN_YEAR must be an integer")?,
            None => DEFAULT_MIN_YEAR,
        };
        let max_year = match var("MAX_YEAR") {
            Some(v) => v.trim().parse().context("MAX_YEAR must be an integer")?,
            None => DEFAULT_MAX_YEAR,
        };
        if min_year > max_year {
            bail!("MIN_YEAR ({min_year}) must not exceed MAX_YEAR ({max_year})");
        }

        let allowed_branches = match var("ALLOWED_BRANCHES") {
            Some(v) => parse_branches(&v)?,
            None => Branch::ALL.to_vec(),
        };

        Ok(Self {
            database_url: var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: match var("PORT") {
                Some(v) => v.trim().parse().context("PORT must be a valid number")?,
                None => DEFAULT_PORT,
            },
            min_year,
            max_year,
            allowed_branches,
            face_model_path: var("FACE_MODEL_PATH").map(PathBuf::from),
            max_upload_bytes: match var("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .trim()
                    .parse()
                    .context("MAX_UPLOAD_BYTES must be a valid number")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            allowed_origins: var("ALLOWED_ORIGINS")
                .map(|v| split_list(&v).map(str::to_string).collect())
                .unwrap_or_default(),
            db_max_connections: match var("DB_MAX_CONNECTIONS") {
                Some(v) => v
                    .trim()
                    .parse()
                    .context("DB_MAX_CONNECTIONS must be a valid number")?,
                None => DEFAULT_DB_MAX_CONNECTIONS,
            },
        })
    }

    /// Field rules derived from this configuration.
    pub fn student_rules(&self) -> StudentRules {
        StudentRules {
            min_year: self.min_year,
            max_year: self.max_year,
            allowed_branches: self.allowed_branches.clone(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_branches(raw: &str) -> Result<Vec<Branch>> {
    let mut branches = Vec::new();
    for name in split_list(raw) {
        let branch: Branch = name
            .parse()
            .with_context(|| format!("ALLOWED_BRANCHES contains unknown branch '{name}'"))?;
        if !branches.contains(&branch) {
            branches.push(branch);
        }
    }
    if branches.is_empty() {
        bail!("ALLOWED_BRANCHES must name at least one branch");
    }
    Ok(branches)
}
