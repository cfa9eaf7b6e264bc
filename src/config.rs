use std::env;

use anyhow::Result;
use once_cell::sync::Lazy;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub log_level: String,
    pub log_dir: String,
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub gemini_image_model: String,
    pub gemini_analysis_model: String,
    pub gemini_timeout_seconds: u64,
    pub gemini_safety_settings: String,
    pub max_upload_mb: usize,
}

pub static CONFIG: Lazy<Config> =
    Lazy::new(|| Config::load().expect("Failed to load configuration"));

fn env_string(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn normalize_gemini_safety_settings(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return "permissive".to_string();
    }

    let lowered = trimmed.to_lowercase();
    match lowered.as_str() {
        "permissive" | "off" | "none" => "permissive".to_string(),
        "standard" => "standard".to_string(),
        _ => {
            warn!(
                "Unknown GEMINI_SAFETY_SETTINGS value '{}'; defaulting to permissive.",
                value
            );
            "permissive".to_string()
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let gemini_image_model = env_string("GEMINI_IMAGE_MODEL", "gemini-3-pro-image-preview");
        let gemini_analysis_model = env::var("GEMINI_ANALYSIS_MODEL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| gemini_image_model.clone());

        Ok(Config {
            bind_addr: env_string("BIND_ADDR", "0.0.0.0:3000"),
            log_level: env_string("LOG_LEVEL", "info").to_lowercase(),
            log_dir: env_string("LOG_DIR", "logs"),
            gemini_api_key: env_string("GEMINI_API_KEY", ""),
            gemini_base_url: env_string(
                "GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com/v1beta",
            )
            .trim_end_matches('/')
            .to_string(),
            gemini_image_model,
            gemini_analysis_model,
            gemini_timeout_seconds: env_u64("GEMINI_TIMEOUT_SECONDS", 60).max(1),
            gemini_safety_settings: normalize_gemini_safety_settings(env_string(
                "GEMINI_SAFETY_SETTINGS",
                "permissive",
            )),
            max_upload_mb: env_usize("MAX_UPLOAD_MB", 8).max(1),
        })
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safety_settings_fall_back_to_permissive() {
        assert_eq!(normalize_gemini_safety_settings("".into()), "permissive");
        assert_eq!(normalize_gemini_safety_settings("OFF".into()), "permissive");
        assert_eq!(normalize_gemini_safety_settings(" Standard ".into()), "standard");
        assert_eq!(normalize_gemini_safety_settings("strict".into()), "permissive");
    }
}
