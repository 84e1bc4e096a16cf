use std::env;
use std::time::Duration;

/// Which prompt template the orchestrator sends to the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptProfile {
    /// Full sales instructions, constrained to the fetched catalog.
    Catalog,
    /// One-line instruction with a link to the external form.
    Basic,
}

impl PromptProfile {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "basic" => PromptProfile::Basic,
            _ => PromptProfile::Catalog,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub ollama_url: String,
    pub ollama_model: String,
    pub catalog_url: String,
    pub prompt_profile: PromptProfile,
    pub form_url: String,
    pub catalog_timeout: Duration,
    pub llm_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3009),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "commeria.db".to_string()),
            ollama_url: env::var("OLLAMA_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "mistral".to_string()),
            catalog_url: env::var("CATALOG_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string()),
            prompt_profile: env::var("PROMPT_PROFILE")
                .map(|v| PromptProfile::parse(&v))
                .unwrap_or(PromptProfile::Catalog),
            form_url: env::var("FORM_URL")
                .unwrap_or_else(|_| "http://localhost:3000/#/tabspills".to_string()),
            catalog_timeout: secs_from_env("CATALOG_TIMEOUT_SECS", 10),
            llm_timeout: secs_from_env("LLM_TIMEOUT_SECS", 120),
        }
    }
}

fn secs_from_env(key: &str, default: u64) -> Duration {
    Duration::from_secs(
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_profile_parse() {
        assert_eq!(PromptProfile::parse("basic"), PromptProfile::Basic);
        assert_eq!(PromptProfile::parse(" BASIC "), PromptProfile::Basic);
        assert_eq!(PromptProfile::parse("catalog"), PromptProfile::Catalog);
        assert_eq!(PromptProfile::parse("whatever"), PromptProfile::Catalog);
    }
}
