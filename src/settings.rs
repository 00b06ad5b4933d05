use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub default_steps: u32,
    pub responses_file: String,
    pub bind_address: String,
    pub static_dir: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load environment variables
        dotenv::dotenv().ok();

        Self::from_source(Environment::default().try_parsing(true))
    }

    pub fn from_source(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("openai_api_key", "")?
            .set_default("openai_base_url", "https://api.openai.com/v1")?
            .set_default("model", "gpt-4o")?
            .set_default("temperature", 0.7)?
            .set_default("max_tokens", 2000)?
            .set_default("default_steps", 1)?
            .set_default("responses_file", "saved_responses.json")?
            .set_default("bind_address", "127.0.0.1:5000")?
            .set_default("static_dir", "static")?
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::default().try_parsing(true).source(Some(map))
    }

    #[test]
    fn defaults_apply_without_environment() {
        let settings = Settings::from_source(env_from(&[])).unwrap();
        assert_eq!(settings.model, "gpt-4o");
        assert_eq!(settings.default_steps, 1);
        assert_eq!(settings.responses_file, "saved_responses.json");
        assert_eq!(settings.max_tokens, 2000);
        assert!(settings.openai_api_key.is_empty());
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = Settings::from_source(env_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("DEFAULT_STEPS", "4"),
            ("MODEL", "gpt-4o-mini"),
            ("RESPONSES_FILE", "/tmp/guides.json"),
        ]))
        .unwrap();
        assert_eq!(settings.openai_api_key, "sk-test");
        assert_eq!(settings.default_steps, 4);
        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.responses_file, "/tmp/guides.json");
    }

    #[test]
    fn malformed_step_count_is_rejected() {
        let result = Settings::from_source(env_from(&[("DEFAULT_STEPS", "lots")]));
        assert!(result.is_err());
    }
}
