//! Configuration loading and CLI-facing defaults
use promptflow::config::Config;
use promptflow::llm::factory;
use promptflow::llm::prompts::Stage;
use std::fs;

#[test]
fn test_config_has_defaults() {
    let config = Config::default();
    assert_eq!(config.generation.max_retries, 0);
    assert!(!config.llm.provider.is_empty());
    assert!(!config.llm.model.is_empty());
}

#[test]
fn test_invalid_toml_at_explicit_path_is_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[llm\nprovider = ").unwrap();
    let err = Config::load_with_path(Some(path.to_string_lossy().to_string())).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to load config"));
}

#[test]
fn test_prompts_section_round_trip() {
    let toml_text = r#"
[llm]
provider = "anthropic"
model = "claude-sonnet-4-20250514"
api_key_env = "ANTHROPIC_API_KEY"

[prompts]
override_prompts = true
analyst_mode = "append"
analyst_custom = "Mention compliance steps."
"#;
    let config: Config = toml::from_str(toml_text).unwrap();
    assert!(!config.prompts.is_overwrite(Stage::Analyst));
    assert!(config.prompts.is_overwrite(Stage::Architect));
    assert_eq!(
        config.prompts.custom(Stage::Analyst),
        Some("Mention compliance steps.")
    );
}

#[test]
fn test_factory_rejects_unknown_provider_from_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("promptflow.toml");
    fs::write(
        &path,
        r#"
[llm]
provider = "gemini"
model = "gemini-pro"
"#,
    )
    .unwrap();
    let config = Config::load_with_path(Some(path.to_string_lossy().to_string())).unwrap();
    assert!(config.llm.api_key_env.is_none());
    let err = factory::create_client(&config, false).err().unwrap();
    assert!(err.to_string().contains("Unknown LLM provider: gemini"));
}
