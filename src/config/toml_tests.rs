//! Tests for TOML configuration parsing.

use super::ConfigError;
use super::env::Credentials;
use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config = TomlConfig::parse(
            r#"
            [api]
            key = "KEY"
            secret = "SECRET"
            host_name = "api-eu.urlbox.io"

            [webhook]
            secret = "WHSEC"
        "#,
        )
        .unwrap();

        assert_eq!(config.api.key.as_deref(), Some("KEY"));
        assert_eq!(config.api.secret.as_deref(), Some("SECRET"));
        assert_eq!(config.api.host_name.as_deref(), Some("api-eu.urlbox.io"));
        assert_eq!(config.webhook.secret.as_deref(), Some("WHSEC"));
    }

    #[test]
    fn empty_config_is_all_none() {
        let config = TomlConfig::parse("").unwrap();

        assert_eq!(config.credentials(), Credentials::default());
        assert!(config.webhook.secret.is_none());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = TomlConfig::parse(
            r#"
            [api]
            token = "nope"
        "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn credentials_copies_api_section() {
        let config = TomlConfig::parse(
            r#"
            [api]
            key = "KEY"
        "#,
        )
        .unwrap();

        let credentials = config.credentials();

        assert_eq!(credentials.api_key.as_deref(), Some("KEY"));
        assert!(credentials.api_secret.is_none());
        assert!(credentials.api_host_name.is_none());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urlbox.toml");
        std::fs::write(&path, "[api]\nkey = \"FROM_FILE\"\n").unwrap();

        let config = TomlConfig::load(&path).unwrap();

        assert_eq!(config.api.key.as_deref(), Some("FROM_FILE"));
    }

    #[test]
    fn load_missing_file_is_file_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = TomlConfig::load(&dir.path().join("absent.toml"));

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }
}

mod template {
    use super::*;

    #[test]
    fn default_template_parses() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert_eq!(config.credentials(), Credentials::default());
    }

    #[test]
    fn default_template_mentions_every_setting() {
        let template = default_config_template();

        for key in ["[api]", "key", "secret", "host_name", "[webhook]"] {
            assert!(template.contains(key), "template lacks {key}");
        }
    }
}
