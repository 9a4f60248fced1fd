//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed cwd and env var manipulation.

use caws_config::{CawsConfig, DEFAULT_ENDPOINT};
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[caws]
endpoint = "http://localhost:8080"
git_host = "git.eu-west-1.codecatalyst.aws"
region = "eu-west-1"

[auth]
auto_connect = false
keyring_service = "caws-test"
credentials_file = "/tmp/caws/sessions.json"
token_ttl_secs = 3600
"#,
        )?;

        let config: CawsConfig = Figment::from(Serialized::defaults(CawsConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.caws.endpoint, "http://localhost:8080");
        assert_eq!(config.caws.git_host, "git.eu-west-1.codecatalyst.aws");
        assert_eq!(config.caws.region, "eu-west-1");
        assert!(!config.auth.auto_connect);
        assert_eq!(config.auth.keyring_service, "caws-test");
        assert_eq!(
            config.auth.credentials_file,
            Some(PathBuf::from("/tmp/caws/sessions.json"))
        );
        assert_eq!(config.auth.token_ttl_secs, Some(3600));
        Ok(())
    });
}

#[test]
fn partial_section_keeps_remaining_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[caws]
region = "eu-west-1"
"#,
        )?;

        let config: CawsConfig = Figment::from(Serialized::defaults(CawsConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.caws.region, "eu-west-1");
        assert_eq!(config.caws.endpoint, DEFAULT_ENDPOINT);
        assert!(config.auth.auto_connect);
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
        jail.create_dir(".caws")?;
        jail.create_file(
            ".caws/config.toml",
            r#"
[auth]
keyring_service = "from-project"
"#,
        )?;

        let config = CawsConfig::load().expect("config loads");
        assert_eq!(config.auth.keyring_service, "from-project");
        Ok(())
    });
}

#[test]
fn invalid_endpoint_fails_load() {
    Jail::expect_with(|jail| {
        jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
        jail.create_dir(".caws")?;
        jail.create_file(
            ".caws/config.toml",
            r#"
[caws]
endpoint = "ftp://codecatalyst"
"#,
        )?;

        let err = CawsConfig::load().unwrap_err();
        assert!(err.to_string().contains("caws.endpoint"));
        Ok(())
    });
}
