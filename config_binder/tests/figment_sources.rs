//! Gathering configuration from files and environment variables with
//! figment, then binding it.

use std::time::Duration;

use anyhow::{Result, ensure};
use chrono::{DateTime, Utc};
use config_binder::{Configurable, Converter, FragmentStack, JsonSection, LayeredConverter, gather};
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use rstest::rstest;
use test_helpers::figment::{figment_error, with_jail};
use uuid::Uuid;

#[derive(Debug, Default, Configurable)]
struct Limits {
    cpu: u32,
    memory: Option<u64>,
}

#[derive(Debug, Default, Configurable)]
#[configurable(rename_all = "snake_case")]
struct AppConfig {
    name: String,
    port: u16,
    instance_id: Uuid,
    started_at: Option<DateTime<Utc>>,
    poll_interval: Duration,
    hosts: Vec<String>,
    limits: Limits,
}

const APP_TOML: &str = r#"
name = "billing"
port = 8080
instance_id = "5d1c6e1e-8f63-4b8c-9a8e-3d3b1f0f2a10"
started_at = "2024-05-01T08:30:00Z"
poll_interval = "00:01:30"
hosts = ["a.internal", "b.internal"]

[limits]
cpu = 2
"#;

#[rstest]
fn binds_gathered_file_and_environment() -> Result<()> {
    let config = with_jail(|jail| {
        jail.create_file("app.toml", APP_TOML)?;
        jail.set_env("APP_PORT", "9090");
        jail.set_env("APP_LIMITS__MEMORY", "1024");
        let figment = Figment::new()
            .merge(Toml::file("app.toml"))
            .merge(Env::prefixed("APP_").split("__"));
        let tree = gather(&figment).map_err(figment_error)?;
        Converter::new()
            .convert::<AppConfig>(&JsonSection::new(&tree))
            .map_err(figment_error)
    })?;
    ensure!(config.name == "billing");
    ensure!(config.port == 9090);
    ensure!(config.instance_id.to_string() == "5d1c6e1e-8f63-4b8c-9a8e-3d3b1f0f2a10");
    ensure!(
        config
            .started_at
            .is_some_and(|at| at.to_rfc3339() == "2024-05-01T08:30:00+00:00"),
        "{config:?}"
    );
    ensure!(config.poll_interval == Duration::from_secs(90));
    ensure!(config.hosts == ["a.internal", "b.internal"]);
    ensure!(config.limits.cpu == 2);
    ensure!(config.limits.memory == Some(1024));
    Ok(())
}

#[rstest]
fn providers_become_layered_fragments() -> Result<()> {
    let config = with_jail(|jail| {
        jail.create_file("app.toml", APP_TOML)?;
        jail.create_file("override.toml", "hosts = [\"c.internal\"]\n[limits]\nmemory = 64\n")?;
        let mut stack = FragmentStack::new();
        stack.push_provider(Toml::file("app.toml")).map_err(figment_error)?;
        stack.push_missing();
        stack
            .push_provider(Toml::file("override.toml"))
            .map_err(figment_error)?;
        LayeredConverter::new()
            .convert::<AppConfig>(stack.fragments())
            .map_err(figment_error)
    })?;
    let Some(app) = config else {
        anyhow::bail!("expected a merged configuration");
    };
    ensure!(app.name == "billing");
    ensure!(app.hosts == ["c.internal"], "arrays are replaced: {app:?}");
    ensure!(app.limits.cpu == 2);
    ensure!(app.limits.memory == Some(64));
    Ok(())
}

#[rstest]
fn malformed_values_report_their_path() -> Result<()> {
    let message = with_jail(|jail| {
        jail.create_file("app.toml", "[limits]\ncpu = \"many\"\n")?;
        let tree = gather(&Figment::from(Toml::file("app.toml"))).map_err(figment_error)?;
        Ok(Converter::new()
            .convert::<AppConfig>(&JsonSection::new(&tree))
            .err()
            .map(|err| err.to_string()))
    })?;
    let Some(text) = message else {
        anyhow::bail!("expected a parse error");
    };
    ensure!(text.contains("limits.cpu"), "{text}");
    ensure!(text.contains("'many'"), "{text}");
    Ok(())
}
