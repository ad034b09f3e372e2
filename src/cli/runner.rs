//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::destination::{CheckResult, Destination as _};
use crate::destinations::{self, singlestore};
use crate::error::{Error, Result};
use crate::fields::validate_settings;
use crate::http::RequestClient;
use crate::types::{EventRecord, JsonValue};
use std::fs;
use std::path::Path;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::List => self.list(),
            Commands::Fields { destination } => self.fields(destination),
            Commands::Check { destination } => self.check(destination).await,
            Commands::Send {
                destination,
                payload,
            } => self.send(destination, payload).await,
        }
    }

    fn list(&self) -> Result<()> {
        for destination in destinations::builtin() {
            let meta = destination.metadata();
            println!("{:<14} {}", meta.slug, meta.name);
        }
        Ok(())
    }

    fn fields(&self, slug: &str) -> Result<()> {
        let destination = destinations::find(slug)?;
        println!(
            "{}",
            serde_json::to_string_pretty(&destination.authentication())?
        );
        Ok(())
    }

    async fn check(&self, slug: &str) -> Result<()> {
        let destination = destinations::find(slug)?;
        let settings = self.load_settings()?;
        let client = RequestClient::new();

        let result = match destination.test_authentication(&client, &settings).await {
            Ok(()) => CheckResult::success(),
            Err(e) => CheckResult::failure(e.to_string()),
        };
        println!("{}", serde_json::to_string_pretty(&result)?);

        if result.success {
            Ok(())
        } else {
            Err(Error::config("authentication check failed"))
        }
    }

    async fn send(&self, slug: &str, payload: &Path) -> Result<()> {
        let settings = self.load_settings()?;
        let records = self.load_payload(payload)?;
        let client = RequestClient::new();

        match slug {
            "singlestore" => {
                let spec = singlestore::SingleStore;
                let validated = validate_settings(&spec.authentication(), &settings)?;
                let settings: singlestore::Settings =
                    serde_json::from_value(JsonValue::Object(validated))?;

                let response = singlestore::send(&client, &settings, &records).await?;
                info!(records = records.len(), "batch delivered");
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "ok": response.ok.unwrap_or(true),
                        "records": records.len(),
                    }))?
                );
                Ok(())
            }
            other => {
                destinations::find(other)?;
                Err(Error::config(format!(
                    "destination '{other}' does not support batch send from the CLI"
                )))
            }
        }
    }

    /// Load settings from --settings-json or the settings file
    fn load_settings(&self) -> Result<JsonValue> {
        if let Some(inline) = &self.cli.settings_json {
            return Ok(serde_json::from_str(inline)?);
        }

        let path = self
            .cli
            .settings
            .as_ref()
            .ok_or_else(|| Error::config("Settings not specified (use -s or --settings-json)"))?;
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

        if is_yaml {
            Ok(serde_yaml::from_str(&contents)?)
        } else {
            Ok(serde_json::from_str(&contents)?)
        }
    }

    /// Load a payload file: a JSON array of event records
    fn load_payload(&self, path: &Path) -> Result<Vec<EventRecord>> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("destination-kit").chain(args.iter().copied()))
    }

    #[tokio::test]
    async fn test_list_runs() {
        let runner = Runner::new(cli(&["list"]));
        runner.run().await.unwrap();
    }

    #[tokio::test]
    async fn test_fields_unknown_destination() {
        let runner = Runner::new(cli(&["fields", "-d", "nope"]));
        let err = runner.run().await.unwrap_err();
        assert!(matches!(err, Error::UnknownDestination { .. }));
    }

    #[test]
    fn test_load_settings_inline_json() {
        let runner = Runner::new(cli(&[
            "--settings-json",
            r#"{"host": "db.example.com"}"#,
            "check",
            "-d",
            "singlestore",
        ]));
        let settings = runner.load_settings().unwrap();
        assert_eq!(settings["host"], "db.example.com");
    }

    #[test]
    fn test_load_settings_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "host: db.example.com\nport: \"3306\"").unwrap();

        let path = file.path().to_string_lossy().to_string();
        let runner = Runner::new(cli(&["-s", path.as_str(), "check", "-d", "singlestore"]));
        let settings = runner.load_settings().unwrap();
        assert_eq!(settings["host"], "db.example.com");
        assert_eq!(settings["port"], "3306");
    }

    #[test]
    fn test_load_settings_missing_file() {
        let runner = Runner::new(cli(&["-s", "/no/such/file.json", "check", "-d", "singlestore"]));
        let err = runner.load_settings().unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
