//! SingleStore destination
//!
//! Delivers event batches into a SingleStore table through the Data API
//! (`/api/v2/exec`, JSON over HTTPS, Basic auth). A whole batch becomes one
//! multi-row INSERT; there is no partial success.

mod insert;

#[cfg(test)]
mod tests;

pub use insert::{
    build_insert, execute, send, to_utc_datetime, validate_table_identifier, ExecRequest,
    ExecResponse, InsertStatement, COLUMNS,
};

use crate::destination::Destination;
use crate::error::Result;
use crate::fields::{validate_settings, AuthSpec, DestinationMetadata, FieldSpec};
use crate::http::RequestClient;
use crate::types::JsonValue;
use async_trait::async_trait;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use url::Url;

/// Connection settings for the SingleStore Data API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// The host of the SingleStore database
    pub host: String,

    /// The port of the SingleStore Data API
    #[serde(default = "default_port")]
    pub port: String,

    /// The username of the SingleStore database
    pub username: String,

    /// The password of the SingleStore database
    pub password: String,

    /// The name of the database
    pub db_name: String,

    /// The name of the table
    #[serde(default = "default_table_name")]
    pub table_name: String,
}

fn default_port() -> String {
    "443".to_string()
}

fn default_table_name() -> String {
    "segment_data".to_string()
}

impl Settings {
    /// The Data API exec endpoint for these settings
    pub fn exec_url(&self) -> Result<String> {
        let url = Url::parse(&format!("https://{}:{}/api/v2/exec", self.host, self.port))?;
        Ok(url.to_string())
    }

    /// Base64-encoded `username:password` for Basic auth
    pub fn basic_credentials(&self) -> String {
        base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.username, self.password))
    }
}

/// The SingleStore destination module
pub struct SingleStore;

#[async_trait]
impl Destination for SingleStore {
    fn metadata(&self) -> DestinationMetadata {
        DestinationMetadata::cloud("SingleStore", "singlestore")
    }

    fn authentication(&self) -> AuthSpec {
        AuthSpec::custom([
            (
                "host",
                FieldSpec::required("Host", "The host of the SingleStore database."),
            ),
            (
                "port",
                FieldSpec::optional("Port", "The port of the SingleStore Data API. Defaults to 443.")
                    .with_default("443"),
            ),
            (
                "username",
                FieldSpec::required("Username", "The username of the SingleStore database."),
            ),
            (
                "password",
                FieldSpec::required("Password", "The password of the SingleStore database.")
                    .password(),
            ),
            (
                "dbName",
                FieldSpec::required("Database Name", "The name of the database."),
            ),
            (
                "tableName",
                FieldSpec::required(
                    "Table Name",
                    "The name of the table. Defaults to \"segment_data\".",
                )
                .with_default("segment_data"),
            ),
        ])
    }

    /// Verify credentials by creating the target table if it does not exist
    async fn test_authentication(
        &self,
        client: &RequestClient,
        settings: &JsonValue,
    ) -> Result<()> {
        let validated = validate_settings(&self.authentication(), settings)?;
        let settings: Settings = serde_json::from_value(JsonValue::Object(validated))?;

        let table = validate_table_identifier(&settings.table_name)?;
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS `{table}` (\
             messageId VARCHAR(255) NOT NULL, \
             timestamp DATETIME NOT NULL, \
             type ENUM('track', 'identify', 'page', 'screen', 'group', 'alias') NOT NULL, \
             event VARCHAR(255), \
             name VARCHAR(255), \
             properties JSON, \
             userId VARCHAR(255), \
             anonymousId VARCHAR(255), \
             groupId VARCHAR(255), \
             traits JSON, \
             context JSON, \
             SHARD KEY ()\
             ) AUTOSTATS_CARDINALITY_MODE=PERIODIC AUTOSTATS_HISTOGRAM_MODE=CREATE \
             SQL_MODE='STRICT_ALL_TABLES';"
        );

        let request = ExecRequest {
            sql,
            database: settings.db_name.clone(),
            args: None,
        };

        insert::execute(
            client,
            &settings.exec_url()?,
            &settings.basic_credentials(),
            &request,
            "Failed to create table",
        )
        .await?;
        Ok(())
    }
}
