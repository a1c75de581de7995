use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use lifeadmin_engine::{SuccessPolicy, UploadSettings};
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

pub(crate) const CONFIG_FILENAME: &str = "lifeadmin.ron";

/// Shell settings read from `lifeadmin.ron`; every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ClientConfig {
    pub endpoint: String,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_response_bytes: u64,
    pub strict_http_status: bool,
    pub toast_dwell_ms: u64,
    pub log_destination: LogDestination,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let upload = UploadSettings::default();
        Self {
            endpoint: upload.endpoint,
            connect_timeout_secs: None,
            request_timeout_secs: None,
            max_response_bytes: upload.max_response_bytes,
            strict_http_status: false,
            toast_dwell_ms: lifeadmin_core::TOAST_DWELL.as_millis() as u64,
            log_destination: LogDestination::default(),
        }
    }
}

impl ClientConfig {
    pub fn upload_settings(&self) -> UploadSettings {
        UploadSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_response_bytes: self.max_response_bytes,
            policy: if self.strict_http_status {
                SuccessPolicy::RequireSuccessStatus
            } else {
                SuccessPolicy::AnyJson
            },
        }
    }

    pub fn toast_dwell(&self) -> Duration {
        Duration::from_millis(self.toast_dwell_ms)
    }
}

/// Loads `lifeadmin.ron` from `dir`. A missing file yields the defaults.
pub(crate) fn load_config(dir: &Path) -> anyhow::Result<ClientConfig> {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ClientConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()));
        }
    };

    ron::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path()).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.toast_dwell(), Duration::from_secs(4));
        assert_eq!(config.upload_settings().request_timeout, None);
        assert_eq!(config.upload_settings().policy, SuccessPolicy::AnyJson);
    }

    #[test]
    fn partial_file_overrides_selected_fields() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILENAME),
            r#"(endpoint: "http://10.0.0.5:8080", strict_http_status: true, request_timeout_secs: Some(30), log_destination: Both)"#,
        )
        .unwrap();

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.endpoint, "http://10.0.0.5:8080");
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.toast_dwell_ms, 4000);

        let settings = config.upload_settings();
        assert_eq!(settings.policy, SuccessPolicy::RequireSuccessStatus);
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(settings.connect_timeout, None);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), "(endpoint: 42").unwrap();
        let err = load_config(temp.path()).unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILENAME));
    }
}
