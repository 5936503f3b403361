//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::audio::{ContentType, DEFAULT_CONTENT_TYPE};
use crate::domain::recording::Duration;

/// Samples per captured block when nothing else is configured
pub const DEFAULT_BUFFER_LEN: usize = 4096;

/// Output path when nothing else is configured
pub const DEFAULT_OUTPUT: &str = "recording.wav";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub duration: Option<String>,
    pub buffer_len: Option<usize>,
    pub content_type: Option<String>,
    pub output: Option<String>,
    pub upload_url: Option<String>,
    pub session_id: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            duration: Some(Duration::default_duration().to_string()),
            buffer_len: Some(DEFAULT_BUFFER_LEN),
            content_type: Some(DEFAULT_CONTENT_TYPE.to_string()),
            output: Some(DEFAULT_OUTPUT.to_string()),
            upload_url: None,
            session_id: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge with `other`; set fields in `other` win.
    pub fn merge(self, other: Self) -> Self {
        Self {
            duration: other.duration.or(self.duration),
            buffer_len: other.buffer_len.or(self.buffer_len),
            content_type: other.content_type.or(self.content_type),
            output: other.output.or(self.output),
            upload_url: other.upload_url.or(self.upload_url),
            session_id: other.session_id.or(self.session_id),
        }
    }

    /// Get duration as parsed Duration, or default if not set/invalid
    pub fn duration_or_default(&self) -> Duration {
        self.duration
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_duration)
    }

    /// Get buffer length, or 4096 if not set or zero
    pub fn buffer_len_or_default(&self) -> usize {
        self.buffer_len
            .filter(|&len| len > 0)
            .unwrap_or(DEFAULT_BUFFER_LEN)
    }

    pub fn content_type_or_default(&self) -> ContentType {
        ContentType::or_default(self.content_type.as_deref())
    }

    pub fn output_or_default(&self) -> &str {
        self.output.as_deref().unwrap_or(DEFAULT_OUTPUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.duration, Some("10s".to_string()));
        assert_eq!(config.buffer_len, Some(4096));
        assert_eq!(config.content_type, Some("audio/wav".to_string()));
        assert_eq!(config.output, Some("recording.wav".to_string()));
        assert!(config.upload_url.is_none());
        assert!(config.session_id.is_none());
    }

    #[test]
    fn empty_has_all_none() {
        assert_eq!(
            AppConfig::empty(),
            AppConfig {
                duration: None,
                buffer_len: None,
                content_type: None,
                output: None,
                upload_url: None,
                session_id: None,
            }
        );
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            duration: Some("10s".to_string()),
            buffer_len: Some(4096),
            output: Some("a.wav".to_string()),
            ..Default::default()
        };
        let other = AppConfig {
            duration: None,
            buffer_len: Some(1024),
            upload_url: Some("http://localhost/upload".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.duration, Some("10s".to_string()));
        assert_eq!(merged.buffer_len, Some(1024));
        assert_eq!(merged.output, Some("a.wav".to_string()));
        assert_eq!(merged.upload_url, Some("http://localhost/upload".to_string()));
    }

    #[test]
    fn duration_or_default_parses() {
        let config = AppConfig {
            duration: Some("30s".to_string()),
            ..Default::default()
        };
        assert_eq!(config.duration_or_default().as_secs(), 30);
    }

    #[test]
    fn duration_or_default_uses_default_on_invalid() {
        let config = AppConfig {
            duration: Some("soon".to_string()),
            ..Default::default()
        };
        assert_eq!(config.duration_or_default().as_secs(), 10);
    }

    #[test]
    fn buffer_len_zero_falls_back() {
        let config = AppConfig {
            buffer_len: Some(0),
            ..Default::default()
        };
        assert_eq!(config.buffer_len_or_default(), 4096);
    }

    #[test]
    fn content_type_and_output_defaults() {
        let config = AppConfig::empty();
        assert_eq!(config.content_type_or_default().as_str(), "audio/wav");
        assert_eq!(config.output_or_default(), "recording.wav");
    }

    #[test]
    fn toml_round_trip() {
        let config = AppConfig {
            buffer_len: Some(2048),
            session_id: Some("abc".to_string()),
            ..Default::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
