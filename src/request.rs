//! The per-action summarisation request and its parameters.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

/// Allowed sampling temperatures
pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=1.0;

/// Allowed completion lengths
pub const MAX_TOKENS_RANGE: RangeInclusive<u32> = 50..=400;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 150;

/// Reasons a request is rejected before any network call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please enter your OpenAI API key.")]
    MissingCredential,
    #[error("Please enter a valid URL.")]
    MissingUrl,
    #[error("temperature must be between 0.0 and 1.0, got {0}")]
    Temperature(f32),
    #[error("max tokens must be between 50 and 400, got {0}")]
    MaxTokens(u32),
    #[error("unknown model: {0}")]
    UnknownModel(String),
    #[error("YouTube Shorts are not supported.")]
    ShortsUnsupported,
    #[error("Only trusted medical sites (.gov, .edu, nih.gov) are allowed.")]
    UntrustedDomain,
}

/// The three chat models offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum ModelName {
    #[default]
    #[serde(rename = "gpt-4o")]
    #[value(name = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "gpt-4")]
    #[value(name = "gpt-4")]
    Gpt4,
    #[serde(rename = "gpt-3.5-turbo")]
    #[value(name = "gpt-3.5-turbo")]
    Gpt35Turbo,
}

impl ModelName {
    pub const ALL: [ModelName; 3] = [ModelName::Gpt4o, ModelName::Gpt4, ModelName::Gpt35Turbo];

    /// Model identifier as sent to the API
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelName::Gpt4o => "gpt-4o",
            ModelName::Gpt4 => "gpt-4",
            ModelName::Gpt35Turbo => "gpt-3.5-turbo",
        }
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelName::ALL
            .into_iter()
            .find(|model| model.as_str() == s.trim())
            .ok_or_else(|| ValidationError::UnknownModel(s.to_string()))
    }
}

/// An API credential. Never printed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// One user-triggered summarisation request
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub raw_url: String,
    pub api_credential: ApiKey,
    pub model_name: ModelName,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Request {
    /// Create a request with default sampling parameters
    pub fn new(raw_url: impl Into<String>, api_credential: ApiKey) -> Self {
        Self {
            raw_url: raw_url.into(),
            api_credential,
            model_name: ModelName::default(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn model(mut self, model_name: ModelName) -> Self {
        self.model_name = model_name;
        self
    }

    /// Set the temperature, snapped to the 0.1 grid
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = round_temperature(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Check the form inputs, in the order the user sees them
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_credential.is_blank() {
            return Err(ValidationError::MissingCredential);
        }
        self.validate_url()?;
        validate_temperature(self.temperature)?;
        validate_max_tokens(self.max_tokens)?;
        Ok(())
    }

    /// URL-only check, used when no summary is requested
    pub fn validate_url(&self) -> Result<(), ValidationError> {
        if self.raw_url.trim().is_empty() {
            return Err(ValidationError::MissingUrl);
        }
        Ok(())
    }
}

/// Snap a temperature to one decimal place
pub fn round_temperature(temperature: f32) -> f32 {
    (temperature * 10.0).round() / 10.0
}

pub fn validate_temperature(temperature: f32) -> Result<(), ValidationError> {
    if TEMPERATURE_RANGE.contains(&temperature) {
        Ok(())
    } else {
        Err(ValidationError::Temperature(temperature))
    }
}

pub fn validate_max_tokens(max_tokens: u32) -> Result<(), ValidationError> {
    if MAX_TOKENS_RANGE.contains(&max_tokens) {
        Ok(())
    } else {
        Err(ValidationError::MaxTokens(max_tokens))
    }
}
