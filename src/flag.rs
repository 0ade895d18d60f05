// src/flag.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AdminError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValueType {
    Boolean,
    String,
    Number,
    Json,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Boolean => "BOOLEAN",
            ValueType::String => "STRING",
            ValueType::Number => "NUMBER",
            ValueType::Json => "JSON",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BOOLEAN" => Ok(ValueType::Boolean),
            "STRING" => Ok(ValueType::String),
            "NUMBER" => Ok(ValueType::Number),
            "JSON" => Ok(ValueType::Json),
            _ => Err(AdminError::ValidationError(format!(
                "unknown feature type '{}' (expected BOOLEAN, STRING, NUMBER or JSON)",
                s
            ))),
        }
    }
}

/// A default value for a flag.
///
/// FeatureHub's create call has no value field, so a value is never part of a
/// request body. It only reaches the environment-assignment report, which says
/// the value was not applied. Serialized untagged so `3` and `3.5` stay
/// distinct numbers in JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlagValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    /// Opaque JSON document, never validated.
    Json(String),
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Boolean(b) => write!(f, "{}", b),
            FlagValue::Integer(i) => write!(f, "{}", i),
            FlagValue::Float(n) => write!(f, "{}", n),
            FlagValue::Text(s) | FlagValue::Json(s) => f.write_str(s),
        }
    }
}

/// Parses a raw `--value` argument according to the flag's type.
pub fn parse_value(raw: &str, value_type: ValueType) -> Result<FlagValue, AdminError> {
    match value_type {
        ValueType::Boolean => Ok(FlagValue::Boolean(raw.trim().eq_ignore_ascii_case("true"))),
        ValueType::Number => {
            let trimmed = raw.trim();
            if trimmed.contains('.') {
                trimmed.parse::<f64>().map(FlagValue::Float).map_err(|e| {
                    AdminError::ValidationError(format!("invalid number '{}': {}", raw, e))
                })
            } else {
                trimmed.parse::<i64>().map(FlagValue::Integer).map_err(|e| {
                    AdminError::ValidationError(format!("invalid number '{}': {}", raw, e))
                })
            }
        }
        ValueType::Json => Ok(FlagValue::Json(raw.to_string())),
        ValueType::String => Ok(FlagValue::Text(raw.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlagDefinition {
    pub key: String,
    pub name: String,
    pub description: Option<String>,
    pub default_value: Option<FlagValue>,
    pub value_type: ValueType,
}

impl FlagDefinition {
    pub fn new(key: &str, name: &str, value_type: ValueType) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            description: None,
            default_value: None,
            value_type,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        if !description.is_empty() {
            self.description = Some(description.to_string());
        }
        self
    }

    pub fn with_default_value(mut self, value: FlagValue) -> Self {
        self.default_value = Some(value);
        self
    }
}

/// A feature as FeatureHub reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFlag {
    #[serde(default)]
    pub id: Option<String>,
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value_type: Option<ValueType>,
    #[serde(default)]
    pub description: Option<String>,
}
