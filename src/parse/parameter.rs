//! Typed parameter bindings shared by node I/O and workflow globals.
//!
//! On the wire a parameter is a flat record whose `sourceType` selects which of
//! the locator fields (`envVarName`, `redisKey`, `filePath`, `supabaseRef`) is
//! meaningful. In memory the source is a proper sum type, so a parameter can
//! never carry two locators at once.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Boolean,
    Number,
    String,
    Array,
    Object,
    ZSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    Literal,
    Env,
    Redis,
    File,
    Supabase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Input,
    Output,
}

/// Where a parameter value is resolved from at run time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterSource {
    Literal,
    Env { var_name: String },
    Redis { key: String },
    File { path: String },
    Supabase { reference: String },
}

impl ParameterSource {
    pub fn source_type(&self) -> SourceType {
        match self {
            ParameterSource::Literal => SourceType::Literal,
            ParameterSource::Env { .. } => SourceType::Env,
            ParameterSource::Redis { .. } => SourceType::Redis,
            ParameterSource::File { .. } => SourceType::File,
            ParameterSource::Supabase { .. } => SourceType::Supabase,
        }
    }

    /// The locator for non-literal sources.
    pub fn locator(&self) -> Option<&str> {
        match self {
            ParameterSource::Literal => None,
            ParameterSource::Env { var_name } => Some(var_name),
            ParameterSource::Redis { key } => Some(key),
            ParameterSource::File { path } => Some(path),
            ParameterSource::Supabase { reference } => Some(reference),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawParameter", into = "RawParameter")]
pub struct Parameter {
    pub id: String,
    pub key: String,
    pub value: Value,
    pub default_value: Option<Value>,
    pub value_type: ValueType,
    pub source: ParameterSource,
    pub description: Option<String>,
    pub group: Option<String>,
    pub is_enabled: bool,
    pub is_sensitive: bool,
    pub priority: i64,
    pub tags: Option<Vec<String>>,
    pub direction: Direction,
}

impl Parameter {
    /// A literal parameter with everything else at its editor default.
    pub fn literal(
        id: impl Into<String>,
        key: impl Into<String>,
        value_type: ValueType,
        value: Value,
        direction: Direction,
    ) -> Self {
        Parameter {
            id: id.into(),
            key: key.into(),
            value,
            default_value: None,
            value_type,
            source: ParameterSource::Literal,
            description: None,
            group: None,
            is_enabled: true,
            is_sensitive: false,
            priority: 0,
            tags: None,
            direction,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire shape
// ---------------------------------------------------------------------------

fn default_true() -> bool {
    true
}

fn default_value() -> Value {
    Value::String(String::new())
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParameter {
    id: String,
    key: String,
    #[serde(default = "default_value")]
    value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_value: Option<Value>,
    value_type: ValueType,
    #[serde(default = "default_source_type")]
    source_type: SourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    #[serde(default = "default_true")]
    is_enabled: bool,
    #[serde(default)]
    is_sensitive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    env_var_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    redis_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    supabase_ref: Option<String>,
    #[serde(default)]
    priority: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tags: Option<Vec<String>>,
    param_direction: Direction,
}

fn default_source_type() -> SourceType {
    SourceType::Literal
}

impl From<RawParameter> for Parameter {
    fn from(raw: RawParameter) -> Self {
        // Only the locator matching `sourceType` survives; stale ones left
        // behind by the editor when the source was switched are dropped.
        let source = match raw.source_type {
            SourceType::Literal => ParameterSource::Literal,
            SourceType::Env => ParameterSource::Env {
                var_name: raw.env_var_name.unwrap_or_default(),
            },
            SourceType::Redis => ParameterSource::Redis {
                key: raw.redis_key.unwrap_or_default(),
            },
            SourceType::File => ParameterSource::File {
                path: raw.file_path.unwrap_or_default(),
            },
            SourceType::Supabase => ParameterSource::Supabase {
                reference: raw.supabase_ref.unwrap_or_default(),
            },
        };

        Parameter {
            id: raw.id,
            key: raw.key,
            value: raw.value,
            default_value: raw.default_value,
            value_type: raw.value_type,
            source,
            description: raw.description,
            group: raw.group,
            is_enabled: raw.is_enabled,
            is_sensitive: raw.is_sensitive,
            priority: raw.priority,
            tags: raw.tags,
            direction: raw.param_direction,
        }
    }
}

impl From<Parameter> for RawParameter {
    fn from(p: Parameter) -> Self {
        let non_empty = |s: String| if s.is_empty() { None } else { Some(s) };
        let source_type = p.source.source_type();
        let (mut env_var_name, mut redis_key, mut file_path, mut supabase_ref) =
            (None, None, None, None);
        match p.source {
            ParameterSource::Literal => {}
            ParameterSource::Env { var_name } => env_var_name = non_empty(var_name),
            ParameterSource::Redis { key } => redis_key = non_empty(key),
            ParameterSource::File { path } => file_path = non_empty(path),
            ParameterSource::Supabase { reference } => supabase_ref = non_empty(reference),
        }

        RawParameter {
            id: p.id,
            key: p.key,
            value: p.value,
            default_value: p.default_value,
            value_type: p.value_type,
            source_type,
            description: p.description,
            group: p.group,
            is_enabled: p.is_enabled,
            is_sensitive: p.is_sensitive,
            env_var_name,
            redis_key,
            file_path,
            supabase_ref,
            priority: p.priority,
            tags: p.tags,
            param_direction: p.direction,
        }
    }
}
