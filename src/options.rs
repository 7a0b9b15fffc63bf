//! Compiler options. Every field has a default, so `{}` is a valid options
//! document and callers only spell out what they change.

use serde::{Deserialize, Serialize};

use crate::error::CompilerError;
use crate::naming::{is_go_keyword, sanitize_identifier};

const FALLBACK_PACKAGE: &str = "workflows";

/// How conditional nodes are compiled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchMode {
    /// Each branch is walked and compiled into its arm of the `if`.
    #[default]
    Inline,
    /// Arms only name their target node; the walk continues along the
    /// conditional node's first outgoing edge.
    Stub,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// Go package clause of the generated file.
    pub package_name: String,
    /// `StartToCloseTimeout` of the workflow-wide activity options, in seconds.
    pub activity_timeout_seconds: u64,
    pub branch_mode: BranchMode,
    /// Emit a `<WorkflowType>Globals` struct when the definition has globals.
    pub emit_globals: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            package_name: "workflows".into(),
            activity_timeout_seconds: 10,
            branch_mode: BranchMode::Inline,
            emit_globals: true,
        }
    }
}

impl CompileOptions {
    /// Parse options JSON; an empty string means defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        if json.trim().is_empty() {
            return Ok(CompileOptions::default());
        }
        serde_json::from_str(json)
    }

    /// The package clause actually emitted: sanitized and lower-cased, with
    /// `workflows` standing in for anything unusable.
    pub fn go_package(&self) -> String {
        let name = sanitize_identifier(&self.package_name).to_ascii_lowercase();
        if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) || is_go_keyword(&name)
        {
            FALLBACK_PACKAGE.to_string()
        } else {
            name
        }
    }

    /// Options that would silently change the generated file are rejected.
    pub fn validate(&self) -> Vec<CompilerError> {
        let name = sanitize_identifier(&self.package_name).to_ascii_lowercase();
        if is_go_keyword(&name) {
            return vec![CompilerError::validate(
                "V019",
                format!("Package name '{}' is a Go keyword", self.package_name),
                None,
            )];
        }
        Vec::new()
    }
}
