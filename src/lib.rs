//! Compiler from the canonical `wf-dsl` workflow definition to Go source for
//! the Temporal Go SDK, plus the view-graph normalizer the editor uses.

pub mod codegen;
pub mod error;
pub mod ir;
pub mod lower;
pub mod naming;
pub mod normalize;
pub mod options;
pub mod parse;
pub mod pipeline;
pub mod validate;
pub mod wasm;

pub use error::{CompilerError, Diagnostic, Phase};
pub use normalize::{ViewGraph, to_canonical as normalize_from_view, to_view as normalize_to_view};
pub use options::{BranchMode, CompileOptions};
pub use parse::types::{WorkflowDefinition, WorkflowMeta};
pub use pipeline::{CompileOutput, check, compile, compile_json, compile_with_options};
