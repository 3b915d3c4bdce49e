//! Diagnostics for command-line option resolution.
//!
//! Every failure mode of the resolver is a [`Diagnostic`] variant, rendered
//! through `thiserror`. Diagnostics are accumulated in a [`DiagnosticSink`]
//! that counts errors and builds the message buffer handed back to the
//! caller on failure as part of [`ResolveError`].

use std::fmt;

use thiserror::Error;

/// A single diagnostic produced while resolving command-line options.
///
/// The command line carries no source locations, so each variant carries
/// only the arguments needed to render its message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    #[error("expected an argument for option `{option}`")]
    MissingArgument { option: String },

    #[error("unknown command-line option `{option}`")]
    UnknownOption { option: String },

    #[error("cannot infer source language from file extension: `{path}`")]
    UnknownSourceLanguage { path: String },

    #[error("unknown code generation target `{name}`")]
    UnknownCodeGenTarget { name: String },

    #[error("unknown profile `{name}`")]
    UnknownProfile { name: String },

    #[error("unknown pass-through target `{name}`")]
    UnknownPassThroughTarget { name: String },

    #[error("no profile specified for entry point(s); use `-profile`")]
    NoProfileSpecified,

    #[error("when multiple `-profile` options are given, each entry point must have its own")]
    AmbiguousProfileAssignment,

    #[error("entry points must be associated with translation units when more than one exists")]
    AmbiguousTranslationUnit,

    #[error("more output paths ({output_path_count}) than entry points ({entry_point_count})")]
    TooManyOutputPaths {
        output_path_count: usize,
        entry_point_count: usize,
    },

    #[error("no output path specified for entry point `{entry_point}`")]
    MissingOutputPath { entry_point: String },

    #[error("output paths `{first}` and `{second}` imply different code generation targets")]
    InconsistentOutputTargets { first: String, second: String },

    #[error("cannot infer a code generation target from output path `{path}`")]
    CannotInferTargetFromPath { path: String },

    #[error("explicit output paths were given while multiple targets are requested")]
    ExplicitOutputPathsAndMultipleTargets,
}

/// Diagnostic severity. Warnings render but do not fail resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::ExplicitOutputPathsAndMultipleTargets => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// Accumulates diagnostics, tracking the error count and rendering each
/// message into a buffer the caller can read back after resolution.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    error_count: usize,
    buffer: String,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic, rendering it into the buffer and mirroring it to
    /// the `log` facade.
    pub fn diagnose(&mut self, diagnostic: Diagnostic) {
        let severity = diagnostic.severity();
        match severity {
            Severity::Warning => log::warn!("{diagnostic}"),
            Severity::Error => {
                self.error_count += 1;
                log::error!("{diagnostic}");
            }
        }
        self.buffer.push_str(&format!("{severity}: {diagnostic}\n"));
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// The rendered diagnostic text accumulated so far.
    pub fn output(&self) -> &str {
        &self.buffer
    }
}

/// Overall failure of one resolution invocation.
///
/// Carries the rendered diagnostic buffer so callers can show the user what
/// went wrong without re-querying the request object.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("command-line option resolution failed with {error_count} error(s):\n{output}")]
pub struct ResolveError {
    pub error_count: usize,
    pub output: String,
}
