//! glintc - command-line front end resolution for the Glint shading language.
//!
//! This crate turns a flat list of `glintc` command-line tokens into a fully
//! specified [`CompileRequest`]: which input files form which translation
//! units, which entry points exist (explicit or inferred) and under which
//! profile, and which output file receives which code generation target.
//! Every way the flags can be ambiguous or contradictory is diagnosed before
//! any real compilation work would start.
//!
//! # Primary Usage
//!
//! ```
//! use glintc::{resolve_options, CompileRequest, Session};
//!
//! let session = Session::new();
//! let mut request = CompileRequest::new();
//!
//! let args = ["-profile", "glsl_fragment", "-entry", "psMain", "shader.hlsl"]
//!     .map(String::from);
//! resolve_options(&args, &session, &mut request).unwrap();
//!
//! assert_eq!(request.translation_units().len(), 1);
//! assert_eq!(request.entry_points()[0].name, "psMain");
//! ```
//!
//! # Architecture
//!
//! - [`options`] - the resolver core: scan pass, backfill passes, emission
//! - [`request`] - the compile-request object the resolver populates
//! - [`session`] - profile registry (name to profile lookup)
//! - [`diag`] - diagnostic kinds, sink, and the overall resolution error

pub mod diag;
pub mod options;
pub mod request;
pub mod session;

pub use diag::{Diagnostic, DiagnosticSink, ResolveError, Severity};
pub use options::resolve_options;
pub use request::{
    CodeGenTarget, CompileFlags, CompileRequest, ContainerFormat, EntryPoint, MatrixLayout,
    PassThrough, SourceLanguage, TargetFlags, TargetRequest, TranslationUnit,
};
pub use session::{Profile, Session};
