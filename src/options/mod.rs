//! Command-line option resolution.
//!
//! One resolution invocation runs four phases over a freshly constructed
//! [`OptionsResolver`]:
//!
//! 1. **Scan** (`scan`) - a single left-to-right pass over the tokens,
//!    dispatching options and classifying bare paths into translation units.
//! 2. **Entry-point backfill** (`entry`) - synthesize implicit entry
//!    points, then resolve missing profile and translation-unit links.
//! 3. **Output reconciliation** (`output`) - associate output paths with
//!    entry points and settle on one global code generation target.
//! 4. **Emission** (`emit`) - push the resolved state into the
//!    [`CompileRequest`], only once zero errors have been diagnosed.
//!
//! Scan-time failures abort the token walk after diagnosing; every post-scan
//! validation diagnoses to the sink and continues, and the final zero-error
//! check decides the overall result.

mod emit;
mod entry;
mod output;
mod scan;
mod units;

use crate::diag::ResolveError;
use crate::request::{
    CodeGenTarget, CompileFlags, CompileRequest, MatrixLayout, PassThrough, SourceLanguage,
    TargetFlags,
};
use crate::session::{Profile, Session};

/// Marker for a fatal scan-time failure. The diagnostic describing it is
/// already in the sink by the time this is returned.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScanAbort;

pub(crate) type ScanResult<T> = Result<T, ScanAbort>;

/// A translation unit collected during the scan, before registration with
/// the compile request.
#[derive(Debug)]
pub(crate) struct RawTranslationUnit {
    pub language: SourceLanguage,
    /// Profile implied by the file extension (e.g. a `.frag` input implies
    /// the fragment-stage profile), if any.
    pub implicit_profile: Option<Profile>,
    /// Position in the final ordered unit list. Stable once assigned.
    pub index: usize,
    pub source_paths: Vec<String>,
}

/// An entry point collected during the scan. Missing links are backfilled
/// by the post-scan passes.
#[derive(Debug)]
pub(crate) struct RawEntryPoint {
    pub name: String,
    pub profile: Option<Profile>,
    pub translation_unit: Option<usize>,
    pub output_path: Option<usize>,
}

/// An output path collected during the scan. `target` is `None` when the
/// extension implied nothing, pending later inference.
#[derive(Debug)]
pub(crate) struct RawOutputPath {
    pub path: String,
    pub target: Option<CodeGenTarget>,
}

/// All state accumulated while resolving one command line.
///
/// Constructed fresh per invocation and discarded when resolution returns;
/// nothing here outlives the call.
pub(crate) struct OptionsResolver<'a> {
    session: &'a Session,

    pub compile_flags: CompileFlags,
    pub target_flags: TargetFlags,
    /// Explicitly chosen target, or the one inferred from output paths.
    /// `None` covers both "no `-target` given" and `-target none`.
    pub chosen_target: Option<CodeGenTarget>,
    /// The last `-profile` value seen.
    pub current_profile: Option<Profile>,
    /// The unit active when `-entry` was encountered: whichever translation
    /// unit the most recent input path touched.
    pub current_translation_unit: Option<usize>,
    pub profile_option_count: usize,
    pub input_path_count: usize,
    pub translation_unit_count: usize,
    /// Index of the single unit grouping all native-language inputs, once
    /// lazily created.
    pub native_translation_unit: Option<usize>,

    pub translation_units: Vec<RawTranslationUnit>,
    pub entry_points: Vec<RawEntryPoint>,
    pub output_paths: Vec<RawOutputPath>,

    pub should_dump_ir: bool,
    pub should_validate_ir: bool,
    pub should_skip_codegen: bool,
    pub pass_through: Option<PassThrough>,
    pub matrix_layout: Option<MatrixLayout>,
    pub defines: Vec<(String, String)>,
    pub search_paths: Vec<String>,
    /// Path of the aggregate module-container output, kept separate from
    /// the ordered output-path list.
    pub container_path: Option<String>,
}

impl<'a> OptionsResolver<'a> {
    pub(crate) fn new(session: &'a Session) -> Self {
        Self {
            session,
            compile_flags: CompileFlags::default(),
            target_flags: TargetFlags::default(),
            chosen_target: None,
            current_profile: None,
            current_translation_unit: None,
            profile_option_count: 0,
            input_path_count: 0,
            translation_unit_count: 0,
            native_translation_unit: None,
            translation_units: Vec::new(),
            entry_points: Vec::new(),
            output_paths: Vec::new(),
            should_dump_ir: false,
            should_validate_ir: false,
            should_skip_codegen: false,
            pass_through: None,
            matrix_layout: None,
            defines: Vec::new(),
            search_paths: Vec::new(),
            container_path: None,
        }
    }
}

/// Resolve a command line into `request`.
///
/// On success the request holds the fully resolved translation units, entry
/// points, targets, defines, and search paths. On failure the returned
/// [`ResolveError`] carries the rendered diagnostic text, which also remains
/// readable via [`CompileRequest::diagnostic_output`].
pub fn resolve_options(
    args: &[String],
    session: &Session,
    request: &mut CompileRequest,
) -> Result<(), ResolveError> {
    let mut resolver = OptionsResolver::new(session);
    // The request may have been initialized through the API before parsing;
    // flag options accumulate on top of what is already set.
    resolver.compile_flags = request.compile_flags();

    if resolver.scan(args, request.sink_mut()).is_ok() {
        resolver.resolve_entry_points(request.sink_mut());
        resolver.reconcile_outputs(request);
        if request.sink().error_count() == 0 {
            resolver.emit(request);
        }
    }

    let error_count = request.sink().error_count();
    if error_count == 0 {
        Ok(())
    } else {
        Err(ResolveError {
            error_count,
            output: request.diagnostic_output().to_string(),
        })
    }
}
