//! The output target reconciler.
//!
//! `-o` paths are classified by extension during the scan; after the scan
//! they are associated with entry points and checked for agreement on one
//! global code generation target. When no explicit `-target` was given the
//! target is inferred from the output paths; an explicit target is trusted
//! outright.

use crate::diag::{Diagnostic, DiagnosticSink};
use crate::request::{CodeGenTarget, CompileRequest};

use super::{OptionsResolver, RawOutputPath};

/// Known output extensions and the target each implies.
const OUTPUT_SUFFIXES: &[(&str, CodeGenTarget)] = &[
    (".hlsl", CodeGenTarget::Hlsl),
    (".fx", CodeGenTarget::Hlsl),
    (".dxbc.asm", CodeGenTarget::DxbcAsm),
    (".dxbc", CodeGenTarget::Dxbc),
    (".glsl", CodeGenTarget::Glsl),
    (".vert", CodeGenTarget::Glsl),
    (".frag", CodeGenTarget::Glsl),
    (".geom", CodeGenTarget::Glsl),
    (".tesc", CodeGenTarget::Glsl),
    (".tese", CodeGenTarget::Glsl),
    (".comp", CodeGenTarget::Glsl),
    (".spv.asm", CodeGenTarget::SpirvAsm),
    (".spv", CodeGenTarget::Spirv),
];

/// The aggregate module-container extension. Stored separately from the
/// ordered output-path list and never tied to an entry point.
const CONTAINER_SUFFIX: &str = ".glint-module";

impl OptionsResolver<'_> {
    /// Record an `-o PATH` option, classifying the path by its extension.
    /// An unrecognized extension is allowed here; the target may still come
    /// from another argument.
    pub(crate) fn add_output_path(&mut self, path: &str) {
        if path.ends_with(CONTAINER_SUFFIX) {
            self.container_path = Some(path.to_string());
            return;
        }

        let target = OUTPUT_SUFFIXES
            .iter()
            .find(|(suffix, _)| path.ends_with(suffix))
            .map(|(_, target)| *target);

        self.output_paths.push(RawOutputPath {
            path: path.to_string(),
            target,
        });
    }

    /// Post-scan fix-up: associate output paths with entry points and settle
    /// the global target.
    pub(crate) fn reconcile_outputs(&mut self, request: &mut CompileRequest) {
        if self.output_paths.is_empty() {
            return;
        }

        // Requesting several targets while also naming per-entry-point output
        // files cannot be satisfied; warn but keep going.
        if request.target_count() > 1 {
            request
                .sink_mut()
                .diagnose(Diagnostic::ExplicitOutputPathsAndMultipleTargets);
        }

        let sink = request.sink_mut();
        self.associate_outputs(sink);

        if self.chosen_target.is_none() {
            self.infer_target_from_outputs(sink);
        }
        // An explicit `-target` is trusted outright; path-implied targets
        // are not cross-checked against it.
    }

    fn associate_outputs(&mut self, sink: &mut DiagnosticSink) {
        let entry_point_count = self.entry_points.len();
        let output_path_count = self.output_paths.len();

        if entry_point_count == 1 && output_path_count == 1 {
            self.entry_points[0].output_path = Some(0);
        } else if output_path_count > entry_point_count {
            sink.diagnose(Diagnostic::TooManyOutputPaths {
                output_path_count,
                entry_point_count,
            });
        } else if let Some(unresolved) = self
            .entry_points
            .iter()
            .find(|entry| entry.output_path.is_none())
        {
            // Only the first unresolved entry point is named, even if more
            // follow.
            sink.diagnose(Diagnostic::MissingOutputPath {
                entry_point: unresolved.name.clone(),
            });
        }
    }

    /// With no explicit target, the output paths must agree on one.
    fn infer_target_from_outputs(&mut self, sink: &mut DiagnosticSink) {
        if let Some(unknown) = self.output_paths.iter().find(|output| output.target.is_none()) {
            sink.diagnose(Diagnostic::CannotInferTargetFromPath {
                path: unknown.path.clone(),
            });
            return;
        }

        let target = self.output_paths[0].target;
        self.chosen_target = target;

        if let Some(mismatch) = self
            .output_paths
            .iter()
            .find(|output| output.target != target)
        {
            sink.diagnose(Diagnostic::InconsistentOutputTargets {
                first: self.output_paths[0].path.clone(),
                second: mismatch.path.clone(),
            });
        }
    }
}
