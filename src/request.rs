//! The compile-request object populated by option resolution.
//!
//! [`CompileRequest`] is the narrow API surface between the command-line
//! resolver and the rest of the compiler: translation units, entry points,
//! targets, preprocessor defines, and search paths all land here. The
//! request also owns the [`DiagnosticSink`] so rendered diagnostics stay
//! readable after a failed resolution.

use std::ops::{BitOr, BitOrAssign};

use crate::diag::DiagnosticSink;
use crate::session::Profile;

/// Source language of a translation unit, inferred from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    /// The native shading language. All `.glint` inputs share one unit.
    Glint,
    Hlsl,
    Glsl,
}

/// Code generation target for a compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeGenTarget {
    Hlsl,
    Glsl,
    GlslVulkan,
    Dxbc,
    DxbcAsm,
    Dxil,
    DxilAsm,
    Spirv,
    SpirvAsm,
}

/// External backend to delegate code generation to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassThrough {
    Fxc,
    Dxc,
    Glslang,
}

/// Default matrix layout applied to every target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixLayout {
    RowMajor,
    ColumnMajor,
}

/// Format of the aggregate module-container output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    GlintModule,
}

/// Global compile-behavior flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileFlags(u32);

impl CompileFlags {
    pub const NO_MANGLING: CompileFlags = CompileFlags(1 << 0);
    pub const NO_CODEGEN: CompileFlags = CompileFlags(1 << 1);

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: CompileFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for CompileFlags {
    type Output = CompileFlags;

    fn bitor(self, rhs: CompileFlags) -> CompileFlags {
        CompileFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for CompileFlags {
    fn bitor_assign(&mut self, rhs: CompileFlags) {
        self.0 |= rhs.0;
    }
}

/// Per-target flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TargetFlags(u32);

impl TargetFlags {
    pub const PARAMETER_BLOCKS_USE_REGISTER_SPACES: TargetFlags = TargetFlags(1 << 0);

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: TargetFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for TargetFlags {
    type Output = TargetFlags;

    fn bitor(self, rhs: TargetFlags) -> TargetFlags {
        TargetFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for TargetFlags {
    fn bitor_assign(&mut self, rhs: TargetFlags) {
        self.0 |= rhs.0;
    }
}

/// A logical grouping of source inputs compiled together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUnit {
    pub language: SourceLanguage,
    pub source_files: Vec<String>,
}

/// A named shader entry point registered with the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    pub translation_unit: usize,
    pub name: String,
    pub profile: Profile,
    pub output_path: Option<String>,
}

/// One requested code generation target with its per-target settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetRequest {
    pub target: CodeGenTarget,
    pub flags: TargetFlags,
    pub matrix_layout: Option<MatrixLayout>,
}

impl TargetRequest {
    fn new(target: CodeGenTarget) -> Self {
        Self {
            target,
            flags: TargetFlags::default(),
            matrix_layout: None,
        }
    }
}

/// The compilation request being assembled.
#[derive(Debug, Default)]
pub struct CompileRequest {
    compile_flags: CompileFlags,
    should_dump_ir: bool,
    should_validate_ir: bool,
    should_skip_codegen: bool,
    translation_units: Vec<TranslationUnit>,
    entry_points: Vec<EntryPoint>,
    targets: Vec<TargetRequest>,
    pass_through: Option<PassThrough>,
    defines: Vec<(String, String)>,
    search_paths: Vec<String>,
    container_format: Option<ContainerFormat>,
    container_output_path: Option<String>,
    sink: DiagnosticSink,
}

impl CompileRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new translation unit, returning its index.
    pub fn add_translation_unit(&mut self, language: SourceLanguage) -> usize {
        let index = self.translation_units.len();
        self.translation_units.push(TranslationUnit {
            language,
            source_files: Vec::new(),
        });
        index
    }

    /// Append a source file to an existing translation unit.
    pub fn add_translation_unit_source_file(&mut self, unit: usize, path: &str) {
        self.translation_units[unit].source_files.push(path.to_string());
    }

    /// Register an entry point against a translation unit, returning its index.
    pub fn add_entry_point(&mut self, unit: usize, name: &str, profile: Profile) -> usize {
        let index = self.entry_points.len();
        self.entry_points.push(EntryPoint {
            translation_unit: unit,
            name: name.to_string(),
            profile,
            output_path: None,
        });
        index
    }

    pub fn set_entry_point_output_path(&mut self, entry_point: usize, path: &str) {
        self.entry_points[entry_point].output_path = Some(path.to_string());
    }

    /// Set the primary code generation target, replacing any existing one.
    pub fn set_code_gen_target(&mut self, target: CodeGenTarget) {
        if let Some(primary) = self.targets.first_mut() {
            primary.target = target;
        } else {
            self.targets.push(TargetRequest::new(target));
        }
    }

    /// Append an additional code generation target.
    pub fn add_code_gen_target(&mut self, target: CodeGenTarget) {
        self.targets.push(TargetRequest::new(target));
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Apply per-target flags to the target at `index`, if it exists.
    pub fn set_target_flags(&mut self, index: usize, flags: TargetFlags) {
        if let Some(target) = self.targets.get_mut(index) {
            target.flags = flags;
        }
    }

    /// Set the default matrix layout for the target at `index`, if it exists.
    pub fn set_target_matrix_layout(&mut self, index: usize, layout: MatrixLayout) {
        if let Some(target) = self.targets.get_mut(index) {
            target.matrix_layout = Some(layout);
        }
    }

    pub fn set_pass_through(&mut self, pass_through: PassThrough) {
        self.pass_through = Some(pass_through);
    }

    pub fn add_preprocessor_define(&mut self, name: &str, value: &str) {
        self.defines.push((name.to_string(), value.to_string()));
    }

    pub fn add_search_path(&mut self, path: &str) {
        self.search_paths.push(path.to_string());
    }

    pub fn set_container_format(&mut self, format: ContainerFormat) {
        self.container_format = Some(format);
    }

    pub fn set_container_output_path(&mut self, path: &str) {
        self.container_output_path = Some(path.to_string());
    }

    pub fn set_compile_flags(&mut self, flags: CompileFlags) {
        self.compile_flags = flags;
    }

    pub fn set_should_dump_ir(&mut self, value: bool) {
        self.should_dump_ir = value;
    }

    pub fn set_should_validate_ir(&mut self, value: bool) {
        self.should_validate_ir = value;
    }

    pub fn set_should_skip_codegen(&mut self, value: bool) {
        self.should_skip_codegen = value;
    }

    pub fn translation_units(&self) -> &[TranslationUnit] {
        &self.translation_units
    }

    pub fn entry_points(&self) -> &[EntryPoint] {
        &self.entry_points
    }

    pub fn targets(&self) -> &[TargetRequest] {
        &self.targets
    }

    pub fn pass_through(&self) -> Option<PassThrough> {
        self.pass_through
    }

    pub fn defines(&self) -> &[(String, String)] {
        &self.defines
    }

    pub fn search_paths(&self) -> &[String] {
        &self.search_paths
    }

    pub fn container_format(&self) -> Option<ContainerFormat> {
        self.container_format
    }

    pub fn container_output_path(&self) -> Option<&str> {
        self.container_output_path.as_deref()
    }

    pub fn compile_flags(&self) -> CompileFlags {
        self.compile_flags
    }

    pub fn should_dump_ir(&self) -> bool {
        self.should_dump_ir
    }

    pub fn should_validate_ir(&self) -> bool {
        self.should_validate_ir
    }

    pub fn should_skip_codegen(&self) -> bool {
        self.should_skip_codegen
    }

    pub fn sink(&self) -> &DiagnosticSink {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut DiagnosticSink {
        &mut self.sink
    }

    /// The rendered diagnostic text accumulated during resolution.
    pub fn diagnostic_output(&self) -> &str {
        self.sink.output()
    }
}
