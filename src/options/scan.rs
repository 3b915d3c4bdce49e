//! The scan pass: one left-to-right walk over the token list.
//!
//! A token starting with `-` is dispatched as an option; anything else is a
//! bare input path handed to the translation-unit accumulator. The `--`
//! token disables option parsing for every remaining token. An unrecognized
//! option or a missing option value aborts the scan after diagnosing.

use crate::diag::{Diagnostic, DiagnosticSink};
use crate::request::{CodeGenTarget, CompileFlags, MatrixLayout, PassThrough, TargetFlags};

use super::{OptionsResolver, ScanAbort, ScanResult};

/// Names accepted by `-target`/`-backend`. `none` is valid and leaves the
/// target unset, so inference from output paths still runs.
const TARGET_NAMES: &[(&str, Option<CodeGenTarget>)] = &[
    ("glsl", Some(CodeGenTarget::Glsl)),
    ("glsl_vk", Some(CodeGenTarget::GlslVulkan)),
    ("hlsl", Some(CodeGenTarget::Hlsl)),
    ("spirv", Some(CodeGenTarget::Spirv)),
    ("spirv-assembly", Some(CodeGenTarget::SpirvAsm)),
    ("dxbc", Some(CodeGenTarget::Dxbc)),
    ("dxbc-assembly", Some(CodeGenTarget::DxbcAsm)),
    ("dxil", Some(CodeGenTarget::Dxil)),
    ("dxil-assembly", Some(CodeGenTarget::DxilAsm)),
    ("none", None),
];

/// Names accepted by `-pass-through`.
const PASS_THROUGH_NAMES: &[(&str, PassThrough)] = &[
    ("fxc", PassThrough::Fxc),
    ("dxc", PassThrough::Dxc),
    ("glslang", PassThrough::Glslang),
];

/// Consume the next token as the value of `option`, or diagnose
/// `MissingArgument` and abort.
fn read_value<'v>(
    option: &str,
    args: &'v [String],
    index: &mut usize,
    sink: &mut DiagnosticSink,
) -> ScanResult<&'v str> {
    if *index >= args.len() {
        sink.diagnose(Diagnostic::MissingArgument {
            option: option.to_string(),
        });
        return Err(ScanAbort);
    }
    let value = args[*index].as_str();
    *index += 1;
    Ok(value)
}

impl OptionsResolver<'_> {
    /// Run the scan pass over the full token list.
    pub(crate) fn scan(&mut self, args: &[String], sink: &mut DiagnosticSink) -> ScanResult<()> {
        let mut index = 0;
        let mut options_enabled = true;

        while index < args.len() {
            let arg = args[index].as_str();
            index += 1;

            if options_enabled && arg.starts_with('-') {
                self.dispatch_option(arg, args, &mut index, &mut options_enabled, sink)?;
            } else {
                self.add_input_path(arg, sink)?;
            }
        }

        Ok(())
    }

    fn dispatch_option(
        &mut self,
        arg: &str,
        args: &[String],
        index: &mut usize,
        options_enabled: &mut bool,
        sink: &mut DiagnosticSink,
    ) -> ScanResult<()> {
        match arg {
            "-no-mangle" => self.compile_flags |= CompileFlags::NO_MANGLING,
            "-no-codegen" => self.compile_flags |= CompileFlags::NO_CODEGEN,
            "-dump-ir" => self.should_dump_ir = true,
            "-validate-ir" => self.should_validate_ir = true,
            "-skip-codegen" => self.should_skip_codegen = true,
            "-parameter-blocks-use-register-spaces" => {
                self.target_flags |= TargetFlags::PARAMETER_BLOCKS_USE_REGISTER_SPACES;
            }
            "-backend" | "-target" => {
                let name = read_value(arg, args, index, sink)?;
                let Some((_, target)) = TARGET_NAMES.iter().find(|(n, _)| *n == name) else {
                    sink.diagnose(Diagnostic::UnknownCodeGenTarget {
                        name: name.to_string(),
                    });
                    return Err(ScanAbort);
                };
                self.chosen_target = *target;
            }
            "-profile" => {
                let name = read_value(arg, args, index, sink)?;
                let Some(profile) = self.session.find_profile(name) else {
                    sink.diagnose(Diagnostic::UnknownProfile {
                        name: name.to_string(),
                    });
                    return Err(ScanAbort);
                };
                self.current_profile = Some(profile);
                self.profile_option_count += 1;
            }
            "-entry" => {
                let name = read_value(arg, args, index, sink)?;
                self.add_entry_point(name);
            }
            "-pass-through" => {
                let name = read_value(arg, args, index, sink)?;
                let Some((_, pass_through)) = PASS_THROUGH_NAMES.iter().find(|(n, _)| *n == name)
                else {
                    sink.diagnose(Diagnostic::UnknownPassThroughTarget {
                        name: name.to_string(),
                    });
                    return Err(ScanAbort);
                };
                self.pass_through = Some(*pass_through);
            }
            "-o" => {
                let path = read_value(arg, args, index, sink)?;
                self.add_output_path(path);
            }
            "-matrix-layout-row-major" => self.matrix_layout = Some(MatrixLayout::RowMajor),
            "-matrix-layout-column-major" => self.matrix_layout = Some(MatrixLayout::ColumnMajor),
            "--" => *options_enabled = false,
            // The define may be part of the same token (`-DFOO`) or come
            // separately (`-D FOO`); likewise for `-I`.
            _ if arg.starts_with("-D") => {
                let suffix = &arg[2..];
                let define = if suffix.is_empty() {
                    read_value(arg, args, index, sink)?
                } else {
                    suffix
                };
                let (name, value) = define.split_once('=').unwrap_or((define, ""));
                self.defines.push((name.to_string(), value.to_string()));
            }
            _ if arg.starts_with("-I") => {
                let suffix = &arg[2..];
                let path = if suffix.is_empty() {
                    read_value(arg, args, index, sink)?
                } else {
                    suffix
                };
                self.search_paths.push(path.to_string());
            }
            _ => {
                sink.diagnose(Diagnostic::UnknownOption {
                    option: arg.to_string(),
                });
                return Err(ScanAbort);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::diag::DiagnosticSink;
    use crate::options::OptionsResolver;
    use crate::request::{CompileFlags, MatrixLayout, PassThrough, TargetFlags};
    use crate::session::{Profile, Session};

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn scan<'a>(session: &'a Session, tokens: &[&str]) -> (OptionsResolver<'a>, DiagnosticSink, bool) {
        let mut resolver = OptionsResolver::new(session);
        let mut sink = DiagnosticSink::new();
        let ok = resolver.scan(&args(tokens), &mut sink).is_ok();
        (resolver, sink, ok)
    }

    #[test]
    fn simple_flags_accumulate() {
        let session = Session::new();
        let (resolver, sink, ok) = scan(&session, &[
            "-no-mangle",
            "-no-codegen",
            "-dump-ir",
            "-validate-ir",
            "-skip-codegen",
            "-parameter-blocks-use-register-spaces",
        ]);
        assert!(ok);
        assert_eq!(sink.error_count(), 0);
        assert!(resolver.compile_flags.contains(CompileFlags::NO_MANGLING));
        assert!(resolver.compile_flags.contains(CompileFlags::NO_CODEGEN));
        assert!(resolver.should_dump_ir);
        assert!(resolver.should_validate_ir);
        assert!(resolver.should_skip_codegen);
        assert!(resolver
            .target_flags
            .contains(TargetFlags::PARAMETER_BLOCKS_USE_REGISTER_SPACES));
    }

    #[test]
    fn define_forms_are_equivalent() {
        let session = Session::new();
        let (joined, _, _) = scan(&session, &["-DFOO=1"]);
        let (split, _, _) = scan(&session, &["-D", "FOO=1"]);
        assert_eq!(joined.defines, split.defines);
        assert_eq!(joined.defines, vec![("FOO".to_string(), "1".to_string())]);
    }

    #[test]
    fn define_without_value_is_empty_string() {
        let session = Session::new();
        let (resolver, _, _) = scan(&session, &["-DFOO"]);
        assert_eq!(resolver.defines, vec![("FOO".to_string(), String::new())]);
    }

    #[test]
    fn include_forms_are_equivalent() {
        let session = Session::new();
        let (joined, _, _) = scan(&session, &["-Iinclude/shaders"]);
        let (split, _, _) = scan(&session, &["-I", "include/shaders"]);
        assert_eq!(joined.search_paths, split.search_paths);
        assert_eq!(joined.search_paths, vec!["include/shaders".to_string()]);
    }

    #[test]
    fn missing_value_names_the_flag() {
        let session = Session::new();
        let (_, sink, ok) = scan(&session, &["-I"]);
        assert!(!ok);
        assert!(sink.output().contains("expected an argument for option `-I`"));
    }

    #[test]
    fn unknown_option_aborts() {
        let session = Session::new();
        let (resolver, sink, ok) = scan(&session, &["-DFOO", "-frobnicate", "-DBAR"]);
        assert!(!ok);
        assert_eq!(sink.error_count(), 1);
        // State from before the bad token is retained; nothing after it ran.
        assert_eq!(resolver.defines.len(), 1);
    }

    #[test]
    fn profile_tracking() {
        let session = Session::new();
        let (resolver, _, ok) = scan(&session, &["-profile", "ps_4_0", "-profile", "ps_5_0"]);
        assert!(ok);
        assert_eq!(resolver.current_profile, Some(Profile::Ps5_0));
        assert_eq!(resolver.profile_option_count, 2);
    }

    #[test]
    fn target_none_leaves_target_unset() {
        let session = Session::new();
        let (resolver, _, ok) = scan(&session, &["-target", "none"]);
        assert!(ok);
        assert_eq!(resolver.chosen_target, None);
    }

    #[test]
    fn unknown_target_aborts() {
        let session = Session::new();
        let (_, sink, ok) = scan(&session, &["-target", "msl"]);
        assert!(!ok);
        assert!(sink.output().contains("unknown code generation target `msl`"));
    }

    #[test]
    fn pass_through_lookup() {
        let session = Session::new();
        let (resolver, _, ok) = scan(&session, &["-pass-through", "glslang"]);
        assert!(ok);
        assert_eq!(resolver.pass_through, Some(PassThrough::Glslang));

        let (_, sink, ok) = scan(&session, &["-pass-through", "nvcc"]);
        assert!(!ok);
        assert!(sink.output().contains("unknown pass-through target `nvcc`"));
    }

    #[test]
    fn matrix_layout_last_wins() {
        let session = Session::new();
        let (resolver, _, _) = scan(&session, &["-matrix-layout-row-major", "-matrix-layout-column-major"]);
        assert_eq!(resolver.matrix_layout, Some(MatrixLayout::ColumnMajor));
    }

    #[test]
    fn terminator_disables_option_parsing() {
        let session = Session::new();
        let (resolver, sink, ok) = scan(&session, &["--", "-x"]);
        // `-x` is treated as an input path; its extension matches nothing.
        assert!(!ok);
        assert_eq!(resolver.input_path_count, 1);
        assert!(sink.output().contains("cannot infer source language"));
    }

    #[test]
    fn terminator_accepts_dashed_input_paths() {
        let session = Session::new();
        let (resolver, _, ok) = scan(&session, &["--", "-weird-name.hlsl"]);
        assert!(ok);
        assert_eq!(resolver.translation_units.len(), 1);
        assert_eq!(resolver.translation_units[0].source_paths, vec!["-weird-name.hlsl"]);
    }
}
