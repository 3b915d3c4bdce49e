//! Emission: push the fully resolved state into the compile request.
//!
//! Runs only when no error has been diagnosed, so every link the backfill
//! passes are responsible for is resolved by the time this executes.

use crate::request::{CompileRequest, ContainerFormat};

use super::OptionsResolver;

impl OptionsResolver<'_> {
    pub(crate) fn emit(&self, request: &mut CompileRequest) {
        request.set_compile_flags(self.compile_flags);
        if self.should_dump_ir {
            request.set_should_dump_ir(true);
        }
        if self.should_validate_ir {
            request.set_should_validate_ir(true);
        }
        if self.should_skip_codegen {
            request.set_should_skip_codegen(true);
        }
        if let Some(pass_through) = self.pass_through {
            request.set_pass_through(pass_through);
        }

        for (name, value) in &self.defines {
            request.add_preprocessor_define(name, value);
        }
        for path in &self.search_paths {
            request.add_search_path(path);
        }
        if let Some(path) = &self.container_path {
            request.set_container_format(ContainerFormat::GlintModule);
            request.set_container_output_path(path);
        }

        if let Some(target) = self.chosen_target {
            request.set_code_gen_target(target);
        }
        if !self.target_flags.is_empty() {
            request.set_target_flags(0, self.target_flags);
        }
        if let Some(layout) = self.matrix_layout {
            for index in 0..request.target_count() {
                request.set_target_matrix_layout(index, layout);
            }
        }

        for unit in &self.translation_units {
            let index = request.add_translation_unit(unit.language);
            debug_assert_eq!(index, unit.index);
            for path in &unit.source_paths {
                request.add_translation_unit_source_file(index, path);
            }
        }

        for entry in &self.entry_points {
            // The backfill passes leave these resolved whenever no error was
            // diagnosed, and emission only runs at zero errors.
            let (Some(unit), Some(profile)) = (entry.translation_unit, entry.profile) else {
                debug_assert!(false, "unresolved entry point reached emission");
                continue;
            };

            let index = request.add_entry_point(unit, &entry.name, profile);
            if let Some(output) = entry.output_path {
                request.set_entry_point_output_path(index, &self.output_paths[output].path);
            }
        }
    }
}
