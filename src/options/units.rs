//! The translation-unit accumulator.
//!
//! Input paths are classified against one static ordered suffix table.
//! Native-language (`.glint`) inputs all join a single lazily created unit;
//! every foreign-language input gets a unit of its own, and stage-named
//! extensions additionally imply a profile for later entry-point inference.

use crate::diag::{Diagnostic, DiagnosticSink};
use crate::request::SourceLanguage;
use crate::session::Profile;

use super::{OptionsResolver, RawTranslationUnit, ScanAbort, ScanResult};

struct SourceSuffix {
    suffix: &'static str,
    language: SourceLanguage,
    implicit_profile: Option<Profile>,
}

const SOURCE_SUFFIXES: &[SourceSuffix] = &[
    SourceSuffix {
        suffix: ".glint",
        language: SourceLanguage::Glint,
        implicit_profile: None,
    },
    SourceSuffix {
        suffix: ".hlsl",
        language: SourceLanguage::Hlsl,
        implicit_profile: None,
    },
    SourceSuffix {
        suffix: ".fx",
        language: SourceLanguage::Hlsl,
        implicit_profile: None,
    },
    SourceSuffix {
        suffix: ".glsl",
        language: SourceLanguage::Glsl,
        implicit_profile: None,
    },
    SourceSuffix {
        suffix: ".vert",
        language: SourceLanguage::Glsl,
        implicit_profile: Some(Profile::GlslVertex),
    },
    SourceSuffix {
        suffix: ".frag",
        language: SourceLanguage::Glsl,
        implicit_profile: Some(Profile::GlslFragment),
    },
    SourceSuffix {
        suffix: ".geom",
        language: SourceLanguage::Glsl,
        implicit_profile: Some(Profile::GlslGeometry),
    },
    SourceSuffix {
        suffix: ".tesc",
        language: SourceLanguage::Glsl,
        implicit_profile: Some(Profile::GlslTessControl),
    },
    SourceSuffix {
        suffix: ".tese",
        language: SourceLanguage::Glsl,
        implicit_profile: Some(Profile::GlslTessEval),
    },
    SourceSuffix {
        suffix: ".comp",
        language: SourceLanguage::Glsl,
        implicit_profile: Some(Profile::GlslCompute),
    },
];

fn classify_source_path(path: &str) -> Option<&'static SourceSuffix> {
    SOURCE_SUFFIXES.iter().find(|entry| path.ends_with(entry.suffix))
}

impl OptionsResolver<'_> {
    /// Accept a bare input path, grouping it into a translation unit by its
    /// extension. The touched unit becomes the current unit for any `-entry`
    /// option that follows.
    pub(crate) fn add_input_path(
        &mut self,
        path: &str,
        sink: &mut DiagnosticSink,
    ) -> ScanResult<()> {
        self.input_path_count += 1;

        let Some(entry) = classify_source_path(path) else {
            sink.diagnose(Diagnostic::UnknownSourceLanguage {
                path: path.to_string(),
            });
            return Err(ScanAbort);
        };

        log::debug!(
            "classified input `{path}` as {:?} (implicit profile {:?})",
            entry.language,
            entry.implicit_profile
        );

        match entry.language {
            SourceLanguage::Glint => self.add_native_input(path),
            language => self.add_foreign_input(path, language, entry.implicit_profile),
        }

        Ok(())
    }

    /// Native inputs coalesce into a single unit, created on first use.
    fn add_native_input(&mut self, path: &str) {
        let unit = match self.native_translation_unit {
            Some(unit) => unit,
            None => {
                let unit = self.add_translation_unit(SourceLanguage::Glint, None);
                self.native_translation_unit = Some(unit);
                unit
            }
        };
        self.translation_units[unit].source_paths.push(path.to_string());
        self.current_translation_unit = Some(unit);
    }

    /// Each foreign input gets a translation unit of its own.
    fn add_foreign_input(
        &mut self,
        path: &str,
        language: SourceLanguage,
        implicit_profile: Option<Profile>,
    ) {
        let unit = self.add_translation_unit(language, implicit_profile);
        self.translation_units[unit].source_paths.push(path.to_string());
        self.current_translation_unit = Some(unit);
    }

    fn add_translation_unit(
        &mut self,
        language: SourceLanguage,
        implicit_profile: Option<Profile>,
    ) -> usize {
        let index = self.translation_units.len();
        self.translation_units.push(RawTranslationUnit {
            language,
            implicit_profile,
            index,
            source_paths: Vec::new(),
        });
        self.translation_unit_count += 1;
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    fn add_paths<'a>(session: &'a Session, paths: &[&str]) -> (OptionsResolver<'a>, DiagnosticSink, bool) {
        let mut resolver = OptionsResolver::new(session);
        let mut sink = DiagnosticSink::new();
        let mut ok = true;
        for path in paths {
            if resolver.add_input_path(path, &mut sink).is_err() {
                ok = false;
                break;
            }
        }
        (resolver, sink, ok)
    }

    #[test]
    fn native_inputs_coalesce_into_one_unit() {
        let session = Session::new();
        let (resolver, _, ok) = add_paths(&session, &["a.glint", "b.glint", "c.glint"]);
        assert!(ok);
        assert_eq!(resolver.translation_units.len(), 1);
        assert_eq!(resolver.translation_unit_count, 1);
        assert_eq!(resolver.input_path_count, 3);
        assert_eq!(
            resolver.translation_units[0].source_paths,
            vec!["a.glint", "b.glint", "c.glint"]
        );
    }

    #[test]
    fn foreign_inputs_each_get_a_unit_in_encounter_order() {
        let session = Session::new();
        let (resolver, _, ok) = add_paths(&session, &["x.hlsl", "y.glsl"]);
        assert!(ok);
        assert_eq!(resolver.translation_units.len(), 2);
        assert_eq!(resolver.translation_units[0].language, SourceLanguage::Hlsl);
        assert_eq!(resolver.translation_units[1].language, SourceLanguage::Glsl);
        assert_eq!(resolver.translation_units[0].index, 0);
        assert_eq!(resolver.translation_units[1].index, 1);
    }

    #[test]
    fn native_unit_interleaves_with_foreign_units() {
        let session = Session::new();
        let (resolver, _, ok) = add_paths(&session, &["a.glint", "x.hlsl", "b.glint"]);
        assert!(ok);
        assert_eq!(resolver.translation_units.len(), 2);
        assert_eq!(resolver.translation_units[0].source_paths, vec!["a.glint", "b.glint"]);
        // Whichever unit was last touched is the current one.
        assert_eq!(resolver.current_translation_unit, Some(0));
    }

    #[test]
    fn stage_suffixes_imply_profiles() {
        let session = Session::new();
        let (resolver, _, ok) = add_paths(&session, &["shader.frag", "shader.comp"]);
        assert!(ok);
        assert_eq!(resolver.translation_units[0].implicit_profile, Some(Profile::GlslFragment));
        assert_eq!(resolver.translation_units[1].implicit_profile, Some(Profile::GlslCompute));
    }

    #[test]
    fn unknown_extension_aborts_with_path() {
        let session = Session::new();
        let (_, sink, ok) = add_paths(&session, &["shader.metal"]);
        assert!(!ok);
        assert!(sink.output().contains("`shader.metal`"));
    }

    #[test]
    fn current_unit_follows_latest_input() {
        let session = Session::new();
        let (resolver, _, _) = add_paths(&session, &["x.hlsl", "y.glsl"]);
        assert_eq!(resolver.current_translation_unit, Some(1));
    }
}
