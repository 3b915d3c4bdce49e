//! The entry-point resolver.
//!
//! Explicit `-entry` declarations are recorded live during the scan, picking
//! up whatever profile, translation unit, and output path are current at
//! that point. After the scan, implicit entry points are synthesized for
//! foreign-language units if none were declared, and the two backfill passes
//! resolve any links still missing.

use crate::diag::{Diagnostic, DiagnosticSink};
use crate::request::SourceLanguage;

use super::{OptionsResolver, RawEntryPoint};

impl OptionsResolver<'_> {
    /// Record an explicit `-entry NAME` declaration.
    pub(crate) fn add_entry_point(&mut self, name: &str) {
        // The most recently declared output path, if any, is tentatively
        // associated with this entry point.
        let output_path = self.output_paths.len().checked_sub(1);

        self.entry_points.push(RawEntryPoint {
            name: name.to_string(),
            profile: self.current_profile,
            translation_unit: self.current_translation_unit,
            output_path,
        });
    }

    /// Post-scan fix-up: implicit entry points, then profile and
    /// translation-unit backfill.
    pub(crate) fn resolve_entry_points(&mut self, sink: &mut DiagnosticSink) {
        self.infer_implicit_entry_points();
        self.backfill_profiles(sink);
        self.backfill_translation_units(sink);
    }

    /// If no explicit entry points were given, synthesize one `"main"` per
    /// foreign-language unit. Native units never need an entry point named
    /// on the command line.
    fn infer_implicit_entry_points(&mut self) {
        if !self.entry_points.is_empty() {
            return;
        }

        for unit in &self.translation_units {
            if unit.language == SourceLanguage::Glint {
                continue;
            }

            // A global `-profile` wins over the extension-implied profile.
            let profile = self.current_profile.or(unit.implicit_profile);

            log::debug!(
                "inferred entry point `main` for unit {} with profile {profile:?}",
                unit.index
            );

            self.entry_points.push(RawEntryPoint {
                name: "main".to_string(),
                profile,
                translation_unit: Some(unit.index),
                output_path: None,
            });
        }
    }

    /// Apply the last-seen global profile to entry points without one.
    fn backfill_profiles(&mut self, sink: &mut DiagnosticSink) {
        let missing = self
            .entry_points
            .iter()
            .filter(|entry| entry.profile.is_none())
            .count();
        if missing == 0 {
            return;
        }

        if self.current_profile.is_none() {
            sink.diagnose(Diagnostic::NoProfileSpecified);
            return;
        }

        // With several `-profile` options and several profile-less entry
        // points there is no way to tell which profile was meant for which.
        // A lone profile-less entry point tolerates repeats: the last wins.
        if self.profile_option_count > 1 && missing > 1 {
            sink.diagnose(Diagnostic::AmbiguousProfileAssignment);
        }

        for entry in &mut self.entry_points {
            if entry.profile.is_none() {
                entry.profile = self.current_profile;
            }
        }
    }

    /// Entry points that never saw an input path default to unit 0, which is
    /// only unambiguous when exactly one unit exists.
    fn backfill_translation_units(&mut self, sink: &mut DiagnosticSink) {
        let mut any_missing = false;
        for entry in &mut self.entry_points {
            if entry.translation_unit.is_none() {
                any_missing = true;
                entry.translation_unit = Some(0);
            }
        }

        if any_missing && self.translation_unit_count != 1 {
            sink.diagnose(Diagnostic::AmbiguousTranslationUnit);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::diag::DiagnosticSink;
    use crate::options::OptionsResolver;
    use crate::session::{Profile, Session};

    fn resolver(session: &Session) -> (OptionsResolver<'_>, DiagnosticSink) {
        (OptionsResolver::new(session), DiagnosticSink::new())
    }

    #[test]
    fn explicit_entries_keep_declaration_order_and_unit() {
        let session = Session::new();
        let (mut resolver, mut sink) = resolver(&session);
        resolver.add_input_path("shader.hlsl", &mut sink).unwrap();
        resolver.add_entry_point("foo");
        resolver.add_entry_point("bar");

        assert_eq!(resolver.entry_points.len(), 2);
        assert_eq!(resolver.entry_points[0].name, "foo");
        assert_eq!(resolver.entry_points[1].name, "bar");
        assert_eq!(resolver.entry_points[0].translation_unit, Some(0));
        assert_eq!(resolver.entry_points[1].translation_unit, Some(0));
    }

    #[test]
    fn entry_before_any_input_has_no_unit() {
        let session = Session::new();
        let (mut resolver, _) = resolver(&session);
        resolver.add_entry_point("vsMain");
        assert_eq!(resolver.entry_points[0].translation_unit, None);
    }

    #[test]
    fn implicit_entry_uses_extension_profile() {
        let session = Session::new();
        let (mut resolver, mut sink) = resolver(&session);
        resolver.add_input_path("shader.frag", &mut sink).unwrap();
        resolver.resolve_entry_points(&mut sink);

        assert_eq!(sink.error_count(), 0);
        assert_eq!(resolver.entry_points.len(), 1);
        assert_eq!(resolver.entry_points[0].name, "main");
        assert_eq!(resolver.entry_points[0].profile, Some(Profile::GlslFragment));
    }

    #[test]
    fn implicit_entry_prefers_global_profile() {
        let session = Session::new();
        let (mut resolver, mut sink) = resolver(&session);
        resolver.current_profile = Some(Profile::Ps5_0);
        resolver.add_input_path("shader.frag", &mut sink).unwrap();
        resolver.resolve_entry_points(&mut sink);

        assert_eq!(resolver.entry_points[0].profile, Some(Profile::Ps5_0));
    }

    #[test]
    fn native_units_get_no_implicit_entry() {
        let session = Session::new();
        let (mut resolver, mut sink) = resolver(&session);
        resolver.add_input_path("lib.glint", &mut sink).unwrap();
        resolver.resolve_entry_points(&mut sink);

        assert!(resolver.entry_points.is_empty());
        assert_eq!(sink.error_count(), 0);
    }

    #[test]
    fn no_profile_anywhere_is_an_error() {
        let session = Session::new();
        let (mut resolver, mut sink) = resolver(&session);
        resolver.add_input_path("shader.hlsl", &mut sink).unwrap();
        resolver.add_entry_point("psMain");
        resolver.resolve_entry_points(&mut sink);

        assert_eq!(sink.error_count(), 1);
        assert!(sink.output().contains("no profile specified"));
    }

    #[test]
    fn lone_entry_tolerates_multiple_profiles_last_wins() {
        let session = Session::new();
        let (mut resolver, mut sink) = resolver(&session);
        resolver.add_input_path("shader.hlsl", &mut sink).unwrap();
        resolver.add_entry_point("psMain");
        resolver.current_profile = Some(Profile::Ps5_0);
        resolver.profile_option_count = 2;
        // The entry picked up no profile at declaration time.
        resolver.entry_points[0].profile = None;
        resolver.resolve_entry_points(&mut sink);

        assert_eq!(sink.error_count(), 0);
        assert_eq!(resolver.entry_points[0].profile, Some(Profile::Ps5_0));
    }

    #[test]
    fn several_profileless_entries_with_several_profiles_is_ambiguous() {
        let session = Session::new();
        let (mut resolver, mut sink) = resolver(&session);
        resolver.add_input_path("shader.hlsl", &mut sink).unwrap();
        resolver.add_entry_point("vsMain");
        resolver.add_entry_point("psMain");
        resolver.current_profile = Some(Profile::Ps5_0);
        resolver.profile_option_count = 2;
        resolver.resolve_entry_points(&mut sink);

        assert_eq!(sink.error_count(), 1);
        assert!(sink.output().contains("multiple `-profile` options"));
    }

    #[test]
    fn unit_backfill_requires_a_single_unit() {
        let session = Session::new();
        let (mut resolver, mut sink) = resolver(&session);
        resolver.current_profile = Some(Profile::Ps5_0);
        resolver.add_entry_point("psMain");
        resolver.add_input_path("a.hlsl", &mut sink).unwrap();
        resolver.add_input_path("b.hlsl", &mut sink).unwrap();
        resolver.resolve_entry_points(&mut sink);

        assert_eq!(sink.error_count(), 1);
        assert!(sink.output().contains("more than one exists"));
    }

    #[test]
    fn unit_backfill_defaults_to_the_only_unit() {
        let session = Session::new();
        let (mut resolver, mut sink) = resolver(&session);
        resolver.current_profile = Some(Profile::Ps5_0);
        resolver.add_entry_point("psMain");
        resolver.add_input_path("a.hlsl", &mut sink).unwrap();
        resolver.resolve_entry_points(&mut sink);

        assert_eq!(sink.error_count(), 0);
        assert_eq!(resolver.entry_points[0].translation_unit, Some(0));
    }
}
