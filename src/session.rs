//! Session-level state shared across compile requests.
//!
//! For option resolution the session's job is the profile registry: mapping
//! the names accepted by `-profile` to [`Profile`] values.

use std::collections::HashMap;

/// A capability/stage profile attachable to an entry point.
///
/// GLSL profiles name a pipeline stage directly; HLSL profiles name a stage
/// plus shader-model level, following the usual `xs_M_m` scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    GlslVertex,
    GlslFragment,
    GlslGeometry,
    GlslTessControl,
    GlslTessEval,
    GlslCompute,
    Vs4_0,
    Vs5_0,
    Ps4_0,
    Ps5_0,
    Gs5_0,
    Hs5_0,
    Ds5_0,
    Cs5_0,
}

/// Command-line names for every registered profile.
const PROFILE_NAMES: &[(&str, Profile)] = &[
    ("glsl_vertex", Profile::GlslVertex),
    ("glsl_fragment", Profile::GlslFragment),
    ("glsl_geometry", Profile::GlslGeometry),
    ("glsl_tess_control", Profile::GlslTessControl),
    ("glsl_tess_eval", Profile::GlslTessEval),
    ("glsl_compute", Profile::GlslCompute),
    ("vs_4_0", Profile::Vs4_0),
    ("vs_5_0", Profile::Vs5_0),
    ("ps_4_0", Profile::Ps4_0),
    ("ps_5_0", Profile::Ps5_0),
    ("gs_5_0", Profile::Gs5_0),
    ("hs_5_0", Profile::Hs5_0),
    ("ds_5_0", Profile::Ds5_0),
    ("cs_5_0", Profile::Cs5_0),
];

/// Owns the profile registry consulted by `-profile`.
#[derive(Debug)]
pub struct Session {
    profiles: HashMap<&'static str, Profile>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            profiles: PROFILE_NAMES.iter().copied().collect(),
        }
    }

    /// Look up a profile by its command-line name.
    pub fn find_profile(&self, name: &str) -> Option<Profile> {
        self.profiles.get(name).copied()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_profiles_resolve() {
        let session = Session::new();
        assert_eq!(session.find_profile("glsl_fragment"), Some(Profile::GlslFragment));
        assert_eq!(session.find_profile("ps_5_0"), Some(Profile::Ps5_0));
    }

    #[test]
    fn unknown_profile_is_none() {
        let session = Session::new();
        assert_eq!(session.find_profile("ps_9_9"), None);
        assert_eq!(session.find_profile(""), None);
    }
}
