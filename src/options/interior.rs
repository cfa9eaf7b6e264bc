use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{clamp_slider, normalize_hint, Labeled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum InteriorMode {
    /// Polish only: same camera, geometry correction.
    Retouch,
    /// New straight-on camera position and a wider frame.
    Reshoot,
    /// Reshoot plus added styling props.
    ReshootStyling,
}

impl InteriorMode {
    pub fn description(self) -> &'static str {
        match self {
            InteriorMode::Retouch => "Polish only - lighting, color, geometry",
            InteriorMode::Reshoot => "Geometry and composition from a new camera position",
            InteriorMode::ReshootStyling => "Full magazine shot with tasteful styling",
        }
    }
}

impl Labeled for InteriorMode {
    fn label(&self) -> &'static str {
        match self {
            InteriorMode::Retouch => "Retouch (polish only)",
            InteriorMode::Reshoot => "Reshoot (geometry + composition)",
            InteriorMode::ReshootStyling => "Reshoot + Styling (full magazine)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InteriorOptions {
    pub transform_mode: InteriorMode,
    pub strength: i32,
    pub hdr_windows: bool,
    pub creative_crop: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prop_suggestions: Option<String>,
}

impl Default for InteriorOptions {
    fn default() -> Self {
        Self {
            transform_mode: InteriorMode::Reshoot,
            strength: 70,
            hdr_windows: false,
            creative_crop: false,
            prop_suggestions: None,
        }
    }
}

impl InteriorOptions {
    pub fn normalized(self) -> Self {
        Self {
            strength: clamp_slider("strength", self.strength, 0, 100),
            prop_suggestions: normalize_hint(self.prop_suggestions),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_uses_kebab_case_modes() {
        let options: InteriorOptions = serde_json::from_str(
            r#"{"transformMode":"reshoot-styling","strength":55,"hdrWindows":true,"creativeCrop":false,"propSuggestions":"  "}"#,
        )
        .unwrap();
        let options = options.normalized();
        assert_eq!(options.transform_mode, InteriorMode::ReshootStyling);
        assert_eq!(options.prop_suggestions, None);
    }
}
