use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{clamp_slider, normalize_hint, Labeled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransformMode {
    Retouch,
    Reshoot,
    ReshootStyled,
}

impl TransformMode {
    pub fn description(self) -> &'static str {
        match self {
            TransformMode::Retouch => "Polish existing shot - lighting, color, cleanup",
            TransformMode::Reshoot => "Improve angle, composition, and lighting",
            TransformMode::ReshootStyled => "Full magazine-style shot with props and styling",
        }
    }
}

impl Labeled for TransformMode {
    fn label(&self) -> &'static str {
        match self {
            TransformMode::Retouch => "Retouch Only",
            TransformMode::Reshoot => "Reshoot",
            TransformMode::ReshootStyled => "Reshoot + Styling",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum FoodShotType {
    #[serde(rename = "overhead")]
    #[strum(serialize = "overhead")]
    Overhead,
    #[serde(rename = "45-degree")]
    #[strum(serialize = "45-degree")]
    FortyFiveDegree,
    #[serde(rename = "straight-on")]
    #[strum(serialize = "straight-on")]
    StraightOn,
    #[serde(rename = "close-up")]
    #[strum(serialize = "close-up")]
    CloseUp,
    #[serde(rename = "styled-scene")]
    #[strum(serialize = "styled-scene")]
    StyledScene,
}

impl Labeled for FoodShotType {
    fn label(&self) -> &'static str {
        match self {
            FoodShotType::Overhead => "Overhead (Flat Lay)",
            FoodShotType::FortyFiveDegree => "45\u{b0} Angle",
            FoodShotType::StraightOn => "Straight-On",
            FoodShotType::CloseUp => "Close-Up",
            FoodShotType::StyledScene => "Styled Scene",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FoodLighting {
    Natural,
    Studio,
    Moody,
    BrightAiry,
}

impl Labeled for FoodLighting {
    fn label(&self) -> &'static str {
        match self {
            FoodLighting::Natural => "Natural Light",
            FoodLighting::Studio => "Studio",
            FoodLighting::Moody => "Moody/Dark",
            FoodLighting::BrightAiry => "Bright & Airy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FoodSurface {
    Wood,
    Marble,
    Concrete,
    Linen,
    Slate,
    White,
}

impl Labeled for FoodSurface {
    fn label(&self) -> &'static str {
        match self {
            FoodSurface::Wood => "Wood",
            FoodSurface::Marble => "Marble",
            FoodSurface::Concrete => "Concrete",
            FoodSurface::Linen => "Linen",
            FoodSurface::Slate => "Slate",
            FoodSurface::White => "White/Neutral",
        }
    }
}

/// How far the model may go in restyling the dish itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FoodBoost {
    Off,
    Plating,
    Appetising,
    Hero,
}

impl FoodBoost {
    pub fn is_on(self) -> bool {
        self != FoodBoost::Off
    }

    pub fn description(self) -> &'static str {
        match self {
            FoodBoost::Off => "Photo retouch only - no food changes",
            FoodBoost::Plating => "Tidy arrangement, clean plate rim",
            FoodBoost::Appetising => "Improve food appearance (fresher, crispier)",
            FoodBoost::Hero => "Ad-ready presentation, same dish",
        }
    }
}

impl Labeled for FoodBoost {
    fn label(&self) -> &'static str {
        match self {
            FoodBoost::Off => "Off",
            FoodBoost::Plating => "Plating Polish",
            FoodBoost::Appetising => "Appetising Upgrade",
            FoodBoost::Hero => "Hero Restyle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FoodFinish {
    /// 0 = matte, 100 = crisp.
    pub matte_crisp: i32,
    /// -20..=20
    pub saturation: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FoodStyling {
    pub add_steam: bool,
    pub add_condensation: bool,
    pub reduce_glare: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FoodOptions {
    pub transform_mode: TransformMode,
    pub shot_type: FoodShotType,
    pub lighting: FoodLighting,
    pub surface: FoodSurface,
    pub food_boost: FoodBoost,
    pub strength: i32,
    pub finish: FoodFinish,
    pub styling: FoodStyling,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prop_suggestions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dish_hint: Option<String>,
}

impl Default for FoodOptions {
    fn default() -> Self {
        Self {
            transform_mode: TransformMode::Retouch,
            shot_type: FoodShotType::FortyFiveDegree,
            lighting: FoodLighting::Natural,
            surface: FoodSurface::Wood,
            food_boost: FoodBoost::Off,
            strength: 60,
            finish: FoodFinish {
                matte_crisp: 55,
                saturation: 0,
            },
            styling: FoodStyling {
                add_steam: false,
                add_condensation: false,
                reduce_glare: true,
            },
            prop_suggestions: None,
            dish_hint: None,
        }
    }
}

impl FoodOptions {
    pub fn normalized(self) -> Self {
        Self {
            strength: clamp_slider("strength", self.strength, 0, 100),
            finish: FoodFinish {
                matte_crisp: clamp_slider("finish.matteCrisp", self.finish.matte_crisp, 0, 100),
                saturation: clamp_slider("finish.saturation", self.finish.saturation, -20, 20),
            },
            prop_suggestions: normalize_hint(self.prop_suggestions),
            dish_hint: normalize_hint(self.dish_hint),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shot_types_keep_their_hyphenated_tags() {
        let raw = serde_json::to_string(&FoodShotType::FortyFiveDegree).unwrap();
        assert_eq!(raw, r#""45-degree""#);
        assert_eq!(FoodShotType::StyledScene.to_string(), "styled-scene");
        assert_eq!(
            serde_json::from_str::<FoodLighting>(r#""bright-airy""#).unwrap(),
            FoodLighting::BrightAiry
        );
    }

    #[test]
    fn saturation_is_clamped_to_its_signed_range() {
        let mut options = FoodOptions::default();
        options.finish.saturation = -45;
        options.finish.matte_crisp = 130;
        options.dish_hint = Some("  ramen  ".to_string());
        let options = options.normalized();
        assert_eq!(options.finish.saturation, -20);
        assert_eq!(options.finish.matte_crisp, 100);
        assert_eq!(options.dish_hint.as_deref(), Some("ramen"));
    }
}
