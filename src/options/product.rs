use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{clamp_slider, normalize_hint, Labeled, OptionsError};

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid hex color regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProductShotType {
    Packshot,
    Lifestyle,
    Flatlay,
}

impl Labeled for ProductShotType {
    fn label(&self) -> &'static str {
        match self {
            ProductShotType::Packshot => "Packshot",
            ProductShotType::Lifestyle => "Lifestyle",
            ProductShotType::Flatlay => "Flat Lay",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProductScale {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl ProductScale {
    pub fn description(self) -> &'static str {
        match self {
            ProductScale::Small => "Jewelry, cosmetics, accessories - fits in one hand",
            ProductScale::Medium => "Bottles, boxes, shoes, small appliances - tabletop size",
            ProductScale::Large => "Furniture, large appliances - floor standing",
            ProductScale::ExtraLarge => "Vehicles, machinery - needs a large space",
        }
    }

    pub fn is_floor_standing(self) -> bool {
        matches!(self, ProductScale::Large | ProductScale::ExtraLarge)
    }

    /// Surfaces a product of this scale can sit on; large products only float.
    pub fn available_surfaces(self) -> &'static [SurfaceType] {
        if self.is_floor_standing() {
            return &[SurfaceType::None];
        }
        &[
            SurfaceType::None,
            SurfaceType::Acrylic,
            SurfaceType::Paper,
            SurfaceType::Concrete,
            SurfaceType::Marble,
            SurfaceType::WoodLight,
            SurfaceType::WoodDark,
            SurfaceType::Cloth,
        ]
    }
}

impl Labeled for ProductScale {
    fn label(&self) -> &'static str {
        match self {
            ProductScale::Small => "Small",
            ProductScale::Medium => "Medium",
            ProductScale::Large => "Large",
            ProductScale::ExtraLarge => "Extra Large",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LifestyleScene {
    Random,
    KitchenCounter,
    OfficeDesk,
    OutdoorCafe,
    CozyHome,
    BathroomShelf,
    BedsideTable,
    GardenPatio,
    LivingRoom,
}

impl Labeled for LifestyleScene {
    fn label(&self) -> &'static str {
        match self {
            LifestyleScene::Random => "Random (surprise me)",
            LifestyleScene::KitchenCounter => "Kitchen Counter",
            LifestyleScene::OfficeDesk => "Office Desk",
            LifestyleScene::OutdoorCafe => "Outdoor Cafe",
            LifestyleScene::CozyHome => "Cozy Home",
            LifestyleScene::BathroomShelf => "Bathroom Shelf",
            LifestyleScene::BedsideTable => "Bedside Table",
            LifestyleScene::GardenPatio => "Garden Patio",
            LifestyleScene::LivingRoom => "Living Room",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BackgroundStyle {
    White,
    LightGrey,
    Gradient,
    Lifestyle,
}

impl Labeled for BackgroundStyle {
    fn label(&self) -> &'static str {
        match self {
            BackgroundStyle::White => "Pure White",
            BackgroundStyle::LightGrey => "Light Grey",
            BackgroundStyle::Gradient => "Gradient Studio",
            BackgroundStyle::Lifestyle => "Lifestyle Scene",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SurfaceType {
    None,
    Acrylic,
    Paper,
    Concrete,
    Marble,
    WoodLight,
    WoodDark,
    Cloth,
}

impl Labeled for SurfaceType {
    fn label(&self) -> &'static str {
        match self {
            SurfaceType::None => "None (floating)",
            SurfaceType::Acrylic => "White Acrylic",
            SurfaceType::Paper => "Matte Paper",
            SurfaceType::Concrete => "Concrete",
            SurfaceType::Marble => "Marble",
            SurfaceType::WoodLight => "Light Wood",
            SurfaceType::WoodDark => "Dark Wood",
            SurfaceType::Cloth => "Cloth/Fabric",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ClothType {
    Linen,
    Cotton,
    Velvet,
}

impl Labeled for ClothType {
    fn label(&self) -> &'static str {
        match self {
            ClothType::Linen => "Linen",
            ClothType::Cotton => "Cotton",
            ClothType::Velvet => "Velvet",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CameraAngle {
    Front,
    ThreeQuarter,
    Side,
    TopDown,
    Macro,
}

impl Labeled for CameraAngle {
    fn label(&self) -> &'static str {
        match self {
            CameraAngle::Front => "Front-on",
            CameraAngle::ThreeQuarter => "3/4 Hero",
            CameraAngle::Side => "Side Profile",
            CameraAngle::TopDown => "Top-down",
            CameraAngle::Macro => "Macro Detail",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Composition {
    Centered,
    RuleOfThirds,
    HeroNegativeSpace,
}

impl Labeled for Composition {
    fn label(&self) -> &'static str {
        match self {
            Composition::Centered => "Centered",
            Composition::RuleOfThirds => "Rule of Thirds",
            Composition::HeroNegativeSpace => "Hero + Negative Space",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LightingStyle {
    SoftboxFront,
    WindowLight,
    RimLight,
    Dramatic,
    Backlit,
}

impl Labeled for LightingStyle {
    fn label(&self) -> &'static str {
        match self {
            LightingStyle::SoftboxFront => "Softbox (safe)",
            LightingStyle::WindowLight => "Window Light",
            LightingStyle::RimLight => "Rim Light",
            LightingStyle::Dramatic => "Dramatic Studio",
            LightingStyle::Backlit => "Backlit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ShadowType {
    None,
    SoftContact,
    Crisp,
    Drop,
}

impl Labeled for ShadowType {
    fn label(&self) -> &'static str {
        match self {
            ShadowType::None => "None",
            ShadowType::SoftContact => "Soft Contact",
            ShadowType::Crisp => "Crisp Shadow",
            ShadowType::Drop => "Drop Shadow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReflectionType {
    None,
    Subtle,
    Strong,
}

impl Labeled for ReflectionType {
    fn label(&self) -> &'static str {
        match self {
            ReflectionType::None => "None",
            ReflectionType::Subtle => "Subtle",
            ReflectionType::Strong => "Strong",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProductPreset {
    Amazon,
    BrandHero,
    Social,
    Catalog,
    Custom,
}

impl ProductPreset {
    pub fn description(self) -> &'static str {
        match self {
            ProductPreset::Amazon => {
                "Pure white background, front-on, clean shadows - marketplace ready"
            }
            ProductPreset::BrandHero => {
                "Gradient background, rim lighting, premium feel for brand sites"
            }
            ProductPreset::Social => {
                "Lifestyle scene with props, warm and inviting for social media"
            }
            ProductPreset::Catalog => "Light grey background, drop shadow - professional catalog style",
            ProductPreset::Custom => "Configure all settings manually",
        }
    }
}

impl Labeled for ProductPreset {
    fn label(&self) -> &'static str {
        match self {
            ProductPreset::Amazon => "Amazon Ready",
            ProductPreset::BrandHero => "Brand Hero",
            ProductPreset::Social => "Social Post",
            ProductPreset::Catalog => "Catalog",
            ProductPreset::Custom => "Custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Background {
    pub style: BackgroundStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub crisp_edges: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Surface {
    #[serde(rename = "type")]
    pub kind: SurfaceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloth_type: Option<ClothType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrinkle_amount: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Camera {
    pub angle: CameraAngle,
    /// 0 = wide angle, 100 = compressed telephoto.
    pub focal_length: i32,
    pub composition: Composition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Lighting {
    pub style: LightingStyle,
    pub glow_enabled: bool,
    pub glow_intensity: i32,
    pub intensity: i32,
    pub matte_level: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LabelProtection {
    pub enabled: bool,
    pub strictness: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Cleanup {
    pub remove_dust: bool,
    pub remove_scratches: bool,
    pub reduce_glare: bool,
    pub straighten: bool,
    pub color_accuracy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductOptions {
    pub quick_preset: ProductPreset,
    pub shot_type: ProductShotType,
    pub scale: ProductScale,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifestyle_scene: Option<LifestyleScene>,
    pub background: Background,
    pub surface: Surface,
    pub camera: Camera,
    pub lighting: Lighting,
    pub shadow: ShadowType,
    pub reflection: ReflectionType,
    pub label_protection: LabelProtection,
    pub cleanup: Cleanup,
    pub allow_props: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prop_suggestions: Option<String>,
}

impl Default for ProductOptions {
    fn default() -> Self {
        Self {
            quick_preset: ProductPreset::Custom,
            shot_type: ProductShotType::Packshot,
            scale: ProductScale::Medium,
            lifestyle_scene: None,
            background: Background {
                style: BackgroundStyle::White,
                color: None,
                crisp_edges: true,
            },
            surface: Surface {
                kind: SurfaceType::None,
                cloth_type: None,
                wrinkle_amount: None,
            },
            camera: Camera {
                angle: CameraAngle::Front,
                focal_length: 50,
                composition: Composition::Centered,
            },
            lighting: Lighting {
                style: LightingStyle::SoftboxFront,
                glow_enabled: false,
                glow_intensity: 30,
                intensity: 70,
                matte_level: 40,
            },
            shadow: ShadowType::SoftContact,
            reflection: ReflectionType::None,
            label_protection: LabelProtection {
                enabled: true,
                strictness: 80,
            },
            cleanup: Cleanup {
                remove_dust: true,
                remove_scratches: true,
                reduce_glare: true,
                straighten: true,
                color_accuracy: true,
            },
            allow_props: false,
            prop_suggestions: None,
        }
    }
}

impl ProductOptions {
    pub fn validate(&self) -> Result<(), OptionsError> {
        if let Some(color) = self.background.color.as_deref() {
            let trimmed = color.trim();
            if !trimmed.is_empty() && !HEX_COLOR_RE.is_match(trimmed) {
                return Err(OptionsError::InvalidValue {
                    field: "background.color",
                    value: color.to_string(),
                    expected: "a #RRGGBB hex color",
                });
            }
        }
        if !self.scale.available_surfaces().contains(&self.surface.kind) {
            return Err(OptionsError::InvalidValue {
                field: "surface.type",
                value: self.surface.kind.to_string(),
                expected: "none for large and extra_large products",
            });
        }
        Ok(())
    }

    pub fn normalized(self) -> Self {
        let color = self
            .background
            .color
            .map(|color| color.trim().to_string())
            .filter(|color| !color.is_empty());

        Self {
            background: Background {
                color,
                ..self.background
            },
            surface: Surface {
                wrinkle_amount: self
                    .surface
                    .wrinkle_amount
                    .map(|value| clamp_slider("surface.wrinkleAmount", value, 0, 100)),
                ..self.surface
            },
            camera: Camera {
                focal_length: clamp_slider("camera.focalLength", self.camera.focal_length, 0, 100),
                ..self.camera
            },
            lighting: Lighting {
                glow_intensity: clamp_slider(
                    "lighting.glowIntensity",
                    self.lighting.glow_intensity,
                    0,
                    100,
                ),
                intensity: clamp_slider("lighting.intensity", self.lighting.intensity, 0, 100),
                matte_level: clamp_slider("lighting.matteLevel", self.lighting.matte_level, 0, 100),
                ..self.lighting
            },
            label_protection: LabelProtection {
                strictness: clamp_slider(
                    "labelProtection.strictness",
                    self.label_protection.strictness,
                    0,
                    100,
                ),
                ..self.label_protection
            },
            prop_suggestions: normalize_hint(self.prop_suggestions),
            ..self
        }
    }
}
