use super::product::{
    Background, BackgroundStyle, Camera, CameraAngle, Cleanup, ClothType, Composition,
    LabelProtection, Lighting, LightingStyle, LifestyleScene, ProductOptions, ProductPreset,
    ProductScale, ProductShotType, ReflectionType, ShadowType, Surface, SurfaceType,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackgroundPatch {
    pub style: Option<BackgroundStyle>,
    pub color: Option<String>,
    pub crisp_edges: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfacePatch {
    pub kind: Option<SurfaceType>,
    pub cloth_type: Option<ClothType>,
    pub wrinkle_amount: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraPatch {
    pub angle: Option<CameraAngle>,
    pub focal_length: Option<i32>,
    pub composition: Option<Composition>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LightingPatch {
    pub style: Option<LightingStyle>,
    pub glow_enabled: Option<bool>,
    pub glow_intensity: Option<i32>,
    pub intensity: Option<i32>,
    pub matte_level: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelProtectionPatch {
    pub enabled: Option<bool>,
    pub strictness: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupPatch {
    pub remove_dust: Option<bool>,
    pub remove_scratches: Option<bool>,
    pub reduce_glare: Option<bool>,
    pub straighten: Option<bool>,
    pub color_accuracy: Option<bool>,
}

/// Partial product options. `None` leaves the target field untouched, and
/// nested groups merge field by field rather than replacing the group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductOptionsPatch {
    pub quick_preset: Option<ProductPreset>,
    pub shot_type: Option<ProductShotType>,
    pub scale: Option<ProductScale>,
    pub lifestyle_scene: Option<LifestyleScene>,
    pub background: BackgroundPatch,
    pub surface: SurfacePatch,
    pub camera: CameraPatch,
    pub lighting: LightingPatch,
    pub shadow: Option<ShadowType>,
    pub reflection: Option<ReflectionType>,
    pub label_protection: LabelProtectionPatch,
    pub cleanup: CleanupPatch,
    pub allow_props: Option<bool>,
    pub prop_suggestions: Option<String>,
}

impl ProductOptions {
    pub fn with_patch(self, patch: ProductOptionsPatch) -> Self {
        let ProductOptionsPatch {
            quick_preset,
            shot_type,
            scale,
            lifestyle_scene,
            background,
            surface,
            camera,
            lighting,
            shadow,
            reflection,
            label_protection,
            cleanup,
            allow_props,
            prop_suggestions,
        } = patch;

        Self {
            quick_preset: quick_preset.unwrap_or(self.quick_preset),
            shot_type: shot_type.unwrap_or(self.shot_type),
            scale: scale.unwrap_or(self.scale),
            lifestyle_scene: lifestyle_scene.or(self.lifestyle_scene),
            background: Background {
                style: background.style.unwrap_or(self.background.style),
                color: background.color.or(self.background.color),
                crisp_edges: background.crisp_edges.unwrap_or(self.background.crisp_edges),
            },
            surface: Surface {
                kind: surface.kind.unwrap_or(self.surface.kind),
                cloth_type: surface.cloth_type.or(self.surface.cloth_type),
                wrinkle_amount: surface.wrinkle_amount.or(self.surface.wrinkle_amount),
            },
            camera: Camera {
                angle: camera.angle.unwrap_or(self.camera.angle),
                focal_length: camera.focal_length.unwrap_or(self.camera.focal_length),
                composition: camera.composition.unwrap_or(self.camera.composition),
            },
            lighting: Lighting {
                style: lighting.style.unwrap_or(self.lighting.style),
                glow_enabled: lighting.glow_enabled.unwrap_or(self.lighting.glow_enabled),
                glow_intensity: lighting
                    .glow_intensity
                    .unwrap_or(self.lighting.glow_intensity),
                intensity: lighting.intensity.unwrap_or(self.lighting.intensity),
                matte_level: lighting.matte_level.unwrap_or(self.lighting.matte_level),
            },
            shadow: shadow.unwrap_or(self.shadow),
            reflection: reflection.unwrap_or(self.reflection),
            label_protection: LabelProtection {
                enabled: label_protection
                    .enabled
                    .unwrap_or(self.label_protection.enabled),
                strictness: label_protection
                    .strictness
                    .unwrap_or(self.label_protection.strictness),
            },
            cleanup: Cleanup {
                remove_dust: cleanup.remove_dust.unwrap_or(self.cleanup.remove_dust),
                remove_scratches: cleanup
                    .remove_scratches
                    .unwrap_or(self.cleanup.remove_scratches),
                reduce_glare: cleanup.reduce_glare.unwrap_or(self.cleanup.reduce_glare),
                straighten: cleanup.straighten.unwrap_or(self.cleanup.straighten),
                color_accuracy: cleanup.color_accuracy.unwrap_or(self.cleanup.color_accuracy),
            },
            allow_props: allow_props.unwrap_or(self.allow_props),
            prop_suggestions: prop_suggestions.or(self.prop_suggestions),
        }
    }
}

impl ProductPreset {
    pub fn patch(self) -> ProductOptionsPatch {
        match self {
            ProductPreset::Amazon => studio_patch(
                self,
                StudioSetup {
                    background: BackgroundStyle::White,
                    surface: SurfaceType::None,
                    camera: (CameraAngle::Front, 50, Composition::Centered),
                    lighting: (LightingStyle::SoftboxFront, 80, 30),
                    shadow: ShadowType::SoftContact,
                    reflection: ReflectionType::None,
                    strictness: 90,
                    reduce_glare: true,
                },
            ),
            ProductPreset::BrandHero => studio_patch(
                self,
                StudioSetup {
                    background: BackgroundStyle::Gradient,
                    surface: SurfaceType::Acrylic,
                    camera: (CameraAngle::ThreeQuarter, 70, Composition::RuleOfThirds),
                    lighting: (LightingStyle::RimLight, 75, 40),
                    shadow: ShadowType::Crisp,
                    reflection: ReflectionType::Subtle,
                    strictness: 85,
                    reduce_glare: false,
                },
            ),
            ProductPreset::Catalog => studio_patch(
                self,
                StudioSetup {
                    background: BackgroundStyle::LightGrey,
                    surface: SurfaceType::Paper,
                    camera: (CameraAngle::Front, 55, Composition::Centered),
                    lighting: (LightingStyle::SoftboxFront, 75, 35),
                    shadow: ShadowType::Drop,
                    reflection: ReflectionType::None,
                    strictness: 85,
                    reduce_glare: true,
                },
            ),
            ProductPreset::Social => ProductOptionsPatch {
                quick_preset: Some(ProductPreset::Social),
                shot_type: Some(ProductShotType::Lifestyle),
                background: BackgroundPatch {
                    style: Some(BackgroundStyle::Lifestyle),
                    crisp_edges: Some(false),
                    ..Default::default()
                },
                surface: SurfacePatch {
                    kind: Some(SurfaceType::WoodLight),
                    ..Default::default()
                },
                camera: CameraPatch {
                    angle: Some(CameraAngle::ThreeQuarter),
                    focal_length: Some(60),
                    composition: Some(Composition::RuleOfThirds),
                },
                lighting: LightingPatch {
                    style: Some(LightingStyle::WindowLight),
                    glow_enabled: Some(false),
                    glow_intensity: Some(0),
                    intensity: Some(65),
                    matte_level: Some(50),
                },
                shadow: Some(ShadowType::SoftContact),
                reflection: Some(ReflectionType::None),
                label_protection: LabelProtectionPatch {
                    enabled: Some(true),
                    strictness: Some(75),
                },
                cleanup: CleanupPatch {
                    remove_dust: Some(true),
                    remove_scratches: Some(false),
                    reduce_glare: Some(true),
                    straighten: Some(false),
                    color_accuracy: Some(true),
                },
                allow_props: Some(true),
                prop_suggestions: Some("greenery, coffee cup, natural elements".to_string()),
                ..Default::default()
            },
            ProductPreset::Custom => ProductOptionsPatch {
                quick_preset: Some(ProductPreset::Custom),
                ..Default::default()
            },
        }
    }
}

struct StudioSetup {
    background: BackgroundStyle,
    surface: SurfaceType,
    camera: (CameraAngle, i32, Composition),
    /// style, intensity, matte level
    lighting: (LightingStyle, i32, i32),
    shadow: ShadowType,
    reflection: ReflectionType,
    strictness: i32,
    reduce_glare: bool,
}

// Packshot presets differ only in these knobs; glow is always off and props
// are never allowed.
fn studio_patch(preset: ProductPreset, setup: StudioSetup) -> ProductOptionsPatch {
    let (angle, focal_length, composition) = setup.camera;
    let (style, intensity, matte_level) = setup.lighting;
    ProductOptionsPatch {
        quick_preset: Some(preset),
        shot_type: Some(ProductShotType::Packshot),
        background: BackgroundPatch {
            style: Some(setup.background),
            crisp_edges: Some(true),
            ..Default::default()
        },
        surface: SurfacePatch {
            kind: Some(setup.surface),
            ..Default::default()
        },
        camera: CameraPatch {
            angle: Some(angle),
            focal_length: Some(focal_length),
            composition: Some(composition),
        },
        lighting: LightingPatch {
            style: Some(style),
            glow_enabled: Some(false),
            glow_intensity: Some(0),
            intensity: Some(intensity),
            matte_level: Some(matte_level),
        },
        shadow: Some(setup.shadow),
        reflection: Some(setup.reflection),
        label_protection: LabelProtectionPatch {
            enabled: Some(true),
            strictness: Some(setup.strictness),
        },
        cleanup: CleanupPatch {
            remove_dust: Some(true),
            remove_scratches: Some(true),
            reduce_glare: Some(setup.reduce_glare),
            straighten: Some(true),
            color_accuracy: Some(true),
        },
        allow_props: Some(false),
        ..Default::default()
    }
}

/// Expands a quick preset into a complete options record.
pub fn apply_product_preset(preset: ProductPreset) -> ProductOptions {
    ProductOptions::default().with_patch(preset.patch())
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn custom_preset_is_the_default_record() {
        assert_eq!(apply_product_preset(ProductPreset::Custom), ProductOptions::default());
    }

    #[test]
    fn reapplying_a_preset_reproduces_the_record() {
        for preset in ProductPreset::iter() {
            let expanded = apply_product_preset(preset);
            assert_eq!(expanded.quick_preset, preset);
            assert_eq!(expanded.clone().with_patch(preset.patch()), expanded);
        }
    }

    #[test]
    fn nested_patch_keeps_unspecified_fields() {
        let patch = ProductOptionsPatch {
            camera: CameraPatch {
                angle: Some(CameraAngle::TopDown),
                ..Default::default()
            },
            ..Default::default()
        };
        let merged = ProductOptions::default().with_patch(patch);
        assert_eq!(merged.camera.angle, CameraAngle::TopDown);
        assert_eq!(merged.camera.focal_length, 50);
        assert_eq!(merged.camera.composition, Composition::Centered);
    }

    #[test]
    fn amazon_preset_matches_marketplace_setup() {
        let options = apply_product_preset(ProductPreset::Amazon);
        assert_eq!(options.background.style, BackgroundStyle::White);
        assert_eq!(options.lighting.intensity, 80);
        assert_eq!(options.label_protection.strictness, 90);
        assert!(!options.allow_props);
    }

    #[test]
    fn social_preset_allows_props_with_suggestions() {
        let options = apply_product_preset(ProductPreset::Social);
        assert_eq!(options.shot_type, ProductShotType::Lifestyle);
        assert!(options.allow_props);
        assert!(options.prop_suggestions.is_some());
        assert!(!options.cleanup.straighten);
    }
}
