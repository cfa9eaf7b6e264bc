use rand::Rng;

use super::lifestyle::lifestyle_shot;
use super::{tier, PromptSections};
use crate::options::product::{
    BackgroundStyle, CameraAngle, ClothType, Composition, LightingStyle, ProductOptions,
    ProductScale, ProductShotType, ReflectionType, ShadowType, SurfaceType,
};

const PREAMBLE: &str = "CRITICAL RULES:\n\
- Product identity MUST be preserved exactly - do not modify shape, design, branding, or text\n\
- All labels, logos, and text on product MUST remain readable and unaltered\n\
- Product must be photorealistic, professional e-commerce quality\n\
- No artistic interpretations or creative liberties with the product itself\n\
- Maintain accurate colors and materials of the original product\n\
- Only modify background, lighting, and staging as directed";

fn scale_block(scale: ProductScale) -> &'static str {
    match scale {
        ProductScale::Small => {
            "Macro product photography optimized for small objects. Close-up perspective emphasizing fine details, \
             textures, and craftsmanship. Controlled studio environment with precise lighting for maximum detail capture."
        }
        ProductScale::Medium => {
            "Standard product photography with balanced perspective. Product comfortably fits in frame with \
             appropriate environmental context."
        }
        ProductScale::Large => {
            "Large-scale product photography with increased camera distance and environmental context. Product \
             positioned on floor or in room setting with appropriate sense of scale. Professional lighting setup \
             using larger softboxes and room illumination. Wide perspective showing product in realistic spatial context."
        }
        ProductScale::ExtraLarge => {
            "EXTRA LARGE SCALE - vehicles are better served by the automotive domain. Expansive environmental \
             photography with significant camera distance. Product requires large space context. Professional studio \
             or outdoor environment with appropriate scale reference."
        }
    }
}

fn shot_template(shot: ProductShotType) -> &'static str {
    match shot {
        ProductShotType::Packshot => {
            "Studio packshot for e-commerce. Clean, professional product photography with controlled studio lighting. \
             Product should be sharp, well-defined, and ready for online retail."
        }
        ProductShotType::Lifestyle => {
            "Lifestyle product photography showing the product in a real-world environment. Natural setting that \
             suggests product use context while keeping product as the hero element."
        }
        ProductShotType::Flatlay => {
            "Top-down flat lay arrangement. Product artfully arranged from directly above, perfect for cosmetics, \
             accessories, and lifestyle products. Clean, organized composition."
        }
    }
}

fn background_style(style: BackgroundStyle) -> &'static str {
    match style {
        BackgroundStyle::White => "pure white background (#FFFFFF), seamless studio backdrop",
        BackgroundStyle::LightGrey => "light grey background (#F5F5F5), subtle neutral backdrop",
        BackgroundStyle::Gradient => {
            "subtle gradient studio backdrop transitioning from white to light grey"
        }
        BackgroundStyle::Lifestyle => "natural lifestyle environment appropriate to product context",
    }
}

fn surface_description(surface: SurfaceType) -> &'static str {
    match surface {
        SurfaceType::None => "product floating cleanly with no visible surface",
        SurfaceType::Acrylic => "white acrylic surface with subtle reflective properties",
        SurfaceType::Paper => "matte paper surface with no reflections",
        SurfaceType::Concrete => "smooth concrete surface with natural texture",
        SurfaceType::Marble => "white marble surface with natural veining",
        SurfaceType::WoodLight => "light natural wood surface with visible grain",
        SurfaceType::WoodDark => "dark wood surface with rich grain patterns",
        SurfaceType::Cloth => "fabric surface",
    }
}

fn cloth_description(cloth: ClothType) -> &'static str {
    match cloth {
        ClothType::Linen => "natural linen fabric with characteristic texture",
        ClothType::Cotton => "soft cotton fabric with gentle weave",
        ClothType::Velvet => "luxurious velvet fabric with rich texture",
    }
}

fn camera_angle(angle: CameraAngle) -> &'static str {
    match angle {
        CameraAngle::Front => "straight-on front view, product facing camera directly",
        CameraAngle::ThreeQuarter => "3/4 angle hero shot showing front and side",
        CameraAngle::Side => "side profile view emphasizing product silhouette",
        CameraAngle::TopDown => "directly overhead top-down view",
        CameraAngle::Macro => "macro close-up showing product details and texture",
    }
}

fn composition(composition: Composition) -> &'static str {
    match composition {
        Composition::Centered => "product perfectly centered in frame",
        Composition::RuleOfThirds => {
            "product positioned using rule of thirds for dynamic composition"
        }
        Composition::HeroNegativeSpace => {
            "product as hero with generous negative space around it"
        }
    }
}

fn lighting_style(style: LightingStyle) -> &'static str {
    match style {
        LightingStyle::SoftboxFront => "soft, even front lighting from softbox, minimal shadows",
        LightingStyle::WindowLight => "natural window light with soft, directional quality",
        LightingStyle::RimLight => "rim lighting emphasizing product edges and form",
        LightingStyle::Dramatic => "dramatic studio lighting with strong highlights and shadows",
        LightingStyle::Backlit => "backlit setup with glow around product edges",
    }
}

fn shadow_description(shadow: ShadowType) -> Option<&'static str> {
    match shadow {
        ShadowType::None => None,
        ShadowType::SoftContact => Some("soft contact shadow directly beneath product"),
        ShadowType::Crisp => Some("crisp, defined shadow with clear edges"),
        ShadowType::Drop => Some("drop shadow extending away from product"),
    }
}

fn reflection_description(reflection: ReflectionType) -> Option<&'static str> {
    match reflection {
        ReflectionType::None => None,
        ReflectionType::Subtle => Some("subtle reflection on surface beneath product"),
        ReflectionType::Strong => Some("strong mirror-like reflection"),
    }
}

fn background_block(options: &ProductOptions) -> String {
    let background = &options.background;
    let mut desc = background_style(background.style).to_string();
    if let Some(color) = background.color.as_deref() {
        desc.push_str(&format!(", custom background color {color}"));
    }
    if background.crisp_edges {
        desc.push_str(". Product edges must be crisp and perfectly cut out");
    }
    desc
}

fn surface_block(options: &ProductOptions) -> String {
    let surface = &options.surface;
    if options.scale.is_floor_standing() && surface.kind != SurfaceType::None {
        return "product positioned on floor or in appropriate large-scale room environment".to_string();
    }

    match (surface.kind, surface.cloth_type) {
        (SurfaceType::Cloth, Some(cloth)) => {
            let wrinkles = surface.wrinkle_amount.map(|amount| {
                tier(
                    amount,
                    &[
                        (19, " pressed smooth with minimal wrinkles"),
                        (49, " with natural subtle wrinkles"),
                        (79, " with visible wrinkles and natural folds"),
                    ],
                    " with pronounced wrinkles and organic folds",
                )
            });
            format!("{}{}", cloth_description(cloth), wrinkles.unwrap_or(""))
        }
        (kind, _) => surface_description(kind).to_string(),
    }
}

fn camera_block(options: &ProductOptions) -> String {
    let camera = &options.camera;
    let lens = tier(
        camera.focal_length,
        &[
            (34, "Wide angle lens perspective with slight environmental context"),
            (64, "Standard focal length with natural perspective"),
        ],
        "Compressed telephoto perspective with shallow depth, professional product photography look",
    );
    format!(
        "{}. {}. {lens}",
        camera_angle(camera.angle),
        composition(camera.composition)
    )
}

fn lighting_block(options: &ProductOptions) -> String {
    let lighting = &options.lighting;
    let intensity = tier(
        lighting.intensity,
        &[(29, "low key moody lighting"), (69, "balanced studio lighting")],
        "bright, high-key lighting",
    );
    let finish = tier(
        lighting.matte_level,
        &[
            (40, "glossy finish with strong specular highlights"),
            (70, "semi-matte finish with controlled highlights"),
        ],
        "very matte finish with minimal specular highlights",
    );

    let mut desc = format!("{}, {intensity}, {finish}", lighting_style(lighting.style));
    if lighting.glow_enabled {
        let glow = tier(
            lighting.glow_intensity,
            &[
                (29, "Subtle glow effect around product"),
                (69, "Moderate glow effect highlighting product"),
            ],
            "Strong ethereal glow effect emphasizing product",
        );
        desc.push_str(&format!(". {glow}"));
    }
    desc
}

fn label_protection_block(options: &ProductOptions) -> Option<String> {
    let protection = &options.label_protection;
    if !protection.enabled {
        return None;
    }
    let rule = tier(
        protection.strictness,
        &[
            (29, "Preserve main brand name and logo. Minor label details may vary slightly."),
            (69, "All text, logos, and branding must remain clearly readable and accurate."),
        ],
        "STRICT - Every letter, number, logo, and design element on product labels must be EXACTLY preserved. \
         Zero tolerance for text modifications.",
    );
    Some(format!("LABEL PROTECTION: {rule}"))
}

fn cleanup_block(options: &ProductOptions) -> Option<String> {
    let cleanup = &options.cleanup;
    let instructions: Vec<&str> = [
        (cleanup.remove_dust, "remove any dust or particles"),
        (cleanup.remove_scratches, "remove scratches and imperfections"),
        (cleanup.reduce_glare, "reduce excessive glare and hot spots"),
        (cleanup.straighten, "ensure product is perfectly straight and aligned"),
        (cleanup.color_accuracy, "maintain accurate product colors"),
    ]
    .into_iter()
    .filter_map(|(enabled, text)| enabled.then_some(text))
    .collect();

    if instructions.is_empty() {
        return None;
    }
    Some(format!("CLEANUP: {}.", instructions.join(", ")))
}

fn props_block(options: &ProductOptions) -> Option<String> {
    if options.shot_type == ProductShotType::Packshot || !options.allow_props {
        return None;
    }
    let request = match (options.prop_suggestions.as_deref(), options.shot_type) {
        (Some(props), _) => format!("Include the following props to enhance the scene: {props}."),
        (None, ProductShotType::Flatlay) => {
            "Include complementary items arranged artfully in flat lay composition.".to_string()
        }
        (None, _) => {
            "Include contextual props that suggest product usage and lifestyle setting.".to_string()
        }
    };
    Some(format!(
        "PROPS: {request} Props should support the product as hero, not distract from it."
    ))
}

/// Product prompt. Only a lifestyle shot consumes randomness.
pub fn build_product_prompt<R: Rng + ?Sized>(options: &ProductOptions, rng: &mut R) -> String {
    let mut sections = PromptSections::new("\n\n");

    sections.push(PREAMBLE);
    sections.push(format!("SCALE: {}", scale_block(options.scale)));
    let shot = match options.shot_type {
        ProductShotType::Lifestyle => lifestyle_shot(options.lifestyle_scene, rng),
        other => shot_template(other).to_string(),
    };
    sections.push(format!("SHOT TYPE: {shot}"));
    sections.push(format!("BACKGROUND: {}", background_block(options)));
    sections.push(format!("SURFACE: {}", surface_block(options)));
    sections.push(format!("CAMERA: {}", camera_block(options)));
    sections.push(format!("LIGHTING: {}", lighting_block(options)));
    sections.push_opt(shadow_description(options.shadow).map(|shadow| format!("SHADOW: {shadow}")));
    sections.push_opt(
        reflection_description(options.reflection).map(|reflection| format!("REFLECTION: {reflection}")),
    );
    sections.push_opt(label_protection_block(options));
    sections.push_opt(cleanup_block(options));
    sections.push_opt(props_block(options));

    sections.finish()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use strum::IntoEnumIterator;

    use super::*;
    use crate::options::product::LifestyleScene;

    fn build(options: &ProductOptions) -> String {
        build_product_prompt(options, &mut StdRng::seed_from_u64(11))
    }

    #[test]
    fn strict_label_protection_has_zero_tolerance() {
        let mut options = ProductOptions::default();
        options.label_protection.enabled = true;
        options.label_protection.strictness = 95;
        let prompt = build(&options);
        assert!(prompt.contains("Zero tolerance for text modifications"));
        assert!(!prompt.contains("Minor label details may vary"));
        assert!(!prompt.contains("must remain clearly readable and accurate"));
    }

    #[test]
    fn label_protection_tier_edges() {
        let mut options = ProductOptions::default();
        options.label_protection.strictness = 29;
        assert!(build(&options).contains("Minor label details may vary"));
        options.label_protection.strictness = 30;
        assert!(build(&options).contains("clearly readable and accurate"));
        options.label_protection.strictness = 70;
        assert!(build(&options).contains("Zero tolerance"));
        options.label_protection.enabled = false;
        assert!(!build(&options).contains("LABEL PROTECTION"));
    }

    #[test]
    fn sections_follow_the_fixed_order() {
        let prompt = build(&ProductOptions::default());
        let order = [
            "CRITICAL RULES:",
            "SCALE:",
            "SHOT TYPE:",
            "BACKGROUND:",
            "SURFACE:",
            "CAMERA:",
            "LIGHTING:",
            "SHADOW:",
            "LABEL PROTECTION:",
            "CLEANUP:",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|header| prompt.find(header).unwrap_or_else(|| panic!("{header} missing")))
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(!prompt.contains("REFLECTION:"));
        assert!(!prompt.contains("PROPS:"));
    }

    #[test]
    fn large_products_are_placed_on_the_floor() {
        let mut options = ProductOptions::default();
        options.scale = ProductScale::Large;
        options.surface.kind = SurfaceType::Marble;
        assert!(build(&options).contains("SURFACE: product positioned on floor"));
    }

    #[test]
    fn cloth_surface_uses_wrinkle_tiers() {
        let mut options = ProductOptions::default();
        options.surface.kind = SurfaceType::Cloth;
        options.surface.cloth_type = Some(ClothType::Velvet);
        options.surface.wrinkle_amount = Some(19);
        assert!(build(&options).contains("luxurious velvet fabric with rich texture pressed smooth"));
        options.surface.wrinkle_amount = Some(80);
        assert!(build(&options).contains("with pronounced wrinkles"));
        options.surface.cloth_type = None;
        assert!(build(&options).contains("SURFACE: fabric surface"));
    }

    #[test]
    fn glow_only_when_enabled() {
        let mut options = ProductOptions::default();
        options.lighting.glow_intensity = 90;
        assert!(!build(&options).contains("glow effect"));
        options.lighting.glow_enabled = true;
        assert!(build(&options).contains("Strong ethereal glow effect"));
    }

    #[test]
    fn every_lighting_style_has_distinct_text() {
        let prompts: HashSet<String> = LightingStyle::iter()
            .map(|style| {
                let mut options = ProductOptions::default();
                options.lighting.style = style;
                build(&options)
            })
            .collect();
        assert_eq!(prompts.len(), LightingStyle::iter().count());
    }

    /// Builds one prompt per variant over otherwise default options and checks
    /// each variant's fragment is non-empty, unique and present in its prompt.
    /// `None` fragments mean the section is omitted for that variant.
    fn check_variants<T>(
        apply: impl Fn(&mut ProductOptions, T),
        fragment: impl Fn(T) -> Option<&'static str>,
    ) -> usize
    where
        T: IntoEnumIterator + Copy + std::fmt::Display,
    {
        let mut fragments = HashSet::new();
        let mut prompts = HashSet::new();
        let mut omitted = 0;
        for variant in T::iter() {
            let mut options = ProductOptions::default();
            apply(&mut options, variant);
            let prompt = build(&options);
            match fragment(variant) {
                Some(text) => {
                    assert!(!text.trim().is_empty(), "{variant} renders empty text");
                    assert!(fragments.insert(text), "{variant} repeats another variant");
                    assert!(prompt.contains(text), "{variant} text missing from prompt");
                }
                None => omitted += 1,
            }
            assert!(prompts.insert(prompt), "{variant} prompt matches another variant");
        }
        omitted
    }

    #[test]
    fn every_scale_and_shot_type_renders_distinctly() {
        check_variants(|options, scale| options.scale = scale, |scale| Some(scale_block(scale)));
        check_variants(
            |options, shot| options.shot_type = shot,
            |shot| (shot != ProductShotType::Lifestyle).then(|| shot_template(shot)),
        );
        let mut options = ProductOptions::default();
        options.shot_type = ProductShotType::Lifestyle;
        assert!(build(&options).contains("SHOT TYPE: Lifestyle product photography on "));
    }

    #[test]
    fn every_background_and_surface_renders_distinctly() {
        check_variants(
            |options, style| options.background.style = style,
            |style| Some(background_style(style)),
        );
        check_variants(
            |options, kind| options.surface.kind = kind,
            |kind| Some(surface_description(kind)),
        );
        check_variants(
            |options, cloth| {
                options.surface.kind = SurfaceType::Cloth;
                options.surface.cloth_type = Some(cloth);
            },
            |cloth| Some(cloth_description(cloth)),
        );
    }

    #[test]
    fn every_camera_choice_renders_distinctly() {
        check_variants(
            |options, angle| options.camera.angle = angle,
            |angle| Some(camera_angle(angle)),
        );
        check_variants(
            |options, layout| options.camera.composition = layout,
            |layout| Some(composition(layout)),
        );
    }

    #[test]
    fn only_none_shadow_or_reflection_is_omitted() {
        let omitted = check_variants(|options, shadow| options.shadow = shadow, shadow_description);
        assert_eq!(omitted, 1);
        assert!(shadow_description(ShadowType::None).is_none());

        let omitted = check_variants(
            |options, reflection| options.reflection = reflection,
            reflection_description,
        );
        assert_eq!(omitted, 1);
        assert!(reflection_description(ReflectionType::None).is_none());
    }

    #[test]
    fn random_lifestyle_prompt_is_always_well_formed() {
        let mut options = ProductOptions::default();
        options.shot_type = ProductShotType::Lifestyle;
        options.lifestyle_scene = Some(LifestyleScene::Random);
        options.allow_props = true;
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..2 {
            let prompt = build_product_prompt(&options, &mut rng);
            assert!(prompt.starts_with("CRITICAL RULES:"));
            assert!(prompt.contains("SHOT TYPE: Lifestyle product photography on "));
            assert!(prompt.contains("Scene includes subtle complementary props: "));
            assert!(prompt.contains("PROPS: Include contextual props"));
        }
    }

    #[test]
    fn packshot_never_gets_props() {
        let mut options = ProductOptions::default();
        options.allow_props = true;
        options.prop_suggestions = Some("lemons".to_string());
        assert!(!build(&options).contains("lemons"));
    }
}
