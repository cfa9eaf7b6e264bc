use super::{tier, PromptSections};
use crate::options::food::{
    FoodBoost, FoodLighting, FoodOptions, FoodShotType, FoodSurface, TransformMode,
};

const PREAMBLE: &str = "CRITICAL RULES:\n\
- Keep the same dish: no different food items and no new ingredients\n\
- Do NOT add text, logos, watermarks, menus, or branding\n\
- Photorealistic food photography only, never CGI or illustration\n\
- Packaging or label text stays exactly as photographed";

const STYLIST_BRIEF: &str = "You are a professional food stylist creating advertisement-quality food photography.

TASK: Generate a NEW, improved version of this food photo where the food looks significantly more appetising and delicious. This is NOT a simple edit - you must REGENERATE the food to look better.

WHAT TO GENERATE:
- The SAME type of dish (same food items visible)
- But with MUCH better appearance - like a professional food ad
- Fresh, vibrant, appetising, mouth-watering

DO NOT:
- Invent completely different food items
- Add text, logos, or branding
- Make it look like CGI or illustration

OUTPUT:
- Return one final image only. No text.";

const RETOUCHER_RULES: &str = "You are a professional food photographer + editorial retoucher.

HARD RULES (must follow):
- Keep the dish recognizable and truthful to the original photo.
- Do NOT invent new ingredients or change the dish into something else.
- Do NOT add text, logos, watermarks, menus, or branding.
- Photorealistic only (no CGI/illustration look).
- If packaging/labels/text exist, keep them EXACTLY unchanged (do not rewrite or guess text).
- Keep portion size and quantity roughly consistent (no huge size changes).

OUTPUT:
- Return one final edited image only. No text response.";

const COMPOSITION_RULES: &str = "COMPOSITION:
- Make the subject look intentional and appetising.
- Remove awkward empty space via crop/reframe if allowed by transform mode.
- Keep the dish as the hero; background must not compete.";

const CLOSING_REMINDER: &str = "CRITICAL: You must GENERATE a new image where the food looks NOTICEABLY BETTER than the input. \
The bun must look fresher and more golden. The cheese must look more melted and gooey. Any fries must look crispier. \
Do NOT just apply filters - actually regenerate improved food. The difference should be obvious when comparing before and after.";

fn transform_mode_block(mode: TransformMode) -> &'static str {
    match mode {
        TransformMode::Retouch => {
            "TRANSFORM MODE: Retouch Only (Hard Constraint)
- Keep the same camera angle and framing as much as possible.
- Do NOT add props. Do NOT change the scene.
- Only lighting/color/cleanup/sharpness improvements."
        }
        TransformMode::Reshoot => {
            "TRANSFORM MODE: Reshoot (Composition Allowed)
- You may improve framing and composition (crop/reframe) for a more professional shot.
- You may reduce phone wide-angle distortion; simulate a natural lens look.
- Do NOT add extra props unless explicitly requested."
        }
        TransformMode::ReshootStyled => {
            "TRANSFORM MODE: Styled (Reshoot + Minimal Props)
- You may improve framing/composition and add a SMALL number of tasteful props that support the dish.
- Props must be minimal, realistic, and not distract from the food."
        }
    }
}

fn shot_type_block(shot: FoodShotType) -> &'static str {
    match shot {
        FoodShotType::Overhead => {
            "SHOT TYPE: Top-Down Flat Lay
- Use a true top-down angle (90\u{b0}) if reshoot is allowed.
- Composition: clean, intentional spacing; centered or rule-of-thirds.
- Keep background simple; avoid clutter."
        }
        FoodShotType::FortyFiveDegree => {
            "SHOT TYPE: 45\u{b0} Hero
- Use a flattering 30-60\u{b0} angle (table-level but slightly elevated) if reshoot is allowed.
- Emphasize layers, height, and the most appetising side of the dish.
- Keep the plate edges clean and framing intentional."
        }
        FoodShotType::StraightOn => {
            "SHOT TYPE: Straight-On
- Eye-level shot, perfect for burgers, sandwiches, and layered dishes.
- Emphasizes height and cross-section details."
        }
        FoodShotType::CloseUp => {
            "SHOT TYPE: Macro Detail
- Create a tight, appetising close-up that emphasizes texture (crisp edges, sauce sheen, garnish detail).
- Subtle depth-of-field look is allowed (photoreal).
- Avoid making the food look fake or overly glossy."
        }
        FoodShotType::StyledScene => {
            "SHOT TYPE: Table Scene
- A premium restaurant table vibe: dish remains the hero, background is supportive and uncluttered.
- Keep props minimal and tasteful (only if styling is allowed)."
        }
    }
}

fn lighting_block(lighting: FoodLighting) -> &'static str {
    match lighting {
        FoodLighting::Natural => {
            "LIGHTING STYLE: Bright Daylight Menu Look
- Soft, bright, natural daylight feel.
- Clean whites, controlled highlights, gentle shadows.
- No harsh phone flash look."
        }
        FoodLighting::Studio => {
            "LIGHTING STYLE: Studio
- Professional studio lighting - clean, even illumination with controlled shadows.
- Commercial product quality ideal for catalogs and advertising."
        }
        FoodLighting::Moody => {
            "LIGHTING STYLE: Moody Editorial
- Directional soft light, deeper shadows, premium contrast.
- Controlled highlights, rich midtones, cinematic but still appetising.
- Keep the food readable (don't crush shadows)."
        }
        FoodLighting::BrightAiry => {
            "LIGHTING STYLE: Bright & Airy
- Light, high-key daylight with soft airy shadows and clean whites.
- Fresh, open feel without washing out the food colors."
        }
    }
}

fn surface_block(surface: FoodSurface) -> &'static str {
    match surface {
        FoodSurface::Wood => {
            "SURFACE/BACKGROUND: Use a premium natural wood tabletop surface (clean, subtle grain)."
        }
        FoodSurface::Marble => {
            "SURFACE/BACKGROUND: Use a light marble surface (premium, minimal pattern, not distracting)."
        }
        FoodSurface::Concrete => {
            "SURFACE/BACKGROUND: Use a smooth grey concrete surface for a modern, understated feel."
        }
        FoodSurface::Linen => {
            "SURFACE/BACKGROUND: Use a neutral linen texture (subtle, premium, not busy)."
        }
        FoodSurface::Slate => "SURFACE/BACKGROUND: Use dark slate or stone surface for contrast.",
        FoodSurface::White => {
            "SURFACE/BACKGROUND: A clean solid white background or gentle studio gradient (premium catalog/menu style)."
        }
    }
}

fn boost_block(boost: FoodBoost) -> &'static str {
    match boost {
        FoodBoost::Off => {
            "FOOD BOOST: OFF
- Do not change the food itself. Retouch only (light/color/cleanup)."
        }
        FoodBoost::Plating => {
            "FOOD BOOST: Plating Polish
- You may tidy plating: clean plate rim, remove smudges/crumbs, and slightly reposition existing elements for a more intentional presentation.
- Do not add new ingredients."
        }
        FoodBoost::Appetising => {
            "FOOD BOOST: Appetising Upgrade - MAKE THE FOOD LOOK BETTER

YOUR MAIN TASK: Significantly improve how the food looks. Make it look like a professional food advertisement.

SPECIFICALLY DO THESE THINGS:
- BUNS/BREAD: Make them look fresh, evenly browned, with an appetising golden sheen. Fix any dull or flat areas.
- CHEESE: Make melted cheese look smooth, gooey, and perfectly melted. Improve the drape and texture.
- MEAT/PATTY: Make it look juicy and well-cooked, not dry or grey.
- GREENS/SALAD: Make lettuce and greens look crisp, fresh, and vibrant - not limp or wilted.
- FRIES: Make them look golden, crispy, and perfectly cooked - not pale or soggy.
- SAUCES: Make them look glossy and appetising.
- OVERALL: Clean up any mess, smudges, or unappealing areas. Make the presentation look intentional.

KEEP THE SAME DISH - don't add new ingredients that aren't there, but DO make what's there look much better."
        }
        FoodBoost::Hero => {
            "FOOD BOOST: Hero Restyle - MAXIMUM FOOD STYLING

YOUR MAIN TASK: Transform this into an advertisement-quality hero shot. Make it look PERFECT.

GO ALL OUT:
- Make every element look absolutely perfect and mouth-watering.
- Perfect the shapes, textures, and presentation of all food elements.
- The bun should look like it came from a professional food stylist.
- The cheese should have that perfect melt you see in commercials.
- Fries should look golden and crispy like in fast food ads.
- Everything should look fresh, vibrant, and irresistible.
- Clean up everything - this should look like a hero shot for an ad campaign.

STILL KEEP IT THE SAME DISH - same type of food, same core items. But make it look stunning."
        }
    }
}

fn effects_block(options: &FoodOptions) -> String {
    let styling = &options.styling;
    let mut effects = PromptSections::new("\n\n");
    effects.push_if(styling.add_steam, || {
        "STEAM:
- If the dish appears hot (e.g., grilled meat, soup, coffee), add subtle realistic steam.
- Keep it minimal and believable. If the dish is not hot, do not add steam."
            .to_string()
    });
    effects.push_if(styling.add_condensation, || {
        "CONDENSATION:
- If there is a cold drink present, add subtle realistic condensation droplets.
- If no drink is present, ignore this instruction."
            .to_string()
    });
    effects.push_if(styling.reduce_glare, || {
        "GLARE CONTROL:
- Reduce harsh glare on sauces, plates, cutlery, or glossy ingredients while keeping realistic specular highlights."
            .to_string()
    });
    effects.finish()
}

fn strength_tier(strength: i32) -> &'static str {
    tier(
        strength,
        &[
            (15, "Minimal (technical corrections only)"),
            (35, "Subtle (natural menu photo)"),
            (65, "Standard (marketing-ready)"),
            (85, "High polish (editorial menu hero)"),
        ],
        "Maximum polish (ad-ready, still photoreal)",
    )
}

fn matte_tier(matte_crisp: i32) -> &'static str {
    tier(
        matte_crisp,
        &[
            (20, "crisp, clean, modern finish (not overly sharp)"),
            (55, "balanced finish with gentle highlight roll-off"),
            (80, "premium matte/filmic finish with lifted blacks and soft contrast"),
        ],
        "strong matte/filmic finish with very smooth highlights (still realistic)",
    )
}

fn saturation_tier(saturation: i32) -> &'static str {
    tier(
        saturation,
        &[
            (-10, "muted editorial saturation (restrained, premium)"),
            (-1, "slightly muted saturation (editorial)"),
            (0, "natural, true-to-life saturation"),
            (10, "slightly richer saturation (appetising but realistic)"),
        ],
        "more vibrant saturation (still believable, avoid neon/oversaturation)",
    )
}

fn finish_block(options: &FoodOptions) -> String {
    format!(
        "FINISH / GRADE:\n\
         - Strength: {strength}/100 ({})\n\
         - Finish: {}\n\
         - Saturation: {}\n\
         - Editorial quality: clean white balance, controlled highlights, gentle shadows.\n\
         - Avoid HDR look, avoid crunchy sharpening, preserve natural food texture (no plastic smoothing).",
        strength_tier(options.strength),
        matte_tier(options.finish.matte_crisp),
        saturation_tier(options.finish.saturation),
        strength = options.strength,
    )
}

/// Food prompt. With a boost on the brief switches to generation and the
/// boost block moves up front; with it off the retoucher rules apply.
pub fn build_food_prompt(options: &FoodOptions) -> String {
    let boost_on = options.food_boost.is_on();
    let mut sections = PromptSections::new("\n\n");

    sections.push(PREAMBLE);
    sections.push(if boost_on { STYLIST_BRIEF } else { RETOUCHER_RULES });
    sections.push_if(boost_on, || boost_block(options.food_boost).to_string());
    sections.push_opt(options.dish_hint.as_deref().map(|hint| {
        format!("DISH HINT (use only as context, do not invent new items): {hint}")
    }));
    sections.push(transform_mode_block(options.transform_mode));
    sections.push(shot_type_block(options.shot_type));
    sections.push(COMPOSITION_RULES);
    sections.push(surface_block(options.surface));
    sections.push(lighting_block(options.lighting));
    sections.push_if(!boost_on, || boost_block(options.food_boost).to_string());
    sections.push(effects_block(options));
    sections.push_opt(
        options
            .prop_suggestions
            .as_deref()
            .filter(|_| options.transform_mode == TransformMode::ReshootStyled)
            .map(|props| format!("PROP SUGGESTIONS (max 3, minimal): {props}")),
    );
    sections.push(finish_block(options));
    sections.push_if(boost_on, || CLOSING_REMINDER.to_string());

    sections.finish()
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    fn position(prompt: &str, needle: &str) -> usize {
        prompt
            .find(needle)
            .unwrap_or_else(|| panic!("{needle:?} not found"))
    }

    #[test]
    fn boost_block_moves_up_front_when_on() {
        let mut options = FoodOptions::default();
        let off = build_food_prompt(&options);
        assert!(off.contains("editorial retoucher"));
        assert!(position(&off, "LIGHTING STYLE") < position(&off, "FOOD BOOST: OFF"));
        assert!(!off.contains("CRITICAL: You must GENERATE"));

        options.food_boost = FoodBoost::Hero;
        let on = build_food_prompt(&options);
        assert!(on.contains("professional food stylist"));
        assert!(position(&on, "FOOD BOOST: Hero Restyle") < position(&on, "TRANSFORM MODE"));
        assert!(on.ends_with("comparing before and after."));
    }

    #[test]
    fn props_only_in_styled_mode() {
        let mut options = FoodOptions {
            prop_suggestions: Some("lemon wedge".to_string()),
            ..FoodOptions::default()
        };
        assert!(!build_food_prompt(&options).contains("PROP SUGGESTIONS"));
        options.transform_mode = TransformMode::ReshootStyled;
        assert!(build_food_prompt(&options).contains("PROP SUGGESTIONS (max 3, minimal): lemon wedge"));
    }

    #[test]
    fn dish_hint_follows_the_brief() {
        let options = FoodOptions {
            dish_hint: Some("pad thai".to_string()),
            ..FoodOptions::default()
        };
        let prompt = build_food_prompt(&options);
        assert!(position(&prompt, "HARD RULES") < position(&prompt, "DISH HINT"));
        assert!(position(&prompt, "DISH HINT") < position(&prompt, "TRANSFORM MODE"));
    }

    #[test]
    fn saturation_tiers_split_at_zero() {
        assert_eq!(saturation_tier(-20), "muted editorial saturation (restrained, premium)");
        assert_eq!(saturation_tier(-10), "muted editorial saturation (restrained, premium)");
        assert_eq!(saturation_tier(-9), "slightly muted saturation (editorial)");
        assert_eq!(saturation_tier(-1), "slightly muted saturation (editorial)");
        assert_eq!(saturation_tier(0), "natural, true-to-life saturation");
        assert_eq!(saturation_tier(1), "slightly richer saturation (appetising but realistic)");
        assert!(saturation_tier(20).starts_with("more vibrant"));
    }

    #[test]
    fn strength_tiers_reach_both_ends() {
        assert_eq!(strength_tier(0), "Minimal (technical corrections only)");
        assert_eq!(strength_tier(15), "Minimal (technical corrections only)");
        assert_eq!(strength_tier(16), "Subtle (natural menu photo)");
        assert_eq!(strength_tier(100), "Maximum polish (ad-ready, still photoreal)");
    }

    #[test]
    fn every_surface_and_lighting_has_distinct_text() {
        let surfaces: std::collections::HashSet<&str> = FoodSurface::iter().map(surface_block).collect();
        assert_eq!(surfaces.len(), FoodSurface::iter().count());
        let lighting: std::collections::HashSet<&str> = FoodLighting::iter().map(lighting_block).collect();
        assert_eq!(lighting.len(), FoodLighting::iter().count());
    }

    #[test]
    fn every_mode_and_shot_type_renders_distinctly() {
        let mut seen = std::collections::HashSet::new();
        for mode in TransformMode::iter() {
            let text = transform_mode_block(mode);
            assert!(!text.trim().is_empty(), "{mode} renders empty text");
            assert!(seen.insert(text), "{mode} repeats another mode");
            let options = FoodOptions {
                transform_mode: mode,
                ..FoodOptions::default()
            };
            assert!(build_food_prompt(&options).contains(text));
        }

        let mut seen = std::collections::HashSet::new();
        for shot in FoodShotType::iter() {
            let text = shot_type_block(shot);
            assert!(text.starts_with("SHOT TYPE: "), "{shot} lacks its header");
            assert!(seen.insert(text), "{shot} repeats another shot type");
            let options = FoodOptions {
                shot_type: shot,
                ..FoodOptions::default()
            };
            assert!(build_food_prompt(&options).contains(text));
        }
    }

    #[test]
    fn every_boost_level_renders_distinctly_and_flips_the_brief() {
        let mut prompts = std::collections::HashSet::new();
        for boost in FoodBoost::iter() {
            let text = boost_block(boost);
            assert!(text.starts_with("FOOD BOOST: "), "{boost} lacks its header");
            let options = FoodOptions {
                food_boost: boost,
                ..FoodOptions::default()
            };
            let prompt = build_food_prompt(&options);
            assert!(prompt.contains(text));
            assert_eq!(prompt.contains(STYLIST_BRIEF), boost.is_on(), "{boost} brief");
            assert_eq!(prompt.contains(RETOUCHER_RULES), !boost.is_on(), "{boost} rules");
            assert_eq!(prompt.contains(CLOSING_REMINDER), boost.is_on(), "{boost} reminder");
            assert!(prompts.insert(prompt), "{boost} prompt matches another level");
        }
    }

    #[test]
    fn effects_follow_the_toggles() {
        let mut options = FoodOptions::default();
        options.styling.add_steam = true;
        options.styling.reduce_glare = false;
        let prompt = build_food_prompt(&options);
        assert!(prompt.contains("STEAM:"));
        assert!(!prompt.contains("CONDENSATION:"));
        assert!(!prompt.contains("GLARE CONTROL:"));
    }
}
