use super::{tier, PromptSections};
use crate::options::interior::{InteriorMode, InteriorOptions};

const PREAMBLE: &str = "CRITICAL RULES: Keep the room architecture, windows, doors, and fixed fittings exactly as they are. \
Keep the existing furniture recognisable. No text, logos, or watermarks.";

fn mode_block(mode: InteriorMode) -> &'static str {
    match mode {
        InteriorMode::Retouch => {
            "Edit this interior photo for a design magazine. Keep the original camera position and framing. \
             Fix the geometry: straighten the horizon, make all vertical lines perfectly vertical."
        }
        InteriorMode::Reshoot | InteriorMode::ReshootStyling => {
            "Recreate this interior scene as a professional design magazine photo. \
             IMPORTANT: Reshoot from a perfectly straight-on, centered camera position facing the main feature. \
             Extend the frame to show more of the room - a wider, more balanced composition."
        }
    }
}

fn intensity_line(strength: i32) -> &'static str {
    tier(
        strength,
        &[
            (30, "Keep the edit restrained and close to the original photograph."),
            (70, "Apply a confident, professional edit."),
        ],
        "Push the edit to a fully finished, magazine-cover result.",
    )
}

fn styling_block(prop_suggestions: Option<&str>) -> String {
    match prop_suggestions {
        Some(props) => format!("Add these items: {props}."),
        None => "Add tasteful styling: decorative objects, books, plants, artwork, rugs - whatever elevates the scene."
            .to_string(),
    }
}

pub fn build_interior_prompt(options: &InteriorOptions) -> String {
    let mut sections = PromptSections::new(" ");

    sections.push(PREAMBLE);
    sections.push(mode_block(options.transform_mode));
    sections.push_if(options.creative_crop, || {
        "Reframe for a balanced, magazine-worthy composition.".to_string()
    });
    sections.push("Apply clean, bright editorial lighting with neutral white balance.");
    sections.push_if(options.hdr_windows, || {
        "Show detail through the windows - recover the exterior view naturally.".to_string()
    });
    sections.push(intensity_line(options.strength));
    sections.push("Premium matte film look with lifted blacks and smooth highlights.");
    sections.push_if(
        options.transform_mode == InteriorMode::ReshootStyling,
        || styling_block(options.prop_suggestions.as_deref()),
    );
    sections.push("Photorealistic quality. No text or watermarks.");

    sections.finish()
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    fn options(mode: InteriorMode) -> InteriorOptions {
        InteriorOptions {
            transform_mode: mode,
            ..InteriorOptions::default()
        }
    }

    #[test]
    fn retouch_corrects_geometry_without_styling() {
        let prompt = build_interior_prompt(&InteriorOptions {
            transform_mode: InteriorMode::Retouch,
            strength: 50,
            creative_crop: false,
            prop_suggestions: Some("a vase of tulips".to_string()),
            ..InteriorOptions::default()
        });
        assert!(prompt.contains("Fix the geometry: straighten the horizon"));
        assert!(!prompt.to_lowercase().contains("styling"));
        assert!(!prompt.contains("Add these items"));
        assert!(!prompt.contains("tulips"));
    }

    #[test]
    fn reshoot_modes_move_the_camera() {
        for mode in [InteriorMode::Reshoot, InteriorMode::ReshootStyling] {
            assert!(build_interior_prompt(&options(mode)).contains("Reshoot from a perfectly straight-on"));
        }
    }

    #[test]
    fn only_reshoot_styling_adds_props() {
        let mut styled = options(InteriorMode::ReshootStyling);
        assert!(build_interior_prompt(&styled).contains("Add tasteful styling"));
        styled.prop_suggestions = Some("linen throw, olive tree".to_string());
        assert!(build_interior_prompt(&styled).contains("Add these items: linen throw, olive tree."));
        assert!(!build_interior_prompt(&options(InteriorMode::Reshoot)).contains("Add tasteful styling"));
    }

    #[test]
    fn each_mode_produces_a_distinct_prompt() {
        let prompts: Vec<String> = InteriorMode::iter()
            .map(|mode| build_interior_prompt(&options(mode)))
            .collect();
        assert_ne!(prompts[0], prompts[1]);
        assert_ne!(prompts[1], prompts[2]);
    }

    #[test]
    fn toggles_add_their_sentences() {
        let prompt = build_interior_prompt(&InteriorOptions {
            hdr_windows: true,
            creative_crop: true,
            ..InteriorOptions::default()
        });
        assert!(prompt.contains("recover the exterior view"));
        assert!(prompt.contains("Reframe for a balanced"));
    }
}
