use super::{tier, PromptSections};
use crate::options::{Domain, GenericOptions};

const COMMON_RULES: &str = "CRITICAL RULES:\n\
- Preserve the original identity, layout, and key objects of the photograph\n\
- Photorealistic result only, no illustration or painterly effects\n\
- Do not add logos, text, watermarks, or branding";

fn identity_rule(domain: Domain) -> &'static str {
    match domain {
        Domain::People => {
            "- Faces, expressions, body shape, and skin texture must remain exactly as photographed"
        }
        _ => "- The subject and scene must remain immediately recognisable",
    }
}

fn intensity(strength: i32) -> &'static str {
    tier(
        strength,
        &[(20, "subtle"), (40, "light"), (60, "moderate"), (80, "strong")],
        "intensive",
    )
}

fn enhancement_directives(strength: i32) -> String {
    let mut directives = vec![
        "Improve lighting balance and reduce harsh shadows",
        "Enhance overall sharpness and clarity",
    ];
    if strength >= 30 {
        directives.push("Optimize color vibrancy and saturation");
        directives.push("Clean up minor artifacts and noise");
    }
    if strength >= 50 {
        directives.push("Balance highlights and shadows for better dynamic range");
        directives.push("Enhance fine details and textures");
    }
    if strength >= 70 {
        directives.push("Apply professional-grade color correction");
        directives.push("Maximize detail recovery in darker areas");
    }
    format!("Enhancements to apply: {}.", directives.join(". "))
}

/// Shared builder for the people and general domains.
pub fn build_generic_prompt(domain: Domain, options: &GenericOptions) -> String {
    let profile = domain.profile();
    let mut sections = PromptSections::new("\n\n");

    sections.push(format!("{COMMON_RULES}\n{}", identity_rule(domain)));
    sections.push(format!(
        "Enhance this image with {} improvements while strictly preserving the original identity, layout, and key objects.",
        intensity(options.strength)
    ));
    sections.push(format!("Focus on: {}.", profile.focus_areas.join(", ")));
    sections.push(enhancement_directives(options.strength));
    sections.push(format!("Style guidance: {}.", profile.style_hints.join(". ")));
    sections.push_if(options.strict_preservation, || {
        "STRICT MODE: Do NOT add or remove any objects, people, or elements. \
         Do NOT alter the composition or framing. \
         Preserve all existing text, labels, and signage exactly as they appear."
            .to_string()
    });
    sections.push(
        "IMPORTANT: Do NOT add any new logos, text, watermarks, or branding. \
         Do NOT add artificial elements that were not in the original image. \
         Maintain the authentic character of the photograph.",
    );

    sections.finish()
}
