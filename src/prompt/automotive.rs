use super::{tier, PromptSections};
use crate::options::automotive::{
    AutoAngle, AutoEnvironment, AutoLighting, AutoOptions, AutoShotType,
};

const PREAMBLE: &str = "CRITICAL RULES:\n\
- Vehicle identity MUST be preserved exactly - do not modify make, model, body style, or distinctive features\n\
- All badges, logos, license plates, and vehicle markings must remain readable and unaltered\n\
- Vehicle must be photorealistic, professional automotive photography quality\n\
- No artistic interpretations or creative liberties with the vehicle itself\n\
- Maintain accurate colors, paint finish, and materials of the original vehicle\n\
- Only modify environment, lighting, reflections, and staging as directed";

fn shot_template(shot: AutoShotType) -> &'static str {
    match shot {
        AutoShotType::Studio => {
            "Professional studio automotive photography. Controlled environment with seamless backdrop, precision \
             lighting setup. Vehicle should be impeccably presented with careful attention to reflections, highlights, \
             and paint depth."
        }
        AutoShotType::Showroom => {
            "Showroom-style automotive photography. Clean, bright environment that suggests premium retail space. \
             Vehicle displayed in pristine condition with showroom-quality presentation."
        }
        AutoShotType::Outdoor => {
            "Outdoor automotive photography in natural environment. Vehicle shown in real-world setting that \
             complements its character while maintaining professional quality and hero status."
        }
        AutoShotType::Detail => {
            "Automotive detail photography focusing on specific elements. Macro-style close-up showing craftsmanship, \
             materials, and design details. Sharp focus on featured element with appropriate depth of field."
        }
        AutoShotType::Action => {
            "Dynamic action automotive photography. Vehicle captured with sense of motion and energy. May include \
             motion blur effects, rolling shutter, or environmental blur to convey speed and performance."
        }
    }
}

fn angle_description(angle: AutoAngle) -> &'static str {
    match angle {
        AutoAngle::ThreeQuarterFront => {
            "classic 3/4 front hero angle showing front fascia and side profile, the most iconic automotive angle"
        }
        AutoAngle::SideProfile => {
            "pure side profile view emphasizing vehicle silhouette and proportions"
        }
        AutoAngle::RearThreeQuarter => "3/4 rear angle showing rear design and side character lines",
        AutoAngle::Front => "straight-on front view showcasing grille, headlights, and front fascia",
        AutoAngle::Rear => "straight-on rear view featuring taillights and rear design",
        AutoAngle::Interior => "interior cabin shot showing dashboard, seats, and interior details",
        AutoAngle::WheelDetail => {
            "close-up detail of wheel, tire, brake components, and wheel arch"
        }
        AutoAngle::Engine => "engine bay detail showcasing mechanical components and engineering",
    }
}

fn environment_description(environment: AutoEnvironment) -> &'static str {
    match environment {
        AutoEnvironment::DarkStudio => {
            "dark studio environment with black or charcoal seamless backdrop, dramatic lighting that emphasizes form \
             and reflections"
        }
        AutoEnvironment::WhiteCyclorama => {
            "pristine white cyclorama studio with seamless infinity backdrop, clean and pure presentation"
        }
        AutoEnvironment::Showroom => {
            "upscale automotive showroom with polished floors, subtle architectural elements, premium ambient lighting"
        }
        AutoEnvironment::UrbanStreet => {
            "modern urban street environment with contemporary architecture, clean pavement, city atmosphere"
        }
        AutoEnvironment::MountainRoad => {
            "scenic mountain road setting with winding asphalt, natural landscape, sense of adventure"
        }
        AutoEnvironment::Coastal => {
            "coastal road environment with ocean views, seaside atmosphere, natural beauty"
        }
        AutoEnvironment::Industrial => {
            "industrial setting with concrete, steel, urban textures, edgy contemporary feel"
        }
        AutoEnvironment::ParkingGarage => {
            "modern parking garage with concrete pillars, dramatic shadows, urban minimalist aesthetic"
        }
    }
}

fn lighting_description(lighting: AutoLighting) -> &'static str {
    match lighting {
        AutoLighting::Dramatic => {
            "dramatic high-contrast lighting with strong highlights, deep shadows, rim lighting that sculpts vehicle \
             form and creates depth in paint"
        }
        AutoLighting::SoftStudio => {
            "soft, even studio lighting with controlled reflections, gentle highlights, professional catalog-quality \
             illumination"
        }
        AutoLighting::Natural => {
            "natural daylight with soft directional quality, authentic outdoor feel, realistic environmental lighting"
        }
        AutoLighting::Neon => {
            "neon and colored accent lighting with vibrant reflections, contemporary urban aesthetic, bold color accents"
        }
        AutoLighting::Sunset => {
            "golden hour sunset lighting with warm tones, long shadows, romantic glow and rich color saturation"
        }
        AutoLighting::Overcast => {
            "soft overcast natural light with diffused even illumination, minimal shadows, muted refined tones"
        }
    }
}

fn drama(level: i32) -> &'static str {
    tier(
        level,
        &[
            (29, "Subtle, understated presentation with gentle contrast"),
            (69, "Balanced drama with moderate contrast and visual impact"),
        ],
        "Maximum drama with bold contrast, strong highlights and shadows, cinematic intensity",
    )
}

fn reflections(intensity: i32, cleanup: bool) -> String {
    let base = tier(
        intensity,
        &[
            (29, "Minimal reflections in paint and chrome, matte-leaning finish"),
            (69, "Moderate reflections showing environment in paint and glass, balanced depth"),
        ],
        "Strong mirror-like reflections in paint, chrome, and glass, showcasing deep glossy finish",
    );
    if cleanup {
        format!("{base}. Remove distracting or unflattering reflections while preserving paint depth and quality")
    } else {
        base.to_string()
    }
}

fn motion(shot: AutoShotType) -> &'static str {
    match shot {
        AutoShotType::Action => {
            "MOTION: Dynamic sense of movement with motion blur on wheels (spinning effect), possible environmental \
             blur to convey speed. Vehicle body remains sharp while motion elements create energy."
        }
        _ => {
            "MOTION: Subtle motion blur on wheels only (spinning effect) to add dynamic energy while vehicle remains \
             stationary and sharp."
        }
    }
}

const DETAIL_ENHANCEMENT: &str = "DETAIL ENHANCEMENT:
- Chrome and metallic elements: crisp highlights, mirror-like finish
- Paint surface: deep glossy appearance with clarity and depth
- Wheels: clean, sharp detail in spokes/design, tire lettering visible
- Glass: crystal clear with appropriate reflections
- Remove dust, dirt, water spots, and imperfections";

fn intensity(strength: i32) -> &'static str {
    tier(
        strength,
        &[
            (
                29,
                "INTENSITY: Subtle enhancement preserving most of original character. Light touch on environment and \
                 lighting adjustments.",
            ),
            (
                69,
                "INTENSITY: Moderate transformation balancing original and enhanced elements. Professional upgrade \
                 while respecting source.",
            ),
        ],
        "INTENSITY: Strong transformation with full professional treatment. Maximum environmental and lighting \
         enhancement for hero-level presentation.",
    )
}

pub fn build_auto_prompt(options: &AutoOptions) -> String {
    let mut sections = PromptSections::new("\n\n");

    sections.push(PREAMBLE);
    sections.push(format!("SHOT TYPE: {}", shot_template(options.shot_type)));
    sections.push(format!("ANGLE: {}", angle_description(options.angle)));
    sections.push(format!(
        "ENVIRONMENT: {}",
        environment_description(options.environment)
    ));
    sections.push(format!("LIGHTING: {}", lighting_description(options.lighting)));
    sections.push(format!("DRAMA: {}", drama(options.dramatic_level)));
    sections.push(format!(
        "REFLECTIONS: {}",
        reflections(options.reflection_intensity, options.cleanup_reflections)
    ));
    sections.push_if(options.show_movement, || motion(options.shot_type).to_string());
    sections.push_if(options.enhance_details, || DETAIL_ENHANCEMENT.to_string());
    sections.push(intensity(options.strength));

    sections.finish()
}
