use rand::seq::IndexedRandom;
use rand::Rng;

use crate::options::product::LifestyleScene;

struct SceneData {
    environment: &'static str,
    props: &'static [&'static str],
    moods: &'static [&'static str],
}

static SCENES: [(LifestyleScene, SceneData); 8] = [
    (
        LifestyleScene::KitchenCounter,
        SceneData {
            environment: "on a clean kitchen counter with natural daylight streaming through a window",
            props: &[
                "fresh herbs in a small pot",
                "wooden cutting board",
                "ceramic bowl",
                "linen kitchen towel",
                "olive oil bottle",
            ],
            moods: &["bright morning light", "warm afternoon glow", "soft natural daylight"],
        },
    ),
    (
        LifestyleScene::OfficeDesk,
        SceneData {
            environment: "on a modern minimalist office desk with ambient workspace lighting",
            props: &[
                "leather notebook",
                "elegant pen",
                "coffee cup",
                "small succulent plant",
                "wireless earbuds case",
            ],
            moods: &[
                "focused daylight from window",
                "warm afternoon ambiance",
                "soft diffused natural light",
            ],
        },
    ),
    (
        LifestyleScene::OutdoorCafe,
        SceneData {
            environment: "on a charming cafe table with dappled sunlight filtering through foliage",
            props: &[
                "espresso cup and saucer",
                "croissant on plate",
                "folded newspaper",
                "designer sunglasses",
                "small flower vase",
            ],
            moods: &["golden hour warmth", "bright morning sunshine", "soft afternoon glow"],
        },
    ),
    (
        LifestyleScene::CozyHome,
        SceneData {
            environment: "on a soft knit blanket or throw in a cozy, inviting living space",
            props: &[
                "scented candle",
                "open book",
                "warm mug of tea",
                "reading glasses",
                "soft wool texture",
            ],
            moods: &["cozy evening lamplight", "soft morning light", "warm golden hour"],
        },
    ),
    (
        LifestyleScene::BathroomShelf,
        SceneData {
            environment: "on a pristine bathroom shelf or marble vanity with soft, spa-like lighting",
            props: &[
                "small potted orchid",
                "folded white towel",
                "decorative candle",
                "ceramic soap dish",
                "eucalyptus sprig",
            ],
            moods: &["spa-like calm brightness", "clean natural light", "soft diffused glow"],
        },
    ),
    (
        LifestyleScene::BedsideTable,
        SceneData {
            environment: "on a stylish bedside table with soft, intimate ambient lighting",
            props: &[
                "hardcover book",
                "small table lamp glow",
                "delicate plant",
                "jewelry dish",
                "alarm clock",
            ],
            moods: &["cozy evening warmth", "soft morning awakening", "intimate warm glow"],
        },
    ),
    (
        LifestyleScene::GardenPatio,
        SceneData {
            environment: "on an outdoor garden table surrounded by lush greenery and natural elements",
            props: &[
                "potted herbs",
                "garden flowers in vase",
                "linen napkin",
                "terracotta pot",
                "gardening gloves",
            ],
            moods: &["golden hour sunshine", "bright natural daylight", "dappled afternoon light"],
        },
    ),
    (
        LifestyleScene::LivingRoom,
        SceneData {
            environment: "on a stylish coffee table in an elegant, well-designed living room setting",
            props: &[
                "art book",
                "decorative sculpture",
                "small potted plant",
                "design magazine",
                "ceramic coaster",
            ],
            moods: &["afternoon window light", "cozy evening ambiance", "bright airy daylight"],
        },
    ),
];

const PROPS_PER_SETUP: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifestyleSetup {
    pub scene: LifestyleScene,
    pub environment: &'static str,
    pub mood: &'static str,
    pub props: Vec<&'static str>,
}

/// Resolves a scene selector into a concrete setup. `Random` or no selector
/// draws the scene too; the mood and props are always drawn.
pub fn pick_lifestyle_setup<R: Rng + ?Sized>(
    scene: Option<LifestyleScene>,
    rng: &mut R,
) -> LifestyleSetup {
    let (scene, data) = match scene {
        Some(scene) if scene != LifestyleScene::Random => SCENES
            .iter()
            .find(|(candidate, _)| *candidate == scene)
            .expect("every concrete lifestyle scene has setup data"),
        _ => &SCENES[rng.random_range(0..SCENES.len())],
    };

    let mood = data.moods[rng.random_range(0..data.moods.len())];
    let props = data
        .props
        .choose_multiple(rng, PROPS_PER_SETUP)
        .copied()
        .collect();

    LifestyleSetup {
        scene: *scene,
        environment: data.environment,
        mood,
        props,
    }
}

pub fn lifestyle_shot<R: Rng + ?Sized>(scene: Option<LifestyleScene>, rng: &mut R) -> String {
    let setup = pick_lifestyle_setup(scene, rng);
    format!(
        "Lifestyle product photography {}.\n\
         Atmosphere: {}.\n\
         Scene includes subtle complementary props: {}.\n\
         Product remains the absolute hero - props enhance but never distract.\n\
         Natural, editorial quality that feels authentic and aspirational.",
        setup.environment,
        setup.mood,
        setup.props.join(", ")
    )
}
