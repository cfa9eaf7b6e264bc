pub mod automotive;
pub mod food;
pub mod generic;
pub mod interior;
pub mod presets;
pub mod product;

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::warn;

pub use automotive::AutoOptions;
pub use food::FoodOptions;
pub use generic::GenericOptions;
pub use interior::InteriorOptions;
pub use product::ProductOptions;

/// Free-text hints longer than this are cut before they reach a prompt.
pub const MAX_HINT_CHARS: usize = 500;

/// Human-readable label table for a closed set of values.
pub trait Labeled {
    fn label(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("Unknown domain: {0}")]
    UnknownDomain(String),
    #[error("Missing domain")]
    MissingDomain,
    #[error("Unknown option for {field}: {value}")]
    UnknownOption { field: &'static str, value: String },
    #[error("Missing options for domain {0}")]
    Missing(Domain),
    #[error("Invalid {domain} options: {source}")]
    Malformed {
        domain: Domain,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid value for {field}: {value} (expected {expected})")]
    InvalidValue {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Domain {
    Interior,
    Product,
    Food,
    Automotive,
    People,
    General,
}

impl Domain {
    pub fn parse(value: &str) -> Result<Self, OptionsError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(OptionsError::MissingDomain);
        }
        Domain::from_str(trimmed).map_err(|_| OptionsError::UnknownDomain(trimmed.to_string()))
    }

    pub fn profile(self) -> &'static DomainProfile {
        match self {
            Domain::Interior => &INTERIOR_PROFILE,
            Domain::Product => &PRODUCT_PROFILE,
            Domain::Food => &FOOD_PROFILE,
            Domain::Automotive => &AUTOMOTIVE_PROFILE,
            Domain::People => &PEOPLE_PROFILE,
            Domain::General => &GENERAL_PROFILE,
        }
    }
}

impl Labeled for Domain {
    fn label(&self) -> &'static str {
        self.profile().label
    }
}

#[derive(Debug)]
pub struct DomainProfile {
    pub label: &'static str,
    pub description: &'static str,
    pub focus_areas: &'static [&'static str],
    pub style_hints: &'static [&'static str],
}

static INTERIOR_PROFILE: DomainProfile = DomainProfile {
    label: "Interior",
    description: "Magazine-quality matte film finish for architectural & room photos",
    focus_areas: &[
        "filmic matte tonal curve",
        "neutral WB with controlled warm practicals",
        "texture preservation (velvet, wood grain)",
        "vertical/perspective correction",
    ],
    style_hints: &[
        "lifted blacks, gentle highlight roll-off",
        "muted editorial saturation",
        "no HDR or crispy sharpening",
    ],
};

static PRODUCT_PROFILE: DomainProfile = DomainProfile {
    label: "Product",
    description: "Ideal for e-commerce and catalog photography",
    focus_areas: &[
        "product edge sharpness",
        "color accuracy",
        "background cleanup",
        "surface reflections and highlights",
    ],
    style_hints: &[
        "ensure true-to-life colors",
        "enhance material textures",
        "clean up minor imperfections",
    ],
};

static FOOD_PROFILE: DomainProfile = DomainProfile {
    label: "Food",
    description: "Menu, delivery app and editorial food photography",
    focus_areas: &[
        "appetising color",
        "texture and freshness",
        "clean plating",
        "controlled glare",
    ],
    style_hints: &[
        "keep the dish truthful",
        "editorial white balance",
        "no plastic smoothing",
    ],
};

static AUTOMOTIVE_PROFILE: DomainProfile = DomainProfile {
    label: "Automotive",
    description: "Dealer listings and showcase vehicle photography",
    focus_areas: &[
        "paint depth and reflections",
        "chrome and glass clarity",
        "environment staging",
        "vehicle proportions",
    ],
    style_hints: &[
        "preserve make, model and badges",
        "clean controlled reflections",
        "hero-level presentation",
    ],
};

static PEOPLE_PROFILE: DomainProfile = DomainProfile {
    label: "People",
    description: "Portrait and lifestyle photography enhancement",
    focus_areas: &[
        "skin tone accuracy",
        "facial feature preservation",
        "eye clarity",
        "hair detail",
    ],
    style_hints: &[
        "maintain natural skin texture",
        "enhance eye catchlights",
        "preserve facial expressions exactly",
    ],
};

static GENERAL_PROFILE: DomainProfile = DomainProfile {
    label: "General",
    description: "Balanced enhancement for any image type",
    focus_areas: &[
        "overall sharpness",
        "color vibrancy",
        "contrast balance",
        "noise reduction",
    ],
    style_hints: &[
        "balanced enhancement across all elements",
        "natural-looking improvements",
        "preserve original composition",
    ],
};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "match")]
    #[strum(serialize = "match")]
    Match,
    #[serde(rename = "1:1")]
    #[strum(serialize = "1:1")]
    Square,
    #[serde(rename = "4:5")]
    #[strum(serialize = "4:5")]
    Portrait,
    #[serde(rename = "16:9")]
    #[strum(serialize = "16:9")]
    Widescreen,
    #[serde(rename = "3:2")]
    #[strum(serialize = "3:2")]
    Classic,
    #[serde(rename = "9:16")]
    #[strum(serialize = "9:16")]
    Vertical,
}

impl AspectRatio {
    /// Ratio forwarded to the image service; `Match` keeps the source framing.
    pub fn requested_ratio(self) -> Option<String> {
        match self {
            AspectRatio::Match => None,
            other => Some(other.to_string()),
        }
    }
}

impl Labeled for AspectRatio {
    fn label(&self) -> &'static str {
        match self {
            AspectRatio::Match => "Match Original",
            AspectRatio::Square => "1:1 (Square)",
            AspectRatio::Portrait => "4:5 (Portrait)",
            AspectRatio::Widescreen => "16:9 (Widescreen)",
            AspectRatio::Classic => "3:2 (Classic)",
            AspectRatio::Vertical => "9:16 (Vertical)",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum ImageSize {
    #[serde(rename = "1K")]
    #[strum(serialize = "1K")]
    OneK,
    #[default]
    #[serde(rename = "2K")]
    #[strum(serialize = "2K")]
    TwoK,
    #[serde(rename = "4K")]
    #[strum(serialize = "4K")]
    FourK,
}

impl Labeled for ImageSize {
    fn label(&self) -> &'static str {
        match self {
            ImageSize::OneK => "1K (1024px)",
            ImageSize::TwoK => "2K (2048px)",
            ImageSize::FourK => "4K (4096px)",
        }
    }
}

/// Parses an optional form tag, falling back to the type default when absent.
pub fn parse_tag<T>(field: &'static str, value: Option<&str>) -> Result<T, OptionsError>
where
    T: FromStr + Default,
{
    match value.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(T::default()),
        Some(raw) => T::from_str(raw).map_err(|_| OptionsError::UnknownOption {
            field,
            value: raw.to_string(),
        }),
    }
}

/// Options record for exactly one domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DomainOptions {
    Interior(InteriorOptions),
    Product(ProductOptions),
    Food(FoodOptions),
    Automotive(AutoOptions),
    People(GenericOptions),
    General(GenericOptions),
}

impl DomainOptions {
    /// Decodes the JSON payload for `domain`, validates it and clamps sliders.
    /// A missing or malformed payload is an error; there is no fallback to
    /// defaults.
    pub fn parse(domain: Domain, raw: Option<&str>) -> Result<Self, OptionsError> {
        let raw = raw
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(OptionsError::Missing(domain))?;

        let options = match domain {
            Domain::Interior => DomainOptions::Interior(decode(domain, raw)?),
            Domain::Product => {
                let options: ProductOptions = decode(domain, raw)?;
                options.validate()?;
                DomainOptions::Product(options)
            }
            Domain::Food => DomainOptions::Food(decode(domain, raw)?),
            Domain::Automotive => DomainOptions::Automotive(decode(domain, raw)?),
            Domain::People => DomainOptions::People(decode(domain, raw)?),
            Domain::General => DomainOptions::General(decode(domain, raw)?),
        };
        Ok(options.normalized())
    }

    pub fn defaults(domain: Domain) -> Self {
        match domain {
            Domain::Interior => DomainOptions::Interior(InteriorOptions::default()),
            Domain::Product => DomainOptions::Product(ProductOptions::default()),
            Domain::Food => DomainOptions::Food(FoodOptions::default()),
            Domain::Automotive => DomainOptions::Automotive(AutoOptions::default()),
            Domain::People => DomainOptions::People(GenericOptions::default()),
            Domain::General => DomainOptions::General(GenericOptions::default()),
        }
    }

    pub fn domain(&self) -> Domain {
        match self {
            DomainOptions::Interior(_) => Domain::Interior,
            DomainOptions::Product(_) => Domain::Product,
            DomainOptions::Food(_) => Domain::Food,
            DomainOptions::Automotive(_) => Domain::Automotive,
            DomainOptions::People(_) => Domain::People,
            DomainOptions::General(_) => Domain::General,
        }
    }

    pub fn normalized(self) -> Self {
        match self {
            DomainOptions::Interior(options) => DomainOptions::Interior(options.normalized()),
            DomainOptions::Product(options) => DomainOptions::Product(options.normalized()),
            DomainOptions::Food(options) => DomainOptions::Food(options.normalized()),
            DomainOptions::Automotive(options) => DomainOptions::Automotive(options.normalized()),
            DomainOptions::People(options) => DomainOptions::People(options.normalized()),
            DomainOptions::General(options) => DomainOptions::General(options.normalized()),
        }
    }

    /// One-line description for request logs.
    pub fn summary(&self) -> String {
        match self {
            DomainOptions::Interior(options) => format!(
                "interior mode={} strength={} creative_crop={} hdr_windows={}",
                options.transform_mode,
                options.strength,
                options.creative_crop,
                options.hdr_windows
            ),
            DomainOptions::Product(options) => format!(
                "product shot={} preset={} label_protection={}",
                options.shot_type, options.quick_preset, options.label_protection.enabled
            ),
            DomainOptions::Food(options) => format!(
                "food mode={} boost={} strength={}",
                options.transform_mode, options.food_boost, options.strength
            ),
            DomainOptions::Automotive(options) => format!(
                "automotive shot={} angle={} strength={}",
                options.shot_type, options.angle, options.strength
            ),
            DomainOptions::People(options) | DomainOptions::General(options) => format!(
                "{} strength={} strict={}",
                self.domain(),
                options.strength,
                options.strict_preservation
            ),
        }
    }
}

fn decode<T: DeserializeOwned>(domain: Domain, raw: &str) -> Result<T, OptionsError> {
    serde_json::from_str(raw).map_err(|source| match unknown_variant(&source) {
        Some(value) => OptionsError::UnknownOption {
            field: options_field(domain),
            value,
        },
        None => OptionsError::Malformed { domain, source },
    })
}

/// Value named by serde's "unknown variant `x`, expected ..." data error.
fn unknown_variant(err: &serde_json::Error) -> Option<String> {
    if !err.is_data() {
        return None;
    }
    let message = err.to_string();
    let rest = message.strip_prefix("unknown variant `")?;
    let end = rest.find('`')?;
    Some(rest[..end].to_string())
}

fn options_field(domain: Domain) -> &'static str {
    match domain {
        Domain::Interior => "interior options",
        Domain::Product => "product options",
        Domain::Food => "food options",
        Domain::Automotive => "automotive options",
        Domain::People => "people options",
        Domain::General => "general options",
    }
}

pub(crate) fn clamp_slider(field: &'static str, value: i32, min: i32, max: i32) -> i32 {
    let clamped = value.clamp(min, max);
    if clamped != value {
        warn!(field, value, clamped, "slider value out of range; clamped");
    }
    clamped
}

pub(crate) fn normalize_hint(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.chars().count() <= MAX_HINT_CHARS {
        return Some(trimmed.to_string());
    }
    Some(trimmed.chars().take(MAX_HINT_CHARS).collect())
}
