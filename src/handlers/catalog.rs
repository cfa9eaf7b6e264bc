use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use strum::IntoEnumIterator;

use super::responses::ApiError;
use crate::options::automotive::{AutoAngle, AutoEnvironment, AutoLighting, AutoShotType};
use crate::options::food::{FoodBoost, FoodLighting, FoodShotType, FoodSurface, TransformMode};
use crate::options::interior::InteriorMode;
use crate::options::presets::apply_product_preset;
use crate::options::product::{
    BackgroundStyle, CameraAngle, ClothType, Composition, LifestyleScene, LightingStyle,
    ProductPreset, ProductScale, ProductShotType, ReflectionType, ShadowType, SurfaceType,
};
use crate::options::{
    AspectRatio, Domain, DomainOptions, ImageSize, Labeled, OptionsError, ProductOptions,
};
use crate::prompt::{build_prompt, prompt_preview};

const DEFAULT_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Serialize)]
struct Choice<T: Serialize> {
    value: T,
    label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'static str>,
}

fn choices<T>() -> Vec<Choice<T>>
where
    T: IntoEnumIterator + Labeled + Serialize,
{
    T::iter()
        .map(|value| Choice {
            label: value.label(),
            value,
            description: None,
        })
        .collect()
}

fn described<T, F>(describe: F) -> Vec<Choice<T>>
where
    T: IntoEnumIterator + Labeled + Serialize + Copy,
    F: Fn(T) -> &'static str,
{
    T::iter()
        .map(|value| Choice {
            label: value.label(),
            description: Some(describe(value)),
            value,
        })
        .collect()
}

fn domain_profiles() -> Vec<Value> {
    Domain::iter()
        .map(|domain| {
            let profile = domain.profile();
            json!({
                "value": domain,
                "label": profile.label,
                "description": profile.description,
                "focusAreas": profile.focus_areas,
                "styleHints": profile.style_hints,
            })
        })
        .collect()
}

fn product_scales() -> Vec<Value> {
    ProductScale::iter()
        .map(|scale| {
            json!({
                "value": scale,
                "label": scale.label(),
                "description": scale.description(),
                "availableSurfaces": scale.available_surfaces(),
            })
        })
        .collect()
}

/// Everything a client needs to render the option forms.
pub async fn catalog() -> Json<Value> {
    Json(json!({
        "domains": domain_profiles(),
        "aspectRatios": choices::<AspectRatio>(),
        "imageSizes": choices::<ImageSize>(),
        "options": {
            "interior": {
                "defaults": DomainOptions::defaults(Domain::Interior),
                "transformModes": described(InteriorMode::description),
            },
            "product": {
                "defaults": DomainOptions::defaults(Domain::Product),
                "presets": described(ProductPreset::description),
                "shotTypes": choices::<ProductShotType>(),
                "scales": product_scales(),
                "lifestyleScenes": choices::<LifestyleScene>(),
                "backgroundStyles": choices::<BackgroundStyle>(),
                "surfaces": choices::<SurfaceType>(),
                "clothTypes": choices::<ClothType>(),
                "cameraAngles": choices::<CameraAngle>(),
                "compositions": choices::<Composition>(),
                "lightingStyles": choices::<LightingStyle>(),
                "shadows": choices::<ShadowType>(),
                "reflections": choices::<ReflectionType>(),
            },
            "food": {
                "defaults": DomainOptions::defaults(Domain::Food),
                "transformModes": described(TransformMode::description),
                "shotTypes": choices::<FoodShotType>(),
                "lighting": choices::<FoodLighting>(),
                "surfaces": choices::<FoodSurface>(),
                "boosts": described(FoodBoost::description),
            },
            "automotive": {
                "defaults": DomainOptions::defaults(Domain::Automotive),
                "shotTypes": choices::<AutoShotType>(),
                "angles": choices::<AutoAngle>(),
                "environments": choices::<AutoEnvironment>(),
                "lighting": choices::<AutoLighting>(),
            },
            "people": { "defaults": DomainOptions::defaults(Domain::People) },
            "general": { "defaults": DomainOptions::defaults(Domain::General) },
        },
    }))
}

pub async fn product_preset(Path(preset): Path<String>) -> Result<Json<ProductOptions>, ApiError> {
    let preset =
        ProductPreset::from_str(preset.trim()).map_err(|_| OptionsError::UnknownOption {
            field: "preset",
            value: preset.clone(),
        })?;
    Ok(Json(apply_product_preset(preset)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub domain: String,
    #[serde(default)]
    pub options: Value,
    #[serde(default)]
    pub max_length: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub prompt: String,
    pub preview: String,
}

/// Builds the prompt an enhance call would send, without calling the model.
pub async fn preview_prompt(
    payload: Result<Json<PreviewRequest>, JsonRejection>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let Json(request) = payload.map_err(|err| ApiError::Validation(err.body_text()))?;

    let domain = Domain::parse(&request.domain)?;
    let raw = match request.options {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    };
    let options = DomainOptions::parse(domain, raw.as_deref())?;

    let prompt = build_prompt(&options, &mut rand::rng());
    let preview = prompt_preview(&prompt, request.max_length.unwrap_or(DEFAULT_PREVIEW_CHARS));
    Ok(Json(PreviewResponse { prompt, preview }))
}
