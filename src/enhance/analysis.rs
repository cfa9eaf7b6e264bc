use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::validate::ValidatedImage;
use crate::llm::ImageModel;
use crate::options::presets::{
    BackgroundPatch, CameraPatch, LightingPatch, ProductOptionsPatch, SurfacePatch,
};
use crate::options::product::{
    BackgroundStyle, CameraAngle, ClothType, LightingStyle, ProductShotType, ShadowType,
    SurfaceType,
};
use crate::options::{Labeled, ProductOptions};

const ANALYSIS_INSTRUCTION: &str = r#"Analyze this product image and provide recommendations for professional product photography settings.

Return your analysis as a JSON object with the following structure:

{
  "productType": "<one of: bottle, box, apparel, jewelry, device, food, cosmetics, other>",
  "recommendedShotType": "<one of: packshot, lifestyle, flatlay>",
  "recommendedAngle": "<one of: front, three_quarter, side, top_down, macro>",
  "recommendedBackground": "<one of: white, light_grey, gradient, lifestyle>",
  "recommendedSurface": "<one of: none, acrylic, paper, marble, wood_light, wood_dark, cloth>",
  "recommendedLighting": "<one of: softbox_front, window_light, rim_light, dramatic, backlit>",
  "recommendedShadow": "<one of: none, soft_contact, crisp, drop>",
  "warnings": ["<array of any warnings or issues with the current image>"],
  "confidence": <number between 0 and 1 indicating confidence in the analysis>
}

Guidelines:
- productType: the category of product
- recommendedShotType: packshot = clean isolated product, lifestyle = product in context, flatlay = overhead styled shot
- recommendedAngle: what shows the product best
- recommendedBackground: match the product's style and brand positioning
- recommendedSurface: consider reflective properties and product type
- recommendedLighting: match the product's material and desired mood
- recommendedShadow: enhance depth and product grounding
- warnings: flag issues like poor lighting, blur, clutter or orientation problems
- confidence: be honest about uncertainty

Return ONLY the JSON object, no additional text."#;

const FALLBACK_WARNING: &str = "Unable to analyze image automatically. Using default settings.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Bottle,
    Box,
    Apparel,
    Jewelry,
    Device,
    Food,
    Cosmetics,
    Other,
}

impl Labeled for ProductType {
    fn label(&self) -> &'static str {
        match self {
            ProductType::Bottle => "Bottle",
            ProductType::Box => "Box / Packaging",
            ProductType::Apparel => "Apparel",
            ProductType::Jewelry => "Jewelry",
            ProductType::Device => "Device",
            ProductType::Food => "Food",
            ProductType::Cosmetics => "Cosmetics",
            ProductType::Other => "Other",
        }
    }
}

/// Setting recommendations for a product photo. Advisory only: when the
/// model cannot produce one, a neutral default with an explanatory warning
/// is returned instead of an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAnalysis {
    pub product_type: ProductType,
    pub recommended_shot_type: ProductShotType,
    pub recommended_angle: CameraAngle,
    pub recommended_background: BackgroundStyle,
    pub recommended_surface: SurfaceType,
    pub recommended_lighting: LightingStyle,
    pub recommended_shadow: ShadowType,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub confidence: f64,
}

impl ProductAnalysis {
    pub fn fallback(warning: impl Into<String>) -> Self {
        Self {
            product_type: ProductType::Other,
            recommended_shot_type: ProductShotType::Packshot,
            recommended_angle: CameraAngle::ThreeQuarter,
            recommended_background: BackgroundStyle::White,
            recommended_surface: SurfaceType::None,
            recommended_lighting: LightingStyle::SoftboxFront,
            recommended_shadow: ShadowType::SoftContact,
            warnings: vec![warning.into()],
            confidence: 0.0,
        }
    }

    pub fn suggested_patch(&self) -> ProductOptionsPatch {
        let cloth_type = (self.recommended_surface == SurfaceType::Cloth).then_some(ClothType::Linen);
        ProductOptionsPatch {
            shot_type: Some(self.recommended_shot_type),
            background: BackgroundPatch {
                style: Some(self.recommended_background),
                ..Default::default()
            },
            surface: SurfacePatch {
                kind: Some(self.recommended_surface),
                cloth_type,
                ..Default::default()
            },
            camera: CameraPatch {
                angle: Some(self.recommended_angle),
                ..Default::default()
            },
            lighting: LightingPatch {
                style: Some(self.recommended_lighting),
                ..Default::default()
            },
            shadow: Some(self.recommended_shadow),
            ..Default::default()
        }
    }

    pub fn suggested_options(&self) -> ProductOptions {
        ProductOptions::default().with_patch(self.suggested_patch())
    }
}

pub async fn analyze_product(model: &dyn ImageModel, image: &ValidatedImage) -> ProductAnalysis {
    let reply = match model
        .describe_image(&image.bytes, &image.mime_type, ANALYSIS_INSTRUCTION)
        .await
    {
        Ok(reply) => reply,
        Err(err) => {
            warn!("Product analysis request failed: {err}");
            return ProductAnalysis::fallback(format!(
                "Analysis failed: {}. Using default settings.",
                err.0
            ));
        }
    };

    match parse_analysis(&reply) {
        Some(analysis) => analysis,
        None => {
            debug!("Unusable product analysis reply: {}", reply);
            ProductAnalysis::fallback(FALLBACK_WARNING)
        }
    }
}

fn parse_analysis(reply: &str) -> Option<ProductAnalysis> {
    let json = extract_json_object(reply)?;
    match serde_json::from_str::<ProductAnalysis>(json) {
        Ok(mut analysis) => {
            analysis.confidence = analysis.confidence.clamp(0.0, 1.0);
            Some(analysis)
        }
        Err(err) => {
            warn!("Failed to decode product analysis: {err}");
            None
        }
    }
}

/// Outermost `{...}` span of a model reply that may wrap JSON in prose or fences.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_is_extracted_from_fenced_reply() {
        let reply = "Here you go:\n```json\n{\"a\": {\"b\": 1}}\n```";
        assert_eq!(extract_json_object(reply), Some("{\"a\": {\"b\": 1}}"));
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[test]
    fn complete_reply_decodes_and_clamps_confidence() {
        let reply = r#"{
            "productType": "bottle",
            "recommendedShotType": "lifestyle",
            "recommendedAngle": "three_quarter",
            "recommendedBackground": "gradient",
            "recommendedSurface": "marble",
            "recommendedLighting": "rim_light",
            "recommendedShadow": "crisp",
            "warnings": ["slight blur"],
            "confidence": 1.4
        }"#;
        let analysis = parse_analysis(reply).unwrap();
        assert_eq!(analysis.product_type, ProductType::Bottle);
        assert_eq!(analysis.recommended_surface, SurfaceType::Marble);
        assert_eq!(analysis.warnings, vec!["slight blur".to_string()]);
        assert_eq!(analysis.confidence, 1.0);
    }

    #[test]
    fn reply_missing_required_fields_is_rejected() {
        assert!(parse_analysis(r#"{"productType": "bottle"}"#).is_none());
        assert!(parse_analysis(r#"{"productType": "spaceship"}"#).is_none());
    }

    #[test]
    fn suggestions_merge_onto_defaults() {
        let mut analysis = ProductAnalysis::fallback(FALLBACK_WARNING);
        analysis.recommended_surface = SurfaceType::Cloth;
        analysis.recommended_lighting = LightingStyle::Dramatic;

        let options = analysis.suggested_options();
        let defaults = ProductOptions::default();
        assert_eq!(options.camera.angle, CameraAngle::ThreeQuarter);
        assert_eq!(options.lighting.style, LightingStyle::Dramatic);
        assert_eq!(options.lighting.intensity, defaults.lighting.intensity);
        assert_eq!(options.surface.cloth_type, Some(ClothType::Linen));
        assert_eq!(options.label_protection, defaults.label_protection);
    }

    #[test]
    fn fallback_explains_itself() {
        let analysis = ProductAnalysis::fallback(FALLBACK_WARNING);
        assert_eq!(analysis.confidence, 0.0);
        assert_eq!(analysis.warnings, vec![FALLBACK_WARNING.to_string()]);
        assert!(!analysis.product_type.label().is_empty());
    }
}
