pub mod analysis;
pub mod validate;

use std::sync::Arc;

use tracing::{debug, info};

use crate::llm::media::{detect_mime_type, normalize_mime, FALLBACK_MIME};
use crate::llm::{GenerationRequest, ImageGenerationError, ImageModel};
use crate::options::{parse_tag, AspectRatio, Domain, DomainOptions, ImageSize, OptionsError};
use crate::prompt::{build_prompt, prompt_preview};

pub use analysis::{analyze_product, ProductAnalysis};
pub use validate::{validate_image, ImageValidationError, UploadedImage, ValidatedImage};

const PROMPT_LOG_CHARS: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum EnhanceError {
    #[error(transparent)]
    Validation(#[from] ImageValidationError),
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error(transparent)]
    Generation(#[from] ImageGenerationError),
}

/// Raw form values of one enhancement request.
#[derive(Debug, Clone, Default)]
pub struct EnhanceSubmission {
    pub image: Option<UploadedImage>,
    pub domain: Option<String>,
    pub options: Option<String>,
    pub aspect_ratio: Option<String>,
    pub image_size: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EnhancedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Runs validation, prompt construction and the single model call.
#[derive(Clone)]
pub struct Enhancer {
    model: Arc<dyn ImageModel>,
    max_upload_bytes: usize,
}

impl Enhancer {
    pub fn new(model: Arc<dyn ImageModel>, max_upload_bytes: usize) -> Self {
        Self {
            model,
            max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub fn validate(&self, upload: Option<UploadedImage>) -> Result<ValidatedImage, EnhanceError> {
        if let Some(upload) = upload.as_ref() {
            debug!(
                "Validating upload file_name={} declared_mime={} bytes={}",
                upload.file_name.as_deref().unwrap_or("-"),
                upload.declared_mime.as_deref().unwrap_or("-"),
                upload.bytes.len()
            );
        }
        Ok(validate_image(upload, self.max_upload_bytes)?)
    }

    pub async fn enhance(&self, submission: EnhanceSubmission) -> Result<EnhancedImage, EnhanceError> {
        let EnhanceSubmission {
            image,
            domain,
            options,
            aspect_ratio,
            image_size,
        } = submission;

        let image = self.validate(image)?;

        let domain = Domain::parse(domain.as_deref().unwrap_or_default())?;
        let aspect_ratio: AspectRatio = parse_tag("aspectRatio", aspect_ratio.as_deref())?;
        let image_size: ImageSize = parse_tag("imageSize", image_size.as_deref())?;
        let options = DomainOptions::parse(domain, options.as_deref())?;

        let prompt = {
            let mut rng = rand::rng();
            build_prompt(&options, &mut rng)
        };
        info!(
            "Enhancing {} image ({} bytes, {}) aspect_ratio={} image_size={} options: {}",
            domain,
            image.bytes.len(),
            image.mime_type,
            aspect_ratio,
            image_size,
            options.summary()
        );
        debug!("Prompt preview: {}", prompt_preview(&prompt, PROMPT_LOG_CHARS));

        let request = GenerationRequest {
            image: image.bytes,
            mime_type: image.mime_type,
            prompt,
            aspect_ratio,
            image_size,
        };
        let bytes = self.model.edit_image(&request).await?;
        let mime_type = detect_mime_type(&bytes)
            .map(|mime| normalize_mime(&mime))
            .unwrap_or_else(|| FALLBACK_MIME.to_string());
        info!("Enhanced image ready ({} bytes, {})", bytes.len(), mime_type);

        Ok(EnhancedImage { bytes, mime_type })
    }

    pub async fn analyze(&self, upload: Option<UploadedImage>) -> Result<ProductAnalysis, EnhanceError> {
        let image = self.validate(upload)?;
        Ok(analyze_product(self.model.as_ref(), &image).await)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::options::product::ProductShotType;
    use crate::options::ProductOptions;

    pub(crate) const PNG_BYTES: [u8; 12] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    /// Records calls and answers with canned results.
    #[derive(Default)]
    pub(crate) struct FakeModel {
        pub edits: AtomicUsize,
        pub descriptions: AtomicUsize,
        pub last_request: Mutex<Option<GenerationRequest>>,
        pub fail_with: Option<String>,
        pub description: String,
    }

    #[async_trait]
    impl ImageModel for FakeModel {
        async fn edit_image(
            &self,
            request: &GenerationRequest,
        ) -> Result<Vec<u8>, ImageGenerationError> {
            self.edits.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            match &self.fail_with {
                Some(message) => Err(ImageGenerationError(message.clone())),
                None => Ok(PNG_BYTES.to_vec()),
            }
        }

        async fn describe_image(
            &self,
            _image: &[u8],
            _mime_type: &str,
            _instruction: &str,
        ) -> Result<String, ImageGenerationError> {
            self.descriptions.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(message) => Err(ImageGenerationError(message.clone())),
                None => Ok(self.description.clone()),
            }
        }
    }

    fn jpeg_upload(len: usize) -> UploadedImage {
        UploadedImage {
            bytes: vec![0xFF; len],
            declared_mime: Some("image/jpeg".into()),
            file_name: Some("shot.jpg".into()),
        }
    }

    fn submission(domain: &str, options: &str) -> EnhanceSubmission {
        EnhanceSubmission {
            image: Some(jpeg_upload(64)),
            domain: Some(domain.into()),
            options: Some(options.into()),
            ..Default::default()
        }
    }

    const INTERIOR_RETOUCH: &str =
        r#"{"transformMode":"retouch","strength":40,"hdrWindows":false,"creativeCrop":false}"#;

    #[tokio::test]
    async fn oversized_upload_never_reaches_the_model() {
        let model = Arc::new(FakeModel::default());
        let enhancer = Enhancer::new(model.clone(), 8 * 1024 * 1024);
        let mut request = submission("interior", INTERIOR_RETOUCH);
        request.image = Some(jpeg_upload(9 * 1024 * 1024));

        let err = enhancer.enhance(request).await.unwrap_err();
        assert!(matches!(
            err,
            EnhanceError::Validation(ImageValidationError::TooLarge { .. })
        ));
        assert_eq!(model.edits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn interior_retouch_request_sends_one_prompt() {
        let model = Arc::new(FakeModel::default());
        let enhancer = Enhancer::new(model.clone(), 8 * 1024 * 1024);
        let mut request = submission("interior", INTERIOR_RETOUCH);
        request.aspect_ratio = Some("4:5".into());

        let result = enhancer.enhance(request).await.unwrap();
        assert_eq!(result.mime_type, "image/png");
        assert_eq!(result.bytes, PNG_BYTES.to_vec());
        assert_eq!(model.edits.load(Ordering::SeqCst), 1);

        let sent = model.last_request.lock().unwrap().clone().unwrap();
        assert!(sent.prompt.starts_with("CRITICAL RULES:"));
        assert!(sent.prompt.contains("Fix the geometry"));
        assert_eq!(sent.mime_type, "image/jpeg");
        assert_eq!(sent.aspect_ratio, AspectRatio::Portrait);
        assert_eq!(sent.image_size, ImageSize::TwoK);
    }

    #[tokio::test]
    async fn options_are_required_and_never_defaulted() {
        let model = Arc::new(FakeModel::default());
        let enhancer = Enhancer::new(model.clone(), 8 * 1024 * 1024);
        let mut request = submission("food", "");
        request.options = None;

        let err = enhancer.enhance(request).await.unwrap_err();
        assert!(matches!(err, EnhanceError::Options(OptionsError::Missing(Domain::Food))));

        let err = enhancer
            .enhance(submission("boats", INTERIOR_RETOUCH))
            .await
            .unwrap_err();
        assert!(matches!(err, EnhanceError::Options(OptionsError::UnknownDomain(_))));
        assert_eq!(model.edits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_image_size_is_rejected() {
        let model = Arc::new(FakeModel::default());
        let enhancer = Enhancer::new(model.clone(), 8 * 1024 * 1024);
        let mut request = submission("interior", INTERIOR_RETOUCH);
        request.image_size = Some("16K".into());

        let err = enhancer.enhance(request).await.unwrap_err();
        assert_eq!(err.to_string(), "Unknown option for imageSize: 16K");
    }

    #[tokio::test]
    async fn model_failure_keeps_its_message() {
        let model = Arc::new(FakeModel {
            fail_with: Some("quota exhausted".into()),
            ..Default::default()
        });
        let enhancer = Enhancer::new(model.clone(), 8 * 1024 * 1024);

        let err = enhancer
            .enhance(submission("interior", INTERIOR_RETOUCH))
            .await
            .unwrap_err();
        assert!(matches!(err, EnhanceError::Generation(_)));
        assert!(err.to_string().contains("quota exhausted"));
        assert_eq!(model.edits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn strict_label_protection_reaches_the_model() {
        let model = Arc::new(FakeModel::default());
        let enhancer = Enhancer::new(model.clone(), 8 * 1024 * 1024);
        let mut record = serde_json::to_value(ProductOptions::default()).unwrap();
        record["labelProtection"]["enabled"] = true.into();
        record["labelProtection"]["strictness"] = 95.into();

        enhancer
            .enhance(submission("product", &record.to_string()))
            .await
            .unwrap();

        let sent = model.last_request.lock().unwrap().clone().unwrap();
        assert!(sent.prompt.contains(
            "LABEL PROTECTION: STRICT - Every letter, number, logo, and design element on product labels \
             must be EXACTLY preserved."
        ));
        assert!(sent.prompt.contains("Zero tolerance for text modifications."));
        assert!(!sent.prompt.contains("Minor label details may vary"));
    }

    #[tokio::test]
    async fn analysis_decodes_model_reply() {
        let model = Arc::new(FakeModel {
            description: r#"Sure! {"productType":"jewelry","recommendedShotType":"flatlay","recommendedAngle":"top_down","recommendedBackground":"light_grey","recommendedSurface":"paper","recommendedLighting":"window_light","recommendedShadow":"soft_contact","warnings":[],"confidence":0.8}"#.into(),
            ..Default::default()
        });
        let enhancer = Enhancer::new(model.clone(), 8 * 1024 * 1024);

        let analysis = enhancer.analyze(Some(jpeg_upload(64))).await.unwrap();
        assert_eq!(analysis.recommended_shot_type, ProductShotType::Flatlay);
        assert_eq!(analysis.confidence, 0.8);
        assert_eq!(model.descriptions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn analysis_falls_back_when_the_model_fails() {
        let model = Arc::new(FakeModel {
            fail_with: Some("timeout".into()),
            ..Default::default()
        });
        let enhancer = Enhancer::new(model, 8 * 1024 * 1024);

        let analysis = enhancer.analyze(Some(jpeg_upload(64))).await.unwrap();
        assert_eq!(analysis.confidence, 0.0);
        assert_eq!(
            analysis.warnings,
            vec!["Analysis failed: timeout. Using default settings.".to_string()]
        );
    }
}
