use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::debug;

use super::responses::ApiError;
use crate::enhance::{EnhanceSubmission, ProductAnalysis, UploadedImage};
use crate::llm::media::extension_for_mime;
use crate::options::ProductOptions;
use crate::state::AppState;
use crate::utils::timing::RequestTimer;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub analysis: ProductAnalysis,
    pub suggested_options: ProductOptions,
}

pub async fn enhance(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut timer = RequestTimer::start("enhance");
    let result = run_enhance(&state, multipart, &mut timer).await;
    finish_timer(&mut timer, &result);
    result
}

async fn run_enhance(
    state: &AppState,
    multipart: Multipart,
    timer: &mut RequestTimer,
) -> Result<Response, ApiError> {
    let submission = read_submission(multipart).await?;
    if let Some(domain) = submission.domain.as_deref() {
        timer.set_domain(domain.trim());
    }

    let image = state.enhancer.enhance(submission).await?;
    let disposition = format!(
        "inline; filename=\"enhanced.{}\"",
        extension_for_mime(&image.mime_type)
    );
    Ok((
        [
            (header::CONTENT_TYPE, image.mime_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        image.bytes,
    )
        .into_response())
}

pub async fn analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let mut timer = RequestTimer::start("analyze");
    timer.set_domain("product");
    let result = run_analyze(&state, multipart).await;
    finish_timer(&mut timer, &result);
    result
}

async fn run_analyze(
    state: &AppState,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let submission = read_submission(multipart).await?;
    let analysis = state.enhancer.analyze(submission.image).await?;
    let suggested_options = analysis.suggested_options();
    Ok(Json(AnalyzeResponse {
        analysis,
        suggested_options,
    }))
}

fn finish_timer<T>(timer: &mut RequestTimer, result: &Result<T, ApiError>) {
    match result {
        Ok(_) => timer.complete("success", None),
        Err(err) => timer.complete(err.kind(), Some(err.to_string())),
    }
}

async fn read_submission(mut multipart: Multipart) -> Result<EnhanceSubmission, ApiError> {
    let mut submission = EnhanceSubmission::default();
    let mut legacy_preset = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::Validation(format!("Invalid multipart body: {err}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let declared_mime = field.content_type().map(str::to_string);
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(|err| {
                    ApiError::Validation(format!("Failed to read uploaded file: {err}"))
                })?;
                submission.image = Some(UploadedImage {
                    bytes: bytes.to_vec(),
                    declared_mime,
                    file_name,
                });
            }
            "domain" => submission.domain = Some(read_text(field).await?),
            // Older clients sent the domain as `preset`.
            "preset" => legacy_preset = Some(read_text(field).await?),
            "options" => submission.options = Some(read_text(field).await?),
            "aspectRatio" => submission.aspect_ratio = Some(read_text(field).await?),
            "imageSize" => submission.image_size = Some(read_text(field).await?),
            other => debug!("Ignoring multipart field '{}'", other),
        }
    }

    if submission.domain.is_none() {
        submission.domain = legacy_preset;
    }
    Ok(submission)
}

async fn read_text(field: Field<'_>) -> Result<String, ApiError> {
    let name = field.name().unwrap_or_default().to_string();
    field
        .text()
        .await
        .map_err(|err| ApiError::Validation(format!("Failed to read field '{name}': {err}")))
}
