use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::agents::{run_interpretation, InterpretationOutcome, NO_CONTENT_WARNING};
use crate::models::{AppState, InputPayload, InterpretResponse, InterpretStatus, UploadedFile};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/interpret", post(interpret_handler))
        .with_state(state)
}

async fn interpret_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let multipart = multipart.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    let span = info_span!("interpret", request_id = %Uuid::new_v4());

    async move {
        let payload = read_payload(multipart).await?;
        let outcome = run_interpretation(payload, state.llm.as_ref(), &state.config.llm).await?;
        Ok::<_, AppError>(outcome_response(outcome))
    }
    .instrument(span)
    .await
}

/// Collect the `file` and `text` fields of the form.
async fn read_payload(mut multipart: Multipart) -> AppResult<InputPayload> {
    let mut payload = InputPayload::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(malformed)?;

                // Browsers send an empty part when no file was chosen
                if filename.is_empty() && data.is_empty() {
                    continue;
                }
                if payload.file.is_some() {
                    return Err(AppError::InvalidRequest(
                        "only one file may be uploaded per request".to_string(),
                    ));
                }

                info!(filename = %filename, size = data.len(), "File received");
                payload.file = Some(UploadedFile::new(filename, data));
            }
            "text" => {
                let text = field.text().await.map_err(malformed)?;
                payload.pasted_text = Some(text);
            }
            other => debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(payload)
}

fn malformed(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::InvalidRequest(format!("malformed form data: {}", e.body_text()))
}

fn outcome_response(outcome: InterpretationOutcome) -> Response {
    let extraction_errors: Vec<String> = outcome
        .extraction_errors()
        .iter()
        .map(|e| format!("Failed to read uploaded file: {}", e))
        .collect();

    let (status, body) = match outcome {
        InterpretationOutcome::Interpreted { result, .. } => (
            StatusCode::OK,
            InterpretResponse {
                status: InterpretStatus::Success,
                interpretation: Some(result.0),
                warning: None,
                error: None,
                extraction_errors,
            },
        ),
        InterpretationOutcome::NoContent { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            InterpretResponse {
                status: InterpretStatus::Warning,
                interpretation: None,
                warning: Some(NO_CONTENT_WARNING.to_string()),
                error: None,
                extraction_errors,
            },
        ),
        InterpretationOutcome::Failed { error, .. } => (
            error.status_code(),
            InterpretResponse {
                status: InterpretStatus::Error,
                interpretation: None,
                warning: None,
                error: Some(error.to_string()),
                extraction_errors,
            },
        ),
    };

    (status, Json(body)).into_response()
}
