use crate::{classifier::ClassifierError, server::SharedState};
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub result: String,
}

#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Failed to read multipart upload: {0}")]
    Multipart(#[from] MultipartError),
    #[error("Request is missing a non-empty `file` field")]
    MissingFile,
    #[error("Uploaded bytes are not a decodable image: {0}")]
    UndecodableImage(String),
    #[error("Classification failed: {0}")]
    Classification(String),
}

impl IntoResponse for AnalyzeError {
    fn into_response(self) -> Response {
        let status = match &self {
            AnalyzeError::Multipart(_) | AnalyzeError::MissingFile => StatusCode::BAD_REQUEST,
            AnalyzeError::UndecodableImage(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AnalyzeError::Classification(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}

#[instrument(skip(state, multipart))]
pub async fn analyze(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AnalyzeError> {
    let mut image_data = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            image_data = Some(field.bytes().await?);
            break;
        }
    }

    let image_data = image_data
        .filter(|data| !data.is_empty())
        .ok_or(AnalyzeError::MissingFile)?;

    let result = state
        .classifier
        .classify(&image_data)
        .await
        .map_err(|e| match e {
            ClassifierError::ImageDecode(message) => AnalyzeError::UndecodableImage(message),
            other => AnalyzeError::Classification(other.to_string()),
        })?;

    Ok(Json(AnalyzeResponse { result }))
}
