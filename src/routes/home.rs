use crate::server::SharedState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("Failed to read index page: {0}")]
pub struct HomeError(#[from] std::io::Error);

impl IntoResponse for HomeError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

pub async fn homepage(State(state): State<SharedState>) -> Result<Html<String>, HomeError> {
    let page = tokio::fs::read_to_string(&state.assets.index_file).await?;

    Ok(Html(page))
}
