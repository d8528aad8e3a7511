use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to fetch model artifact from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to write model artifact to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Makes sure the model artifact is present at `local_path`.
///
/// No-op when the file already exists; otherwise the full body of `url`
/// is fetched and written next to the target, then renamed into place so
/// an interrupted download never leaves a partial artifact behind.
pub async fn ensure_artifact(url: &str, local_path: &Path) -> Result<(), ArtifactError> {
    if local_path.exists() {
        tracing::info!("Model artifact already present at {:?}", local_path);
        return Ok(());
    }

    tracing::info!("Downloading model artifact from {}", url);

    let fetch_err = |source| ArtifactError::Fetch {
        url: url.to_string(),
        source,
    };
    let response = reqwest::get(url)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(fetch_err)?;
    let body = response.bytes().await.map_err(fetch_err)?;

    let write_err = |source| ArtifactError::Write {
        path: local_path.display().to_string(),
        source,
    };
    if let Some(parent) = local_path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }
    let tmp_path = local_path.with_extension("download");
    tokio::fs::write(&tmp_path, &body).await.map_err(write_err)?;
    tokio::fs::rename(&tmp_path, local_path)
        .await
        .map_err(write_err)?;

    tracing::info!(
        "Model artifact downloaded ({} bytes) to {:?}",
        body.len(),
        local_path
    );

    Ok(())
}
