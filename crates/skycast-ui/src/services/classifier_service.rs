//! Classifier screen backend: read a photo and send it for prediction.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use skycast_backend::{BackendClient, ClassificationResult};
use skycast_core::{AppError, Loadable};

#[derive(Debug, Clone)]
pub enum ClassifierError {
    /// The photo could not be read from disk
    Read {
        path: PathBuf,
        kind: std::io::ErrorKind,
        reason: String,
    },
    Prediction(String),
}

impl std::fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifierError::Read { path, reason, .. } => {
                write!(f, "Could not read {}: {}", path.display(), reason)
            }
            ClassifierError::Prediction(s) => write!(f, "Prediction error: {}", s),
        }
    }
}

impl std::error::Error for ClassifierError {}

#[derive(Debug)]
pub enum ClassifierServiceMessage {
    PredictionDone(Loadable<ClassificationResult>),
}

/// Classify image bytes already in memory.
pub async fn classify_bytes(
    backend: &BackendClient,
    image: Vec<u8>,
    file_name: &str,
) -> Loadable<ClassificationResult> {
    let result = backend.classify_image(image, file_name).await.map_err(|e| {
        tracing::error!("Error predicting image: {}", e);
        ClassifierError::Prediction(e.to_string())
    });
    Loadable::from_result(result, |e| AppError::from(e.clone()).user_message())
}

/// Read the photo at `path` and classify it.
pub async fn classify_file(backend: &BackendClient, path: &Path) -> Loadable<ClassificationResult> {
    let image = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("Failed to read image {:?}: {}", path, e);
            let err = ClassifierError::Read {
                path: path.to_path_buf(),
                kind: e.kind(),
                reason: e.to_string(),
            };
            return Loadable::Failed(AppError::from(err).user_message());
        }
    };

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("photo.jpg");
    classify_bytes(backend, image, file_name).await
}

/// Request a classification asynchronously.
/// Sends `PredictionDone` on the channel when complete.
pub fn request_classify(
    tx: &std::sync::mpsc::Sender<ClassifierServiceMessage>,
    runtime: &tokio::runtime::Handle,
    backend: Arc<BackendClient>,
    path: PathBuf,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = classify_file(&backend, &path).await;
        let _ = tx.send(ClassifierServiceMessage::PredictionDone(result));
    });
}
