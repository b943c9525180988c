//! AI studio panel controller.
//!
//! Owns the form inputs and the single in-flight request. The request runs on
//! the application's tokio runtime and reports back over a oneshot channel,
//! polled once per frame by [`AiPanelState::poll_responses`].

use std::path::Path;
use std::sync::Arc;

use shared::{AiArtifact, AiMode, AiTaskRequest, AiTaskResult, ReferenceImage};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use uuid::Uuid;

use crate::ai::{self, AiError, GenerativeBackend};
use crate::i18n::t;

type Outcome = Result<AiArtifact, AiError>;

/// Where the panel is in its request cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PanelStatus {
    #[default]
    Idle,
    Pending {
        request_id: Uuid,
        mode: AiMode,
    },
    Success(AiTaskResult),
    /// User-facing failure message
    Failed(String),
}

/// Decoded bytes of an image result, keyed for egui's loaders by `uri`
#[derive(Debug, Clone, PartialEq)]
pub struct ResultImage {
    pub uri: String,
    pub bytes: Arc<[u8]>,
}

#[derive(Default)]
pub struct AiPanelState {
    pub mode: AiMode,
    pub prompt: String,
    pub reference_image: Option<ReferenceImage>,
    status: PanelStatus,
    pending: Option<oneshot::Receiver<Outcome>>,
    /// Bumped whenever the displayed status settles
    generation: u64,
    image: Option<ResultImage>,
    /// URIs of replaced images, still cached by egui
    retired_images: Vec<String>,
}

impl AiPanelState {
    pub fn status(&self) -> &PanelStatus {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn result(&self) -> Option<&AiTaskResult> {
        match &self.status {
            PanelStatus::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            PanelStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Image of the current result, decoded once when the request settled
    pub fn result_image(&self) -> Option<&ResultImage> {
        self.image.as_ref()
    }

    /// URIs of images no longer displayed. Each one is returned once.
    pub fn take_retired_images(&mut self) -> Vec<String> {
        std::mem::take(&mut self.retired_images)
    }

    /// Snapshot of the form
    pub fn request(&self) -> AiTaskRequest {
        AiTaskRequest {
            mode: self.mode,
            prompt: self.prompt.clone(),
            reference_image: self.reference_image.clone(),
        }
    }

    pub fn set_reference_image(&mut self, file_name: impl Into<String>, bytes: Vec<u8>) {
        self.reference_image = Some(ReferenceImage {
            file_name: file_name.into(),
            bytes,
        });
    }

    /// Read a reference image from disk. A read failure is also shown in the
    /// panel unless a request is in flight.
    pub fn load_reference_image(&mut self, path: &Path) -> Result<(), String> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                let msg = format!("{}: {e}", path.display());
                tracing::warn!("Failed to read reference image: {msg}");
                if !self.is_pending() {
                    self.finish(PanelStatus::Failed(msg.clone()));
                }
                return Err(msg);
            }
        };
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        tracing::info!("Reference image loaded: {file_name} ({} bytes)", bytes.len());
        self.set_reference_image(file_name, bytes);
        Ok(())
    }

    pub fn clear_reference_image(&mut self) {
        self.reference_image = None;
    }

    /// Validate the form and start exactly one backend call.
    ///
    /// Rejected with [`AiError::Busy`] while a request is outstanding; the
    /// displayed status is left alone in that case. Any other validation
    /// failure is shown in the panel and nothing is sent.
    pub fn submit<B: GenerativeBackend>(
        &mut self,
        runtime: &Handle,
        backend: Arc<B>,
    ) -> Result<Uuid, AiError> {
        if self.is_pending() {
            tracing::warn!("AI task rejected, a request is already in progress");
            return Err(AiError::Busy);
        }

        let call = match ai::prepare(&self.request()) {
            Ok(call) => call,
            Err(e) => {
                self.reject(&e);
                return Err(e);
            }
        };

        let request_id = Uuid::new_v4();
        let mode = call.mode();
        tracing::info!("AI task {request_id} submitted ({mode:?})");

        let (tx, rx) = oneshot::channel();
        runtime.spawn(async move {
            let outcome = ai::dispatch(backend.as_ref(), &call).await;
            let _ = tx.send(outcome);
        });

        self.pending = Some(rx);
        self.status = PanelStatus::Pending { request_id, mode };
        Ok(request_id)
    }

    /// Show a failure that happened before dispatch (e.g. no backend configured)
    pub fn reject(&mut self, err: &AiError) {
        if self.is_pending() {
            return;
        }
        tracing::warn!("AI task not sent: {err}");
        self.finish(PanelStatus::Failed(describe(err)));
    }

    /// Pick up a finished request. Returns `true` if the status changed.
    pub fn poll_responses(&mut self) -> bool {
        let Some(rx) = self.pending.as_mut() else {
            return false;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Closed) => Err(AiError::TaskDropped),
        };
        self.pending = None;
        self.settle(outcome);
        true
    }

    /// Wait for the outstanding request, if any, and apply its outcome
    pub async fn wait(&mut self) -> bool {
        let Some(rx) = self.pending.take() else {
            return false;
        };
        let outcome = rx.await.unwrap_or_else(|_| Err(AiError::TaskDropped));
        self.settle(outcome);
        true
    }

    fn settle(&mut self, outcome: Outcome) {
        let (request_id, mode) = match &self.status {
            PanelStatus::Pending { request_id, mode } => (*request_id, *mode),
            _ => (Uuid::nil(), self.mode),
        };

        let mut decoded = None;
        let outcome = match outcome {
            Ok(AiArtifact::ImageDataUri(uri)) => match ai::decode_data_uri(&uri) {
                Ok((_, bytes)) => {
                    decoded = Some(Arc::<[u8]>::from(bytes));
                    Ok(AiArtifact::ImageDataUri(uri))
                }
                Err(e) => Err(e),
            },
            other => other,
        };

        let status = match outcome {
            Ok(artifact) => {
                tracing::info!("AI task {request_id} succeeded");
                let artifact = match artifact {
                    AiArtifact::Text(text) if text.trim().is_empty() => {
                        AiArtifact::Text(t("ai.task_done").to_string())
                    }
                    other => other,
                };
                PanelStatus::Success(AiTaskResult { mode, artifact })
            }
            Err(e) => {
                tracing::error!("AI task {request_id} failed: {e}");
                PanelStatus::Failed(describe(&e))
            }
        };
        self.finish(status);
        self.image = decoded.map(|bytes| ResultImage {
            uri: format!("bytes://ai-result-{}", self.generation),
            bytes,
        });
    }

    /// Replace the displayed status, retiring the previous image
    fn finish(&mut self, status: PanelStatus) {
        if let Some(old) = self.image.take() {
            self.retired_images.push(old.uri);
        }
        self.status = status;
        self.generation += 1;
    }
}

/// Message shown in the panel for an error
pub fn describe(err: &AiError) -> String {
    match err {
        AiError::MissingReferenceImage => t("ai.missing_image").to_string(),
        other => {
            let msg = other.to_string();
            if msg.trim().is_empty() {
                t("ai.generic_error").to_string()
            } else {
                msg
            }
        }
    }
}
