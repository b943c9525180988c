//! Generative AI calls behind the AI studio panel.
//!
//! A panel submission is validated and turned into an [`AiCall`] by
//! [`prepare`], then run against a [`GenerativeBackend`] by [`dispatch`].
//! [`GeminiClient`] is the production backend.

pub mod error;
pub mod gemini;

use std::future::Future;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::ImageFormat;
use shared::{AiArtifact, AiMode, AiTaskRequest, ReferenceImage};

pub use error::AiError;
pub use gemini::{GeminiClient, GeminiConfig};

/// Prompt sent when a video is requested from an image alone
pub const DEFAULT_VIDEO_PROMPT: &str = "Animate this product";

/// Image ready to be embedded in a request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: String,
    /// Standard base64, no data URI prefix
    pub data: String,
}

impl EncodedImage {
    /// Sniff the format from the bytes and base64 encode them.
    /// Only PNG, JPEG and WebP are accepted.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AiError> {
        if bytes.is_empty() {
            return Err(AiError::UnsupportedImage("empty file".to_string()));
        }
        let format = image::guess_format(bytes)
            .map_err(|_| AiError::UnsupportedImage("unknown format".to_string()))?;
        match format {
            ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP => Ok(Self {
                mime_type: format.to_mime_type().to_string(),
                data: STANDARD.encode(bytes),
            }),
            other => Err(AiError::UnsupportedImage(format!("{other:?}"))),
        }
    }

    pub fn from_reference(image: &ReferenceImage) -> Result<Self, AiError> {
        Self::from_bytes(&image.bytes).map_err(|e| match e {
            AiError::UnsupportedImage(why) => {
                AiError::UnsupportedImage(format!("{} ({why})", image.file_name))
            }
            other => other,
        })
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Split a `data:<mime>;base64,<payload>` URI into MIME type and bytes
pub fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>), AiError> {
    let rest = uri.strip_prefix("data:").ok_or(AiError::InvalidDataUri)?;
    let (header, payload) = rest.split_once(',').ok_or(AiError::InvalidDataUri)?;
    let mime = header.strip_suffix(";base64").ok_or(AiError::InvalidDataUri)?;
    let bytes = STANDARD.decode(payload).map_err(|_| AiError::InvalidDataUri)?;
    Ok((mime.to_string(), bytes))
}

/// One outbound backend operation, fully validated
#[derive(Debug, Clone, PartialEq)]
pub enum AiCall {
    GenerateVideo {
        prompt: String,
        image: Option<EncodedImage>,
    },
    GenerateImage {
        prompt: String,
    },
    EditImage {
        image: EncodedImage,
        prompt: String,
    },
    Analyze {
        prompt: String,
    },
}

impl AiCall {
    pub fn mode(&self) -> AiMode {
        match self {
            AiCall::GenerateVideo { .. } => AiMode::Video,
            AiCall::GenerateImage { .. } => AiMode::Image,
            AiCall::EditImage { .. } => AiMode::Edit,
            AiCall::Analyze { .. } => AiMode::Analyze,
        }
    }
}

/// Validate a submission and encode its reference image.
///
/// The reference image is only read by the modes that accept one.
pub fn prepare(request: &AiTaskRequest) -> Result<AiCall, AiError> {
    let prompt = request.prompt.trim().to_string();
    let image = match &request.reference_image {
        Some(img) if request.mode.accepts_reference_image() => Some(EncodedImage::from_reference(img)?),
        _ => None,
    };

    Ok(match request.mode {
        AiMode::Video => {
            let prompt = if prompt.is_empty() && image.is_some() {
                DEFAULT_VIDEO_PROMPT.to_string()
            } else {
                prompt
            };
            AiCall::GenerateVideo { prompt, image }
        }
        AiMode::Image => AiCall::GenerateImage { prompt },
        AiMode::Edit => AiCall::EditImage {
            image: image.ok_or(AiError::MissingReferenceImage)?,
            prompt,
        },
        AiMode::Analyze => AiCall::Analyze { prompt },
    })
}

/// Remote generative model service
pub trait GenerativeBackend: Send + Sync + 'static {
    /// Returns a playable video URL
    fn generate_video(
        &self,
        prompt: &str,
        image: Option<&EncodedImage>,
    ) -> impl Future<Output = Result<String, AiError>> + Send;

    /// Returns an image data URI
    fn generate_image(&self, prompt: &str) -> impl Future<Output = Result<String, AiError>> + Send;

    /// Returns an image data URI
    fn edit_image(
        &self,
        image: &EncodedImage,
        prompt: &str,
    ) -> impl Future<Output = Result<String, AiError>> + Send;

    fn analyze(&self, prompt: &str) -> impl Future<Output = Result<String, AiError>> + Send;
}

/// Run exactly one backend operation for `call`
pub async fn dispatch<B: GenerativeBackend>(backend: &B, call: &AiCall) -> Result<AiArtifact, AiError> {
    match call {
        AiCall::GenerateVideo { prompt, image } => backend
            .generate_video(prompt, image.as_ref())
            .await
            .map(AiArtifact::VideoUrl),
        AiCall::GenerateImage { prompt } => backend
            .generate_image(prompt)
            .await
            .map(AiArtifact::ImageDataUri),
        AiCall::EditImage { image, prompt } => backend
            .edit_image(image, prompt)
            .await
            .map(AiArtifact::ImageDataUri),
        AiCall::Analyze { prompt } => backend.analyze(prompt).await.map(AiArtifact::Text),
    }
}
