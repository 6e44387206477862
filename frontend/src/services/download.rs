//! Browser helpers for exposing the generated prompt.

use web_sys::{Blob, BlobPropertyBag, Url};

use crate::types::{AppError, AppResult, ResponseArtifact};

/// Wrap the artifact in a `Blob` and return an object URL for it.
///
/// The URL lives as long as the document; it is never revoked.
pub fn create_object_url(artifact: &ResponseArtifact) -> AppResult<String> {
    let bytes = js_sys::Uint8Array::from(artifact.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);

    let options = BlobPropertyBag::new();
    if let Some(content_type) = &artifact.content_type {
        options.set_type(content_type);
    }

    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| AppError::Dom(format!("Failed to create Blob: {:?}", e)))?;

    Url::create_object_url_with_blob(&blob)
        .map_err(|e| AppError::Dom(format!("Failed to create object URL: {:?}", e)))
}

/// Blocking `window.alert`.
pub fn alert(message: &str) -> AppResult<()> {
    let window = web_sys::window().ok_or_else(|| AppError::Dom("no global window".into()))?;
    window
        .alert_with_message(message)
        .map_err(|e| AppError::Dom(format!("alert failed: {:?}", e)))
}
