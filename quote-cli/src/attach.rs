//! Background task for attaching a payment QR image.
//!
//! The file dialog and the file read run on a spawned thread so the
//! interaction loop never blocks on them. The completion is tagged with the
//! generation token captured at launch; by the time it lands the operator may
//! have moved on, in which case the result is discarded unapplied.

use std::fs;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use rfd::FileDialog;
use tracing::debug;

/// What a finished pick produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachOutcome {
    /// An image was picked and encoded as a data URI.
    Picked(String),
    /// The operator dismissed the dialog.
    Cancelled,
    /// A file was picked but could not be read.
    Failed(String),
}

/// Handle to a pick in flight.
pub struct AttachTask {
    generation: u64,
    receiver: mpsc::Receiver<AttachOutcome>,
}

impl AttachTask {
    /// The generation token captured when the pick was launched.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Takes the outcome if the worker has finished, without blocking.
    pub fn try_take(&self) -> Option<AttachOutcome> {
        self.receiver.try_recv().ok()
    }
}

/// Opens the image picker on a background thread.
pub fn pick_qr_image(generation: u64) -> AttachTask {
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        let outcome = match FileDialog::new()
            .set_title("Select payment QR image")
            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp", "bmp"])
            .pick_file()
        {
            Some(path) => match read_image_data_uri(&path) {
                Ok(uri) => AttachOutcome::Picked(uri),
                Err(e) => AttachOutcome::Failed(format!("{e:#}")),
            },
            None => AttachOutcome::Cancelled,
        };
        // The receiver is gone when the task was abandoned.
        if sender.send(outcome).is_err() {
            debug!("QR pick finished after the task was dropped");
        }
    });

    AttachTask {
        generation,
        receiver,
    }
}

/// Reads an image file and encodes it as a `data:` URI.
pub fn read_image_data_uri(path: &Path) -> anyhow::Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("reading image {}", path.display()))?;
    debug!(path = %path.display(), size = bytes.len(), "read QR image");
    Ok(format!(
        "data:{};base64,{}",
        mime_for(path),
        BASE64.encode(&bytes)
    ))
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
