//! Upload screening and rate limiting.
//!
//! Identity documents accept JPEG and PNG only. Gallery and avatar images
//! accept any `image/*` type. Both are capped at [`MAX_UPLOAD_BYTES`].

use kyc_types::{DocumentSlot, Timestamp};
use kyc_wizard::WizardSignal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::Clock;

/// 5 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Minimum gap between two accepted uploads.
pub const MIN_UPLOAD_INTERVAL_MS: u64 = 1000;

const DOCUMENT_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/jpg"];

/// Metadata of a file the user picked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadCandidate {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl UploadCandidate {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }
}

/// Why an upload was refused. `Display` is the message shown to the user.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UploadRejection {
    #[error("Please upload a valid image file (JPG, PNG)")]
    UnsupportedDocumentType,

    #[error("File size should not exceed {}", size_label(*max_bytes))]
    DocumentTooLarge { max_bytes: u64 },

    #[error("{0} is not an image file")]
    NotAnImage(String),

    #[error("{name} is too large (max {})", size_label(*max_bytes))]
    ImageTooLarge { name: String, max_bytes: u64 },

    #[error("Please wait before uploading another file")]
    RateLimited,
}

/// `5242880` → `"5MB"`, `1536` → `"1.5KB"`, `100` → `"100 bytes"`.
fn size_label(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    let (unit, scale) = if bytes >= MIB {
        ("MB", MIB)
    } else if bytes >= KIB {
        ("KB", KIB)
    } else {
        return format!("{bytes} bytes");
    };
    let tenths = (bytes * 10 + scale / 2) / scale;
    if tenths % 10 == 0 {
        format!("{}{unit}", tenths / 10)
    } else {
        format!("{}.{}{unit}", tenths / 10, tenths % 10)
    }
}

/// Screen an identity-document upload.
pub fn screen_document(candidate: &UploadCandidate, max_bytes: u64) -> Result<(), UploadRejection> {
    if !DOCUMENT_MIME_TYPES.contains(&candidate.mime_type.as_str()) {
        return Err(UploadRejection::UnsupportedDocumentType);
    }
    if candidate.size_bytes > max_bytes {
        return Err(UploadRejection::DocumentTooLarge { max_bytes });
    }
    Ok(())
}

/// Screen a gallery or avatar image.
pub fn screen_image(candidate: &UploadCandidate, max_bytes: u64) -> Result<(), UploadRejection> {
    if !candidate.mime_type.starts_with("image/") {
        return Err(UploadRejection::NotAnImage(candidate.name.clone()));
    }
    if candidate.size_bytes > max_bytes {
        return Err(UploadRejection::ImageTooLarge {
            name: candidate.name.clone(),
            max_bytes,
        });
    }
    Ok(())
}

/// Accepts at most one upload per interval. The first upload always passes.
pub struct UploadRateLimiter<C: Clock> {
    clock: C,
    min_interval_ms: u64,
    last_accepted: Option<Timestamp>,
}

impl<C: Clock> UploadRateLimiter<C> {
    pub fn new(clock: C, min_interval_ms: u64) -> Self {
        Self {
            clock,
            min_interval_ms,
            last_accepted: None,
        }
    }

    /// Record an upload attempt. Rejected attempts do not restart the interval.
    pub fn try_acquire(&mut self) -> Result<(), UploadRejection> {
        let now = self.clock.now();
        if let Some(last) = self.last_accepted {
            if last.elapsed_since(now) < self.min_interval_ms {
                return Err(UploadRejection::RateLimited);
            }
        }
        self.last_accepted = Some(now);
        Ok(())
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

/// Turns picked files into document-slot signals for the wizard.
pub struct DocumentIntake<C: Clock> {
    limiter: UploadRateLimiter<C>,
    max_bytes: u64,
}

impl<C: Clock> DocumentIntake<C> {
    pub fn new(clock: C, max_bytes: u64, min_interval_ms: u64) -> Self {
        Self {
            limiter: UploadRateLimiter::new(clock, min_interval_ms),
            max_bytes,
        }
    }

    pub fn with_defaults(clock: C) -> Self {
        Self::new(clock, MAX_UPLOAD_BYTES, MIN_UPLOAD_INTERVAL_MS)
    }

    /// Screen and rate-limit `candidate` for `slot`.
    pub fn accept(
        &mut self,
        slot: DocumentSlot,
        candidate: &UploadCandidate,
    ) -> Result<WizardSignal, UploadRejection> {
        if let Err(rejection) = screen_document(candidate, self.max_bytes) {
            warn!(%slot, file = %candidate.name, %rejection, "document rejected");
            return Err(rejection);
        }
        self.limiter.try_acquire()?;
        debug!(%slot, file = %candidate.name, bytes = candidate.size_bytes, "document accepted");
        Ok(WizardSignal::DocumentSlotChanged {
            slot,
            present: true,
        })
    }

    /// The user cleared `slot`.
    pub fn remove(&self, slot: DocumentSlot) -> WizardSignal {
        WizardSignal::DocumentSlotChanged {
            slot,
            present: false,
        }
    }
}
