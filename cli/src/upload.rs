//! Screening of local files as document uploads.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use kyc_services::{Clock, DocumentIntake, UploadCandidate};
use kyc_types::DocumentSlot;
use serde::Serialize;

/// A `slot=path` argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotFile {
    pub slot: DocumentSlot,
    pub path: PathBuf,
}

impl FromStr for SlotFile {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (slot, path) = s
            .split_once('=')
            .with_context(|| format!("expected SLOT=PATH, got {s:?}"))?;
        Ok(Self {
            slot: slot.trim().parse()?,
            path: PathBuf::from(path.trim()),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct UploadReport {
    pub slot: DocumentSlot,
    pub file: String,
    pub accepted: bool,
    /// Message shown to the user when the file is refused.
    pub message: Option<String>,
}

/// MIME type a browser would report for the file's extension.
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

pub fn candidate_for(path: &Path) -> anyhow::Result<UploadCandidate> {
    let meta = std::fs::metadata(path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(UploadCandidate::new(name, mime_for(path), meta.len()))
}

/// Offer each file to `intake` in order, as a user picking them one after another would.
pub fn check_files<C: Clock>(
    intake: &mut DocumentIntake<C>,
    files: &[SlotFile],
) -> anyhow::Result<Vec<UploadReport>> {
    let mut reports = Vec::with_capacity(files.len());
    for entry in files {
        let candidate = candidate_for(&entry.path)?;
        let outcome = intake.accept(entry.slot, &candidate);
        reports.push(UploadReport {
            slot: entry.slot,
            file: candidate.name,
            accepted: outcome.is_ok(),
            message: outcome.err().map(|e| e.to_string()),
        });
    }
    Ok(reports)
}
