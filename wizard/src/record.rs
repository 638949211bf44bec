//! Verification record and document upload state.

use std::collections::BTreeMap;

use kyc_types::{DocumentSlot, VerificationCheck};
use serde::Serialize;

/// Which verification checks have been satisfied in this session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VerificationRecord {
    checks: BTreeMap<VerificationCheck, bool>,
}

impl Default for VerificationRecord {
    fn default() -> Self {
        Self {
            checks: VerificationCheck::ALL.into_iter().map(|c| (c, false)).collect(),
        }
    }
}

impl VerificationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_satisfied(&self, check: VerificationCheck) -> bool {
        self.checks.get(&check).copied().unwrap_or(false)
    }

    /// Mark a check satisfied. Returns `true` if it was not already.
    pub fn satisfy(&mut self, check: VerificationCheck) -> bool {
        !std::mem::replace(self.checks.entry(check).or_insert(false), true)
    }

    /// Unset a check. Returns `true` if it was satisfied.
    pub fn revoke(&mut self, check: VerificationCheck) -> bool {
        std::mem::replace(self.checks.entry(check).or_insert(false), false)
    }

    pub fn all_satisfied(&self) -> bool {
        self.checks.values().all(|&v| v)
    }

    pub fn satisfied_count(&self) -> usize {
        self.checks.values().filter(|&&v| v).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VerificationCheck, bool)> + '_ {
        self.checks.iter().map(|(&c, &v)| (c, v))
    }
}

/// Presence of each uploaded document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DocumentUploadState {
    slots: BTreeMap<DocumentSlot, bool>,
}

impl Default for DocumentUploadState {
    fn default() -> Self {
        Self {
            slots: DocumentSlot::ALL.into_iter().map(|s| (s, false)).collect(),
        }
    }
}

impl DocumentUploadState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the presence of `slot` changed.
    pub fn set(&mut self, slot: DocumentSlot, present: bool) -> bool {
        std::mem::replace(self.slots.entry(slot).or_insert(false), present) != present
    }

    pub fn is_present(&self, slot: DocumentSlot) -> bool {
        self.slots.get(&slot).copied().unwrap_or(false)
    }

    pub fn all_present(&self) -> bool {
        DocumentSlot::ALL.into_iter().all(|s| self.is_present(s))
    }

    pub fn missing(&self) -> Vec<DocumentSlot> {
        DocumentSlot::ALL
            .into_iter()
            .filter(|&s| !self.is_present(s))
            .collect()
    }
}
