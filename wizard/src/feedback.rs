//! Per-field error state and the assistive-technology live region.

use std::collections::{BTreeMap, VecDeque};

use kyc_types::FieldId;

use crate::error::ValidationError;

/// Announcements kept for the live region; older ones are dropped.
pub const LIVE_REGION_CAPACITY: usize = 16;

/// Error markers a presentation layer renders next to each field.
#[derive(Clone, Debug, Default)]
pub struct FieldFeedback {
    errors: BTreeMap<FieldId, ValidationError>,
    step_block: Option<ValidationError>,
    announcements: VecDeque<String>,
}

impl FieldFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a field invalid. Replaces any message already attached to it.
    pub fn show_error(&mut self, field: FieldId, error: ValidationError) {
        self.announce(error.to_string());
        self.errors.insert(field, error);
    }

    /// Remove the marker from a field. Returns `true` if it had one.
    pub fn clear(&mut self, field: &FieldId) -> bool {
        self.errors.remove(field).is_some()
    }

    /// Block the step as a whole (not tied to one field).
    pub fn block_step(&mut self, error: ValidationError) {
        self.announce(error.to_string());
        self.step_block = Some(error);
    }

    /// Drop the markers of the given fields and any step block.
    pub fn clear_step<'a>(&mut self, fields: impl IntoIterator<Item = &'a FieldId>) {
        for field in fields {
            self.errors.remove(field);
        }
        self.step_block = None;
    }

    pub fn error(&self, field: &FieldId) -> Option<&ValidationError> {
        self.errors.get(field)
    }

    pub fn errors(&self) -> &BTreeMap<FieldId, ValidationError> {
        &self.errors
    }

    pub fn step_block(&self) -> Option<&ValidationError> {
        self.step_block.as_ref()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || self.step_block.is_some()
    }

    /// Announcements in the order they were made, oldest first.
    pub fn announcements(&self) -> impl Iterator<Item = &str> {
        self.announcements.iter().map(String::as_str)
    }

    pub fn take_announcements(&mut self) -> Vec<String> {
        self.announcements.drain(..).collect()
    }

    fn announce(&mut self, message: String) {
        if self.announcements.len() == LIVE_REGION_CAPACITY {
            self.announcements.pop_front();
        }
        self.announcements.push_back(message);
    }
}
