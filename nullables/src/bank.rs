//! Nullable IFSC lookup: a fixed directory of branches.

use std::collections::HashMap;
use std::sync::Mutex;

use kyc_services::{is_valid_ifsc, BankLookupService, IfscDetails, ServiceError};

use crate::lock;

/// Answers from an in-memory table and records every code it was asked about.
#[derive(Default)]
pub struct NullBankLookup {
    branches: HashMap<String, IfscDetails>,
    lookups: Mutex<Vec<String>>,
}

impl NullBankLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_branch(mut self, code: &str, details: IfscDetails) -> Self {
        self.branches.insert(code.to_string(), details);
        self
    }

    /// Codes that reached the lookup (malformed codes never do).
    pub fn lookups(&self) -> Vec<String> {
        lock(&self.lookups).clone()
    }
}

impl BankLookupService for NullBankLookup {
    async fn lookup(&self, code: &str) -> Result<IfscDetails, ServiceError> {
        if !is_valid_ifsc(code) {
            return Err(ServiceError::InvalidIfsc(code.to_string()));
        }
        lock(&self.lookups).push(code.to_string());
        self.branches
            .get(code)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(code.to_string()))
    }
}
