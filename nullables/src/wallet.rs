//! Nullable wallet: an in-memory profile contract.

use std::collections::HashMap;
use std::sync::Mutex;

use kyc_services::{Balances, KycStatus, ServiceError, UserProfile, WalletProvider};

use crate::lock;

#[derive(Default)]
struct WalletState {
    accounts: Vec<String>,
    profiles: HashMap<String, UserProfile>,
    kyc: HashMap<String, KycStatus>,
    balances: HashMap<String, Balances>,
    galleries: HashMap<String, Vec<String>>,
    balances_fail: bool,
}

/// A wallet whose contract state lives in memory.
///
/// Unknown addresses read as an empty profile, `NotSubmitted` and zero balances.
#[derive(Default)]
pub struct NullWallet {
    state: Mutex<WalletState>,
}

impl NullWallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accounts the wallet grants access to.
    pub fn with_accounts(self, accounts: &[&str]) -> Self {
        lock(&self.state).accounts = accounts.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_profile(self, address: &str, profile: UserProfile) -> Self {
        lock(&self.state).profiles.insert(address.to_string(), profile);
        self
    }

    pub fn with_kyc_status(self, address: &str, status: KycStatus) -> Self {
        lock(&self.state).kyc.insert(address.to_string(), status);
        self
    }

    pub fn with_balances(self, address: &str, balances: Balances) -> Self {
        lock(&self.state).balances.insert(address.to_string(), balances);
        self
    }

    /// Make balance queries fail.
    pub fn fail_balances(&self, fail: bool) {
        lock(&self.state).balances_fail = fail;
    }

    pub fn profile(&self, address: &str) -> UserProfile {
        lock(&self.state)
            .profiles
            .get(address)
            .cloned()
            .unwrap_or_default()
    }

    fn update_profile(&self, address: &str, f: impl FnOnce(&mut UserProfile)) {
        let mut state = lock(&self.state);
        f(state.profiles.entry(address.to_string()).or_default());
    }
}

impl WalletProvider for NullWallet {
    async fn request_accounts(&self) -> Result<Vec<String>, ServiceError> {
        Ok(lock(&self.state).accounts.clone())
    }

    async fn user_profile(&self, address: &str) -> Result<UserProfile, ServiceError> {
        Ok(self.profile(address))
    }

    async fn kyc_status(&self, address: &str) -> Result<KycStatus, ServiceError> {
        Ok(lock(&self.state).kyc.get(address).copied().unwrap_or_default())
    }

    async fn balances(&self, address: &str) -> Result<Balances, ServiceError> {
        let state = lock(&self.state);
        if state.balances_fail {
            return Err(ServiceError::Wallet("balance call reverted".into()));
        }
        Ok(state.balances.get(address).copied().unwrap_or_default())
    }

    async fn gallery(&self, address: &str) -> Result<Vec<String>, ServiceError> {
        Ok(lock(&self.state)
            .galleries
            .get(address)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_gallery_image(&self, address: &str, image_url: &str) -> Result<(), ServiceError> {
        lock(&self.state)
            .galleries
            .entry(address.to_string())
            .or_default()
            .push(image_url.to_string());
        Ok(())
    }

    async fn remove_gallery_image(&self, address: &str, image_url: &str) -> Result<(), ServiceError> {
        let mut state = lock(&self.state);
        let gallery = state.galleries.entry(address.to_string()).or_default();
        let before = gallery.len();
        gallery.retain(|url| url != image_url);
        if gallery.len() == before {
            return Err(ServiceError::NotFound(image_url.to_string()));
        }
        Ok(())
    }

    async fn set_avatar(&self, address: &str, image_url: &str) -> Result<(), ServiceError> {
        self.update_profile(address, |p| p.avatar_url = Some(image_url.to_string()));
        Ok(())
    }

    async fn set_mfa_enabled(&self, address: &str, enabled: bool) -> Result<(), ServiceError> {
        self.update_profile(address, |p| p.mfa_enabled = enabled);
        Ok(())
    }

    async fn set_notifications_enabled(&self, address: &str, enabled: bool) -> Result<(), ServiceError> {
        self.update_profile(address, |p| p.notifications_enabled = enabled);
        Ok(())
    }
}
