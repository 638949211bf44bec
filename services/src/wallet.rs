//! Wallet-backed user profile.
//!
//! The wallet is an injected provider (a browser extension in production)
//! plus a profile contract whose interface is assumed, not specified. All
//! of that sits behind [`WalletProvider`]; [`ProfileService`] turns its
//! answers into what the profile page shows.

use std::future::Future;

use kyc_types::Timestamp;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::market::format_usd;
use crate::upload::{screen_image, UploadCandidate, MAX_UPLOAD_BYTES};
use crate::ServiceError;

const DEFAULT_USERNAME: &str = "Anonymous";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Empty when the user never set one.
    #[serde(default)]
    pub username: String,
    /// Seconds since the Unix epoch.
    pub join_date: u64,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub mfa_enabled: bool,
    #[serde(default)]
    pub notifications_enabled: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    #[default]
    NotSubmitted,
    Pending,
    Verified,
    Rejected,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Balances {
    pub total: f64,
    pub collateral: f64,
    pub borrowed: f64,
}

/// Accounts and profile contract behind the injected wallet.
pub trait WalletProvider {
    /// Ask the wallet for account access. The first account is the active one.
    fn request_accounts(&self) -> impl Future<Output = Result<Vec<String>, ServiceError>> + Send;

    fn user_profile(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<UserProfile, ServiceError>> + Send;

    fn kyc_status(&self, address: &str)
        -> impl Future<Output = Result<KycStatus, ServiceError>> + Send;

    fn balances(&self, address: &str) -> impl Future<Output = Result<Balances, ServiceError>> + Send;

    fn gallery(&self, address: &str)
        -> impl Future<Output = Result<Vec<String>, ServiceError>> + Send;

    fn add_gallery_image(
        &self,
        address: &str,
        image_url: &str,
    ) -> impl Future<Output = Result<(), ServiceError>> + Send;

    fn remove_gallery_image(
        &self,
        address: &str,
        image_url: &str,
    ) -> impl Future<Output = Result<(), ServiceError>> + Send;

    fn set_avatar(
        &self,
        address: &str,
        image_url: &str,
    ) -> impl Future<Output = Result<(), ServiceError>> + Send;

    fn set_mfa_enabled(
        &self,
        address: &str,
        enabled: bool,
    ) -> impl Future<Output = Result<(), ServiceError>> + Send;

    fn set_notifications_enabled(
        &self,
        address: &str,
        enabled: bool,
    ) -> impl Future<Output = Result<(), ServiceError>> + Send;
}

/// What the profile page renders.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProfileView {
    pub address: String,
    pub short_address: String,
    pub username: String,
    /// Avatar fallback text.
    pub initials: String,
    pub joined: Timestamp,
    pub kyc_status: KycStatus,
    /// `None` when balances could not be fetched.
    pub total_balance: Option<String>,
    pub collateral_value: Option<String>,
    pub borrowed_amount: Option<String>,
    pub avatar_url: Option<String>,
    pub gallery: Vec<String>,
    pub mfa_enabled: bool,
    pub notifications_enabled: bool,
}

/// `0x1234567890abcdef` → `0x1234...cdef`. Short inputs are returned as is.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Up to two uppercase initials from the display name.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Drives a [`WalletProvider`] for the active account.
pub struct ProfileService<W> {
    wallet: W,
    account: Option<String>,
    max_upload_bytes: u64,
}

impl<W: WalletProvider> ProfileService<W> {
    pub fn new(wallet: W) -> Self {
        Self {
            wallet,
            account: None,
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: u64) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    fn active_account(&self) -> Result<&str, ServiceError> {
        self.account.as_deref().ok_or(ServiceError::NoAccount)
    }

    /// Request account access and remember the first account.
    pub async fn connect(&mut self) -> Result<String, ServiceError> {
        let accounts = self.wallet.request_accounts().await?;
        let account = accounts.into_iter().next().ok_or(ServiceError::NoAccount)?;
        info!(account = %short_address(&account), "wallet connected");
        self.account = Some(account.clone());
        Ok(account)
    }

    /// The wallet switched accounts. An empty list disconnects.
    pub async fn accounts_changed(&mut self, accounts: Vec<String>) -> Result<ProfileView, ServiceError> {
        match accounts.into_iter().next() {
            Some(account) => {
                debug!(account = %short_address(&account), "active account changed");
                self.account = Some(account);
                self.load().await
            }
            None => {
                warn!("wallet reported no accounts");
                self.account = None;
                Err(ServiceError::NoAccount)
            }
        }
    }

    /// Load everything the profile page shows. A balance failure is logged
    /// and leaves the balance fields empty; everything else propagates.
    pub async fn load(&self) -> Result<ProfileView, ServiceError> {
        let address = self.active_account()?;
        let profile = self.wallet.user_profile(address).await?;
        let kyc_status = self.wallet.kyc_status(address).await?;
        let gallery = self.wallet.gallery(address).await?;
        let balances = match self.wallet.balances(address).await {
            Ok(b) => Some(b),
            Err(e) => {
                warn!(error = %e, "failed to fetch balances");
                None
            }
        };

        let username = if profile.username.trim().is_empty() {
            DEFAULT_USERNAME.to_string()
        } else {
            profile.username
        };

        Ok(ProfileView {
            address: address.to_string(),
            short_address: short_address(address),
            initials: initials(&username),
            username,
            joined: Timestamp::from_secs(profile.join_date),
            kyc_status,
            total_balance: balances.map(|b| format_usd(b.total)),
            collateral_value: balances.map(|b| format_usd(b.collateral)),
            borrowed_amount: balances.map(|b| format_usd(b.borrowed)),
            avatar_url: profile.avatar_url,
            gallery,
            mfa_enabled: profile.mfa_enabled,
            notifications_enabled: profile.notifications_enabled,
        })
    }

    pub async fn set_mfa_enabled(&self, enabled: bool) -> Result<(), ServiceError> {
        let address = self.active_account()?;
        self.wallet.set_mfa_enabled(address, enabled).await?;
        info!(enabled, "MFA setting updated");
        Ok(())
    }

    pub async fn set_notifications_enabled(&self, enabled: bool) -> Result<(), ServiceError> {
        let address = self.active_account()?;
        self.wallet.set_notifications_enabled(address, enabled).await?;
        info!(enabled, "notification setting updated");
        Ok(())
    }

    /// Screen `candidate`, then record its uploaded URL as the avatar.
    pub async fn set_avatar(
        &self,
        candidate: &UploadCandidate,
        image_url: &str,
    ) -> Result<(), ServiceError> {
        let address = self.active_account()?;
        screen_image(candidate, self.max_upload_bytes)?;
        self.wallet.set_avatar(address, image_url).await
    }

    /// Screen `candidate`, then add its uploaded URL to the gallery.
    pub async fn add_gallery_image(
        &self,
        candidate: &UploadCandidate,
        image_url: &str,
    ) -> Result<(), ServiceError> {
        let address = self.active_account()?;
        screen_image(candidate, self.max_upload_bytes)?;
        self.wallet.add_gallery_image(address, image_url).await?;
        debug!(file = %candidate.name, "gallery image added");
        Ok(())
    }

    pub async fn remove_gallery_image(&self, image_url: &str) -> Result<(), ServiceError> {
        let address = self.active_account()?;
        self.wallet.remove_gallery_image(address, image_url).await
    }
}
