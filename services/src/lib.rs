//! Collaborators of the KYC wizard.
//!
//! Everything the wizard does not do itself lives behind a capability trait:
//! - [`BankLookupService`]: IFSC code lookup (public HTTP API)
//! - [`MarketDataSource`]: token market data (public HTTP API)
//! - [`WalletProvider`]: the injected wallet and its assumed profile contract
//! - [`BiometricScanner`]: simulated fingerprint capture
//! - [`SubmissionTransport`]: receives the validated form
//!
//! Plus the helpers that turn browser-side results into wizard signals:
//! upload screening, device fingerprinting and geolocation results.

pub mod bank;
pub mod biometric;
pub mod clock;
pub mod config;
pub mod device;
pub mod error;
pub mod location;
pub mod market;
pub mod transport;
pub mod upload;
pub mod wallet;

pub use bank::{is_valid_ifsc, BankLookupService, IfscDetails, RazorpayIfscClient};
pub use biometric::{BiometricOutcome, BiometricScanner, EntropySource, SimulatedBiometric, ThreadEntropy};
pub use clock::{Clock, SystemClock};
pub use config::ServicesConfig;
pub use device::{ConnectionInfo, DeviceProfile, DeviceType, OperatingSystem};
pub use error::ServiceError;
pub use location::{GeolocationFailure, LocationFix};
pub use market::{CoinGeckoClient, MarketDataSource, MarketSnapshot};
pub use transport::{HttpSubmissionTransport, LogOnlyTransport, SubmissionTransport};
pub use upload::{DocumentIntake, UploadCandidate, UploadRateLimiter, UploadRejection};
pub use wallet::{Balances, KycStatus, ProfileService, ProfileView, UserProfile, WalletProvider};
