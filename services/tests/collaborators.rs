//! Collaborators driven against nullable infrastructure.

use std::time::Duration;

use kyc_nullables::{
    NullBankLookup, NullClock, NullEntropy, NullMarketData, NullTransport, NullWallet,
};
use kyc_services::location::location_signal;
use kyc_services::{
    Balances, BankLookupService, BiometricScanner, DeviceProfile, DocumentIntake, IfscDetails,
    KycStatus, LocationFix, MarketDataSource, MarketSnapshot, ProfileService, ServiceError,
    SimulatedBiometric, SubmissionTransport, UploadCandidate, UploadRateLimiter, UploadRejection,
    UserProfile,
};
use kyc_types::{DocumentSlot, FieldId, VerificationCheck};
use kyc_wizard::{VerificationWizard, WizardEvent, WizardSignal};

const ACCOUNT: &str = "0x1234567890abcdef1234567890abcdef12345678";

fn branch() -> IfscDetails {
    IfscDetails {
        bank: "HDFC Bank".into(),
        branch: "Koregaon Park".into(),
        address: "Lane 5, Koregaon Park".into(),
        city: "PUNE".into(),
        state: "MAHARASHTRA".into(),
    }
}

fn png(name: &str) -> UploadCandidate {
    UploadCandidate::new(name, "image/png", 200 * 1024)
}

fn change(field: FieldId, value: &str) -> WizardSignal {
    WizardSignal::FieldChanged {
        field,
        value: value.to_string(),
    }
}

// ── Bank lookup ────────────────────────────────────────────────────────

#[tokio::test]
async fn known_ifsc_resolves() {
    let bank = NullBankLookup::new().with_branch("HDFC0ABC123", branch());
    let details = bank.lookup("HDFC0ABC123").await.unwrap();
    assert_eq!(details.bank, "HDFC Bank");
    assert_eq!(bank.lookups(), vec!["HDFC0ABC123".to_string()]);
}

#[tokio::test]
async fn unknown_ifsc_is_not_found() {
    let bank = NullBankLookup::new();
    let err = bank.lookup("SBIN0000001").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn malformed_ifsc_never_reaches_lookup() {
    let bank = NullBankLookup::new().with_branch("HDFC0ABC123", branch());
    let err = bank.lookup("hdfc0abc123").await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidIfsc(_)));
    assert!(bank.lookups().is_empty());
}

// ── Market data ────────────────────────────────────────────────────────

#[tokio::test]
async fn market_snapshot_and_outage() {
    let snapshot = MarketSnapshot {
        price_usd: 0.05,
        price_change_pct_24h: 1.2,
        market_cap_usd: 50_000_000.0,
        volume_usd: 1_000_000.0,
        circulating_supply: 1_000_000_000.0,
        market_cap_change_24h: 10_000.0,
        volume_change_24h: None,
        sparkline_7d: vec![0.049, 0.05],
    };
    let market = NullMarketData::new(snapshot.clone());
    let fetched = market.snapshot().await.unwrap();
    assert_eq!(fetched, snapshot);
    assert_eq!(fetched.sparkline_labels(), vec!["1h", "2h"]);

    market.set(None);
    assert!(matches!(market.snapshot().await, Err(ServiceError::Http(_))));
}

// ── Uploads ────────────────────────────────────────────────────────────

#[test]
fn rate_limiter_enforces_interval() {
    let clock = NullClock::new(10_000);
    let mut limiter = UploadRateLimiter::new(&clock, 1000);

    assert!(limiter.try_acquire().is_ok());
    clock.advance(999);
    assert_eq!(limiter.try_acquire(), Err(UploadRejection::RateLimited));
    clock.advance(1);
    assert!(limiter.try_acquire().is_ok());
}

#[test]
fn rejected_attempt_does_not_restart_interval() {
    let clock = NullClock::new(0);
    let mut limiter = UploadRateLimiter::new(&clock, 1000);
    limiter.try_acquire().unwrap();
    clock.advance(600);
    assert!(limiter.try_acquire().is_err());
    clock.advance(400);
    assert!(limiter.try_acquire().is_ok());
}

#[test]
fn intake_feeds_document_slots_into_wizard() {
    let clock = NullClock::new(0);
    let mut intake = DocumentIntake::with_defaults(&clock);
    let mut wizard = VerificationWizard::kyc();

    wizard
        .handle(change(FieldId::AadharNumber, "123456789012"))
        .unwrap();
    wizard.handle(change(FieldId::PanNumber, "ABCDE1234F")).unwrap();

    for slot in DocumentSlot::ALL {
        let signal = intake.accept(slot, &png(slot.as_str())).unwrap();
        wizard.handle(signal).unwrap();
        clock.advance(1000);
    }
    assert!(wizard.record().is_satisfied(VerificationCheck::Documents));

    wizard.handle(intake.remove(DocumentSlot::PanCard)).unwrap();
    assert!(!wizard.record().is_satisfied(VerificationCheck::Documents));
}

#[test]
fn intake_rejects_bad_files_without_signalling() {
    let clock = NullClock::new(0);
    let mut intake = DocumentIntake::with_defaults(&clock);

    let gif = UploadCandidate::new("front.gif", "image/gif", 10);
    assert_eq!(
        intake.accept(DocumentSlot::AadharFront, &gif),
        Err(UploadRejection::UnsupportedDocumentType)
    );

    // The rejected file did not start the rate-limit interval.
    assert!(intake.accept(DocumentSlot::AadharFront, &png("front.png")).is_ok());
    assert_eq!(
        intake.accept(DocumentSlot::AadharBack, &png("back.png")),
        Err(UploadRejection::RateLimited)
    );
}

// ── Biometrics ─────────────────────────────────────────────────────────

#[tokio::test]
async fn biometric_follows_scripted_draws() {
    let scanner = SimulatedBiometric::new(NullEntropy::new(vec![0.2, 0.95]), 0.7)
        .unwrap()
        .with_scan_delay(Duration::ZERO);
    assert!(scanner.scan().await.is_captured());
    let failed = scanner.scan().await;
    assert!(!failed.is_captured());
    assert_eq!(failed.message(), "Failed to capture fingerprint. Please try again.");
}

// ── Device and location ────────────────────────────────────────────────

#[test]
fn device_and_location_reports_satisfy_checks() {
    let mut wizard = VerificationWizard::kyc();
    let ua = "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";

    wizard
        .handle(DeviceProfile::from_user_agent(ua, 1280, 800).into_signal())
        .unwrap();
    wizard
        .handle(location_signal(&Ok(LocationFix::new(18.52, 73.85, 12.0))))
        .unwrap();

    assert!(wizard.record().is_satisfied(VerificationCheck::Device));
    assert!(wizard.record().is_satisfied(VerificationCheck::Location));
}

#[test]
fn failed_location_leaves_record_unchanged() {
    let mut wizard = VerificationWizard::kyc();
    wizard
        .handle(location_signal(&Err(
            kyc_services::GeolocationFailure::PermissionDenied,
        )))
        .unwrap();
    assert!(!wizard.record().is_satisfied(VerificationCheck::Location));
}

// ── Profile ────────────────────────────────────────────────────────────

fn wallet() -> NullWallet {
    NullWallet::new()
        .with_accounts(&[ACCOUNT])
        .with_profile(
            ACCOUNT,
            UserProfile {
                username: "asha rao".into(),
                join_date: 1_700_000_000,
                ..UserProfile::default()
            },
        )
        .with_kyc_status(ACCOUNT, KycStatus::Pending)
        .with_balances(
            ACCOUNT,
            Balances {
                total: 1234.5,
                collateral: 1000.0,
                borrowed: 0.0,
            },
        )
}

#[tokio::test]
async fn profile_loads_after_connect() {
    let mut service = ProfileService::new(wallet());
    assert!(matches!(service.load().await, Err(ServiceError::NoAccount)));

    let account = service.connect().await.unwrap();
    assert_eq!(account, ACCOUNT);

    let view = service.load().await.unwrap();
    assert_eq!(view.short_address, "0x1234...5678");
    assert_eq!(view.username, "asha rao");
    assert_eq!(view.initials, "AR");
    assert_eq!(view.joined.as_secs(), 1_700_000_000);
    assert_eq!(view.kyc_status, KycStatus::Pending);
    assert_eq!(view.total_balance.as_deref(), Some("$1,234.50"));
    assert_eq!(view.borrowed_amount.as_deref(), Some("$0.00"));
}

#[tokio::test]
async fn missing_username_defaults_to_anonymous() {
    let wallet = NullWallet::new().with_accounts(&["0xabcdef0123456789"]);
    let mut service = ProfileService::new(wallet);
    service.connect().await.unwrap();
    let view = service.load().await.unwrap();
    assert_eq!(view.username, "Anonymous");
    assert_eq!(view.kyc_status, KycStatus::NotSubmitted);
}

#[tokio::test]
async fn balance_failure_does_not_fail_profile() {
    let mut service = ProfileService::new(wallet());
    service.connect().await.unwrap();
    service.wallet().fail_balances(true);

    let view = service.load().await.unwrap();
    assert!(view.total_balance.is_none());
    assert_eq!(view.username, "asha rao");
}

#[tokio::test]
async fn no_accounts_cannot_connect() {
    let mut service = ProfileService::new(NullWallet::new());
    assert!(matches!(service.connect().await, Err(ServiceError::NoAccount)));
}

#[tokio::test]
async fn account_switch_reloads_or_disconnects() {
    let mut service = ProfileService::new(wallet());
    service.connect().await.unwrap();

    let other = "0xfedcba9876543210fedcba9876543210fedcba98";
    let view = service.accounts_changed(vec![other.into()]).await.unwrap();
    assert_eq!(view.address, other);
    assert_eq!(view.username, "Anonymous");

    let err = service.accounts_changed(Vec::new()).await.unwrap_err();
    assert!(matches!(err, ServiceError::NoAccount));
    assert!(service.account().is_none());
}

#[tokio::test]
async fn toggles_and_gallery_reach_the_wallet() {
    let mut service = ProfileService::new(wallet());
    service.connect().await.unwrap();

    service.set_mfa_enabled(true).await.unwrap();
    service.set_notifications_enabled(true).await.unwrap();
    service
        .add_gallery_image(&png("cat.png"), "https://img.example/cat.png")
        .await
        .unwrap();
    service
        .set_avatar(&png("me.png"), "https://img.example/me.png")
        .await
        .unwrap();

    let view = service.load().await.unwrap();
    assert!(view.mfa_enabled);
    assert!(view.notifications_enabled);
    assert_eq!(view.gallery, vec!["https://img.example/cat.png".to_string()]);
    assert_eq!(view.avatar_url.as_deref(), Some("https://img.example/me.png"));

    service
        .remove_gallery_image("https://img.example/cat.png")
        .await
        .unwrap();
    assert!(service.load().await.unwrap().gallery.is_empty());
}

#[tokio::test]
async fn gallery_upload_is_screened() {
    let mut service = ProfileService::new(wallet());
    service.connect().await.unwrap();

    let pdf = UploadCandidate::new("doc.pdf", "application/pdf", 10);
    let err = service
        .add_gallery_image(&pdf, "https://img.example/doc.pdf")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "upload rejected: doc.pdf is not an image file");
    assert!(service.load().await.unwrap().gallery.is_empty());
}

// ── Transport ──────────────────────────────────────────────────────────

#[tokio::test]
async fn submission_event_reaches_transport() {
    let mut wizard = VerificationWizard::kyc();
    let signals = vec![
        change(FieldId::FullName, "Asha Rao"),
        change(FieldId::Email, "asha@example.in"),
        change(FieldId::Phone, "9876543210"),
        change(FieldId::DateOfBirth, "1990-04-12"),
        change(FieldId::Address, "12 MG Road"),
        change(FieldId::City, "Pune"),
        change(FieldId::State, "Maharashtra"),
        change(FieldId::Pincode, "411001"),
        WizardSignal::AdvanceRequested,
        change(FieldId::AadharNumber, "123456789012"),
        change(FieldId::PanNumber, "ABCDE1234F"),
        WizardSignal::DocumentSlotChanged { slot: DocumentSlot::AadharFront, present: true },
        WizardSignal::DocumentSlotChanged { slot: DocumentSlot::AadharBack, present: true },
        WizardSignal::DocumentSlotChanged { slot: DocumentSlot::PanCard, present: true },
        WizardSignal::AdvanceRequested,
        WizardSignal::PhotoCaptured { captured: true },
        WizardSignal::AdvanceRequested,
        WizardSignal::DeviceVerified { verified: true },
        WizardSignal::AdvanceRequested,
        WizardSignal::LocationVerified { verified: true },
        change(FieldId::AccountNumber, "001234567890"),
        change(FieldId::ConfirmAccountNumber, "001234567890"),
        change(FieldId::IfscCode, "HDFC0ABC123"),
        WizardSignal::SubmitRequested,
    ];
    for signal in signals {
        wizard.handle(signal).unwrap();
    }

    let transport = NullTransport::new();
    for event in wizard.drain_events() {
        if let WizardEvent::SubmissionReady(submission) = event {
            transport.submit(&submission).await.unwrap();
        }
    }

    let delivered = transport.delivered();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].values[&FieldId::FullName], "Asha Rao");
    assert!(delivered[0].record.all_satisfied());
}

#[tokio::test]
async fn transport_failure_is_reported() {
    let transport = NullTransport::new();
    transport.fail(true);
    let submission = kyc_wizard::Submission {
        values: Default::default(),
        record: Default::default(),
    };
    assert!(transport.submit(&submission).await.is_err());
    assert!(transport.delivered().is_empty());
}
