//! Replay of scripted wizard sessions.

use kyc_services::SubmissionTransport;
use kyc_wizard::{Submission, VerificationWizard, WizardEvent, WizardSignal, WizardView};
use serde::Serialize;
use tracing::{info, warn};

/// What a replayed session ended with.
#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub view: WizardView,
    pub submission: Option<Submission>,
    /// Set when the submission could not be delivered.
    pub delivery_error: Option<String>,
}

/// Parse a JSON array of signals.
pub fn parse_script(json: &str) -> anyhow::Result<Vec<WizardSignal>> {
    Ok(serde_json::from_str(json)?)
}

/// Feed `signals` into a default wizard and hand any submission to `transport`.
///
/// A signal the wizard refuses (for example after the session closed) aborts
/// the replay.
pub async fn replay<T: SubmissionTransport>(
    signals: Vec<WizardSignal>,
    transport: &T,
) -> anyhow::Result<SessionReport> {
    let mut wizard = VerificationWizard::kyc();
    let mut submission = None;

    for (index, signal) in signals.into_iter().enumerate() {
        wizard
            .handle(signal)
            .map_err(|e| anyhow::anyhow!("signal {index}: {e}"))?;
        for event in wizard.drain_events() {
            if let WizardEvent::SubmissionReady(payload) = event {
                submission = Some(payload);
            }
        }
    }

    let mut delivery_error = None;
    if let Some(payload) = &submission {
        match transport.submit(payload).await {
            Ok(()) => info!("submission handed to transport"),
            Err(e) => {
                warn!(error = %e, "submission delivery failed");
                delivery_error = Some(e.to_string());
            }
        }
    }

    Ok(SessionReport {
        view: wizard.view(),
        submission,
        delivery_error,
    })
}
