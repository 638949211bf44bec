//! Device fingerprinting from user-agent strings.
//!
//! Browser-side code hands over the raw user agent, screen size and network
//! details; the profile is built here and reported to the wizard.

use std::fmt;

use kyc_wizard::WizardSignal;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceType {
    Tablet,
    Mobile,
    Desktop,
}

impl DeviceType {
    pub fn detect(ua: &str) -> Self {
        if is_tablet(ua) {
            Self::Tablet
        } else if is_mobile(ua) {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tablet => "Tablet",
            Self::Mobile => "Mobile",
            Self::Desktop => "Desktop",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatingSystem {
    Windows,
    MacOs,
    Linux,
    Android,
    Ios,
    Unknown,
}

impl OperatingSystem {
    /// Android and iOS are tested before Linux and Mac, whose names their
    /// user agents also carry.
    pub fn detect(ua: &str) -> Self {
        let ua = ua.to_ascii_lowercase();
        if ua.contains("windows") {
            Self::Windows
        } else if ua.contains("android") {
            Self::Android
        } else if ["iphone", "ipad", "ipod", "ios"].iter().any(|t| ua.contains(t)) {
            Self::Ios
        } else if ua.contains("mac") {
            Self::MacOs
        } else if ua.contains("linux") {
            Self::Linux
        } else {
            Self::Unknown
        }
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Windows => "Windows",
            Self::MacOs => "MacOS",
            Self::Linux => "Linux",
            Self::Android => "Android",
            Self::Ios => "iOS",
            Self::Unknown => "Unknown OS",
        })
    }
}

/// Browser name, version and preferred language.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserInfo {
    pub name: String,
    pub version: String,
    pub language: String,
}

impl BrowserInfo {
    /// Edge and Opera carry "Chrome" in their user agents and Chrome carries
    /// "Safari", so the more specific names are tried first.
    pub fn detect(ua: &str, language: Option<&str>) -> Self {
        let lower = ua.to_ascii_lowercase();
        let name = if lower.contains("edg") {
            "Edge"
        } else if lower.contains("opr/") {
            "Opera"
        } else if ["chrome", "chromium", "crios"].iter().any(|t| lower.contains(t)) {
            "Chrome"
        } else if lower.contains("firefox") || lower.contains("fxios") {
            "Firefox"
        } else if lower.contains("safari") {
            "Safari"
        } else {
            "Unknown Browser"
        };
        Self {
            name: name.to_string(),
            version: browser_version(&lower).unwrap_or_else(|| "Unknown Version".to_string()),
            language: language.unwrap_or("Unknown").to_string(),
        }
    }
}

impl fmt::Display for BrowserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.name, self.version, self.language)
    }
}

/// Network Information API fields, when the browser exposes them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    pub effective_type: Option<String>,
    pub downlink_mbps: Option<f64>,
}

impl fmt::Display for ConnectionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.effective_type {
            Some(t) => write!(f, "{t}")?,
            None => f.write_str("Unknown")?,
        }
        match self.downlink_mbps {
            Some(mbps) if mbps > 0.0 => write!(f, " - {mbps} Mbps"),
            _ => f.write_str(" - Unknown"),
        }
    }
}

/// Everything the device check reports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub device_type: DeviceType,
    pub os: OperatingSystem,
    pub screen_width: u32,
    pub screen_height: u32,
    pub browser: BrowserInfo,
    #[serde(default)]
    pub connection: ConnectionInfo,
    #[serde(default)]
    pub cpu_cores: Option<u32>,
    #[serde(default)]
    pub memory_gb: Option<f64>,
}

impl DeviceProfile {
    pub fn from_user_agent(ua: &str, screen_width: u32, screen_height: u32) -> Self {
        Self {
            device_type: DeviceType::detect(ua),
            os: OperatingSystem::detect(ua),
            screen_width,
            screen_height,
            browser: BrowserInfo::detect(ua, None),
            connection: ConnectionInfo::default(),
            cpu_cores: None,
            memory_gb: None,
        }
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.browser.language = language.to_string();
        self
    }

    pub fn with_connection(mut self, connection: ConnectionInfo) -> Self {
        self.connection = connection;
        self
    }

    pub fn with_hardware(mut self, cpu_cores: Option<u32>, memory_gb: Option<f64>) -> Self {
        self.cpu_cores = cpu_cores;
        self.memory_gb = memory_gb;
        self
    }

    /// `"{cores} cores, {ram} RAM"` with `Unknown` for missing values.
    pub fn hardware_summary(&self) -> String {
        let cores = self
            .cpu_cores
            .map_or_else(|| "Unknown".to_string(), |c| c.to_string());
        let ram = self
            .memory_gb
            .map_or_else(|| "Unknown".to_string(), |m| format!("{m}GB"));
        format!("{cores} cores, {ram} RAM")
    }

    /// Completing a profile is what verifies the device.
    pub fn into_signal(self) -> WizardSignal {
        info!(device = %self, browser = %self.browser, connection = %self.connection, "device verified");
        WizardSignal::DeviceVerified { verified: true }
    }
}

impl fmt::Display for DeviceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {}x{}",
            self.device_type, self.os, self.screen_width, self.screen_height
        )
    }
}

// ── Matching helpers ───────────────────────────────────────────────────

/// `/(tablet|ipad|playbook|silk)|(android(?!.*mobi))/i`
fn is_tablet(ua: &str) -> bool {
    let lower = ua.to_ascii_lowercase();
    if ["tablet", "ipad", "playbook", "silk"].iter().any(|t| lower.contains(t)) {
        return true;
    }
    match lower.find("android") {
        Some(at) => !lower[at..].contains("mobi"),
        None => false,
    }
}

/// Case-sensitive, as browsers send these tokens capitalised.
fn is_mobile(ua: &str) -> bool {
    const TOKENS: [&str; 12] = [
        "Mobile",
        "Android",
        "iPhone",
        "iPod",
        "IEMobile",
        "BlackBerry",
        "Kindle",
        "Silk-Accelerated",
        "hpwOS",
        "webOS",
        "Opera Mobi",
        "Opera Mini",
    ];
    TOKENS.iter().any(|t| ua.contains(t))
}

/// First `(version|chrome|firefox|safari|opr|edge|rv)[sep](digits and dots)`
/// in an already-lowercased user agent.
fn browser_version(lower: &str) -> Option<String> {
    const KEYS: [&str; 7] = ["version", "chrome", "firefox", "safari", "opr", "edge", "rv"];
    let bytes = lower.as_bytes();
    for start in 0..bytes.len() {
        for key in KEYS {
            if !bytes[start..].starts_with(key.as_bytes()) {
                continue;
            }
            let sep = start + key.len();
            match bytes.get(sep) {
                Some(b'/' | b':' | b' ' | b'\t') => {}
                _ => continue,
            }
            let version: String = bytes[sep + 1..]
                .iter()
                .take_while(|b| b.is_ascii_digit() || **b == b'.')
                .map(|b| char::from(*b))
                .collect();
            if !version.is_empty() {
                return Some(version);
            }
        }
    }
    None
}
