//! Per-keystroke input normalisation.

use kyc_types::FieldId;

/// Digits kept in an Aadhar number.
pub const AADHAR_DIGITS: usize = 12;
/// Digits per space-separated Aadhar group.
pub const AADHAR_GROUP: usize = 4;
/// Maximum digits of a bank account number.
pub const ACCOUNT_DIGITS: usize = 18;

/// Rewrite a raw field value the way the input box would display it.
///
/// Independent of validation: a normalised value may still fail its rule.
pub fn normalize(field: &FieldId, raw: &str) -> String {
    match field {
        FieldId::AadharNumber => group_digits(raw, AADHAR_DIGITS, AADHAR_GROUP),
        FieldId::PanNumber | FieldId::IfscCode => raw.to_uppercase(),
        FieldId::AccountNumber | FieldId::ConfirmAccountNumber => digits_only(raw, ACCOUNT_DIGITS),
        _ => raw.to_string(),
    }
}

/// Keep only ASCII digits, at most `limit` of them.
pub fn digits_only(raw: &str, limit: usize) -> String {
    raw.chars().filter(char::is_ascii_digit).take(limit).collect()
}

/// Strip non-digits, truncate to `limit`, then join runs of `group` digits with spaces.
pub fn group_digits(raw: &str, limit: usize, group: usize) -> String {
    let digits = digits_only(raw, limit);
    let mut out = String::with_capacity(digits.len() + digits.len() / group.max(1));
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && group > 0 && i % group == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}
