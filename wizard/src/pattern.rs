//! Format constraints a field value must match.

use serde::{Deserialize, Serialize};

/// A pattern constraint attached to a [`FieldRule`](crate::FieldRule).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pattern {
    /// ASCII letters and spaces, at least one letter.
    Letters,
    /// `local@domain.tld` with no whitespace and a single `@`.
    Email,
    /// Only ASCII digits, between `min` and `max` of them.
    Digits { min: usize, max: usize },
    /// `groups` runs of exactly `width` digits separated by single spaces.
    GroupedDigits { groups: usize, width: usize },
    /// PAN card number: five upper-case letters, four digits, one upper-case letter.
    Pan,
    /// Bank routing code: four upper-case letters, a literal `0`, six upper-case alphanumerics.
    Ifsc,
}

impl Pattern {
    pub fn matches(&self, value: &str) -> bool {
        match *self {
            Self::Letters => {
                value.chars().any(|c| c.is_ascii_alphabetic())
                    && value.chars().all(|c| c.is_ascii_alphabetic() || c == ' ')
            }
            Self::Email => is_email(value),
            Self::Digits { min, max } => {
                (min..=max).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
            }
            Self::GroupedDigits { groups, width } => {
                let parts: Vec<&str> = value.split(' ').collect();
                parts.len() == groups
                    && parts
                        .iter()
                        .all(|p| p.len() == width && p.bytes().all(|b| b.is_ascii_digit()))
            }
            Self::Pan => {
                let b = value.as_bytes();
                b.len() == 10
                    && b[..5].iter().all(u8::is_ascii_uppercase)
                    && b[5..9].iter().all(u8::is_ascii_digit)
                    && b[9].is_ascii_uppercase()
            }
            Self::Ifsc => {
                let b = value.as_bytes();
                b.len() == 11
                    && b[..4].iter().all(u8::is_ascii_uppercase)
                    && b[4] == b'0'
                    && b[5..]
                        .iter()
                        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            }
        }
    }
}

fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Some dot with at least one character on either side.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_accepts_names_with_spaces() {
        assert!(Pattern::Letters.matches("Asha Rao"));
        assert!(!Pattern::Letters.matches("Asha R4o"));
        assert!(!Pattern::Letters.matches("   "));
    }

    #[test]
    fn email_requires_domain_dot() {
        assert!(Pattern::Email.matches("a@b.co"));
        assert!(!Pattern::Email.matches("a@bco"));
        assert!(!Pattern::Email.matches("a@.co"));
        assert!(!Pattern::Email.matches("a@b."));
        assert!(!Pattern::Email.matches("a b@c.d"));
        assert!(!Pattern::Email.matches("@c.d"));
        assert!(!Pattern::Email.matches("a@b@c.d"));
    }

    #[test]
    fn digits_enforces_length_range() {
        let phone = Pattern::Digits { min: 10, max: 10 };
        assert!(phone.matches("9876543210"));
        assert!(!phone.matches("987654321"));
        assert!(!phone.matches("98765 43210"));
    }

    #[test]
    fn grouped_digits_matches_formatted_aadhar() {
        let aadhar = Pattern::GroupedDigits { groups: 3, width: 4 };
        assert!(aadhar.matches("1234 5678 9012"));
        assert!(!aadhar.matches("123456789012"));
        assert!(!aadhar.matches("1234 5678 901"));
        assert!(!aadhar.matches("1234  5678 9012"));
    }

    #[test]
    fn pan_format() {
        assert!(Pattern::Pan.matches("ABCDE1234F"));
        assert!(!Pattern::Pan.matches("abcde1234f"));
        assert!(!Pattern::Pan.matches("ABCD01234F"));
        assert!(!Pattern::Pan.matches("ABCDE1234"));
    }

    #[test]
    fn ifsc_format() {
        assert!(Pattern::Ifsc.matches("SBIN0001234"));
        assert!(Pattern::Ifsc.matches("HDFC0ABC123"));
        assert!(!Pattern::Ifsc.matches("SBIN1001234"));
        assert!(!Pattern::Ifsc.matches("sbin0001234"));
        assert!(!Pattern::Ifsc.matches("SBIN000123"));
    }
}
