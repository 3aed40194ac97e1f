//! TETRA party identities.
//!
//! Identities travel over the PEI as decimal digit strings (an ISSI like
//! `1234567`, or a full TSI like `262100101234567`). They are kept as strings
//! here; the library never needs to do arithmetic on them, only compare and
//! echo them back into AT commands.

use std::fmt;

/// An identity of a party in a TETRA communication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Identity(String);

impl Identity {
    /// Create an identity from its digit-string form.
    pub fn new(s: impl Into<String>) -> Self {
        Identity(s.into())
    }

    /// The digit-string form of this identity.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identity is empty (no identity transmitted).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Identity(s.to_string())
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Identity(s)
    }
}

/// Identity type as transmitted in the `+CTSDSR:` header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityType {
    /// Short Subscriber Identity.
    Ssi,
    /// TETRA Subscriber Identity (MCC + MNC + SSI).
    Tsi,
    /// Short Number Address.
    Sna,
    /// PABX-linked external subscriber number.
    Pabx,
    /// PSTN-linked external subscriber number.
    Pstn,
    /// Extended TSI.
    ExtendedTsi,
}

/// An identity combined with its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedIdentity {
    pub identity: Identity,
    pub identity_type: IdentityType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_display_is_digit_string() {
        let id = Identity::from("1234567");
        assert_eq!(id.to_string(), "1234567");
        assert_eq!(id.as_str(), "1234567");
    }

    #[test]
    fn identity_default_is_empty() {
        assert!(Identity::default().is_empty());
        assert!(!Identity::from("1").is_empty());
    }

    #[test]
    fn identity_equality() {
        assert_eq!(Identity::from("2345678"), Identity::new("2345678"));
        assert_ne!(Identity::from("2345678"), Identity::from("1234567"));
    }
}
