//! Secret generation seam.
//!
//! The reconciler decides *which* secrets exist and how long they are; an
//! implementation of [`SecretGenerator`] decides the actual characters.

/// Characters a secret may be drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset {
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
}

impl Charset {
    /// `A-Z`, `a-z` and `0-9`.
    pub const ALPHANUMERIC: Self = Self {
        uppercase: true,
        lowercase: true,
        digits: true,
    };

    /// The concrete alphabet, in a stable order.
    pub fn alphabet(&self) -> Vec<u8> {
        let mut chars = Vec::with_capacity(62);
        if self.uppercase {
            chars.extend(b'A'..=b'Z');
        }
        if self.lowercase {
            chars.extend(b'a'..=b'z');
        }
        if self.digits {
            chars.extend(b'0'..=b'9');
        }
        chars
    }

    pub fn contains(&self, c: char) -> bool {
        (self.uppercase && c.is_ascii_uppercase())
            || (self.lowercase && c.is_ascii_lowercase())
            || (self.digits && c.is_ascii_digit())
    }
}

/// Shape of one secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretSpec {
    pub length: usize,
    pub charset: Charset,
}

impl SecretSpec {
    pub const fn alphanumeric(length: usize) -> Self {
        Self {
            length,
            charset: Charset::ALPHANUMERIC,
        }
    }
}

/// Produces credential strings.
///
/// Implementations must return exactly `spec.length` characters, each from
/// `spec.charset`.
pub trait SecretGenerator: Send + Sync {
    fn generate(&self, spec: SecretSpec) -> String;
}
