//! The crate distinguishes two failure classes.
//!
//! Recoverable conditions caused by input data (a ciphertext that fails
//! authentication, a customization string over the limit) are reported
//! through [`Error`]. Usage errors such as a wrong key or nonce length, or
//! absorbing into a sponge that already started squeezing, are bugs in the
//! calling code and panic instead.

use std::{error::Error as StdError, fmt};

/// Errors returned by the fallible operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The ciphertext was rejected.
    ///
    /// Carries no detail about which of the tag, ciphertext, associated
    /// data or key was wrong.
    DecryptionFailed,
    /// The customization string exceeds the 256-byte limit.
    CustomizationTooLong,
}

/// The result type of the fallible operations.
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DecryptionFailed => write!(f, "decryption failed"),
            Self::CustomizationTooLong => write!(f, "customization string too long"),
        }
    }
}

impl StdError for Error {}
