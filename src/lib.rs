//! The Ascon family of lightweight cryptographic functions, covering both
//! NIST SP 800-232 and the Ascon v1.2 submission to the NIST lightweight
//! cryptography competition.
//!
//! Every mode is a thin parameterization of one 320-bit permutation driven
//! in a duplex-sponge construction:
//!
//! | Type | Algorithm | Output |
//! |------|-----------|--------|
//! | [`Hash`], [`HashA`] | Ascon-Hash / Ascon-Hasha (v1.2) | 32 bytes |
//! | [`Xof`] | Ascon-Xof (v1.2) | any length |
//! | [`Hash256`] | Ascon-Hash256 (SP 800-232) | 32 bytes |
//! | [`Xof128`], [`CXof128`] | Ascon-XOF128 / Ascon-CXOF128 (SP 800-232) | any length |
//! | [`Aead`] | Ascon-128 (v1.2) | plaintext + 16-byte tag |
//! | [`Aead128`] | Ascon-AEAD128 (SP 800-232) | plaintext + 16-byte tag |
//! | [`Mac`] | Ascon-MAC (v1.2 PRF family) | 16 bytes |
//!
//! The v1.2 and SP 800-232 families are not bit-compatible with each other;
//! match test vectors against the right one.
//!
//! # Hashing
//!
//! ```
//! let mut h = ascon::Hash::new();
//! h.update(b"");
//! assert_eq!(
//!     hex::encode_upper(h.sum()),
//!     "7346BC14F036E87AE03D0997913088F5F68411434B3CF8B54FA796A80D251F91",
//! );
//! ```
//!
//! The XOF modes absorb incrementally and then squeeze any amount of
//! output; chunk boundaries never change the stream:
//!
//! ```
//! let mut x = ascon::Xof128::new();
//! x.update(b"some input");
//! let mut a = [0u8; 8];
//! let mut b = [0u8; 24];
//! x.read(&mut a);
//! x.read(&mut b);
//!
//! let mut whole = [0u8; 32];
//! let mut y = ascon::Xof128::new();
//! y.update(b"some input");
//! y.read(&mut whole);
//! assert_eq!([&a[..], &b[..]].concat(), whole);
//! ```
//!
//! The hash types also implement the [`digest`] traits, so they drop into
//! APIs written against the RustCrypto ecosystem.
//!
//! # Authenticated encryption
//!
//! ```
//! let aead = ascon::Aead128::new(b"an underived key");
//! let nonce = [0u8; ascon::NONCE_SIZE]; // never reuse one under a key
//! let sealed = aead.seal(&nonce, b"attack at dawn", b"header");
//! let opened = aead.open(&nonce, &sealed, b"header").unwrap();
//! assert_eq!(opened, b"attack at dawn");
//! assert!(aead.open(&nonce, &sealed, b"other header").is_err());
//! ```
//!
//! # Sharing and secrets
//!
//! Nothing blocks or spawns; every call runs to completion on the caller's
//! thread. Instances are not synchronized: clone one (a deep copy of
//! state, buffer and counters) to use it from several threads. State,
//! buffers and keys are zeroized on drop.

/// Ascon-128 authenticated encryption (v1.2).
mod aead;
/// Ascon-AEAD128 authenticated encryption (SP 800-232).
mod aead128;
/// The buffered absorb/squeeze engine.
mod duplex_sponge;
/// Recoverable error values.
mod errors;
/// Ascon-Hash, Ascon-Hasha and Ascon-Xof (v1.2).
mod hash;
/// Ascon-Hash256, Ascon-XOF128 and Ascon-CXOF128 (SP 800-232).
mod hash256;
/// Known-answer-test record generation.
pub mod kat;
/// Ascon-MAC.
mod mac;
/// The 320-bit permutation.
mod permutation;

pub use aead::{Aead, KEY_SIZE, NONCE_SIZE, TAG_SIZE};
pub use aead128::Aead128;
pub use errors::{Error, Result};
pub use hash::{Hash, HashA, Xof, BLOCK_SIZE, HASH_SIZE};
pub use hash256::{CXof128, Hash256, Xof128, CUSTOMIZATION_MAX};
pub use mac::Mac;
