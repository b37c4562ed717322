//! Ascon-Hash256, Ascon-XOF128 and Ascon-CXOF128 from NIST SP 800-232.
//!
//! The standardized modes are little-endian and use fresh initialization
//! words; they are not bit-compatible with the v1.2 family in [`crate::hash`]
//! and the two never share state setup.

use crate::duplex_sponge::{LittleEndian, Sponge};
use crate::errors::{Error, Result};
use crate::hash::HASH_SIZE;

/// Maximum customization-string length accepted by [`CXof128`], in bytes.
pub const CUSTOMIZATION_MAX: usize = 256;

/// Initialization word of the SP 800-232 hash modes: the per-algorithm id,
/// both round counts, the digest length and the rate.
fn init_word(id: u64, hash_bits: u64) -> u64 {
    id + (12 << 16) + (12 << 20) + (hash_bits << 24) + (8 << 40)
}

/// Ascon-Hash256: the standardized 256-bit hash.
#[derive(Clone)]
pub struct Hash256 {
    sponge: Sponge<LittleEndian, 8>,
}

impl Hash256 {
    pub fn new() -> Self {
        Self {
            sponge: Sponge::with_iv(init_word(2, 256), 12),
        }
    }

    /// Absorbs `data` into the hash state.
    pub fn update(&mut self, data: &[u8]) {
        self.sponge.absorb(data);
    }

    /// Returns the digest of the data absorbed so far.
    ///
    /// Works on a copy of the state: repeated calls return the same digest
    /// and the hash keeps accepting `update`s.
    pub fn sum(&self) -> [u8; HASH_SIZE] {
        let mut out = [0u8; HASH_SIZE];
        self.sponge.sum_into(&mut out);
        out
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Hash256 {
    fn default() -> Self {
        Self::new()
    }
}

/// Ascon-XOF128: the standardized extendable-output function.
///
/// Same read/write contract as [`crate::Xof`]: chunking never changes the
/// stream, absorbing after the first `read` panics, and a [`Clone`] taken
/// before reading replays the stream.
#[derive(Clone)]
pub struct Xof128 {
    sponge: Sponge<LittleEndian, 8>,
}

impl Xof128 {
    pub fn new() -> Self {
        Self {
            sponge: Sponge::with_iv(init_word(3, 0), 12),
        }
    }

    /// Absorbs `data`. Panics once `read` has been called.
    pub fn update(&mut self, data: &[u8]) {
        self.sponge.absorb(data);
    }

    /// Fills `out` with the next output bytes.
    pub fn read(&mut self, out: &mut [u8]) {
        self.sponge.squeeze(out);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Xof128 {
    fn default() -> Self {
        Self::new()
    }
}

/// Ascon-CXOF128: [`Xof128`] with a customization string.
///
/// The customization string (at most [`CUSTOMIZATION_MAX`] bytes) is
/// length-prefixed and absorbed at construction; distinct strings yield
/// independent output streams for the same message. [`reset`](Self::reset)
/// rewinds to the state right after customization, so reuse does not pay
/// for re-absorbing the string.
#[derive(Clone, Debug)]
pub struct CXof128 {
    sponge: Sponge<LittleEndian, 8>,
    zero: Sponge<LittleEndian, 8>,
}

impl CXof128 {
    /// Creates a CXOF over `customization`.
    ///
    /// Fails with [`Error::CustomizationTooLong`] past 256 bytes.
    pub fn new(customization: &[u8]) -> Result<Self> {
        if customization.len() > CUSTOMIZATION_MAX {
            return Err(Error::CustomizationTooLong);
        }
        Ok(Self::with_customization(customization))
    }

    fn with_customization(customization: &[u8]) -> Self {
        let mut sponge = Sponge::with_iv(init_word(4, 0), 12);
        // one whole block holding the customization length in bits,
        // then the string itself, closed off like a message
        sponge.absorb(&(customization.len() as u64 * 8).to_le_bytes());
        sponge.absorb(customization);
        sponge.pad_absorb();
        Self {
            zero: sponge.clone(),
            sponge,
        }
    }

    /// Absorbs `data`. Panics once `read` has been called.
    pub fn update(&mut self, data: &[u8]) {
        self.sponge.absorb(data);
    }

    /// Fills `out` with the next output bytes.
    pub fn read(&mut self, out: &mut [u8]) {
        self.sponge.squeeze(out);
    }

    /// Rewinds to the state captured right after customization.
    pub fn reset(&mut self) {
        self.sponge = self.zero.clone();
    }
}

impl Default for CXof128 {
    /// The empty customization string.
    fn default() -> Self {
        Self::with_customization(b"")
    }
}

impl digest::HashMarker for Hash256 {}

impl digest::OutputSizeUser for Hash256 {
    type OutputSize = digest::consts::U32;
}

impl digest::Update for Hash256 {
    fn update(&mut self, data: &[u8]) {
        Hash256::update(self, data);
    }
}

impl digest::FixedOutput for Hash256 {
    fn finalize_into(self, out: &mut digest::Output<Self>) {
        out.copy_from_slice(&self.sum());
    }
}

impl digest::Reset for Hash256 {
    fn reset(&mut self) {
        Hash256::reset(self);
    }
}

impl digest::FixedOutputReset for Hash256 {
    fn finalize_into_reset(&mut self, out: &mut digest::Output<Self>) {
        out.copy_from_slice(&self.sum());
        Hash256::reset(self);
    }
}

impl digest::Update for Xof128 {
    fn update(&mut self, data: &[u8]) {
        Xof128::update(self, data);
    }
}

impl digest::ExtendableOutput for Xof128 {
    type Reader = Xof128;

    fn finalize_xof(self) -> Self::Reader {
        self
    }
}

impl digest::XofReader for Xof128 {
    fn read(&mut self, buffer: &mut [u8]) {
        Xof128::read(self, buffer);
    }
}

impl digest::Update for CXof128 {
    fn update(&mut self, data: &[u8]) {
        CXof128::update(self, data);
    }
}

impl digest::ExtendableOutput for CXof128 {
    type Reader = CXof128;

    fn finalize_xof(self) -> Self::Reader {
        self
    }
}

impl digest::XofReader for CXof128 {
    fn read(&mut self, buffer: &mut [u8]) {
        CXof128::read(self, buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_words_match_the_standard() {
        assert_eq!(init_word(2, 256), 0x0000080100cc0002);
        assert_eq!(init_word(3, 0), 0x0000080000cc0003);
        assert_eq!(init_word(4, 0), 0x0000080000cc0004);
    }

    #[test]
    fn initial_states_match_published_values() {
        let hash = Sponge::<LittleEndian, 8>::with_iv(init_word(2, 256), 12);
        assert_eq!(
            hash.state().0,
            [
                0x9b1e5494e934d681,
                0x4bc3a01e333751d2,
                0xae65396c6b34b81a,
                0x3c7fd4a4d56a4db3,
                0x1a5c464906c5976d,
            ],
        );

        let xof = Sponge::<LittleEndian, 8>::with_iv(init_word(3, 0), 12);
        assert_eq!(
            xof.state().0,
            [
                0xda82ce768d9447eb,
                0xcc7ce6c75f1ef969,
                0xe7508fd780085631,
                0x0ee0ea53416b58cc,
                0xe0547524db6f0bde,
            ],
        );
    }

    #[test]
    fn sum_is_idempotent() {
        let mut h = Hash256::new();
        h.update(b"some data");
        let first = h.sum();
        assert_eq!(h.sum(), first);

        h.update(b", more data");
        let mut control = Hash256::new();
        control.update(b"some data, more data");
        assert_eq!(h.sum(), control.sum());
    }

    #[test]
    fn hash256_differs_from_legacy_hash() {
        let mut legacy = crate::Hash::new();
        legacy.update(b"abc");
        let mut h = Hash256::new();
        h.update(b"abc");
        assert_ne!(legacy.sum(), h.sum());
    }

    #[test]
    fn xof128_chunked_reads_match_one_shot() {
        const N: usize = 512;

        let mut base = Xof128::new();
        base.update(b"abc");
        let mut want = vec![0u8; N];
        base.clone().read(&mut want);

        for chunk in (1..40).chain([63, 64, 65, N]) {
            let mut x = base.clone();
            let mut got = vec![0u8; N];
            for start in (0..N).step_by(chunk) {
                let end = usize::min(start + chunk, N);
                x.read(&mut got[start..end]);
            }
            assert_eq!(got, want, "chunk size {chunk}");
        }
    }

    #[test]
    fn cxof_chunked_reads_match_one_shot() {
        const N: usize = 256;

        let mut base = CXof128::new(b"chunking context").unwrap();
        base.update(b"abc");
        let mut want = vec![0u8; N];
        base.clone().read(&mut want);

        for chunk in [1, 3, 7, 8, 9, 40, N] {
            let mut x = base.clone();
            let mut got = vec![0u8; N];
            for start in (0..N).step_by(chunk) {
                let end = usize::min(start + chunk, N);
                x.read(&mut got[start..end]);
            }
            assert_eq!(got, want, "chunk size {chunk}");
        }
    }

    #[test]
    fn customization_separates_streams() {
        let mut plain = Xof128::new();
        let mut a = CXof128::new(b"context a").unwrap();
        let mut b = CXof128::new(b"context b").unwrap();
        let mut empty = CXof128::new(b"").unwrap();

        plain.update(b"message");
        a.update(b"message");
        b.update(b"message");
        empty.update(b"message");

        let mut outs = [[0u8; 32]; 4];
        plain.read(&mut outs[0]);
        a.read(&mut outs[1]);
        b.read(&mut outs[2]);
        empty.read(&mut outs[3]);

        for i in 0..4 {
            for j in i + 1..4 {
                assert_ne!(outs[i], outs[j], "streams {i} and {j} collide");
            }
        }
    }

    #[test]
    fn cxof_reset_rewinds_to_customization() {
        let mut x = CXof128::new(b"my protocol v1").unwrap();
        x.update(b"first message");
        let mut first = [0u8; 48];
        x.read(&mut first);

        x.reset();
        x.update(b"first message");
        let mut again = [0u8; 48];
        x.read(&mut again);
        assert_eq!(first, again);

        // and a fresh instance agrees
        let mut fresh = CXof128::new(b"my protocol v1").unwrap();
        fresh.update(b"first message");
        let mut control = [0u8; 48];
        fresh.read(&mut control);
        assert_eq!(first, control);
    }

    #[test]
    fn customization_length_limit() {
        assert!(CXof128::new(&[0u8; CUSTOMIZATION_MAX]).is_ok());
        assert_eq!(
            CXof128::new(&[0u8; CUSTOMIZATION_MAX + 1]).unwrap_err(),
            Error::CustomizationTooLong,
        );
    }

    #[test]
    fn default_cxof_is_the_empty_customization() {
        let mut a = CXof128::default();
        let mut b = CXof128::new(b"").unwrap();
        a.update(b"msg");
        b.update(b"msg");
        let mut x = [0u8; 32];
        let mut y = [0u8; 32];
        a.read(&mut x);
        b.read(&mut y);
        assert_eq!(x, y);
    }
}
