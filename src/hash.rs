//! Ascon-Hash, Ascon-Hasha and Ascon-Xof from the Ascon v1.2 submission.
//!
//! These are the big-endian modes: rate 8, `p^12` around the message and,
//! for [`HashA`], `p^8` between blocks. The 256-bit digests match the
//! `asconhashv12` / `asconxofv12` known-answer files.

use crate::duplex_sponge::{BigEndian, Sponge};
use crate::permutation::State;

/// Digest size of [`Hash`] and [`HashA`], in bytes.
pub const HASH_SIZE: usize = 32;

/// Data rate of the hash and XOF sponges, in bytes.
///
/// Writes which are a multiple of this are the most efficient.
pub const BLOCK_SIZE: usize = 8;

/// Initialization word of the v1.2 hash family: rate in bits, round counts
/// and digest length packed into lane 0.
fn init_word(rate_bits: u64, a: u64, b: u64, hash_bits: u64) -> u64 {
    rate_bits << 48 | a << 40 | (a - b) << 32 | hash_bits
}

/// The Ascon-Hash state after loading `init_word(64, 12, 12, 256)` and
/// running `p^12`, precomputed.
const HASH_INIT: [u64; 5] = [
    0xee9398aadb67f03d,
    0x8bb21831c60f1002,
    0xb48a92db98d5da62,
    0x43189921b8f8e3e8,
    0x348fa5c9d525e140,
];

/// Ascon-Hash: a 256-bit hash.
#[derive(Clone)]
pub struct Hash {
    sponge: Sponge<BigEndian, BLOCK_SIZE>,
}

impl Hash {
    pub fn new() -> Self {
        Self {
            sponge: Sponge::from_state(State(HASH_INIT), 12),
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

    /// Restores the just-constructed state.
    pub fn reset(&mut self) {
        self.sponge = Sponge::from_state(State(HASH_INIT), 12);
    }
}

impl Default for Hash {
    fn default() -> Self {
        Self::new()
    }
}

/// Ascon-Hasha: the reduced-round (`p^8` between blocks) sibling of
/// [`Hash`].
#[derive(Clone)]
pub struct HashA {
    sponge: Sponge<BigEndian, BLOCK_SIZE>,
}

impl HashA {
    pub fn new() -> Self {
        Self {
            sponge: Sponge::with_iv(init_word(64, 12, 8, 256), 8),
        }
    }

    /// Absorbs `data` into the hash state.
    pub fn update(&mut self, data: &[u8]) {
        self.sponge.absorb(data);
    }

    /// Returns the digest of the data absorbed so far.
    ///
    /// Works on a copy of the state, like [`Hash::sum`].
    pub fn sum(&self) -> [u8; HASH_SIZE] {
        let mut out = [0u8; HASH_SIZE];
        self.sponge.sum_into(&mut out);
        out
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for HashA {
    fn default() -> Self {
        Self::new()
    }
}

/// Ascon-Xof: arbitrary-length output.
///
/// Interleave `update`s freely, then `read` as much output as needed, in
/// chunks of any size; the stream does not depend on how it is chunked.
/// Absorbing after the first `read` panics. A [`Clone`] taken before
/// reading replays the stream from the start.
#[derive(Clone)]
pub struct Xof {
    sponge: Sponge<BigEndian, BLOCK_SIZE>,
}

impl Xof {
    pub fn new() -> Self {
        Self {
            sponge: Sponge::with_iv(init_word(64, 12, 12, 0), 12),
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

impl Default for Xof {
    fn default() -> Self {
        Self::new()
    }
}

// `digest` bridges, so the modes slot in wherever the RustCrypto traits are
// expected.

impl digest::HashMarker for Hash {}

impl digest::OutputSizeUser for Hash {
    type OutputSize = digest::consts::U32;
}

impl digest::Update for Hash {
    fn update(&mut self, data: &[u8]) {
        Hash::update(self, data);
    }
}

impl digest::FixedOutput for Hash {
    fn finalize_into(self, out: &mut digest::Output<Self>) {
        out.copy_from_slice(&self.sum());
    }
}

impl digest::Reset for Hash {
    fn reset(&mut self) {
        Hash::reset(self);
    }
}

impl digest::FixedOutputReset for Hash {
    fn finalize_into_reset(&mut self, out: &mut digest::Output<Self>) {
        out.copy_from_slice(&self.sum());
        Hash::reset(self);
    }
}

impl digest::HashMarker for HashA {}

impl digest::OutputSizeUser for HashA {
    type OutputSize = digest::consts::U32;
}

impl digest::Update for HashA {
    fn update(&mut self, data: &[u8]) {
        HashA::update(self, data);
    }
}

impl digest::FixedOutput for HashA {
    fn finalize_into(self, out: &mut digest::Output<Self>) {
        out.copy_from_slice(&self.sum());
    }
}

impl digest::Reset for HashA {
    fn reset(&mut self) {
        HashA::reset(self);
    }
}

impl digest::FixedOutputReset for HashA {
    fn finalize_into_reset(&mut self, out: &mut digest::Output<Self>) {
        out.copy_from_slice(&self.sum());
        HashA::reset(self);
    }
}

impl digest::Update for Xof {
    fn update(&mut self, data: &[u8]) {
        Xof::update(self, data);
    }
}

impl digest::ExtendableOutput for Xof {
    type Reader = Xof;

    fn finalize_xof(self) -> Self::Reader {
        self
    }
}

impl digest::XofReader for Xof {
    fn read(&mut self, buffer: &mut [u8]) {
        Xof::read(self, buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // https://raw.githubusercontent.com/ascon/ascon-c/main/crypto_hash/asconhashv12/LWC_HASH_KAT_256.txt
    const EMPTY_HASH: &str = "7346BC14F036E87AE03D0997913088F5F68411434B3CF8B54FA796A80D251F91";
    const EMPTY_HASHA: &str = "AECD027026D0675F9DE7A8AD8CCF512DB64B1EDCF0B20C388A0C7CC617AAA2C4";

    #[test]
    fn precomputed_init_matches_computed() {
        let computed = Sponge::<BigEndian, BLOCK_SIZE>::with_iv(init_word(64, 12, 12, 256), 12);
        assert_eq!(computed.state().0, HASH_INIT);
    }

    #[test]
    fn empty_message_vectors() {
        assert_eq!(hex::encode_upper(Hash::new().sum()), EMPTY_HASH);
        assert_eq!(hex::encode_upper(HashA::new().sum()), EMPTY_HASHA);
    }

    #[test]
    fn sum_is_idempotent() {
        let mut h = Hash::new();
        h.update(b"some data");
        let first = h.sum();
        assert_eq!(h.sum(), first);

        // and the hash keeps absorbing afterwards
        h.update(b", more data");
        let mut control = Hash::new();
        control.update(b"some data, more data");
        assert_eq!(h.sum(), control.sum());
    }

    #[test]
    fn reset_restores_the_empty_state() {
        let mut h = Hash::new();
        h.update(b"garbage");
        h.reset();
        assert_eq!(hex::encode_upper(h.sum()), EMPTY_HASH);

        let mut a = HashA::new();
        a.update(b"garbage");
        a.reset();
        assert_eq!(hex::encode_upper(a.sum()), EMPTY_HASHA);
    }

    #[test]
    fn xof_differs_from_hash() {
        let mut x = Xof::new();
        x.update(b"abc");
        let mut out = [0u8; HASH_SIZE];
        x.read(&mut out);

        let mut h = Hash::new();
        h.update(b"abc");
        assert_ne!(out, h.sum());
    }

    #[test]
    fn xof_chunked_reads_match_one_shot() {
        const N: usize = 2016;

        let mut base = Xof::new();
        base.update(b"abc");

        let mut want = vec![0u8; N];
        base.clone().read(&mut want);

        for chunk in (1..64).chain([255, 256, 257, N - 1, N]) {
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
    fn digest_trait_matches_inherent_api() {
        use digest::Digest;

        let want = Hash::new().sum();
        let got = <Hash as Digest>::new().finalize();
        assert_eq!(&got[..], &want[..]);

        let mut d = <Hash as Digest>::new();
        Digest::update(&mut d, b"interop");
        let mut h = Hash::new();
        h.update(b"interop");
        assert_eq!(&d.finalize()[..], &h.sum()[..]);
    }

    #[test]
    fn xof_reader_trait_matches_inherent_api() {
        use digest::{ExtendableOutput, Update, XofReader};

        let mut x = Xof::new();
        Update::update(&mut x, b"interop");
        let mut reader = x.finalize_xof();
        let mut got = [0u8; 64];
        XofReader::read(&mut reader, &mut got);

        let mut control = Xof::new();
        control.update(b"interop");
        let mut want = [0u8; 64];
        control.read(&mut want);
        assert_eq!(got, want);
    }
}
