//! Ascon-AEAD128 from NIST SP 800-232.
//!
//! Compared to [`crate::Aead`] the standardized cipher is little-endian,
//! duplexes two lanes per block, runs `p^8` between blocks and uses its own
//! initialization and domain-separation words. The two are not
//! bit-compatible and share no state setup.

use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::aead::{KEY_SIZE, NONCE_SIZE, TAG_SIZE};
use crate::duplex_sponge::{ByteOrder, LittleEndian};
use crate::errors::{Error, Result};
use crate::permutation::State;

const ROUNDS_A: usize = 12;
const ROUNDS_B: usize = 8;
const RATE: usize = 16;

/// Lane 0 initialization word: algorithm id, round counts, key bits, rate.
const INIT_WORD: u64 = 1 + (12 << 16) + (8 << 20) + (128 << 24) + (16 << 40);

/// Ascon-AEAD128.
///
/// Same usage contract as [`crate::Aead`]: nonces must never repeat under a
/// key, and [`set_key`](Self::set_key) must not race any other call on the
/// same instance.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Aead128 {
    key: [u8; KEY_SIZE],
}

impl Aead128 {
    /// Creates an instance from a 16-byte key.
    ///
    /// Panics when `key` is not exactly [`KEY_SIZE`] bytes.
    pub fn new(key: &[u8]) -> Self {
        let mut aead = Self { key: [0; KEY_SIZE] };
        aead.set_key(key);
        aead
    }

    /// Replaces the key.
    ///
    /// Not safe for concurrent use with any other method on the same
    /// instance. Panics when `key` is not exactly [`KEY_SIZE`] bytes.
    pub fn set_key(&mut self, key: &[u8]) {
        assert!(key.len() == KEY_SIZE, "wrong key size (len {})", key.len());
        self.key.copy_from_slice(key);
    }

    /// Encrypts and authenticates `plaintext`, binding `associated_data`,
    /// and returns `ciphertext || tag`.
    ///
    /// Panics when `nonce` is not exactly [`NONCE_SIZE`] bytes.
    pub fn seal(&self, nonce: &[u8], plaintext: &[u8], associated_data: &[u8]) -> Vec<u8> {
        assert!(nonce.len() == NONCE_SIZE, "bad nonce (len {})", nonce.len());

        let k0 = LittleEndian::load(&self.key[0..8]);
        let k1 = LittleEndian::load(&self.key[8..16]);

        let mut s = init(&self.key, nonce);
        s.0[3] ^= k0;
        s.0[4] ^= k1;

        absorb_associated_data(&mut s, associated_data);
        s.0[4] ^= 0x80 << 56;

        let mut out = Vec::with_capacity(plaintext.len() + TAG_SIZE);

        // duplex the plaintext through lanes 0 and 1
        let mut blocks = plaintext.chunks_exact(RATE);
        for block in &mut blocks {
            s.0[0] ^= LittleEndian::load(&block[0..8]);
            s.0[1] ^= LittleEndian::load(&block[8..16]);
            out.extend_from_slice(&s.0[0].to_le_bytes());
            out.extend_from_slice(&s.0[1].to_le_bytes());
            s.permute(ROUNDS_B);
        }
        let rem = blocks.remainder();
        if !rem.is_empty() {
            let mut buf = [0u8; RATE];
            buf[..rem.len()].copy_from_slice(rem);
            buf[rem.len()] = 1;
            s.0[0] ^= LittleEndian::load(&buf[0..8]);
            s.0[1] ^= LittleEndian::load(&buf[8..16]);
            let mut block = [0u8; RATE];
            block[0..8].copy_from_slice(&s.0[0].to_le_bytes());
            block[8..16].copy_from_slice(&s.0[1].to_le_bytes());
            out.extend_from_slice(&block[..rem.len()]);
        } else {
            s.0[0] ^= 1;
        }
        // no permutation after the final plaintext block

        s.0[2] ^= k0;
        s.0[3] ^= k1;
        s.permute(ROUNDS_A);

        out.extend_from_slice(&(s.0[3] ^ k0).to_le_bytes());
        out.extend_from_slice(&(s.0[4] ^ k1).to_le_bytes());
        out
    }

    /// Decrypts and verifies `ciphertext || tag`, binding
    /// `associated_data`, and returns the plaintext.
    ///
    /// Any rejection yields the same fixed [`Error::DecryptionFailed`]; the
    /// tag comparison is constant-time. Panics when `nonce` is not exactly
    /// [`NONCE_SIZE`] bytes.
    pub fn open(&self, nonce: &[u8], ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        assert!(nonce.len() == NONCE_SIZE, "bad nonce (len {})", nonce.len());

        if ciphertext.len() < TAG_SIZE {
            return Err(Error::DecryptionFailed);
        }
        let (body, expected_tag) = ciphertext.split_at(ciphertext.len() - TAG_SIZE);

        let k0 = LittleEndian::load(&self.key[0..8]);
        let k1 = LittleEndian::load(&self.key[8..16]);

        let mut s = init(&self.key, nonce);
        s.0[3] ^= k0;
        s.0[4] ^= k1;

        absorb_associated_data(&mut s, associated_data);
        s.0[4] ^= 0x80 << 56;

        let mut out = Vec::with_capacity(body.len());

        // duplex the ciphertext: the state takes the ciphertext lanes
        let mut blocks = body.chunks_exact(RATE);
        for block in &mut blocks {
            let c0 = LittleEndian::load(&block[0..8]);
            let c1 = LittleEndian::load(&block[8..16]);
            out.extend_from_slice(&(c0 ^ s.0[0]).to_le_bytes());
            out.extend_from_slice(&(c1 ^ s.0[1]).to_le_bytes());
            s.0[0] = c0;
            s.0[1] = c1;
            s.permute(ROUNDS_B);
        }
        let mut rem = blocks.remainder();

        // the tail may still cover a whole lane before the padded one
        let mut lane = 0;
        if rem.len() >= 8 {
            let c = LittleEndian::load(&rem[0..8]);
            out.extend_from_slice(&(c ^ s.0[0]).to_le_bytes());
            s.0[0] = c;
            rem = &rem[8..];
            lane = 1;
        }
        if !rem.is_empty() {
            let keystream = s.0[lane].to_le_bytes();
            let mut x = 0u64;
            for (i, (&c, k)) in rem.iter().zip(keystream).enumerate() {
                let p = c ^ k;
                out.push(p);
                x |= u64::from(p) << (8 * i);
            }
            x |= 1 << (8 * rem.len());
            s.0[lane] ^= x;
        } else {
            s.0[lane] ^= 1;
        }

        s.0[2] ^= k0;
        s.0[3] ^= k1;
        s.permute(ROUNDS_A);

        // constant-time tag check: fold both halves, branch once at the end
        let t0 = s.0[3] ^ k0 ^ LittleEndian::load(&expected_tag[0..8]);
        let t1 = s.0[4] ^ k1 ^ LittleEndian::load(&expected_tag[8..16]);
        if (t0 | t1) != 0 {
            return Err(Error::DecryptionFailed);
        }
        Ok(out)
    }
}

impl fmt::Debug for Aead128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // keep the key out of logs
        write!(f, "Aead128 {{ .. }}")
    }
}

/// `INIT_WORD || key || nonce`, then `p^12`.
fn init(key: &[u8; KEY_SIZE], nonce: &[u8]) -> State {
    let mut s = State::default();
    s.0[0] = INIT_WORD;
    s.0[1] = LittleEndian::load(&key[0..8]);
    s.0[2] = LittleEndian::load(&key[8..16]);
    s.0[3] = LittleEndian::load(&nonce[0..8]);
    s.0[4] = LittleEndian::load(&nonce[8..16]);
    s.permute(ROUNDS_A);
    s
}

fn absorb_associated_data(s: &mut State, ad: &[u8]) {
    // empty associated data absorbs nothing, not even padding
    if ad.is_empty() {
        return;
    }
    let mut blocks = ad.chunks_exact(RATE);
    for block in &mut blocks {
        s.0[0] ^= LittleEndian::load(&block[0..8]);
        s.0[1] ^= LittleEndian::load(&block[8..16]);
        s.permute(ROUNDS_B);
    }
    let rem = blocks.remainder();
    if !rem.is_empty() {
        let mut buf = [0u8; RATE];
        buf[..rem.len()].copy_from_slice(rem);
        buf[rem.len()] = 1;
        s.0[0] ^= LittleEndian::load(&buf[0..8]);
        s.0[1] ^= LittleEndian::load(&buf[8..16]);
    } else {
        s.0[0] ^= 1;
    }
    s.permute(ROUNDS_B);
}
