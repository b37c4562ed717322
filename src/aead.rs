//! Ascon-128 authenticated encryption from the Ascon v1.2 submission.

use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::duplex_sponge::{BigEndian, ByteOrder};
use crate::errors::{Error, Result};
use crate::permutation::State;

/// Key size of the AEAD and MAC modes, in bytes.
pub const KEY_SIZE: usize = 16;
/// Nonce size of the AEAD modes, in bytes.
pub const NONCE_SIZE: usize = 16;
/// Tag size, in bytes. Ciphertexts are this much longer than the plaintext.
pub const TAG_SIZE: usize = 16;

const ROUNDS_A: usize = 12;
const ROUNDS_B: usize = 6;
const RATE: usize = 8;

/// Lane 0 initialization word: key bits, rate bits, `A`, `A - B`.
const INIT_WORD: u64 = (128u64 << 56) | (64 << 48) | (12 << 40) | (6 << 32);

/// Ascon-128 AEAD.
///
/// One instance may seal and open any number of messages. The nonce must
/// never repeat under the same key; that is the caller's obligation and is
/// not checked here. `seal` and `open` take `&self` and may run
/// concurrently on a shared instance, but [`set_key`](Self::set_key) must
/// not race either of them.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Aead {
    key: [u8; KEY_SIZE],
}

impl Aead {
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

        let k0 = BigEndian::load(&self.key[0..8]);
        let k1 = BigEndian::load(&self.key[8..16]);

        let mut s = init(&self.key, nonce);
        s.0[3] ^= k0;
        s.0[4] ^= k1;

        absorb_associated_data(&mut s, associated_data);
        s.0[4] ^= 1;

        let mut out = Vec::with_capacity(plaintext.len() + TAG_SIZE);

        // duplex the plaintext through lane 0
        let mut blocks = plaintext.chunks_exact(RATE);
        for block in &mut blocks {
            s.0[0] ^= BigEndian::load(block);
            out.extend_from_slice(&s.0[0].to_be_bytes());
            s.permute(ROUNDS_B);
        }
        let rem = blocks.remainder();
        if !rem.is_empty() {
            let mut buf = [0u8; RATE];
            buf[..rem.len()].copy_from_slice(rem);
            buf[rem.len()] |= 0x80;
            s.0[0] ^= BigEndian::load(&buf);
            out.extend_from_slice(&s.0[0].to_be_bytes()[..rem.len()]);
        } else {
            s.0[0] ^= 0x80 << 56;
        }
        // no permutation after the final plaintext block

        s.0[1] ^= k0;
        s.0[2] ^= k1;
        s.permute(ROUNDS_A);

        out.extend_from_slice(&(s.0[3] ^ k0).to_be_bytes());
        out.extend_from_slice(&(s.0[4] ^ k1).to_be_bytes());
        out
    }

    /// Decrypts and verifies `ciphertext || tag`, binding
    /// `associated_data`, and returns the plaintext.
    ///
    /// Any rejection (a ciphertext shorter than [`TAG_SIZE`], a bad tag,
    /// tampered data) yields the same fixed [`Error::DecryptionFailed`];
    /// the tag comparison itself is constant-time. Panics when `nonce` is
    /// not exactly [`NONCE_SIZE`] bytes.
    pub fn open(&self, nonce: &[u8], ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        assert!(nonce.len() == NONCE_SIZE, "bad nonce (len {})", nonce.len());

        if ciphertext.len() < TAG_SIZE {
            return Err(Error::DecryptionFailed);
        }
        let (body, expected_tag) = ciphertext.split_at(ciphertext.len() - TAG_SIZE);

        let k0 = BigEndian::load(&self.key[0..8]);
        let k1 = BigEndian::load(&self.key[8..16]);

        let mut s = init(&self.key, nonce);
        s.0[3] ^= k0;
        s.0[4] ^= k1;

        absorb_associated_data(&mut s, associated_data);
        s.0[4] ^= 1;

        let mut out = Vec::with_capacity(body.len());

        // duplex the ciphertext: the state takes the ciphertext lane, not
        // the recovered plaintext
        let mut blocks = body.chunks_exact(RATE);
        for block in &mut blocks {
            let c = BigEndian::load(block);
            out.extend_from_slice(&(c ^ s.0[0]).to_be_bytes());
            s.0[0] = c;
            s.permute(ROUNDS_B);
        }
        let rem = blocks.remainder();
        if !rem.is_empty() {
            let keystream = s.0[0].to_be_bytes();
            let mut x = 0u64;
            for (i, (&c, k)) in rem.iter().zip(keystream).enumerate() {
                let p = c ^ k;
                out.push(p);
                x |= u64::from(p) << (56 - 8 * i);
            }
            x |= 0x80 << (56 - 8 * rem.len());
            s.0[0] ^= x;
        } else {
            s.0[0] ^= 0x80 << 56;
        }

        s.0[1] ^= k0;
        s.0[2] ^= k1;
        s.permute(ROUNDS_A);

        // constant-time tag check: fold both halves, branch once at the end
        let t0 = s.0[3] ^ k0 ^ BigEndian::load(&expected_tag[0..8]);
        let t1 = s.0[4] ^ k1 ^ BigEndian::load(&expected_tag[8..16]);
        if (t0 | t1) != 0 {
            return Err(Error::DecryptionFailed);
        }
        Ok(out)
    }
}

impl fmt::Debug for Aead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // keep the key out of logs
        write!(f, "Aead {{ .. }}")
    }
}

/// `INIT_WORD || key || nonce`, then `p^12`.
fn init(key: &[u8; KEY_SIZE], nonce: &[u8]) -> State {
    let mut s = State::default();
    s.0[0] = INIT_WORD;
    s.0[1] = BigEndian::load(&key[0..8]);
    s.0[2] = BigEndian::load(&key[8..16]);
    s.0[3] = BigEndian::load(&nonce[0..8]);
    s.0[4] = BigEndian::load(&nonce[8..16]);
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
        s.0[0] ^= BigEndian::load(block);
        s.permute(ROUNDS_B);
    }
    let rem = blocks.remainder();
    if !rem.is_empty() {
        let mut buf = [0u8; RATE];
        buf[..rem.len()].copy_from_slice(rem);
        buf[rem.len()] |= 0x80;
        s.0[0] ^= BigEndian::load(&buf);
    } else {
        s.0[0] ^= 0x80 << 56;
    }
    s.permute(ROUNDS_B);
}
