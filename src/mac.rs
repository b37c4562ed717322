//! Ascon-MAC, the fixed-output keyed authenticator from the Ascon PRF
//! family (Dobraunig, Eichlseder, Mendel, Schläffer,
//! <https://eprint.iacr.org/2021/1574>).

use core::fmt;

use crate::aead::{KEY_SIZE, TAG_SIZE};
use crate::duplex_sponge::{BigEndian, ByteOrder, Sponge};
use crate::permutation::State;

const RATE: usize = 32;

/// Ascon-MAC: a 128-bit tag over a keyed 32-byte-rate absorber.
///
/// Feed the message with [`update`](Self::update), then take the tag with
/// [`sum`](Self::sum) or check one with [`verify`](Self::verify). Both work
/// on a copy of the state, so an instance can keep absorbing afterwards,
/// and a pristine [`Clone`] serves as a cheap re-keyed starting point.
#[derive(Clone)]
pub struct Mac {
    sponge: Sponge<BigEndian, RATE>,
}

impl Mac {
    /// Absorption block size, in bytes.
    pub const BLOCK_SIZE: usize = RATE;

    /// Creates an instance keyed with a 16-byte key.
    ///
    /// Panics when `key` is not exactly [`KEY_SIZE`] bytes.
    pub fn new(key: &[u8]) -> Self {
        assert!(key.len() == KEY_SIZE, "wrong key size (len {})", key.len());

        let mut state = State::default();
        // key bits, rate bits, 0x80 | a, tag bits
        state.0[0] = (128u64 << 56) | (128 << 48) | ((0x80 | 12) << 40) | 128;
        state.0[1] = BigEndian::load(&key[0..8]);
        state.0[2] = BigEndian::load(&key[8..16]);
        state.permute(12);
        Self {
            sponge: Sponge::from_state(state, 12),
        }
    }

    /// Absorbs `data` into the MAC state.
    pub fn update(&mut self, data: &[u8]) {
        self.sponge.absorb(data);
    }

    /// Returns the tag over the data absorbed so far.
    pub fn sum(&self) -> [u8; TAG_SIZE] {
        let mut copy = self.clone();
        copy.sponge.xor_padded_block();
        let s = copy.sponge.state_mut();
        // the domain bit lands in the capacity, before the last permutation
        s.0[4] ^= 1;
        s.permute(12);

        let s = copy.sponge.state();
        let mut tag = [0u8; TAG_SIZE];
        tag[0..8].copy_from_slice(&s.0[0].to_be_bytes());
        tag[8..16].copy_from_slice(&s.0[1].to_be_bytes());
        tag
    }

    /// Checks `tag` against the data absorbed so far, in constant time.
    ///
    /// A `tag` of the wrong length never verifies.
    pub fn verify(&self, tag: &[u8]) -> bool {
        if tag.len() != TAG_SIZE {
            return false;
        }
        let sum = self.sum();
        let t0 = BigEndian::load(&sum[0..8]) ^ BigEndian::load(&tag[0..8]);
        let t1 = BigEndian::load(&sum[8..16]) ^ BigEndian::load(&tag[8..16]);
        (t0 | t1) == 0
    }
}

impl fmt::Debug for Mac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // keep the keyed state out of logs
        write!(f, "Mac {{ .. }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern_key() -> Vec<u8> {
        (0u8..16).collect()
    }

    // Count = 1 of the asconmacv12 reference KAT
    #[test]
    fn reference_vector() {
        let mac = Mac::new(&pattern_key());
        assert_eq!(
            hex::encode_upper(mac.sum()),
            "EB1AF688825D66BF2D53E135F9323315",
        );

        assert!(mac.verify(&mac.sum()));
        assert!(!mac.verify(&pattern_key()));
    }

    #[test]
    fn sum_is_idempotent() {
        let mut mac = Mac::new(&[0x0a; KEY_SIZE]);
        mac.update(b"message");
        let first = mac.sum();
        assert_eq!(mac.sum(), first);

        mac.update(b" continues");
        let mut control = Mac::new(&[0x0a; KEY_SIZE]);
        control.update(b"message continues");
        assert_eq!(mac.sum(), control.sum());
    }

    #[test]
    fn update_is_streaming_across_the_wide_block() {
        let data: Vec<u8> = (0u8..100).collect();
        let mut oneshot = Mac::new(&pattern_key());
        oneshot.update(&data);
        let want = oneshot.sum();

        for split in [1, 31, 32, 33, 64, 99] {
            let mut mac = Mac::new(&pattern_key());
            mac.update(&data[..split]);
            mac.update(&data[split..]);
            assert_eq!(mac.sum(), want, "split at {split}");
        }
    }

    #[test]
    fn keys_and_messages_separate() {
        let mut a = Mac::new(&[1u8; KEY_SIZE]);
        let mut b = Mac::new(&[2u8; KEY_SIZE]);
        a.update(b"same message");
        b.update(b"same message");
        assert_ne!(a.sum(), b.sum());

        let mut c = Mac::new(&[1u8; KEY_SIZE]);
        c.update(b"other message");
        assert_ne!(a.sum(), c.sum());
    }

    #[test]
    fn verify_rejects_wrong_lengths() {
        let mac = Mac::new(&[0u8; KEY_SIZE]);
        let tag = mac.sum();
        assert!(mac.verify(&tag));
        assert!(!mac.verify(&tag[..15]));
        let mut long = tag.to_vec();
        long.push(0);
        assert!(!mac.verify(&long));
    }

    #[test]
    #[should_panic(expected = "wrong key size")]
    fn short_key_panics() {
        Mac::new(b"short");
    }
}
