//! The buffered absorb/squeeze engine shared by the hash, XOF, CXOF and MAC
//! modes.
//!
//! [`Sponge`] owns the permutation state, a one-block buffer and the phase
//! bookkeeping. The rate and lane byte order are compile-time parameters;
//! the number of rounds between blocks (`p^b`) is chosen at construction so
//! that sibling modes like Ascon-Hash and Ascon-Hasha share the engine. The
//! initial and phase-transition permutations are always `p^12`.
//!
//! The AEAD modes do not go through this type: their duplexing injects key
//! material mid-stream and feeds ciphertext back into the state, so they
//! drive the permutation directly.

use core::marker::PhantomData;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::permutation::State;


/// Lane byte order of a sponge mode.
///
/// The Ascon v1.2 modes treat lanes as big-endian byte strings and pad with
/// a high bit; the NIST SP 800-232 modes mirror both choices.
pub(crate) trait ByteOrder: Clone {
    /// The padding byte marking the end of the message.
    const PAD: u8;

    fn load(bytes: &[u8]) -> u64;
    fn store(bytes: &mut [u8], x: u64);
}

/// Big-endian lane encoding (Ascon v1.2).
#[derive(Clone, Debug)]
pub(crate) struct BigEndian;

/// Little-endian lane encoding (NIST SP 800-232).
#[derive(Clone, Debug)]
pub(crate) struct LittleEndian;

impl ByteOrder for BigEndian {
    const PAD: u8 = 0x80;

    fn load(bytes: &[u8]) -> u64 {
        let mut lane = [0u8; 8];
        lane.copy_from_slice(&bytes[..8]);
        u64::from_be_bytes(lane)
    }

    fn store(bytes: &mut [u8], x: u64) {
        bytes[..8].copy_from_slice(&x.to_be_bytes());
    }
}

impl ByteOrder for LittleEndian {
    const PAD: u8 = 0x01;

    fn load(bytes: &[u8]) -> u64 {
        let mut lane = [0u8; 8];
        lane.copy_from_slice(&bytes[..8]);
        u64::from_le_bytes(lane)
    }

    fn store(bytes: &mut [u8], x: u64) {
        bytes[..8].copy_from_slice(&x.to_le_bytes());
    }
}

/// A buffered duplex sponge over the Ascon permutation.
///
/// `RATE` is the block size in bytes; lanes `0..RATE / 8` form the rate
/// portion of the state. Absorb, then squeeze; absorbing after the first
/// squeeze is a caller bug and panics.
///
/// While squeezing, `len` doubles as the output cursor: `RATE` means the
/// buffered block is spent and a permutation is still owed before the next
/// one, `0` means the next block can be emitted as-is. Keeping that
/// distinction is what makes reads of arbitrary chunk sizes concatenate to
/// the same stream as one large read.
#[derive(Clone, Debug)]
pub(crate) struct Sponge<O: ByteOrder, const RATE: usize> {
    state: State,
    buf: [u8; RATE],
    len: usize,
    rounds_b: usize,
    squeezing: bool,
    _order: PhantomData<O>,
}

impl<O: ByteOrder, const RATE: usize> Sponge<O, RATE> {
    /// Wraps a precomputed initial state.
    pub(crate) fn from_state(state: State, rounds_b: usize) -> Self {
        debug_assert!(RATE % 8 == 0 && RATE < 40, "rate must leave capacity");
        Self {
            state,
            buf: [0; RATE],
            len: 0,
            rounds_b,
            squeezing: false,
            _order: PhantomData,
        }
    }

    /// Loads `iv` into lane 0 of an otherwise zero state and runs `p^12`.
    pub(crate) fn with_iv(iv: u64, rounds_b: usize) -> Self {
        let mut state = State::default();
        state.0[0] = iv;
        state.permute(12);
        Self::from_state(state, rounds_b)
    }

    pub(crate) fn state(&self) -> &State {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    fn xor_block(state: &mut State, block: &[u8]) {
        for (i, lane) in block.chunks_exact(8).enumerate() {
            state.0[i] ^= O::load(lane);
        }
    }

    fn store_block(state: &State, block: &mut [u8]) {
        for (i, lane) in block.chunks_exact_mut(8).enumerate() {
            O::store(lane, state.0[i]);
        }
    }

    /// Absorbs `input`, running `p^b` after every full block.
    ///
    /// Panics once squeezing has begun.
    pub(crate) fn absorb(&mut self, mut input: &[u8]) {
        assert!(!self.squeezing, "absorb called after squeeze");

        // top up and drain the buffer first
        if self.len > 0 && self.len + input.len() >= RATE {
            let take = RATE - self.len;
            self.buf[self.len..].copy_from_slice(&input[..take]);
            input = &input[take..];
            Self::xor_block(&mut self.state, &self.buf);
            self.state.permute(self.rounds_b);
            self.len = 0;
        }

        // whole blocks, straight from the input
        while input.len() >= RATE {
            Self::xor_block(&mut self.state, &input[..RATE]);
            self.state.permute(self.rounds_b);
            input = &input[RATE..];
        }

        if !input.is_empty() {
            self.buf[self.len..self.len + input.len()].copy_from_slice(input);
            self.len += input.len();
        }
    }

    /// XORs the padded final block into the state without permuting.
    ///
    /// The buffer may be empty, in which case the block is just the padding
    /// byte.
    pub(crate) fn xor_padded_block(&mut self) {
        debug_assert!(self.len < RATE);
        self.buf[self.len..].fill(0);
        self.buf[self.len] = O::PAD;
        Self::xor_block(&mut self.state, &self.buf);
        self.len = 0;
    }

    /// Absorbs the padded final block and runs the `p^12` phase transition.
    ///
    /// Irreversible with respect to the absorbed data; the sponge is ready
    /// either to squeeze or, for the customized modes, to absorb the next
    /// domain.
    pub(crate) fn pad_absorb(&mut self) {
        self.xor_padded_block();
        self.state.permute(12);
    }

    /// Squeezes `out.len()` bytes of output.
    ///
    /// The first call performs the padding transition. The first block after
    /// the transition is emitted without a permutation; `p^b` runs between
    /// subsequent blocks.
    pub(crate) fn squeeze(&mut self, out: &mut [u8]) {
        if !self.squeezing {
            self.pad_absorb();
            self.squeezing = true;
        }
        let mut pos = 0;

        // leftover bytes of a previously emitted block
        if self.len > 0 && self.len < RATE {
            let take = usize::min(out.len(), RATE - self.len);
            out[..take].copy_from_slice(&self.buf[self.len..self.len + take]);
            self.len += take;
            pos = take;
            if pos == out.len() {
                return;
            }
        }

        // the block pending since the transition, if still unread
        if self.len == 0 && out.len() - pos >= RATE {
            Self::store_block(&self.state, &mut out[pos..pos + RATE]);
            self.len = RATE;
            pos += RATE;
        }

        // whole blocks, straight into the output
        while out.len() - pos >= RATE {
            self.state.permute(self.rounds_b);
            Self::store_block(&self.state, &mut out[pos..pos + RATE]);
            pos += RATE;
        }

        // partial block, kept in the buffer for the next call
        if pos < out.len() {
            if self.len == RATE {
                self.state.permute(self.rounds_b);
            }
            Self::store_block(&self.state, &mut self.buf);
            let take = out.len() - pos;
            out[pos..].copy_from_slice(&self.buf[..take]);
            self.len = take;
        }
    }

    /// One-shot digest into `out`, on a copy of the state.
    ///
    /// The live sponge is left untouched, so repeated calls return the same
    /// bytes and absorption may continue afterwards.
    pub(crate) fn sum_into(&self, out: &mut [u8]) {
        self.clone().squeeze(out);
    }
}

impl<O: ByteOrder, const RATE: usize> Zeroize for Sponge<O, RATE> {
    fn zeroize(&mut self) {
        self.state.zeroize();
        self.buf.zeroize();
        self.len = 0;
        self.rounds_b = 0;
        self.squeezing = false;
    }
}

impl<O: ByteOrder, const RATE: usize> Drop for Sponge<O, RATE> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<O: ByteOrder, const RATE: usize> ZeroizeOnDrop for Sponge<O, RATE> {}
