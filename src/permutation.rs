//! The 320-bit Ascon permutation.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Round constants, one per round of `p^12`.
///
/// Every parameter set schedules its constants from the tail of this table:
/// `p^12` consumes all twelve entries, `p^8` entries `4..`, `p^6` entries
/// `6..`.
pub(crate) const ROUND_CONSTANTS: [u64; 12] = [
    0xf0, 0xe1, 0xd2, 0xc3, 0xb4, 0xa5, 0x96, 0x87, 0x78, 0x69, 0x5a, 0x4b,
];

/// The permutation state: five 64-bit lanes.
///
/// Modes write their initialization words, key and nonce material into the
/// lanes directly; the byte-level view of a lane is owned by the caller
/// (big-endian for the v1.2 modes, little-endian for the SP 800-232 ones).
#[derive(Clone, Default, Debug, Zeroize, ZeroizeOnDrop)]
pub(crate) struct State(pub(crate) [u64; 5]);

impl State {
    /// Runs the last `rounds` rounds of the permutation in place.
    pub(crate) fn permute(&mut self, rounds: usize) {
        debug_assert!(rounds <= 12);
        let [mut x0, mut x1, mut x2, mut x3, mut x4] = self.0;

        for &rc in &ROUND_CONSTANTS[12 - rounds..] {
            // constant addition
            x2 ^= rc;

            // substitution layer, bit-sliced across the five lanes; the
            // outputs depend on several inputs each, hence the temporaries
            x0 ^= x4;
            x4 ^= x3;
            x2 ^= x1;
            let t0 = !x0 & x1;
            let t1 = !x1 & x2;
            let t2 = !x2 & x3;
            let t3 = !x3 & x4;
            let t4 = !x4 & x0;
            x0 ^= t1;
            x1 ^= t2;
            x2 ^= t3;
            x3 ^= t4;
            x4 ^= t0;
            x1 ^= x0;
            x0 ^= x4;
            x3 ^= x2;
            x2 = !x2;

            // linear diffusion layer
            x0 ^= x0.rotate_right(19) ^ x0.rotate_right(28);
            x1 ^= x1.rotate_right(61) ^ x1.rotate_right(39);
            x2 ^= x2.rotate_right(1) ^ x2.rotate_right(6);
            x3 ^= x3.rotate_right(10) ^ x3.rotate_right(17);
            x4 ^= x4.rotate_right(7) ^ x4.rotate_right(41);
        }

        self.0 = [x0, x1, x2, x3, x4];
    }
}
