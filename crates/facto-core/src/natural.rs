//! Exact non-negative integer arithmetic for factorial computation.
//!
//! Factorials grow super-exponentially, so results must never pass through
//! a fixed-width integer. `Natural` keeps little-endian base-10^9 limbs —
//! wide enough that a limb times a `u32` multiplier plus carry fits in a
//! `u64`, and cheap to render as decimal.

use std::fmt;

const LIMB_BASE: u64 = 1_000_000_000;
const LIMB_DIGITS: usize = 9;

/// Arbitrary-precision non-negative integer.
///
/// Supports exactly what factorial needs: construction from a small value
/// and in-place multiplication by a small value. Limbs are base 10^9,
/// least significant first. The zero value has a single zero limb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Natural {
    limbs: Vec<u32>,
}

impl Natural {
    /// Build from a machine integer.
    pub fn from_u64(mut value: u64) -> Self {
        let mut limbs = vec![(value % LIMB_BASE) as u32];
        value /= LIMB_BASE;
        while value > 0 {
            limbs.push((value % LIMB_BASE) as u32);
            value /= LIMB_BASE;
        }
        Self { limbs }
    }

    pub fn one() -> Self {
        Self::from_u64(1)
    }

    /// Multiply in place by a small factor.
    pub fn mul_small(&mut self, factor: u64) {
        if factor == 0 {
            self.limbs = vec![0];
            return;
        }
        // Factors above one limb are split so the per-limb product
        // (limb * factor + carry) stays within u64.
        if factor >= LIMB_BASE {
            let mut high = self.clone();
            high.mul_small(factor / LIMB_BASE);
            high.shift_limb();
            self.mul_in_limb(factor % LIMB_BASE);
            self.add(&high);
            return;
        }
        self.mul_in_limb(factor);
    }

    /// Number of decimal digits.
    pub fn digits(&self) -> usize {
        let high = *self.limbs.last().unwrap_or(&0);
        let high_digits = if high == 0 {
            1
        } else {
            (high.ilog10() + 1) as usize
        };
        high_digits + (self.limbs.len() - 1) * LIMB_DIGITS
    }

    fn mul_in_limb(&mut self, factor: u64) {
        debug_assert!(factor < LIMB_BASE);
        let mut carry = 0u64;
        for limb in &mut self.limbs {
            let product = *limb as u64 * factor + carry;
            *limb = (product % LIMB_BASE) as u32;
            carry = product / LIMB_BASE;
        }
        while carry > 0 {
            self.limbs.push((carry % LIMB_BASE) as u32);
            carry /= LIMB_BASE;
        }
    }

    /// Multiply by the limb base (append a low zero limb).
    fn shift_limb(&mut self) {
        if self.limbs == [0] {
            return;
        }
        self.limbs.insert(0, 0);
    }

    fn add(&mut self, other: &Natural) {
        let mut carry = 0u64;
        for i in 0..self.limbs.len().max(other.limbs.len()) {
            if i == self.limbs.len() {
                self.limbs.push(0);
            }
            let sum = self.limbs[i] as u64 + *other.limbs.get(i).unwrap_or(&0) as u64 + carry;
            self.limbs[i] = (sum % LIMB_BASE) as u32;
            carry = sum / LIMB_BASE;
        }
        if carry > 0 {
            self.limbs.push(carry as u32);
        }
    }
}

impl fmt::Display for Natural {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.limbs.iter().rev();
        // Highest limb prints without padding; the rest are zero-padded
        // to the full limb width.
        let high = iter.next().unwrap_or(&0);
        write!(f, "{}", high)?;
        for limb in iter {
            write!(f, "{:09}", limb)?;
        }
        Ok(())
    }
}

/// Compute `n!` exactly. By convention `0! = 1`.
pub fn factorial(n: u64) -> Natural {
    let mut acc = Natural::one();
    for i in 2..=n {
        acc.mul_small(i);
    }
    acc
}
