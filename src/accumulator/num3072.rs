//! [Num3072] is a residue modulo `M = 2^3072 - 1103717`, the prime modulus MuHash3072 works
//! with. Every non-zero residue is a unit, so the non-zero residues form the multiplicative group
//! elements of a set hash are mapped into.
//!
//! Values are stored as 48 little-endian 64-bit limbs and are only partially reduced: anything in
//! `[0, 2^3072)` is a valid representation, and the (at most 1103717) values in `[M, 2^3072)` are
//! folded back into `[0, M)` right before they are compared or serialized. Multiplication runs a
//! fixed number of limb operations regardless of the operands, and the final reduction uses
//! [subtle] to select its result without branching on the value.
//!
//! # Example
//! ```
//! use muhash::accumulator::num3072::Num3072;
//! use muhash::accumulator::num3072::BYTE_SIZE;
//!
//! let mut bytes = [0; BYTE_SIZE];
//! bytes[0] = 2;
//! let two = Num3072::from_le_bytes(&bytes);
//!
//! let mut x = two;
//! x *= &two;
//! x.divide(&two);
//! assert_eq!(x, two);
//! ```
use std::fmt::Debug;
use std::ops::MulAssign;

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

/// Number of 64-bit limbs in a [Num3072].
pub const LIMBS: usize = 48;
/// Length of the little-endian byte encoding of a [Num3072].
pub const BYTE_SIZE: usize = 384;
/// `2^3072 - M`. Since `2^3072 = M + MAX_PRIME_DIFF`, anything above bit 3072 folds back in as a
/// multiple of this constant.
pub const MAX_PRIME_DIFF: u64 = 1103717;

/// Inversion raises to `M - 2`. Its bits 21..3072 are all set; these are the remaining ones.
const INV_EXP_LOW: u64 = (1 << INV_EXP_LOW_BITS) - MAX_PRIME_DIFF - 2;
const INV_EXP_LOW_BITS: u32 = 21;
const BITS: u32 = 3072;

#[derive(Clone, Copy)]
pub struct Num3072 {
    limbs: [u64; LIMBS],
}

impl Num3072 {
    /// The multiplicative identity.
    pub fn one() -> Self {
        let mut limbs = [0; LIMBS];
        limbs[0] = 1;
        Num3072 { limbs }
    }

    pub fn zero() -> Self {
        Num3072 { limbs: [0; LIMBS] }
    }

    /// Interprets `bytes` as a little-endian 3072-bit integer. Values at or above the modulus
    /// are accepted and behave as their residue.
    pub fn from_le_bytes(bytes: &[u8; BYTE_SIZE]) -> Self {
        let mut limbs = [0; LIMBS];
        for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut word = [0; 8];
            word.copy_from_slice(chunk);
            *limb = u64::from_le_bytes(word);
        }
        Num3072 { limbs }
    }

    /// Returns the canonical (fully reduced) little-endian encoding of this residue.
    pub fn to_le_bytes(&self) -> [u8; BYTE_SIZE] {
        let reduced = self.reduced();
        let mut bytes = [0; BYTE_SIZE];
        for (chunk, limb) in bytes.chunks_exact_mut(8).zip(reduced.limbs.iter()) {
            chunk.copy_from_slice(&limb.to_le_bytes());
        }
        bytes
    }

    /// Whether this is a multiple of the modulus, the only residue without an inverse.
    pub fn is_zero(&self) -> bool {
        *self == Num3072::zero()
    }

    pub fn square(&self) -> Self {
        mul_reduce(self, self)
    }

    /// Computes the modular inverse by raising to `M - 2`. The exponent is public, so the
    /// sequence of squarings and multiplications is the same for every input.
    ///
    /// The inverse of zero comes out as zero; [Num3072::divide] refuses that case.
    pub fn inverse(&self) -> Self {
        // The top bit is consumed by starting from `self`.
        let mut out = *self;
        for _ in INV_EXP_LOW_BITS..(BITS - 1) {
            out = out.square();
            out = mul_reduce(&out, self);
        }
        for bit in (0..INV_EXP_LOW_BITS).rev() {
            out = out.square();
            if (INV_EXP_LOW >> bit) & 1 == 1 {
                out = mul_reduce(&out, self);
            }
        }
        out
    }

    /// Sets `self` to `self / divisor (mod M)`.
    ///
    /// # Panics
    /// If `divisor` is a multiple of the modulus. Honest use never gets here, since it needs
    /// an element whose encoding is exactly zero mod `M`; reaching it means the state was
    /// corrupted and silently producing a digest would be wrong.
    pub fn divide(&mut self, divisor: &Num3072) {
        assert!(
            !divisor.is_zero(),
            "Num3072::divide: divisor is not invertible modulo 2^3072 - {MAX_PRIME_DIFF}"
        );
        *self = mul_reduce(self, &divisor.inverse());
    }

    /// Folds a value in `[M, 2^3072)` down to `[0, M)`.
    fn reduced(&self) -> Self {
        // self >= M exactly when self + MAX_PRIME_DIFF carries out of 3072 bits, and in that
        // case the truncated sum is self - M.
        let mut shifted = self.limbs;
        let overflow = add_small(&mut shifted, MAX_PRIME_DIFF as u128);
        let overflow = Choice::from(overflow as u8);

        let mut limbs = [0; LIMBS];
        for (i, limb) in limbs.iter_mut().enumerate() {
            *limb = u64::conditional_select(&self.limbs[i], &shifted[i], overflow);
        }
        Num3072 { limbs }
    }
}

impl PartialEq for Num3072 {
    fn eq(&self, other: &Self) -> bool {
        let left = self.reduced();
        let right = other.reduced();
        left.limbs[..].ct_eq(&right.limbs[..]).into()
    }
}

impl Eq for Num3072 {}

impl MulAssign<&Num3072> for Num3072 {
    fn mul_assign(&mut self, rhs: &Num3072) {
        *self = mul_reduce(self, rhs);
    }
}

impl Debug for Num3072 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Big-endian hex of the reduced value, the way one would write the number down.
        let mut s = String::with_capacity(BYTE_SIZE * 2);
        for byte in self.to_le_bytes().iter().rev() {
            s.push_str(&format!("{byte:02x}"));
        }
        write!(f, "Num3072({s})")
    }
}

/// Adds `value` into `limbs` and returns whatever carries out of the top limb.
fn add_small(limbs: &mut [u64; LIMBS], value: u128) -> u128 {
    let mut carry = value;
    for limb in limbs.iter_mut() {
        let t = *limb as u128 + carry;
        *limb = t as u64;
        carry = t >> 64;
    }
    carry
}

/// Schoolbook product followed by folding the upper 3072 bits back in.
fn mul_reduce(a: &Num3072, b: &Num3072) -> Num3072 {
    let mut wide = [0u64; 2 * LIMBS];
    for i in 0..LIMBS {
        let mut carry = 0u64;
        for j in 0..LIMBS {
            let t = (a.limbs[i] as u128) * (b.limbs[j] as u128)
                + wide[i + j] as u128
                + carry as u128;
            wide[i + j] = t as u64;
            carry = (t >> 64) as u64;
        }
        wide[i + LIMBS] = carry;
    }
    reduce_wide(&wide)
}

/// Reduces a 6144-bit product to a value below 2^3072 congruent to it mod M.
fn reduce_wide(wide: &[u64; 2 * LIMBS]) -> Num3072 {
    // lo + hi * 2^3072 = lo + hi * MAX_PRIME_DIFF (mod M)
    let mut limbs = [0u64; LIMBS];
    let mut carry = 0u128;
    for (i, limb) in limbs.iter_mut().enumerate() {
        let t = wide[i] as u128 + (wide[i + LIMBS] as u128) * (MAX_PRIME_DIFF as u128) + carry;
        *limb = t as u64;
        carry = t >> 64;
    }

    // The carry is now below MAX_PRIME_DIFF + 2, fold it once more. If that overflows again
    // the low limbs are tiny, so the last fold cannot.
    let carry = add_small(&mut limbs, carry * MAX_PRIME_DIFF as u128);
    let carry = add_small(&mut limbs, carry * MAX_PRIME_DIFF as u128);
    debug_assert_eq!(carry, 0);

    Num3072 { limbs }
}

#[cfg(test)]
mod test {
    use num_bigint::BigUint;
    use rand::rngs::StdRng;
    use rand::Rng;
    use rand::SeedableRng;

    use super::Num3072;
    use super::BYTE_SIZE;
    use super::MAX_PRIME_DIFF;

    fn modulus() -> BigUint {
        (BigUint::from(1u32) << 3072usize) - BigUint::from(MAX_PRIME_DIFF)
    }

    fn to_big(n: &Num3072) -> BigUint {
        BigUint::from_bytes_le(&n.to_le_bytes())
    }

    fn from_big(n: &BigUint) -> Num3072 {
        let le = n.to_bytes_le();
        let mut bytes = [0; BYTE_SIZE];
        bytes[..le.len()].copy_from_slice(&le);
        Num3072::from_le_bytes(&bytes)
    }

    fn random_bytes(rng: &mut StdRng) -> [u8; BYTE_SIZE] {
        let mut bytes = [0; BYTE_SIZE];
        rng.fill(&mut bytes[..]);
        bytes
    }

    #[test]
    fn test_one_encoding() {
        let bytes = Num3072::one().to_le_bytes();
        assert_eq!(bytes[0], 1);
        assert!(bytes[1..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_mul_matches_bigint() {
        let m = modulus();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..32 {
            let a_bytes = random_bytes(&mut rng);
            let b_bytes = random_bytes(&mut rng);
            let mut a = Num3072::from_le_bytes(&a_bytes);
            let b = Num3072::from_le_bytes(&b_bytes);
            a *= &b;

            let expected =
                BigUint::from_bytes_le(&a_bytes) * BigUint::from_bytes_le(&b_bytes) % &m;
            assert_eq!(to_big(&a), expected);
        }
    }

    #[test]
    fn test_mul_all_ones() {
        // 2^3072 - 1 is the largest representable value and stresses every carry path.
        let m = modulus();
        let max = Num3072::from_le_bytes(&[0xff; BYTE_SIZE]);
        let square = max.square();

        let big_max = BigUint::from_bytes_le(&[0xff; BYTE_SIZE]);
        assert_eq!(to_big(&square), &big_max * &big_max % &m);
        assert_eq!(to_big(&max), BigUint::from(MAX_PRIME_DIFF - 1));
    }

    #[test]
    fn test_reduce_near_modulus() {
        let m = modulus();
        assert!(from_big(&m).is_zero());
        assert_eq!(
            from_big(&(&m + BigUint::from(5u32))),
            from_big(&BigUint::from(5u32))
        );
        assert_eq!(
            from_big(&(&m - BigUint::from(1u32))).to_le_bytes(),
            (&m - BigUint::from(1u32)).to_bytes_le()[..]
        );
        // Unreduced and reduced forms of the same residue compare equal
        let mut two_bytes = [0; BYTE_SIZE];
        two_bytes[0] = 2;
        assert_eq!(
            from_big(&(&m + BigUint::from(2u32))),
            Num3072::from_le_bytes(&two_bytes)
        );
    }

    #[test]
    fn test_inverse() {
        let m = modulus();
        let exponent = &m - BigUint::from(2u32);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2 {
            let bytes = random_bytes(&mut rng);
            let a = Num3072::from_le_bytes(&bytes);
            let inverse = a.inverse();

            let expected = BigUint::from_bytes_le(&bytes).modpow(&exponent, &m);
            assert_eq!(to_big(&inverse), expected);

            let mut product = a;
            product *= &inverse;
            assert_eq!(product, Num3072::one());
        }
    }

    #[test]
    fn test_divide() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = Num3072::from_le_bytes(&random_bytes(&mut rng));
        let b = Num3072::from_le_bytes(&random_bytes(&mut rng));

        let mut x = a;
        x *= &b;
        x.divide(&b);
        assert_eq!(x, a);

        let mut one = Num3072::one();
        one.divide(&Num3072::one());
        assert_eq!(one, Num3072::one());
    }

    #[test]
    #[should_panic(expected = "not invertible")]
    fn test_divide_by_modulus() {
        let mut x = Num3072::one();
        x.divide(&from_big(&modulus()));
    }

    #[test]
    fn test_debug_is_big_endian() {
        let mut bytes = [0; BYTE_SIZE];
        bytes[0] = 0xab;
        let s = format!("{:?}", Num3072::from_le_bytes(&bytes));
        assert!(s.starts_with("Num3072(0000"));
        assert!(s.ends_with("00ab)"));
    }
}
