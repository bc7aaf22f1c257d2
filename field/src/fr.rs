//! BN254 scalar field. p = 0x30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001
//!
//! This implementation uses Montgomery form for efficient modular arithmetic.
//! The field element is represented as [u64; 4] in little-endian order.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::{self, Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use core::str::FromStr;
use num_bigint::BigUint;
use p3_field::integers::QuotientMap;
use p3_field::{Field, Packable, PrimeCharacteristicRing, PrimeField, RawDataSerializable};
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::FieldError;

/// Element of the BN254 scalar field.
/// Represented in Montgomery form with [u64; 4]
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct Fr {
    /// Montgomery form: value * R mod p, where R = 2^256
    limbs: [u64; 4],
}

// Field modulus: p = 21888242871839275222246405745257275088548364400416034343698204186575808495617
const MODULUS: [u64; 4] = [
    0x43e1f593f0000001,
    0x2833e84879b97091,
    0xb85045b68181585d,
    0x30644e72e131a029,
];

// R = 2^256 mod p (Montgomery parameter)
const R: [u64; 4] = [
    0xac96341c4ffffffb,
    0x36fc76959f60cd29,
    0x666ea36f7879462e,
    0x0e0a77c19a07df2f,
];

// R^2 = 2^512 mod p (for Montgomery conversion)
const R2: [u64; 4] = [
    0x1bb8e645ae216da7,
    0x53fe3ab1e35c59e3,
    0x8c49833d53bb8085,
    0x0216d0b17f4e44a5,
];

// -p^{-1} mod 2^64 (Montgomery parameter mu)
const MU: u64 = 0xc2e1f593efffffff;

impl Fr {
    /// Zero element (in Montgomery form)
    pub const ZERO: Self = Fr {
        limbs: [0, 0, 0, 0],
    };

    /// One element (in Montgomery form: R mod p)
    pub const ONE: Self = Fr { limbs: R };

    /// Number of significant bits of the modulus.
    pub const MODULUS_BITS: u32 = 254;

    /// Create a field element from a u64 value
    #[inline]
    pub fn from_canonical_u64(val: u64) -> Self {
        Self::from_canonical_limbs_unchecked([val, 0, 0, 0])
    }

    /// Create a field element from a signed integer; negative values map to `p - |val|`.
    #[inline]
    pub fn from_i64(val: i64) -> Self {
        let magnitude = Self::from_canonical_u64(val.unsigned_abs());
        if val < 0 {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Create a field element from canonical little-endian limbs.
    ///
    /// Limbs encoding an integer `>= p` are rejected rather than reduced.
    pub fn from_canonical_limbs(limbs: [u64; 4]) -> Result<Self, FieldError> {
        if is_canonical(limbs) {
            Ok(Self::from_canonical_limbs_unchecked(limbs))
        } else {
            Err(FieldError::NonCanonical(limbs_to_biguint(limbs).to_string()))
        }
    }

    /// Reduce an arbitrary unsigned integer modulo `p`.
    pub fn from_biguint(value: &BigUint) -> Self {
        let reduced = value % Self::order();
        let mut limbs = [0u64; 4];
        for (limb, digit) in limbs.iter_mut().zip(reduced.to_u64_digits()) {
            *limb = digit;
        }
        Self::from_canonical_limbs_unchecked(limbs)
    }

    /// Decode 32 little-endian bytes holding a canonical value.
    pub fn from_bytes_le(bytes: &[u8; 32]) -> Result<Self, FieldError> {
        let mut limbs = [0u64; 4];
        for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            *limb = u64::from_le_bytes(word);
        }
        Self::from_canonical_limbs(limbs)
    }

    /// Canonical value as 32 little-endian bytes.
    pub fn to_bytes_le(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (chunk, limb) in out.chunks_exact_mut(8).zip(self.to_canonical_limbs()) {
            chunk.copy_from_slice(&limb.to_le_bytes());
        }
        out
    }

    /// Convert from Montgomery form to canonical form
    #[inline]
    pub fn to_canonical_limbs(&self) -> [u64; 4] {
        // Multiply by 1 to get out of Montgomery form
        let one = Fr {
            limbs: [1, 0, 0, 0],
        };
        montgomery_mul(*self, one).limbs
    }

    /// Canonical value as an unsigned big integer in `[0, p)`.
    pub fn to_biguint(&self) -> BigUint {
        limbs_to_biguint(self.to_canonical_limbs())
    }

    /// Canonical value if it fits in a u64.
    pub fn to_u64(&self) -> Option<u64> {
        match self.to_canonical_limbs() {
            [low, 0, 0, 0] => Some(low),
            _ => None,
        }
    }

    #[inline]
    fn from_canonical_limbs_unchecked(limbs: [u64; 4]) -> Self {
        // Convert to Montgomery form: val * R^2 * R^{-1} = val * R
        montgomery_mul(Fr { limbs }, Fr { limbs: R2 })
    }

    /// Check if this field element is zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs == [0, 0, 0, 0]
    }

    /// Compute multiplicative inverse using Fermat's little theorem: a^{-1} = a^{p-2}
    ///
    /// Zero maps to zero.
    pub fn inverse(&self) -> Self {
        let exp = sub_mod(MODULUS, [2, 0, 0, 0]);
        self.pow_vartime(exp)
    }

    /// Variable-time exponentiation
    fn pow_vartime(&self, exp: [u64; 4]) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }

        let mut result = Self::ONE;
        let mut base = *self;

        // Process bits from least significant to most significant
        for &limb in exp.iter() {
            let mut remaining = limb;
            for _ in 0..64 {
                if remaining & 1 == 1 {
                    result *= base;
                }
                base = base * base;
                remaining >>= 1;
            }
        }

        result
    }
}

fn limbs_to_biguint(limbs: [u64; 4]) -> BigUint {
    let mut bytes = Vec::with_capacity(32);
    for &limb in &limbs {
        bytes.extend_from_slice(&limb.to_le_bytes());
    }
    BigUint::from_bytes_le(&bytes)
}

/// Helper: Add two 256-bit numbers mod p
#[inline]
const fn add_mod(a: [u64; 4], b: [u64; 4]) -> [u64; 4] {
    let (r0, carry) = a[0].overflowing_add(b[0]);
    let (r1, carry) = carrying_add(a[1], b[1], carry);
    let (r2, carry) = carrying_add(a[2], b[2], carry);
    let (r3, carry) = carrying_add(a[3], b[3], carry);

    let (s0, borrow) = r0.overflowing_sub(MODULUS[0]);
    let (s1, borrow) = borrowing_sub(r1, MODULUS[1], borrow);
    let (s2, borrow) = borrowing_sub(r2, MODULUS[2], borrow);
    let (s3, borrow) = borrowing_sub(r3, MODULUS[3], borrow);

    // Keep the reduced value when the sum reached p
    if carry || !borrow {
        [s0, s1, s2, s3]
    } else {
        [r0, r1, r2, r3]
    }
}

/// Helper: Subtract two 256-bit numbers mod p
#[inline]
const fn sub_mod(a: [u64; 4], b: [u64; 4]) -> [u64; 4] {
    let (r0, borrow) = a[0].overflowing_sub(b[0]);
    let (r1, borrow) = borrowing_sub(a[1], b[1], borrow);
    let (r2, borrow) = borrowing_sub(a[2], b[2], borrow);
    let (r3, borrow) = borrowing_sub(a[3], b[3], borrow);

    if borrow {
        let (r0, carry) = r0.overflowing_add(MODULUS[0]);
        let (r1, carry) = carrying_add(r1, MODULUS[1], carry);
        let (r2, carry) = carrying_add(r2, MODULUS[2], carry);
        let (r3, _) = carrying_add(r3, MODULUS[3], carry);
        [r0, r1, r2, r3]
    } else {
        [r0, r1, r2, r3]
    }
}

/// Helper: Negate a 256-bit number mod p
#[inline]
const fn neg_mod(a: [u64; 4]) -> [u64; 4] {
    if a[0] == 0 && a[1] == 0 && a[2] == 0 && a[3] == 0 {
        return [0, 0, 0, 0];
    }
    sub_mod(MODULUS, a)
}

#[inline]
const fn is_canonical(limbs: [u64; 4]) -> bool {
    let (_, borrow) = limbs[0].overflowing_sub(MODULUS[0]);
    let (_, borrow) = borrowing_sub(limbs[1], MODULUS[1], borrow);
    let (_, borrow) = borrowing_sub(limbs[2], MODULUS[2], borrow);
    let (_, borrow) = borrowing_sub(limbs[3], MODULUS[3], borrow);
    borrow
}

#[inline]
const fn carrying_add(a: u64, b: u64, carry: bool) -> (u64, bool) {
    let (sum, overflow1) = a.overflowing_add(b);
    let (sum, overflow2) = sum.overflowing_add(carry as u64);
    (sum, overflow1 || overflow2)
}

#[inline]
const fn borrowing_sub(a: u64, b: u64, borrow: bool) -> (u64, bool) {
    let (diff, overflow1) = a.overflowing_sub(b);
    let (diff, overflow2) = diff.overflowing_sub(borrow as u64);
    (diff, overflow1 || overflow2)
}

/// Montgomery multiplication: (a * b * R^{-1}) mod p
#[inline]
fn montgomery_mul(a: Fr, b: Fr) -> Fr {
    let mut t = [0u64; 8];

    for i in 0..4 {
        let mut carry = 0u128;
        for j in 0..4 {
            let product = (a.limbs[i] as u128) * (b.limbs[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = product as u64;
            carry = product >> 64;
        }
        t[i + 4] = carry as u64;
    }

    for i in 0..4 {
        let k = t[i].wrapping_mul(MU);
        let mut carry = 0u128;

        for j in 0..4 {
            let product = (k as u128) * (MODULUS[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = product as u64;
            carry = product >> 64;
        }

        for j in 4..8 - i {
            let sum = (t[i + j] as u128) + carry;
            t[i + j] = sum as u64;
            carry = sum >> 64;
        }
    }

    // High half is below 2p; one conditional subtraction lands in [0, p)
    let result = [t[4], t[5], t[6], t[7]];
    if is_canonical(result) {
        Fr { limbs: result }
    } else {
        Fr {
            limbs: sub_mod(result, MODULUS),
        }
    }
}

impl PrimeCharacteristicRing for Fr {
    type PrimeSubfield = Self;

    const ZERO: Self = Self::ZERO;
    const ONE: Self = Self::ONE;
    const TWO: Self = Fr {
        limbs: add_mod(R, R),
    };
    const NEG_ONE: Self = Fr {
        limbs: sub_mod(MODULUS, R),
    };

    #[inline]
    fn from_prime_subfield(elem: Self::PrimeSubfield) -> Self {
        elem
    }

    #[inline]
    fn halve(&self) -> Self {
        // (self + p) / 2 if odd, else self / 2; the sum never exceeds 2^255
        let source = if self.limbs[0] & 1 == 1 {
            let (r0, carry) = self.limbs[0].overflowing_add(MODULUS[0]);
            let (r1, carry) = carrying_add(self.limbs[1], MODULUS[1], carry);
            let (r2, carry) = carrying_add(self.limbs[2], MODULUS[2], carry);
            let (r3, _) = carrying_add(self.limbs[3], MODULUS[3], carry);
            [r0, r1, r2, r3]
        } else {
            self.limbs
        };
        Fr {
            limbs: [
                (source[0] >> 1) | (source[1] << 63),
                (source[1] >> 1) | (source[2] << 63),
                (source[2] >> 1) | (source[3] << 63),
                source[3] >> 1,
            ],
        }
    }
}

impl Packable for Fr {}

impl RawDataSerializable for Fr {
    const NUM_BYTES: usize = 32;

    fn into_bytes(self) -> impl IntoIterator<Item = u8> {
        self.to_bytes_le()
    }
}

impl Distribution<Fr> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Fr {
        loop {
            let mut limbs: [u64; 4] = rng.random();
            // p < 2^254, clearing the top bits keeps rejection rare
            limbs[3] &= u64::MAX >> 2;

            if is_canonical(limbs) {
                return Fr::from_canonical_limbs_unchecked(limbs);
            }
        }
    }
}

impl Field for Fr {
    type Packing = Self;

    // Generator g = 5 in Montgomery form
    const GENERATOR: Self = Fr {
        limbs: [
            0x1b0d0ef99fffffe6,
            0xeaba68a3a32a913f,
            0x47d8eb76d8dd0689,
            0x15d0085520f5bbc3,
        ],
    };

    fn try_inverse(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(self.inverse())
        }
    }

    fn order() -> BigUint {
        limbs_to_biguint(MODULUS)
    }
}

impl PrimeField for Fr {
    fn as_canonical_biguint(&self) -> BigUint {
        self.to_biguint()
    }
}

macro_rules! impl_quotient_map_unsigned {
    ($($int:ty),*) => {$(
        impl QuotientMap<$int> for Fr {
            fn from_int(int: $int) -> Self {
                Self::from_canonical_u64(int as u64)
            }

            fn from_canonical_checked(int: $int) -> Option<Self> {
                Some(Self::from_canonical_u64(int as u64))
            }

            unsafe fn from_canonical_unchecked(int: $int) -> Self {
                Self::from_canonical_u64(int as u64)
            }
        }
    )*};
}

macro_rules! impl_quotient_map_signed {
    ($($int:ty),*) => {$(
        impl QuotientMap<$int> for Fr {
            fn from_int(int: $int) -> Self {
                Self::from_i64(int as i64)
            }

            fn from_canonical_checked(int: $int) -> Option<Self> {
                Some(Self::from_i64(int as i64))
            }

            unsafe fn from_canonical_unchecked(int: $int) -> Self {
                Self::from_i64(int as i64)
            }
        }
    )*};
}

impl_quotient_map_unsigned!(u8, u16, u32, u64);
impl_quotient_map_signed!(i8, i16, i32, i64);

impl QuotientMap<u128> for Fr {
    fn from_int(int: u128) -> Self {
        Self::from_canonical_limbs_unchecked([int as u64, (int >> 64) as u64, 0, 0])
    }

    fn from_canonical_checked(int: u128) -> Option<Self> {
        Some(Self::from_int(int))
    }

    unsafe fn from_canonical_unchecked(int: u128) -> Self {
        Self::from_int(int)
    }
}

impl QuotientMap<i128> for Fr {
    fn from_int(int: i128) -> Self {
        let magnitude = <Self as QuotientMap<u128>>::from_int(int.unsigned_abs());
        if int < 0 {
            -magnitude
        } else {
            magnitude
        }
    }

    fn from_canonical_checked(int: i128) -> Option<Self> {
        Some(Self::from_int(int))
    }

    unsafe fn from_canonical_unchecked(int: i128) -> Self {
        Self::from_int(int)
    }
}

impl From<u64> for Fr {
    fn from(value: u64) -> Self {
        Self::from_canonical_u64(value)
    }
}

impl From<i64> for Fr {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

// Arithmetic operations
impl Add for Fr {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Fr {
            limbs: add_mod(self.limbs, rhs.limbs),
        }
    }
}

impl AddAssign for Fr {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Fr {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Fr {
            limbs: sub_mod(self.limbs, rhs.limbs),
        }
    }
}

impl SubAssign for Fr {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Fr {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Fr {
            limbs: neg_mod(self.limbs),
        }
    }
}

impl Mul for Fr {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        montgomery_mul(self, rhs)
    }
}

impl MulAssign for Fr {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Div for Fr {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        self * rhs.inverse()
    }
}

impl DivAssign for Fr {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl Sum for Fr {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl Product for Fr {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

// Ordering follows the canonical integer representative, not the Montgomery limbs.
impl Ord for Fr {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.to_canonical_limbs();
        let rhs = other.to_canonical_limbs();
        lhs.iter().rev().cmp(rhs.iter().rev())
    }
}

impl PartialOrd for Fr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Fr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.limbs.hash(state);
    }
}

impl Display for Fr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.to_biguint(), f)
    }
}

impl Debug for Fr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Fr({})", self)
    }
}

impl FromStr for Fr {
    type Err = FieldError;

    /// Parse a base-10 canonical representative.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FieldError::InvalidDecimal(s.to_string()));
        }
        let value = BigUint::parse_bytes(trimmed.as_bytes(), 10)
            .ok_or_else(|| FieldError::InvalidDecimal(s.to_string()))?;
        if value >= Self::order() {
            return Err(FieldError::NonCanonical(value.to_string()));
        }
        Ok(Self::from_biguint(&value))
    }
}

// Human-readable formats carry decimal strings; binary formats carry 32 LE bytes.
impl Serialize for Fr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            serializer.serialize_bytes(&self.to_bytes_le())
        }
    }
}

impl<'de> Deserialize<'de> for Fr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(FrVisitor)
        } else {
            deserializer.deserialize_bytes(FrVisitor)
        }
    }
}

struct FrVisitor;

impl<'de> Visitor<'de> for FrVisitor {
    type Value = Fr;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a canonical BN254 scalar as a decimal string, an integer or 32 LE bytes")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Fr, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Fr, E> {
        self.visit_str(&v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Fr, E> {
        Ok(Fr::from_canonical_u64(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Fr, E> {
        Ok(Fr::from_i64(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Fr, E> {
        let bytes: &[u8; 32] = v
            .try_into()
            .map_err(|_| E::invalid_length(v.len(), &"32 bytes"))?;
        Fr::from_bytes_le(bytes).map_err(E::custom)
    }
}
