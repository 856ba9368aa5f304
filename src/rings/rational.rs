use std::{cmp::Ordering, fmt::Display, str::FromStr};

use rand::Rng;
use rug::{ops::Pow, Integer, Rational as ArbitraryPrecisionRational};

use crate::utils;

use super::{Field, OrderedField, Ring};

/// The field of rational numbers. Arithmetic is exact.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct RationalField;

impl RationalField {
    pub fn new() -> RationalField {
        RationalField
    }
}

/// A rational number in canonical form: the denominator is positive and
/// coprime to the numerator. Numbers that fit in two `i64`s are always stored
/// as `Natural`, so that structural equality is numerical equality.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Rational {
    Natural(i64, i64),
    Large(ArbitraryPrecisionRational),
}

impl Rational {
    /// Create the rational `num/den`. Panics when `den` is zero.
    pub fn new(num: i64, den: i64) -> Rational {
        Rational::from_i128(num as i128, den as i128)
    }

    fn from_i128(num: i128, den: i128) -> Rational {
        if den == 0 {
            panic!("Division by zero");
        }

        let g = utils::gcd_signed_i128(num, den) as i128;
        let (mut num, mut den) = (num / g, den / g);
        if den < 0 {
            num = -num;
            den = -den;
        }

        match (i64::try_from(num), i64::try_from(den)) {
            (Ok(n), Ok(d)) => Rational::Natural(n, d),
            _ => Rational::Large(ArbitraryPrecisionRational::from((
                Integer::from(num),
                Integer::from(den),
            ))),
        }
    }

    /// Wrap an arbitrary-precision rational, downcasting when it fits.
    pub fn from_large(r: ArbitraryPrecisionRational) -> Rational {
        match (r.numer().to_i64(), r.denom().to_i64()) {
            (Some(n), Some(d)) => Rational::Natural(n, d),
            _ => Rational::Large(r),
        }
    }

    pub fn to_large(&self) -> ArbitraryPrecisionRational {
        match self {
            Rational::Natural(n, d) => ArbitraryPrecisionRational::from((*n, *d)),
            Rational::Large(r) => r.clone(),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Rational::Natural(n, _) => *n == 0,
            Rational::Large(r) => r.cmp0() == Ordering::Equal,
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Rational::Natural(n, _) => *n < 0,
            Rational::Large(r) => r.cmp0() == Ordering::Less,
        }
    }

    pub fn abs(&self) -> Rational {
        match self {
            Rational::Natural(n, d) => Rational::from_i128((*n as i128).abs(), *d as i128),
            Rational::Large(r) => Rational::from_large(r.clone().abs()),
        }
    }

    pub fn to_f64(&self) -> f64 {
        const EXACT: u64 = 1 << 53;
        match self {
            Rational::Natural(n, d) if n.unsigned_abs() < EXACT && d.unsigned_abs() < EXACT => {
                *n as f64 / *d as f64
            }
            _ => self.to_large().to_f64(),
        }
    }

    /// Convert a float exactly, so `0.1` becomes `3602879701896397/36028797018963968`.
    /// Decimal literals should be parsed instead.
    pub fn from_f64(f: f64) -> Option<Rational> {
        ArbitraryPrecisionRational::from_f64(f).map(Rational::from_large)
    }

    /// Format the number rounded to `precision` decimal places, with ties
    /// rounded away from zero.
    pub fn to_decimal_string(&self, precision: usize) -> String {
        if let Rational::Natural(n, d) = self {
            let scaled = u32::try_from(precision)
                .ok()
                .and_then(|p| 10i128.checked_pow(p))
                .and_then(|scale| (*n as i128).checked_mul(scale));
            if let Some(q) = scaled.and_then(|s| utils::round_half_away_i128(s, *d as i128)) {
                return utils::place_decimal_point(
                    *n < 0,
                    &q.unsigned_abs().to_string(),
                    precision,
                );
            }
        }

        let negative = self.is_negative();
        let (num, den) = self.to_large().into_numer_denom();
        let scaled = num.abs() * Integer::from(10u32).pow(precision as u32);
        let two_den = Integer::from(&den * 2u32);
        let q = (scaled * 2u32 + den) / two_den;
        utils::place_decimal_point(negative, &q.to_string(), precision)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Rational::Natural(n, 1)
    }
}

impl From<(i64, i64)> for Rational {
    fn from((num, den): (i64, i64)) -> Self {
        Rational::new(num, den)
    }
}

impl From<ArbitraryPrecisionRational> for Rational {
    fn from(r: ArbitraryPrecisionRational) -> Self {
        Rational::from_large(r)
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Rational::Natural(n1, d1), Rational::Natural(n2, d2)) => {
                (*n1 as i128 * *d2 as i128).cmp(&(*n2 as i128 * *d1 as i128))
            }
            _ => self.to_large().cmp(&other.to_large()),
        }
    }
}

impl FromStr for Rational {
    type Err = String;

    /// Parse a decimal literal exactly: `5.862` becomes `2931/500`.
    /// Fractions `p/q` and exponents `1.5e-3` are accepted as well.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // keeps 10^exponent within a sane size
        const MAX_EXPONENT: u64 = 4096;

        let s = s.trim();
        if s.is_empty() {
            return Err("Empty number literal".to_owned());
        }

        if s.contains('/') {
            let r: ArbitraryPrecisionRational = s
                .parse()
                .map_err(|e| format!("Invalid rational '{}': {}", s, e))?;
            return Ok(Rational::from_large(r));
        }

        let (mantissa, exponent) = match s.find(|c: char| c == 'e' || c == 'E') {
            Some(pos) => {
                let e = s[pos + 1..]
                    .parse::<i64>()
                    .map_err(|e| format!("Invalid exponent in '{}': {}", s, e))?;
                (&s[..pos], e)
            }
            None => (s, 0),
        };

        let (negative, unsigned) = match mantissa.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
        };

        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, f),
            None => (unsigned, ""),
        };

        if int_part.is_empty() && frac_part.is_empty()
            || !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(format!("Invalid number literal '{}'", s));
        }

        let shift = exponent
            .checked_sub(frac_part.len() as i64)
            .filter(|shift| shift.unsigned_abs() <= MAX_EXPONENT)
            .ok_or_else(|| format!("Exponent of '{}' is out of range", s))?;

        let mut num: Integer = format!("{}{}", int_part, frac_part)
            .parse()
            .map_err(|e| format!("Invalid number literal '{}': {}", s, e))?;
        if negative {
            num = -num;
        }

        let power = Integer::from(10u32).pow(shift.unsigned_abs() as u32);
        let r = if shift >= 0 {
            ArbitraryPrecisionRational::from(num * power)
        } else {
            ArbitraryPrecisionRational::from((num, power))
        };

        Ok(Rational::from_large(r))
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rational::Natural(n, d) => {
                if *d == 1 {
                    f.write_fmt(format_args!("{}", n))
                } else {
                    f.write_fmt(format_args!("{}/{}", n, d))
                }
            }
            Rational::Large(r) => r.fmt(f),
        }
    }
}

impl Display for RationalField {
    fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Ok(())
    }
}

impl Ring for RationalField {
    type Element = Rational;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        match (a, b) {
            (Rational::Natural(n1, d1), Rational::Natural(n2, d2)) => Rational::from_i128(
                *n1 as i128 * *d2 as i128 + *n2 as i128 * *d1 as i128,
                *d1 as i128 * *d2 as i128,
            ),
            _ => {
                let mut r = a.to_large();
                r += b.to_large();
                Rational::from_large(r)
            }
        }
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.add(a, &self.neg(b))
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        match (a, b) {
            (Rational::Natural(n1, d1), Rational::Natural(n2, d2)) => Rational::from_i128(
                *n1 as i128 * *n2 as i128,
                *d1 as i128 * *d2 as i128,
            ),
            _ => {
                let mut r = a.to_large();
                r *= b.to_large();
                Rational::from_large(r)
            }
        }
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.add(a, b);
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.sub(a, b);
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        match a {
            Rational::Natural(n, d) => Rational::from_i128(-(*n as i128), *d as i128),
            Rational::Large(r) => Rational::from_large(-r.clone()),
        }
    }

    fn zero() -> Self::Element {
        Rational::Natural(0, 1)
    }

    fn one(&self) -> Self::Element {
        Rational::Natural(1, 1)
    }

    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        if e > u32::MAX as u64 {
            panic!("Power of exponentation is larger than 2^32: {}", e);
        }
        let e = e as u32;

        match b {
            Rational::Natural(n1, d1) => {
                if let Some(pn) = n1.checked_pow(e) {
                    if let Some(pd) = d1.checked_pow(e) {
                        return Rational::Natural(pn, pd);
                    }
                }

                Rational::from_large(ArbitraryPrecisionRational::from((*n1, *d1)).pow(e))
            }
            Rational::Large(r) => Rational::from_large(r.clone().pow(e)),
        }
    }

    fn is_zero(a: &Self::Element) -> bool {
        a.is_zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        matches!(a, Rational::Natural(1, 1))
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        Rational::Natural(rng.gen_range(range.0..range.1), 1)
    }
}

impl Field for RationalField {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.mul(a, &self.inv(b))
    }

    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.div(a, b);
    }

    fn inv(&self, a: &Self::Element) -> Self::Element {
        match a {
            Rational::Natural(n, d) => Rational::from_i128(*d as i128, *n as i128),
            Rational::Large(r) => Rational::from_large(r.clone().recip()),
        }
    }
}

impl OrderedField for RationalField {
    fn abs(&self, a: &Self::Element) -> Self::Element {
        a.abs()
    }

    fn cmp(&self, a: &Self::Element, b: &Self::Element) -> Ordering {
        a.cmp(b)
    }

    fn to_f64(&self, a: &Self::Element) -> f64 {
        a.to_f64()
    }

    fn from_f64(&self, a: f64) -> Option<Self::Element> {
        Rational::from_f64(a)
    }

    fn parse(&self, s: &str) -> Result<Self::Element, String> {
        s.parse()
    }

    fn to_decimal_string(&self, a: &Self::Element, precision: usize) -> String {
        a.to_decimal_string(precision)
    }
}
