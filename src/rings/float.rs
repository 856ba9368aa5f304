use std::{cmp::Ordering, fmt::Display};

use rand::Rng;

use super::{Field, OrderedField, Ring};

/// The double-precision floats, treated as a field. Results of elimination over
/// this field carry rounding errors, so comparisons rely on the tolerance.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct FloatField;

impl FloatField {
    pub fn new() -> FloatField {
        FloatField
    }
}

impl Display for FloatField {
    fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Ok(())
    }
}

impl Ring for FloatField {
    type Element = f64;

    #[inline(always)]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a + b
    }

    #[inline(always)]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a - b
    }

    #[inline(always)]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a * b
    }

    #[inline(always)]
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a += b;
    }

    #[inline(always)]
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a -= b;
    }

    #[inline(always)]
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a *= b;
    }

    #[inline(always)]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        -a
    }

    #[inline(always)]
    fn zero() -> Self::Element {
        0.
    }

    #[inline(always)]
    fn one(&self) -> Self::Element {
        1.
    }

    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        if e > i32::MAX as u64 {
            panic!("Power of exponentation is larger than 2^31: {}", e);
        }
        b.powi(e as i32)
    }

    #[inline(always)]
    fn is_zero(a: &Self::Element) -> bool {
        *a == 0.
    }

    #[inline(always)]
    fn is_one(&self, a: &Self::Element) -> bool {
        *a == 1.
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        rng.gen_range(range.0..range.1) as f64
    }
}

impl Field for FloatField {
    #[inline(always)]
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a / b
    }

    #[inline(always)]
    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a /= b;
    }

    #[inline(always)]
    fn inv(&self, a: &Self::Element) -> Self::Element {
        1. / a
    }
}

impl OrderedField for FloatField {
    #[inline(always)]
    fn abs(&self, a: &Self::Element) -> Self::Element {
        a.abs()
    }

    fn cmp(&self, a: &Self::Element, b: &Self::Element) -> Ordering {
        a.total_cmp(b)
    }

    #[inline(always)]
    fn to_f64(&self, a: &Self::Element) -> f64 {
        *a
    }

    fn from_f64(&self, a: f64) -> Option<Self::Element> {
        a.is_finite().then_some(a)
    }

    fn parse(&self, s: &str) -> Result<Self::Element, String> {
        let s = s.trim();
        let r = match s.split_once('/') {
            Some((num, den)) => {
                let num: f64 = num
                    .trim()
                    .parse()
                    .map_err(|e| format!("Invalid number literal '{}': {}", s, e))?;
                let den: f64 = den
                    .trim()
                    .parse()
                    .map_err(|e| format!("Invalid number literal '{}': {}", s, e))?;
                num / den
            }
            None => s
                .parse()
                .map_err(|e| format!("Invalid number literal '{}': {}", s, e))?,
        };

        if r.is_finite() {
            Ok(r)
        } else {
            Err(format!("Number literal '{}' is not finite", s))
        }
    }

    fn to_decimal_string(&self, a: &Self::Element, precision: usize) -> String {
        let s = format!("{:.*}", precision, a);
        // avoid printing `-0.000`
        match s.strip_prefix('-') {
            Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_owned(),
            _ => s,
        }
    }
}
