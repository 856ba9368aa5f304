pub fn gcd_signed_i128(mut a: i128, mut b: i128) -> u128 {
    let mut c;
    while a != 0 {
        c = a;
        // only wraps when i128::MIN % -1 and that still yields 0
        a = b.wrapping_rem(a);
        b = c;
    }
    b.unsigned_abs()
}

/// Round `value` to the nearest integer, with ties away from zero,
/// where `value = num / den` and `den > 0`.
pub fn round_half_away_i128(num: i128, den: i128) -> Option<i128> {
    debug_assert!(den > 0);
    let twice = num.unsigned_abs().checked_mul(2)?;
    let den = den.unsigned_abs();
    let q = twice.checked_add(den)? / den.checked_mul(2)?;
    let q = i128::try_from(q).ok()?;
    Some(if num < 0 { -q } else { q })
}

/// Insert a decimal point into the magnitude `digits` so that `precision` digits
/// follow it, padding with zeros where needed.
pub fn place_decimal_point(negative: bool, digits: &str, precision: usize) -> String {
    let mut out = String::with_capacity(digits.len() + precision + 2);
    let is_zero = digits.bytes().all(|b| b == b'0');
    if negative && !is_zero {
        out.push('-');
    }

    if precision == 0 {
        out.push_str(digits);
        return out;
    }

    if digits.len() <= precision {
        out.push_str("0.");
        for _ in digits.len()..precision {
            out.push('0');
        }
        out.push_str(digits);
    } else {
        let (int, frac) = digits.split_at(digits.len() - precision);
        out.push_str(int);
        out.push('.');
        out.push_str(frac);
    }
    out
}
