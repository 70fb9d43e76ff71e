//! Numeric conversions for property keys and literal values

/// Largest valid array index (`2^32 - 2`)
pub const MAX_ARRAY_INDEX: u32 = u32::MAX - 1;

/// Exact conversion of a number to `u32`, if it is integral and in range.
pub fn to_uint32(value: f64) -> Option<u32> {
    if value >= 0.0 && value <= f64::from(u32::MAX) && value.trunc() == value {
        // -0 is accepted and maps to 0
        Some(value as u32)
    } else {
        None
    }
}

/// Array index of a number: integral and in `0..=2^32-2`.
pub fn number_to_array_index(value: f64) -> Option<u32> {
    to_uint32(value).filter(|&index| index <= MAX_ARRAY_INDEX)
}

/// Array index of a string: `"0"` or a decimal without a leading zero whose
/// value is at most `2^32-2`.
pub fn string_to_array_index(s: &str) -> Option<u32> {
    let bytes = s.as_bytes();
    if bytes.is_empty() || bytes.len() > 10 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    let value: u64 = s.parse().ok()?;
    u32::try_from(value).ok().filter(|&index| index <= MAX_ARRAY_INDEX)
}

/// Small-integer representation: integral, in `i32` range, and not -0.
pub fn as_smi(value: f64) -> Option<i32> {
    if value.trunc() != value || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return None;
    }
    if value == 0.0 && value.is_sign_negative() {
        return None;
    }
    Some(value as i32)
}

/// Canonical decimal string of a number, as used for property keys.
///
/// Follows the language's Number-to-String rules: shortest round-trip
/// digits, plain notation for decimal exponents in `-6..21`, exponent
/// notation otherwise.
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value < 0.0 {
        return format!("-{}", number_to_string(-value));
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "1.2345e6"
    let formatted = format!("{:e}", value);
    let (mantissa, exponent) = match formatted.split_once('e') {
        Some(parts) => parts,
        None => return formatted,
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let k = digits.len() as i32;
    let n = exponent + 1;

    if k <= n && n <= 21 {
        let mut out = digits;
        out.extend(std::iter::repeat('0').take((n - k) as usize));
        out
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{}.{}", int_part, frac_part)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let sign = if n - 1 >= 0 { '+' } else { '-' };
        let magnitude = (n - 1).abs();
        if k == 1 {
            format!("{}e{}{}", digits, sign, magnitude)
        } else {
            format!("{}.{}e{}{}", &digits[..1], &digits[1..], sign, magnitude)
        }
    }
}
