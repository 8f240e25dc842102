//! # Standard Predicates
//!
//! Boolean tests over JSON values, registered under the names the `is.js`
//! library uses. [`ALL`] lists every `(name, predicate)` pair that
//! [`PredicateRegistry::standard`](crate::PredicateRegistry::standard)
//! installs.
//!
//! ## Semantics Worth Knowing
//!
//! - `object` accepts arrays as well as objects; `json` accepts objects only.
//! - `truthy` follows JavaScript truthiness: `null`, `false`, `0` and `""`
//!   are falsy; every array and object is truthy, empty or not.
//! - `empty` holds for `""`, `[]` and `{}` only; `null` is not empty.
//! - Every string-format predicate is false for non-strings.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Every standard predicate, by registry name.
pub const ALL: &[(&str, fn(&Value) -> bool)] = &[
    // Type checks
    ("array", array),
    ("boolean", boolean),
    ("char", character),
    ("json", json),
    ("null", null),
    ("number", number),
    ("object", object),
    ("string", string),
    // Presence
    ("empty", empty),
    ("existy", existy),
    ("falsy", falsy),
    ("space", space),
    ("truthy", truthy),
    // Arithmetic
    ("decimal", decimal),
    ("even", even),
    ("finite", finite),
    ("integer", integer),
    ("negative", negative),
    ("odd", odd),
    ("positive", positive),
    // Strings
    ("affirmative", affirmative),
    ("alphaNumeric", alpha_numeric),
    ("capitalized", capitalized),
    ("lowerCase", lower_case),
    ("palindrome", palindrome),
    ("upperCase", upper_case),
    // Formats
    ("dateString", date_string),
    ("email", email),
    ("hexColor", hex_color),
    ("hexadecimal", hexadecimal),
    ("ip", ip),
    ("ipv4", ipv4),
    ("ipv6", ipv6),
    ("timeString", time_string),
    ("url", url),
];

static AFFIRMATIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:1|t(?:rue)?|y(?:es)?|ok(?:ay)?)$").expect("valid regex"));

static ALPHA_NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid regex"));

static DATE_STRING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:1[0-2]|0?[1-9])(?:/(?:3[01]|[12][0-9]|0?[1-9])/|-(?:3[01]|[12][0-9]|0?[1-9])-)(?:[0-9]{2})?[0-9]{2}$",
    )
    .expect("valid regex")
});

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("valid regex")
});

static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid regex"));

static HEXADECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:0x)?[0-9a-fA-F]+$").expect("valid regex"));

static TIME_STRING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:2[0-3]|[01]?[0-9]):[0-5]?[0-9]:[0-5]?[0-9]$").expect("valid regex")
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:https?|ftp)://)?(?:\S+(?::\S*)?@)?(?:localhost|(?:\d{1,3}\.){3}\d{1,3}|(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,})(?::\d{2,5})?(?:[/?#]\S*)?$",
    )
    .expect("valid regex")
});

fn matches(re: &Regex, value: &Value) -> bool {
    value.as_str().is_some_and(|s| re.is_match(s))
}

// ---------------------------------------------------------------------------
// Type checks
// ---------------------------------------------------------------------------

/// A JSON array.
pub fn array(value: &Value) -> bool {
    value.is_array()
}

/// `true` or `false`.
pub fn boolean(value: &Value) -> bool {
    value.is_boolean()
}

/// A string of exactly one character.
pub fn character(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.chars().count() == 1)
}

/// A JSON object.
pub fn json(value: &Value) -> bool {
    value.is_object()
}

/// `null`.
pub fn null(value: &Value) -> bool {
    value.is_null()
}

/// Any JSON number.
pub fn number(value: &Value) -> bool {
    value.is_number()
}

/// An object or an array.
pub fn object(value: &Value) -> bool {
    value.is_object() || value.is_array()
}

/// A string.
pub fn string(value: &Value) -> bool {
    value.is_string()
}

// ---------------------------------------------------------------------------
// Presence
// ---------------------------------------------------------------------------

/// `""`, `[]` or `{}`.
pub fn empty(value: &Value) -> bool {
    match value {
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

/// Anything but `null`.
pub fn existy(value: &Value) -> bool {
    !value.is_null()
}

/// Anything but `null`, `false`, `0` or `""`.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `null`, `false`, `0` or `""`.
pub fn falsy(value: &Value) -> bool {
    !truthy(value)
}

/// A single whitespace character.
pub fn space(value: &Value) -> bool {
    value.as_str().is_some_and(|s| {
        let mut chars = s.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.is_whitespace())
    })
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

/// Remainder of an integral number modulo two.
fn parity(value: &Value) -> Option<u64> {
    if let Some(i) = value.as_i64() {
        return Some(i.rem_euclid(2).unsigned_abs());
    }
    if let Some(u) = value.as_u64() {
        return Some(u % 2);
    }
    let f = value.as_f64()?;
    (f.is_finite() && f.fract() == 0.0).then(|| if f.rem_euclid(2.0) == 0.0 { 0 } else { 1 })
}

/// A number with a fractional part.
pub fn decimal(value: &Value) -> bool {
    value.as_f64().is_some_and(|f| f.fract() != 0.0)
}

/// An integral number divisible by two.
pub fn even(value: &Value) -> bool {
    parity(value) == Some(0)
}

/// A finite number. Every JSON number is finite.
pub fn finite(value: &Value) -> bool {
    value.as_f64().is_some_and(f64::is_finite)
}

/// A number without a fractional part (`2.0` counts).
pub fn integer(value: &Value) -> bool {
    value.is_i64()
        || value.is_u64()
        || value
            .as_f64()
            .is_some_and(|f| f.is_finite() && f.fract() == 0.0)
}

/// A number below zero.
pub fn negative(value: &Value) -> bool {
    value.as_f64().is_some_and(|f| f < 0.0)
}

/// An integral number not divisible by two.
pub fn odd(value: &Value) -> bool {
    parity(value) == Some(1)
}

/// A number above zero.
pub fn positive(value: &Value) -> bool {
    value.as_f64().is_some_and(|f| f > 0.0)
}

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

/// `1`, `t`, `true`, `y`, `yes`, `ok` or `okay`.
pub fn affirmative(value: &Value) -> bool {
    matches(&AFFIRMATIVE_RE, value)
}

/// Non-empty and ASCII letters or digits only.
pub fn alpha_numeric(value: &Value) -> bool {
    matches(&ALPHA_NUMERIC_RE, value)
}

/// Every whitespace-separated word starts with a non-lowercase character.
pub fn capitalized(value: &Value) -> bool {
    value.as_str().is_some_and(|s| {
        s.split_whitespace()
            .all(|word| word.chars().next().is_some_and(|c| !c.is_lowercase()))
    })
}

/// Unchanged by lowercasing.
pub fn lower_case(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s == s.to_lowercase())
}

/// Reads the same backwards, ignoring case and non-alphanumerics.
pub fn palindrome(value: &Value) -> bool {
    value.as_str().is_some_and(|s| {
        let cleaned: Vec<char> = s
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        cleaned.iter().eq(cleaned.iter().rev())
    })
}

/// Unchanged by uppercasing.
pub fn upper_case(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s == s.to_uppercase())
}

// ---------------------------------------------------------------------------
// Formats
// ---------------------------------------------------------------------------

/// `M/D/YY[YY]` or `M-D-YY[YY]`, one separator throughout.
pub fn date_string(value: &Value) -> bool {
    matches(&DATE_STRING_RE, value)
}

/// `local@domain.tld`.
pub fn email(value: &Value) -> bool {
    matches(&EMAIL_RE, value)
}

/// `#abc`, `#a1b2c3`, with or without the `#`.
pub fn hex_color(value: &Value) -> bool {
    matches(&HEX_COLOR_RE, value)
}

/// Hex digits with an optional `0x` prefix.
pub fn hexadecimal(value: &Value) -> bool {
    matches(&HEXADECIMAL_RE, value)
}

/// An IPv4 or IPv6 address.
pub fn ip(value: &Value) -> bool {
    ipv4(value) || ipv6(value)
}

/// A dotted-quad IPv4 address.
pub fn ipv4(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.parse::<Ipv4Addr>().is_ok())
}

/// An IPv6 address.
pub fn ipv6(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.parse::<Ipv6Addr>().is_ok())
}

/// `H:M:S` on a 24-hour clock.
pub fn time_string(value: &Value) -> bool {
    matches(&TIME_STRING_RE, value)
}

/// An http, https or ftp URL; the scheme may be omitted.
pub fn url(value: &Value) -> bool {
    matches(&URL_RE, value)
}
