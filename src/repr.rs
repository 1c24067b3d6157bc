//! Textual value representations shared by keys and report strings.
//!
//! Fallback annotation keys hash a textual rendering of rounded floats, and
//! formatting records render attribute values as `None`, `True`, `12.0`.
//! Existing keys and report templates depend on these exact spellings, so
//! they live in one place.

/// Marker for an absent value.
pub(crate) const NONE_REPR: &str = "None";

/// Render a boolean.
pub(crate) fn bool_repr(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Render a float as the shortest round-tripping decimal, always keeping a
/// fractional part (`12.0`, `0.125`) and switching to exponent notation
/// outside [1e-4, 1e16).
pub(crate) fn float_repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return exponent_repr(value);
    }
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

fn exponent_repr(value: f64) -> String {
    // `{:e}` yields e.g. "1.5e16" / "1e-5"; the exponent needs a sign and
    // at least two digits.
    let formatted = format!("{:e}", value);
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{}e{}{:0>2}", mantissa, sign, digits)
}

/// Round to three decimal places.
///
/// Goes through decimal formatting so the result is the float nearest to
/// the correctly rounded decimal, not an artifact of `x * 1000.0`.
pub(crate) fn round3(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.3}", value).parse().unwrap_or(value)
}

/// Render an optional value, using [`NONE_REPR`] when absent.
pub(crate) fn opt_repr<T: AttrRepr>(value: Option<&T>) -> String {
    value.map_or_else(|| NONE_REPR.to_string(), AttrRepr::attr_repr)
}

/// Values that appear inside formatting change descriptions.
pub(crate) trait AttrRepr {
    fn attr_repr(&self) -> String;
}

impl AttrRepr for bool {
    fn attr_repr(&self) -> String {
        bool_repr(*self).to_string()
    }
}

impl AttrRepr for f64 {
    fn attr_repr(&self) -> String {
        float_repr(*self)
    }
}

impl AttrRepr for String {
    fn attr_repr(&self) -> String {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_repr() {
        assert_eq!(float_repr(10.0), "10.0");
        assert_eq!(float_repr(-0.0), "-0.0");
        assert_eq!(float_repr(100.123), "100.123");
        assert_eq!(float_repr(0.1), "0.1");
        assert_eq!(float_repr(1e16), "1e+16");
        assert_eq!(float_repr(0.00001), "1e-05");
        assert_eq!(float_repr(1.5e20), "1.5e+20");
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(100.12345), 100.123);
        assert_eq!(round3(0.0004), 0.0);
        assert_eq!(round3(2.0), 2.0);
        assert_eq!(round3(99.9996), 100.0);
    }

    #[test]
    fn test_opt_repr() {
        assert_eq!(opt_repr::<bool>(None), "None");
        assert_eq!(opt_repr(Some(&true)), "True");
        assert_eq!(opt_repr(Some(&12.0)), "12.0");
        assert_eq!(opt_repr(Some(&"Arial".to_string())), "Arial");
    }
}
