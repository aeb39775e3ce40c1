//! Text rendering for exercise values.
//!
//! Floating-point values follow the default formatting of a C++ output
//! stream (`%g` with six significant digits) so expected outputs written
//! against that convention match.

/// Significant digits used for floating-point output.
const PRECISION: usize = 6;

/// A value an exercise can print.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for i64 {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl Render for f64 {
    fn render(&self) -> String {
        general(*self)
    }
}

/// Format `value` with `PRECISION` significant digits, trimming trailing zeros.
///
/// Switches to scientific notation when the decimal exponent is below -4 or
/// at least `PRECISION`.
pub fn general(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Rounding to PRECISION digits first settles the exponent (999999.5 -> 1e+06).
    let scientific = format!("{:.*e}", PRECISION - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= PRECISION as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (PRECISION as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
