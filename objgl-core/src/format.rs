/// Numeric text layout for WebGL array literals
///
/// Each output line is a run of comma-terminated numbers (`1.0, 0.0, -0.0,`)
/// so the files can be pasted straight into a JavaScript array literal.
use nalgebra::Vector3;

/// Decimal places kept on every float component
pub const DECIMAL_PLACES: usize = 7;

/// Round to 7 decimal places, half-to-even on the exact binary value
pub fn round7(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    format!("{:.*}", DECIMAL_PLACES, x).parse().unwrap_or(x)
}

/// Shortest round-trip text for a float, in the notation the web page expects
///
/// Integral values keep a trailing `.0`, exponents carry a sign and at least
/// two digits (`1e-05`, `1.5e+16`) and non-finite values print as `inf`,
/// `-inf` and `nan`.
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let shortest = format!("{:?}", x);
    match shortest.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => shortest,
    }
}

/// `x, y, z,` for one remapped vector
pub fn format_vector(v: &Vector3<f64>) -> String {
    comma_terminated(v.iter().map(|&c| format_float(c)))
}

/// `i0, i1, i2,` (or six indices for a split quad)
pub fn format_indices(indices: &[i64]) -> String {
    comma_terminated(indices.iter().map(|i| i.to_string()))
}

fn comma_terminated(items: impl Iterator<Item = String>) -> String {
    items
        .map(|item| item + ",")
        .collect::<Vec<_>>()
        .join(" ")
}
