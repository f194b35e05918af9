//! Number formatting for the calculator display.
//!
//! Operands are stored as text. Results are converted to text once with
//! [`number_to_text`], and any operand text is grouped for display with
//! [`format_operand`].

/// Convert a computed value into operand text.
///
/// Uses the shortest representation that round-trips. Very large and very
/// small magnitudes switch to exponent notation (`1e+21`, `5e-7`), and
/// negative zero is shown as `0`.
pub fn number_to_text(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let abs = value.abs();
    if !(1e-6..1e21).contains(&abs) {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => formatted,
        };
    }

    format!("{}", value)
}

/// Format operand text for display.
///
/// The integer part is grouped with `separator`; the decimal part is kept
/// verbatim, including trailing zeros and a trailing decimal point.
pub fn format_operand(text: &str, separator: &str) -> String {
    let (int_part, dec_part) = match text.split_once('.') {
        Some((int_part, dec_part)) => (int_part, Some(dec_part)),
        None => (text, None),
    };

    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    // Exponent forms and anything else unexpected are shown as-is
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return text.to_string();
    }

    let grouped = format_with_separators(digits, separator);
    match dec_part {
        Some(dec) => format!("{}{}.{}", sign, grouped, dec),
        None => format!("{}{}", sign, grouped),
    }
}

/// Group a run of ASCII digits in threes from the right.
fn format_with_separators(digits: &str, separator: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push_str(separator);
        }
        result.push(c);
    }
    result
}
