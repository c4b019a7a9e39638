//! Column layout helpers: word wrapping, padding and number rendering.
//!
//! Widths are counted in Unicode scalar values, not bytes.

/// Width of the label column, colon included.
pub const PAD: usize = 11;

/// Maximum width of a wrapped value line.
pub const WIDTH: usize = 69;

/// Break string that continues a value under the label column.
pub fn indent_break(indent: usize) -> String {
    format!("\n{}", " ".repeat(indent))
}

/// Wrap `text` to `width` columns, joining lines with `brk`.
///
/// Lines are broken at spaces (the space is consumed). When `cut` is set, a
/// word longer than `width` is split at exactly `width`; otherwise it is left
/// to overflow. Occurrences of `brk` already present in the text restart the
/// column count.
pub fn wordwrap(text: &str, width: usize, brk: &str, cut: bool) -> String {
    let chars: Vec<char> = text.chars().collect();
    let brk_chars: Vec<char> = brk.chars().collect();
    if chars.is_empty() || brk_chars.is_empty() || (width == 0 && cut) {
        return text.to_string();
    }

    let len = chars.len();
    let mut out = String::with_capacity(text.len() + brk.len() * (len / width.max(1)));
    let mut last_start = 0usize;
    let mut last_space = 0usize;
    let mut current = 0usize;

    while current < len {
        let c = chars[current];
        if c == brk_chars[0]
            && current + brk_chars.len() < len
            && chars[current..current + brk_chars.len()] == brk_chars[..]
        {
            out.extend(&chars[last_start..current + brk_chars.len()]);
            current += brk_chars.len() - 1;
            last_start = current + 1;
            last_space = last_start;
        } else if c == ' ' {
            if current - last_start >= width {
                out.extend(&chars[last_start..current]);
                out.push_str(brk);
                last_start = current + 1;
            }
            last_space = current;
        } else if current - last_start >= width && cut && last_start >= last_space {
            out.extend(&chars[last_start..current]);
            out.push_str(brk);
            last_start = current;
            last_space = current;
        } else if current - last_start >= width && last_start < last_space {
            out.extend(&chars[last_start..last_space]);
            out.push_str(brk);
            last_start = last_space + 1;
            last_space = last_start;
        }
        current += 1;
    }

    if last_start < len {
        out.extend(&chars[last_start..]);
    }
    out
}

/// Right-pad with spaces to `width`. Longer text is returned unchanged.
pub fn pad(text: &str, width: usize) -> String {
    format!("{text:<width$}")
}

/// Render a measured quantity the way it reads in a log: integral values
/// without a fractional part, everything else in shortest round-trip form.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Fixed-point rendering with `,` thousands separators, e.g. `1,234.50`.
///
/// Halves round away from zero on the decimal value as written, so `1.005`
/// becomes `1.01` even though its binary form sits just below the half.
pub fn number_format(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let rounded = pre_round(value * scale).round() / scale;
    let fixed = format!("{:.*}", decimals, rounded.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if rounded < 0.0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

/// Round to 15 significant digits, the precision an f64 reliably carries.
fn pre_round(value: f64) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }
    format!("{value:.14e}").parse().unwrap_or(value)
}
