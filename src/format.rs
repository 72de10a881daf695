//! Display strings matching the d3-format specifiers the dashboards use
//! (`.2s`, `.1s`, `$,.0f`, `,.0f`, `.1f`).

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// SI-prefixed value with `precision` significant digits, like d3's `.{precision}s`.
pub fn si(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return "NaN".to_string();
    }
    let precision = precision.max(1);
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    if magnitude == 0.0 {
        return format!("{:.*}", precision - 1, 0.0);
    }

    let exponential = format!("{:.*e}", precision - 1, magnitude);
    let Some((mantissa, exponent)) = exponential.split_once('e') else {
        return exponential;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return exponential;
    };
    let coefficient: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    let prefix_exponent = exponent.div_euclid(3).clamp(-8, 8);
    let integer_digits = exponent - prefix_exponent * 3 + 1;
    let prefix = SI_PREFIXES[(prefix_exponent + 8) as usize];
    let n = coefficient.len() as i32;

    let body = if integer_digits == n {
        coefficient
    } else if integer_digits > n {
        format!("{coefficient}{}", "0".repeat((integer_digits - n) as usize))
    } else if integer_digits > 0 {
        let (head, tail) = coefficient.split_at(integer_digits as usize);
        format!("{head}.{tail}")
    } else {
        let scaled = magnitude / 10f64.powi(prefix_exponent * 3);
        let decimals = (precision as i32 - integer_digits).max(0) as usize;
        format!("{scaled:.decimals$}")
    };
    format!("{sign}{body}{prefix}")
}

/// Integer with thousands separators, like d3's `,.0f`.
pub fn grouped(value: f64) -> String {
    if !value.is_finite() {
        return "NaN".to_string();
    }
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("{sign}{out}")
}

/// Dollar amount with separators and no cents, like d3's `$,.0f`.
pub fn currency(value: f64) -> String {
    let grouped = grouped(value);
    match grouped.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None if grouped == "NaN" => grouped,
        None => format!("${grouped}"),
    }
}

/// One decimal place, like d3's `.1f`.
pub fn fixed1(value: f64) -> String {
    format!("{value:.1}")
}
