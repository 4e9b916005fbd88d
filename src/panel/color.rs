//! Computed CSS colors to the `#rrggbb` form color pickers accept.

/// `rgb(255, 0, 0)` / `rgba(255, 0, 0, 0.5)` / `#f00` / `#ff0000` to
/// `#ff0000`. Alpha is dropped. `None` for anything else.
pub fn to_hex(value: &str) -> Option<String> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return expand_hex(hex);
    }
    let inner = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let channels: Vec<u8> = inner
        .split([',', ' ', '/'])
        .filter(|part| !part.is_empty())
        .take(3)
        .map(|part| part.parse::<f64>().ok().map(|n| n.round().clamp(0.0, 255.0) as u8))
        .collect::<Option<_>>()?;
    match channels.as_slice() {
        [r, g, b] => Some(format!("#{r:02x}{g:02x}{b:02x}")),
        _ => None,
    }
}

fn expand_hex(hex: &str) -> Option<String> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded = match hex.len() {
        3 | 4 => hex.chars().take(3).fold(String::from("#"), |mut out, c| {
            out.push(c);
            out.push(c);
            out
        }),
        6 | 8 => format!("#{}", &hex[..6]),
        _ => return None,
    };
    Some(expanded.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_rgb_forms() {
        assert_eq!(to_hex("rgb(255, 0, 0)").as_deref(), Some("#ff0000"));
        assert_eq!(to_hex("rgba(16, 32, 48, 0.5)").as_deref(), Some("#102030"));
        assert_eq!(to_hex("rgb(0 128 255 / 50%)").as_deref(), Some("#0080ff"));
    }

    #[test]
    fn normalizes_hex() {
        assert_eq!(to_hex("#ABC").as_deref(), Some("#aabbcc"));
        assert_eq!(to_hex("#a1b2c3ff").as_deref(), Some("#a1b2c3"));
        assert_eq!(to_hex("#12345"), None);
    }

    #[test]
    fn rejects_other_values() {
        assert_eq!(to_hex("red"), None);
        assert_eq!(to_hex(""), None);
        assert_eq!(to_hex("rgb(1, 2)"), None);
    }
}
