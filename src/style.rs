//! Style maps and property naming shared by the page agent and the panel.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Property name -> value. Names use the script-style camelCase form
/// (`fontSize`), values are opaque CSS strings.
pub type StyleMap = BTreeMap<String, String>;

/// Build a one-entry map.
pub fn single<K: Into<String>, V: Into<String>>(property: K, value: V) -> StyleMap {
    let mut map = StyleMap::new();
    map.insert(property.into(), value.into());
    map
}

/// `backgroundColor` -> `background-color`. Names that are already in CSS
/// form pass through unchanged.
pub fn css_name(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    for ch in property.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// `background-color` -> `backgroundColor`.
pub fn script_name(property: &str) -> String {
    let mut out = String::with_capacity(property.len());
    let mut upper = false;
    for ch in property.chars() {
        if ch == '-' {
            upper = true;
        } else if upper {
            out.push(ch.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Whether a property must be written with `!important` so it beats
/// stylesheet rules that outrank inline style.
pub fn needs_important(property: &str) -> bool {
    css_name(property) == "color"
}

/// Integer prefix of a CSS length, `parseInt` style: `"12.7px"` -> 12,
/// `"-4px"` -> -4, `""` or `"auto"` -> 0.
pub fn parse_px(value: &str) -> i32 {
    let value = value.trim();
    let (sign, digits) = match value.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, value.strip_prefix('+').unwrap_or(value)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i32>().map(|n| sign * n).unwrap_or(0)
}

/// Format a pixel length the way script number-to-string does
/// (`120.0` -> `"120px"`, `120.5` -> `"120.5px"`).
pub fn px<N: Into<f64>>(value: N) -> String {
    format!("{}px", value.into())
}

/// Properties the panel exposes a control for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleProperty {
    Color,
    BackgroundColor,
    FontFamily,
    FontSize,
    FontWeight,
    Padding,
    Margin,
    LineHeight,
    TextAlign,
    LetterSpacing,
    Filter,
}

impl StyleProperty {
    pub const ALL: [StyleProperty; 11] = [
        StyleProperty::Color,
        StyleProperty::BackgroundColor,
        StyleProperty::FontFamily,
        StyleProperty::FontSize,
        StyleProperty::FontWeight,
        StyleProperty::Padding,
        StyleProperty::Margin,
        StyleProperty::LineHeight,
        StyleProperty::TextAlign,
        StyleProperty::LetterSpacing,
        StyleProperty::Filter,
    ];

    /// Wire name, as used in style maps.
    pub fn name(self) -> &'static str {
        match self {
            StyleProperty::Color => "color",
            StyleProperty::BackgroundColor => "backgroundColor",
            StyleProperty::FontFamily => "fontFamily",
            StyleProperty::FontSize => "fontSize",
            StyleProperty::FontWeight => "fontWeight",
            StyleProperty::Padding => "padding",
            StyleProperty::Margin => "margin",
            StyleProperty::LineHeight => "lineHeight",
            StyleProperty::TextAlign => "textAlign",
            StyleProperty::LetterSpacing => "letterSpacing",
            StyleProperty::Filter => "filter",
        }
    }

    pub fn css_name(self) -> String {
        css_name(self.name())
    }

    /// Accepts either the wire name or the CSS name.
    pub fn parse(name: &str) -> Option<Self> {
        let name = script_name(name);
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}
