//! The panel's style controls and how their raw values map to CSS.

use super::color::to_hex;
use crate::style::{parse_px, StyleMap, StyleProperty};

/// DOM event a control reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Change,
    Input,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlKind {
    Select(&'static [(&'static str, &'static str)]),
    Slider { min: i32, max: i32 },
    ColorPicker,
}

/// Raw control value -> CSS value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueTransform {
    Identity,
    /// `16` -> `16px`
    Pixels,
    /// `150` -> `1.5`
    Ratio,
    /// `80` -> `contrast(80%)`
    Contrast,
}

impl ValueTransform {
    pub fn apply(self, raw: &str) -> String {
        match self {
            ValueTransform::Identity => raw.to_string(),
            ValueTransform::Pixels => format!("{raw}px"),
            ValueTransform::Ratio => match raw.trim().parse::<f64>() {
                Ok(n) => format!("{}", n / 100.0),
                Err(_) => raw.to_string(),
            },
            ValueTransform::Contrast => format!("contrast({raw}%)"),
        }
    }

    /// Text shown next to a slider.
    pub fn label(self, raw: &str) -> String {
        match self {
            ValueTransform::Pixels => format!("{raw}px"),
            ValueTransform::Ratio => match raw.trim().parse::<f64>() {
                Ok(n) => format!("{:.2}", n / 100.0),
                Err(_) => raw.to_string(),
            },
            ValueTransform::Contrast => format!("{raw}%"),
            ValueTransform::Identity => raw.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlBinding {
    pub id: &'static str,
    pub label: &'static str,
    pub group: &'static str,
    pub trigger: Trigger,
    pub property: StyleProperty,
    pub kind: ControlKind,
    pub transform: ValueTransform,
    pub default: &'static str,
}

const FONT_FAMILIES: &[(&str, &str)] = &[
    ("Arial, sans-serif", "Arial"),
    ("Georgia, serif", "Georgia"),
    ("'Times New Roman', serif", "Times New Roman"),
    ("Verdana, sans-serif", "Verdana"),
    ("'Courier New', monospace", "Courier New"),
];

const FONT_WEIGHTS: &[(&str, &str)] = &[
    ("300", "Light"),
    ("400", "Normal"),
    ("600", "Semi-bold"),
    ("700", "Bold"),
];

const TEXT_ALIGNS: &[(&str, &str)] = &[
    ("left", "Left"),
    ("center", "Center"),
    ("right", "Right"),
    ("justify", "Justify"),
];

const LETTER_SPACINGS: &[(&str, &str)] = &[
    ("normal", "Normal"),
    ("0.5px", "Wide"),
    ("1px", "Wider"),
    ("2px", "Widest"),
];

pub static CONTROLS: [ControlBinding; 11] = [
    ControlBinding {
        id: "fontFamily",
        label: "Font",
        group: "Text",
        trigger: Trigger::Change,
        property: StyleProperty::FontFamily,
        kind: ControlKind::Select(FONT_FAMILIES),
        transform: ValueTransform::Identity,
        default: "Arial, sans-serif",
    },
    ControlBinding {
        id: "fontSize",
        label: "Size",
        group: "Text",
        trigger: Trigger::Input,
        property: StyleProperty::FontSize,
        kind: ControlKind::Slider { min: 8, max: 72 },
        transform: ValueTransform::Pixels,
        default: "16",
    },
    ControlBinding {
        id: "fontWeight",
        label: "Weight",
        group: "Text",
        trigger: Trigger::Change,
        property: StyleProperty::FontWeight,
        kind: ControlKind::Select(FONT_WEIGHTS),
        transform: ValueTransform::Identity,
        default: "400",
    },
    ControlBinding {
        id: "textColor",
        label: "Text",
        group: "Colors",
        trigger: Trigger::Input,
        property: StyleProperty::Color,
        kind: ControlKind::ColorPicker,
        transform: ValueTransform::Identity,
        default: "#000000",
    },
    ControlBinding {
        id: "backgroundColor",
        label: "Background",
        group: "Colors",
        trigger: Trigger::Input,
        property: StyleProperty::BackgroundColor,
        kind: ControlKind::ColorPicker,
        transform: ValueTransform::Identity,
        default: "#ffffff",
    },
    ControlBinding {
        id: "padding",
        label: "Padding",
        group: "Spacing",
        trigger: Trigger::Input,
        property: StyleProperty::Padding,
        kind: ControlKind::Slider { min: 0, max: 100 },
        transform: ValueTransform::Pixels,
        default: "0",
    },
    ControlBinding {
        id: "margin",
        label: "Margin",
        group: "Spacing",
        trigger: Trigger::Input,
        property: StyleProperty::Margin,
        kind: ControlKind::Slider { min: 0, max: 100 },
        transform: ValueTransform::Pixels,
        default: "0",
    },
    ControlBinding {
        id: "lineHeight",
        label: "Line height",
        group: "Spacing",
        trigger: Trigger::Input,
        property: StyleProperty::LineHeight,
        kind: ControlKind::Slider { min: 80, max: 300 },
        transform: ValueTransform::Ratio,
        default: "120",
    },
    ControlBinding {
        id: "textAlign",
        label: "Align",
        group: "Accessibility",
        trigger: Trigger::Change,
        property: StyleProperty::TextAlign,
        kind: ControlKind::Select(TEXT_ALIGNS),
        transform: ValueTransform::Identity,
        default: "left",
    },
    ControlBinding {
        id: "letterSpacing",
        label: "Letter spacing",
        group: "Accessibility",
        trigger: Trigger::Change,
        property: StyleProperty::LetterSpacing,
        kind: ControlKind::Select(LETTER_SPACINGS),
        transform: ValueTransform::Identity,
        default: "normal",
    },
    ControlBinding {
        id: "contrast",
        label: "Contrast",
        group: "Accessibility",
        trigger: Trigger::Input,
        property: StyleProperty::Filter,
        kind: ControlKind::Slider { min: 50, max: 200 },
        transform: ValueTransform::Contrast,
        default: "100",
    },
];

pub fn control(id: &str) -> Option<&'static ControlBinding> {
    CONTROLS.iter().find(|c| c.id == id)
}

/// Groups in display order.
pub fn groups() -> Vec<&'static str> {
    let mut groups: Vec<&'static str> = Vec::new();
    for c in CONTROLS.iter() {
        if !groups.contains(&c.group) {
            groups.push(c.group);
        }
    }
    groups
}

impl ControlBinding {
    /// Control value for the styles in `styles` (a snapshot or an
    /// undo/redo reply). `None` leaves the control as it is.
    pub fn back_fill(&self, styles: &StyleMap) -> Option<String> {
        let value = styles.get(self.property.name())?;
        match (self.kind, self.transform) {
            (ControlKind::ColorPicker, _) => to_hex(value),
            (_, ValueTransform::Pixels) => {
                let first = value.split_whitespace().next()?;
                first.ends_with("px").then(|| parse_px(first).to_string())
            }
            (_, ValueTransform::Ratio) => ratio_percent(value, styles.get("fontSize")),
            (_, ValueTransform::Contrast) => value
                .strip_prefix("contrast(")?
                .strip_suffix("%)")
                .map(str::to_string),
            (_, ValueTransform::Identity) => Some(value.clone()),
        }
    }
}

/// Line height as a percentage of the font size: unitless values scale
/// directly, px values need the font size.
fn ratio_percent(line_height: &str, font_size: Option<&String>) -> Option<String> {
    let line_height = line_height.trim();
    if let Ok(n) = line_height.parse::<f64>() {
        return Some(format!("{}", (n * 100.0).round()));
    }
    let lh = line_height.strip_suffix("px")?.parse::<f64>().ok()?;
    let fs = font_size?.trim().strip_suffix("px")?.parse::<f64>().ok()?;
    (fs > 0.0).then(|| format!("{}", (lh / fs * 100.0).round()))
}
