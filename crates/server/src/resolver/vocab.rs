//! Fixed vocabularies for the local resolver tiers

use shared::{PrimitiveParams, Shape, ACCENT_COLOR, DEFAULT_SIZE};

use crate::fuzzy::Dictionary;

pub const GREETINGS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "hiya",
    "howdy",
    "hola",
    "yo",
    "greetings",
    "good morning",
    "good afternoon",
    "good evening",
];

pub const SHAPES: &Dictionary<Shape> = &[
    ("box", Shape::Box),
    ("cube", Shape::Box),
    ("square", Shape::Box),
    ("sphere", Shape::Sphere),
    ("ball", Shape::Sphere),
    ("cylinder", Shape::Cylinder),
    ("cone", Shape::Cone),
    ("pyramid", Shape::Cone),
];

/// Keyword → canonical catalog name
pub const CATALOG: &Dictionary<&'static str> = &[
    ("car", "car"),
    ("truck", "truck"),
    ("dog", "dog"),
    ("puppy", "dog"),
    ("cat", "cat"),
    ("tree", "tree"),
    ("chair", "chair"),
    ("table", "table"),
    ("desk", "desk"),
    ("lamp", "lamp"),
    ("sofa", "sofa"),
    ("couch", "sofa"),
    ("bed", "bed"),
    ("plant", "plant"),
    ("duck", "duck"),
    ("fox", "fox"),
    ("lantern", "lantern"),
    ("horse", "horse"),
    ("bench", "bench"),
];

/// Color keywords, matched by substring in declaration order
pub const COLORS: &[(&str, &str)] = &[
    ("red", "#ff0000"),
    ("orange", "#f97316"),
    ("yellow", "#facc15"),
    ("green", "#10b981"),
    ("blue", "#3b82f6"),
    ("purple", "#8b5cf6"),
    ("pink", "#ec4899"),
    ("white", "#ffffff"),
    ("black", "#111111"),
    ("gray", "#6b7280"),
    ("grey", "#6b7280"),
    ("brown", "#8b5a2b"),
    ("gold", "#d4af37"),
];

/// Keyword fragments → styled stand-in primitive when no asset is available
const PROP_STYLES: &[(&[&str], Shape, &str)] = &[
    (&["table", "desk"], Shape::Box, "#8b5a2b"),
    (&["ball", "apple"], Shape::Sphere, "#ef4444"),
    (&["tree", "plant"], Shape::Cylinder, "#10b981"),
];

/// First color keyword occurring anywhere in `text`
pub fn color_in(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    COLORS
        .iter()
        .find(|(name, _)| lower.contains(name))
        .map(|(_, hex)| *hex)
}

/// Resolve a color given by a model: a known name or a `#rrggbb` literal
pub fn parse_color(value: &str) -> Option<String> {
    let value = value.trim();
    let is_hex = value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit());
    if is_hex {
        return Some(value.to_lowercase());
    }
    let lower = value.to_lowercase();
    COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, hex)| hex.to_string())
}

/// First numeric literal in `text` (`3`, `4.5`)
pub fn first_number(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let literal: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    literal.trim_end_matches('.').parse().ok()
}

/// Stand-in primitive for an asset keyword
pub fn prop_fallback(keyword: &str) -> PrimitiveParams {
    let lower = keyword.to_lowercase();
    PROP_STYLES
        .iter()
        .find(|(fragments, _, _)| fragments.iter().any(|f| lower.contains(f)))
        .map(|(_, shape, color)| PrimitiveParams::new(*shape, DEFAULT_SIZE, *color))
        .unwrap_or_else(|| PrimitiveParams::new(Shape::Box, DEFAULT_SIZE, ACCENT_COLOR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_in() {
        assert_eq!(color_in("a RED box"), Some("#ff0000"));
        assert_eq!(color_in("make it grey"), Some("#6b7280"));
        assert_eq!(color_in("a box"), None);
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#ABCDEF").as_deref(), Some("#abcdef"));
        assert_eq!(parse_color("Green").as_deref(), Some("#10b981"));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("teal"), None);
    }

    #[test]
    fn test_first_number() {
        assert_eq!(first_number("box of size 30 please"), Some(30.0));
        assert_eq!(first_number("cone 4.5 high"), Some(4.5));
        assert_eq!(first_number("ends with 7."), Some(7.0));
        assert_eq!(first_number("no digits"), None);
    }

    #[test]
    fn test_prop_fallback_styles() {
        assert_eq!(prop_fallback("wooden desk").color, "#8b5a2b");
        assert_eq!(prop_fallback("apple").shape, Shape::Sphere);
        assert_eq!(prop_fallback("tree").shape, Shape::Cylinder);
        assert_eq!(prop_fallback("car"), PrimitiveParams::fallback());
    }
}
