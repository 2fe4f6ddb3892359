//! Deterministic floor-plan generator.
//!
//! A template subdivides a square footprint into named rectangular rooms
//! that share edges. Unknown names get one large square room.

use shared::{Point2D, Polygon};

/// A named rectangular zone, `min`/`max` corners in plan units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Room {
    pub name: &'static str,
    pub min: (f64, f64),
    pub max: (f64, f64),
}

impl Room {
    const fn new(name: &'static str, min: (f64, f64), max: (f64, f64)) -> Self {
        Self { name, min, max }
    }

    /// Closed counter-clockwise ring starting at the min corner
    pub fn outline(&self) -> Polygon {
        let (x0, y0) = self.min;
        let (x1, y1) = self.max;
        vec![
            Point2D::new(x0, y0),
            Point2D::new(x1, y0),
            Point2D::new(x1, y1),
            Point2D::new(x0, y1),
            Point2D::new(x0, y0),
        ]
    }

    pub fn area(&self) -> f64 {
        (self.max.0 - self.min.0) * (self.max.1 - self.min.1)
    }
}

/// A named floor-plan template
pub struct LayoutTemplate {
    /// Lowercase keyword the template answers to
    pub key: &'static str,
    pub rooms: &'static [Room],
}

/// 16×16 apartment split into five rooms
const TWO_BHK: &[Room] = &[
    Room::new("Living Room", (0.0, -8.0), (8.0, 0.0)),
    Room::new("Kitchen", (0.0, 0.0), (8.0, 8.0)),
    Room::new("Master Bedroom", (-8.0, -8.0), (0.0, 0.0)),
    Room::new("Kids Bedroom", (-8.0, 0.0), (-3.0, 8.0)),
    Room::new("Bathroom", (-3.0, 0.0), (0.0, 8.0)),
];

/// 12×12 apartment split into three rooms
const ONE_BHK: &[Room] = &[
    Room::new("Living Room", (-6.0, -6.0), (6.0, 0.0)),
    Room::new("Bedroom", (-6.0, 0.0), (2.0, 6.0)),
    Room::new("Bathroom", (2.0, 0.0), (6.0, 6.0)),
];

const FALLBACK: &[Room] = &[Room::new("Hall", (-5.0, -5.0), (5.0, 5.0))];

/// Known templates, matched in order
pub const TEMPLATES: &[LayoutTemplate] = &[
    LayoutTemplate { key: "2bhk", rooms: TWO_BHK },
    LayoutTemplate { key: "1bhk", rooms: ONE_BHK },
];

/// Template whose key occurs in `text`, if any
pub fn find_template(text: &str) -> Option<&'static LayoutTemplate> {
    let lower = text.to_lowercase();
    TEMPLATES.iter().find(|t| lower.contains(t.key))
}

/// Rooms for a layout name; unknown names get the single fallback room
pub fn rooms_for(name: &str) -> &'static [Room] {
    find_template(name).map(|t| t.rooms).unwrap_or(FALLBACK)
}

/// Room outlines for a layout name
pub fn generate_layout(name: &str) -> Vec<Polygon> {
    rooms_for(name).iter().map(Room::outline).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::is_closed_polygon;

    fn overlap(a: &Room, b: &Room) -> f64 {
        let w = a.max.0.min(b.max.0) - a.min.0.max(b.min.0);
        let h = a.max.1.min(b.max.1) - a.min.1.max(b.min.1);
        if w > 0.0 && h > 0.0 {
            w * h
        } else {
            0.0
        }
    }

    #[test]
    fn test_two_bhk_has_five_closed_rooms() {
        let rooms = generate_layout("2BHK Apartment");
        assert_eq!(rooms.len(), 5);
        for ring in &rooms {
            assert!(is_closed_polygon(ring));
        }
    }

    #[test]
    fn test_templates_tile_their_footprint() {
        for (rooms, side) in [(TWO_BHK, 16.0), (ONE_BHK, 12.0)] {
            let total: f64 = rooms.iter().map(Room::area).sum();
            assert_eq!(total, side * side);
            for (i, a) in rooms.iter().enumerate() {
                for b in &rooms[i + 1..] {
                    assert_eq!(overlap(a, b), 0.0, "{} overlaps {}", a.name, b.name);
                }
            }
        }
    }

    #[test]
    fn test_unknown_name_single_square() {
        let rooms = generate_layout("Castle");
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0][0], Point2D::new(-5.0, -5.0));
        assert_eq!(rooms[0][2], Point2D::new(5.0, 5.0));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(generate_layout("my 2bhk"), generate_layout("2BHK"));
    }

    #[test]
    fn test_find_template() {
        assert_eq!(find_template("build a 1BHK flat").map(|t| t.key), Some("1bhk"));
        assert!(find_template("a house").is_none());
    }
}
