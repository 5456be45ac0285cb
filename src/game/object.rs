use serde::{Deserialize, Serialize};

/// Opaque display color carried by every object on the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const HEAD: Rgb = Rgb(0x00, 0xFF, 0x00);
    pub const LIME: Rgb = Rgb(0x32, 0xCD, 0x32);
    pub const FOREST: Rgb = Rgb(0x22, 0x8B, 0x22);
    pub const APPLE: Rgb = Rgb(255, 50, 50);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

/// An axis-aligned rectangle on the field, measured in pixels
///
/// Both the snake's segments and the apple are plain `GridObject`s; the owner
/// decides what a position means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridObject {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub color: Rgb,
}

impl GridObject {
    pub fn new(x: i32, y: i32, width: i32, height: i32, color: Rgb) -> Self {
        Self {
            x,
            y,
            width,
            height,
            color,
        }
    }

    /// A square object exactly one grid cell large
    pub fn cell(x: i32, y: i32, size: i32, color: Rgb) -> Self {
        Self::new(x, y, size, size, color)
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Translate by (dx, dy). No bounds checking.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Half-open rectangle intersection: shared edges are not an overlap and
    /// empty rectangles overlap nothing.
    pub fn overlaps(&self, other: &GridObject) -> bool {
        if self.width <= 0 || self.height <= 0 || other.width <= 0 || other.height <= 0 {
            return false;
        }

        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}
