//! Tile values and their two-character wire codes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Copies of each (color, shape) combination in a full bag
pub const COPIES_PER_TILE: usize = 3;

/// Tiles in a full bag (3 x 6 x 6)
pub const FULL_SET: usize = 108;

/// Tile color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

/// Tile shape
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Diamond,
    Square,
    Spade,
    Heart,
    Clubs,
    Circle,
}

pub const COLORS: [Color; 6] = [
    Color::Red,
    Color::Orange,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::Purple,
];

pub const SHAPES: [Shape; 6] = [
    Shape::Diamond,
    Shape::Square,
    Shape::Spade,
    Shape::Heart,
    Shape::Clubs,
    Shape::Circle,
];

impl Color {
    /// Wire character: `R O Y G B P`
    pub fn code(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Orange => 'O',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Purple => 'P',
        }
    }

    pub fn from_code(c: char) -> Option<Self> {
        COLORS.iter().copied().find(|color| color.code() == c)
    }
}

impl Shape {
    /// Wire character: `d s x * c o`
    pub fn code(self) -> char {
        match self {
            Shape::Diamond => 'd',
            Shape::Square => 's',
            Shape::Spade => 'x',
            Shape::Heart => '*',
            Shape::Clubs => 'c',
            Shape::Circle => 'o',
        }
    }

    pub fn from_code(c: char) -> Option<Self> {
        SHAPES.iter().copied().find(|shape| shape.code() == c)
    }
}

/// An immutable (color, shape) tile value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub color: Color,
    pub shape: Shape,
}

impl Tile {
    pub const fn new(color: Color, shape: Shape) -> Self {
        Self { color, shape }
    }

    /// Parse a two-character wire code like `Rd` or `B*`
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let color = Color::from_code(chars.next()?)?;
        let shape = Shape::from_code(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Tile::new(color, shape))
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.code(), self.shape.code())
    }
}
