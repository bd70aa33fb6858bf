//! The letter glyph drawn on the icon, expressed as a union of axis-aligned
//! line segments over integer pixel coordinates.

/// An axis-aligned line segment, inclusive at both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// A row `y` covering columns `x_start..=x_end`
    Horizontal { y: u32, x_start: u32, x_end: u32 },
    /// A column `x` covering rows `y_start..=y_end`
    Vertical { x: u32, y_start: u32, y_end: u32 },
}

impl Segment {
    /// Returns true if the pixel at (x, y) lies on this segment
    pub fn contains(&self, x: u32, y: u32) -> bool {
        match *self {
            Segment::Horizontal { y: row, x_start, x_end } => {
                y == row && (x_start..=x_end).contains(&x)
            }
            Segment::Vertical { x: column, y_start, y_end } => {
                x == column && (y_start..=y_end).contains(&y)
            }
        }
    }
}

/// The "P" glyph: top bar, middle bar, left stem and the upper half of the right stem.
///
/// The right stem stops at the middle bar while the left stem runs to row 28.
pub const LETTER_P: [Segment; 4] = [
    Segment::Horizontal { y: 4, x_start: 4, x_end: 20 },
    Segment::Horizontal { y: 16, x_start: 4, x_end: 16 },
    Segment::Vertical { x: 4, y_start: 4, y_end: 28 },
    Segment::Vertical { x: 20, y_start: 4, y_end: 16 },
];

/// Returns true if the pixel at (x, y) belongs to the glyph
pub fn is_foreground(x: u32, y: u32) -> bool {
    LETTER_P.iter().any(|segment| segment.contains(x, y))
}
