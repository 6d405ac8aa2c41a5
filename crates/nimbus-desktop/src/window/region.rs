//! Resize hot-zones exposed on a window's frame

/// Edge or corner a resize drag grabs.
///
/// Windows resize from the east and south edges and the south-east
/// corner only; position never moves during a resize.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeEdge {
    East,
    South,
    SouthEast,
}

impl ResizeEdge {
    /// Whether this edge changes the width
    #[inline]
    pub fn affects_width(self) -> bool {
        matches!(self, ResizeEdge::East | ResizeEdge::SouthEast)
    }

    /// Whether this edge changes the height
    #[inline]
    pub fn affects_height(self) -> bool {
        matches!(self, ResizeEdge::South | ResizeEdge::SouthEast)
    }

    /// CSS cursor style for this edge
    pub fn cursor(self) -> &'static str {
        match self {
            ResizeEdge::East => "e-resize",
            ResizeEdge::South => "s-resize",
            ResizeEdge::SouthEast => "se-resize",
        }
    }
}
