//! Cell - one grid slot, packed into a single u32
//!
//! EMPTY is 0. An occupied cell holds an opaque ABGR color; alpha is forced to
//! 0xFF so no occupant can ever collide with the EMPTY sentinel.

use super::color::Rgb;

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell(u32);

impl Cell {
    pub const EMPTY: Cell = Cell(0);

    #[inline]
    pub const fn occupied(color: Rgb) -> Self {
        Cell(color.to_abgr())
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Color payload, `None` for EMPTY
    #[inline]
    pub fn color(self) -> Option<Rgb> {
        if self.is_empty() {
            None
        } else {
            Some(Rgb::from_abgr(self.0))
        }
    }

    /// Raw packed value as the JS renderer sees it (0 = empty)
    #[inline]
    pub const fn packed(self) -> u32 {
        self.0
    }
}

impl From<Rgb> for Cell {
    fn from(color: Rgb) -> Self {
        Cell::occupied(color)
    }
}
