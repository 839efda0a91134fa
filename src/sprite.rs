use crate::types::{Point, Rect};

/// Fixed-size ASCII template plus its occupancy mask.
///
/// The mask is derived once, at compile time, from the template: every
/// non-blank character is an occupied (collidable) cell.
#[derive(Debug)]
pub struct Sprite<const H: usize, const W: usize> {
    template: [&'static str; H],
    mask: [[bool; W]; H],
}

impl<const H: usize, const W: usize> Sprite<H, W> {
    pub const fn from_template(template: [&'static str; H]) -> Self {
        let mut mask = [[false; W]; H];
        let mut r = 0;
        while r < H {
            let bytes = template[r].as_bytes();
            let mut c = 0;
            while c < W && c < bytes.len() {
                mask[r][c] = bytes[c] != b' ';
                c += 1;
            }
            r += 1;
        }
        Sprite { template, mask }
    }

    pub const fn width(&self) -> i32 {
        W as i32
    }

    /// Bounding box of the sprite when its top-left corner sits at `origin`.
    pub fn bounds_at(&self, origin: Point) -> Rect {
        Rect::new(origin, W as i32, H as i32)
    }

    /// Occupied cells relative to the sprite origin, with their glyph.
    pub fn cells(&self) -> impl Iterator<Item = (Point, char)> + '_ {
        (0..H).flat_map(move |r| {
            (0..W).filter_map(move |c| {
                if self.mask[r][c] {
                    let glyph = self.template[r].as_bytes()[c] as char;
                    Some((Point::new(c as i32, r as i32), glyph))
                } else {
                    None
                }
            })
        })
    }

    /// Occupied cells translated to absolute screen coordinates.
    pub fn cells_at(&self, origin: Point) -> impl Iterator<Item = (Point, char)> + '_ {
        self.cells()
            .map(move |(offset, glyph)| (origin.offset(offset.x, offset.y), glyph))
    }
}

pub type PlaneSprite = Sprite<3, 5>;
pub type EnemySprite = Sprite<3, 5>;

pub const PLANE: PlaneSprite = Sprite::from_template([
    "  ^  ",
    "<-A->",
    " / \\ ",
]);

pub const ENEMY: EnemySprite = Sprite::from_template([
    " | | ",
    "\\ooo/",
    " === ",
]);

/// Label drawn for a fuel pickup; its anchor is the `[`.
pub const FUEL_LABEL: &str = "[FUEL]";
