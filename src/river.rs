use log::debug;
use rand::Rng;

/// Navigable span of one screen row. Cells with `x <= left` or `x >= right`
/// are bank; the water lies strictly between the two bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Channel {
    pub left: i32,
    pub right: i32,
}

impl Channel {
    pub fn new(left: i32, right: i32) -> Self {
        Channel { left, right }
    }

    pub fn center(&self) -> i32 {
        (self.left + self.right) / 2
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    /// True when column `x` is on a bank (or beyond it).
    pub fn is_bank(&self, x: i32) -> bool {
        x <= self.left || x >= self.right
    }
}

/// Scrolling river: one channel per visible row, row 0 being the newest.
#[derive(Clone, Debug)]
pub struct RiverField {
    rows: Vec<Channel>,
    width: i32,
    min_width: i32,
    max_width: i32,
}

impl RiverField {
    /// Builds a straight river of `width / 2` columns centred on the screen.
    pub fn new(width: u16, height: u16) -> Self {
        let width = width as i32;
        let min_width = width / 3;
        let max_width = width / 2;
        let mut field = RiverField {
            rows: vec![Channel::new(0, 0); height as usize],
            width,
            min_width,
            max_width,
        };
        field.reset();
        field
    }

    /// Re-straightens every row to the starting channel.
    pub fn reset(&mut self) {
        let start = self.starting_channel();
        self.rows.fill(start);
    }

    pub fn starting_channel(&self) -> Channel {
        let center = self.width / 2;
        let channel_width = (self.width / 2).clamp(self.min_width, self.max_width);
        let left = center - channel_width / 2;
        Channel::new(left, left + channel_width)
    }

    /// Scrolls every row one line down and grows a fresh row 0 by a bounded
    /// random walk on the previous top row's centre and width.
    pub fn advance(&mut self, rng: &mut impl Rng) {
        let center_step = rng.gen_range(-1..=1);
        let width_step = rng.gen_range(-1..=1);
        self.advance_with(center_step, width_step);
    }

    /// Deterministic core of [`advance`](Self::advance); steps are clamped to `-1..=1`.
    pub fn advance_with(&mut self, center_step: i32, width_step: i32) {
        if self.rows.is_empty() {
            return;
        }
        let previous = self.rows[0];
        self.rows.rotate_right(1);

        let center = previous.center() + center_step.clamp(-1, 1);
        let channel_width =
            (previous.width() + width_step.clamp(-1, 1)).clamp(self.min_width, self.max_width);

        let mut left = center - channel_width / 2;
        let mut right = left + channel_width;
        if left < 1 {
            left = 1;
            right = left + channel_width;
        }
        if right > self.width - 2 {
            right = self.width - 2;
            left = right - channel_width;
        }

        self.rows[0] = Channel::new(left, right);
        debug!("New river row: left={}, right={}", left, right);
    }

    /// Channel at row `y`, or `None` when `y` is off screen.
    pub fn row(&self, y: i32) -> Option<Channel> {
        usize::try_from(y).ok().and_then(|y| self.rows.get(y).copied())
    }

    pub fn rows(&self) -> &[Channel] {
        &self.rows
    }

    pub fn top(&self) -> Channel {
        self.rows[0]
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.rows.len() as i32
    }

    pub fn min_width(&self) -> i32 {
        self.min_width
    }

    pub fn max_width(&self) -> i32 {
        self.max_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn starts_straight_and_centred() {
        let field = RiverField::new(40, 20);
        assert_eq!(field.min_width(), 13);
        assert_eq!(field.max_width(), 20);
        assert!(field.rows().iter().all(|c| *c == Channel::new(10, 30)));
        assert_eq!(field.height(), 20);
    }

    #[test]
    fn scroll_keeps_previous_rows() {
        let mut field = RiverField::new(60, 24);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            field.advance(&mut rng);
        }
        let before = field.rows().to_vec();
        field.advance(&mut rng);
        for y in 1..before.len() {
            assert_eq!(field.rows()[y], before[y - 1]);
        }
    }

    #[test]
    fn walk_is_clamped_to_screen_edges() {
        let mut field = RiverField::new(40, 20);
        for _ in 0..200 {
            field.advance_with(-1, 1);
        }
        assert_eq!(field.top(), Channel::new(1, 21));
        for _ in 0..200 {
            field.advance_with(1, -1);
        }
        assert_eq!(field.top(), Channel::new(38 - 13, 38));
    }

    #[test]
    fn bounds_and_width_limits_hold_under_random_walk() {
        let mut field = RiverField::new(45, 22);
        let mut rng = StdRng::seed_from_u64(1234);
        for _ in 0..5_000 {
            let previous = field.top();
            field.advance(&mut rng);
            let top = field.top();
            assert!((top.center() - previous.center()).abs() <= 1);
            assert!((top.width() - previous.width()).abs() <= 1);
            for c in field.rows() {
                assert!(1 <= c.left && c.left < c.right && c.right <= 45 - 2);
                assert!(field.min_width() <= c.width() && c.width() <= field.max_width());
            }
        }
    }

    #[test]
    fn row_out_of_range_is_none() {
        let field = RiverField::new(40, 20);
        assert!(field.row(-1).is_none());
        assert!(field.row(20).is_none());
        assert!(field.row(19).is_some());
    }
}
