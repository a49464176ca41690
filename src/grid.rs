use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub type Position = (usize, usize);

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

impl Size {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// The pixel extent of this many cells of `tile` pixels each, or `None`
    /// when either side does not fit an `i32` screen coordinate.
    pub fn scaled(&self, tile: Size) -> Option<Size> {
        let width = self.width.checked_mul(tile.width)?;
        let height = self.height.checked_mul(tile.height)?;

        i32::try_from(width).ok()?;
        i32::try_from(height).ok()?;

        Some(Size::new(width, height))
    }

    pub fn contains(&self, (x, y): Position) -> bool {
        x < self.width && y < self.height
    }

    /// Every cell position, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y)))
    }

    /// The cell one step away in `direction`, or `None` when that would leave
    /// `[0, width-1] x [0, height-1]`.
    pub fn neighbor(&self, (x, y): Position, direction: Direction) -> Option<Position> {
        match direction {
            Direction::Up => {
                if y == 0 {
                    None
                } else {
                    Some((x, y - 1))
                }
            }
            Direction::Down => {
                if y + 1 >= self.height {
                    None
                } else {
                    Some((x, y + 1))
                }
            }
            Direction::Left => {
                if x == 0 {
                    None
                } else {
                    Some((x - 1, y))
                }
            }
            Direction::Right => {
                if x + 1 >= self.width {
                    None
                } else {
                    Some((x + 1, y))
                }
            }
        }
    }
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (raw_width, raw_height) = s.split_once('x').ok_or(format!("invalid format: {}", s))?;

        let width = raw_width
            .parse::<usize>()
            .map_err(|_| format!("invalid width: {}", raw_width))?;
        let height = raw_height
            .parse::<usize>()
            .map_err(|_| format!("invalid height: {}", raw_height))?;

        Ok(Size { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_width_by_height() {
        let size: Size = "6x5".parse().unwrap();

        assert_eq!(size, Size::new(6, 5));
        assert_eq!(size.area(), 30);
    }

    #[test]
    fn rejects_malformed_sizes() {
        assert!("6".parse::<Size>().is_err());
        assert!("ax5".parse::<Size>().is_err());
        assert!("6x-1".parse::<Size>().is_err());
    }

    #[test]
    fn neighbor_stays_inside_bounds() {
        let size = Size::new(6, 5);

        assert_eq!(size.neighbor((0, 0), Direction::Left), None);
        assert_eq!(size.neighbor((0, 0), Direction::Up), None);
        assert_eq!(size.neighbor((5, 4), Direction::Right), None);
        assert_eq!(size.neighbor((5, 4), Direction::Down), None);
        assert_eq!(size.neighbor((4, 3), Direction::Right), Some((5, 3)));
        assert_eq!(size.neighbor((4, 3), Direction::Down), Some((4, 4)));
    }

    #[test]
    fn scaled_rejects_overflowing_extents() {
        let tile = Size::new(94, 94);

        assert_eq!(Size::new(6, 5).scaled(tile), Some(Size::new(564, 470)));
        assert_eq!(Size::new(usize::MAX / 2, 1).scaled(tile), None);
        assert_eq!(Size::new(30_000_000, 1).scaled(tile), None);
        assert_eq!(Size::new(1, 1).scaled(Size::new(1 << 31, 1)), None);
    }

    #[test]
    fn positions_are_row_major() {
        let positions: Vec<Position> = Size::new(2, 2).positions().collect();

        assert_eq!(positions, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }
}
