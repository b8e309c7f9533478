//! Circular index over a list of cards.

/// Which way a carousel moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Bounded pointer into a displayed list. Wraps on both ends; lists with at most one item have
/// no controls and never move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether previous/next controls are rendered.
    pub fn shows_controls(&self) -> bool {
        self.len > 1
    }

    /// Moves one step and returns the new index. No-op when controls are hidden.
    pub fn step(&mut self, direction: Direction) -> usize {
        if !self.shows_controls() {
            return self.index;
        }
        let delta: isize = match direction {
            Direction::Previous => -1,
            Direction::Next => 1,
        };
        self.index = (self.index as isize + delta).rem_euclid(self.len as isize) as usize;
        self.index
    }

    pub fn previous(&mut self) -> usize {
        self.step(Direction::Previous)
    }

    pub fn next(&mut self) -> usize {
        self.step(Direction::Next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previous_from_first_wraps_to_last() {
        let mut c = Carousel::new(3);
        assert_eq!(c.previous(), 2);
    }

    #[test]
    fn test_next_from_last_wraps_to_first() {
        let mut c = Carousel::new(3);
        c.previous();
        assert_eq!(c.index(), 2);
        assert_eq!(c.next(), 0);
    }

    #[test]
    fn test_next_walks_forward() {
        let mut c = Carousel::new(3);
        assert_eq!(c.next(), 1);
        assert_eq!(c.next(), 2);
        assert_eq!(c.next(), 0);
    }

    #[test]
    fn test_single_and_empty_lists_hide_controls() {
        let mut single = Carousel::new(1);
        assert!(!single.shows_controls());
        assert_eq!(single.next(), 0);
        assert_eq!(single.previous(), 0);

        let mut empty = Carousel::new(0);
        assert!(empty.is_empty());
        assert!(!empty.shows_controls());
        assert_eq!(empty.step(Direction::Next), 0);
    }
}
