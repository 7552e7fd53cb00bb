//! Wrap-around frame sequence for the bird's flap animation.

use crate::error::GameError;

/// Fixed, non-empty ring of frames with one current position. Advancing is a pure
/// rotation: after `len()` calls to [`FrameCycle::advance`] the current frame is
/// back where it started.
#[derive(Clone, Debug)]
pub struct FrameCycle<T> {
    frames: Vec<T>,
    current: usize,
}

impl<T> FrameCycle<T> {
    pub fn new(frames: Vec<T>) -> Result<Self, GameError> {
        if frames.is_empty() {
            return Err(GameError::EmptyFrameSet);
        }
        Ok(Self { frames, current: 0 })
    }

    pub fn advance(&mut self) {
        self.current += 1;
        if self.current == self.frames.len() {
            self.current = 0;
        }
    }

    pub fn current(&self) -> &T {
        &self.frames[self.current]
    }

    pub fn index(&self) -> usize {
        self.current
    }

    /// Back to the first frame.
    pub fn rewind(&mut self) {
        self.current = 0;
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rejected() {
        let r = FrameCycle::<u8>::new(Vec::new());
        assert!(matches!(r, Err(GameError::EmptyFrameSet)));
    }

    #[test]
    fn test_single_frame_self_loop() {
        let mut c = FrameCycle::new(vec!["only"]).unwrap();
        c.advance();
        assert_eq!(*c.current(), "only");
        c.advance();
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn test_four_frames_period() {
        let mut c = FrameCycle::new(vec![10, 11, 12, 13]).unwrap();
        let start = *c.current();
        let mut seen = Vec::new();
        for _ in 0..4 {
            c.advance();
            seen.push(*c.current());
        }
        assert_eq!(seen, vec![11, 12, 13, 10]);
        assert_eq!(*c.current(), start);
    }

    #[test]
    fn test_rewind() {
        let mut c = FrameCycle::new(vec![1, 2, 3]).unwrap();
        c.advance();
        c.advance();
        c.rewind();
        assert_eq!(*c.current(), 1);
        assert_eq!(c.len(), 3);
        assert!(!c.is_empty());
    }
}
