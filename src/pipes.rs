//! Pipe obstacles and the stream that scrolls them across the board.
//!
//! Pairs are created in strict time order and all scroll at the same speed, so the
//! oldest pair is always the leftmost. The stream is therefore a plain FIFO: append
//! at the back, retire from the front.

use std::collections::VecDeque;
use std::ops::ControlFlow;

use crate::geometry::Rect;

/// Which face of the gate a pipe forms; selects the sprite it is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipeKind {
    Top,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pipe {
    pub kind: PipeKind,
    pub rect: Rect,
}

/// Top and bottom pipe sharing one horizontal trajectory and one `passed` flag.
#[derive(Clone, Debug, PartialEq)]
pub struct PipePair {
    pub top: Pipe,
    pub bottom: Pipe,
    /// Set once the bird has cleared the pair; gates the score increment.
    pub passed: bool,
}

impl PipePair {
    /// Builds a gate at `x` whose top pipe starts at `top_y`. The bottom pipe
    /// begins `opening` below the top pipe's lower edge.
    pub fn new(x: f64, top_y: f64, width: f64, height: f64, opening: f64) -> Self {
        Self {
            top: Pipe {
                kind: PipeKind::Top,
                rect: Rect::new(x, top_y, width, height),
            },
            bottom: Pipe {
                kind: PipeKind::Bottom,
                rect: Rect::new(x, top_y + height + opening, width, height),
            },
            passed: false,
        }
    }

    pub fn x(&self) -> f64 {
        self.top.rect.x
    }

    /// Right edge of the top pipe.
    pub fn trailing_edge(&self) -> f64 {
        self.top.rect.right()
    }

    pub fn shift(&mut self, dx: f64) {
        self.top.rect.x += dx;
        self.bottom.rect.x += dx;
    }

    /// Trailing edge strictly left of the board.
    pub fn is_off_screen(&self) -> bool {
        self.trailing_edge() < 0.0
    }

    pub fn pipes(&self) -> [&Pipe; 2] {
        [&self.top, &self.bottom]
    }
}

/// Ordered stream of live pipe pairs, oldest first.
#[derive(Clone, Debug, Default)]
pub struct PipeStream {
    pairs: VecDeque<PipePair>,
}

impl PipeStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, pair: PipePair) {
        self.pairs.push_back(pair);
    }

    /// Shifts every pair by `dx` in insertion order and hands each pipe to `draw`.
    pub fn advance_and_draw<F>(&mut self, dx: f64, mut draw: F)
    where
        F: FnMut(&Pipe),
    {
        self.advance_while(dx, |pair| {
            draw(&pair.top);
            draw(&pair.bottom);
            ControlFlow::Continue(())
        });
    }

    /// Shifts pairs in insertion order, calling `visit` on each right after its
    /// shift. A `Break` stops the walk: later pairs keep their positions.
    /// Returns how many pairs were advanced.
    pub fn advance_while<F>(&mut self, dx: f64, mut visit: F) -> usize
    where
        F: FnMut(&mut PipePair) -> ControlFlow<()>,
    {
        let mut advanced = 0;
        for pair in self.pairs.iter_mut() {
            pair.shift(dx);
            advanced += 1;
            if visit(pair).is_break() {
                break;
            }
        }
        advanced
    }

    /// Drops pairs from the head while the head has left the board.
    /// Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let mut removed = 0;
        while self.pairs.front().is_some_and(PipePair::is_off_screen) {
            self.pairs.pop_front();
            removed += 1;
        }
        removed
    }

    pub fn reset(&mut self) {
        self.pairs.clear();
    }

    pub fn head(&self) -> Option<&PipePair> {
        self.pairs.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PipePair> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair_at(x: f64) -> PipePair {
        PipePair::new(x, -50.0, 20.0, 200.0, 100.0)
    }

    #[test]
    fn test_bottom_pipe_sits_below_opening() {
        let p = PipePair::new(300.0, -37.5, 40.0, 184.0, 120.0);
        assert_eq!(p.bottom.rect.y, -37.5 + 184.0 + 120.0);
        assert_eq!(p.top.rect.x, p.bottom.rect.x);
        assert_eq!(p.top.kind, PipeKind::Top);
        assert_eq!(p.bottom.kind, PipeKind::Bottom);
        assert!(!p.passed);
    }

    #[test]
    fn test_advance_preserves_insertion_order() {
        let mut s = PipeStream::new();
        s.append(pair_at(100.0));
        s.append(pair_at(200.0));
        s.append(pair_at(300.0));

        let mut seen = Vec::new();
        s.advance_and_draw(-5.0, |pipe| {
            if pipe.kind == PipeKind::Top {
                seen.push(pipe.rect.x);
            }
        });
        assert_eq!(seen, vec![95.0, 195.0, 295.0]);
    }

    #[test]
    fn test_advance_moves_both_pipes() {
        let mut s = PipeStream::new();
        s.append(pair_at(50.0));
        let mut drawn = 0;
        s.advance_and_draw(-10.0, |_| drawn += 1);
        assert_eq!(drawn, 2);
        let head = s.head().unwrap();
        assert_eq!(head.top.rect.x, 40.0);
        assert_eq!(head.bottom.rect.x, 40.0);
    }

    #[test]
    fn test_advance_while_stops_on_break() {
        let mut s = PipeStream::new();
        s.append(pair_at(10.0));
        s.append(pair_at(20.0));
        s.append(pair_at(30.0));
        let advanced = s.advance_while(-1.0, |pair| {
            if pair.x() < 15.0 {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        });
        assert_eq!(advanced, 2);
        let xs: Vec<f64> = s.iter().map(PipePair::x).collect();
        assert_eq!(xs, vec![9.0, 19.0, 30.0]);
    }

    #[test]
    fn test_prune_requires_strictly_left_of_zero() {
        let mut s = PipeStream::new();
        // trailing edge exactly at 0 stays
        s.append(pair_at(-20.0));
        assert_eq!(s.prune(), 0);
        assert_eq!(s.len(), 1);
        s.advance_and_draw(-0.5, |_| {});
        assert_eq!(s.prune(), 1);
        assert!(s.is_empty());
    }

    #[test]
    fn test_prune_leaves_suffix() {
        let mut s = PipeStream::new();
        for x in [0.0, 30.0, 60.0, 90.0] {
            s.append(pair_at(x));
        }
        for step in 0..6 {
            s.advance_and_draw(-10.0, |_| {});
            s.prune();
            let xs: Vec<f64> = s.iter().map(PipePair::x).collect();
            // surviving pairs stay sorted and every one is still on screen
            assert!(xs.windows(2).all(|w| w[0] < w[1]), "step {step}: {xs:?}");
            assert!(s.iter().all(|p| !p.is_off_screen()));
        }
        // after 60px of travel: 0 -> -60 and 30 -> -30 are gone
        let xs: Vec<f64> = s.iter().map(PipePair::x).collect();
        assert_eq!(xs, vec![0.0, 30.0]);
    }

    #[test]
    fn test_prune_only_inspects_head() {
        let mut s = PipeStream::new();
        s.append(pair_at(100.0));
        // out of order on purpose: an off-screen pair behind an on-screen head stays
        s.append(pair_at(-500.0));
        assert_eq!(s.prune(), 0);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_reset_empties() {
        let mut s = PipeStream::new();
        s.append(pair_at(1.0));
        s.append(pair_at(2.0));
        s.reset();
        assert!(s.is_empty());
        assert!(s.head().is_none());
    }
}
