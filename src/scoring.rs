//! Pass-through scoring and pipe collision checks.

use crate::geometry::{Rect, overlaps};
use crate::pipes::PipePair;

/// Marks `pair` passed once the bird's x has moved beyond the top pipe's trailing
/// edge. Returns true only on the call that sets the flag, so each pair scores
/// at most once.
pub fn evaluate_pass(pair: &mut PipePair, bird: &Rect) -> bool {
    if pair.passed || bird.x <= pair.trailing_edge() {
        return false;
    }
    pair.passed = true;
    true
}

/// True if the bird overlaps either pipe of the pair.
pub fn evaluate_collision(pair: &PipePair, bird: &Rect) -> bool {
    overlaps(bird, &pair.top.rect) || overlaps(bird, &pair.bottom.rect)
}
