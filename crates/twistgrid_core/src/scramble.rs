//! Random turn sequences.

use rand::Rng;
use strum::VariantArray;

use crate::{Arrangement, Axis, TurnCode, TurnDirection};

/// Generates `count` random turns on `arrangement`.
///
/// Each turn picks a uniformly random axis, layer, and direction. A turn that
/// would immediately undo the previous one is rejected and redrawn.
pub fn random_turns(arrangement: &Arrangement, count: usize, rng: &mut impl Rng) -> Vec<TurnCode> {
    let mut ret: Vec<TurnCode> = Vec::with_capacity(count);
    while ret.len() < count {
        let turn = random_turn(arrangement, rng);
        if ret.last().is_some_and(|&prev| prev.is_inverse_of(turn)) {
            continue;
        }
        ret.push(turn);
    }
    ret
}

fn random_turn(arrangement: &Arrangement, rng: &mut impl Rng) -> TurnCode {
    let axis = Axis::VARIANTS[rng.random_range(0..Axis::VARIANTS.len())];
    let index = rng.random_range(0..arrangement.count(axis));
    let direction = if rng.random_bool(0.5) {
        TurnDirection::Counterclockwise
    } else {
        TurnDirection::Clockwise
    };
    TurnCode::new(axis, index, direction)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_scramble_length_and_range() {
        let arrangement = Arrangement::centered([2, 3, 5], 1.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let turns = random_turns(&arrangement, 200, &mut rng);
        assert_eq!(turns.len(), 200);
        for turn in &turns {
            assert!(arrangement.contains_layer(turn.axis(), turn.layer.index));
        }
        assert!(random_turns(&arrangement, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_scramble_never_undoes_previous_turn() {
        // A 1x1x1 arrangement has only six possible turns, so inverse pairs
        // would be very likely without rejection.
        for counts in [[1, 1, 1], [3, 3, 3], [2, 1, 4]] {
            let arrangement = Arrangement::centered(counts, 1.0).unwrap();
            for seed in 0..50 {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let turns = random_turns(&arrangement, 40, &mut rng);
                for pair in turns.windows(2) {
                    assert!(!pair[0].is_inverse_of(pair[1]), "{} {}", pair[0], pair[1]);
                }
            }
        }
    }

    #[test]
    fn test_scramble_is_deterministic_for_seed() {
        let arrangement = Arrangement::centered([3, 3, 3], 1.0).unwrap();
        let a = random_turns(&arrangement, 25, &mut ChaCha8Rng::seed_from_u64(99));
        let b = random_turns(&arrangement, 25, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
