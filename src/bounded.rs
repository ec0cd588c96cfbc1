use std::collections::HashSet;

use tracing::{event, Level};

use crate::base::*;

/// Tracks each lit cube individually.  Only instructions (or the parts
/// of them) inside the bound have any effect.
pub struct BoundedReactor {
    bound: Bound,
    on: HashSet<Point>,
}

impl BoundedReactor {
    pub fn new(bound: Bound) -> BoundedReactor {
        let capacity = bound.as_cuboid().volume().min(101 * 101 * 101) as usize;
        BoundedReactor {
            bound,
            on: HashSet::with_capacity(capacity),
        }
    }

    pub fn bound(&self) -> &Bound {
        &self.bound
    }
}

impl Default for BoundedReactor {
    fn default() -> BoundedReactor {
        BoundedReactor::new(Bound::INITIALISATION)
    }
}

impl CubeFlipper for BoundedReactor {
    fn obey(&mut self, instruction: &Instruction) {
        let region = match instruction.cuboid.clamp(&self.bound) {
            Some(region) => region,
            None => {
                event!(Level::TRACE, "ignoring out-of-bounds step {}", instruction);
                return;
            }
        };
        if instruction.on {
            self.on.extend(region.points());
        } else {
            for p in region.points() {
                self.on.remove(&p);
            }
        }
        event!(
            Level::TRACE,
            "after {}: {} cubes lit",
            instruction,
            self.on.len()
        );
    }

    fn count_cubes_on(&self) -> Result<i128, VolumeOverflow> {
        Ok(self.on.len() as i128)
    }
}

#[cfg(test)]
fn count(instructions: &[Instruction]) -> i128 {
    let mut reactor = BoundedReactor::default();
    run_all(&mut reactor, instructions);
    reactor.count_cubes_on().expect("a set cannot overflow")
}

#[test]
fn test_single_on() {
    let inst = Instruction::new(true, cube((10, 12), (10, 12), (10, 12)));
    assert_eq!(count(&[inst]), 27);
}

#[test]
fn test_small_example() {
    let instructions = [
        Instruction::new(true, cube((10, 12), (10, 12), (10, 12))),
        Instruction::new(true, cube((11, 13), (11, 13), (11, 13))),
        Instruction::new(false, cube((9, 11), (9, 11), (9, 11))),
        Instruction::new(true, cube((10, 10), (10, 10), (10, 10))),
    ];
    assert_eq!(count(&instructions[0..1]), 27);
    assert_eq!(count(&instructions[0..2]), 27 + 19);
    assert_eq!(count(&instructions[0..3]), 27 + 19 - 8);
    assert_eq!(count(&instructions), 39);
}

#[test]
fn test_out_of_bounds_is_ignored() {
    let instructions = [
        Instruction::new(true, cube((-54112, -39298), (-85059, -49293), (-27449, 7877))),
        Instruction::new(true, cube((49, 60), (50, 50), (-51, -50))),
    ];
    // Only the part of the second step inside the bound counts.
    assert_eq!(count(&instructions), 2);
}

#[test]
fn test_custom_bound() {
    let bound = Bound::new(0, 1).expect("valid bound");
    let mut reactor = BoundedReactor::new(bound);
    reactor.obey(&Instruction::new(true, cube((-5, 5), (-5, 5), (-5, 5))));
    assert_eq!(reactor.count_cubes_on(), Ok(8));
    reactor.obey(&Instruction::new(false, cube((1, 1), (1, 1), (1, 1))));
    assert_eq!(reactor.count_cubes_on(), Ok(7));
    assert_eq!(reactor.bound(), &bound);
}
