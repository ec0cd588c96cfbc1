//! Exact lit-cube counting over unbounded space.
//!
//! The reactor keeps a list of signed cuboids.  The sum of their
//! signed volumes is always the number of lit cubes.  To obey a new
//! step, every existing entry which overlaps the step's cuboid gets a
//! counterpart of opposite sign covering just the overlap; that
//! removes whatever was previously counted inside the step's cuboid.
//! If the step turns cubes on, its whole cuboid is then added with a
//! positive sign.
//!
//! Entries are never removed or modified.  Overlapping entries of
//! opposite sign simply cancel out in the sum.
use tracing::{event, span, Level};

use crate::base::*;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn negate(self) -> Sign {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }

    pub fn apply(self, n: i128) -> i128 {
        match self {
            Sign::Positive => n,
            Sign::Negative => -n,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SignedCuboid {
    pub cuboid: Cuboid,
    pub sign: Sign,
}

impl SignedCuboid {
    pub fn signed_volume(&self) -> i128 {
        self.sign.apply(self.cuboid.volume())
    }
}

#[derive(Debug, Default)]
pub struct SignedVolumeReactor {
    entries: Vec<SignedCuboid>,
}

impl SignedVolumeReactor {
    pub fn new() -> SignedVolumeReactor {
        SignedVolumeReactor {
            entries: Vec::new(),
        }
    }

    pub fn apply(&mut self, instruction: &Instruction) {
        let region = &instruction.cuboid;
        // Only entries which existed before this step are compensated.
        // The compensating entries added below already lie inside
        // `region`, and must not be compensated a second time.
        let existing = self.entries.len();
        for i in 0..existing {
            let entry = &self.entries[i];
            if let Some(overlap) = entry.cuboid.intersect(region) {
                let compensation = SignedCuboid {
                    cuboid: overlap,
                    sign: entry.sign.negate(),
                };
                self.entries.push(compensation);
            }
        }
        if instruction.on {
            self.entries.push(SignedCuboid {
                cuboid: region.clone(),
                sign: Sign::Positive,
            });
        }
        event!(
            Level::DEBUG,
            "{}: {} entries compensated, {} entries in total",
            instruction,
            self.entries.len() - existing - usize::from(instruction.on),
            self.entries.len()
        );
    }

    /// The number of lit cubes.  Fails only if the running sum leaves
    /// the range of `i128`, which would need far more entries than
    /// could fit in memory.
    pub fn total(&self) -> Result<i128, VolumeOverflow> {
        self.entries.iter().try_fold(0i128, |acc, entry| {
            acc.checked_add(entry.signed_volume()).ok_or(VolumeOverflow)
        })
    }

    pub fn entries(&self) -> &[SignedCuboid] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CubeFlipper for SignedVolumeReactor {
    fn obey(&mut self, instruction: &Instruction) {
        let span = span!(Level::TRACE, "obey", entries = self.entries.len());
        let _enter = span.enter();
        self.apply(instruction);
    }

    fn count_cubes_on(&self) -> Result<i128, VolumeOverflow> {
        self.total()
    }
}

#[cfg(test)]
fn total_after(instructions: &[Instruction]) -> i128 {
    let mut reactor = SignedVolumeReactor::new();
    run_all(&mut reactor, instructions);
    reactor.total().expect("test totals are small")
}

#[cfg(test)]
fn on(c: Cuboid) -> Instruction {
    Instruction::new(true, c)
}

#[cfg(test)]
fn off(c: Cuboid) -> Instruction {
    Instruction::new(false, c)
}

#[test]
fn test_empty_reactor() {
    let reactor = SignedVolumeReactor::new();
    assert!(reactor.is_empty());
    assert_eq!(reactor.total(), Ok(0));
}

#[test]
fn test_single_on() {
    assert_eq!(total_after(&[on(cube((0, 9), (0, 9), (0, 9)))]), 1000);
}

#[test]
fn test_repeated_on_is_idempotent() {
    let c = cube((0, 9), (0, 9), (0, 9));
    assert_eq!(total_after(&[on(c.clone()), on(c.clone())]), 1000);
    assert_eq!(total_after(&[on(c.clone()), on(c.clone()), on(c)]), 1000);
}

#[test]
fn test_repeated_on_entries() {
    let c = cube((0, 9), (0, 9), (0, 9));
    let mut reactor = SignedVolumeReactor::new();
    reactor.apply(&on(c.clone()));
    reactor.apply(&on(c.clone()));
    // One compensation for the first entry, then the new cuboid.  Had
    // the compensation itself been compensated, there would be four.
    assert_eq!(
        reactor.entries(),
        &[
            SignedCuboid {
                cuboid: c.clone(),
                sign: Sign::Positive
            },
            SignedCuboid {
                cuboid: c.clone(),
                sign: Sign::Negative
            },
            SignedCuboid {
                cuboid: c,
                sign: Sign::Positive
            },
        ]
    );
}

#[test]
fn test_overlap_subtraction() {
    let instructions = [
        on(cube((0, 9), (0, 9), (0, 9))),
        on(cube((5, 14), (0, 9), (0, 9))),
    ];
    assert_eq!(total_after(&instructions), 1500);
}

#[test]
fn test_full_off() {
    let c = cube((0, 9), (0, 9), (0, 9));
    assert_eq!(total_after(&[on(c.clone()), off(c)]), 0);
}

#[test]
fn test_off_with_nothing_lit() {
    let mut reactor = SignedVolumeReactor::new();
    reactor.apply(&off(cube((0, 9), (0, 9), (0, 9))));
    assert!(reactor.is_empty());
    assert_eq!(reactor.total(), Ok(0));
}

#[test]
fn test_off_then_on_again() {
    let big = cube((0, 9), (0, 9), (0, 9));
    let hole = cube((2, 3), (2, 3), (2, 3));
    let instructions = [on(big.clone()), off(hole.clone()), off(hole.clone())];
    assert_eq!(total_after(&instructions), 992);
    let instructions = [on(big), off(hole.clone()), on(hole)];
    assert_eq!(total_after(&instructions), 1000);
}

#[test]
fn test_order_matters() {
    let a = on(cube((0, 9), (0, 9), (0, 9)));
    let b = off(cube((5, 14), (0, 9), (0, 9)));
    assert_eq!(total_after(&[a.clone(), b.clone()]), 500);
    assert_eq!(total_after(&[b, a]), 1000);
}

#[test]
fn test_small_example() {
    let instructions = [
        on(cube((10, 12), (10, 12), (10, 12))),
        on(cube((11, 13), (11, 13), (11, 13))),
        off(cube((9, 11), (9, 11), (9, 11))),
        on(cube((10, 10), (10, 10), (10, 10))),
    ];
    assert_eq!(total_after(&instructions), 39);
}

#[test]
fn test_huge_cuboids() {
    let everything = cube(
        (i32::MIN, i32::MAX),
        (i32::MIN, i32::MAX),
        (i32::MIN, i32::MAX),
    );
    let corner = cube((0, i32::MAX), (0, i32::MAX), (0, i32::MAX));
    let instructions = [on(everything.clone()), off(corner), on(everything)];
    assert_eq!(total_after(&instructions[..2]), (1i128 << 96) - (1i128 << 93));
    assert_eq!(total_after(&instructions), 1i128 << 96);
}
