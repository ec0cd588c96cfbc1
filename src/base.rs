use core::ops::RangeInclusive;
use std::cmp::{max, min};
use std::error::Error;
use std::fmt::{self, Display, Formatter};

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Point(pub i32, pub i32, pub i32);

impl Point {
    pub fn new(x: i32, y: i32, z: i32) -> Point {
        Point(x, y, z)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvertedRange {
    pub axis: char,
    pub lo: i32,
    pub hi: i32,
}

impl Display for InvertedRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "inverted {} range {}..{} (lower bound exceeds upper bound)",
            self.axis, self.lo, self.hi
        )
    }
}

impl Error for InvertedRange {}

fn checked_range(axis: char, lo: i32, hi: i32) -> Result<RangeInclusive<i32>, InvertedRange> {
    if lo <= hi {
        Ok(lo..=hi)
    } else {
        Err(InvertedRange { axis, lo, hi })
    }
}

fn intersect_range(a: &RangeInclusive<i32>, b: &RangeInclusive<i32>) -> Option<RangeInclusive<i32>> {
    let result = max(*a.start(), *b.start())..=min(*a.end(), *b.end());
    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}

fn extent(r: &RangeInclusive<i32>) -> i128 {
    i128::from(*r.end()) - i128::from(*r.start()) + 1
}

/// An axis-aligned box of unit cubes.  All three ranges are inclusive
/// and non-empty; the constructors refuse anything else, so every
/// `Cuboid` has a volume of at least 1.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Cuboid {
    x: RangeInclusive<i32>,
    y: RangeInclusive<i32>,
    z: RangeInclusive<i32>,
}

impl Cuboid {
    pub fn new(
        x: RangeInclusive<i32>,
        y: RangeInclusive<i32>,
        z: RangeInclusive<i32>,
    ) -> Result<Cuboid, InvertedRange> {
        Ok(Cuboid {
            x: checked_range('x', *x.start(), *x.end())?,
            y: checked_range('y', *y.start(), *y.end())?,
            z: checked_range('z', *z.start(), *z.end())?,
        })
    }

    pub fn x(&self) -> &RangeInclusive<i32> {
        &self.x
    }

    pub fn y(&self) -> &RangeInclusive<i32> {
        &self.y
    }

    pub fn z(&self) -> &RangeInclusive<i32> {
        &self.z
    }

    /// Returns the region common to both cuboids, or `None` when they
    /// share no cube at all.  Being disjoint is not an error.
    pub fn intersect(&self, other: &Cuboid) -> Option<Cuboid> {
        Some(Cuboid {
            x: intersect_range(&self.x, &other.x)?,
            y: intersect_range(&self.y, &other.y)?,
            z: intersect_range(&self.z, &other.z)?,
        })
    }

    /// The number of unit cubes in this cuboid.  Each extent is at
    /// most 2^32, so the product fits comfortably in an `i128`.
    pub fn volume(&self) -> i128 {
        extent(&self.x) * extent(&self.y) * extent(&self.z)
    }

    pub fn clamp(&self, bound: &Bound) -> Option<Cuboid> {
        self.intersect(&bound.as_cuboid())
    }

    pub fn contains(&self, p: &Point) -> bool {
        self.x.contains(&p.0) && self.y.contains(&p.1) && self.z.contains(&p.2)
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.x.clone().flat_map(move |x| {
            self.y
                .clone()
                .flat_map(move |y| self.z.clone().map(move |z| Point::new(x, y, z)))
        })
    }
}

impl Display for Cuboid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x={}..{},y={}..{},z={}..{}",
            self.x.start(),
            self.x.end(),
            self.y.start(),
            self.y.end(),
            self.z.start(),
            self.z.end()
        )
    }
}

#[cfg(test)]
pub(crate) fn cube(x: (i32, i32), y: (i32, i32), z: (i32, i32)) -> Cuboid {
    Cuboid::new(x.0..=x.1, y.0..=y.1, z.0..=z.1).expect("test cuboid should be valid")
}

#[test]
fn test_cuboid_rejects_inverted_range() {
    assert_eq!(
        Cuboid::new(0..=1, 5..=4, 0..=1),
        Err(InvertedRange {
            axis: 'y',
            lo: 5,
            hi: 4
        })
    );
}

#[test]
fn test_intersect() {
    let a = cube((0, 9), (0, 9), (0, 9));
    let b = cube((5, 14), (-3, 4), (9, 20));
    let expected = Some(cube((5, 9), (0, 4), (9, 9)));
    assert_eq!(a.intersect(&b), expected);
    assert_eq!(b.intersect(&a), expected);
}

#[test]
fn test_intersect_self() {
    let a = cube((-7, 3), (2, 2), (-100, 100));
    assert_eq!(a.intersect(&a), Some(a.clone()));
}

#[test]
fn test_intersect_disjoint() {
    let a = cube((0, 1), (0, 1), (0, 1));
    let b = cube((5, 6), (5, 6), (5, 6));
    assert_eq!(a.intersect(&b), None);
    assert_eq!(b.intersect(&a), None);
    // Overlapping on two axes is still disjoint.
    let c = cube((0, 1), (0, 1), (2, 3));
    assert_eq!(a.intersect(&c), None);
}

#[test]
fn test_volume() {
    assert_eq!(cube((0, 9), (0, 9), (0, 9)).volume(), 1000);
    assert_eq!(cube((4, 4), (-2, -2), (7, 7)).volume(), 1);
    // Too large for a u64 once multiplied out.
    let everything = cube((i32::MIN, i32::MAX), (i32::MIN, i32::MAX), (i32::MIN, i32::MAX));
    assert_eq!(everything.volume(), 1i128 << 96);
}

#[test]
fn test_points() {
    let c = cube((1, 2), (0, 0), (-1, 1));
    let points: Vec<Point> = c.points().collect();
    assert_eq!(points.len() as i128, c.volume());
    assert!(points.iter().all(|p| c.contains(p)));
    assert_eq!(points[0], Point::new(1, 0, -1));
}

/// A symmetric bound applied to all three axes.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Bound {
    low: i32,
    high: i32,
}

impl Bound {
    /// The reactor initialisation area.
    pub const INITIALISATION: Bound = Bound { low: -50, high: 50 };

    pub fn new(low: i32, high: i32) -> Result<Bound, InvertedRange> {
        checked_range('*', low, high)?;
        Ok(Bound { low, high })
    }

    pub fn low(&self) -> i32 {
        self.low
    }

    pub fn high(&self) -> i32 {
        self.high
    }

    pub fn as_cuboid(&self) -> Cuboid {
        Cuboid {
            x: self.low..=self.high,
            y: self.low..=self.high,
            z: self.low..=self.high,
        }
    }

    pub fn encloses(&self, c: &Cuboid) -> bool {
        [c.x(), c.y(), c.z()]
            .iter()
            .all(|r| *r.start() >= self.low && *r.end() <= self.high)
    }
}

impl Default for Bound {
    fn default() -> Bound {
        Bound::INITIALISATION
    }
}

#[test]
fn test_clamp() {
    let bound = Bound::INITIALISATION;
    assert_eq!(
        cube((-54112, -39298), (-85059, -49293), (-27449, 7877)).clamp(&bound),
        None
    );
    assert_eq!(
        cube((-54112, 39298), (-85059, -19), (20, 200)).clamp(&bound),
        Some(cube((-50, 50), (-50, -19), (20, 50)))
    );
}

#[test]
fn test_bound_new() {
    assert_eq!(Bound::new(-50, 50), Ok(Bound::INITIALISATION));
    assert!(Bound::new(3, 2).is_err());
    assert_eq!(Bound::default().as_cuboid().volume(), 101 * 101 * 101);
}

#[test]
fn test_encloses() {
    let bound = Bound::INITIALISATION;
    assert!(bound.encloses(&cube((-50, 50), (0, 0), (10, 12))));
    assert!(!bound.encloses(&cube((-50, 51), (0, 0), (10, 12))));
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Instruction {
    pub on: bool,
    pub cuboid: Cuboid,
}

impl Instruction {
    pub fn new(on: bool, cuboid: Cuboid) -> Instruction {
        Instruction { on, cuboid }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let state = if self.on { "on" } else { "off" };
        write!(f, "{} {}", state, self.cuboid)
    }
}

#[test]
fn test_instruction_display() {
    let inst = Instruction::new(false, cube((-20, 26), (-36, 17), (-47, 7)));
    assert_eq!(inst.to_string(), "off x=-20..26,y=-36..17,z=-47..7");
}

/// The lit-cube count could not be represented exactly.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct VolumeOverflow;

impl Display for VolumeOverflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("lit cube count overflowed a 128-bit integer")
    }
}

impl Error for VolumeOverflow {}

/// Something which follows reboot instructions and can say how many
/// cubes are lit afterwards.
pub trait CubeFlipper {
    fn obey(&mut self, instruction: &Instruction);
    fn count_cubes_on(&self) -> Result<i128, VolumeOverflow>;
}

/// Applies every instruction, in order.  Order matters: the same
/// instructions in a different order generally light different cubes.
pub fn run_all<T: CubeFlipper>(reactor: &mut T, instructions: &[Instruction]) {
    for instruction in instructions {
        reactor.obey(instruction);
    }
}
