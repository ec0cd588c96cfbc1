//! Reactor reboot: count the cubes left lit by a sequence of on/off
//! cuboid instructions.
//!
//! Two counters are provided.  [`bounded::BoundedReactor`] lights
//! individual cubes inside a small region and is only practical for
//! the initialisation area.  [`signed::SignedVolumeReactor`] keeps a
//! list of signed cuboids whose volumes sum to the number of lit
//! cubes, so it works over all of space.
pub mod base;
pub mod bounded;
pub mod parse;
pub mod signed;

pub use base::{run_all, Bound, CubeFlipper, Cuboid, Instruction, Point, VolumeOverflow};
pub use bounded::BoundedReactor;
pub use parse::{parse_instructions, ParseError};
pub use signed::{Sign, SignedCuboid, SignedVolumeReactor};
