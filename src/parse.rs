//! Parser for reboot steps such as `on x=-20..26,y=-36..17,z=-47..7`.
use core::ops::RangeInclusive;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1},
    combinator::{map_res, opt, recognize, value},
    sequence::{preceded, separated_pair, terminated, tuple},
    IResult,
};
use tracing::{event, Level};

use crate::base::{Cuboid, Instruction};

fn i32_parser(input: &str) -> IResult<&str, i32> {
    map_res(
        recognize(tuple((opt(char('-')), digit1))),
        FromStr::from_str,
    )(input)
}

fn parse_range(input: &str) -> IResult<&str, RangeInclusive<i32>> {
    let (rest, (lo, hi)) = separated_pair(i32_parser, tag(".."), i32_parser)(input)?;
    Ok((rest, lo..=hi))
}

fn parse_cuboid(input: &str) -> IResult<&str, Cuboid> {
    map_res(
        tuple((
            preceded(tag("x="), terminated(parse_range, char(','))),
            preceded(tag("y="), terminated(parse_range, char(','))),
            preceded(tag("z="), parse_range),
        )),
        |(x, y, z)| Cuboid::new(x, y, z),
    )(input)
}

fn parse_on_off(input: &str) -> IResult<&str, bool> {
    alt((value(true, tag("on")), value(false, tag("off"))))(input)
}

pub fn parse_instruction(input: &str) -> IResult<&str, Instruction> {
    let (rest, (on, cuboid)) = separated_pair(parse_on_off, char(' '), parse_cuboid)(input)?;
    Ok((rest, Instruction::new(on, cuboid)))
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based.
    pub line_number: usize,
    pub line: String,
    pub reason: String,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: failed to parse '{}': {}",
            self.line_number, self.line, self.reason
        )
    }
}

impl Error for ParseError {}

impl TryFrom<&str> for Instruction {
    type Error = String;
    fn try_from(s: &str) -> Result<Instruction, String> {
        match parse_instruction(s) {
            Ok(("", instruction)) => Ok(instruction),
            Ok((unparsed, _)) => Err(format!("unexpected trailing junk: '{}'", unparsed)),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Parses a whole reboot procedure.  Blank lines are skipped; any
/// other line that is not a well-formed step aborts the parse, and
/// nothing parsed before it is returned.
pub fn parse_instructions<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Instruction>, ParseError> {
    let mut result = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        let line = line.as_ref().trim_end();
        if line.is_empty() {
            continue;
        }
        match Instruction::try_from(line) {
            Ok(instruction) => {
                event!(Level::TRACE, "line {}: {}", i + 1, instruction);
                result.push(instruction);
            }
            Err(reason) => {
                return Err(ParseError {
                    line_number: i + 1,
                    line: line.to_string(),
                    reason,
                });
            }
        }
    }
    Ok(result)
}

#[cfg(test)]
use crate::base::cube;

#[test]
fn test_parse_instruction() {
    assert_eq!(
        parse_instruction("on x=-54112..-39298,y=-85059..-49293,z=-27449..7877"),
        Ok((
            "",
            Instruction::new(
                true,
                cube((-54112, -39298), (-85059, -49293), (-27449, 7877))
            )
        ))
    );
    assert_eq!(
        Instruction::try_from("off x=9..11,y=9..11,z=9..11"),
        Ok(Instruction::new(false, cube((9, 11), (9, 11), (9, 11))))
    );
}

#[test]
fn test_parse_display_agree() {
    let text = "off x=-48..-32,y=26..41,z=-47..-37";
    let inst = Instruction::try_from(text).expect("valid instruction");
    assert_eq!(inst.to_string(), text);
}

#[test]
fn test_parse_rejects_malformed() {
    assert!(Instruction::try_from("toggle x=1..2,y=1..2,z=1..2").is_err());
    assert!(Instruction::try_from("on x=1..2,y=1..2").is_err());
    assert!(Instruction::try_from("on x=1..2,y=1..2,z=1..2 extra").is_err());
    assert!(Instruction::try_from("on x=1..2, y=1..2,z=1..2").is_err());
    assert!(Instruction::try_from("on x=1..99999999999,y=1..2,z=1..2").is_err());
    // Inverted range.
    assert!(Instruction::try_from("on x=3..2,y=1..2,z=1..2").is_err());
}

#[test]
fn test_parse_instructions() {
    let lines = [
        "on x=10..12,y=10..12,z=10..12",
        "",
        "off x=9..11,y=9..11,z=9..11",
        "",
    ];
    let parsed = parse_instructions(&lines).expect("valid input");
    assert_eq!(parsed.len(), 2);
    assert!(parsed[0].on);
    assert!(!parsed[1].on);
}

#[test]
fn test_parse_instructions_stops_at_first_error() {
    let lines = [
        "on x=10..12,y=10..12,z=10..12",
        "on x=10..12,y=10..12",
        "of x=10..12,y=10..12,z=10..12",
    ];
    match parse_instructions(&lines) {
        Err(e) => {
            assert_eq!(e.line_number, 2);
            assert_eq!(e.line, "on x=10..12,y=10..12");
        }
        Ok(v) => panic!("expected a parse error, got {:?}", v),
    }
}
