use reactor::{
    parse_instructions, run_all, Bound, BoundedReactor, CubeFlipper, Instruction,
    SignedVolumeReactor,
};

const SAMPLE: &[&str] = &[
    "on x=10..12,y=10..12,z=10..12",
    "on x=11..13,y=11..13,z=11..13",
    "off x=9..11,y=9..11,z=9..11",
    "on x=10..10,y=10..10,z=10..10",
];

const MIXED: &[&str] = &[
    "on x=-20..26,y=-36..17,z=-47..7",
    "on x=-20..33,y=-21..23,z=-26..28",
    "off x=-48..-32,y=26..41,z=-47..-37",
    "on x=-22..28,y=-29..23,z=-38..16",
    "off x=-40..-22,y=-38..-28,z=23..41",
    "on x=-46..7,y=-6..46,z=-50..-1",
    "off x=2..18,y=-32..-10,z=-23..-3",
    "on x=-49..1,y=-3..46,z=-24..28",
    "on x=-2..44,y=-46..5,z=-48..-3",
    "off x=-50..-31,y=-20..2,z=5..16",
];

fn counts(instructions: &[Instruction]) -> (i128, i128) {
    let mut bounded = BoundedReactor::new(Bound::INITIALISATION);
    run_all(&mut bounded, instructions);
    let mut signed = SignedVolumeReactor::new();
    run_all(&mut signed, instructions);
    (
        bounded.count_cubes_on().expect("bounded count"),
        signed.count_cubes_on().expect("signed count"),
    )
}

#[test]
fn test_sample() {
    let instructions = parse_instructions(SAMPLE).expect("sample should parse");
    assert_eq!(counts(&instructions), (39, 39));
}

#[test]
fn test_counters_agree_inside_bound() {
    let instructions = parse_instructions(MIXED).expect("input should parse");
    let bound = Bound::INITIALISATION;
    assert!(instructions.iter().all(|inst| bound.encloses(&inst.cuboid)));
    // Every prefix, not just the whole procedure.
    for n in 0..=instructions.len() {
        let (bounded, signed) = counts(&instructions[..n]);
        assert_eq!(bounded, signed, "after {} steps", n);
    }
}

#[test]
fn test_steps_outside_bound_only_count_everywhere() {
    let mut lines: Vec<&str> = SAMPLE.to_vec();
    lines.push("on x=967..23432,y=45373..81175,z=27513..53682");
    let instructions = parse_instructions(&lines).expect("input should parse");
    let (bounded, signed) = counts(&instructions);
    assert_eq!(bounded, 39);
    assert_eq!(signed, 39 + 22466 * 35803 * 26170);
}

#[test]
fn test_malformed_input_is_fatal() {
    let lines = ["on x=10..12,y=10..12,z=10..12", "on x=10..12,y=10..12,z=oops"];
    let err = parse_instructions(&lines).expect_err("second line is malformed");
    assert_eq!(err.line_number, 2);
    assert!(err.to_string().starts_with("line 2: failed to parse"));
}
