use chip_8_machine::machine::{Config, Machine, Mute};
use pretty_assertions::assert_eq;

/// Draws a 4 pixel wide bar at (6, 3), then jumps back to draw it again.
const PROGRAM: [u8; 13] = [
    0x60, 0x05, // 0x200: V0 = 5
    0x61, 0x03, // 0x202: V1 = 3
    0x70, 0x01, // 0x204: V0 += 1
    0xA2, 0x0C, // 0x206: I = 0x20C
    0xD0, 0x11, // 0x208: draw 8x1 sprite at (V0, V1)
    0x12, 0x08, // 0x20A: jump to 0x208
    0xF0,       // 0x20C: sprite row
];

/// (pc, V0, V1, VF, I) after each step
const TRACE: [(u16, u8, u8, u8, u16); 7] = [
    (0x202, 5, 0, 0, 0x000),
    (0x204, 5, 3, 0, 0x000),
    (0x206, 6, 3, 0, 0x000),
    (0x208, 6, 3, 0, 0x20C),
    (0x20A, 6, 3, 0, 0x20C),
    (0x208, 6, 3, 0, 0x20C),
    (0x20A, 6, 3, 1, 0x20C),
];

fn lit_cells(machine: &Machine<Mute>) -> Vec<usize> {
    machine
        .framebuffer()
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, lit)| **lit)
        .map(|(index, _)| index)
        .collect()
}

#[test]
fn minimal_program_matches_reference_trace() {
    let config = Config { seed: Some(0), ..Config::default() };
    let mut machine = Machine::silent(&PROGRAM, config).unwrap();

    for (step, expected) in TRACE.iter().enumerate() {
        machine.step().unwrap();
        let actual = (
            machine.pc(),
            machine.register(0),
            machine.register(1),
            machine.register(0xF),
            machine.i(),
        );
        assert_eq!(&actual, expected, "after step {}", step + 1);

        match step + 1 {
            5 => assert_eq!(lit_cells(&machine), vec![3 * 64 + 6, 3 * 64 + 7, 3 * 64 + 8, 3 * 64 + 9]),
            7 => assert_eq!(lit_cells(&machine), vec![]),
            _ => {}
        }
    }

    assert_eq!(machine.framebuffer().cells().len(), 2048);
    assert_eq!(machine.stack_pointer(), 0);
    assert_eq!(machine.steps(), 7);
}

#[test]
fn clear_screen_leaves_every_cell_dark() {
    let program = [
        0xA0, 0x00, // I = font glyph 0
        0xD0, 0x05, // draw at (0, 0)
        0x00, 0xE0, // clear
    ];
    let mut machine = Machine::silent(&program, Config::default()).unwrap();
    machine.step().unwrap();
    machine.step().unwrap();
    assert!(!lit_cells(&machine).is_empty());
    machine.step().unwrap();
    assert!(lit_cells(&machine).is_empty());
}
