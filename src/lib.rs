/*!

A CHIP-8 machine as specified at https://en.wikipedia.org/wiki/CHIP-8.

The machine is only the processor, memory and I/O state. It has no clock, no
renderer and no audio backend: a driver calls `Machine::step` as often as it
likes, pushes key events in, reads the framebuffer out, and receives a sound
trigger through a `SoundSink` whenever the sound timer runs out.

# Crossterm Frontend

If you want to try the machine on some programs, there is a ready-to-use driver
you can run by using `cargo run --release --bin crossterm_frontend -- <program>`.
You can then use the keys 0-9 and a-f to give input, and q to quit.

# Library

```rust
use chip_8_machine::machine::{Config, Machine};

let program = [
    0x60, 0x05, // V0 = 5
    0xF0, 0x29, // I = address of glyph "5"
    0xD1, 0x15, // Draw it at (V1, V1)
];
let mut machine = Machine::silent(&program, Config::default()).unwrap();
for _ in 0..3 {
    machine.step().unwrap();
}
assert!(machine.framebuffer().get(0, 0));
println!("{}", machine.framebuffer());
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip_8_machine::machine::{Config, Machine};
use chip_8_machine::machine::instruction::{Instruction, Reg, Const, Addr};

let mut machine = Machine::silent(&[], Config::default()).unwrap();

machine.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
]).unwrap();

assert_eq!(machine.pc(), 0x250);
assert_eq!(machine.register(0xB), 35);
```

## Input and sound

Keys are pushed in with `Machine::key_down` and `Machine::key_up`. Sound is
delivered through anything implementing `SoundSink`, including plain closures.
`ChannelSound` forwards triggers over a channel so that playback happens
outside of the stepping loop.

```rust
use std::sync::mpsc::channel;
use chip_8_machine::machine::{ChannelSound, Config, Machine};

let (sender, receiver) = channel();
let program = [
    0x60, 0x01, // V0 = 1
    0xF0, 0x18, // Sound timer = V0
];
let config = Config { speed: 1, ..Config::default() };
let mut machine = Machine::new(&program, config, ChannelSound::new(sender)).unwrap();
machine.step().unwrap();
machine.step().unwrap();
assert_eq!(receiver.try_iter().count(), 1);
```
*/

pub mod machine;
