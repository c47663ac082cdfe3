//! The CHIP-8 machine as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::machine::config::{Config, JumpOffset};
use crate::machine::display::{Framebuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::machine::error::MachineError;
use crate::machine::instruction::*;
use crate::machine::keypad::Keypad;
use crate::machine::opcode::Opcode;
use crate::machine::sound::{Mute, SoundSink};

pub const MEM_SIZE: usize = 4096;
pub const NUM_REGISTERS: usize = 16;
pub const STACK_SIZE: usize = 16;
pub const PC_START: u16 = 0x200;
pub const MAX_ROM_SIZE: usize = MEM_SIZE - PC_START as usize;
const FONT_GLYPH_SIZE: u16 = 5;
const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Processor, memory and I/O state of a CHIP-8 machine.
///
/// The machine has no clock of its own. The driver calls `step` at whatever
/// rate it likes, feeds key events through `key_down` and `key_up`, and reads
/// the `framebuffer` when it wants to render.
pub struct Machine<S: SoundSink> {
    memory: [u8; MEM_SIZE],
    registers: [u8; NUM_REGISTERS],
    delay_timer: u8,
    sound_timer: u8,
    i: u16,
    program_counter: u16,
    stack_pointer: u8,
    stack: [u16; STACK_SIZE],
    screen: Framebuffer,
    keypad: Keypad,

    steps: u64,
    config: Config,
    rng: StdRng,
    sound: S,
}

impl Machine<Mute> {

    /// Create a machine that never makes a sound
    pub fn silent(rom: &[u8], config: Config) -> Result<Machine<Mute>, MachineError> {
        Machine::new(rom, config, Mute)
    }
}

impl<S: SoundSink> Machine<S> {

    /// Create a new machine with the font loaded at 0x000 and `rom` at 0x200.
    pub fn new(rom: &[u8], config: Config, sound: S) -> Result<Machine<S>, MachineError> {
        if config.speed == 0 {
            return Err(MachineError::InvalidSpeed);
        }

        let mut memory = [0; MEM_SIZE];
        memory[..FONT.len()].copy_from_slice(&FONT);

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut machine = Machine {
            memory,
            registers: [0; NUM_REGISTERS],
            delay_timer: 0,
            sound_timer: 0,
            i: 0,
            program_counter: PC_START,
            stack_pointer: 0,
            stack: [0; STACK_SIZE],
            screen: Framebuffer::new(),
            keypad: Keypad::new(),

            steps: 0,
            config,
            rng,
            sound,
        };
        machine.load_rom(rom)?;
        Ok(machine)
    }

    /// Replace the program area with `rom` and jump to 0x200.
    /// Registers, timers, screen and keys are left as they are.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), MachineError> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(MachineError::RomTooLarge {
                size: rom.len(),
                max_size: MAX_ROM_SIZE,
            });
        }

        let start = PC_START as usize;
        for byte in self.memory[start..].iter_mut() {
            *byte = 0;
        }
        self.memory[start..start + rom.len()].copy_from_slice(rom);
        self.program_counter = PC_START;

        log::debug!("Loaded {} byte ROM", rom.len());
        Ok(())
    }

    /// Fetch, decode and execute a single instruction, then update
    /// the timers if this was the `speed`th step since the last tick.
    ///
    /// Does nothing while waiting for a key. On error nothing has changed.
    pub fn step(&mut self) -> Result<(), MachineError> {
        if self.keypad.is_waiting() {
            return Ok(());
        }

        // Each opcode is two bytes
        let pc = self.program_counter;
        let opcode = Opcode::from_bytes(self.read(pc as usize), self.read(pc as usize + 1));
        let instruction = match Instruction::decode(opcode) {
            Some(instruction) => instruction,
            None => {
                let error = MachineError::UnknownOpcode { opcode: opcode.0, pc };
                log::error!("{}", error);
                return Err(error);
            }
        };

        log::trace!("{:#05x}: {:?}", pc, instruction);

        self.program_counter = pc.wrapping_add(2);
        if let Err(error) = self.run(instruction, pc) {
            self.program_counter = pc;
            log::error!("{}", error);
            return Err(error);
        }

        self.steps += 1;
        if self.steps % self.config.speed as u64 == 0 {
            self.tick_timers();
        }

        Ok(())
    }

    /// Execute an instruction without fetching it.
    /// The program counter only changes if the instruction itself changes it,
    /// and timers are not updated.
    pub fn execute(&mut self, instruction: Instruction) -> Result<(), MachineError> {
        let pc = self.program_counter;
        self.run(instruction, pc)
    }

    /// Execute several instructions in order, stopping at the first error.
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Result<(), MachineError> {
        for instruction in instructions {
            self.execute(*instruction)?;
        }
        Ok(())
    }

    /// Press `key`. If the machine is waiting for a key, it is stored
    /// in the awaited register and stepping resumes.
    pub fn key_down(&mut self, key: u8) -> Result<(), MachineError> {
        match self.keypad.press(key) {
            Ok(Some(register)) => {
                self.registers[register as usize] = key;
                log::debug!("Key {:#x} pressed, resuming with V{:X} = {:#x}", key, register, key);
                Ok(())
            }
            Ok(None) => {
                log::debug!("Key {:#x} pressed", key);
                Ok(())
            }
            Err(error) => {
                log::warn!("Ignoring key press: {}", error);
                Err(error)
            }
        }
    }

    /// Release `key`.
    pub fn key_up(&mut self, key: u8) -> Result<(), MachineError> {
        self.keypad.release(key).map_err(|error| {
            log::warn!("Ignoring key release: {}", error);
            error
        })?;
        log::debug!("Key {:#x} released", key);
        Ok(())
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.screen
    }

    pub fn pc(&self) -> u16 {
        self.program_counter
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn registers(&self) -> &[u8; NUM_REGISTERS] {
        &self.registers
    }

    /// Value of register `Vx`. Only the low nibble of `x` is used.
    pub fn register(&self, x: u8) -> u8 {
        self.registers[(x & 0xF) as usize]
    }

    pub fn stack_pointer(&self) -> u8 {
        self.stack_pointer
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn memory(&self) -> &[u8; MEM_SIZE] {
        &self.memory
    }

    pub fn is_waiting_for_key(&self) -> bool {
        self.keypad.is_waiting()
    }

    pub fn is_key_down(&self, key: u8) -> bool {
        self.keypad.is_down(key)
    }

    /// Number of instructions executed by `step` so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // Memory accesses wrap around at 4 KB
    fn read(&self, addr: usize) -> u8 {
        self.memory[addr % MEM_SIZE]
    }

    fn write(&mut self, addr: usize, value: u8) {
        self.memory[addr % MEM_SIZE] = value;
    }

    fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);

        if self.sound_timer > 0 {
            self.sound_timer -= 1;
            if self.sound_timer == 0 {
                log::trace!("Sound timer ran out");
                self.sound.trigger();
            }
        }
    }

    /// Map a sprite coordinate onto the screen, or `None` if it falls off the edge.
    fn place(&self, coord: usize, size: usize) -> Option<usize> {
        if coord < size {
            Some(coord)
        } else if self.config.wrap_around {
            Some(coord % size)
        } else {
            None
        }
    }

    /// Execute a single instruction located at `pc`.
    /// Errors are raised before anything is modified.
    fn run(&mut self, instruction: Instruction, pc: u16) -> Result<(), MachineError> {
        match instruction {

            // Clear the screen
            Instruction::ClearScreen => {
                self.screen.clear();
            }

            // Return to the previous call site via the stack.
            Instruction::Return => {
                if self.stack_pointer == 0 {
                    return Err(MachineError::StackUnderflow { pc });
                }
                self.program_counter = self.stack[self.stack_pointer as usize];
                self.stack_pointer -= 1;
            }

            // Go to a specific memory address
            Instruction::Goto(Addr(addr)) => {
                self.program_counter = addr;
            }

            // Store the current address on the stack, then jump to the specified address
            Instruction::Call(Addr(addr)) => {
                if self.stack_pointer as usize + 1 >= STACK_SIZE {
                    return Err(MachineError::StackOverflow { pc });
                }
                self.stack_pointer += 1;
                self.stack[self.stack_pointer as usize] = self.program_counter;
                self.program_counter = addr;
            }

            // If the register equals the constant, skip the next instruction
            Instruction::IfRegEqConst(Reg(x), Const(n)) => {
                if self.registers[x as usize] == n {
                    self.program_counter = self.program_counter.wrapping_add(2);
                }
            }

            Instruction::IfRegNeqConst(Reg(x), Const(n)) => {
                if self.registers[x as usize] != n {
                    self.program_counter = self.program_counter.wrapping_add(2);
                }
            }

            Instruction::IfRegEqReg(Reg(x), Reg(y)) => {
                if self.registers[x as usize] == self.registers[y as usize] {
                    self.program_counter = self.program_counter.wrapping_add(2);
                }
            }

            Instruction::SetRegToConst(Reg(x), Const(n)) => {
                self.registers[x as usize] = n;
            }

            // No carry flag here
            Instruction::IncRegByConst(Reg(x), Const(n)) => {
                self.registers[x as usize] = self.registers[x as usize].wrapping_add(n);
            }

            Instruction::SetRegToReg(Reg(x), Reg(y)) => {
                self.registers[x as usize] = self.registers[y as usize];
            }

            Instruction::BitwiseOr(Reg(x), Reg(y)) => {
                self.registers[x as usize] |= self.registers[y as usize];
            }

            Instruction::BitwiseAnd(Reg(x), Reg(y)) => {
                self.registers[x as usize] &= self.registers[y as usize];
            }

            Instruction::BitwiseXor(Reg(x), Reg(y)) => {
                self.registers[x as usize] ^= self.registers[y as usize];
            }

            // VF is written last, so it holds the flag even when x is F.
            Instruction::IncRegByReg(Reg(x), Reg(y)) => {
                let (sum, carry) = self.registers[x as usize].overflowing_add(self.registers[y as usize]);
                self.registers[x as usize] = sum;
                self.registers[0xF] = carry as u8;
            }

            Instruction::DecRegByReg(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.registers[x as usize], self.registers[y as usize]);
                self.registers[x as usize] = vx.wrapping_sub(vy);
                self.registers[0xF] = (vx > vy) as u8;
            }

            // Only Vx is shifted, Vy is ignored
            Instruction::BitshiftRight(Reg(x)) => {
                let vx = self.registers[x as usize];
                self.registers[x as usize] = vx >> 1;
                self.registers[0xF] = vx & 1;
            }

            Instruction::SetVxVyMinusVx(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.registers[x as usize], self.registers[y as usize]);
                self.registers[x as usize] = vy.wrapping_sub(vx);
                self.registers[0xF] = (vy > vx) as u8;
            }

            Instruction::BitshiftLeft(Reg(x)) => {
                let vx = self.registers[x as usize];
                self.registers[x as usize] = vx << 1;
                self.registers[0xF] = vx >> 7;
            }

            Instruction::IfRegNeqReg(Reg(x), Reg(y)) => {
                if self.registers[x as usize] != self.registers[y as usize] {
                    self.program_counter = self.program_counter.wrapping_add(2);
                }
            }

            Instruction::SetI(Addr(addr)) => {
                self.i = addr;
            }

            Instruction::SetPcToV0PlusAddr(Addr(addr)) => {
                let target = addr + self.registers[0] as u16;
                self.program_counter = match self.config.jump_offset {
                    JumpOffset::Full => target,
                    JumpOffset::Truncated => target & 0xFF,
                };
            }

            Instruction::SetVxRand(Reg(x), Const(n)) => {
                self.registers[x as usize] = self.rng.gen::<u8>() & n;
            }

            // XOR an 8 pixel wide sprite onto the screen, VF reports collisions
            Instruction::Draw(Reg(x), Reg(y), Const(sprite_height)) => {

                // Get coordinates
                let x_coord = self.registers[x as usize] as usize;
                let y_coord = self.registers[y as usize] as usize;

                let mut any_collisions = 0;
                for row in 0..sprite_height as usize {
                    // Each row is 8 bits, starting at I
                    let sprite_row = self.read(self.i as usize + row);
                    let screen_y = match self.place(y_coord + row, SCREEN_HEIGHT) {
                        Some(screen_y) => screen_y,
                        None => continue,
                    };

                    for col in 0..8 {
                        if (sprite_row >> (7 - col)) & 1 == 0 {
                            continue;
                        }
                        if let Some(screen_x) = self.place(x_coord + col, SCREEN_WIDTH) {
                            if self.screen.toggle(screen_x, screen_y) {
                                any_collisions = 1;
                            }
                        }
                    }
                }

                // Set VF collision flag
                self.registers[0xF] = any_collisions;
            }

            Instruction::IfKeyEqVx(Reg(x)) => {
                if self.keypad.is_down(self.registers[x as usize]) {
                    self.program_counter = self.program_counter.wrapping_add(2);
                }
            }

            Instruction::IfKeyNeqVx(Reg(x)) => {
                if !self.keypad.is_down(self.registers[x as usize]) {
                    self.program_counter = self.program_counter.wrapping_add(2);
                }
            }

            Instruction::SetRegToDelayTimer(Reg(x)) => {
                self.registers[x as usize] = self.delay_timer;
            }

            // Stop stepping until a key is pressed
            Instruction::SetRegToGetKey(Reg(x)) => {
                log::debug!("Waiting for a key for V{:X}", x);
                self.keypad.wait_for_key(x);
            }

            Instruction::SetDelayTimerToReg(Reg(x)) => {
                self.delay_timer = self.registers[x as usize];
            }

            Instruction::SetSoundTimerToReg(Reg(x)) => {
                self.sound_timer = self.registers[x as usize];
            }

            Instruction::AddRegToI(Reg(x)) => {
                self.i = self.i.wrapping_add(self.registers[x as usize] as u16);
            }

            // Set i to character address. Each font element is 5 bytes wide.
            Instruction::SetIToSpriteAddrVx(Reg(x)) => {
                self.i = FONT_GLYPH_SIZE * self.registers[x as usize] as u16;
            }

            Instruction::SetIToBcdOfReg(Reg(x)) => {
                let i = self.i as usize;
                let value = self.registers[x as usize];
                self.write(i, value / 100);
                self.write(i + 1, value / 10 % 10);
                self.write(i + 2, value % 10);
            }

            // Dump register values up to Vx
            Instruction::RegDump(Reg(x)) => {
                let i = self.i as usize;
                for reg_no in 0..=x as usize {
                    self.write(i + reg_no, self.registers[reg_no]);
                }
            }

            // Load register values up to Vx
            Instruction::RegLoad(Reg(x)) => {
                let i = self.i as usize;
                for reg_no in 0..=x as usize {
                    self.registers[reg_no] = self.read(i + reg_no);
                }
            }
        };

        Ok(())
    }
}
