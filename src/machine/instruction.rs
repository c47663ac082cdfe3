use crate::machine::opcode::Opcode;

/// A wrapper for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - NN: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
/// - PC: Program counter
/// - I: 16 bit register for memory address
/// - VN: One of the 16 available variables (register identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen, // 00E0
    Return, // 00EE
    Goto(Addr), // 1NNN
    Call(Addr), // 2NNN
    IfRegEqConst(Reg, Const), // 3XNN
    IfRegNeqConst(Reg, Const), // 4XNN
    IfRegEqReg(Reg, Reg), // 5XY0
    SetRegToConst(Reg, Const), // 6XNN
    IncRegByConst(Reg, Const), // 7XNN
    SetRegToReg(Reg, Reg), // 8XY0
    BitwiseOr(Reg, Reg), // 8XY1
    BitwiseAnd(Reg, Reg), // 8XY2
    BitwiseXor(Reg, Reg), // 8XY3
    IncRegByReg(Reg, Reg), // 8XY4
    DecRegByReg(Reg, Reg), // 8XY5
    BitshiftRight(Reg), // 8XY6
    SetVxVyMinusVx(Reg, Reg), // 8XY7
    BitshiftLeft(Reg), // 8XYE
    IfRegNeqReg(Reg, Reg), // 9XY0
    SetI(Addr), // ANNN
    SetPcToV0PlusAddr(Addr), // BNNN
    SetVxRand(Reg, Const), // CXNN
    Draw(Reg, Reg, Const), // DXYN
    IfKeyEqVx(Reg), // EX9E
    IfKeyNeqVx(Reg), // EXA1
    SetRegToDelayTimer(Reg), // FX07
    SetRegToGetKey(Reg), // FX0A
    SetDelayTimerToReg(Reg), // FX15
    SetSoundTimerToReg(Reg), // FX18
    AddRegToI(Reg), // FX1E
    SetIToSpriteAddrVx(Reg), // FX29
    SetIToBcdOfReg(Reg), // FX33
    RegDump(Reg), // FX55
    RegLoad(Reg) // FX65
}

impl Instruction {

    pub fn from_u16(value: u16) -> Option<Instruction> {
        Instruction::decode(Opcode(value))
    }

    pub fn from_two_u8(left: u8, right: u8) -> Option<Instruction> {
        Instruction::decode(Opcode::from_bytes(left, right))
    }

    /// Decode an opcode, or `None` if it is not part of the instruction set.
    ///
    /// The top nibble selects the family. Families 0x0, 0x8, 0xE and 0xF
    /// are further told apart by their low byte or low nibble.
    pub fn decode(opcode: Opcode) -> Option<Instruction> {
        let x = Reg(opcode.x());
        let y = Reg(opcode.y());
        let addr = Addr(opcode.addr());
        let byte = Const(opcode.byte());

        let instruction = match opcode.high_nibble() {
            0x0 => match opcode.0 {
                0x00E0 => Instruction::ClearScreen,
                0x00EE => Instruction::Return,
                _ => return None,
            },
            0x1 => Instruction::Goto(addr),
            0x2 => Instruction::Call(addr),
            0x3 => Instruction::IfRegEqConst(x, byte),
            0x4 => Instruction::IfRegNeqConst(x, byte),
            0x5 if opcode.nibble() == 0 => Instruction::IfRegEqReg(x, y),
            0x6 => Instruction::SetRegToConst(x, byte),
            0x7 => Instruction::IncRegByConst(x, byte),
            0x8 => match opcode.nibble() {
                0x0 => Instruction::SetRegToReg(x, y),
                0x1 => Instruction::BitwiseOr(x, y),
                0x2 => Instruction::BitwiseAnd(x, y),
                0x3 => Instruction::BitwiseXor(x, y),
                0x4 => Instruction::IncRegByReg(x, y),
                0x5 => Instruction::DecRegByReg(x, y),
                0x6 => Instruction::BitshiftRight(x),
                0x7 => Instruction::SetVxVyMinusVx(x, y),
                0xE => Instruction::BitshiftLeft(x),
                _ => return None,
            },
            0x9 if opcode.nibble() == 0 => Instruction::IfRegNeqReg(x, y),
            0xA => Instruction::SetI(addr),
            0xB => Instruction::SetPcToV0PlusAddr(addr),
            0xC => Instruction::SetVxRand(x, byte),
            0xD => Instruction::Draw(x, y, Const(opcode.nibble())),
            0xE => match opcode.byte() {
                0x9E => Instruction::IfKeyEqVx(x),
                0xA1 => Instruction::IfKeyNeqVx(x),
                _ => return None,
            },
            0xF => match opcode.byte() {
                0x07 => Instruction::SetRegToDelayTimer(x),
                0x0A => Instruction::SetRegToGetKey(x),
                0x15 => Instruction::SetDelayTimerToReg(x),
                0x18 => Instruction::SetSoundTimerToReg(x),
                0x1E => Instruction::AddRegToI(x),
                0x29 => Instruction::SetIToSpriteAddrVx(x),
                0x33 => Instruction::SetIToBcdOfReg(x),
                0x55 => Instruction::RegDump(x),
                0x65 => Instruction::RegLoad(x),
                _ => return None,
            },
            _ => return None,
        };

        Some(instruction)
    }
}
