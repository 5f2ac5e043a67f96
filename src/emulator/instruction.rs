use crate::util::bit_splitter::BitSplitter;

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
/// - KK: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
/// - PC: Program counter
/// - I: 16 bit register for memory address
/// - VN: One of the 16 available variables (register identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Nop, // 0000
    ClearScreen, // 00E0
    Return, // 00EE
    Goto(Addr), // 1NNN
    Call(Addr), // 2NNN
    IfRegEqConst(Reg, Const), // 3XKK
    IfRegNeqConst(Reg, Const), // 4XKK
    IfRegEqReg(Reg, Reg), // 5XY0
    SetRegToConst(Reg, Const), // 6XKK
    IncRegByConst(Reg, Const), // 7XKK
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
    SetVxRand(Reg, Const), // CXKK
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

    /// Decode an instruction word, or `None` if it is not part of the instruction set.
    pub fn from_u16(value: u16) -> Option<Instruction> {
        Self::decode(BitSplitter::from_u16(value))
    }

    pub fn from_two_u8(left: u8, right: u8) -> Option<Instruction> {
        Self::decode(BitSplitter::new(left, right))
    }

    fn decode(opcode: BitSplitter) -> Option<Instruction> {
        let x = Reg(opcode.x());
        let y = Reg(opcode.y());
        let kk = Const(opcode.kk());
        let nnn = Addr(opcode.nnn());

        let instruction = match opcode.as_four_u8() {
            (0, 0, 0, 0) => Instruction::Nop,
            (0, 0, 0xE, 0) => Instruction::ClearScreen,
            (0, 0, 0xE, 0xE) => Instruction::Return,
            (1, _, _, _) => Instruction::Goto(nnn),
            (2, _, _, _) => Instruction::Call(nnn),
            (3, _, _, _) => Instruction::IfRegEqConst(x, kk),
            (4, _, _, _) => Instruction::IfRegNeqConst(x, kk),
            (5, _, _, 0) => Instruction::IfRegEqReg(x, y),
            (6, _, _, _) => Instruction::SetRegToConst(x, kk),
            (7, _, _, _) => Instruction::IncRegByConst(x, kk),
            (8, _, _, 0) => Instruction::SetRegToReg(x, y),
            (8, _, _, 1) => Instruction::BitwiseOr(x, y),
            (8, _, _, 2) => Instruction::BitwiseAnd(x, y),
            (8, _, _, 3) => Instruction::BitwiseXor(x, y),
            (8, _, _, 4) => Instruction::IncRegByReg(x, y),
            (8, _, _, 5) => Instruction::DecRegByReg(x, y),
            (8, _, _, 6) => Instruction::BitshiftRight(x),
            (8, _, _, 7) => Instruction::SetVxVyMinusVx(x, y),
            (8, _, _, 0xE) => Instruction::BitshiftLeft(x),
            (9, _, _, 0) => Instruction::IfRegNeqReg(x, y),
            (0xA, _, _, _) => Instruction::SetI(nnn),
            (0xB, _, _, _) => Instruction::SetPcToV0PlusAddr(nnn),
            (0xC, _, _, _) => Instruction::SetVxRand(x, kk),
            (0xD, _, _, n) => Instruction::Draw(x, y, Const(n)),
            (0xE, _, 9, 0xE) => Instruction::IfKeyEqVx(x),
            (0xE, _, 0xA, 1) => Instruction::IfKeyNeqVx(x),
            (0xF, _, 0, 7) => Instruction::SetRegToDelayTimer(x),
            (0xF, _, 0, 0xA) => Instruction::SetRegToGetKey(x),
            (0xF, _, 1, 5) => Instruction::SetDelayTimerToReg(x),
            (0xF, _, 1, 8) => Instruction::SetSoundTimerToReg(x),
            (0xF, _, 1, 0xE) => Instruction::AddRegToI(x),
            (0xF, _, 2, 9) => Instruction::SetIToSpriteAddrVx(x),
            (0xF, _, 3, 3) => Instruction::SetIToBcdOfReg(x),
            (0xF, _, 5, 5) => Instruction::RegDump(x),
            (0xF, _, 6, 5) => Instruction::RegLoad(x),
            _ => return None,
        };

        Some(instruction)
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use test_case::test_case;

    #[test_case(0x0000 => Some(Instruction::Nop) ; "nop")]
    #[test_case(0x00E0 => Some(Instruction::ClearScreen) ; "clear screen")]
    #[test_case(0x00EE => Some(Instruction::Return) ; "return")]
    #[test_case(0x1025 => Some(Instruction::Goto(Addr(0x25))) ; "goto")]
    #[test_case(0x2037 => Some(Instruction::Call(Addr(0x37))) ; "call")]
    #[test_case(0x3A08 => Some(Instruction::IfRegEqConst(Reg(0xA), Const(8))) ; "skip if eq const")]
    #[test_case(0x4A08 => Some(Instruction::IfRegNeqConst(Reg(0xA), Const(8))) ; "skip if neq const")]
    #[test_case(0x5AB0 => Some(Instruction::IfRegEqReg(Reg(0xA), Reg(0xB))) ; "skip if eq reg")]
    #[test_case(0x6B23 => Some(Instruction::SetRegToConst(Reg(0xB), Const(0x23))) ; "set const")]
    #[test_case(0x7CA1 => Some(Instruction::IncRegByConst(Reg(0xC), Const(0xA1))) ; "add const")]
    #[test_case(0x8AB0 => Some(Instruction::SetRegToReg(Reg(0xA), Reg(0xB))) ; "set reg")]
    #[test_case(0x8DE1 => Some(Instruction::BitwiseOr(Reg(0xD), Reg(0xE))) ; "or")]
    #[test_case(0x8DE2 => Some(Instruction::BitwiseAnd(Reg(0xD), Reg(0xE))) ; "and")]
    #[test_case(0x8DE3 => Some(Instruction::BitwiseXor(Reg(0xD), Reg(0xE))) ; "xor")]
    #[test_case(0x8AB4 => Some(Instruction::IncRegByReg(Reg(0xA), Reg(0xB))) ; "add reg")]
    #[test_case(0x8AB5 => Some(Instruction::DecRegByReg(Reg(0xA), Reg(0xB))) ; "sub reg")]
    #[test_case(0x8AB6 => Some(Instruction::BitshiftRight(Reg(0xA))) ; "shift right")]
    #[test_case(0x8AB7 => Some(Instruction::SetVxVyMinusVx(Reg(0xA), Reg(0xB))) ; "reverse sub")]
    #[test_case(0x8A0E => Some(Instruction::BitshiftLeft(Reg(0xA))) ; "shift left")]
    #[test_case(0x9AB0 => Some(Instruction::IfRegNeqReg(Reg(0xA), Reg(0xB))) ; "skip if neq reg")]
    #[test_case(0xA025 => Some(Instruction::SetI(Addr(0x25))) ; "set i")]
    #[test_case(0xB025 => Some(Instruction::SetPcToV0PlusAddr(Addr(0x25))) ; "jump plus v0")]
    #[test_case(0xCA23 => Some(Instruction::SetVxRand(Reg(0xA), Const(0x23))) ; "random")]
    #[test_case(0xDABC => Some(Instruction::Draw(Reg(0xA), Reg(0xB), Const(0xC))) ; "draw")]
    #[test_case(0xEA9E => Some(Instruction::IfKeyEqVx(Reg(0xA))) ; "skip if key")]
    #[test_case(0xEAA1 => Some(Instruction::IfKeyNeqVx(Reg(0xA))) ; "skip if not key")]
    #[test_case(0xFA07 => Some(Instruction::SetRegToDelayTimer(Reg(0xA))) ; "read delay timer")]
    #[test_case(0xFA0A => Some(Instruction::SetRegToGetKey(Reg(0xA))) ; "wait for key")]
    #[test_case(0xFA15 => Some(Instruction::SetDelayTimerToReg(Reg(0xA))) ; "set delay timer")]
    #[test_case(0xFA18 => Some(Instruction::SetSoundTimerToReg(Reg(0xA))) ; "set sound timer")]
    #[test_case(0xFA1E => Some(Instruction::AddRegToI(Reg(0xA))) ; "add to i")]
    #[test_case(0xFA29 => Some(Instruction::SetIToSpriteAddrVx(Reg(0xA))) ; "font glyph")]
    #[test_case(0xFA33 => Some(Instruction::SetIToBcdOfReg(Reg(0xA))) ; "bcd")]
    #[test_case(0xFA55 => Some(Instruction::RegDump(Reg(0xA))) ; "register dump")]
    #[test_case(0xFA65 => Some(Instruction::RegLoad(Reg(0xA))) ; "register load")]
    fn opcodes_are_parsed_correctly(word: u16) -> Option<Instruction> {
        Instruction::from_u16(word)
    }

    #[test_case(0x0123 ; "machine code routine")]
    #[test_case(0x00E1 ; "near clear screen")]
    #[test_case(0x5AB1 ; "skip with low nibble")]
    #[test_case(0x8AB8 ; "unknown alu op")]
    #[test_case(0x9AB1 ; "skip neq with low nibble")]
    #[test_case(0xEA9F ; "unknown key op")]
    #[test_case(0xFA99 ; "unknown misc op")]
    fn unknown_opcodes_are_rejected(word: u16) {
        assert_eq!(Instruction::from_u16(word), None);
    }

    #[test]
    fn from_two_u8_equals_from_u16() {
        assert_eq!(Instruction::from_two_u8(0x12, 0x34), Instruction::from_u16(0x1234));
        assert_eq!(Instruction::from_two_u8(0x2F, 0x2F), Instruction::from_u16(0x2F2F));
        assert_eq!(Instruction::from_two_u8(0xF3, 0x65), Instruction::from_u16(0xF365));
    }
}
