use strum_macros::{Display, EnumIter, EnumString};

use crate::word::Word;

/// Addresses must stay below this value; the bit above them is the index flag.
pub const ADDRESS_LIMIT: u16 = 0x8000;

/// Set in the address field of an indexed instruction.
pub const INDEX_BIT: u16 = 0x8000;

/// The SIC instruction set. Every instruction is three bytes long: the opcode
/// followed by the index flag and a 15 bit address.
#[allow(clippy::upper_case_acronyms)]
#[derive(EnumString, EnumIter, Display, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    ADD = 0x18,
    AND = 0x40,
    COMP = 0x28,
    DIV = 0x24,
    J = 0x3C,
    JEQ = 0x30,
    JGT = 0x34,
    JLT = 0x38,
    JSUB = 0x48,
    LDA = 0x00,
    LDCH = 0x50,
    LDL = 0x08,
    LDX = 0x04,
    MUL = 0x20,

    OR = 0x44,
    RD = 0xD8,
    RSUB = 0x4C,
    STA = 0x0C,
    STCH = 0x54,
    STL = 0x14,
    STSW = 0xE8,
    STX = 0x10,
    SUB = 0x1C,

    TD = 0xE0,
    TIX = 0x2C,
    WD = 0xDC,
}

impl OpCode {
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        mnemonic.parse().ok()
    }

    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Op {
    pub opcode: OpCode,
    pub indexed: bool,
    pub address: u16,
}

impl Op {
    pub const LEN: usize = 3;

    pub fn new(opcode: OpCode, address: u16, indexed: bool) -> Self {
        Self {
            opcode,
            indexed,
            address,
        }
    }

    /// The address field as it appears in the object code, index flag included.
    pub fn target(&self) -> u16 {
        let address = self.address & !INDEX_BIT;
        if self.indexed {
            address | INDEX_BIT
        } else {
            address
        }
    }

    pub fn to_word(self) -> Word {
        let [msb, lsb] = self.target().to_be_bytes();
        [self.opcode.to_byte(), msb, lsb]
    }
}

// Can't implement anything on Word
#[allow(clippy::from_over_into)]
impl Into<Word> for Op {
    fn into(self) -> Word {
        self.to_word()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn mnemonics() {
        assert_eq!(OpCode::from_mnemonic("LDA"), Some(OpCode::LDA));
        assert_eq!(OpCode::from_mnemonic("STSW"), Some(OpCode::STSW));
        assert_eq!(OpCode::from_mnemonic("lda"), None);
        assert_eq!(OpCode::from_mnemonic("BYTE"), None);
        assert_eq!(OpCode::iter().count(), 26);
        for opcode in OpCode::iter() {
            assert_eq!(OpCode::from_mnemonic(&opcode.to_string()), Some(opcode));
        }
    }

    #[test]
    fn encode() {
        let word: Word = Op::new(OpCode::LDA, 0x1003, false).into();
        assert_eq!(word, [0x00, 0x10, 0x03]);

        let word: Word = Op::new(OpCode::LDA, 0x1003, true).into();
        assert_eq!(word, [0x00, 0x90, 0x03]);

        let word: Word = Op::new(OpCode::RSUB, 0, false).into();
        assert_eq!(word, [0x4C, 0x00, 0x00]);
    }

    #[test]
    fn index_bit_matches_offset() {
        let op = Op::new(OpCode::STCH, 0x2039, true);
        assert_eq!(op.target() as u32, 0x2039 + 32768);
    }

    #[test]
    fn address_bits_above_the_index_flag_are_dropped() {
        assert_eq!(Op::new(OpCode::STCH, 0x9039, false).to_word(), [0x54, 0x10, 0x39]);
        assert_eq!(Op::new(OpCode::STCH, 0x9039, true).to_word(), [0x54, 0x90, 0x39]);
    }
}
