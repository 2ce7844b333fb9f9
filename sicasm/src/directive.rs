use std::{fmt, str::FromStr};

use libsic::OpCode;
use strum_macros::{Display, EnumString};

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum Assembler {
    START,
    BYTE,
    WORD,
    RESW,
    RESB,
    END,
}

/// A mnemonic resolved against the instruction table: either a machine
/// instruction or an assembler directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Assembler(Assembler),
    Op(OpCode),
}

impl Directive {
    pub fn from_mnemonic(s: &str) -> Option<Self> {
        if let Ok(asm) = Assembler::from_str(s) {
            Some(Self::Assembler(asm))
        } else {
            OpCode::from_mnemonic(s).map(Self::Op)
        }
    }

    pub fn is(&self, asm: Assembler) -> bool {
        *self == Self::Assembler(asm)
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Assembler(asm) => write!(f, "{}", asm),
            Directive::Op(op) => write!(f, "{}", op),
        }
    }
}
