use std::fmt::Display;

use libsic::{Op, Word};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Data {
    Instruction(Op),
    Byte(Vec<u8>),
    Word(Word),
}

impl Data {
    pub fn len(&self) -> usize {
        match self {
            Data::Instruction(_) => Op::LEN,
            Data::Byte(b) => b.len(),
            Data::Word(_) => 3,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn write_hex(f: &mut std::fmt::Formatter<'_>, bytes: &[u8]) -> std::fmt::Result {
    for byte in bytes {
        write!(f, "{:0>2X}", byte)?;
    }
    Ok(())
}

impl Display for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Data::Instruction(op) => {
                let word: Word = (*op).into();
                write_hex(f, &word)
            }
            Data::Byte(bytes) => write_hex(f, bytes),
            Data::Word(word) => write_hex(f, word),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub address: usize,
    pub instructions: Vec<Data>,
}

impl Text {
    pub fn new(address: usize) -> Self {
        Self {
            address,
            instructions: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.instructions.iter().map(Data::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Header {
        name: String,
        start: usize,
        length: usize,
    },
    Text(Text),
    End {
        first_instruction: usize,
    },
}

impl Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Record::Header {
                name,
                start,
                length,
            } => {
                write!(f, "H{:<6}{:0>6X}{:0>6X}", name, start, length)
            }
            Record::Text(text) => {
                write!(f, "T{:0>6X}{:0>2X}", text.address, text.len())?;
                for instruction in &text.instructions {
                    write!(f, "{}", instruction)?;
                }

                Ok(())
            }
            Record::End { first_instruction } => write!(f, "E{:0>6X}", first_instruction),
        }
    }
}
