use libsic::word::{i64_to_word, Word};

use crate::{
    constants::{lit_regex, INDEX_SUFFIX},
    directive::{Assembler, Directive},
    error::{AsmError, Result},
    options::AssemblerOptions,
};

/// One source line after tokenizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub label: Option<String>,
    pub directive: Directive,
    /// The operand with any `,X` suffix already removed.
    pub operand: Option<String>,
    pub indexed: bool,
    pub line_no: usize,
    pub text: String,
}

impl Instruction {
    pub fn is(&self, asm: Assembler) -> bool {
        self.directive.is(asm)
    }

    pub fn get_operand(&self) -> Result<&str> {
        self.operand
            .as_deref()
            .ok_or_else(|| AsmError::MissingOperand {
                line: self.line_no,
                mnemonic: self.directive.to_string(),
            })
    }

    /// An unsigned hexadecimal operand. Too many digits to fit in a `usize`
    /// means the program can't fit in memory either.
    pub fn hex_operand(&self) -> Result<usize> {
        let operand = self.get_operand()?;
        if !is_digits(operand, |c| c.is_ascii_hexdigit()) {
            return Err(self.malformed(operand, "hexadecimal"));
        }
        usize::from_str_radix(operand, 16).map_err(|_| self.too_large())
    }

    pub fn count_operand(&self) -> Result<usize> {
        let operand = self.get_operand()?;
        if !is_digits(operand, |c| c.is_ascii_digit()) {
            return Err(self.malformed(operand, "decimal"));
        }
        operand.parse::<usize>().map_err(|_| self.too_large())
    }

    /// The value of a WORD directive, as it will be stored.
    pub fn word(&self) -> Result<Word> {
        let operand = self.get_operand()?;
        let value = operand
            .parse::<i64>()
            .map_err(|_| self.malformed(operand, "decimal"))?;

        i64_to_word(value).map_err(|e| AsmError::ValueOutOfRange {
            line: self.line_no,
            value: e.0,
        })
    }

    /// The bytes of a BYTE directive's `C'..'` or `X'..'` constant.
    pub fn constant(&self) -> Result<Vec<u8>> {
        let operand = self.get_operand()?;
        parse_constant(operand).ok_or_else(|| AsmError::InvalidConstant {
            line: self.line_no,
            constant: operand.to_owned(),
        })
    }

    pub fn size(&self) -> Result<usize> {
        Ok(match self.directive {
            Directive::Op(_) => libsic::Op::LEN,
            Directive::Assembler(asm) => match asm {
                Assembler::START | Assembler::END => 0,
                Assembler::BYTE => self.constant()?.len(),
                Assembler::WORD => {
                    self.word()?;
                    3
                }
                Assembler::RESB => self.count_operand()?,
                Assembler::RESW => self
                    .count_operand()?
                    .checked_mul(3)
                    .ok_or_else(|| self.too_large())?,
            },
        })
    }

    pub fn too_large(&self) -> AsmError {
        AsmError::ProgramTooLarge { line: self.line_no }
    }

    fn malformed(&self, text: &str, expected: &'static str) -> AsmError {
        AsmError::MalformedNumber {
            line: self.line_no,
            text: text.to_owned(),
            expected,
        }
    }
}

// No sign, no prefix, at least one digit
fn is_digits(text: &str, digit: impl Fn(char) -> bool) -> bool {
    !text.is_empty() && text.chars().all(digit)
}

/// `X'F105'` is one byte per pair of hex digits, `C'EOF'` one byte per
/// character. Anything else, including an odd number of hex digits or a
/// character outside ASCII, is rejected.
pub fn parse_constant(lit: &str) -> Option<Vec<u8>> {
    let captures = lit_regex().captures(lit)?;

    if let Some(bytes) = captures.name("bytes") {
        let digits = bytes.as_str().as_bytes();
        if digits.len() % 2 != 0 {
            return None;
        }
        digits
            .chunks(2)
            .map(|pair| {
                std::str::from_utf8(pair)
                    .ok()
                    .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            })
            .collect()
    } else if let Some(chars) = captures.name("chars") {
        let chars = chars.as_str();
        chars.is_ascii().then(|| chars.bytes().collect())
    } else {
        None
    }
}

fn directive(mnemonic: &str, line_no: usize) -> Result<Directive> {
    Directive::from_mnemonic(mnemonic).ok_or_else(|| AsmError::UnknownMnemonic {
        line: line_no,
        mnemonic: mnemonic.to_owned(),
    })
}

/// Build an instruction from the whitespace separated fields of a line.
///
/// One field is a bare mnemonic. With two fields the first is the mnemonic
/// if it is one, otherwise it's a label. Three fields are always label,
/// mnemonic and operand.
pub fn parse_tokens(tokens: &[&str], line_no: usize, text: &str) -> Result<Instruction> {
    let (label, mnemonic, operand) = match *tokens {
        [mnemonic] => (None, mnemonic, None),
        [first, second] if Directive::from_mnemonic(first).is_some() => {
            (None, first, Some(second))
        }
        [label, mnemonic] => (Some(label), mnemonic, None),
        [label, mnemonic, operand] => (Some(label), mnemonic, Some(operand)),
        _ => {
            return Err(AsmError::MalformedLine {
                line: line_no,
                found: tokens.len(),
            })
        }
    };

    let directive = directive(mnemonic, line_no)?;

    let (operand, indexed) = match operand {
        Some(operand) => match operand.strip_suffix(INDEX_SUFFIX) {
            Some(stripped) => (Some(stripped.to_owned()), true),
            None => (Some(operand.to_owned()), false),
        },
        None => (None, false),
    };

    Ok(Instruction {
        label: label.map(str::to_owned),
        directive,
        operand,
        indexed,
        line_no,
        text: text.to_owned(),
    })
}

pub fn parse_line(line: &str, line_no: usize) -> Result<Instruction> {
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    parse_tokens(&tokens, line_no, line.trim_end())
}

/// Lines that reach the parser, numbered from 1. Comment lines (the sentinel
/// in the first column) and blank lines are dropped.
pub fn significant_lines(program: &str, comment: char) -> impl Iterator<Item = (usize, &str)> {
    program
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(move |(_, line)| !line.starts_with(comment) && !line.trim().is_empty())
}

pub fn parse_program(program: &str, options: &AssemblerOptions) -> Result<Vec<Instruction>> {
    significant_lines(program, options.comment)
        .map(|(line_no, line)| parse_line(line, line_no))
        .collect()
}
