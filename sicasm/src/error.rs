use thiserror::Error;

/// Everything that can stop an assembly run. Line numbers are 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("line {line}: unknown mnemonic {mnemonic}")]
    UnknownMnemonic { line: usize, mnemonic: String },
    #[error("line {line}: expected at most 3 fields, found {found}")]
    MalformedLine { line: usize, found: usize },
    #[error("line {line}: {mnemonic} requires an operand")]
    MissingOperand { line: usize, mnemonic: String },
    #[error("line {line}: {text} is not a valid {expected} number")]
    MalformedNumber {
        line: usize,
        text: String,
        expected: &'static str,
    },
    #[error("line {line}: invalid constant {constant}")]
    InvalidConstant { line: usize, constant: String },
    #[error("line {line}: undefined symbol {symbol}")]
    UndefinedSymbol { line: usize, symbol: String },
    #[error("line {line}: label {label} was already defined on line {first}")]
    DuplicateLabel {
        line: usize,
        label: String,
        first: usize,
    },
    #[error("line {line}: address {address:X} is outside the 15 bit address space")]
    AddressOutOfRange { line: usize, address: usize },
    #[error("line {line}: {value} doesn't fit in a word")]
    ValueOutOfRange { line: usize, value: i64 },
    #[error("line {line}: location counter passes FFFFFF, the largest address a record can hold")]
    ProgramTooLarge { line: usize },
    #[error("program name {name} must be at most 6 ASCII characters")]
    ProgramNameTooLong { name: String },
    #[error("expected a START directive before any other instruction")]
    MissingStart,
    #[error("line {line}: START may only appear once, as the first instruction")]
    UnexpectedStart { line: usize },
    #[error("program has no END directive")]
    MissingEnd,
}

pub type Result<T, E = AsmError> = std::result::Result<T, E>;
