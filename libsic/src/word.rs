use thiserror::Error;

pub type Word = [u8; 3];

pub const WORD_MAX: i32 = 0x00FF_FFFF;
pub const WORD_MIN: i32 = -0x0080_0000;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("{0} doesn't fit in a 24 bit word")]
pub struct WordRangeError(pub i64);

pub fn u32_to_word(i: u32) -> Word {
    let [_, a, b, c] = i.to_be_bytes();
    [a, b, c]
}

/// Negative values are stored in two's complement. Values that need more
/// than 24 bits are rejected rather than truncated.
pub fn i64_to_word(i: i64) -> Result<Word, WordRangeError> {
    if i < WORD_MIN as i64 || i > WORD_MAX as i64 {
        return Err(WordRangeError(i));
    }

    Ok(u32_to_word(i as u32))
}
