pub use op::{Op, OpCode, ADDRESS_LIMIT, INDEX_BIT};
pub use word::Word;

pub mod op;
pub mod word;
