use once_cell::sync::OnceCell;
use regex::Regex;

/// Most bytes a single text record may carry.
pub const TEXT_RECORD_LIMIT: usize = 30;
pub const PROGRAM_NAME_LEN: usize = 6;
/// Largest value the six hex digit address and length fields can hold.
pub const ADDRESS_FIELD_MAX: usize = 0xFF_FFFF;
pub const INDEX_SUFFIX: &str = ",X";

pub static LIT_REGEX: OnceCell<Regex> = OnceCell::new();
static LIT_REGEX_PATTERN: &str = r#"^(?:X'(?P<bytes>[0-9A-Fa-f]*)'|C'(?P<chars>.*)')$"#;

pub fn lit_regex() -> &'static Regex {
    LIT_REGEX.get_or_init(|| Regex::new(LIT_REGEX_PATTERN).expect("Invalid literal regex"))
}
