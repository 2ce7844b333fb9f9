/// What to do when a label is defined more than once. Either way the
/// last definition is the one the symbol table keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateLabels {
    #[default]
    Warn,
    Error,
}

/// How pass two decides that the current text record is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SplitPolicy {
    /// Flush when `LOCCTR + 3 - record start > 30`, whatever the size of the
    /// next item. A long BYTE constant can push a record past 30 bytes.
    #[default]
    MachineWord,
    /// Flush based on the real size of the next item and split BYTE data
    /// across records, so no record exceeds 30 bytes.
    Exact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblerOptions {
    /// Lines whose first character is this are dropped before parsing.
    pub comment: char,
    pub duplicate_labels: DuplicateLabels,
    pub split: SplitPolicy,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            comment: '.',
            duplicate_labels: DuplicateLabels::default(),
            split: SplitPolicy::default(),
        }
    }
}
