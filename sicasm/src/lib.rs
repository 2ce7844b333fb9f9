use sicdbg::Sdb;

pub use error::{AsmError, Result};
pub use options::{AssemblerOptions, DuplicateLabels, SplitPolicy};
pub use parser::{parse_program, Instruction};
pub use pass_one::{pass_one, PassOne, Program};
pub use pass_two::pass_two;
pub use record::{Data, Record, Text};

mod constants;
pub mod directive;
mod error;
pub mod labels;
mod options;
pub mod output;
pub mod parser;
mod pass_one;
mod pass_two;
pub mod record;

/// Assemble a SIC program from text with the default options.
///
/// # Errors
///
/// If there's an error in the assembly code
pub fn assemble_program(program_text: &str) -> Result<String> {
    assemble_with_options(program_text, &AssemblerOptions::default())
}

pub fn assemble_with_options(program_text: &str, options: &AssemblerOptions) -> Result<String> {
    Ok(assemble_with_debug(program_text, options)?.0)
}

/// Assemble a program and also collect its debug symbols.
pub fn assemble_with_debug(
    program_text: &str,
    options: &AssemblerOptions,
) -> Result<(String, Sdb)> {
    let instructions = parse_program(program_text, options)?;
    let pass_one = pass_one(&instructions, options)?;
    let records = pass_two(&instructions, &pass_one, options)?;

    let assembled = records
        .iter()
        .map(|record| format!("{}\n", record))
        .collect::<String>();

    Ok((assembled, debug_info(&instructions, &pass_one)))
}

fn debug_info(instructions: &[Instruction], pass_one: &PassOne) -> Sdb {
    let program = &pass_one.program;
    let mut debug = Sdb::new(&program.name, program.start as u32, program.length as u32);

    for (instruction, address) in instructions.iter().zip(&pass_one.addresses) {
        debug.add_line(*address as u32, instruction.text.clone(), instruction.line_no);
    }

    for (name, label) in pass_one.labels.iter() {
        debug.add_label(name.to_owned(), label.address as u32);
    }

    debug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_symbols() {
        let program = "COPY START 1000\n. comment\nFIRST LDA ALPHA\nALPHA WORD 5\nEND FIRST\n";
        let (assembled, debug) =
            assemble_with_debug(program, &AssemblerOptions::default()).unwrap();

        assert_eq!(assembled, "HCOPY  001000000006\nT00100006001003000005\nE001000\n");
        assert_eq!(debug.name, "COPY");
        assert_eq!(debug.start, 0x1000);
        assert_eq!(debug.length, 6);
        assert_eq!(debug.lines.len(), 4);
        assert_eq!(debug.line_at(0x1000).map(|l| l.line_number), Some(3));
        assert_eq!(debug.line_at(0x1003).map(|l| l.text.as_str()), Some("ALPHA WORD 5"));
        assert_eq!(debug.labels.get("ALPHA"), Some(&0x1003));
        assert_eq!(debug.labels.get("COPY"), Some(&0x1000));
    }
}
