use log::{debug, warn};

use crate::{
    constants::{ADDRESS_FIELD_MAX, PROGRAM_NAME_LEN},
    directive::Assembler,
    error::{AsmError, Result},
    labels::{Label, Labels},
    options::{AssemblerOptions, DuplicateLabels},
    parser::Instruction,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub name: String,
    pub start: usize,
    pub length: usize,
}

/// Everything pass two needs from pass one.
#[derive(Debug, Clone)]
pub struct PassOne {
    pub program: Program,
    pub labels: Labels,
    /// The address of each instruction up to and including END.
    pub addresses: Vec<usize>,
}

struct FirstPass<'a> {
    cur_offset: usize,
    labels: Labels,
    addresses: Vec<usize>,
    options: &'a AssemblerOptions,
}

impl<'a> FirstPass<'a> {
    fn new(start: usize, options: &'a AssemblerOptions) -> Self {
        Self {
            cur_offset: start,
            labels: Labels::new(),
            addresses: Vec::new(),
            options,
        }
    }

    fn define(&mut self, instruction: &Instruction) -> Result<()> {
        let Some(label) = instruction.label.as_ref() else {
            return Ok(());
        };

        let previous = self.labels.add(
            label.clone(),
            Label {
                address: self.cur_offset,
                line: instruction.line_no,
            },
        );

        if let Some(previous) = previous {
            match self.options.duplicate_labels {
                DuplicateLabels::Warn => warn!(
                    "line {}: label {} redefined, it was first defined on line {}",
                    instruction.line_no, label, previous.line
                ),
                DuplicateLabels::Error => {
                    return Err(AsmError::DuplicateLabel {
                        line: instruction.line_no,
                        label: label.clone(),
                        first: previous.line,
                    })
                }
            }
        }

        Ok(())
    }

    fn assign(&mut self, instruction: &Instruction) -> Result<()> {
        self.addresses.push(self.cur_offset);
        self.define(instruction)?;
        self.cur_offset = self
            .cur_offset
            .checked_add(instruction.size()?)
            .filter(|&offset| offset <= ADDRESS_FIELD_MAX)
            .ok_or_else(|| instruction.too_large())?;
        Ok(())
    }
}

/// Assign an address to every instruction and build the symbol table.
///
/// The first instruction must be START, whose operand is the hexadecimal
/// load address. The pass stops at the first END; anything after it is
/// ignored.
pub fn pass_one(instructions: &[Instruction], options: &AssemblerOptions) -> Result<PassOne> {
    let (start_line, rest) = instructions.split_first().ok_or(AsmError::MissingStart)?;
    if !start_line.is(Assembler::START) {
        return Err(AsmError::MissingStart);
    }

    let start = start_line.hex_operand()?;
    if start > ADDRESS_FIELD_MAX {
        return Err(start_line.too_large());
    }

    // The header pads the name by characters, so it has to be one byte each
    let name = start_line.label.clone().unwrap_or_default();
    if !name.is_ascii() || name.len() > PROGRAM_NAME_LEN {
        return Err(AsmError::ProgramNameTooLong { name });
    }

    let mut pass = FirstPass::new(start, options);
    pass.assign(start_line)?;

    for instruction in rest {
        if instruction.is(Assembler::START) {
            return Err(AsmError::UnexpectedStart {
                line: instruction.line_no,
            });
        }

        if instruction.is(Assembler::END) {
            pass.addresses.push(pass.cur_offset);

            let program = Program {
                name,
                start,
                length: pass.cur_offset - start,
            };
            debug!(
                "pass one: {} starts at {:06X}, {:X} bytes, {} labels",
                program.name,
                program.start,
                program.length,
                pass.labels.len()
            );

            return Ok(PassOne {
                program,
                labels: pass.labels,
                addresses: pass.addresses,
            });
        }

        pass.assign(instruction)?;
    }

    Err(AsmError::MissingEnd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_program;

    fn run(program: &str) -> Result<PassOne> {
        run_with(program, &AssemblerOptions::default())
    }

    fn run_with(program: &str, options: &AssemblerOptions) -> Result<PassOne> {
        let instructions = parse_program(program, options)?;
        pass_one(&instructions, options)
    }

    const SAMPLE: &str = r#"COPY    START   1000
FIRST   LDA     ALPHA
        STA     BETA
EOF     BYTE    C'EOF'
INPUT   BYTE    X'F1'
ALPHA   WORD    5
BETA    RESW    2
BUFFER  RESB    10
        RSUB
        END     FIRST"#;

    #[test]
    fn addresses_and_labels() {
        let pass = run(SAMPLE).unwrap();

        assert_eq!(
            pass.program,
            Program {
                name: "COPY".into(),
                start: 0x1000,
                length: 0x20,
            }
        );

        let labels = pass
            .labels
            .iter()
            .map(|(name, label)| (name, label.address))
            .collect::<Vec<_>>();
        assert_eq!(
            labels,
            vec![
                ("COPY", 0x1000),
                ("FIRST", 0x1000),
                ("EOF", 0x1006),
                ("INPUT", 0x1009),
                ("ALPHA", 0x100A),
                ("BETA", 0x100D),
                ("BUFFER", 0x1013),
            ]
        );

        assert_eq!(
            pass.addresses,
            vec![0x1000, 0x1000, 0x1003, 0x1006, 0x1009, 0x100A, 0x100D, 0x1013, 0x101D, 0x1020]
        );
    }

    #[test]
    fn length_is_sum_of_sizes() {
        let options = AssemblerOptions::default();
        let instructions = parse_program(SAMPLE, &options).unwrap();
        let pass = pass_one(&instructions, &options).unwrap();

        let total = instructions
            .iter()
            .map(|i| i.size().unwrap())
            .sum::<usize>();
        assert_eq!(pass.program.length, total);
    }

    #[test]
    fn nothing_after_end() {
        let err = run("P START 0\nA WORD 1\nEND A\nB WORD 2\nC BOGUS 1").unwrap_err();
        // The bogus mnemonic is still a parse error
        assert!(matches!(err, AsmError::UnknownMnemonic { line: 5, .. }));

        let pass = run("P START 0\nA WORD 1\nEND A\nB WORD 2").unwrap();
        assert_eq!(pass.program.length, 3);
        assert!(pass.labels.get("B").is_none());
    }

    #[test]
    fn unnamed_program() {
        let pass = run("START 200\nRSUB\nEND").unwrap();
        assert_eq!(pass.program.name, "");
        assert_eq!(pass.program.start, 0x200);
        assert_eq!(pass.program.length, 3);
    }

    #[test]
    fn structure_errors() {
        assert!(matches!(run(""), Err(AsmError::MissingStart)));
        assert!(matches!(
            run("FIRST LDA ALPHA\nP START 0\nEND"),
            Err(AsmError::MissingStart)
        ));
        assert!(matches!(
            run("P START 0\nA WORD 1"),
            Err(AsmError::MissingEnd)
        ));
        assert!(matches!(
            run("P START 0\nQ START 10\nEND"),
            Err(AsmError::UnexpectedStart { line: 2 })
        ));
        assert!(matches!(
            run("PROGRAM START 0\nEND"),
            Err(AsmError::ProgramNameTooLong { .. })
        ));
        assert!(matches!(
            run("P START ZZ\nEND"),
            Err(AsmError::MalformedNumber { line: 1, .. })
        ));
        assert!(matches!(
            run("PRÜFE START 0\nEND"),
            Err(AsmError::ProgramNameTooLong { .. })
        ));
    }

    #[test]
    fn locations_fit_the_record_fields() {
        assert_eq!(
            run("P START 1000000\nA WORD 1\nEND A").unwrap_err(),
            AsmError::ProgramTooLarge { line: 1 }
        );
        assert_eq!(
            run("P START 0\nA RESB 20000000\nB WORD 1\nEND A").unwrap_err(),
            AsmError::ProgramTooLarge { line: 2 }
        );
        assert_eq!(
            run("P START 0\nA RESB 18446744073709551615\nB RESB 1\nEND A").unwrap_err(),
            AsmError::ProgramTooLarge { line: 2 }
        );
        assert_eq!(
            run("P START FFFFF0\nA RESB 15\nB WORD 1\nEND A").unwrap_err(),
            AsmError::ProgramTooLarge { line: 3 }
        );

        // Ending right on the last addressable byte still fits
        let pass = run("P START FFFFF0\nA RESB 15\nEND A").unwrap();
        assert_eq!(pass.program.length, 15);
        assert_eq!(pass.addresses.last(), Some(&0xFF_FFFF));
    }

    #[test]
    fn duplicate_labels() {
        let program = "P START 0\nA WORD 1\nA WORD 2\nEND A";

        let pass = run(program).unwrap();
        assert_eq!(pass.labels.absolute("A", 0), Ok(3));

        let strict = AssemblerOptions {
            duplicate_labels: DuplicateLabels::Error,
            ..Default::default()
        };
        assert_eq!(
            run_with(program, &strict).unwrap_err(),
            AsmError::DuplicateLabel {
                line: 3,
                label: "A".into(),
                first: 2
            }
        );
    }
}
