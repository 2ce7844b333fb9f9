use libsic::{Op, ADDRESS_LIMIT};
use log::{debug, trace};

use crate::{
    constants::TEXT_RECORD_LIMIT,
    directive::{Assembler, Directive},
    error::{AsmError, Result},
    options::{AssemblerOptions, SplitPolicy},
    pass_one::PassOne,
    parser::Instruction,
    record::{Data, Record, Text},
};

struct PassTwo<'a> {
    cur_text: Option<Text>,
    cur_offset: usize,
    records: Vec<Record>,
    split: SplitPolicy,
    pass_one: &'a PassOne,
}

impl<'a> PassTwo<'a> {
    fn new(pass_one: &'a PassOne, options: &AssemblerOptions) -> Self {
        let program = &pass_one.program;
        let records = vec![Record::Header {
            name: program.name.clone(),
            start: program.start,
            length: program.length,
        }];

        Self {
            cur_text: None,
            cur_offset: program.start,
            records,
            split: options.split,
            pass_one,
        }
    }

    fn assemble_lines(mut self, instructions: &[Instruction]) -> Result<Vec<Record>> {
        for instruction in instructions {
            self.assemble_line(instruction)?;
            if instruction.is(Assembler::END) {
                break;
            }
        }

        self.records.push(Record::End {
            first_instruction: self.pass_one.program.start,
        });

        debug!(
            "pass two: {} text records",
            self.records.len().saturating_sub(2)
        );

        Ok(self.records)
    }

    fn flush(&mut self, text: Text) {
        if !text.is_empty() {
            trace!("text record at {:06X}, {} bytes", text.address, text.len());
            self.records.push(Record::Text(text));
        }
    }

    fn flush_current(&mut self) {
        if let Some(text) = self.cur_text.take() {
            self.flush(text);
        }
    }

    fn add_instruction(&mut self, mut instruction: Data) {
        if instruction.is_empty() {
            return;
        }

        let mut offset = self.cur_offset;
        let mut text = self.cur_text.take().unwrap_or_else(|| Text::new(offset));

        match self.split {
            SplitPolicy::MachineWord => {
                // The room check always assumes a three byte instruction comes next
                if offset + Op::LEN - text.address > TEXT_RECORD_LIMIT {
                    self.flush(text);
                    text = Text::new(offset);
                }
            }
            SplitPolicy::Exact => {
                if let Data::Byte(mut bytes) = instruction {
                    while TEXT_RECORD_LIMIT - text.len() < bytes.len() {
                        let space_remaining = TEXT_RECORD_LIMIT - text.len();
                        let head: Vec<u8> = bytes.drain(..space_remaining).collect();
                        offset += head.len();
                        if !head.is_empty() {
                            text.instructions.push(Data::Byte(head));
                        }
                        self.flush(text);
                        text = Text::new(offset);
                    }

                    instruction = Data::Byte(bytes);
                } else if text.len() + instruction.len() > TEXT_RECORD_LIMIT {
                    self.flush(text);
                    text = Text::new(offset);
                }
            }
        }

        text.instructions.push(instruction);
        self.cur_text = Some(text);
    }

    fn resolve(&self, instruction: &Instruction, symbol: &str) -> Result<u16> {
        let address = self
            .pass_one
            .labels
            .absolute(symbol, instruction.line_no)?;

        if address >= ADDRESS_LIMIT as usize {
            return Err(AsmError::AddressOutOfRange {
                line: instruction.line_no,
                address,
            });
        }

        Ok(address as u16)
    }

    fn assemble_line(&mut self, instruction: &Instruction) -> Result<()> {
        match instruction.directive {
            Directive::Assembler(asm) => match asm {
                Assembler::START => {}
                Assembler::BYTE => {
                    let bytes = instruction.constant()?;
                    self.add_instruction(Data::Byte(bytes));
                }
                Assembler::WORD => {
                    let word = instruction.word()?;
                    self.add_instruction(Data::Word(word));
                }
                // A record never spans a gap; the next one starts after the reservation
                Assembler::RESW | Assembler::RESB | Assembler::END => self.flush_current(),
            },
            Directive::Op(opcode) => {
                let op = match instruction.operand.as_deref() {
                    Some(symbol) => Op::new(
                        opcode,
                        self.resolve(instruction, symbol)?,
                        instruction.indexed,
                    ),
                    None => Op::new(opcode, 0, false),
                };
                self.add_instruction(Data::Instruction(op));
            }
        };

        self.cur_offset += instruction.size()?;

        Ok(())
    }
}

/// Generate the object records for a program that made it through pass one:
/// a header, the text records in address order and an end record.
pub fn pass_two(
    instructions: &[Instruction],
    pass_one: &PassOne,
    options: &AssemblerOptions,
) -> Result<Vec<Record>> {
    let pass = PassTwo::new(pass_one, options);
    pass.assemble_lines(instructions)
}
