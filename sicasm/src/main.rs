use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{info, LevelFilter};
use sicasm::{output::assemble_file, AssemblerOptions, DuplicateLabels, SplitPolicy};

#[derive(Debug, Parser)]
#[command(version, about = "Two-pass assembler producing SIC absolute object programs")]
struct Args {
    /// Assembly source file
    source: PathBuf,

    /// Object file (default: the source file with an .obj extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write debug symbols to <OUTPUT>.sdb
    #[arg(short, long)]
    debug_info: bool,

    /// Treat a label defined twice as an error instead of a warning
    #[arg(long)]
    strict: bool,

    /// When to close a text record and start the next one
    #[arg(long, value_enum, default_value_t = SplitPolicy::MachineWord)]
    split: SplitPolicy,

    /// Lines starting with this character are comments
    #[arg(long, default_value_t = '.')]
    comment: char,

    /// One of `off`, `error`, `warn`, `info`, `debug` or `trace`; RUST_LOG overrides it
    #[arg(short, long, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,
}

impl Args {
    fn options(&self) -> AssemblerOptions {
        AssemblerOptions {
            comment: self.comment,
            duplicate_labels: if self.strict {
                DuplicateLabels::Error
            } else {
                DuplicateLabels::Warn
            },
            split: self.split,
        }
    }

    fn output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.source.with_extension("obj"))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.log_level)
        .parse_default_env()
        .init();

    let output = args.output();
    assemble_file(&args.source, &output, args.debug_info, &args.options())?;
    info!("wrote {}", output.display());

    Ok(())
}
