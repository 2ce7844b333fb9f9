use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use log::warn;

use crate::{assemble_with_debug, AssemblerOptions};

pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

fn remove(path: &Path) {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => {
            warn!("couldn't remove {}: {}", path.display(), e)
        }
        _ => {}
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Files are first written next to their destination and only renamed into
/// place once every one of them has been written. On failure the staged
/// files, and any destination this call already renamed into place, are
/// removed again.
pub fn write_all(outputs: &[(PathBuf, String)]) -> Result<()> {
    let mut staged: Vec<(PathBuf, &PathBuf)> = Vec::with_capacity(outputs.len());
    for (path, contents) in outputs {
        let tmp = with_suffix(path, ".tmp");
        if let Err(e) = fs::write(&tmp, contents) {
            remove(&tmp);
            for (tmp, _) in &staged {
                remove(tmp);
            }
            return Err(e).with_context(|| format!("writing {}", tmp.display()));
        }
        staged.push((tmp, path));
    }

    for (i, (tmp, path)) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(tmp, path) {
            for (_, done) in &staged[..i] {
                remove(done);
            }
            for (tmp, _) in &staged[i..] {
                remove(tmp);
            }
            return Err(e).with_context(|| format!("creating {}", path.display()));
        }
    }

    Ok(())
}

/// Assemble `source` into `output`, and its debug symbols into
/// `<output>.sdb` when `debug_info` is set. Nothing is written unless the
/// whole program assembles.
pub fn assemble_file(
    source: &Path,
    output: &Path,
    debug_info: bool,
    options: &AssemblerOptions,
) -> Result<()> {
    if same_file(source, output) {
        bail!(
            "refusing to overwrite the source {} with object code",
            source.display()
        );
    }

    let program_text =
        fs::read_to_string(source).with_context(|| format!("reading {}", source.display()))?;

    let (program, debug) = assemble_with_debug(&program_text, options)
        .with_context(|| format!("assembling {}", source.display()))?;

    let mut outputs = vec![(output.to_owned(), program)];
    if debug_info {
        outputs.push((with_suffix(output, ".sdb"), debug.to_string()?));
    }

    write_all(&outputs)
}
