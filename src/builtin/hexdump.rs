use super::{PathKind, finish, report, single_path};
use crate::command::{ShellCommand, ShellStatus};
use crate::env::{Environment, ShellIoError};
use crate::hexdump::HexDumpUnitFactory;
use anyhow::Context;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const READ_CHUNK: usize = 4096;

/// `hexdump <file>`: prints a file as rows of 16 bytes.
pub struct HexDumpCommand;

const NAME: &str = "hexdump";

fn hexdump(env: &mut dyn Environment, file: &Path) -> anyhow::Result<()> {
    let mut input = File::open(file).with_context(|| format!("cannot open {}", file.display()))?;
    let mut factory = HexDumpUnitFactory::new();
    let mut buf = [0u8; READ_CHUNK];
    loop {
        let read = input
            .read(&mut buf)
            .with_context(|| format!("cannot read {}", file.display()))?;
        if read == 0 {
            break;
        }
        for unit in factory.update(&buf[..read]) {
            env.write_line(&unit.to_string())?;
        }
    }
    if let Some(unit) = factory.finalize() {
        env.write_line(&unit.to_string())?;
    }
    Ok(())
}

impl ShellCommand for HexDumpCommand {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: hexdump <file_path>",
            "",
            "Produces a hex-output of the specified file.",
        ]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, ShellIoError> {
        let file = match single_path(arguments, Some(PathKind::File)) {
            Ok(file) => file,
            Err(err) => return report(env, NAME, err),
        };
        let result = hexdump(env, &file);
        finish(env, NAME, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::test_support::{quoted, run};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_dump_rows() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("data");
        let mut data = b"Hello, hexdump!\n".to_vec();
        data.extend_from_slice(&[0x00, 0x7f, 0x41]);
        fs::write(&file, &data).unwrap();

        let (status, out) = run(&HexDumpCommand, &quoted(&file));
        assert_eq!(status, ShellStatus::Continue);
        assert_eq!(
            out,
            "00000000: 48 65 6c 6c 6f 2c 20 68|65 78 64 75 6d 70 21 0a | Hello, hexdump!.\n\
             00000010: 00 7f 41               |                        | .\u{7f}A\n"
        );
    }

    #[test]
    fn test_spans_read_chunks() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("big");
        fs::write(&file, vec![b'a'; READ_CHUNK + 20]).unwrap();

        let (_, out) = run(&HexDumpCommand, &quoted(&file));
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), READ_CHUNK / 16 + 2);
        assert!(lines.last().unwrap().starts_with("00001010: 61 61 61 61 "));
    }

    #[test]
    fn test_empty_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("empty");
        fs::write(&file, "").unwrap();
        assert_eq!(run(&HexDumpCommand, &quoted(&file)).1, "");
    }
}
