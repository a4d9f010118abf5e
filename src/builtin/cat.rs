use super::{Charset, PathKind, UsageError, check_path, finish, report};
use crate::command::{ShellCommand, ShellStatus};
use crate::env::{Environment, ShellIoError};
use crate::lexer::{split_whitespace, unquote};
use anyhow::Context;
use encoding_rs::CoderResult;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

const READ_CHUNK: usize = 4096;

/// `cat <file> [charset]`: prints a file decoded with the given charset.
pub struct CatCommand;

const NAME: &str = "cat";

fn parse(arguments: &str) -> Result<(PathBuf, Charset), UsageError> {
    let tokens = split_whitespace(arguments);
    match tokens.len() {
        0 => return Err(UsageError::Missing),
        1 | 2 => {}
        _ => return Err(UsageError::TooMany),
    }
    let file = PathBuf::from(unquote(tokens[0])?.as_ref());
    check_path(&file, PathKind::File)?;
    let charset = match tokens.get(1) {
        Some(token) => Charset::lookup(&unquote(token)?)?,
        None => Charset::default(),
    };
    Ok((file, charset))
}

fn cat(env: &mut dyn Environment, file: &Path, charset: Charset) -> anyhow::Result<()> {
    let mut input = File::open(file).with_context(|| format!("cannot open {}", file.display()))?;
    let mut decoder = charset.new_decoder();
    let mut buf = [0u8; READ_CHUNK];
    let mut text = String::new();
    loop {
        let read = input
            .read(&mut buf)
            .with_context(|| format!("cannot read {}", file.display()))?;
        let last = read == 0;
        let mut pending = &buf[..read];
        loop {
            let room = decoder
                .max_utf8_buffer_length(pending.len())
                .unwrap_or(READ_CHUNK * 4);
            text.reserve(room);
            let (result, consumed, _) = decoder.decode_to_string(pending, &mut text, last);
            pending = &pending[consumed..];
            env.write(&text)?;
            text.clear();
            if result == CoderResult::InputEmpty {
                break;
            }
        }
        if last {
            break;
        }
    }
    env.write_line("")?;
    Ok(())
}

impl ShellCommand for CatCommand {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: cat <file_path> <character_encoding>",
            "",
            "Prints specified file to standard output, using specified character encoding.",
            "Character encoding parameter is optional. If not specified, UTF-8 is used.",
            "To get all available character encodings, use command \"charsets\".",
        ]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, ShellIoError> {
        match parse(arguments) {
            Ok((file, charset)) => {
                let result = cat(env, &file, charset);
                finish(env, NAME, result)
            }
            Err(err) => report(env, NAME, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::test_support::{quoted, run};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cat_utf8_and_latin1() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("my notes.txt");
        fs::write(&file, [0x63, 0x61, 0x66, 0xe9]).unwrap();

        let (status, out) = run(&CatCommand, &format!("{} ISO-8859-1", quoted(&file)));
        assert_eq!(status, ShellStatus::Continue);
        assert_eq!(out, "café\n");

        let (_, out) = run(&CatCommand, &quoted(&file));
        assert_eq!(out, "caf\u{fffd}\n");
    }

    #[test]
    fn test_cat_legacy_charset() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("hr.txt");
        fs::write(&file, [0x8a, 0x61, 0x9a, 0x61, 0x20, 0xe8, 0x61, 0x6a]).unwrap();

        let (_, out) = run(&CatCommand, &format!("{} windows-1250", quoted(&file)));
        assert_eq!(out, "Šaša čaj\n");
    }

    #[test]
    fn test_cat_character_split_across_reads() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("long.txt");
        let mut text = "a".repeat(READ_CHUNK - 1);
        text.push_str("čaj");
        fs::write(&file, &text).unwrap();

        let (_, out) = run(&CatCommand, &quoted(&file));
        assert_eq!(out, format!("{}\n", text));
    }

    #[test]
    fn test_cat_validation() {
        assert_eq!(
            run(&CatCommand, "").1,
            "cat: there has to be at least one argument.\n"
        );
        assert_eq!(run(&CatCommand, "a b c").1, "cat: too many arguments.\n");
        assert!(run(&CatCommand, "\"unterminated").1.starts_with("cat: invalid input: "));

        let tmp = TempDir::new().unwrap();
        let (_, out) = run(&CatCommand, &quoted(tmp.path()));
        assert_eq!(
            out,
            format!("cat: invalid path: path {} is not a file.\n", tmp.path().display())
        );

        let file = tmp.path().join("f");
        fs::write(&file, "x").unwrap();
        let (_, out) = run(&CatCommand, &format!("{} KLINGON", quoted(&file)));
        assert_eq!(out, "cat: unsupported charset: KLINGON\n");
        let (_, out) = run(&CatCommand, &format!("{} utf?8", quoted(&file)));
        assert_eq!(out, "cat: illegal charset name: utf?8\n");
    }
}
