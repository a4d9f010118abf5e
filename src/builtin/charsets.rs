use super::{UsageError, report};
use crate::command::{ShellCommand, ShellStatus};
use crate::env::{Environment, ShellIoError};
use encoding_rs::{Decoder, Encoding};
use std::fmt;

/// A character encoding `cat` can decode, backed by an [`encoding_rs`] encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset(&'static Encoding);

/// A charset name `cat` can't use.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CharsetError {
    #[error("illegal charset name: {0}")]
    Illegal(String),
    #[error("unsupported charset: {0}")]
    Unsupported(String),
}

fn encodings() -> [&'static Encoding; 39] {
    use encoding_rs::*;
    [
        BIG5, EUC_JP, EUC_KR, GB18030, GBK, IBM866, ISO_2022_JP, ISO_8859_10, ISO_8859_13,
        ISO_8859_14, ISO_8859_15, ISO_8859_16, ISO_8859_2, ISO_8859_3, ISO_8859_4, ISO_8859_5,
        ISO_8859_6, ISO_8859_7, ISO_8859_8, ISO_8859_8_I, KOI8_R, KOI8_U, MACINTOSH, SHIFT_JIS,
        UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1250, WINDOWS_1251, WINDOWS_1252, WINDOWS_1253,
        WINDOWS_1254, WINDOWS_1255, WINDOWS_1256, WINDOWS_1257, WINDOWS_1258, WINDOWS_874,
        X_MAC_CYRILLIC, X_USER_DEFINED,
    ]
}

impl Default for Charset {
    /// UTF-8.
    fn default() -> Self {
        Charset(encoding_rs::UTF_8)
    }
}

impl Charset {
    /// Every supported charset, sorted by name ignoring case.
    pub fn all() -> Vec<Charset> {
        let mut all: Vec<_> = encodings().into_iter().map(Charset).collect();
        all.sort_by_key(|cs| cs.name().to_ascii_lowercase());
        all
    }

    /// Canonical name, e.g. `windows-1250`.
    pub fn name(self) -> &'static str {
        self.0.name()
    }

    /// Finds a charset by name or alias, ignoring case.
    pub fn lookup(name: &str) -> Result<Charset, CharsetError> {
        let legal = name.chars().next().is_some_and(|c| c.is_ascii_alphanumeric())
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "-+:_.".contains(c));
        if !legal {
            return Err(CharsetError::Illegal(name.to_string()));
        }
        match Encoding::for_label(name.as_bytes()) {
            Some(encoding) if encoding != encoding_rs::REPLACEMENT => Ok(Charset(encoding)),
            _ => Err(CharsetError::Unsupported(name.to_string())),
        }
    }

    /// Streaming decoder. A byte order mark at the start of the input overrides
    /// the charset; malformed sequences decode to U+FFFD.
    pub fn new_decoder(self) -> Decoder {
        self.0.new_decoder()
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `charsets`: lists the encodings `cat` accepts.
pub struct CharsetsCommand;

const NAME: &str = "charsets";

impl ShellCommand for CharsetsCommand {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: charsets",
            "",
            "Prints all available character encodings (charsets).",
        ]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, ShellIoError> {
        if !arguments.is_empty() {
            return report(env, NAME, UsageError::Unexpected);
        }
        env.write_line("List of all available charsets:")?;
        for charset in Charset::all() {
            env.write_line(&format!("\t{}", charset))?;
        }
        Ok(ShellStatus::Continue)
    }
}
