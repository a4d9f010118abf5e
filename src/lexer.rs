//! Quote- and escape-aware splitting of command arguments.
//!
//! Splitting and unquoting are separate passes: [`split_whitespace`] only decides
//! where tokens end and never rejects input, while [`unquote`] validates a single
//! token and strips its quotes.

use std::borrow::Cow;

const QUOTE: char = '"';
const ESCAPE: char = '\\';

/// Errors that can occur while unquoting a token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexingError {
    /// Something other than whitespace precedes the opening quote.
    #[error("token {0} either has to start with a quote or not have any")]
    TextBeforeQuote(String),
    /// A closing (unescaped) quote was not found.
    #[error("token {0} has an unclosed quote")]
    UnfinishedQuote(String),
    /// Something other than whitespace follows the closing quote.
    #[error("token {0}: there must not be a non-whitespace character after the closing quote")]
    TextAfterQuote(String),
}

struct SplittingFSM<'a> {
    input: &'a str,
    quote_open: bool,
    escape_pending: bool,
    token_start: Option<usize>,
}

impl<'a> SplittingFSM<'a> {
    fn new(input: &'a str) -> Self {
        SplittingFSM {
            input,
            quote_open: false,
            escape_pending: false,
            token_start: None,
        }
    }

    fn make_tokens(mut self) -> Vec<&'a str> {
        let mut out = Vec::new();

        for (pos, ch) in self.input.char_indices() {
            if ch == QUOTE && !self.escape_pending {
                self.quote_open = !self.quote_open;
            }

            if ch.is_whitespace() {
                if !self.quote_open {
                    if let Some(start) = self.token_start.take() {
                        out.push(&self.input[start..pos]);
                    }
                }
            } else if self.token_start.is_none() {
                self.token_start = Some(pos);
            }

            self.escape_pending = ch == ESCAPE && !self.escape_pending;
        }

        // An unterminated quote still yields its content; unquote() rejects it later.
        if let Some(start) = self.token_start {
            out.push(&self.input[start..]);
        }
        out
    }
}

/// Splits `input` on whitespace, keeping whitespace inside double quotes.
///
/// A `"` preceded by an unescaped backslash does not open or close a quote. The
/// returned tokens are raw slices of `input`; quotes and escapes are left intact
/// for [`unquote`].
///
/// ```
/// use myshell::lexer::split_whitespace;
/// assert_eq!(split_whitespace(r#"a "b c" d"#), vec!["a", r#""b c""#, "d"]);
/// ```
pub fn split_whitespace(input: &str) -> Vec<&str> {
    SplittingFSM::new(input).make_tokens()
}

/// Strips the surrounding quotes of a single token and resolves `\"` and `\\`.
///
/// Tokens without any quote are returned unchanged. A quoted token may only be
/// surrounded by whitespace and must contain exactly one quoted region.
pub fn unquote(token: &str) -> Result<Cow<'_, str>, LexingError> {
    let Some(open) = token.find(QUOTE) else {
        return Ok(Cow::Borrowed(token));
    };
    if !token[..open].chars().all(char::is_whitespace) {
        return Err(LexingError::TextBeforeQuote(token.to_string()));
    }

    let content_start = open + QUOTE.len_utf8();
    let mut escape_pending = false;
    let mut close = None;
    for (pos, ch) in token[content_start..].char_indices() {
        if ch == QUOTE && !escape_pending {
            close = Some(content_start + pos);
            break;
        }
        escape_pending = ch == ESCAPE && !escape_pending;
    }
    let close = close.ok_or_else(|| LexingError::UnfinishedQuote(token.to_string()))?;

    if !token[close + QUOTE.len_utf8()..]
        .chars()
        .all(char::is_whitespace)
    {
        return Err(LexingError::TextAfterQuote(token.to_string()));
    }

    Ok(Cow::Owned(remove_escapes(&token[content_start..close])))
}

fn remove_escapes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == ESCAPE {
            if let Some(&next) = chars.peek() {
                if next == QUOTE || next == ESCAPE {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(ch);
    }
    out
}
