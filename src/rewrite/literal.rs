//! Go string literals as they appear in import declarations.

use std::fmt;

/// The delimiter style of a string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralStyle {
    /// `"..."` with backslash escapes.
    Interpreted,
    /// `` `...` `` taken verbatim.
    Raw,
}

/// A literal that could not be decoded or encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralError {
    /// Byte offset inside the literal where the problem was found.
    pub offset: usize,
    pub message: String,
}

impl LiteralError {
    fn new(offset: usize, message: impl Into<String>) -> Self {
        LiteralError {
            offset,
            message: message.into(),
        }
    }
}

impl fmt::Display for LiteralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for LiteralError {}

/// Decode a complete literal, delimiters included.
pub fn unquote(literal: &str) -> Result<(String, LiteralStyle), LiteralError> {
    if let Some(body) = literal
        .strip_prefix('`')
        .and_then(|rest| rest.strip_suffix('`'))
    {
        if body.contains('`') {
            return Err(LiteralError::new(0, "unexpected backquote in raw string"));
        }
        // Carriage returns are discarded from raw strings.
        return Ok((body.replace('\r', ""), LiteralStyle::Raw));
    }

    let body = literal
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| LiteralError::new(0, "not a string literal"))?;

    let mut out: Vec<u8> = Vec::with_capacity(body.len());
    let bytes = body.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                let start = i + 1;
                let esc = *bytes
                    .get(start)
                    .ok_or_else(|| LiteralError::new(start, "escape sequence not terminated"))?;
                i = start + 1;
                match esc {
                    b'a' => out.push(0x07),
                    b'b' => out.push(0x08),
                    b'f' => out.push(0x0c),
                    b'n' => out.push(b'\n'),
                    b'r' => out.push(b'\r'),
                    b't' => out.push(b'\t'),
                    b'v' => out.push(0x0b),
                    b'\\' => out.push(b'\\'),
                    b'"' => out.push(b'"'),
                    b'0'..=b'7' => {
                        let digits = take_digits(body, start, 3, 8)?;
                        if digits > 255 {
                            return Err(LiteralError::new(start, "octal escape value > 255"));
                        }
                        out.push(digits as u8);
                        i = start + 3;
                    }
                    b'x' => {
                        out.push(take_digits(body, i, 2, 16)? as u8);
                        i += 2;
                    }
                    b'u' | b'U' => {
                        let len = if esc == b'u' { 4 } else { 8 };
                        let value = take_digits(body, i, len, 16)?;
                        let c = char::from_u32(value).ok_or_else(|| {
                            LiteralError::new(
                                start,
                                "escape sequence is invalid Unicode code point",
                            )
                        })?;
                        let mut buf = [0u8; 4];
                        out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                        i += len;
                    }
                    _ => return Err(LiteralError::new(start, "unknown escape sequence")),
                }
            }
            b'\n' => return Err(LiteralError::new(i, "newline in string")),
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8(out)
        .map(|s| (s, LiteralStyle::Interpreted))
        .map_err(|_| LiteralError::new(0, "string is not valid UTF-8"))
}

/// Read exactly `len` digits of `radix` starting at `start`.
fn take_digits(body: &str, start: usize, len: usize, radix: u32) -> Result<u32, LiteralError> {
    let digits = body
        .get(start..start + len)
        .filter(|d| d.chars().all(|c| c.is_digit(radix)))
        .ok_or_else(|| LiteralError::new(start, "illegal character in escape sequence"))?;
    u32::from_str_radix(digits, radix)
        .map_err(|_| LiteralError::new(start, "illegal character in escape sequence"))
}

/// Encode an import path as a literal in the given style.
///
/// The path must be a legal import path, which never needs escaping.
pub fn quote(path: &str, style: LiteralStyle) -> Result<String, LiteralError> {
    check_import_path(path)?;
    Ok(match style {
        LiteralStyle::Interpreted => format!("\"{}\"", path),
        LiteralStyle::Raw => format!("`{}`", path),
    })
}

/// Characters that may not appear in an import path.
const ILLEGAL_PATH_CHARS: &str = "!\"#$%&'()*,:;<=>?[\\]^`{|}";

/// Check that `path` is a legal import path: non-empty, graphic characters
/// only, none of the reserved punctuation and no replacement character.
pub fn check_import_path(path: &str) -> Result<(), LiteralError> {
    if path.is_empty() {
        return Err(LiteralError::new(0, "empty import path"));
    }
    for (offset, c) in path.char_indices() {
        if c.is_control()
            || c.is_whitespace()
            || c == '\u{FFFD}'
            || ILLEGAL_PATH_CHARS.contains(c)
        {
            return Err(LiteralError::new(
                offset,
                format!("invalid character {:?} in import path {:?}", c, path),
            ));
        }
    }
    Ok(())
}
