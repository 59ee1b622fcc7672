use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::dispatch::ErrorKind;

use super::{Expectation, SourceError, TestVector, VectorSource};

const EXPECT_MARKER: &str = "=>";
const COMMENT_MARKER: char = '#';

/// Reads vectors from a text file, one message per line:
///
/// ```text
/// # display "Hello"
/// 01 34 05 00 48 65 6c 6c 6f
/// 03 22 04 00 => unknown_message_type
/// ```
pub struct HexFileSource<R: BufRead> {
    lines: Lines<R>,
    line_no: usize,
}

impl HexFileSource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> HexFileSource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> VectorSource for HexFileSource<R> {
    fn next_vector(&mut self) -> Result<Option<TestVector>, SourceError> {
        for line in self.lines.by_ref() {
            let line = line?;
            self.line_no += 1;
            if let Some((bytes, expect)) = parse_vector_line(&line).map_err(|reason| {
                SourceError::InvalidLine {
                    line: self.line_no,
                    reason,
                }
            })? {
                return Ok(Some(TestVector {
                    origin: self.line_no,
                    bytes,
                    expect,
                }));
            }
        }
        Ok(None)
    }
}

/// Parse one vector line; `Ok(None)` for blank and comment lines.
///
/// # Examples
/// ```
/// use tagwire_core::{ErrorKind, Expectation, parse_vector_line};
///
/// let (bytes, expect) = parse_vector_line("03 22 04 00 => unknown_message_type")?.unwrap();
/// assert_eq!(bytes, vec![0x03, 0x22, 0x04, 0x00]);
/// assert_eq!(expect, Expectation::Fail(ErrorKind::UnknownMessageType));
/// assert!(parse_vector_line("# comment")?.is_none());
/// # Ok::<(), String>(())
/// ```
pub fn parse_vector_line(line: &str) -> Result<Option<(Vec<u8>, Expectation)>, String> {
    let content = match line.find(COMMENT_MARKER) {
        Some(pos) => &line[..pos],
        None => line,
    };
    let content = content.trim();
    if content.is_empty() {
        return Ok(None);
    }

    let (hex_part, expect) = match content.split_once(EXPECT_MARKER) {
        Some((hex_part, expect)) => (hex_part, parse_expectation(expect.trim())?),
        None => (content, Expectation::Ok),
    };
    let bytes = parse_hex_bytes(hex_part)?;
    if bytes.is_empty() {
        return Err("no message bytes before expectation".to_string());
    }
    Ok(Some((bytes, expect)))
}

fn parse_expectation(value: &str) -> Result<Expectation, String> {
    if value == "ok" {
        return Ok(Expectation::Ok);
    }
    ErrorKind::from_name(value)
        .map(Expectation::Fail)
        .ok_or_else(|| format!("unknown expectation '{}'", value))
}

fn parse_hex_bytes(input: &str) -> Result<Vec<u8>, String> {
    let mut bytes = Vec::new();
    for token in input.split_whitespace() {
        let digits = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);
        if digits.is_empty() || digits.len() % 2 != 0 {
            return Err(format!("odd or empty hex token '{}'", token));
        }
        for pair in digits.as_bytes().chunks(2) {
            let byte = std::str::from_utf8(pair)
                .ok()
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| format!("invalid hex token '{}'", token))?;
            bytes.push(byte);
        }
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{HexFileSource, parse_vector_line};
    use crate::dispatch::ErrorKind;
    use crate::source::{Expectation, SourceError, VectorSource};

    #[test]
    fn parse_plain_line() {
        let (bytes, expect) = parse_vector_line("01 34 00 00").unwrap().unwrap();
        assert_eq!(bytes, vec![0x01, 0x34, 0x00, 0x00]);
        assert_eq!(expect, Expectation::Ok);
    }

    #[test]
    fn parse_packed_and_prefixed_hex() {
        let (bytes, _) = parse_vector_line("0x01 0x34 0000 # empty display")
            .unwrap()
            .unwrap();
        assert_eq!(bytes, vec![0x01, 0x34, 0x00, 0x00]);
    }

    #[test]
    fn parse_rejects_bad_hex() {
        assert!(parse_vector_line("01 3").is_err());
        assert!(parse_vector_line("zz").is_err());
        assert!(parse_vector_line("01 34 => sometimes").is_err());
        assert!(parse_vector_line("=> ok").is_err());
    }

    #[test]
    fn parse_skips_blank_and_comment() {
        assert!(parse_vector_line("").unwrap().is_none());
        assert!(parse_vector_line("   # note").unwrap().is_none());
    }

    #[test]
    fn source_reports_line_numbers() {
        let text = "# header\n\n01 34 00 00\n02 80 => malformed_payload\n";
        let mut source = HexFileSource::from_reader(Cursor::new(text));

        let first = source.next_vector().unwrap().unwrap();
        assert_eq!(first.origin, 3);
        let second = source.next_vector().unwrap().unwrap();
        assert_eq!(second.origin, 4);
        assert_eq!(
            second.expect,
            Expectation::Fail(ErrorKind::MalformedPayload)
        );
        assert!(source.next_vector().unwrap().is_none());
    }

    #[test]
    fn source_rejects_invalid_line() {
        let mut source = HexFileSource::from_reader(Cursor::new("01 34 00 00\nnot hex\n"));
        assert!(source.next_vector().unwrap().is_some());
        let err = source.next_vector().unwrap_err();
        assert!(matches!(err, SourceError::InvalidLine { line: 2, .. }));
    }
}
