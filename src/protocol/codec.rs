//! Protocol codec
//!
//! Line-level read/write helpers shared by the server handler and the client.
//! Writes are flushed after every message; there is no batching.

use std::io::{BufRead, Write};

use crate::error::Result;
use super::Reply;

/// Read one `\n`-terminated line.
///
/// Returns `Ok(None)` on a clean EOF. Bytes that are not valid UTF-8 are
/// replaced rather than rejected. A final line without a terminator is
/// still returned.
pub fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut buf = Vec::new();
    let n = reader.read_until(b'\n', &mut buf)?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Read one line that must end in `\n`.
///
/// Like [`read_line`], but bytes cut off by EOF before a terminator are
/// dropped and reported as `Ok(None)`: an unterminated line never arrived.
pub fn read_terminated_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    match read_line(reader)? {
        Some(line) if line.ends_with('\n') => Ok(Some(line)),
        _ => Ok(None),
    }
}

/// Write `text` followed by `\n`, then flush
pub fn write_line<W: Write>(writer: &mut W, text: &str) -> Result<()> {
    writer.write_all(text.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write a server reply as one line, then flush
pub fn write_reply<W: Write>(writer: &mut W, reply: &Reply) -> Result<()> {
    writer.write_all(reply.to_line().as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_line_keeps_unterminated_tail() {
        let mut reader = Cursor::new(b"one\ntwo\nthree".to_vec());
        assert_eq!(read_line(&mut reader).unwrap().as_deref(), Some("one\n"));
        assert_eq!(read_line(&mut reader).unwrap().as_deref(), Some("two\n"));
        assert_eq!(read_line(&mut reader).unwrap().as_deref(), Some("three"));
        assert_eq!(read_line(&mut reader).unwrap(), None);
    }

    #[test]
    fn test_read_terminated_line_drops_partial_tail() {
        let mut reader = Cursor::new(b"one\ntwo\nthree".to_vec());
        assert_eq!(read_terminated_line(&mut reader).unwrap().as_deref(), Some("one\n"));
        assert_eq!(read_terminated_line(&mut reader).unwrap().as_deref(), Some("two\n"));
        assert_eq!(read_terminated_line(&mut reader).unwrap(), None);
    }

    #[test]
    fn test_read_terminated_line_empty_input() {
        let mut reader = Cursor::new(Vec::new());
        assert_eq!(read_terminated_line(&mut reader).unwrap(), None);
    }

    #[test]
    fn test_read_line_invalid_utf8_is_lossy() {
        let mut reader = Cursor::new(vec![0xff, b'a', b'\n']);
        let line = read_line(&mut reader).unwrap().unwrap();
        assert!(line.ends_with("a\n"));
    }

    #[test]
    fn test_write_reply_appends_newline() {
        let mut out = Vec::new();
        write_reply(&mut out, &Reply::Echo("hi".to_string())).unwrap();
        write_line(&mut out, "quit").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "服务器回复: hi\nquit\n");
    }
}
