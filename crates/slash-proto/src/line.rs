//! Line-based codec for tokio.
//!
//! Frames are newline-terminated UTF-8 lines. A trailing `\r` is tolerated
//! and stripped; the encoder always terminates with a bare `\n`. Length
//! limits apply to the line content, terminator excluded. At end of stream an
//! unterminated final line is still yielded.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error::{ProtocolError, Result};

/// Default maximum line length in bytes, terminator excluded.
pub const DEFAULT_MAX_LEN: usize = 64 * 1024;

/// Line-based codec that handles newline-terminated frames.
#[derive(Debug)]
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length, `\r\n` / `\n` not counted
    max_len: usize,
}

impl LineCodec {
    /// Create a codec with the default line limit.
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LEN)
    }

    /// Create a codec with a custom line limit.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
        }
    }

    /// The configured line limit.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    fn check_len(&self, payload: &[u8]) -> Result<()> {
        if payload.len() > self.max_len {
            return Err(ProtocolError::MessageTooLong {
                actual: payload.len(),
                limit: self.max_len,
            });
        }
        Ok(())
    }

    /// Validate one line (terminator already removed) and convert it.
    fn finish(&self, payload: &[u8]) -> Result<String> {
        self.check_len(payload)?;
        let text = std::str::from_utf8(payload).map_err(|e| ProtocolError::InvalidUtf8 {
            byte_pos: e.valid_up_to(),
            details: e.to_string(),
        })?;
        Ok(text.to_string())
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// `bytes` without a trailing `\n` and the `\r` before it.
fn strip_terminator(bytes: &[u8]) -> &[u8] {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    bytes.strip_suffix(b"\r").unwrap_or(bytes)
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>> {
        if let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') {
            let line = src.split_to(self.next_index + offset + 1);
            self.next_index = 0;

            self.finish(strip_terminator(&line)).map(Some)
        } else {
            // No complete line yet; resume the scan here next time.
            self.next_index = src.len();

            // A trailing `\r` may still be the start of the terminator.
            self.check_len(strip_terminator(&src[..]))?;
            Ok(None)
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<String>> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        if src.is_empty() {
            return Ok(None);
        }

        // Peer closed without terminating its last line.
        let rest = src.split();
        self.next_index = 0;
        self.finish(strip_terminator(&rest)).map(Some)
    }
}

impl Encoder<String> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> Result<()> {
        let line = line.trim_end_matches(['\r', '\n']);
        dst.reserve(line.len() + 1);
        dst.extend_from_slice(line.as_bytes());
        dst.extend_from_slice(b"\n");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_across_partial_reads() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from(&b"{\"id\":"[..]);

        assert_eq!(codec.decode(&mut buf).unwrap(), None);

        buf.extend_from_slice(b"\"1\"}\r\n{\"id\"");
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("{\"id\":\"1\"}"));
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert_eq!(&buf[..], b"{\"id\"");
    }

    #[test]
    fn rejects_overlong_partial_line() {
        let mut codec = LineCodec::with_max_len(8);
        let mut buf = BytesMut::from(&b"0123456789"[..]);

        let err = codec.decode(&mut buf).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::MessageTooLong {
                actual: 10,
                limit: 8
            }
        ));
    }

    #[test]
    fn rejects_invalid_utf8() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from(&b"ab\xffcd\n"[..]);

        let err = codec.decode(&mut buf).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidUtf8 { byte_pos: 2, .. }));
    }

    #[test]
    fn encoder_terminates_once() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();

        codec.encode("one\n".to_string(), &mut buf).unwrap();
        codec.encode("two".to_string(), &mut buf).unwrap();
        assert_eq!(&buf[..], b"one\ntwo\n");
    }

    #[test]
    fn accepts_line_of_exactly_max_len() {
        let mut codec = LineCodec::with_max_len(8);
        let mut buf = BytesMut::from(&b"01234567\n89abcdef\r\n"[..]);

        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("01234567"));
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("89abcdef"));
    }

    #[test]
    fn rejects_line_one_past_max_len() {
        let mut codec = LineCodec::with_max_len(8);
        let mut buf = BytesMut::from(&b"012345678\n"[..]);

        let err = codec.decode(&mut buf).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::MessageTooLong {
                actual: 9,
                limit: 8
            }
        ));
    }

    #[test]
    fn partial_line_at_max_len_waits_for_terminator() {
        let mut codec = LineCodec::with_max_len(8);
        let mut buf = BytesMut::from(&b"01234567\r"[..]);

        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        buf.extend_from_slice(b"\n");
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("01234567"));
    }

    #[test]
    fn unterminated_last_line_is_yielded_at_eof() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from(&b"first\nlast"[..]);

        assert_eq!(codec.decode_eof(&mut buf).unwrap().as_deref(), Some("first"));
        assert_eq!(codec.decode_eof(&mut buf).unwrap().as_deref(), Some("last"));
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), None);
        assert!(buf.is_empty());
    }
}
