//! Line-delimited transport codec for the event-server connection.
//!
//! The event server frames every message as one JSON object per line. A
//! logical line may arrive split across several reads, so the decoder
//! reassembles until it sees the `\n` delimiter. Outgoing requests are
//! terminated with CRLF, matching what the server expects.

use bytes::{BufMut, BytesMut};
use std::io;
use tokio_util::codec::{Decoder, Encoder};

/// Maximum line size (1 MB). Event and response lines are small; anything
/// beyond this is a runaway stream.
const MAX_LINE_SIZE: usize = 1024 * 1024;

/// Codec for newline-delimited JSON lines.
#[derive(Debug, Default)]
pub struct LineCodec {
    // Scan position for the next delimiter search, so partial lines are not
    // rescanned from the start on every read.
    next_index: usize,
}

impl LineCodec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') else {
            if src.len() > MAX_LINE_SIZE {
                return Err(CodecError::LineTooLong(src.len()));
            }
            self.next_index = src.len();
            return Ok(None);
        };

        let mut line = src.split_to(self.next_index + offset + 1);
        self.next_index = 0;

        line.truncate(line.len() - 1);
        if line.last() == Some(&b'\r') {
            line.truncate(line.len() - 1);
        }

        let line = std::str::from_utf8(&line)?.to_string();
        Ok(Some(line))
    }
}

impl Encoder<String> for LineCodec {
    type Error = CodecError;

    fn encode(&mut self, item: String, dst: &mut BytesMut) -> Result<(), Self::Error> {
        if item.len() > MAX_LINE_SIZE {
            return Err(CodecError::LineTooLong(item.len()));
        }

        dst.reserve(item.len() + 2);
        dst.put_slice(item.as_bytes());
        dst.put_slice(b"\r\n");

        Ok(())
    }
}

/// Errors that can occur during codec operations
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Line too long: {0} bytes (max: {MAX_LINE_SIZE})")]
    LineTooLong(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_single_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from(&b"{\"id\":1,\"result\":0}\r\n"[..]);

        let line = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(line, "{\"id\":1,\"result\":0}");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_strips_bare_newline() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from(&b"{\"Event\":\"Paused\"}\n"[..]);

        let line = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(line, "{\"Event\":\"Paused\"}");
    }

    #[test]
    fn test_decode_partial_line_reassembly() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();

        buf.extend_from_slice(b"{\"Event\":\"App");
        assert!(codec.decode(&mut buf).unwrap().is_none());

        buf.extend_from_slice(b"State\",\"State\":\"Guiding\"");
        assert!(codec.decode(&mut buf).unwrap().is_none());

        buf.extend_from_slice(b"}\r\n");
        let line = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(line, "{\"Event\":\"AppState\",\"State\":\"Guiding\"}");
    }

    #[test]
    fn test_decode_multiple_lines_in_buffer() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from(&b"first\r\nsecond\r\nthi"[..]);

        assert_eq!(codec.decode(&mut buf).unwrap().unwrap(), "first");
        assert_eq!(codec.decode(&mut buf).unwrap().unwrap(), "second");
        assert!(codec.decode(&mut buf).unwrap().is_none());

        buf.extend_from_slice(b"rd\r\n");
        assert_eq!(codec.decode(&mut buf).unwrap().unwrap(), "third");
    }

    #[test]
    fn test_decode_empty_buffer() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();
        assert!(codec.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from(&[0xff, 0xfe, b'\n'][..]);

        let result = codec.decode(&mut buf);
        assert!(matches!(result, Err(CodecError::Utf8(_))));
    }

    #[test]
    fn test_decode_unterminated_line_too_long() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from(vec![b'x'; MAX_LINE_SIZE + 1].as_slice());

        let result = codec.decode(&mut buf);
        assert!(matches!(result, Err(CodecError::LineTooLong(_))));
    }

    #[test]
    fn test_encode_appends_crlf() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();

        codec
            .encode("{\"method\":\"loop\",\"id\":1}".to_string(), &mut buf)
            .unwrap();
        assert_eq!(&buf[..], b"{\"method\":\"loop\",\"id\":1}\r\n");
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();

        codec.encode("one".to_string(), &mut buf).unwrap();
        codec.encode("two".to_string(), &mut buf).unwrap();

        assert_eq!(codec.decode(&mut buf).unwrap().unwrap(), "one");
        assert_eq!(codec.decode(&mut buf).unwrap().unwrap(), "two");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_codec_error_display() {
        let err = CodecError::LineTooLong(2_000_000);
        let msg = err.to_string();
        assert!(msg.contains("2000000"));
        assert!(msg.contains("too long"));
    }
}
