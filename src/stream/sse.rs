//! Incremental decoder for the backend's server-sent-events framing.
//!
//! The backend emits one event per new history item: a frame of `data:`
//! lines terminated by a blank line, with `:`-prefixed comment lines used as
//! heartbeats. The decoder is transport-agnostic: bytes in, completed `data`
//! payloads out, with partial frames buffered across chunk boundaries.

/// Streaming SSE frame decoder.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    /// Creates an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a chunk of transport bytes and returns the `data` payloads of
    /// every frame completed by it, in arrival order.
    ///
    /// Heartbeat comments and unknown fields are skipped. A frame that is not
    /// valid UTF-8 is dropped with a warning; it never aborts decoding.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut payloads = Vec::new();
        while let Some(end) = find_frame_end(&self.buffer) {
            let frame: Vec<u8> = self.buffer.drain(..end + 2).collect();
            match std::str::from_utf8(&frame) {
                Ok(text) => {
                    if let Some(payload) = parse_frame(text) {
                        payloads.push(payload);
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "dropping non-UTF-8 stream frame");
                }
            }
        }
        payloads
    }
}

/// Index of the first `\n\n` frame terminator, if a complete frame is
/// buffered.
fn find_frame_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|pair| pair == b"\n\n")
}

/// Extracts the concatenated `data` field value of one frame, or `None` for
/// frames without data (heartbeats, comments, unknown fields).
fn parse_frame(frame: &str) -> Option<String> {
    let mut data_lines = Vec::new();
    for line in frame.lines() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if let Some(value) = line.strip_prefix("data:") {
            data_lines.push(value.strip_prefix(' ').unwrap_or(value));
        }
        // Comment lines (":" prefix) and other fields are ignored.
    }
    if data_lines.is_empty() {
        None
    } else {
        Some(data_lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_single_frame() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.feed(b"data: {\"id\": 1}\n\n");
        assert_eq!(payloads, vec!["{\"id\": 1}"]);
    }

    #[test]
    fn buffers_partial_frames_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"data: {\"id\"").is_empty());
        assert!(decoder.feed(b": 2}\n").is_empty());
        let payloads = decoder.feed(b"\ndata: {\"id\": 3}\n\n");
        assert_eq!(payloads, vec!["{\"id\": 2}", "{\"id\": 3}"]);
    }

    #[test]
    fn heartbeat_comments_produce_no_payload() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b": heartbeat\n\n").is_empty());
        assert!(decoder.feed(b": heartbeat\n\ndata: x\n\n").len() == 1);
    }

    #[test]
    fn multiple_data_lines_join_with_newline() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.feed(b"data: first\ndata: second\n\n");
        assert_eq!(payloads, vec!["first\nsecond"]);
    }

    #[test]
    fn crlf_line_endings_are_tolerated() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.feed(b"data: payload\r\n\n");
        assert_eq!(payloads, vec!["payload"]);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.feed(b"event: update\nid: 7\ndata: body\n\n");
        assert_eq!(payloads, vec!["body"]);
    }
}
