use bytes::{Buf, BytesMut};

/// Incremental `text/event-stream` decoder that yields the `data` of each event.
///
/// Multi-line `data` fields are joined with `\n`. Comments and the `event`,
/// `id` and `retry` fields are ignored. Events without data are dropped.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: BytesMut,
    /// Bytes of `buffer` already known to hold no line break.
    scanned: usize,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a chunk and returns the payloads of every event it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);
        let mut payloads = Vec::new();

        while let Some(offset) = self.buffer[self.scanned..].iter().position(|b| *b == b'\n') {
            let line = self.buffer.split_to(self.scanned + offset);
            self.scanned = 0;
            self.buffer.advance(1);
            let line = String::from_utf8_lossy(&line);
            let line = line.strip_suffix('\r').unwrap_or(&line);

            if line.is_empty() {
                if !self.data.is_empty() {
                    payloads.push(self.data.join("\n"));
                    self.data.clear();
                }
                continue;
            }
            if line.starts_with(':') {
                continue;
            }

            let (field, value) = match line.split_once(':') {
                Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
                None => (line, ""),
            };
            if field == "data" {
                self.data.push(value.to_string());
            }
        }

        self.scanned = self.buffer.len();
        payloads
    }
}
