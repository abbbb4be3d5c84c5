/// Incremental UTF-8 decoder for chunked byte input.
///
/// A multi-byte sequence split across two chunks is held back until it completes. Invalid
/// bytes become U+FFFD and decoding carries on, so a bad byte never stalls the stream.
#[derive(Debug, Default)]
pub(crate) struct Utf8Decoder {
    // Incomplete trailing sequence from the previous chunk; at most 3 bytes.
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub(crate) fn push(&mut self, out: &mut String, mut bytes: &[u8]) {
        while !self.pending.is_empty() && !bytes.is_empty() {
            let want = sequence_len(self.pending[0]).max(self.pending.len());
            let take = (want - self.pending.len()).min(bytes.len());
            self.pending.extend_from_slice(&bytes[..take]);
            bytes = &bytes[take..];
            if self.pending.len() < want {
                return;
            }
            let sequence = std::mem::take(&mut self.pending);
            self.decode_into(out, &sequence);
        }
        self.decode_into(out, bytes);
    }

    /// Flush a dangling partial sequence as U+FFFD.
    pub(crate) fn finish(&mut self, out: &mut String) {
        if !self.pending.is_empty() {
            out.push_str(&String::from_utf8_lossy(&self.pending));
            self.pending.clear();
        }
    }

    fn decode_into(&mut self, out: &mut String, mut bytes: &[u8]) {
        while !bytes.is_empty() {
            let err = match std::str::from_utf8(bytes) {
                Ok(s) => {
                    out.push_str(s);
                    return;
                }
                Err(err) => err,
            };
            let (valid, after) = bytes.split_at(err.valid_up_to());
            out.push_str(&String::from_utf8_lossy(valid));
            match err.error_len() {
                Some(len) => {
                    out.push('\u{FFFD}');
                    bytes = &after[len..];
                }
                None => {
                    self.pending.extend_from_slice(after);
                    return;
                }
            }
        }
    }
}

fn sequence_len(lead: u8) -> usize {
    match lead {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_chunks(chunks: &[&[u8]]) -> String {
        let mut decoder = Utf8Decoder::default();
        let mut out = String::new();
        for chunk in chunks {
            decoder.push(&mut out, chunk);
        }
        decoder.finish(&mut out);
        out
    }

    #[test]
    fn joins_sequence_split_across_chunks() {
        let mut decoder = Utf8Decoder::default();
        let mut out = String::new();
        decoder.push(&mut out, &[0xC3]);
        assert_eq!(out, "");
        decoder.push(&mut out, &[0x97]);
        assert_eq!(out, "×");
    }

    #[test]
    fn four_byte_sequence_split_three_ways() {
        assert_eq!(decode_chunks(&[&[0xF0], &[0x9F, 0x98], &[0x80, b'!']]), "😀!");
    }

    #[test]
    fn invalid_bytes_are_replaced() {
        assert_eq!(decode_chunks(&[&[0xFF, b'f']]), "\u{FFFD}f");
        assert_eq!(decode_chunks(&[&[0xE2], &[b'a', b'b']]), "\u{FFFD}ab");
    }

    #[test]
    fn dangling_suffix_is_flushed_on_finish() {
        assert_eq!(decode_chunks(&[b"ok", &[0xE2, 0x82]]), "ok\u{FFFD}");
    }
}
