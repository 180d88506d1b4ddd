use crate::constants::{LINE_TERMINATOR, MAX_LINE_BYTES};
use log::warn;
use std::collections::VecDeque;

/// Reassembles newline-terminated lines from raw serial chunks.
pub(crate) struct LineFramer {
    buffer: VecDeque<u8>,
    // Set after an overlong partial line was dropped, until its newline arrives.
    discarding: bool,
}

impl LineFramer {
    pub(crate) fn new() -> LineFramer {
        LineFramer {
            buffer: VecDeque::new(),
            discarding: false,
        }
    }

    pub(crate) fn extend(&mut self, data: &[u8]) {
        self.buffer.extend(data);
    }

    /// Returns the next complete, non-empty line, if one is buffered.
    pub(crate) fn next_line(&mut self) -> Option<String> {
        loop {
            let end_index = match find_terminator(&self.buffer) {
                Some(index) => index,
                None => {
                    self.drop_overlong();
                    return None;
                }
            };
            let mut raw = self.buffer.drain(..=end_index).collect::<Vec<_>>();
            raw.pop(); // terminator

            if self.discarding {
                self.discarding = false;
                continue;
            }
            if raw.len() > MAX_LINE_BYTES {
                warn!("Discarding line of {} bytes without terminator.", raw.len());
                continue;
            }

            let line = String::from_utf8_lossy(&raw);
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            return Some(line.to_string());
        }
    }

    fn drop_overlong(&mut self) {
        if self.buffer.len() <= MAX_LINE_BYTES {
            return;
        }
        if !self.discarding {
            warn!(
                "Discarding {} bytes without line terminator.",
                self.buffer.len()
            );
        }
        self.buffer.clear();
        self.discarding = true;
    }
}

fn find_terminator(buffer: &VecDeque<u8>) -> Option<usize> {
    buffer.iter().position(|e| *e == LINE_TERMINATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_line() {
        let mut framer = LineFramer::new();
        framer.extend(b"0,10\n90,20\n");
        assert_eq!(framer.next_line(), Some("0,10".to_string()));
        assert_eq!(framer.next_line(), Some("90,20".to_string()));
        assert_eq!(framer.next_line(), None);
    }

    #[test]
    fn test_next_line_split_chunks() {
        let mut framer = LineFramer::new();
        framer.extend(b"18");
        assert_eq!(framer.next_line(), None);
        framer.extend(b"0,-");
        assert_eq!(framer.next_line(), None);
        framer.extend(b"1\r\n27");
        assert_eq!(framer.next_line(), Some("180,-1".to_string()));
        assert_eq!(framer.next_line(), None);
        framer.extend(b"0,5\n");
        assert_eq!(framer.next_line(), Some("270,5".to_string()));
    }

    #[test]
    fn test_next_line_skips_empty() {
        let mut framer = LineFramer::new();
        framer.extend(b"\r\n\n   \n45,3\n");
        assert_eq!(framer.next_line(), Some("45,3".to_string()));
        assert_eq!(framer.next_line(), None);
    }

    #[test]
    fn test_next_line_invalid_utf8() {
        let mut framer = LineFramer::new();
        framer.extend(&[0xFF, 0xFE, b',', b'1', b'\n']);
        let line = framer.next_line().unwrap();
        assert!(line.contains('\u{FFFD}'));
    }

    #[test]
    fn test_next_line_overlong() {
        let mut framer = LineFramer::new();
        framer.extend(&[b'7'; MAX_LINE_BYTES + 1]);
        assert_eq!(framer.next_line(), None);
        // remainder of the garbage line is dropped too
        framer.extend(b"77777\n10,20\n");
        assert_eq!(framer.next_line(), Some("10,20".to_string()));
        assert_eq!(framer.next_line(), None);
    }

    #[test]
    fn test_next_line_overlong_terminated() {
        let mut framer = LineFramer::new();
        let mut data = vec![b'1'; MAX_LINE_BYTES + 10];
        data.extend(b"\n30,4\n");
        framer.extend(&data);
        assert_eq!(framer.next_line(), Some("30,4".to_string()));
    }
}
