//! Ciphertext pretty-printing: group characters 5-per-block and 12
//! blocks-per-line (60 characters per line), the conventional layout for
//! hand-transcribed stream ciphers.

const GROUP_SIZE: usize = 5;
const GROUPS_PER_LINE: usize = 12;

/// Stateful line formatter: wraps a byte stream into
/// `GROUP_SIZE`-character blocks separated by spaces, `GROUPS_PER_LINE`
/// blocks per line. Owned by the caller rather than a static counter, so
/// multiple independent streams can be formatted concurrently.
#[derive(Debug, Default)]
pub struct LineFormatter {
    in_group: usize,
    groups_on_line: usize,
}

impl LineFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one ciphertext byte, appending it (and any separators it
    /// triggers) to `out`.
    pub fn push(&mut self, out: &mut Vec<u8>, c: u8) {
        if self.in_group == GROUP_SIZE {
            self.in_group = 0;
            self.groups_on_line += 1;
            if self.groups_on_line == GROUPS_PER_LINE {
                self.groups_on_line = 0;
                out.push(b'\n');
            } else {
                out.push(b' ');
            }
        }
        out.push(c);
        self.in_group += 1;
    }

    /// Feed a run of bytes.
    pub fn push_all(&mut self, out: &mut Vec<u8>, bytes: &[u8]) {
        for &b in bytes {
            self.push(out, b);
        }
    }

    /// Terminate the current line, if anything has been written to it.
    pub fn finish(&mut self, out: &mut Vec<u8>) {
        if self.in_group > 0 || self.groups_on_line > 0 {
            out.push(b'\n');
        }
        self.in_group = 0;
        self.groups_on_line = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_are_separated_by_spaces() {
        let mut f = LineFormatter::new();
        let mut out = Vec::new();
        f.push_all(&mut out, b"ABCDEFGHIJ");
        assert_eq!(out, b"ABCDE FGHIJ");
    }

    #[test]
    fn twelve_groups_wrap_to_a_new_line() {
        let mut f = LineFormatter::new();
        let mut out = Vec::new();
        f.push_all(&mut out, &[b'X'; GROUP_SIZE * GROUPS_PER_LINE + GROUP_SIZE]);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines[0].len(), GROUP_SIZE * GROUPS_PER_LINE + (GROUPS_PER_LINE - 1));
        assert_eq!(lines[1], "XXXXX");
    }

    #[test]
    fn finish_terminates_a_partial_line() {
        let mut f = LineFormatter::new();
        let mut out = Vec::new();
        f.push_all(&mut out, b"AB");
        f.finish(&mut out);
        assert_eq!(out, b"AB\n");
    }

    #[test]
    fn finish_on_empty_output_adds_nothing() {
        let mut f = LineFormatter::new();
        let mut out = Vec::new();
        f.finish(&mut out);
        assert!(out.is_empty());
    }
}
