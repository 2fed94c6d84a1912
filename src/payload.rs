// SPDX-License-Identifier: Apache-2.0

pub const DEFAULT_LINE_WIDTH: usize = 80;

// Every byte is rendered as `\xNN`
const ESCAPED_BYTE_WIDTH: usize = 4;

/// Renders residual bytes as prefixed lines of escaped hex codes.
///
/// Lines never split the escape of one byte and never exceed the line width
/// unless the width cannot hold the prefix plus a single byte, in which case
/// each line holds one byte.
#[derive(Debug, Clone, Copy)]
pub struct PayloadFormatter<'a> {
    prefix: &'a str,
    data: &'a [u8],
    width: usize,
}

impl<'a> PayloadFormatter<'a> {
    pub fn new(prefix: &'a str, data: &'a [u8]) -> Self {
        Self {
            prefix,
            data,
            width: DEFAULT_LINE_WIDTH,
        }
    }

    /// Total line width, prefix included.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn bytes_per_line(&self) -> usize {
        let text_width = self.width.saturating_sub(self.prefix.chars().count());
        (text_width / ESCAPED_BYTE_WIDTH).max(1)
    }

    /// A fresh iterator over the rendered lines. Empty data yields no line.
    pub fn lines(&self) -> PayloadLines<'a> {
        PayloadLines {
            prefix: self.prefix,
            chunks: self.data.chunks(self.bytes_per_line()),
        }
    }
}

impl std::fmt::Display for PayloadFormatter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PayloadLines<'a> {
    prefix: &'a str,
    chunks: std::slice::Chunks<'a, u8>,
}

impl Iterator for PayloadLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let chunk = self.chunks.next()?;
        let mut line = String::with_capacity(
            self.prefix.len() + chunk.len() * ESCAPED_BYTE_WIDTH,
        );
        line.push_str(self.prefix);
        for byte in chunk {
            line.push_str(&format!("\\x{byte:02x}"));
        }
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for PayloadLines<'_> {}
