//! In-memory text buffer with indentation tracking.

/// Accumulates generated source until it is written out in one piece.
#[derive(Debug, Clone)]
pub struct SourceWriter {
    buf: String,
    indent_width: usize,
    depth: usize,
}

impl SourceWriter {
    /// Empty writer indenting `indent_width` spaces per level.
    pub fn new(indent_width: usize) -> Self {
        Self {
            buf: String::new(),
            indent_width,
            depth: 0,
        }
    }

    /// Append text.
    pub fn print(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// Append one character.
    pub fn put_char(&mut self, c: char) {
        self.buf.push(c);
    }

    /// Append text followed by a line break.
    pub fn println(&mut self, text: &str) {
        self.buf.push_str(text);
        self.new_line();
    }

    /// End the current line.
    pub fn new_line(&mut self) {
        self.buf.push('\n');
    }

    /// Append the indentation of the current depth.
    pub fn fill_indent(&mut self) {
        let width = self.indent_width * self.depth;
        self.buf.extend(std::iter::repeat_n(' ', width));
    }

    /// Increase the nesting depth.
    pub fn indent(&mut self) {
        self.depth += 1;
    }

    /// Decrease the nesting depth.
    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Take the finished text.
    pub fn into_string(self) -> String {
        self.buf
    }
}
