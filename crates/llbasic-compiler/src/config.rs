//! Compiler options.

use std::path::{Path, PathBuf};

/// Default destination of the generated C++ source.
pub const DEFAULT_OUTPUT_PATH: &str = "out.cpp";

/// Default runtime header included by generated code.
pub const DEFAULT_RUNTIME_HEADER: &str = "llb_runtime.h";

/// Settings shared by every pass of one compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Where the C++ backend writes its artifact.
    pub output_path: PathBuf,
    /// Spaces per nesting level in generated bodies.
    pub indent_width: usize,
    /// Header named by the `#include` line of the artifact.
    pub runtime_header: String,
    /// When false the artifact is only kept in memory.
    pub write_output: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            indent_width: 2,
            runtime_header: DEFAULT_RUNTIME_HEADER.to_string(),
            write_output: true,
        }
    }
}

impl CompilerOptions {
    /// Options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the artifact destination.
    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output_path = path.as_ref().to_path_buf();
        self
    }

    /// Set the indentation width.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set the runtime header name.
    pub fn with_runtime_header(mut self, header: impl Into<String>) -> Self {
        self.runtime_header = header.into();
        self
    }

    /// Keep the artifact in memory only.
    pub fn in_memory(mut self) -> Self {
        self.write_output = false;
        self
    }
}
