//! Core types shared by every llbasic compiler crate.
//!
//! - [`Location`]: line/column source positions
//! - [`Fail`]: the single failure type every phase returns
//! - [`Token`], [`TokenKind`]: lexical units with tag-gated literal payloads
//! - [`TokenList`]: the cursor the parser consumes tokens through

mod error;
mod location;
mod token;
mod token_list;

pub use error::{Fail, FailResult};
pub use location::Location;
pub use token::{Token, TokenKind};
pub use token_list::TokenList;
