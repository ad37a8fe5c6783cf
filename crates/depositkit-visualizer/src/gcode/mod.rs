//! Motion command source
//!
//! This module provides:
//! - Motion command types
//! - Line tokenizing with axis fill policies
//! - Reading commands from files or any buffered reader

pub mod command;
pub mod parser;
pub mod stream;

pub use command::*;
pub use parser::*;
pub use stream::*;
