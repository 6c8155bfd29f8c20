//! Qtum bridge SDK - script construction and parsing.
//!
//! Provides the Script type, the opcode subset used by payment and
//! contract outputs, push-data chunk parsing, script number encoding,
//! and the locking/unlocking script templates.

pub mod chunk;
pub mod number;
pub mod opcodes;
pub mod script;
pub mod template;

mod error;
pub use chunk::ScriptChunk;
pub use error::ScriptError;
pub use script::Script;
