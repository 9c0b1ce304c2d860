//! PUI protocol handling.
//!
//! This module implements parsing and serialization for the PUI (Pursuit
//! Universal Interface) protocol: PFEN position encoding and the command
//! parser for the main loop.

pub mod parser;
pub mod pfen;

pub use parser::{parse_command, Command, GoParams};
pub use pfen::{encode_pfen, parse_pfen, PfenError};
