//! `+IPD,<len>:<payload>` packet framing, as emitted by AT-command WiFi and
//! cellular modems when they forward data from a socket.

pub mod framer;
pub mod reader;

pub use framer::{HeaderState, IpdFramer};
pub use reader::IpdReader;
