//! Logging abstractions for runtime-agnostic logging

mod traits;
mod console;
mod memory;

pub use traits::{Logger, NoOpLogger, SharedLogger};
pub use console::{ConsoleLogger, LogLevel};
pub use memory::MemoryLogger;
