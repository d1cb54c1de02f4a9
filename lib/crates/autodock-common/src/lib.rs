pub mod redact;
pub mod scanner;
pub mod types;

pub use redact::{REDACTED, redact};
pub use scanner::{LogScan, scan};
pub use types::*;
