pub mod errors;
pub mod events;

pub use errors::{ConfigError, SentinelError, ShellError};
pub use events::{Event, EventBus};

pub type Result<T> = std::result::Result<T, SentinelError>;
