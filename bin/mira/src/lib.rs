mod fleet;
pub use fleet::{DeviceState, Fleet};

mod history;
pub use history::History;

mod session;
pub use session::Session;

pub mod report;

pub type ErasedError = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, ErasedError>;
