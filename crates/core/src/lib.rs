pub mod error;
pub mod event;
pub mod state;

pub use error::{CpuStatError, Result};
pub use event::Message;
pub use state::{Category, CategoryMode, CounterSnapshot, PercentageVector};
