//! CPU time sampling for `cpustat`.
//!
//! - [`stat`]: reads cumulative counters ([`CounterSource`], [`ProcStat`])
//! - [`cpu`]: turns two readings into percentages ([`delta`])
//! - [`history`]: the width-bounded window of bars ([`HistoryBuffer`])

pub mod cpu;
pub mod history;
pub mod stat;

pub use cpu::delta;
pub use history::{capacity_for, HistoryBuffer};
pub use stat::{CounterSource, ProcStat};
