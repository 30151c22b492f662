/// All messages that can reach the refresh loop.
///
/// Sources:
/// - Sample timer          → `Tick`
/// - Terminal event stream → `Resize`, `Quit`
/// - Process signal        → `Quit`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Sample interval elapsed: read counters and push a new bar.
    Tick,
    /// Terminal resized to `width` x `height` cells.
    Resize { width: u16, height: u16 },
    /// Quit key pressed or interrupt received.
    Quit,
}
