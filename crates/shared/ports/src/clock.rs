use liftoff_core::Timestamp;

/// Local time as seen by this process
///
/// Reading it never blocks and never fails. Implementations: the wall
/// clock, a manually driven clock for tests, and the server-corrected
/// `ClockSync` (which reads its cached offset).
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;

    /// Label used in log lines
    fn name(&self) -> &str {
        "Clock"
    }
}
