//! Tick scheduling for the block simulation.
//!
//! # Architecture
//!
//! - [`TickClock`] - fixed rate tick accumulator with sub-passes
//! - [`ClockError`] - construction errors of a clock

mod clock;

pub use clock::{ClockError, TickClock};
