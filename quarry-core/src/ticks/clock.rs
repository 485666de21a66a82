//! Fractional tick clock.
//!
//! Converts the irregular frame delta stream of the host loop into discrete
//! ticks at a fixed rate. A tick may be split into several parts which fire
//! on consecutive `update` calls, so an expensive sweep can be spread across
//! frames.

/// Errors raised when building a [`TickClock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// A clock has to tick at least once per second.
    #[error("tick rate must be at least 1 tick per second")]
    ZeroTickRate,
    /// A tick is made of at least one part.
    #[error("a tick must be split into at least 1 part")]
    ZeroTickParts,
}

/// A fixed rate tick accumulator with optional sub-passes.
///
/// Every logical tick fires exactly `parts` times: once when the tick boundary
/// is crossed and once more on each of the following `parts - 1` updates.
/// Owed parts are drained one per update, never all at once, so a large delta
/// spike costs at most one extra pass per frame.
#[derive(Debug, Clone)]
pub struct TickClock {
    tick_rate: u32,
    tick_parts: u32,
    tick_timer: f32,
    tick_parts_undone: u32,
    tick_id: u64,
}

impl TickClock {
    /// Creates a clock firing `tick_rate` logical ticks per second, each split
    /// into `tick_parts` parts.
    pub fn new(tick_rate: u32, tick_parts: u32) -> Result<Self, ClockError> {
        if tick_rate == 0 {
            return Err(ClockError::ZeroTickRate);
        }
        if tick_parts == 0 {
            return Err(ClockError::ZeroTickParts);
        }
        Ok(Self {
            tick_rate,
            tick_parts,
            tick_timer: 0.0,
            tick_parts_undone: 0,
            tick_id: 0,
        })
    }

    /// Feeds `delta` seconds into the clock.
    ///
    /// Returns `true` when this call corresponds to a firing, either a new
    /// logical tick (part 0) or one of its remaining parts.
    pub fn update(&mut self, delta: f32) -> bool {
        self.tick_timer += delta;
        let period = self.period();

        if self.tick_parts_undone > 0 {
            self.tick_parts_undone -= 1;
            return true;
        }
        if self.tick_timer > period {
            self.tick_timer %= period;
            self.tick_parts_undone = self.tick_parts - 1;
            self.tick_id += 1;
            return true;
        }
        false
    }

    /// Seconds between two logical ticks.
    #[must_use]
    pub fn period(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    /// Number of parts a logical tick is split into.
    #[must_use]
    pub fn parts(&self) -> u32 {
        self.tick_parts
    }

    /// Zero based index of the part that fired last.
    ///
    /// Goes `0, 1, .., parts - 1` within one logical tick.
    #[must_use]
    pub fn part(&self) -> u32 {
        self.tick_parts - self.tick_parts_undone - 1
    }

    /// Logical ticks per second.
    #[must_use]
    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    /// Number of logical ticks started so far.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }
}
