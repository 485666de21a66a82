//! # Quarry Core
//!
//! The tick driven block simulation of a voxel world: the fractional tick
//! clocks, the periodic block passes, break and update cascades, behaviour
//! dispatch and block inventories.

pub mod behavior;
pub mod blocks_controller;
pub mod chunk;
pub mod content;
pub mod error;
pub mod inventory;
pub mod level;
pub mod lighting;
pub mod ticks;

#[cfg(test)]
pub(crate) mod test_support;

pub use behavior::{BlockBehaviour, HookTable, NoBehaviour};
pub use blocks_controller::{BlockUpdateEngine, EngineConfig};
pub use error::{BlockError, ErrorKind};
pub use level::Level;
pub use ticks::{ClockError, TickClock};
