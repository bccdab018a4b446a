//! A deterministic, tick-driven spaceship combat simulation core.
//!
//! Equipment descriptors are normalized into flat typed records
//! ([`records`]), wired into runtime [`hull::Hull`], [`shield::Shield`], and
//! [`weapon::Weapon`] state via [`contestant::Contestant`], and driven
//! through engagements by [`simulation::Simulation`]. The core is
//! single-threaded and free of clocks, randomness, and unordered iteration —
//! the same inputs always produce the same [`simulation::SimulationResult`].

pub mod catalog;
pub mod contestant;
pub mod damage;
pub mod error;
pub mod hull;
pub mod modifier;
pub mod records;
pub mod shield;
pub mod simulation;
pub mod weapon;

pub use catalog::Catalog;
pub use contestant::Contestant;
pub use damage::{Damage, DamageChannel, DamageResult};
pub use error::{Error, ReferenceKind, Result};
pub use hull::Hull;
pub use modifier::Modifier;
pub use shield::Shield;
pub use simulation::{Simulation, SimulationResult};
pub use weapon::{Weapon, WeaponState};
