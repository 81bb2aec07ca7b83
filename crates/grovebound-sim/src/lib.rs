//! Boss encounter and session simulation.
//!
//! Everything here is driven by explicit `now` timestamps in milliseconds;
//! nothing reads a clock.

pub mod boss;
pub mod charge;
pub mod enemy;
pub mod entity;
pub mod events;
pub mod floating;
pub mod hazard;
pub mod player;
pub mod projectile;
pub mod session;

pub use boss::Boss;
pub use hazard::{HazardField, HazardTarget, SlowingHazard};
pub use session::{Outcome, PlayerInput, Session, Stage};
