//! Land Raider: headless core of a side-scrolling arcade shooter.
//!
//! The player's ground vehicle moves along the bottom of the screen, aims a
//! laser and a turret, and fights off waves of aircraft until the remaining
//! distance runs out.  The core is a pure frame function: feed it an
//! [`input::InputSnapshot`] and a clock reading, get back the next
//! [`entities::Session`] plus draw commands and sound events.

pub mod assets;
pub mod combat;
pub mod compute;
pub mod constants;
pub mod enemies;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod input;
pub mod progression;
pub mod render;
pub mod stats;
pub mod timer;
pub mod weapons;

pub use compute::{advance_frame, initialize_session, Frame};
pub use error::{GameError, GameResult};
