//! Query controller actor.
//!
//! The controller is the central state machine: it reacts to free-text
//! input, filter changes, and scroll-triggered pagination, resolves the
//! effective query, and applies fetch outcomes to the result state. It
//! runs as an actor processing commands sequentially, so all state
//! mutation is serialized while network fetches overlap freely.

pub mod actor;
pub mod commands;
pub mod core;
pub mod handle;

pub use self::actor::spawn_query_controller;
pub use self::commands::{ControllerPhase, QueryControllerCommand, SearchSnapshot};
pub use self::core::QueryController;
pub use self::handle::QueryControllerHandle;
