//! Platform-independent core of the game loop.
//!
//! [`Game`] owns the render-ordered object list, the key and mouse handler
//! registries and the frame clock, and drives a [`Platform`] through the
//! fixed sequence background, events, update, draw, present, throttle.

pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod game;
pub mod handlers;
pub mod objects;
pub mod platform;

pub use clock::FrameClock;
pub use config::{GameSettings, KeyUpRouting};
pub use error::{EngineError, Result};
pub use event::{IoEvent, MouseButton, MouseEvent, Position};
pub use game::{Flow, Game, StopHandle};
pub use handlers::{Dispatch, HandlerRegistry};
pub use objects::{GameObject, ObjectId, ObjectRegistry, SceneCommands, SharedObject};
pub use platform::Platform;
