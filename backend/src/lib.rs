//! SDL2 + OpenGL platform for the engine: window, audio/video subsystems,
//! event translation, texture loading and the 2D display surface.

pub mod error;
pub mod glutils;
pub mod math;
pub mod shaders;
pub mod surface;
pub mod system;

pub use error::BackendError;
pub use glutils::Texture;
pub use math::{Color, Rect};
pub use surface::Surface;
pub use system::System;

pub use sdl2::keyboard::Keycode;
