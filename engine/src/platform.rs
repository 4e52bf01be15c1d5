use crate::error::Result;
use crate::event::IoEvent;
use std::fmt::Debug;
use std::hash::Hash;
use std::path::Path;

/// Windowing, input and graphics services the loop runs on top of.
pub trait Platform {
    /// Key identifier carried by key events and used to look up handlers.
    type Key: Copy + Eq + Hash + Debug;
    /// Display surface handed to every object's `draw`.
    type Surface;
    type Image;

    fn load_image(&mut self, path: &Path) -> Result<Self::Image>;

    /// Drain every event queued since the previous call.
    fn poll_events(&mut self) -> Vec<IoEvent<Self::Key>>;

    /// Paint `image` at the top-left origin, replacing the previous frame.
    fn blit_background(&mut self, image: &Self::Image);

    fn surface(&mut self) -> &mut Self::Surface;

    /// Size of the display surface in pixels.
    fn surface_size(&self) -> (u32, u32);

    /// Show the rendered frame on the physical display.
    fn present(&mut self);

    /// Tear down the graphics subsystem ahead of a hard exit.
    fn shutdown(&mut self);
}
