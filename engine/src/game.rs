use crate::clock::FrameClock;
use crate::config::GameSettings;
use crate::error::{EngineError, Result};
use crate::event::{MouseEvent, Position};
use crate::handlers::{Dispatch, HandlerRegistry};
use crate::objects::{GameObject, ObjectId, ObjectRegistry, SceneCommands, SharedObject};
use crate::platform::Platform;
use log::{debug, info, trace};
use std::cell::{Cell, RefCell};
use std::process;
use std::rc::Rc;

/// Termination flag shared with handlers and objects. Once stopped it stays
/// stopped; `run` returns at the next iteration boundary.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

/// Result of one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// A quit event was seen. The rest of the frame was skipped.
    Quit,
}

pub struct Game<P: Platform> {
    background: P::Image,
    frame_rate: u32,
    stop: StopHandle,
    objects: ObjectRegistry<P::Surface>,
    handlers: HandlerRegistry<P::Key>,
    clock: FrameClock,
    platform: P,
}

impl<P: Platform> Game<P> {
    /// Build a ready-to-run loop context on a platform opened with the same
    /// settings. Fails on invalid settings, on a display surface of another
    /// size, or when the background cannot be loaded.
    pub fn new(settings: GameSettings, mut platform: P) -> Result<Self> {
        settings.validate()?;
        let surface_size = platform.surface_size();
        if surface_size != (settings.width, settings.height) {
            return Err(EngineError::Init(format!(
                "display surface is {}x{}, settings ask for {}x{}",
                surface_size.0, surface_size.1, settings.width, settings.height
            )));
        }
        let background = platform.load_image(&settings.background)?;
        info!(
            "game '{}' ready: {}x{} at {} fps, key-up routing {:?}",
            settings.caption,
            settings.width,
            settings.height,
            settings.frame_rate,
            settings.key_up_routing
        );

        Ok(Self {
            background,
            frame_rate: settings.frame_rate,
            stop: StopHandle::default(),
            objects: ObjectRegistry::new(),
            handlers: HandlerRegistry::new(settings.key_up_routing),
            clock: FrameClock::new(),
            platform,
        })
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_over(&self) -> bool {
        self.stop.is_stopped()
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn objects(&self) -> &ObjectRegistry<P::Surface> {
        &self.objects
    }

    pub fn commands(&self) -> SceneCommands<P::Surface> {
        self.objects.commands()
    }

    pub fn add_object(&mut self, object: SharedObject<P::Surface>) -> ObjectId {
        self.objects.add(object)
    }

    pub fn spawn<T>(&mut self, object: T) -> (ObjectId, Rc<RefCell<T>>)
    where
        T: GameObject<P::Surface> + 'static,
    {
        self.objects.spawn(object)
    }

    pub fn remove_object(&mut self, id: ObjectId) -> Option<SharedObject<P::Surface>> {
        self.objects.remove(id)
    }

    pub fn clear_objects(&mut self) {
        self.objects.clear();
    }

    pub fn on_key_down(&mut self, key: P::Key, handler: impl FnMut(P::Key) + 'static) {
        debug!("key-down handler registered for {key:?}");
        self.handlers.on_key_down(key, handler);
    }

    pub fn on_key_up(&mut self, key: P::Key, handler: impl FnMut(P::Key) + 'static) {
        debug!("key-up handler registered for {key:?}");
        self.handlers.on_key_up(key, handler);
    }

    pub fn on_mouse(&mut self, handler: impl FnMut(MouseEvent, Position) + 'static) {
        self.handlers.on_mouse(handler);
    }

    pub fn update(&mut self) {
        self.objects.update();
    }

    pub fn draw(&mut self) {
        self.objects.draw(self.platform.surface());
    }

    /// Drain the platform's event queue once, routing each event to its
    /// handlers in queue order. Stops at the first quit event.
    pub fn handle_events(&mut self) -> Flow {
        for event in self.platform.poll_events() {
            if let Dispatch::Quit = self.handlers.dispatch(&event) {
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    /// One iteration: background, events, update, draw, deferred registry
    /// changes, present, throttle. Returns early on quit.
    pub fn frame(&mut self) -> Flow {
        self.platform.blit_background(&self.background);

        if self.handle_events() == Flow::Quit {
            return Flow::Quit;
        }
        self.update();
        self.draw();

        let applied = self.objects.apply_pending();
        if applied > 0 {
            trace!("{applied} deferred registry changes applied");
        }

        self.platform.present();
        self.clock.tick(self.frame_rate);
        Flow::Continue
    }

    /// Run until the stop flag is set, then return with the window still
    /// open. A quit event shuts the platform down and exits the process with
    /// status 0 without returning.
    pub fn run(&mut self) {
        info!("entering main loop");
        while !self.stop.is_stopped() {
            if self.frame() == Flow::Quit {
                info!("quit requested after {} frames", self.clock.frame_count());
                self.platform.shutdown();
                process::exit(0);
            }
        }
        info!(
            "main loop stopped after {} frames ({:.1} fps)",
            self.clock.frame_count(),
            self.clock.fps()
        );
    }
}
