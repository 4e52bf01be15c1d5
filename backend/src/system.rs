use crate::error::BackendError;
use crate::glutils::{self, Texture};
use crate::math::Color;
use crate::surface::Surface;
use engine::{GameSettings, IoEvent, MouseButton, MouseEvent, Platform};
use log::{info, warn};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton as SdlMouseButton;
use sdl2::video::GLProfile;
use std::path::Path;

/// SDL2 window with an OpenGL 3.3 core context, plus the audio subsystem and
/// the event pump.
pub struct System {
    // dropped before the GL context it was created in
    surface: Surface,
    pub w: u32,
    pub h: u32,
    pub window: sdl2::video::Window,
    pub gl_ctx: sdl2::video::GLContext,
    pub event_pump: sdl2::EventPump,
    pub audio_subsystem: sdl2::AudioSubsystem,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub sdl_context: sdl2::Sdl,
}

impl System {
    pub fn new(caption: &str, w: u32, h: u32) -> Result<System, BackendError> {
        let sdl_context = sdl2::init()?;
        let audio_subsystem = sdl_context.audio()?;
        let video_subsystem = sdl_context.video()?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(3, 3);

        let window = video_subsystem
            .window(caption, w, h)
            .opengl()
            .position_centered()
            .build()
            .map_err(|e| BackendError::Window(e.to_string()))?;

        let gl_ctx = window.gl_create_context()?;
        gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _);

        debug_assert_eq!(gl_attr.context_profile(), GLProfile::Core);
        debug_assert_eq!(gl_attr.context_version(), (3, 3));

        let event_pump = sdl_context.event_pump()?;
        glutils::log_opengl_info();
        let surface = Surface::new(w, h)?;
        info!("opened {w}x{h} window '{caption}'");

        Ok(System {
            surface,
            w,
            h,
            window,
            gl_ctx,
            event_pump,
            audio_subsystem,
            video_subsystem,
            sdl_context,
        })
    }

    /// Open the window described by `settings`.
    pub fn open(settings: &GameSettings) -> Result<System, BackendError> {
        System::new(&settings.caption, settings.width, settings.height)
    }
}

impl Platform for System {
    type Key = Keycode;
    type Surface = Surface;
    type Image = Texture;

    fn load_image(&mut self, path: &Path) -> engine::Result<Texture> {
        let texture = glutils::load_texture(path)?;
        if texture.width() < self.w || texture.height() < self.h {
            warn!(
                "{} is {}x{}, smaller than the {}x{} window",
                path.display(),
                texture.width(),
                texture.height(),
                self.w,
                self.h
            );
        }
        Ok(texture)
    }

    fn poll_events(&mut self) -> Vec<IoEvent<Keycode>> {
        self.event_pump.poll_iter().map(translate_event).collect()
    }

    fn blit_background(&mut self, image: &Texture) {
        self.surface.clear(Color::BLACK);
        self.surface.blit(image, 0, 0);
    }

    fn surface(&mut self) -> &mut Surface {
        &mut self.surface
    }

    fn surface_size(&self) -> (u32, u32) {
        self.surface.size()
    }

    fn present(&mut self) {
        self.window.gl_swap_window();
    }

    fn shutdown(&mut self) {
        info!("shutting down video and audio");
        self.window.hide();
        // the process exits right after, no SDL handle is used past this point
        unsafe { sdl2::sys::SDL_Quit() };
    }
}

/// Map an SDL event onto the engine's event model. Key repeats and
/// everything the loop does not route become `IoEvent::Other`.
pub fn translate_event(event: Event) -> IoEvent<Keycode> {
    match event {
        Event::Quit { .. } => IoEvent::Quit,
        Event::KeyDown {
            keycode: Some(key),
            repeat: false,
            ..
        } => IoEvent::KeyDown(key),
        Event::KeyUp {
            keycode: Some(key),
            repeat: false,
            ..
        } => IoEvent::KeyUp(key),
        Event::MouseButtonDown {
            mouse_btn, x, y, ..
        } => IoEvent::mouse(MouseEvent::ButtonDown(mouse_button(mouse_btn)), x, y),
        Event::MouseButtonUp {
            mouse_btn, x, y, ..
        } => IoEvent::mouse(MouseEvent::ButtonUp(mouse_button(mouse_btn)), x, y),
        Event::MouseMotion { x, y, .. } => IoEvent::mouse(MouseEvent::Motion, x, y),
        _ => IoEvent::Other,
    }
}

pub fn mouse_button(button: SdlMouseButton) -> MouseButton {
    match button {
        SdlMouseButton::Left => MouseButton::Left,
        SdlMouseButton::Middle => MouseButton::Middle,
        SdlMouseButton::Right => MouseButton::Right,
        SdlMouseButton::X1 => MouseButton::X1,
        SdlMouseButton::X2 => MouseButton::X2,
        SdlMouseButton::Unknown => MouseButton::Unknown,
    }
}
