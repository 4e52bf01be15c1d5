use engine::{
    EngineError, Flow, Game, GameObject, GameSettings, IoEvent, KeyUpRouting, MouseButton,
    MouseEvent, Platform, Position, Result, StopHandle,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;

type Log = Rc<RefCell<Vec<String>>>;

/// In-memory platform: events are scripted per frame and every call is
/// appended to a shared log.
struct FakePlatform {
    log: Log,
    frames: VecDeque<Vec<IoEvent<char>>>,
    surface: Vec<String>,
    size: (u32, u32),
}

impl FakePlatform {
    fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            frames: VecDeque::new(),
            surface: Vec::new(),
            size: (320, 240),
        }
    }

    fn script(mut self, frame: Vec<IoEvent<char>>) -> Self {
        self.frames.push_back(frame);
        self
    }
}

impl Platform for FakePlatform {
    type Key = char;
    type Surface = Vec<String>;
    type Image = PathBuf;

    fn load_image(&mut self, path: &Path) -> Result<PathBuf> {
        if path.extension().is_some_and(|ext| ext == "png") {
            Ok(path.to_path_buf())
        } else {
            Err(EngineError::resource_load(path, "unsupported format"))
        }
    }

    fn poll_events(&mut self) -> Vec<IoEvent<char>> {
        self.log.borrow_mut().push("poll".to_string());
        self.frames.pop_front().unwrap_or_default()
    }

    fn blit_background(&mut self, image: &PathBuf) {
        self.surface.clear();
        self.log
            .borrow_mut()
            .push(format!("background {}", image.display()));
    }

    fn surface(&mut self) -> &mut Vec<String> {
        &mut self.surface
    }

    fn surface_size(&self) -> (u32, u32) {
        self.size
    }

    fn present(&mut self) {
        let frame = self.surface.join(",");
        self.log.borrow_mut().push(format!("present [{frame}]"));
    }

    fn shutdown(&mut self) {
        self.log.borrow_mut().push("shutdown".to_string());
    }
}

struct Counter {
    name: &'static str,
    log: Log,
    updates: u32,
    stop_after: Option<(u32, StopHandle)>,
}

impl Counter {
    fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: log.clone(),
            updates: 0,
            stop_after: None,
        }
    }

    fn stopping_after(mut self, updates: u32, stop: StopHandle) -> Self {
        self.stop_after = Some((updates, stop));
        self
    }
}

impl GameObject<Vec<String>> for Counter {
    fn update(&mut self) {
        self.updates += 1;
        self.log.borrow_mut().push(format!("update {}", self.name));
        if let Some((limit, stop)) = &self.stop_after {
            if self.updates == *limit {
                stop.stop();
            }
        }
    }

    fn draw(&self, surface: &mut Vec<String>) {
        self.log.borrow_mut().push(format!("draw {}", self.name));
        surface.push(self.name.to_string());
    }
}

fn settings(frame_rate: u32) -> GameSettings {
    GameSettings::new("test", 320, 240, "bg.png", frame_rate)
}

fn count(log: &Log, entry: &str) -> usize {
    log.borrow().iter().filter(|e| e.as_str() == entry).count()
}

#[test]
fn construction_fails_on_bad_background() {
    let log = Log::default();
    let bad = GameSettings::new("test", 320, 240, "bg.tga", 30);
    let err = Game::new(bad, FakePlatform::new(&log)).err().unwrap();
    assert!(matches!(err, EngineError::ResourceLoad { .. }));
}

#[test]
fn construction_fails_on_invalid_settings() {
    let log = Log::default();
    let err = Game::new(settings(0), FakePlatform::new(&log)).err().unwrap();
    assert!(matches!(err, EngineError::InvalidSettings(_)));
}

#[test]
fn construction_fails_when_surface_size_differs() {
    let log = Log::default();
    let mut platform = FakePlatform::new(&log);
    platform.size = (640, 480);
    let err = Game::new(settings(30), platform).err().unwrap();
    assert!(matches!(err, EngineError::Init(msg) if msg.contains("640x480")));
}

#[test]
fn frame_runs_phases_in_order() {
    let log = Log::default();
    let mut game = Game::new(settings(1000), FakePlatform::new(&log)).unwrap();
    game.spawn(Counter::new("a", &log));
    game.spawn(Counter::new("b", &log));

    assert_eq!(game.frame(), Flow::Continue);
    assert_eq!(
        *log.borrow(),
        vec![
            "background bg.png",
            "poll",
            "update a",
            "update b",
            "draw a",
            "draw b",
            "present [a,b]",
        ]
    );
    assert_eq!(game.clock().frame_count(), 1);
}

#[test]
fn stop_during_update_finishes_the_frame_then_returns() {
    let log = Log::default();
    let mut game = Game::new(settings(30), FakePlatform::new(&log)).unwrap();
    let stop = game.stop_handle();
    let (_, counter) = game.spawn(Counter::new("a", &log).stopping_after(5, stop));

    game.run();

    assert_eq!(counter.borrow().updates, 5);
    assert_eq!(count(&log, "draw a"), 5);
    assert_eq!(count(&log, "present [a]"), 5);
    assert_eq!(game.clock().frame_count(), 5);
    assert!(game.is_over());
    // the window stays open on a graceful stop
    assert_eq!(count(&log, "shutdown"), 0);
}

#[test]
fn quit_skips_update_and_draw() {
    let log = Log::default();
    let platform = FakePlatform::new(&log).script(vec![IoEvent::KeyDown('x'), IoEvent::Quit]);
    let mut game = Game::new(settings(1000), platform).unwrap();
    game.spawn(Counter::new("a", &log));
    let seen = Rc::new(RefCell::new(0));
    let counter = seen.clone();
    game.on_key_down('x', move |_| *counter.borrow_mut() += 1);

    assert_eq!(game.frame(), Flow::Quit);
    assert_eq!(*seen.borrow(), 1);
    assert_eq!(count(&log, "update a"), 0);
    assert_eq!(count(&log, "draw a"), 0);
    assert!(log.borrow().iter().all(|e| !e.starts_with("present")));
}

#[test]
fn events_after_quit_are_not_dispatched() {
    let log = Log::default();
    let platform = FakePlatform::new(&log).script(vec![IoEvent::Quit, IoEvent::KeyDown('x')]);
    let mut game = Game::new(settings(1000), platform).unwrap();
    let seen = Rc::new(RefCell::new(0));
    let counter = seen.clone();
    game.on_key_down('x', move |_| *counter.borrow_mut() += 1);

    assert_eq!(game.handle_events(), Flow::Quit);
    assert_eq!(*seen.borrow(), 0);
}

#[test]
fn press_and_release_both_fire_press_handlers_by_default() {
    let log = Log::default();
    let platform = FakePlatform::new(&log).script(vec![
        IoEvent::KeyDown('k'),
        IoEvent::KeyUp('k'),
        IoEvent::KeyDown('u'),
    ]);
    let mut game = Game::new(settings(1000), platform).unwrap();
    let calls = Rc::new(RefCell::new(Vec::new()));
    for tag in ["h1", "h2"] {
        let calls = calls.clone();
        game.on_key_down('k', move |key| calls.borrow_mut().push(format!("{tag}:{key}")));
    }
    let released = calls.clone();
    game.on_key_up('k', move |_| released.borrow_mut().push("release".to_string()));

    assert_eq!(game.handle_events(), Flow::Continue);
    assert_eq!(*calls.borrow(), vec!["h1:k", "h2:k", "h1:k", "h2:k"]);
}

#[test]
fn release_routing_fires_release_handlers() {
    let log = Log::default();
    let platform = FakePlatform::new(&log).script(vec![IoEvent::KeyDown('k'), IoEvent::KeyUp('k')]);
    let settings = settings(1000).with_key_up_routing(KeyUpRouting::ReleaseHandlers);
    let mut game = Game::new(settings, platform).unwrap();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let pressed = calls.clone();
    game.on_key_down('k', move |_| pressed.borrow_mut().push("press"));
    let released = calls.clone();
    game.on_key_up('k', move |_| released.borrow_mut().push("release"));

    game.handle_events();
    assert_eq!(*calls.borrow(), vec!["press", "release"]);
}

#[test]
fn mouse_handlers_see_every_mouse_event_in_order() {
    let log = Log::default();
    let platform = FakePlatform::new(&log).script(vec![
        IoEvent::mouse(MouseEvent::ButtonDown(MouseButton::Left), 1, 2),
        IoEvent::Other,
        IoEvent::mouse(MouseEvent::ButtonUp(MouseButton::Left), 3, 4),
        IoEvent::mouse(MouseEvent::Motion, 5, 6),
    ]);
    let mut game = Game::new(settings(1000), platform).unwrap();
    let calls = Rc::new(RefCell::new(Vec::new()));
    for tag in ["m1", "m2"] {
        let calls = calls.clone();
        game.on_mouse(move |kind, pos| calls.borrow_mut().push((tag, kind, pos)));
    }

    game.handle_events();
    let calls = calls.borrow();
    assert_eq!(calls.len(), 6);
    assert_eq!(
        calls[0],
        ("m1", MouseEvent::ButtonDown(MouseButton::Left), Position::new(1, 2))
    );
    assert_eq!(
        calls[1],
        ("m2", MouseEvent::ButtonDown(MouseButton::Left), Position::new(1, 2))
    );
    assert_eq!(
        calls[2],
        ("m1", MouseEvent::ButtonUp(MouseButton::Left), Position::new(3, 4))
    );
    assert_eq!(calls[5], ("m2", MouseEvent::Motion, Position::new(5, 6)));
}

#[test]
fn handler_spawned_objects_appear_at_end_of_frame() {
    let log = Log::default();
    let platform = FakePlatform::new(&log)
        .script(vec![IoEvent::KeyDown(' ')])
        .script(vec![]);
    let mut game = Game::new(settings(1000), platform).unwrap();
    game.spawn(Counter::new("a", &log));
    let commands = game.commands();
    let spawn_log = log.clone();
    game.on_key_down(' ', move |_| {
        commands.spawn(Counter::new("b", &spawn_log));
    });

    game.frame();
    assert_eq!(count(&log, "update b"), 0);
    assert_eq!(count(&log, "present [a]"), 1);
    assert_eq!(game.objects().len(), 2);

    game.frame();
    assert_eq!(count(&log, "update b"), 1);
    assert_eq!(count(&log, "present [a,b]"), 1);
}

#[test]
fn removed_object_is_no_longer_drawn() {
    let log = Log::default();
    let mut game = Game::new(settings(1000), FakePlatform::new(&log)).unwrap();
    let (a, _) = game.spawn(Counter::new("a", &log));
    game.spawn(Counter::new("b", &log));

    assert!(game.remove_object(a).is_some());
    game.frame();
    assert_eq!(count(&log, "present [b]"), 1);
    assert_eq!(count(&log, "draw a"), 0);
}

#[test]
fn stop_flag_is_monotonic() {
    let log = Log::default();
    let game = Game::new(settings(1000), FakePlatform::new(&log)).unwrap();
    let stop = game.stop_handle();
    assert!(!game.is_over());
    stop.stop();
    stop.stop();
    assert!(game.is_over());
    assert!(game.stop_handle().is_stopped());
}
