//! The quit path of `Game::run` ends the process, so it runs in a child copy
//! of this test binary and the parent inspects its output and exit status.

use engine::{Game, GameObject, GameSettings, IoEvent, Platform, Result};
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

const CHILD_ENV: &str = "ENGINE_QUIT_EXIT_CHILD";

fn say(line: &str) {
    let mut out = std::io::stdout();
    writeln!(out, "{line}").unwrap();
    out.flush().unwrap();
}

struct QuitPlatform {
    events: Vec<IoEvent<u8>>,
    surface: (),
}

impl Platform for QuitPlatform {
    type Key = u8;
    type Surface = ();
    type Image = PathBuf;

    fn load_image(&mut self, path: &Path) -> Result<PathBuf> {
        Ok(path.to_path_buf())
    }

    fn poll_events(&mut self) -> Vec<IoEvent<u8>> {
        std::mem::take(&mut self.events)
    }

    fn blit_background(&mut self, _image: &PathBuf) {}

    fn surface(&mut self) -> &mut () {
        &mut self.surface
    }

    fn surface_size(&self) -> (u32, u32) {
        (64, 48)
    }

    fn present(&mut self) {
        say("present");
    }

    fn shutdown(&mut self) {
        say("platform shutdown");
    }
}

struct Loud;

impl GameObject<()> for Loud {
    fn update(&mut self) {
        say("update");
    }

    fn draw(&self, _surface: &mut ()) {
        say("draw");
    }
}

#[test]
fn run_quit_child() {
    if env::var_os(CHILD_ENV).is_none() {
        return;
    }
    let platform = QuitPlatform {
        events: vec![IoEvent::KeyDown(1), IoEvent::Quit],
        surface: (),
    };
    let settings = GameSettings::new("quit", 64, 48, "bg.png", 60);
    let mut game = Game::new(settings, platform).unwrap();
    game.spawn(Loud);
    game.run();
    say("run returned");
}

#[test]
fn quit_shuts_down_and_exits_with_success() {
    let output = Command::new(env::current_exe().unwrap())
        .args(["run_quit_child", "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0), "stdout: {stdout}");
    assert!(stdout.contains("platform shutdown"), "stdout: {stdout}");
    assert!(!stdout.contains("update"), "stdout: {stdout}");
    assert!(!stdout.contains("draw"), "stdout: {stdout}");
    assert!(!stdout.contains("present"), "stdout: {stdout}");
    assert!(!stdout.contains("run returned"), "stdout: {stdout}");
}
