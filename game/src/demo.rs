//! Small scene that exercises the loop: a keyboard-driven paddle, bouncing
//! balls and a crosshair that follows the mouse.

use backend::{Color, Keycode, Rect, Surface, System};
use engine::{Game, GameObject, MouseButton, MouseEvent, ObjectId, Platform, Position};
use log::info;
use std::cell::RefCell;
use std::rc::Rc;

const PADDLE_STEP: i32 = 20;
const BALL_SIZE: u32 = 12;

pub struct Paddle {
    rect: Rect,
    max_x: i32,
}

impl Paddle {
    pub fn new(width: u32, height: u32) -> Self {
        let w = 100;
        let max_x = width.saturating_sub(w) as i32;
        Self {
            rect: Rect::new(max_x / 2, height as i32 - 40, w, 16),
            max_x,
        }
    }

    pub fn nudge(&mut self, dx: i32) {
        self.rect.x = (self.rect.x + dx).clamp(0, self.max_x);
    }
}

impl GameObject<Surface> for Paddle {
    fn update(&mut self) {}

    fn draw(&self, surface: &mut Surface) {
        surface.fill_rect(self.rect, Color::rgb(230, 230, 240));
    }
}

pub struct Ball {
    x: i32,
    y: i32,
    vx: i32,
    vy: i32,
    bounds: (u32, u32),
    color: Color,
}

impl Ball {
    pub fn new(pos: Position, bounds: (u32, u32), seed: usize) -> Self {
        let palette = [
            Color::rgb(255, 90, 90),
            Color::rgb(90, 200, 255),
            Color::rgb(255, 210, 80),
            Color::rgb(130, 255, 130),
        ];
        let vx = if seed % 2 == 0 { 4 } else { -4 };
        Self {
            x: pos.x,
            y: pos.y,
            vx,
            vy: -3,
            bounds,
            color: palette[seed % palette.len()],
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    fn step_axis(pos: i32, vel: i32, limit: i32) -> (i32, i32) {
        let next = pos + vel;
        if next < 0 {
            (-next, -vel)
        } else if next > limit {
            (2 * limit - next, -vel)
        } else {
            (next, vel)
        }
    }
}

impl GameObject<Surface> for Ball {
    fn update(&mut self) {
        let max_x = self.bounds.0.saturating_sub(BALL_SIZE) as i32;
        let max_y = self.bounds.1.saturating_sub(BALL_SIZE) as i32;
        (self.x, self.vx) = Self::step_axis(self.x, self.vx, max_x);
        (self.y, self.vy) = Self::step_axis(self.y, self.vy, max_y);
    }

    fn draw(&self, surface: &mut Surface) {
        surface.fill_rect(Rect::new(self.x, self.y, BALL_SIZE, BALL_SIZE), self.color);
    }
}

#[derive(Default)]
pub struct Crosshair {
    pos: Position,
}

impl GameObject<Surface> for Crosshair {
    fn update(&mut self) {}

    fn draw(&self, surface: &mut Surface) {
        let color = Color::rgba(255, 255, 255, 160);
        surface.fill_rect(Rect::new(self.pos.x - 8, self.pos.y, 17, 1), color);
        surface.fill_rect(Rect::new(self.pos.x, self.pos.y - 8, 1, 17), color);
    }
}

/// Register the demo objects and input handlers.
///
/// Left/Right move the paddle, Space or a left click spawns a ball, a right
/// click removes the newest ball and Escape ends the loop.
pub fn populate(game: &mut Game<System>) {
    let (width, height) = game.platform_mut().surface_size();

    let (_, paddle) = game.spawn(Paddle::new(width, height));
    let (_, crosshair) = game.spawn(Crosshair::default());
    let balls: Rc<RefCell<Vec<ObjectId>>> = Rc::default();

    let spawn_ball = {
        let commands = game.commands();
        let balls = balls.clone();
        move |pos: Position| {
            let seed = balls.borrow().len();
            let (id, _) = commands.spawn(Ball::new(pos, (width, height), seed));
            balls.borrow_mut().push(id);
        }
    };
    spawn_ball(Position::new(width as i32 / 2, height as i32 / 2));

    for (key, dx) in [(Keycode::Left, -PADDLE_STEP), (Keycode::Right, PADDLE_STEP)] {
        let paddle = paddle.clone();
        game.on_key_down(key, move |_| paddle.borrow_mut().nudge(dx));
    }

    let stop = game.stop_handle();
    game.on_key_down(Keycode::Escape, move |_| stop.stop());

    let centre = spawn_ball.clone();
    game.on_key_down(Keycode::Space, move |_| {
        centre(Position::new(width as i32 / 2, height as i32 / 2))
    });

    let commands = game.commands();
    game.on_mouse(move |kind, pos| match kind {
        MouseEvent::Motion => crosshair.borrow_mut().pos = pos,
        MouseEvent::ButtonDown(MouseButton::Left) => spawn_ball(pos),
        MouseEvent::ButtonDown(MouseButton::Right) => {
            if let Some(id) = balls.borrow_mut().pop() {
                commands.remove(id);
            }
        }
        _ => {}
    });

    info!(
        "demo scene ready: {} objects, {} pending",
        game.objects().len(),
        game.commands().pending()
    );
}
