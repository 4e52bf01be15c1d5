/// Cursor position in window pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    X1,
    X2,
    Unknown,
}

/// Kind of mouse event handed to mouse handlers together with the cursor
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEvent {
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
    Motion,
}

/// Input event as delivered by the platform's event queue.
///
/// `K` is the platform's key identifier. Anything the loop does not route
/// (wheel, window, controller, key repeats) arrives as `Other` and is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoEvent<K> {
    Quit,
    KeyDown(K),
    KeyUp(K),
    Mouse { kind: MouseEvent, pos: Position },
    Other,
}

impl<K> IoEvent<K> {
    pub fn mouse(kind: MouseEvent, x: i32, y: i32) -> Self {
        IoEvent::Mouse {
            kind,
            pos: Position::new(x, y),
        }
    }
}
