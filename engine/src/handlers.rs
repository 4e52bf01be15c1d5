use crate::config::KeyUpRouting;
use crate::event::{IoEvent, MouseEvent, Position};
use log::trace;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

pub type KeyHandler<K> = Box<dyn FnMut(K)>;
pub type MouseHandler = Box<dyn FnMut(MouseEvent, Position)>;

/// Outcome of routing one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The platform asked to quit; nothing was invoked.
    Quit,
    /// Number of handlers invoked, possibly zero.
    Handled(usize),
    /// Event kind the loop does not route.
    Ignored,
}

/// Key-press, key-release and mouse callbacks, each list kept in
/// registration order.
///
/// Lookups for keys without handlers fall back to an empty list without
/// inserting anything into the maps.
pub struct HandlerRegistry<K> {
    key_down: HashMap<K, Vec<KeyHandler<K>>>,
    key_up: HashMap<K, Vec<KeyHandler<K>>>,
    mouse: Vec<MouseHandler>,
    key_up_routing: KeyUpRouting,
}

impl<K> HandlerRegistry<K>
where
    K: Copy + Eq + Hash + Debug,
{
    pub fn new(key_up_routing: KeyUpRouting) -> Self {
        Self {
            key_down: HashMap::new(),
            key_up: HashMap::new(),
            mouse: Vec::new(),
            key_up_routing,
        }
    }

    pub fn on_key_down(&mut self, key: K, handler: impl FnMut(K) + 'static) {
        self.key_down.entry(key).or_default().push(Box::new(handler));
    }

    /// Register a release callback. Under [`KeyUpRouting::PressHandlers`]
    /// it is stored but never invoked.
    pub fn on_key_up(&mut self, key: K, handler: impl FnMut(K) + 'static) {
        self.key_up.entry(key).or_default().push(Box::new(handler));
    }

    pub fn on_mouse(&mut self, handler: impl FnMut(MouseEvent, Position) + 'static) {
        self.mouse.push(Box::new(handler));
    }

    pub fn key_down_count(&self, key: &K) -> usize {
        self.key_down.get(key).map_or(0, Vec::len)
    }

    pub fn key_up_count(&self, key: &K) -> usize {
        self.key_up.get(key).map_or(0, Vec::len)
    }

    pub fn mouse_count(&self) -> usize {
        self.mouse.len()
    }

    /// Key entries across the press and release maps.
    pub fn registered_keys(&self) -> usize {
        self.key_down.len() + self.key_up.len()
    }

    pub fn dispatch(&mut self, event: &IoEvent<K>) -> Dispatch {
        match event {
            IoEvent::Quit => Dispatch::Quit,
            IoEvent::KeyDown(key) => {
                trace!("key down {key:?}");
                Dispatch::Handled(Self::fire(&mut self.key_down, *key))
            }
            IoEvent::KeyUp(key) => {
                trace!("key up {key:?} routed to {:?}", self.key_up_routing);
                let map = match self.key_up_routing {
                    KeyUpRouting::PressHandlers => &mut self.key_down,
                    KeyUpRouting::ReleaseHandlers => &mut self.key_up,
                };
                Dispatch::Handled(Self::fire(map, *key))
            }
            IoEvent::Mouse { kind, pos } => {
                trace!("mouse {kind:?} at ({}, {})", pos.x, pos.y);
                for handler in self.mouse.iter_mut() {
                    handler(*kind, *pos);
                }
                Dispatch::Handled(self.mouse.len())
            }
            IoEvent::Other => Dispatch::Ignored,
        }
    }

    fn fire(map: &mut HashMap<K, Vec<KeyHandler<K>>>, key: K) -> usize {
        match map.get_mut(&key) {
            Some(handlers) => {
                for handler in handlers.iter_mut() {
                    handler(key);
                }
                handlers.len()
            }
            None => 0,
        }
    }
}

impl<K> Default for HandlerRegistry<K>
where
    K: Copy + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new(KeyUpRouting::default())
    }
}
