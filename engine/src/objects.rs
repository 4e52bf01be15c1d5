//! Render-ordered registry of game objects.
//!
//! Registry order is update order is draw order: later entries draw over
//! earlier ones. Changes requested through [`SceneCommands`] while a frame is
//! running are deferred until [`ObjectRegistry::apply_pending`], which the
//! loop calls after drawing and before presenting.

use log::debug;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Anything the loop can update and draw onto a surface of type `S`.
pub trait GameObject<S: ?Sized> {
    fn update(&mut self);
    fn draw(&self, surface: &mut S);
}

pub type SharedObject<S> = Rc<RefCell<dyn GameObject<S>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

enum Change<S: ?Sized> {
    Add(ObjectId, SharedObject<S>),
    Remove(ObjectId),
    Clear,
}

struct Queue<S: ?Sized> {
    next_id: u64,
    pending: Vec<Change<S>>,
}

impl<S: ?Sized> Queue<S> {
    fn allocate(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Cloneable handle for requesting registry changes from inside handlers
/// and objects. Requests apply at the end of the current frame, in order.
pub struct SceneCommands<S: ?Sized> {
    queue: Rc<RefCell<Queue<S>>>,
}

impl<S: ?Sized> Clone for SceneCommands<S> {
    fn clone(&self) -> Self {
        Self {
            queue: self.queue.clone(),
        }
    }
}

impl<S: ?Sized> SceneCommands<S> {
    /// Queue `object` for insertion at the end of the render order. The id is
    /// valid immediately and can be used to queue its removal.
    pub fn add(&self, object: SharedObject<S>) -> ObjectId {
        let mut queue = self.queue.borrow_mut();
        let id = queue.allocate();
        queue.pending.push(Change::Add(id, object));
        id
    }

    pub fn spawn<T>(&self, object: T) -> (ObjectId, Rc<RefCell<T>>)
    where
        T: GameObject<S> + 'static,
    {
        let handle = Rc::new(RefCell::new(object));
        let id = self.add(handle.clone());
        (id, handle)
    }

    pub fn remove(&self, id: ObjectId) {
        self.queue.borrow_mut().pending.push(Change::Remove(id));
    }

    pub fn clear(&self) {
        self.queue.borrow_mut().pending.push(Change::Clear);
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }
}

pub struct ObjectRegistry<S: ?Sized> {
    entries: Vec<(ObjectId, SharedObject<S>)>,
    queue: Rc<RefCell<Queue<S>>>,
}

impl<S: ?Sized> ObjectRegistry<S> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            queue: Rc::new(RefCell::new(Queue {
                next_id: 0,
                pending: Vec::new(),
            })),
        }
    }

    pub fn commands(&self) -> SceneCommands<S> {
        SceneCommands {
            queue: self.queue.clone(),
        }
    }

    pub fn add(&mut self, object: SharedObject<S>) -> ObjectId {
        let id = self.queue.borrow_mut().allocate();
        self.entries.push((id, object));
        debug!("object {id} added, {} registered", self.entries.len());
        id
    }

    pub fn spawn<T>(&mut self, object: T) -> (ObjectId, Rc<RefCell<T>>)
    where
        T: GameObject<S> + 'static,
    {
        let handle = Rc::new(RefCell::new(object));
        let id = self.add(handle.clone());
        (id, handle)
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<SharedObject<S>> {
        let index = self.entries.iter().position(|(entry, _)| *entry == id)?;
        let (_, object) = self.entries.remove(index);
        debug!("object {id} removed, {} registered", self.entries.len());
        Some(object)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }

    /// Ids in render order.
    pub fn ids(&self) -> Vec<ObjectId> {
        self.entries.iter().map(|(id, _)| *id).collect()
    }

    pub fn get(&self, id: ObjectId) -> Option<&SharedObject<S>> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == id)
            .map(|(_, object)| object)
    }

    /// Panics if an object is already borrowed elsewhere, e.g. by an object
    /// reaching into itself through a shared handle.
    pub fn update(&mut self) {
        for (_, object) in &self.entries {
            object.borrow_mut().update();
        }
    }

    pub fn draw(&self, surface: &mut S) {
        for (_, object) in &self.entries {
            object.borrow().draw(surface);
        }
    }

    /// Apply queued changes in request order. Returns how many were applied.
    pub fn apply_pending(&mut self) -> usize {
        let pending = std::mem::take(&mut self.queue.borrow_mut().pending);
        let applied = pending.len();
        for change in pending {
            match change {
                Change::Add(id, object) => {
                    self.entries.push((id, object));
                    debug!("deferred add of object {id}");
                }
                Change::Remove(id) => {
                    if self.remove(id).is_none() {
                        debug!("deferred remove of unknown object {id}");
                    }
                }
                Change::Clear => self.clear(),
            }
        }
        applied
    }
}

impl<S: ?Sized> Default for ObjectRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}
