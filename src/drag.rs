//! Press → move* → release tracking.
//!
//! A [`DragSession`] is opened by a tool on a primary-button press. It holds a
//! [`Subscription`] to the pointer channel for as long as the button is down, feeds
//! every move to its [`DragHandler`] in arrival order, and on release gives the
//! subscription back before running the end callback exactly once.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::document::Document;
use crate::input::InputLocation;

/// The pointer input source. Tracks how many drag listeners are attached.
#[derive(Debug, Clone, Default)]
pub struct PointerChannel {
    listeners: Rc<Cell<usize>>,
}

impl PointerChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a move + release listener pair. Detached when the handle is released or dropped.
    pub fn subscribe(&self) -> Subscription {
        self.listeners.set(self.listeners.get() + 1);
        Subscription {
            listeners: Rc::clone(&self.listeners),
            active: true,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.get()
    }
}

/// Handle for an attached listener pair.
#[derive(Debug)]
pub struct Subscription {
    listeners: Rc<Cell<usize>>,
    active: bool,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Detaches the listeners. Further calls do nothing.
    pub fn release(&mut self) {
        if self.active {
            self.active = false;
            self.listeners.set(self.listeners.get().saturating_sub(1));
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

/// Callbacks a tool supplies when it opens a drag session.
pub trait DragHandler {
    /// Called once per pointer move while the button is held.
    fn on_move(&mut self, location: &InputLocation, doc: &mut Document);

    /// Called for elapsed time while the session is open. Most tools ignore it.
    fn on_tick(&mut self, _elapsed: Duration, _doc: &mut Document) {}

    /// Called once, after the last move, when the button is released.
    fn on_end(&mut self, _location: &InputLocation, _doc: &mut Document) {}
}

/// Adapts a pair of closures to [`DragHandler`].
pub struct Callbacks<M, E> {
    on_move: M,
    on_end: Option<E>,
}

impl<M, E> DragHandler for Callbacks<M, E>
where
    M: FnMut(&InputLocation, &mut Document),
    E: FnOnce(&InputLocation, &mut Document),
{
    fn on_move(&mut self, location: &InputLocation, doc: &mut Document) {
        (self.on_move)(location, doc);
    }

    fn on_end(&mut self, location: &InputLocation, doc: &mut Document) {
        if let Some(on_end) = self.on_end.take() {
            on_end(location, doc);
        }
    }
}

pub struct DragSession {
    subscription: Subscription,
    handler: Box<dyn DragHandler>,
    moves: usize,
}

impl std::fmt::Debug for DragSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragSession")
            .field("subscription", &self.subscription)
            .field("moves", &self.moves)
            .finish_non_exhaustive()
    }
}

impl DragSession {
    /// Opens a session: subscribes to `channel` and keeps `handler` until release.
    pub fn start(channel: &PointerChannel, handler: Box<dyn DragHandler>) -> Self {
        Self {
            subscription: channel.subscribe(),
            handler,
            moves: 0,
        }
    }

    /// Opens a session from a move closure and an optional end closure.
    pub fn from_callbacks<M, E>(channel: &PointerChannel, on_move: M, on_end: Option<E>) -> Self
    where
        M: FnMut(&InputLocation, &mut Document) + 'static,
        E: FnOnce(&InputLocation, &mut Document) + 'static,
    {
        Self::start(channel, Box::new(Callbacks { on_move, on_end }))
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_active()
    }

    /// Number of moves delivered so far.
    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn handle_move(&mut self, location: &InputLocation, doc: &mut Document) {
        if self.is_active() {
            self.moves += 1;
            self.handler.on_move(location, doc);
        }
    }

    pub fn tick(&mut self, elapsed: Duration, doc: &mut Document) {
        if self.is_active() {
            self.handler.on_tick(elapsed, doc);
        }
    }

    /// Closes the session. Listeners are detached before the end callback runs.
    pub fn finish(mut self, location: &InputLocation, doc: &mut Document) {
        self.subscription.release();
        self.handler.on_end(location, doc);
        log::debug!("drag session finished after {} moves", self.moves);
    }
}
