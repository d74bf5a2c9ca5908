//! Observable, mutable rectangle.
//!
//! Every setter on [`MutableRectangle`] funnels through [`MutableRectangle::set`] (or the
//! private commit path behind it), which normalizes the bounds and notifies listeners
//! synchronously before returning.
//!
//! Listeners must not mutate the rectangle they observe from inside the callback;
//! they only receive a shared snapshot, and re-entrant mutation is not supported.
use std::fmt;

use super::rectangle::{Bounds, Rectangle};

/// Handle returned by [`MutableRectangle::add_listener`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type ChangeCallback<T> = Box<dyn FnMut(&Rectangle, &T) + Send>;

struct Listener<T> {
    id: ListenerId,
    token: T,
    callback: ChangeCallback<T>,
}

/// A rectangle that notifies registered listeners whenever its bounds change.
///
/// Each listener supplies an opaque token of type `T` which is handed back on every
/// notification.
pub struct MutableRectangle<T = ()> {
    bounds: Rectangle,
    listeners: Vec<Listener<T>>,
    next_id: u64,
}

impl<T> MutableRectangle<T> {
    /// Creates a rectangle from two corners given in any order.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::from_rectangle(Rectangle::new(x1, y1, x2, y2))
    }

    /// Creates a `width` x `height` rectangle anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::from_rectangle(Rectangle::from_size(width, height))
    }

    /// Creates an empty rectangle.
    pub fn empty() -> Self {
        Self::from_rectangle(Rectangle::EMPTY)
    }

    pub fn from_rectangle(bounds: Rectangle) -> Self {
        Self {
            bounds,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Current bounds as an immutable snapshot.
    pub fn as_rectangle(&self) -> Rectangle {
        self.bounds
    }

    /// Registers a change callback together with its token.
    pub fn add_listener<F>(&mut self, token: T, callback: F) -> ListenerId
    where
        F: FnMut(&Rectangle, &T) + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            token,
            callback: Box::new(callback),
        });
        id
    }

    /// Removes a listener, returning its token if it was registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> Option<T> {
        let pos = self.listeners.iter().position(|l| l.id == id)?;
        Some(self.listeners.remove(pos).token)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Sets both corners (in any order).
    pub fn set(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.commit(Rectangle::new(x1, y1, x2, y2));
    }

    /// Copies the bounds of `other`, including its emptiness.
    pub fn set_from(&mut self, other: &dyn Bounds) {
        self.commit(other.to_rectangle());
    }

    /// Sets the horizontal range, keeping the vertical one.
    pub fn set_x(&mut self, x1: f64, x2: f64) {
        let b = self.bounds;
        self.set(x1, b.min_y(), x2, b.max_y());
    }

    /// Sets the vertical range, keeping the horizontal one.
    pub fn set_y(&mut self, y1: f64, y2: f64) {
        let b = self.bounds;
        self.set(b.min_x(), y1, b.max_x(), y2);
    }

    pub fn set_min_x(&mut self, v: f64) {
        let b = self.bounds;
        self.set(v, b.min_y(), b.max_x(), b.max_y());
    }

    pub fn set_min_y(&mut self, v: f64) {
        let b = self.bounds;
        self.set(b.min_x(), v, b.max_x(), b.max_y());
    }

    pub fn set_max_x(&mut self, v: f64) {
        let b = self.bounds;
        self.set(b.min_x(), b.min_y(), v, b.max_y());
    }

    pub fn set_max_y(&mut self, v: f64) {
        let b = self.bounds;
        self.set(b.min_x(), b.min_y(), b.max_x(), v);
    }

    /// Resizes from the current minimum corner.
    pub fn set_size(&mut self, width: f64, height: f64) {
        let b = self.bounds;
        self.set(b.min_x(), b.min_y(), b.min_x() + width, b.min_y() + height);
    }

    /// Grows to cover `other`. An empty rectangle becomes exactly `other`.
    pub fn include(&mut self, other: &dyn Bounds) {
        if other.is_empty() {
            return;
        }
        if self.bounds.is_empty() {
            self.commit(other.to_rectangle());
        } else if !self.bounds.contains(other) {
            self.commit(self.bounds.including(other));
        }
    }

    /// Shrinks to the overlap with `other`.
    ///
    /// Returns `false` and leaves the rectangle untouched if it is already empty.
    /// Returns `false` and clears the rectangle if the two do not overlap.
    pub fn set_to_intersection(&mut self, other: &dyn Bounds) -> bool {
        if self.bounds.is_empty() {
            return false;
        }
        match self.bounds.intersection(other) {
            Some(overlap) => {
                self.commit(overlap);
                true
            }
            None => {
                self.clear();
                false
            }
        }
    }

    /// Makes the rectangle empty.
    pub fn clear(&mut self) {
        self.commit(Rectangle::EMPTY);
    }

    fn commit(&mut self, next: Rectangle) {
        if next == self.bounds {
            return;
        }
        self.bounds = next;
        for listener in &mut self.listeners {
            (listener.callback)(&self.bounds, &listener.token);
        }
    }
}

impl<T> Default for MutableRectangle<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Bounds for MutableRectangle<T> {
    fn min_x(&self) -> f64 {
        self.bounds.min_x()
    }

    fn min_y(&self) -> f64 {
        self.bounds.min_y()
    }

    fn max_x(&self) -> f64 {
        self.bounds.max_x()
    }

    fn max_y(&self) -> f64 {
        self.bounds.max_y()
    }

    fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    fn to_rectangle(&self) -> Rectangle {
        self.bounds
    }
}

impl<T> From<Rectangle> for MutableRectangle<T> {
    fn from(bounds: Rectangle) -> Self {
        Self::from_rectangle(bounds)
    }
}

impl<T> fmt::Debug for MutableRectangle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutableRectangle")
            .field("bounds", &self.bounds)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
