#![forbid(unsafe_code)]

//! Navigation requests queued by components for their owning manager.
//!
//! Components never reach into their manager directly. Inside a manager's
//! `interact` call they push requests here; the manager applies them, in
//! order, once the closure has returned.

use crate::component::ComponentId;

/// A navigation step asked for by a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavRequest {
    /// Close the requesting component.
    Close,
    /// Step back to the previous component of the stack.
    Previous,
    /// Step forward to the next component of the stack.
    Next,
}

/// FIFO of requests raised by one component.
#[derive(Debug, Clone)]
pub struct Requests {
    source: ComponentId,
    queue: Vec<NavRequest>,
}

impl Requests {
    /// Empty queue for requests raised by `source`.
    pub fn new(source: ComponentId) -> Self {
        Self {
            source,
            queue: Vec::new(),
        }
    }

    /// Component the requests originate from.
    #[inline]
    pub fn source(&self) -> ComponentId {
        self.source
    }

    pub fn push(&mut self, request: NavRequest) {
        self.queue.push(request);
    }

    pub fn close(&mut self) {
        self.push(NavRequest::Close);
    }

    pub fn previous(&mut self) {
        self.push(NavRequest::Previous);
    }

    pub fn next(&mut self) {
        self.push(NavRequest::Next);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Take every queued request in order.
    pub fn drain(&mut self) -> Vec<NavRequest> {
        std::mem::take(&mut self.queue)
    }
}
