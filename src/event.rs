// RelSim: AS-Level Route Propagation Simulator written in Rust
// Copyright (C) 2022-2023 Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Module for defining events and the event queue.
//!
//! The propagation driver keeps the pending advertisements as first-class events on an
//! explicit queue, so that the control flow is inspectable and testable. The default queue
//! is the FIFO [`BasicEventQueue`]; a FIFO drain is required for reproducible outcomes.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::{route::Route, types::AsNum};

/// Event to handle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// A pending route advertisement. The last element of the route's path is the router
    /// that must consider the route.
    Advertise(Route),
}

impl Event {
    /// The route carried by this event.
    pub fn route(&self) -> &Route {
        match self {
            Event::Advertise(route) => route,
        }
    }

    /// The router where the event is processed.
    pub fn router(&self) -> AsNum {
        match self {
            Event::Advertise(route) => route.holder(),
        }
    }
}

/// Interface of an event queue.
pub trait EventQueue {
    /// Enqueue a new event.
    fn push(&mut self, event: Event);

    /// Pop the next event.
    fn pop(&mut self) -> Option<Event>;

    /// Peek the next event.
    fn peek(&self) -> Option<&Event>;

    /// Get the number of enqueued events.
    fn len(&self) -> usize;

    /// Return `true` if no event is enqueued.
    fn is_empty(&self) -> bool;

    /// Remove all events from the queue.
    fn clear(&mut self);
}

/// Basic event queue
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicEventQueue(pub(crate) VecDeque<Event>);

impl BasicEventQueue {
    /// Create a new empty event queue
    pub fn new() -> Self {
        Self(VecDeque::new())
    }
}

impl EventQueue for BasicEventQueue {
    fn push(&mut self, event: Event) {
        self.0.push_back(event)
    }

    fn pop(&mut self) -> Option<Event> {
        self.0.pop_front()
    }

    fn peek(&self) -> Option<&Event> {
        self.0.front()
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn clear(&mut self) {
        self.0.clear()
    }
}
