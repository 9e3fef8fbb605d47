//! `EventQueue` — pending events ordered by due time.
//!
//! `BTreeMap` keyed by due time with a FIFO bucket per instant.  Insert and
//! pop are O(log T) where T is the number of distinct due times enqueued,
//! and events due at the same instant come out in insertion order, which
//! keeps every run reproducible.

use std::collections::{BTreeMap, VecDeque};

use rail_core::SimTime;

use crate::Event;

#[derive(Default, Debug)]
pub struct EventQueue {
    inner: BTreeMap<SimTime, VecDeque<Event>>,
    /// Cached total event count for O(1) `len()`.
    total: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` at its own due time.
    pub fn push(&mut self, event: Event) {
        self.inner.entry(event.time).or_default().push_back(event);
        self.total += 1;
    }

    /// Remove and return the earliest-due event, or `None` if empty.
    pub fn pop(&mut self) -> Option<Event> {
        let mut bucket = self.inner.first_entry()?;
        let event = bucket.get_mut().pop_front();
        if bucket.get().is_empty() {
            bucket.remove();
        }
        if event.is_some() {
            self.total -= 1;
        }
        event
    }

    /// Due time of the earliest pending event, or `None` if empty.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }

    /// Pending events in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &Event> + '_ {
        self.inner.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
