//! Widget events and per-widget event queues.
//!
//! Events bubble bottom-up: a widget enqueues onto its own queue, and
//! during the propagation phase a parent that opts in drains each child's
//! queue, transforming or dropping each event before re-enqueueing it on
//! itself. Queues are cleared tree-wide once per frame after update, so
//! an event not re-enqueued does not survive into the next frame.

use std::collections::VecDeque;

use super::tree::WidgetId;

/// An event produced by a widget.
///
/// The originating widget is carried in the payload because events are
/// re-enqueued up the tree: by the time an ancestor sees one, the queue
/// it sits in no longer identifies the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A button was activated.
    ButtonPressed(WidgetId),
    /// A continuous value (slider, scrollbar) changed.
    ValueChanged { widget: WidgetId, value: f64 },
    /// A text entry was committed.
    TextCommitted { widget: WidgetId, text: String },
    /// A closable widget (popup, panel) asked to close.
    Closed(WidgetId),
    /// An application-defined event.
    Custom(String),
}

/// A FIFO event buffer owned by exactly one widget.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn enqueue(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Remove and return the oldest event.
    pub fn dequeue(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Remove and return all queued events, oldest first.
    pub fn drain_all(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    /// Drop all queued events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Number of queued events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate without draining.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut q = EventQueue::new();
        q.enqueue(Event::Custom("a".into()));
        q.enqueue(Event::Custom("b".into()));

        assert_eq!(q.len(), 2);
        assert_eq!(q.dequeue(), Some(Event::Custom("a".into())));
        assert_eq!(q.dequeue(), Some(Event::Custom("b".into())));
        assert_eq!(q.dequeue(), None);
    }

    #[test]
    fn test_drain_all_empties() {
        let mut q = EventQueue::new();
        q.enqueue(Event::Custom("a".into()));
        q.enqueue(Event::Custom("b".into()));

        let drained = q.drain_all();
        assert_eq!(drained.len(), 2);
        assert!(q.is_empty());
    }
}
