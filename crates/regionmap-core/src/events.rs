// crates/regionmap-core/src/events.rs

//! # Selection Event Bridge
//!
//! The only way the engine talks to the rest of an application:
//!
//! - [`SelectionEvent`]: a region was clicked (polygon or label).
//! - [`DatasetReady`]: a dataset finished loading; listeners should drop any
//!   selection detail they still hold.
//!
//! Each topic is a broadcast: every live subscription gets its own FIFO
//! queue, backed by an unbounded `crossbeam-channel`. Dropping a
//! [`Subscription`] unsubscribes it.

use crate::model::Properties;
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::trace;

/// A region was activated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionEvent {
    /// Property mapping of the feature behind the clicked visual.
    pub properties: Properties,
    /// Whether the dataset is the top administrative level.
    pub is_boundary_level: bool,
}

/// A dataset reached the ready state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetReady {
    pub dataset: String,
}

struct Subscriber<T> {
    id: u64,
    sender: Sender<T>,
}

struct TopicInner<T> {
    subscribers: Vec<Subscriber<T>>,
    next_id: u64,
}

/// A typed broadcast channel.
///
/// Cloning a topic yields another handle to the same subscriber list.
pub struct Topic<T> {
    inner: Rc<RefCell<TopicInner<T>>>,
}

impl<T> Clone for Topic<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for Topic<T> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(TopicInner {
                subscribers: Vec::new(),
                next_id: 0,
            })),
        }
    }
}

impl<T: Clone> Topic<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription<T> {
        let (sender, receiver) = unbounded();
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push(Subscriber { id, sender });
        Subscription { id, receiver }
    }

    /// Removes a subscription explicitly. Dropping it has the same effect
    /// on the next publish.
    pub fn unsubscribe(&self, subscription: Subscription<T>) {
        self.inner
            .borrow_mut()
            .subscribers
            .retain(|s| s.id != subscription.id);
    }

    /// Sends `event` to every live subscriber and returns how many got it.
    pub fn publish(&self, event: T) -> usize {
        let mut inner = self.inner.borrow_mut();
        inner
            .subscribers
            .retain(|s| s.sender.send(event.clone()).is_ok());
        let delivered = inner.subscribers.len();
        trace!(delivered, "event published");
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

/// Receiving end of a topic.
pub struct Subscription<T> {
    id: u64,
    receiver: Receiver<T>,
}

impl<T> Subscription<T> {
    /// Next queued event, if any. Never blocks.
    pub fn try_next(&self) -> Option<T> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Takes every queued event, oldest first.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }

    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

/// Both topics the engine publishes on.
#[derive(Clone, Default)]
pub struct EventBridge {
    pub selection: Topic<SelectionEvent>,
    pub ready: Topic<DatasetReady>,
}

impl EventBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe_selection(&self) -> Subscription<SelectionEvent> {
        self.selection.subscribe()
    }

    pub fn subscribe_ready(&self) -> Subscription<DatasetReady> {
        self.ready.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(name: &str) -> DatasetReady {
        DatasetReady {
            dataset: name.into(),
        }
    }

    #[test]
    fn every_subscriber_gets_every_event_in_order() {
        let topic = Topic::new();
        let a = topic.subscribe();
        let b = topic.subscribe();

        assert_eq!(topic.publish(ready("one")), 2);
        topic.publish(ready("two"));

        assert_eq!(a.drain(), [ready("one"), ready("two")]);
        assert_eq!(b.try_next(), Some(ready("one")));
        assert_eq!(b.try_next(), Some(ready("two")));
        assert_eq!(b.try_next(), None);
    }

    #[test]
    fn late_subscribers_miss_earlier_events() {
        let topic = Topic::new();
        topic.publish(ready("early"));
        let sub = topic.subscribe();
        assert_eq!(sub.pending(), 0);
    }

    #[test]
    fn dropped_and_removed_subscriptions_stop_counting() {
        let topic: Topic<DatasetReady> = Topic::new();
        let kept = topic.subscribe();
        let dropped = topic.subscribe();
        let removed = topic.subscribe();

        drop(dropped);
        topic.unsubscribe(removed);
        assert_eq!(topic.publish(ready("x")), 1);
        assert_eq!(topic.subscriber_count(), 1);
        assert_eq!(kept.drain().len(), 1);
    }

    #[test]
    fn bridge_clones_share_subscribers() {
        let bridge = EventBridge::new();
        let sub = bridge.subscribe_selection();
        let other = bridge.clone();
        other.selection.publish(SelectionEvent {
            properties: Properties::new(),
            is_boundary_level: true,
        });
        assert!(sub.try_next().is_some_and(|e| e.is_boundary_level));
    }

    #[test]
    fn selection_event_serializes_in_camel_case() {
        let mut properties = Properties::new();
        properties.insert("NAMOBJ".into(), "Hutabarat".into());
        let event = SelectionEvent {
            properties,
            is_boundary_level: false,
        };
        let v = serde_json::to_value(&event).unwrap();
        assert_eq!(v["isBoundaryLevel"], false);
        assert_eq!(v["properties"]["NAMOBJ"], "Hutabarat");
    }
}
