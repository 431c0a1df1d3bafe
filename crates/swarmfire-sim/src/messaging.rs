//! In-process messaging bus: messages are enqueued with a delivery time
//! derived from per-link latency and drained once that time has passed.

use std::collections::BinaryHeap;

use swarmfire_core::enums::MessageKind;
use swarmfire_core::types::Pose;

/// Typed payload carried by a message. A closed sum type, per kind, so a
/// receiver never has to downcast.
#[derive(Debug, Clone)]
pub enum Payload {
    Telemetry { pose: Pose, velocity: swarmfire_core::types::Velocity },
    FireDetection { x: f64, y: f64, intensity: f64 },
    Suppression { x: f64, y: f64, strength: f64 },
    Command,
}

/// A single in-flight message, already past the emission-time packet-loss
/// draw — anything in the bus is guaranteed to be delivered.
#[derive(Debug, Clone)]
pub struct Message {
    pub sender_id: u32,
    pub receiver_id: u32,
    pub send_time: f64,
    pub deliver_time: f64,
    pub kind: MessageKind,
    pub payload: Payload,
}

/// Min-heap ordering key: earliest `deliver_time` first, ties broken by
/// ascending `sender_id` for a deterministic tie-break.
#[derive(Debug, Clone, Copy, PartialEq)]
struct OrderKey {
    deliver_time: f64,
    sender_id: u32,
    seq: u64,
}

impl Eq for OrderKey {}

impl Ord for OrderKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .deliver_time
            .partial_cmp(&self.deliver_time)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| other.sender_id.cmp(&self.sender_id))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OrderKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Heap entry whose ordering is delegated entirely to `OrderKey`; the
/// carried `Message` is opaque payload and never participates in comparison.
struct HeapEntry(OrderKey, Message);

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

/// Queues in-flight messages and releases them in deliver-time order
/// (ties broken by sender id, then arrival sequence).
#[derive(Default)]
pub struct MessageBus {
    heap: BinaryHeap<HeapEntry>,
    next_seq: u64,
}

impl MessageBus {
    pub fn new() -> Self {
        Self { heap: BinaryHeap::new(), next_seq: 0 }
    }

    pub fn push(&mut self, message: Message) {
        let key = OrderKey {
            deliver_time: message.deliver_time,
            sender_id: message.sender_id,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.heap.push(HeapEntry(key, message));
    }

    /// Remove and return every message whose `deliver_time` has arrived,
    /// in deliver-time order.
    pub fn drain_deliverable(&mut self, now: f64) -> Vec<Message> {
        let mut delivered = Vec::new();
        while let Some(entry) = self.heap.peek() {
            if entry.0.deliver_time > now {
                break;
            }
            let HeapEntry(_, message) = self.heap.pop().expect("peek just confirmed an item");
            delivered.push(message);
        }
        delivered
    }

    pub fn pending_count(&self) -> usize {
        self.heap.len()
    }
}
