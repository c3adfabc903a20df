// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounded queue of received PD messages.
//!
//! Messages are pulled out of the TCPC by the alert path, which may run in
//! interrupt context, and consumed by the PD task. There is exactly one
//! producer and one consumer per port, which is what makes the lock-free
//! scheme below sufficient: each side owns one of the two counters and only
//! ever advances it after finishing its slot work.
//!
//! The queue deliberately refuses to read the chip when full. The message
//! stays in the TCPC, RX_STATUS stays asserted, and the alert fires again
//! once the consumer has caught up.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

use static_assertions::const_assert;

use crate::Error;

/// A PD message carries at most seven 32-bit data objects.
pub const MAX_DATA_OBJECTS: usize = 7;

/// Payload byte limit implied by [`MAX_DATA_OBJECTS`].
pub const MAX_PAYLOAD_BYTES: usize = 4 * MAX_DATA_OBJECTS;

/// One received message: the 16-bit wire header in the low half of
/// `header`, with the decoded frame type in the top nibble when SOP
/// decoding is enabled.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Message {
    pub header: u32,
    pub payload: [u32; MAX_DATA_OBJECTS],
}

impl Message {
    pub const fn empty() -> Self {
        Self {
            header: 0,
            payload: [0; MAX_DATA_OBJECTS],
        }
    }
}

/// Queue depth. Must be a power of two so slot selection is a mask; the
/// counters themselves run free.
pub const RX_QUEUE_DEPTH: usize = 4;
const_assert!(RX_QUEUE_DEPTH.is_power_of_two());

const SLOT_MASK: u32 = RX_QUEUE_DEPTH as u32 - 1;

/// Single-producer single-consumer ring of [`Message`]s.
///
/// `head` is the next slot the producer will fill, `tail` the next slot the
/// consumer will read; both increase monotonically and are masked on use.
/// `head == tail` means empty and `head - tail == RX_QUEUE_DEPTH` means
/// full; since each counter has a single writer, `head - tail` can never
/// leave `[0, RX_QUEUE_DEPTH]`.
pub struct RxQueue {
    head: AtomicU32,
    tail: AtomicU32,
    slots: [UnsafeCell<Message>; RX_QUEUE_DEPTH],
}

// Safety: the slots are plain data, and the enqueue/dequeue protocol below
// hands each slot to exactly one side at a time -- the producer between
// reserving it (reading `head`) and publishing it (storing `head + 1`), the
// consumer from then until it stores `tail + 1`.
unsafe impl Sync for RxQueue {}

impl RxQueue {
    pub const fn new() -> Self {
        const EMPTY: UnsafeCell<Message> = UnsafeCell::new(Message::empty());
        Self {
            head: AtomicU32::new(0),
            tail: AtomicU32::new(0),
            slots: [EMPTY; RX_QUEUE_DEPTH],
        }
    }

    /// Reserves the next slot, zeroes it, and runs `fill` to populate it;
    /// the slot is published only if `fill` succeeds.
    ///
    /// Returns `Overflow`, without calling `fill`, when the queue is full.
    /// Producer-side only.
    pub fn enqueue_with<F>(&self, fill: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Message) -> Result<(), Error>,
    {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);
        if head.wrapping_sub(tail) == RX_QUEUE_DEPTH as u32 {
            return Err(Error::Overflow);
        }

        // Safety: this slot is at or past `head`, so the consumer will not
        // touch it until we advance `head`, and we are the only producer.
        let slot = unsafe { &mut *self.slots[(head & SLOT_MASK) as usize].get() };
        *slot = Message::empty();
        fill(slot)?;

        // Publish; the release pairs with the consumer's acquire of `head`
        // so the slot contents are visible before the new count.
        self.head.store(head.wrapping_add(1), Ordering::Release);
        Ok(())
    }

    /// True when at least one message is waiting.
    pub fn has_pending(&self) -> bool {
        self.head.load(Ordering::Acquire) != self.tail.load(Ordering::Relaxed)
    }

    /// Copies out the oldest message, or returns `Busy` when the queue is
    /// empty. Consumer-side only.
    pub fn dequeue(&self) -> Result<Message, Error> {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);
        if head == tail {
            return Err(Error::Busy);
        }

        // Safety: `tail < head`, so the producer published this slot and
        // will not reuse it until we advance `tail`; we are the only
        // consumer.
        let msg = unsafe { *self.slots[(tail & SLOT_MASK) as usize].get() };

        // The release pairs with the producer's acquire of `tail`, keeping
        // our copy ordered before the slot is handed back.
        self.tail.store(tail.wrapping_add(1), Ordering::Release);
        Ok(msg)
    }

    /// Discards everything currently queued. Consumer-side only.
    pub fn clear(&self) {
        self.tail
            .store(self.head.load(Ordering::Acquire), Ordering::Release);
    }
}

impl Default for RxQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(tag: u32) -> Message {
        let mut m = Message::empty();
        m.header = tag;
        m.payload[0] = !tag;
        m
    }

    fn push(q: &RxQueue, tag: u32) -> Result<(), Error> {
        q.enqueue_with(|slot| {
            *slot = msg(tag);
            Ok(())
        })
    }

    #[test]
    fn starts_empty() {
        let q = RxQueue::new();
        assert!(!q.has_pending());
        assert_eq!(q.dequeue(), Err(Error::Busy));
    }

    #[test]
    fn fifo_order() {
        let q = RxQueue::new();
        for tag in 0..3 {
            push(&q, tag).unwrap();
        }
        for tag in 0..3 {
            assert_eq!(q.dequeue().unwrap(), msg(tag));
        }
        assert_eq!(q.dequeue(), Err(Error::Busy));
    }

    #[test]
    fn overflow_refused_without_filling() {
        let q = RxQueue::new();
        for tag in 0..RX_QUEUE_DEPTH as u32 {
            push(&q, tag).unwrap();
        }

        let mut fill_ran = false;
        let r = q.enqueue_with(|_| {
            fill_ran = true;
            Ok(())
        });
        assert_eq!(r, Err(Error::Overflow));
        assert!(!fill_ran, "fill must not run when the queue is full");

        // The four queued messages are intact and in order.
        for tag in 0..RX_QUEUE_DEPTH as u32 {
            assert_eq!(q.dequeue().unwrap(), msg(tag));
        }
        assert_eq!(q.dequeue(), Err(Error::Busy));
    }

    #[test]
    fn failed_fill_is_not_published() {
        let q = RxQueue::new();
        let r = q.enqueue_with(|slot| {
            slot.header = 0xdead;
            Err(Error::Unknown)
        });
        assert_eq!(r, Err(Error::Unknown));
        assert!(!q.has_pending());

        // The slot is re-zeroed and reused on the next enqueue.
        push(&q, 7).unwrap();
        assert_eq!(q.dequeue().unwrap(), msg(7));
    }

    #[test]
    fn clear_discards_pending() {
        let q = RxQueue::new();
        push(&q, 1).unwrap();
        push(&q, 2).unwrap();
        q.clear();
        assert!(!q.has_pending());
        assert_eq!(q.dequeue(), Err(Error::Busy));

        // Still usable afterwards.
        push(&q, 3).unwrap();
        assert_eq!(q.dequeue().unwrap(), msg(3));
    }

    #[test]
    fn interleaving_preserves_order_across_wrap() {
        let q = RxQueue::new();
        let mut next_in = 0;
        let mut next_out = 0;

        // Run the counters several times around the ring with the queue at
        // varying occupancy.
        for burst in 1..=RX_QUEUE_DEPTH {
            for _ in 0..burst {
                push(&q, next_in).unwrap();
                next_in += 1;
            }
            while q.has_pending() {
                assert_eq!(q.dequeue().unwrap(), msg(next_out));
                next_out += 1;
            }
        }
        assert_eq!(next_in, next_out);
    }

    #[test]
    fn occupancy_never_exceeds_depth() {
        let q = RxQueue::new();
        for round in 0..3 * RX_QUEUE_DEPTH as u32 {
            match push(&q, round) {
                Ok(()) => {}
                Err(Error::Overflow) => {
                    q.dequeue().unwrap();
                }
                Err(e) => panic!("unexpected error {e:?}"),
            }
        }
        let mut pending = 0;
        while q.dequeue().is_ok() {
            pending += 1;
        }
        assert!(pending <= RX_QUEUE_DEPTH);
    }
}
