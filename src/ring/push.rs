use super::RingError;
use crate::event::Event;
use crate::ring::PushedEvents;

impl PushedEvents {
    pub fn new(capacity: usize) -> Result<Self, RingError> {
        if !capacity.is_power_of_two() {
            return Err(RingError::InvalidCapacity {
                capacity,
                reason: "must be a power of two",
            });
        }

        Ok(Self {
            slots: (0..capacity).map(|_| None).collect(),
            capacity,
            head: 0,
            tail: 0,
            warned: false,
            overflows: 0,
        })
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        (self.head - self.tail) as usize
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn overflow_count(&self) -> u64 {
        self.overflows
    }

    #[inline]
    pub fn overflow_warned(&self) -> bool {
        self.warned
    }

    #[inline(always)]
    fn slot(&self, counter: u64) -> usize {
        (counter as usize) & (self.capacity - 1)
    }

    pub fn push(&mut self, event: Event) {
        if self.is_full() {
            // Warn once per run of consecutive overflows.
            if !self.warned {
                self.warned = true;
                log::warn!("pushed event overflow, dropping oldest events");
            }

            let idx = self.slot(self.tail);
            if let Some(evicted) = self.slots[idx].take() {
                log::debug!(
                    "evicted pushed {} event (t={})",
                    evicted.kind.name(),
                    evicted.time
                );
            }
            self.tail += 1;
            self.overflows += 1;
        } else {
            self.warned = false;
        }

        let idx = self.slot(self.head);
        self.slots[idx] = Some(event);
        self.head += 1;
    }

    pub fn pop(&mut self) -> Option<Event> {
        if self.head <= self.tail {
            return None;
        }

        let idx = self.slot(self.tail);
        self.tail += 1;
        self.slots[idx].take()
    }

    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }
}
