use crate::event::Event;

pub trait EventSource {
    fn poll_event(&mut self) -> Event;

    fn poll_secondary(&mut self) -> usize;

    fn secondary_event(&mut self, index: usize) -> Event;

    fn end_secondary(&mut self);
}

/// The secondary events of one primary event, in reported order.
///
/// The platform is told the batch is consumed when this is dropped, whether
/// or not every event was taken.
pub struct SecondaryBatch<'a, S: EventSource + ?Sized> {
    source: &'a mut S,
    next: usize,
    count: usize,
}

impl<'a, S: EventSource + ?Sized> SecondaryBatch<'a, S> {
    pub fn begin(source: &'a mut S) -> Self {
        let count = source.poll_secondary();
        Self {
            source,
            next: 0,
            count,
        }
    }
}

impl<S: EventSource + ?Sized> Iterator for SecondaryBatch<'_, S> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        if self.next >= self.count {
            return None;
        }
        let event = self.source.secondary_event(self.next);
        self.next += 1;
        Some(event)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count - self.next;
        (left, Some(left))
    }
}

impl<S: EventSource + ?Sized> Drop for SecondaryBatch<'_, S> {
    fn drop(&mut self) {
        self.source.end_secondary();
    }
}
