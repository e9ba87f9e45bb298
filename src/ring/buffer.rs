use crate::event::Event;

pub struct PushedEvents {
    pub(super) slots: Box<[Option<Event>]>,
    pub(super) capacity: usize,
    // Both only increase; slot index is the counter masked by capacity - 1.
    pub(super) head: u64,
    pub(super) tail: u64,
    pub(super) warned: bool,
    pub(super) overflows: u64,
}
