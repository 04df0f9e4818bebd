use std::collections::VecDeque;

use crate::{ident::PacketId, packet::Packet};

/// A FIFO packet buffer with an optional capacity.
#[derive(Debug, Clone, derive_new::new)]
pub(crate) struct Buffer {
    #[new(default)]
    inner: VecDeque<Packet>,
    capacity: Option<usize>,
}

impl Buffer {
    pub(crate) fn bounded(capacity: usize) -> Self {
        Self::new(Some(capacity))
    }

    pub(crate) fn unbounded() -> Self {
        Self::new(None)
    }

    /// Appends `pkt` at the tail, handing it back if the buffer is full.
    pub(crate) fn enqueue(&mut self, pkt: Packet) -> Result<(), Packet> {
        if self.is_full() {
            return Err(pkt);
        }
        self.inner.push_back(pkt);
        Ok(())
    }

    /// Removes the packet with the given ID, wherever it sits in the buffer.
    pub(crate) fn remove(&mut self, id: PacketId) -> Option<Packet> {
        let idx = self.iter().position(|pkt| pkt.id == id)?;
        self.inner.remove(idx)
    }

    pub(crate) fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.inner.len() >= cap)
    }

    pub(crate) fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    delegate::delegate! {
        to self.inner {
            #[call(pop_front)]
            pub(crate) fn dequeue(&mut self) -> Option<Packet>;

            #[call(front)]
            pub(crate) fn peek(&self) -> Option<&Packet>;

            pub(crate) fn len(&self) -> usize;
            pub(crate) fn is_empty(&self) -> bool;
            pub(crate) fn iter(&self) -> std::collections::vec_deque::Iter<'_, Packet>;
        }
    }
}
