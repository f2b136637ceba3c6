//! Fixed-capacity slot storage for the acceleration subspace.
//!
//! Slots index two parallel vector arrays owned by the engine. A slot is
//! either on the free list or on the subspace list, never both. The subspace
//! list is an intrusive doubly linked chain over slot indices, oldest first,
//! giving O(1) push, eviction, and interior removal without any pointer
//! aliasing. Storage is sized once at construction and recycled for the
//! lifetime of the engine.

/// Free-list + subspace-list bookkeeping over a fixed set of slots.
#[derive(Debug)]
pub struct SlotArena {
    /// Forward links of the subspace list; also threads the free list.
    next: Vec<Option<usize>>,
    /// Backward links of the subspace list.
    prev: Vec<Option<usize>>,
    /// Oldest active slot.
    head: Option<usize>,
    /// Newest active slot.
    tail: Option<usize>,
    /// Head of the singly linked free list.
    free: Option<usize>,
    len: usize,
}

impl SlotArena {
    /// All `capacity` slots start on the free list.
    pub fn new(capacity: usize) -> Self {
        let mut next = vec![None; capacity];
        for i in 0..capacity.saturating_sub(1) {
            next[i] = Some(i + 1);
        }
        SlotArena {
            next,
            prev: vec![None; capacity],
            head: None,
            tail: None,
            free: if capacity > 0 { Some(0) } else { None },
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.next.len()
    }

    /// Number of slots on the subspace list.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Newest active slot, if any.
    pub fn newest(&self) -> Option<usize> {
        self.tail
    }

    /// Oldest active slot, if any.
    pub fn oldest(&self) -> Option<usize> {
        self.head
    }

    /// Take a slot from free storage, evicting the oldest subspace slot when
    /// none is free. The arena is sized one larger than the subspace capacity,
    /// so this cannot fail under correct use.
    pub fn allocate(&mut self) -> usize {
        if let Some(id) = self.free {
            self.free = self.next[id];
            self.next[id] = None;
            id
        } else {
            self.pop_oldest()
                .expect("slot arena exhausted with an empty subspace")
        }
    }

    /// Return a slot to the free list.
    pub fn release(&mut self, id: usize) {
        self.next[id] = self.free;
        self.prev[id] = None;
        self.free = Some(id);
    }

    /// Append `id` at the newest end of the subspace list.
    pub fn push_newest(&mut self, id: usize) {
        self.prev[id] = self.tail;
        self.next[id] = None;
        match self.tail {
            Some(t) => self.next[t] = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
    }

    /// Detach and return the oldest slot.
    pub fn pop_oldest(&mut self) -> Option<usize> {
        let id = self.head?;
        self.remove(id);
        Some(id)
    }

    /// Detach an active slot; the caller already holds its id. Must not be
    /// called for slots on the free list.
    pub fn remove(&mut self, id: usize) {
        match self.prev[id] {
            Some(p) => self.next[p] = self.next[id],
            None => self.head = self.next[id],
        }
        match self.next[id] {
            Some(n) => self.prev[n] = self.prev[id],
            None => self.tail = self.prev[id],
        }
        self.next[id] = None;
        self.prev[id] = None;
        self.len -= 1;
    }

    /// Return every active slot to free storage. Underlying vector storage is
    /// untouched, so the next cycle needs no reallocation.
    pub fn clear(&mut self) {
        while let Some(id) = self.pop_oldest() {
            self.release(id);
        }
    }

    /// Active slots, newest first.
    pub fn iter_newest_first(&self) -> NewestFirst<'_> {
        NewestFirst {
            arena: self,
            cur: self.tail,
        }
    }

    /// Active slots, oldest first.
    pub fn iter_oldest_first(&self) -> OldestFirst<'_> {
        OldestFirst {
            arena: self,
            cur: self.head,
        }
    }
}

pub struct NewestFirst<'a> {
    arena: &'a SlotArena,
    cur: Option<usize>,
}

impl Iterator for NewestFirst<'_> {
    type Item = usize;
    fn next(&mut self) -> Option<usize> {
        let id = self.cur?;
        self.cur = self.arena.prev[id];
        Some(id)
    }
}

pub struct OldestFirst<'a> {
    arena: &'a SlotArena,
    cur: Option<usize>,
}

impl Iterator for OldestFirst<'_> {
    type Item = usize;
    fn next(&mut self) -> Option<usize> {
        let id = self.cur?;
        self.cur = self.arena.next[id];
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_traverse_in_age_order() {
        let mut arena = SlotArena::new(4);
        let a = arena.allocate();
        arena.push_newest(a);
        let b = arena.allocate();
        arena.push_newest(b);
        let c = arena.allocate();
        arena.push_newest(c);
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.iter_oldest_first().collect::<Vec<_>>(), vec![a, b, c]);
        assert_eq!(arena.iter_newest_first().collect::<Vec<_>>(), vec![c, b, a]);
        assert_eq!(arena.oldest(), Some(a));
        assert_eq!(arena.newest(), Some(c));
    }

    #[test]
    fn allocate_evicts_oldest_when_free_list_empty() {
        let mut arena = SlotArena::new(3);
        let ids: Vec<usize> = (0..3)
            .map(|_| {
                let id = arena.allocate();
                arena.push_newest(id);
                id
            })
            .collect();
        // All slots active; the next allocation must recycle the oldest.
        let evicted = arena.allocate();
        assert_eq!(evicted, ids[0]);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.oldest(), Some(ids[1]));
    }

    #[test]
    fn remove_interior_node() {
        let mut arena = SlotArena::new(4);
        let ids: Vec<usize> = (0..3)
            .map(|_| {
                let id = arena.allocate();
                arena.push_newest(id);
                id
            })
            .collect();
        arena.remove(ids[1]);
        arena.release(ids[1]);
        assert_eq!(
            arena.iter_oldest_first().collect::<Vec<_>>(),
            vec![ids[0], ids[2]]
        );
        // The released slot is handed out again before any eviction.
        assert_eq!(arena.allocate(), ids[1]);
    }

    #[test]
    fn clear_recycles_every_slot() {
        let mut arena = SlotArena::new(3);
        for _ in 0..3 {
            let id = arena.allocate();
            arena.push_newest(id);
        }
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.oldest(), None);
        assert_eq!(arena.newest(), None);
        // All three slots are allocatable again without eviction.
        for _ in 0..3 {
            let id = arena.allocate();
            arena.push_newest(id);
        }
        assert_eq!(arena.len(), 3);
    }
}
