/// Fixed-capacity slot table. Slots are never removed, only flagged inactive
/// and handed out again by [`acquire`](SlotPool::acquire).
#[derive(Clone, Debug)]
pub struct SlotPool<T> {
    slots: Vec<Slot<T>>,
}

#[derive(Clone, Debug)]
struct Slot<T> {
    value: T,
    active: bool,
}

impl<T: Default> SlotPool<T> {
    pub fn new(capacity: usize) -> Self {
        SlotPool {
            slots: (0..capacity)
                .map(|_| Slot { value: T::default(), active: false })
                .collect(),
        }
    }
}

impl<T> SlotPool<T> {
    /// Activates the first free slot with `value`. Returns its index, or
    /// `None` (dropping `value`) when every slot is in use.
    pub fn acquire(&mut self, value: T) -> Option<usize> {
        let index = self.slots.iter().position(|slot| !slot.active)?;
        self.slots[index] = Slot { value, active: true };
        Some(index)
    }

    pub fn release(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.active = false;
        }
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
        }
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|slot| slot.active)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots
            .get(index)
            .filter(|slot| slot.active)
            .map(|slot| &slot.value)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.active).count()
    }

    pub fn has_free_slot(&self) -> bool {
        self.slots.iter().any(|slot| !slot.active)
    }

    /// Active values in slot order.
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.active)
            .map(|(i, slot)| (i, &slot.value))
    }

    /// Visits every active slot in order; returning `false` frees the slot.
    pub fn retain_active(&mut self, mut keep: impl FnMut(&mut T) -> bool) {
        for slot in self.slots.iter_mut().filter(|slot| slot.active) {
            if !keep(&mut slot.value) {
                slot.active = false;
            }
        }
    }

    /// First active slot, in slot order, whose value satisfies `predicate`.
    pub fn find_active(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.iter_active()
            .find(|(_, value)| predicate(value))
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_fills_first_free_slot() {
        let mut pool: SlotPool<u32> = SlotPool::new(3);
        assert_eq!(pool.acquire(10), Some(0));
        assert_eq!(pool.acquire(11), Some(1));
        pool.release(0);
        assert_eq!(pool.acquire(12), Some(0));
        assert_eq!(pool.get(0), Some(&12));
        assert_eq!(pool.capacity(), 3);
    }

    #[test]
    fn full_pool_rejects_without_growing() {
        let mut pool: SlotPool<u32> = SlotPool::new(2);
        pool.acquire(1);
        pool.acquire(2);
        assert_eq!(pool.acquire(3), None);
        assert_eq!(pool.capacity(), 2);
        assert_eq!(pool.active_count(), 2);
        assert!(!pool.has_free_slot());
    }

    #[test]
    fn retain_frees_rejected_slots() {
        let mut pool: SlotPool<u32> = SlotPool::new(4);
        for v in 0..4 {
            pool.acquire(v);
        }
        pool.retain_active(|v| {
            *v += 100;
            *v % 2 == 0
        });
        let left: Vec<_> = pool.iter_active().map(|(i, v)| (i, *v)).collect();
        assert_eq!(left, vec![(0, 100), (2, 102)]);
        assert!(!pool.is_active(1));
        assert_eq!(pool.get(1), None);
    }

    #[test]
    fn zero_capacity_pool_is_always_full() {
        let mut pool: SlotPool<u32> = SlotPool::new(0);
        assert_eq!(pool.acquire(5), None);
        assert_eq!(pool.iter_active().count(), 0);
    }
}
