use std::time::Duration;

use super::foreground::RippleForeground;

/// The maximum number of exiting ripples kept animating at once.
pub const MAX_RIPPLES: usize = 10;

/// Fixed-capacity pool of ripples playing their exit animation.
///
/// Slots are allocated on first use and never grow. Live ripples always
/// occupy `slots[..len]` in the order they started exiting; every slot past
/// `len` is vacant.
#[derive(Debug, Default)]
pub struct ExitingRipples {
    slots: Option<Box<[Option<RippleForeground>; MAX_RIPPLES]>>,
    len: usize,
}

impl ExitingRipples {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len >= MAX_RIPPLES
    }

    /// Append a ripple. When the pool is full the ripple is handed back.
    pub fn push(&mut self, ripple: RippleForeground) -> Result<(), RippleForeground> {
        if self.is_full() {
            return Err(ripple);
        }
        let slots = self
            .slots
            .get_or_insert_with(|| Box::new(std::array::from_fn(|_| None)));
        slots[self.len] = Some(ripple);
        self.len += 1;
        Ok(())
    }

    /// Advance every exiting ripple. Returns true if any is still animating.
    pub fn update(&mut self, now: Duration) -> bool {
        let mut animating = false;
        for ripple in self.iter_mut() {
            animating |= ripple.update(now);
        }
        animating
    }

    /// Drop ripples whose exit finished, compacting survivors to the front
    /// in their original order. Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let count = self.len;
        let Some(slots) = self.slots.as_mut() else {
            return 0;
        };

        let mut remaining = 0;
        for i in 0..count {
            let keep = slots[i]
                .as_ref()
                .is_some_and(|ripple| !ripple.has_finished_exit());
            if keep {
                if i != remaining {
                    slots[remaining] = slots[i].take();
                }
                remaining += 1;
            }
        }

        for slot in &mut slots[remaining..count] {
            *slot = None;
        }

        self.len = remaining;
        count - remaining
    }

    /// End every ripple immediately and empty the pool.
    pub fn cancel_all(&mut self) {
        let count = self.len;
        if let Some(slots) = self.slots.as_mut() {
            for slot in &mut slots[..count] {
                if let Some(ripple) = slot.as_mut() {
                    ripple.end();
                }
                *slot = None;
            }
        }
        self.len = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = &RippleForeground> {
        self.live_slots().iter().filter_map(Option::as_ref)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RippleForeground> {
        let count = self.len;
        self.slots
            .as_mut()
            .map(|slots| &mut slots[..count])
            .unwrap_or_default()
            .iter_mut()
            .filter_map(Option::as_mut)
    }

    fn live_slots(&self) -> &[Option<RippleForeground>] {
        match self.slots.as_ref() {
            Some(slots) => &slots[..self.len],
            None => &[],
        }
    }

    /// Number of occupied slots, including any past `len`.
    #[cfg(test)]
    fn occupied_slots(&self) -> usize {
        self.slots
            .as_ref()
            .map(|slots| slots.iter().filter(|slot| slot.is_some()).count())
            .unwrap_or(0)
    }
}
