//! The single pending timer of an archive.

/// Holds at most one timer handle, tagged with the instant it fires.
#[derive(Debug)]
pub struct WakeupSlot<H> {
    pending: Option<(u64, H)>,
}

impl<H> Default for WakeupSlot<H> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<H> WakeupSlot<H> {
    /// Arms a timer for `at` unless one for that instant is already pending.
    ///
    /// `start` runs only when a new timer is needed. The handle it replaces is
    /// returned so the caller can cancel it.
    pub fn arm(&mut self, at: u64, start: impl FnOnce() -> H) -> Option<H> {
        if self.pending_at() == Some(at) {
            return None;
        }
        self.pending.replace((at, start())).map(|(_, handle)| handle)
    }

    /// Forgets the timer for `at` once it has fired.
    pub fn fired(&mut self, at: u64) {
        if self.pending_at() == Some(at) {
            self.pending = None;
        }
    }

    pub fn take(&mut self) -> Option<H> {
        self.pending.take().map(|(_, handle)| handle)
    }

    pub fn pending_at(&self) -> Option<u64> {
        self.pending.as_ref().map(|(at, _)| *at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keystrokes_toward_one_deadline_share_a_timer() {
        let mut slot = WakeupSlot::default();
        let mut started = 0;
        for _ in 0..5 {
            let replaced = slot.arm(500, || {
                started += 1;
                started
            });
            assert_eq!(replaced, None);
        }
        assert_eq!(started, 1);
        assert_eq!(slot.pending_at(), Some(500));
    }

    #[test]
    fn a_new_deadline_replaces_the_pending_timer() {
        let mut slot = WakeupSlot::default();
        slot.arm(300, || "first");
        assert_eq!(slot.arm(400, || "second"), Some("first"));
        // a stale timer firing late does not clear the newer one
        slot.fired(300);
        assert_eq!(slot.pending_at(), Some(400));
        slot.fired(400);
        assert_eq!(slot.pending_at(), None);
        assert_eq!(slot.take(), None);
    }
}
