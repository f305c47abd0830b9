//! Port lock strategies
//!
//! Each I2C port is guarded by one [`SharedPort`] slot holding that port's
//! [`PortState`](crate::transport::state::PortState). The strategy is picked
//! once, as a type parameter of the transport, at construction:
//!
//! - [`BoundedPort`] for preemptive multi-threaded hosts (bounded wait,
//!   std-backed)
//! - [`CriticalSectionPort`] for single-core targets sharing ports between
//!   thread mode and interrupts (feature `embassy`)
//! - [`UnlockedPort`] for strictly single-context firmware where locking
//!   would be pure overhead

use core::time::Duration;

#[cfg(any(test, feature = "std"))]
use std::sync::{Condvar, Mutex, PoisonError};
#[cfg(any(test, feature = "std"))]
use std::time::Instant;

use core::cell::RefCell;

/// One claimable slot of port state.
///
/// `try_with` claims the slot, runs `f` on the state, and releases the slot
/// when `f` returns. Claims on the same slot are mutually exclusive; claims
/// on different slots never interact.
pub trait SharedPort<T> {
    /// Create a slot holding `value`, initially claimable.
    fn new(value: T) -> Self;

    /// Claim the slot within `timeout` and run `f` on the state.
    ///
    /// Returns `None` if the slot stayed claimed past the deadline; the
    /// state is untouched in that case. A `timeout` too large for the
    /// platform clock (`Duration::MAX`, say) waits without bound. When
    /// several claimants are waiting, the wake order is whatever the
    /// underlying primitive provides; callers must not assume FIFO.
    fn try_with<R>(&self, timeout: Duration, f: impl FnOnce(&mut T) -> R) -> Option<R>;

    /// Put the slot back to claimable with a fresh `value`, waking every
    /// waiter. Used during teardown so no stale claimant stays parked.
    fn reset(&self, value: T);
}

/// Bounded-wait port slot for preemptive threads.
///
/// The state is checked out of the slot for the duration of `f`, so the OS
/// mutex is only held for the brief take/put moments, never across a
/// hardware transfer. A panic inside `f` checks the state back in on unwind.
#[cfg(any(test, feature = "std"))]
pub struct BoundedPort<T> {
    slot: Mutex<Option<T>>,
    available: Condvar,
}

#[cfg(any(test, feature = "std"))]
impl<T> SharedPort<T> for BoundedPort<T> {
    fn new(value: T) -> Self {
        Self {
            slot: Mutex::new(Some(value)),
            available: Condvar::new(),
        }
    }

    fn try_with<R>(&self, timeout: Duration, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        // A timeout past what the clock can represent has no deadline.
        let deadline = Instant::now().checked_add(timeout);
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        let value = loop {
            if let Some(value) = slot.take() {
                break value;
            }
            slot = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return None;
                    }
                    let (guard, _) = self
                        .available
                        .wait_timeout(slot, deadline - now)
                        .unwrap_or_else(PoisonError::into_inner);
                    guard
                }
                None => self
                    .available
                    .wait(slot)
                    .unwrap_or_else(PoisonError::into_inner),
            };
        };
        drop(slot);

        let mut claim = ClaimGuard {
            port: self,
            value: Some(value),
        };
        claim.value.as_mut().map(f)
    }

    fn reset(&self, value: T) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
        self.available.notify_all();
    }
}

/// Checks the claimed state back into the slot on drop, unwind included.
#[cfg(any(test, feature = "std"))]
struct ClaimGuard<'a, T> {
    port: &'a BoundedPort<T>,
    value: Option<T>,
}

#[cfg(any(test, feature = "std"))]
impl<T> Drop for ClaimGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            let mut slot = self
                .port
                .slot
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *slot = Some(value);
            drop(slot);
            self.port.available.notify_one();
        }
    }
}

/// No-op port slot for strictly single-context firmware.
///
/// Claims always succeed immediately and the timeout is ignored. The slot is
/// deliberately `!Sync` (it wraps a `RefCell`), so misuse across contexts is
/// caught at compile time rather than on the bus. Operations must not nest
/// on the same port.
pub struct UnlockedPort<T> {
    value: RefCell<T>,
}

impl<T> SharedPort<T> for UnlockedPort<T> {
    fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
        }
    }

    fn try_with<R>(&self, _timeout: Duration, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        Some(f(&mut self.value.borrow_mut()))
    }

    fn reset(&self, value: T) {
        self.value.replace(value);
    }
}

/// Critical-section port slot for single-core targets where ports are shared
/// between thread mode and interrupt handlers.
///
/// Claims cannot block, so the timeout is ignored; mutual exclusion comes
/// from masking interrupts for the duration of `f`. Keep claims short.
#[cfg(feature = "embassy")]
pub struct CriticalSectionPort<T> {
    value: embassy_sync::blocking_mutex::Mutex<
        embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex,
        RefCell<T>,
    >,
}

#[cfg(feature = "embassy")]
impl<T> SharedPort<T> for CriticalSectionPort<T> {
    fn new(value: T) -> Self {
        Self {
            value: embassy_sync::blocking_mutex::Mutex::new(RefCell::new(value)),
        }
    }

    fn try_with<R>(&self, _timeout: Duration, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        Some(self.value.lock(|cell| f(&mut cell.borrow_mut())))
    }

    fn reset(&self, value: T) {
        self.value.lock(|cell| {
            cell.replace(value);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::sync::Arc;
    use std::thread;

    const LONG: Duration = Duration::from_secs(5);
    const SHORT: Duration = Duration::from_millis(20);

    #[test]
    fn bounded_port_shares_state_across_claims() {
        let port = BoundedPort::new(0u32);
        port.try_with(LONG, |v| *v += 1).unwrap();
        port.try_with(LONG, |v| *v += 1).unwrap();
        let seen = port.try_with(LONG, |v| *v).unwrap();
        assert_eq!(seen, 2);
    }

    #[test]
    fn bounded_port_times_out_while_claimed() {
        let port = Arc::new(BoundedPort::new(()));
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();

        let holder_port = Arc::clone(&port);
        let holder = thread::spawn(move || {
            holder_port.try_with(LONG, |_| {
                entered_tx.send(()).unwrap();
                release_rx.recv().unwrap();
            })
        });

        entered_rx.recv().unwrap();
        // Port is claimed; a short wait must give up with None.
        assert!(port.try_with(SHORT, |_| ()).is_none());

        release_tx.send(()).unwrap();
        assert!(holder.join().unwrap().is_some());

        // And the release must have made the port claimable again.
        assert!(port.try_with(SHORT, |_| ()).is_some());
    }

    #[test]
    fn bounded_port_zero_timeout_is_a_try_claim() {
        let port = BoundedPort::new(7u8);
        assert_eq!(port.try_with(Duration::ZERO, |v| *v), Some(7));
    }

    #[test]
    fn bounded_port_max_timeout_claims_open_slot() {
        // Duration::MAX must mean "wait forever", not an arithmetic panic.
        let port = BoundedPort::new(7u8);
        assert_eq!(port.try_with(Duration::MAX, |v| *v), Some(7));
    }

    #[test]
    fn bounded_port_max_timeout_waits_through_a_hold() {
        let port = Arc::new(BoundedPort::new(0u32));
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();

        let holder_port = Arc::clone(&port);
        let holder = thread::spawn(move || {
            holder_port.try_with(LONG, |_| {
                entered_tx.send(()).unwrap();
                release_rx.recv().unwrap();
            })
        });

        entered_rx.recv().unwrap();
        let waiter_port = Arc::clone(&port);
        let waiter = thread::spawn(move || waiter_port.try_with(Duration::MAX, |v| *v += 1));

        // Let the waiter park on the unbounded branch before releasing.
        thread::sleep(Duration::from_millis(10));
        release_tx.send(()).unwrap();

        holder.join().unwrap();
        assert!(waiter.join().unwrap().is_some());
        assert_eq!(port.try_with(LONG, |v| *v), Some(1));
    }

    #[test]
    fn bounded_port_waiter_wakes_on_release() {
        let port = Arc::new(BoundedPort::new(0u32));
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();

        let holder_port = Arc::clone(&port);
        let holder = thread::spawn(move || {
            holder_port.try_with(LONG, |_| {
                entered_tx.send(()).unwrap();
                release_rx.recv().unwrap();
            })
        });

        entered_rx.recv().unwrap();
        let waiter_port = Arc::clone(&port);
        let waiter = thread::spawn(move || waiter_port.try_with(LONG, |v| *v += 1));

        // Give the waiter a moment to park, then release the holder.
        thread::sleep(Duration::from_millis(10));
        release_tx.send(()).unwrap();

        holder.join().unwrap();
        assert!(waiter.join().unwrap().is_some());
        assert_eq!(port.try_with(LONG, |v| *v), Some(1));
    }

    #[test]
    fn bounded_port_recovers_from_panicking_claim() {
        let port = BoundedPort::new(3u32);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            port.try_with(LONG, |_| panic!("claim blew up"));
        }));
        assert!(result.is_err());

        // The unwind must have checked the state back in.
        assert_eq!(port.try_with(SHORT, |v| *v), Some(3));
    }

    #[test]
    fn reset_replaces_state_and_reopens_port() {
        let port = BoundedPort::new(41u32);
        port.try_with(LONG, |v| *v = 99).unwrap();
        port.reset(0);
        assert_eq!(port.try_with(SHORT, |v| *v), Some(0));
    }

    #[test]
    fn unlocked_port_always_claims() {
        let port = UnlockedPort::new([0u8; 4]);
        assert!(port.try_with(Duration::ZERO, |v| v[0] = 1).is_some());
        assert_eq!(port.try_with(Duration::ZERO, |v| v[0]), Some(1));
        port.reset([9; 4]);
        assert_eq!(port.try_with(Duration::ZERO, |v| v[3]), Some(9));
    }
}
