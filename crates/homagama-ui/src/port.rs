//! Presentation port and the scoped busy indicator.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::view_model::ViewModel;

/// Rendering surface the workflow reports to.
///
/// Implementations decide what "busy" or "error" look like; the workflow
/// only decides when they happen.
pub trait PresentationPort {
    fn show_busy(&mut self);

    fn hide_busy(&mut self);

    fn show_results(&mut self, view: &ViewModel);

    /// Results are hidden whenever an error is shown
    fn show_error(&mut self, message: &str);

    /// Short status line for assistive output
    fn announce_status(&mut self, _message: &str) {}
}

/// Holds the in-flight flag and the port's busy state for one run.
///
/// Dropping the guard hides the busy indicator and clears the flag, so
/// both are released on error, panic, or when the owning future is
/// dropped mid-request.
pub struct BusyGuard<'a, P: PresentationPort + ?Sized> {
    port: &'a mut P,
    in_flight: &'a AtomicBool,
}

impl<'a, P: PresentationPort + ?Sized> BusyGuard<'a, P> {
    /// Returns `None` without touching the port when a run is already in
    /// flight.
    pub fn acquire(port: &'a mut P, in_flight: &'a AtomicBool) -> Option<Self> {
        if in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }

        port.show_busy();
        Some(Self { port, in_flight })
    }
}

impl<P: PresentationPort + ?Sized> Deref for BusyGuard<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.port
    }
}

impl<P: PresentationPort + ?Sized> DerefMut for BusyGuard<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.port
    }
}

impl<P: PresentationPort + ?Sized> Drop for BusyGuard<'_, P> {
    fn drop(&mut self) {
        self.port.hide_busy();
        self.in_flight.store(false, Ordering::Release);
    }
}
