// ============================================================================
// SCHEDULER - Background refresh timer + local task spawning
// ============================================================================

use std::rc::Rc;

use futures::future::LocalBoxFuture;

/// Runs a future on the single-threaded event loop
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

/// Cancels its timer when dropped or explicitly cancelled
pub struct RefreshHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl RefreshHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

pub trait RefreshScheduler {
    /// Call `tick` every `period_ms` until the returned handle is dropped
    fn every(&self, period_ms: u32, tick: Rc<dyn Fn()>) -> RefreshHandle;
}

/// `setInterval` through gloo-timers
#[cfg(target_arch = "wasm32")]
pub struct IntervalScheduler;

#[cfg(target_arch = "wasm32")]
impl RefreshScheduler for IntervalScheduler {
    fn every(&self, period_ms: u32, tick: Rc<dyn Fn()>) -> RefreshHandle {
        use gloo_timers::callback::Interval;

        let interval = Interval::new(period_ms, move || tick());
        RefreshHandle::new(move || {
            interval.cancel();
        })
    }
}

/// `spawn_local` on the browser microtask queue
#[cfg(target_arch = "wasm32")]
pub fn browser_spawner() -> Spawner {
    Rc::new(|future: LocalBoxFuture<'static, ()>| wasm_bindgen_futures::spawn_local(future))
}
