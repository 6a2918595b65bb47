use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};

/// Source of scheduled tasks. Dropping a returned task cancels it.
pub trait Ticker {
    type Task;

    fn every(&self, period_ms: u32, tick: Rc<dyn Fn()>) -> Self::Task;
    fn once(&self, delay_ms: u32, run: Box<dyn FnOnce()>) -> Self::Task;
}

/// A live browser timer, held only so dropping it cancels the timer.
pub enum TimerTask {
    Interval { _interval: Interval },
    Timeout { _timeout: Timeout },
}

/// Ticker backed by `setInterval` / `setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTicker;

impl Ticker for BrowserTicker {
    type Task = TimerTask;

    fn every(&self, period_ms: u32, tick: Rc<dyn Fn()>) -> TimerTask {
        TimerTask::Interval {
            _interval: Interval::new(period_ms, move || tick()),
        }
    }

    fn once(&self, delay_ms: u32, run: Box<dyn FnOnce()>) -> TimerTask {
        TimerTask::Timeout {
            _timeout: Timeout::new(delay_ms, run),
        }
    }
}

/// Repeating advance of one carousel.
///
/// Holds the only handle to its task, so starting again always cancels the
/// running task before the new one exists.
pub struct Autoplay<T: Ticker = BrowserTicker> {
    ticker: T,
    period_ms: u32,
    tick: Rc<dyn Fn()>,
    task: Option<T::Task>,
}

impl<T: Ticker> Autoplay<T> {
    pub fn new(ticker: T, period_ms: u32, tick: impl Fn() + 'static) -> Self {
        Self {
            ticker,
            period_ms,
            tick: Rc::new(tick),
            task: None,
        }
    }

    /// Starts ticking, replacing any running task. Manual navigation calls
    /// this to push the next automatic advance a full period away.
    pub fn start(&mut self) {
        self.stop();
        self.task = Some(self.ticker.every(self.period_ms, self.tick.clone()));
    }

    pub fn stop(&mut self) {
        // drop cancels
        self.task = None;
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }
}

/// Starts `autoplay` once `delay_ms` has passed. Dropping the returned task
/// before then cancels the delayed start.
pub fn start_after<T>(autoplay: &Rc<RefCell<Autoplay<T>>>, delay_ms: u32) -> T::Task
where
    T: Ticker + 'static,
    T::Task: 'static,
{
    let handle = autoplay.clone();
    autoplay
        .borrow()
        .ticker
        .once(delay_ms, Box::new(move || handle.borrow_mut().start()))
}

/// Applies a manual navigation step, then restarts `autoplay` so the next
/// automatic advance is a full period away.
pub fn navigate<T: Ticker>(autoplay: &RefCell<Autoplay<T>>, step: impl FnOnce()) {
    step();
    autoplay.borrow_mut().start();
}

/// Runs only the last of a burst of calls, `delay_ms` after it.
pub struct Debounce<T: Ticker = BrowserTicker> {
    ticker: T,
    delay_ms: u32,
    _pending: Option<T::Task>,
}

impl<T: Ticker> Debounce<T> {
    pub fn new(ticker: T, delay_ms: u32) -> Self {
        Self {
            ticker,
            delay_ms,
            _pending: None,
        }
    }

    pub fn schedule(&mut self, run: impl FnOnce() + 'static) {
        self._pending = None;
        self._pending = Some(self.ticker.once(self.delay_ms, Box::new(run)));
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::cell::{Cell, RefCell};

    struct Scheduled {
        id: usize,
        repeating: Option<Rc<dyn Fn()>>,
        once: Option<Box<dyn FnOnce()>>,
    }

    /// Manually driven ticker that tracks which tasks are still alive.
    #[derive(Clone, Default)]
    pub struct FakeTicker {
        next_id: Rc<Cell<usize>>,
        live: Rc<RefCell<Vec<usize>>>,
        scheduled: Rc<RefCell<Vec<Scheduled>>>,
    }

    pub struct FakeTask {
        id: usize,
        live: Rc<RefCell<Vec<usize>>>,
    }

    impl Drop for FakeTask {
        fn drop(&mut self) {
            self.live.borrow_mut().retain(|id| *id != self.id);
        }
    }

    impl FakeTicker {
        fn register(&self, repeating: Option<Rc<dyn Fn()>>, once: Option<Box<dyn FnOnce()>>) -> FakeTask {
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            self.live.borrow_mut().push(id);
            self.scheduled.borrow_mut().push(Scheduled { id, repeating, once });
            FakeTask {
                id,
                live: self.live.clone(),
            }
        }

        pub fn live_tasks(&self) -> usize {
            self.live.borrow().len()
        }

        /// Fires every live repeating task once and every live one-shot task.
        /// A task cancelled by an earlier task in the same pass does not run,
        /// and a fired one-shot task stops counting as live.
        pub fn advance(&self) {
            let live = self.live.borrow().clone();
            let mut due = Vec::new();
            for entry in self.scheduled.borrow_mut().iter_mut() {
                if !live.contains(&entry.id) {
                    continue;
                }
                if let Some(tick) = &entry.repeating {
                    due.push((entry.id, Due::Tick(tick.clone())));
                } else if let Some(run) = entry.once.take() {
                    due.push((entry.id, Due::Once(run)));
                }
            }
            for (id, task) in due {
                if !self.live.borrow().contains(&id) {
                    continue;
                }
                match task {
                    Due::Tick(tick) => tick(),
                    Due::Once(run) => {
                        self.live.borrow_mut().retain(|live_id| *live_id != id);
                        run()
                    }
                }
            }
        }
    }

    enum Due {
        Tick(Rc<dyn Fn()>),
        Once(Box<dyn FnOnce()>),
    }

    impl Ticker for FakeTicker {
        type Task = FakeTask;

        fn every(&self, _period_ms: u32, tick: Rc<dyn Fn()>) -> FakeTask {
            self.register(Some(tick), None)
        }

        fn once(&self, _delay_ms: u32, run: Box<dyn FnOnce()>) -> FakeTask {
            self.register(None, Some(run))
        }
    }
}
