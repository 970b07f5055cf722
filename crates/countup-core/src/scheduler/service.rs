use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, error, trace};

use super::timer::{Timer, TimerHandle, TokioTimer};
use crate::progressive::{Endpoint, ProgressOptions, ProgressiveNumber, Step};
use crate::{Error, Result};

/// Callback receiving each formatted value and its step index
pub type StepCallback = Box<dyn FnMut(&str, u64) + Send + 'static>;

/// Lifecycle of a scheduled run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Configured, not started
    Constructed,
    /// Steps are being scheduled
    Running,
    /// Target reached, nothing left to schedule
    Finished,
    /// Stopped by [`ProgressiveRun::cancel`]
    Canceled,
    /// Stopped because the step callback panicked
    Failed,
}

impl Phase {
    /// Whether no further steps can happen
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Finished | Phase::Canceled | Phase::Failed)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Constructed => "constructed",
            Phase::Running => "running",
            Phase::Finished => "finished",
            Phase::Canceled => "canceled",
            Phase::Failed => "failed",
        };
        f.write_str(name)
    }
}

struct RunState<H> {
    number: ProgressiveNumber,
    /// At most one scheduled step at a time
    pending: Option<H>,
    /// Taken out while it runs so the lock is never held across it
    on_step: Option<StepCallback>,
}

struct Shared<T: Timer> {
    timer: T,
    state: Mutex<RunState<T::Handle>>,
    phase: watch::Sender<Phase>,
}

impl<T: Timer> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, RunState<T::Handle>> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    /// Arm the timer for the next step, replacing any stale handle
    fn schedule_next(self: &Arc<Self>, state: &mut RunState<T::Handle>) {
        if let Some(stale) = state.pending.take() {
            stale.cancel();
        }

        let shared = Arc::clone(self);
        let handle = self
            .timer
            .schedule(state.number.delay(), Box::new(move || shared.loop_step()));
        state.pending = Some(handle);
    }

    /// Timer entry point: advance once, report, re-arm unless done
    fn loop_step(self: &Arc<Self>) {
        let (on_step, step) = {
            let mut state = self.lock();
            if let Some(fired) = state.pending.take() {
                fired.cancel();
            }
            if self.phase() != Phase::Running {
                return;
            }

            let step = state.number.advance();
            trace!("Step {}: {} (done={})", step.step, step.value, step.done);
            (state.on_step.take(), step)
        };

        self.deliver(on_step, &step);
    }

    /// Run the callback outside the lock, then decide whether to continue
    fn deliver(self: &Arc<Self>, on_step: Option<StepCallback>, step: &Step) {
        let on_step = match on_step {
            None => None,
            Some(mut callback) => {
                let outcome = catch_unwind(AssertUnwindSafe(|| callback(&step.value, step.step)));
                match outcome {
                    Ok(()) => Some(callback),
                    Err(payload) => {
                        self.fail(step, payload.as_ref());
                        return;
                    }
                }
            }
        };

        // Declared after `on_step` so the lock is released before a
        // terminal run drops its callback
        let mut state = self.lock();

        // Canceled from inside the callback
        if self.phase() != Phase::Running {
            return;
        }

        if step.done {
            self.phase.send_replace(Phase::Finished);
            debug!("Progressive run finished at {} after {} steps", step.value, step.step);
        } else {
            state.on_step = on_step;
            self.schedule_next(&mut state);
        }
    }

    fn fail(&self, step: &Step, payload: &(dyn Any + Send)) {
        error!(
            "Step callback panicked at step {} ({}): {}",
            step.step,
            step.value,
            panic_message(payload)
        );

        let mut state = self.lock();
        if let Some(pending) = state.pending.take() {
            pending.cancel();
        }
        if self.phase() == Phase::Running {
            self.phase.send_replace(Phase::Failed);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// A progressive number driven by a timer
///
/// Created in [`Phase::Constructed`]. [`start`](Self::start) reports the
/// initial value synchronously and schedules one step every `delay` until
/// the target is reached. Cloning yields another handle to the same run.
/// Dropping every handle does not stop a started run; call
/// [`cancel`](Self::cancel) for that.
pub struct ProgressiveRun<T: Timer = TokioTimer> {
    shared: Arc<Shared<T>>,
}

impl<T: Timer> Clone for ProgressiveRun<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Timer> fmt::Debug for ProgressiveRun<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("ProgressiveRun")
            .field("phase", &self.shared.phase())
            .field("number", &state.number)
            .field("pending", &state.pending.is_some())
            .finish()
    }
}

impl ProgressiveRun<TokioTimer> {
    /// Create a run on the current tokio runtime
    pub fn new(
        initial: impl Into<Endpoint>,
        target: impl Into<Endpoint>,
        options: ProgressOptions,
    ) -> Result<Self> {
        Self::with_timer(TokioTimer::current()?, initial, target, options)
    }
}

impl<T: Timer> ProgressiveRun<T> {
    /// Create a run paced by an explicit timer
    pub fn with_timer(
        timer: T,
        initial: impl Into<Endpoint>,
        target: impl Into<Endpoint>,
        options: ProgressOptions,
    ) -> Result<Self> {
        let number = ProgressiveNumber::new(initial, target, options)?;
        Ok(Self::from_number(timer, number))
    }

    /// Wrap an existing progressive number
    pub fn from_number(timer: T, number: ProgressiveNumber) -> Self {
        let (phase, _) = watch::channel(Phase::Constructed);
        Self {
            shared: Arc::new(Shared {
                timer,
                state: Mutex::new(RunState {
                    number,
                    pending: None,
                    on_step: None,
                }),
                phase,
            }),
        }
    }

    /// Start reporting values to `on_step`
    ///
    /// Calls `on_step` once with the initial value and step 1 before
    /// returning, then once per scheduled step until the target is reached.
    pub fn start<F>(&self, on_step: F) -> Result<()>
    where
        F: FnMut(&str, u64) + Send + 'static,
    {
        self.begin(Some(Box::new(on_step)))
    }

    /// Start without a step callback
    pub fn start_silent(&self) -> Result<()> {
        self.begin(None)
    }

    fn begin(&self, on_step: Option<StepCallback>) -> Result<()> {
        let initial = {
            let state = self.shared.lock();
            let phase = self.shared.phase();
            if phase != Phase::Constructed {
                return Err(Error::NotStartable(phase));
            }
            self.shared.phase.send_replace(Phase::Running);

            let number = &state.number;
            debug!(
                "Progressive run started: {} -> {} in {} steps of {:?}",
                number.initial(),
                number.target(),
                number.total_steps(),
                number.delay()
            );

            Step {
                value: number.value(),
                step: number.step(),
                done: false,
            }
        };

        self.shared.deliver(on_step, &initial);
        Ok(())
    }

    /// Stop the run and drop its pending step
    ///
    /// Returns `false` if the run had already reached a terminal phase.
    /// Safe to call from inside the step callback.
    pub fn cancel(&self) -> bool {
        let on_step = {
            let mut state = self.shared.lock();
            if self.shared.phase().is_terminal() {
                return false;
            }

            if let Some(pending) = state.pending.take() {
                pending.cancel();
            }
            self.shared.phase.send_replace(Phase::Canceled);
            debug!("Progressive run canceled at step {}", state.number.step());
            state.on_step.take()
        };

        // Dropped outside the lock: the callback may own a handle to this run
        drop(on_step);
        true
    }

    /// Wait until the run reaches a terminal phase and return it
    ///
    /// Never resolves for a run that was never started (or canceled).
    pub async fn finished(&self) -> Phase {
        let mut rx = self.shared.phase.subscribe();
        let phase = match rx.wait_for(|phase| phase.is_terminal()).await {
            Ok(phase) => *phase,
            Err(_) => self.phase(),
        };
        phase
    }

    pub fn phase(&self) -> Phase {
        self.shared.phase()
    }

    /// Fraction of steps covered
    pub fn progress(&self) -> f64 {
        self.shared.lock().number.progress()
    }

    /// Current formatted value
    pub fn value(&self) -> String {
        self.shared.lock().number.value()
    }

    /// Current step index
    pub fn step(&self) -> u64 {
        self.shared.lock().number.step()
    }

    pub fn current(&self) -> f64 {
        self.shared.lock().number.current()
    }

    pub fn initial(&self) -> f64 {
        self.shared.lock().number.initial()
    }

    pub fn target(&self) -> f64 {
        self.shared.lock().number.target()
    }

    pub fn total_steps(&self) -> u64 {
        self.shared.lock().number.total_steps()
    }

    pub fn decimals(&self) -> u32 {
        self.shared.lock().number.decimals()
    }

    pub fn delay(&self) -> Duration {
        self.shared.lock().number.delay()
    }

    pub fn duration(&self) -> Duration {
        self.shared.lock().number.duration()
    }

    /// Copy of the underlying number at this instant
    pub fn number(&self) -> ProgressiveNumber {
        self.shared.lock().number.clone()
    }
}

/// Create and start a run on the current tokio runtime
///
/// Returns the run so the caller can cancel or await it. Dropping the
/// handle leaves the animation running to completion.
pub fn generate<F>(
    initial: impl Into<Endpoint>,
    target: impl Into<Endpoint>,
    on_step: F,
    options: ProgressOptions,
) -> Result<ProgressiveRun<TokioTimer>>
where
    F: FnMut(&str, u64) + Send + 'static,
{
    generate_with(TokioTimer::current()?, initial, target, on_step, options)
}

/// Create and start a run paced by an explicit timer
pub fn generate_with<T, F>(
    timer: T,
    initial: impl Into<Endpoint>,
    target: impl Into<Endpoint>,
    on_step: F,
    options: ProgressOptions,
) -> Result<ProgressiveRun<T>>
where
    T: Timer,
    F: FnMut(&str, u64) + Send + 'static,
{
    let run = ProgressiveRun::with_timer(timer, initial, target, options)?;
    run.start(on_step)?;
    Ok(run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualTimer;
    use tokio::sync::mpsc;

    type Log = Arc<Mutex<Vec<(String, u64)>>>;

    fn options(decimals: u32, duration_ms: u64, delay_ms: u64) -> ProgressOptions {
        ProgressOptions::default()
            .with_decimals(decimals)
            .with_duration(Duration::from_millis(duration_ms))
            .with_delay(Duration::from_millis(delay_ms))
    }

    fn recorder() -> (Log, impl FnMut(&str, u64) + Send + 'static) {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        (log, move |value: &str, step: u64| {
            sink.lock().unwrap().push((value.to_string(), step))
        })
    }

    fn entries(log: &Log) -> Vec<(String, u64)> {
        log.lock().unwrap().clone()
    }

    fn pairs(items: &[(&str, u64)]) -> Vec<(String, u64)> {
        items.iter().map(|(v, s)| (v.to_string(), *s)).collect()
    }

    #[test]
    fn test_start_reports_initial_value_synchronously() {
        let timer = ManualTimer::new();
        let run = ProgressiveRun::with_timer(timer.clone(), 0, 100, options(0, 100, 50)).unwrap();
        assert_eq!(run.phase(), Phase::Constructed);
        assert_eq!(timer.pending(), 0);

        let (log, on_step) = recorder();
        run.start(on_step).unwrap();

        assert_eq!(run.phase(), Phase::Running);
        assert_eq!(entries(&log), pairs(&[("0", 1)]));
        assert_eq!(timer.pending(), 1);
    }

    #[test]
    fn test_two_step_run() {
        let timer = ManualTimer::new();
        let (log, on_step) = recorder();
        let run = generate_with(timer.clone(), 0, 100, on_step, options(0, 100, 50)).unwrap();
        assert_eq!(run.total_steps(), 2);

        assert_eq!(timer.advance(Duration::from_millis(49)), 0);
        assert_eq!(timer.advance(Duration::from_millis(1)), 1);
        assert_eq!(entries(&log), pairs(&[("0", 1), ("88", 2)]));

        assert_eq!(timer.advance(Duration::from_millis(50)), 1);
        assert_eq!(entries(&log), pairs(&[("0", 1), ("88", 2), ("100", 2)]));
        assert_eq!(run.phase(), Phase::Finished);
        assert_eq!(timer.pending(), 0);

        assert_eq!(timer.advance(Duration::from_secs(1)), 0);
        assert_eq!(log.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_at_most_one_pending_step() {
        let timer = ManualTimer::new();
        let run = generate_with(timer.clone(), 0, 10, |_, _| {}, options(0, 100, 10)).unwrap();

        while run.phase() == Phase::Running {
            assert_eq!(timer.pending(), 1);
            timer.advance(Duration::from_millis(10));
        }
        assert_eq!(run.phase(), Phase::Finished);
        assert_eq!(timer.pending(), 0);
    }

    #[test]
    fn test_full_run_with_default_options() {
        let timer = ManualTimer::new();
        let (log, on_step) = recorder();
        let run = generate_with(timer.clone(), 0, 1000, on_step, ProgressOptions::default()).unwrap();

        timer.run_until_idle(10_000);
        let log = entries(&log);

        // start, 299 eased steps, terminal step
        assert_eq!(log.len(), 301);
        assert_eq!(log.last().unwrap(), &("1000".to_string(), 300));
        assert_eq!(timer.now(), Duration::from_millis(1500));
        assert_eq!(run.current(), 1000.0);
        assert_eq!(run.progress(), 1.0);

        let values: Vec<f64> = log.iter().map(|(v, _)| v.parse().unwrap()).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        let indices: Vec<u64> = log.iter().map(|(_, s)| *s).take(300).collect();
        assert_eq!(indices, (1..=300).collect::<Vec<_>>());
    }

    #[test]
    fn test_equal_computed_endpoints() {
        let timer = ManualTimer::new();
        let (log, on_step) = recorder();
        let run = generate_with(
            timer.clone(),
            Endpoint::computed(|| 5.0),
            Endpoint::computed(|| 5.0),
            on_step,
            options(2, 30, 10),
        )
        .unwrap();

        timer.run_until_idle(100);
        assert_eq!(run.phase(), Phase::Finished);
        assert!(entries(&log).iter().all(|(value, _)| value == "5.00"));
    }

    #[test]
    fn test_fixed_decimals() {
        let timer = ManualTimer::new();
        let (log, on_step) = recorder();
        generate_with(timer.clone(), 1, 2, on_step, options(2, 200, 10)).unwrap();
        timer.run_until_idle(100);

        let log = entries(&log);
        assert_eq!(log.first().unwrap().0, "1.00");
        assert_eq!(log.last().unwrap().0, "2.00");
        for (value, _) in &log {
            assert_eq!(value.split_once('.').unwrap().1.len(), 2, "bad value {}", value);
        }
    }

    #[test]
    fn test_delay_longer_than_duration() {
        let timer = ManualTimer::new();
        let (log, on_step) = recorder();
        let run = generate_with(timer.clone(), 3, 9, on_step, options(0, 10, 1000)).unwrap();
        assert_eq!(run.total_steps(), 1);

        assert_eq!(timer.advance(Duration::from_millis(1000)), 1);
        assert_eq!(entries(&log), pairs(&[("3", 1), ("9", 1)]));
        assert_eq!(run.phase(), Phase::Finished);
    }

    #[test]
    fn test_zero_delay_rejected() {
        let err = ProgressiveRun::with_timer(ManualTimer::new(), 0, 1, options(0, 10, 0)).unwrap_err();
        assert!(matches!(err, Error::InvalidDelay));
    }

    #[test]
    fn test_cancel_stops_run() {
        let timer = ManualTimer::new();
        let (log, on_step) = recorder();
        let run = generate_with(timer.clone(), 0, 100, on_step, options(0, 100, 10)).unwrap();
        timer.advance(Duration::from_millis(20));
        assert_eq!(log.lock().unwrap().len(), 3);

        assert!(run.cancel());
        assert_eq!(run.phase(), Phase::Canceled);
        assert_eq!(timer.pending(), 0);
        assert!(!run.cancel());

        timer.advance(Duration::from_secs(1));
        assert_eq!(log.lock().unwrap().len(), 3);
        assert_eq!(run.step(), 3);
    }

    #[test]
    fn test_cancel_from_inside_callback() {
        let timer = ManualTimer::new();
        let run = ProgressiveRun::with_timer(timer.clone(), 0, 100, options(0, 100, 10)).unwrap();
        let handle = run.clone();
        let (log, mut record) = recorder();

        run.start(move |value, step| {
            record(value, step);
            if step == 3 {
                handle.cancel();
            }
        })
        .unwrap();

        timer.run_until_idle(100);
        assert_eq!(run.phase(), Phase::Canceled);
        assert_eq!(entries(&log).len(), 3);
        assert_eq!(timer.pending(), 0);
    }

    #[test]
    fn test_finished_run_releases_self_owning_callback() {
        let timer = ManualTimer::new();
        let run = ProgressiveRun::with_timer(timer.clone(), 0, 10, options(0, 50, 10)).unwrap();
        let handle = run.clone();
        run.start(move |_, _| {
            let _ = handle.step();
        })
        .unwrap();

        timer.run_until_idle(100);
        assert_eq!(run.phase(), Phase::Finished);

        let shared = Arc::downgrade(&run.shared);
        drop(run);
        assert_eq!(shared.strong_count(), 0);
    }

    #[test]
    fn test_canceled_run_releases_self_owning_callback() {
        let timer = ManualTimer::new();
        let run = ProgressiveRun::with_timer(timer.clone(), 0, 10, options(0, 100, 10)).unwrap();
        let handle = run.clone();
        run.start(move |_, step| {
            if step == 2 {
                handle.cancel();
            }
        })
        .unwrap();

        timer.run_until_idle(100);
        assert_eq!(run.phase(), Phase::Canceled);

        let shared = Arc::downgrade(&run.shared);
        drop(run);
        assert_eq!(shared.strong_count(), 0);
    }

    #[test]
    fn test_external_cancel_releases_self_owning_callback() {
        let timer = ManualTimer::new();
        let run = ProgressiveRun::with_timer(timer.clone(), 0, 10, options(0, 100, 10)).unwrap();
        let handle = run.clone();
        run.start(move |_, _| {
            let _ = handle.value();
        })
        .unwrap();
        timer.advance(Duration::from_millis(20));

        assert!(run.cancel());
        assert_eq!(timer.pending(), 0);

        let shared = Arc::downgrade(&run.shared);
        drop(run);
        assert_eq!(shared.strong_count(), 0);
    }

    #[test]
    fn test_failed_run_releases_self_owning_callback() {
        let timer = ManualTimer::new();
        let run = ProgressiveRun::with_timer(timer.clone(), 0, 10, options(0, 100, 10)).unwrap();
        let handle = run.clone();
        run.start(move |_, step| {
            let _ = handle.step();
            if step == 2 {
                panic!("render failed");
            }
        })
        .unwrap();

        timer.run_until_idle(100);
        assert_eq!(run.phase(), Phase::Failed);

        let shared = Arc::downgrade(&run.shared);
        drop(run);
        assert_eq!(shared.strong_count(), 0);
    }

    #[test]
    fn test_number_is_a_detached_copy() {
        let timer = ManualTimer::new();
        let run = generate_with(timer.clone(), 0, 100, |_, _| {}, options(0, 100, 10)).unwrap();
        timer.advance(Duration::from_millis(20));

        let mut copy = run.number();
        assert_eq!(copy.step(), 3);
        assert_eq!(copy.value(), run.value());
        assert_eq!(copy.total_steps(), 10);

        copy.advance();
        assert_eq!(copy.step(), 4);
        assert_eq!(run.step(), 3);
    }

    #[test]
    fn test_cancel_before_start() {
        let run = ProgressiveRun::with_timer(ManualTimer::new(), 0, 1, options(0, 10, 5)).unwrap();
        assert!(run.cancel());
        let err = run.start(|_, _| {}).unwrap_err();
        assert!(matches!(err, Error::NotStartable(Phase::Canceled)));
    }

    #[test]
    fn test_start_twice_rejected() {
        let timer = ManualTimer::new();
        let run = ProgressiveRun::with_timer(timer.clone(), 0, 1, options(0, 10, 5)).unwrap();
        run.start_silent().unwrap();
        let err = run.start(|_, _| {}).unwrap_err();
        assert!(matches!(err, Error::NotStartable(Phase::Running)));
        assert_eq!(timer.pending(), 1);
    }

    #[test]
    fn test_silent_run_still_finishes() {
        let timer = ManualTimer::new();
        let run = ProgressiveRun::with_timer(timer.clone(), 0, 50, options(1, 50, 10)).unwrap();
        run.start_silent().unwrap();
        timer.run_until_idle(100);
        assert_eq!(run.phase(), Phase::Finished);
        assert_eq!(run.value(), "50.0");
    }

    #[test]
    fn test_panicking_callback_fails_run() {
        let timer = ManualTimer::new();
        let (log, mut record) = recorder();
        let run = generate_with(
            timer.clone(),
            0,
            100,
            move |value: &str, step: u64| {
                if step == 2 {
                    panic!("display went away");
                }
                record(value, step);
            },
            options(0, 100, 10),
        )
        .unwrap();

        timer.run_until_idle(100);
        assert_eq!(run.phase(), Phase::Failed);
        assert_eq!(entries(&log), pairs(&[("0", 1)]));
        assert_eq!(timer.pending(), 0);
        assert!(!run.cancel());
    }

    #[test]
    fn test_panic_in_first_callback() {
        let timer = ManualTimer::new();
        let run = ProgressiveRun::with_timer(timer.clone(), 0, 100, options(0, 100, 10)).unwrap();
        run.start(|_, _| panic!("boom")).unwrap();
        assert_eq!(run.phase(), Phase::Failed);
        assert_eq!(timer.pending(), 0);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Running.to_string(), "running");
        assert!(Phase::Failed.is_terminal());
        assert!(!Phase::Constructed.is_terminal());
    }

    #[tokio::test(start_paused = true)]
    async fn test_generate_on_tokio_runtime() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let run = generate(
            0,
            100,
            move |value: &str, step: u64| {
                let _ = tx.send((value.to_string(), step));
            },
            options(0, 100, 50),
        )
        .unwrap();

        assert_eq!(run.finished().await, Phase::Finished);

        let mut seen = Vec::new();
        while let Ok(item) = rx.try_recv() {
            seen.push(item);
        }
        assert_eq!(seen, pairs(&[("0", 1), ("88", 2), ("100", 2)]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_handle_keeps_running() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let run = generate(
            10,
            20,
            move |value: &str, _step: u64| {
                let _ = tx.send(value.to_string());
            },
            options(0, 100, 10),
        )
        .unwrap();
        drop(run);

        let mut last = None;
        while let Some(value) = rx.recv().await {
            last = Some(value);
        }
        assert_eq!(last.as_deref(), Some("20"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_on_tokio_runtime() {
        let run = ProgressiveRun::new(0, 100, options(0, 1000, 10)).unwrap();
        run.start_silent().unwrap();

        tokio::time::sleep(Duration::from_millis(55)).await;
        assert!(run.cancel());
        assert_eq!(run.finished().await, Phase::Canceled);

        let step = run.step();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(run.step(), step);
        assert!(step > 1 && step < 100);
    }
}
