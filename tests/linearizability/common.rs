use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use syncol_utils::{Action, History, ProcessId, Specification, WGLChecker};

#[cfg(feature = "shuttle")]
use shuttle::thread;
#[cfg(not(feature = "shuttle"))]
use std::thread;

pub const NUM_ITERATIONS: usize = 100;
pub const NUM_OPERATIONS: usize = 20;
#[cfg_attr(not(feature = "shuttle"), allow(dead_code))]
pub const NUM_PREEMPTIONS: usize = 3;
pub const NUM_THREADS: usize = 4;

/// Records the calls and responses of operations performed on a shared
/// collection, in the order in which they happened.
pub struct Recorder<O> {
    actions: Mutex<Vec<(ProcessId, Action<O>)>>,
}

impl<O: Clone + Debug> Recorder<O> {
    pub fn new() -> Self {
        Self {
            actions: Mutex::new(Vec::new()),
        }
    }

    pub fn call(&self, process: ProcessId, operation: O) {
        self.record(process, Action::Call(operation));
    }

    pub fn respond(&self, process: ProcessId, operation: O) {
        self.record(process, Action::Response(operation));
    }

    fn record(&self, process: ProcessId, action: Action<O>) {
        self.actions.lock().unwrap().push((process, action));
    }

    fn history(&self) -> History<O> {
        History::from_actions(self.actions.lock().unwrap().clone())
    }
}

/// Asserts that the recorded actions form a linearizable history with
/// respect to the specification `S`.
///
/// # Panics
///
/// Panics if the history is not linearizable.
pub fn assert_linearizable<S: Specification>(recorder: &Recorder<S::Operation>) {
    assert!(WGLChecker::<S>::is_linearizable(recorder.history()));
}

/// Runs `test` repeatedly, under a randomized scheduler when the `shuttle`
/// feature is enabled and on OS threads otherwise.
pub fn check<F>(test: F)
where
    F: Fn() + Send + Sync + 'static,
{
    #[cfg(feature = "shuttle")]
    shuttle::check_pct(test, NUM_ITERATIONS, NUM_PREEMPTIONS);
    #[cfg(not(feature = "shuttle"))]
    for _ in 0..NUM_ITERATIONS {
        test();
    }
}

/// Spawns `NUM_THREADS` processes that each call `perform` `NUM_OPERATIONS`
/// times, and waits for all of them to finish.
pub fn run_processes<F>(perform: F)
where
    F: Fn(ProcessId, usize, &mut SmallRng) + Send + Sync + 'static,
{
    let perform = Arc::new(perform);
    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|process| {
            let perform = perform.clone();
            thread::spawn(move || {
                let mut rng = SmallRng::from_entropy();
                for step in 0..NUM_OPERATIONS {
                    perform(process, step, &mut rng);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
