use std::sync::Arc;

use rand::Rng;
use syncol::SyncVec;
use syncol_utils::specifications::sequence::{
    SequenceOperation::{self, Len, PopFirst, PopLast, Push},
    SequenceSpecification,
};

use super::common::{assert_linearizable, check, run_processes, Recorder, NUM_OPERATIONS};

#[test]
fn random_operations_are_linearizable() {
    check(|| {
        let sequence: Arc<SyncVec<u32>> = Arc::new(SyncVec::new());
        let recorder: Arc<Recorder<SequenceOperation<u32>>> = Arc::new(Recorder::new());

        let shared = recorder.clone();
        run_processes(move |process, step, rng| {
            let recorder = &shared;
            match rng.gen_range(0..5) {
                0 | 1 => {
                    let value = (process * NUM_OPERATIONS + step) as u32;
                    recorder.call(process, Push(value));
                    sequence.push(value);
                    recorder.respond(process, Push(value));
                }
                2 => {
                    recorder.call(process, PopFirst(None));
                    let popped = sequence.pop_first().ok();
                    recorder.respond(process, PopFirst(Some(popped)));
                }
                3 => {
                    recorder.call(process, PopLast(None));
                    let popped = sequence.pop_last().ok();
                    recorder.respond(process, PopLast(Some(popped)));
                }
                _ => {
                    recorder.call(process, Len(None));
                    let len = sequence.len();
                    recorder.respond(process, Len(Some(len)));
                }
            }
        });

        assert_linearizable::<SequenceSpecification<u32>>(&recorder);
    });
}
