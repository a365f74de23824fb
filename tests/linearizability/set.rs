use std::sync::Arc;

use rand::Rng;
use syncol::SyncSet;
use syncol_utils::specifications::set::{
    SetOperation::{self, Contains, Insert, Len, Remove},
    SetSpecification,
};

use super::common::{assert_linearizable, check, run_processes, Recorder};

// A small domain of values, so that processes contend over the same elements.
const NUM_VALUES: u32 = 5;

#[test]
fn random_operations_are_linearizable() {
    check(|| {
        let set: Arc<SyncSet<u32>> = Arc::new(SyncSet::new());
        let recorder: Arc<Recorder<SetOperation<u32>>> = Arc::new(Recorder::new());

        let shared = recorder.clone();
        run_processes(move |process, _, rng| {
            let recorder = &shared;
            let value = rng.gen_range(0..NUM_VALUES);
            match rng.gen_range(0..4) {
                0 => {
                    recorder.call(process, Insert(value, None));
                    let inserted = set.insert(value);
                    recorder.respond(process, Insert(value, Some(inserted)));
                }
                1 => {
                    recorder.call(process, Remove(value, None));
                    let removed = set.remove(&value);
                    recorder.respond(process, Remove(value, Some(removed)));
                }
                2 => {
                    recorder.call(process, Contains(value, None));
                    let present = set.contains(&value);
                    recorder.respond(process, Contains(value, Some(present)));
                }
                _ => {
                    recorder.call(process, Len(None));
                    let len = set.len();
                    recorder.respond(process, Len(Some(len)));
                }
            }
        });

        assert_linearizable::<SetSpecification<u32>>(&recorder);
    });
}
