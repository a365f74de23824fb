use std::sync::Arc;

use rand::Rng;
use syncol::SyncMap;
use syncol_utils::specifications::map::{
    MapOperation::{self, Get, Insert, Len, Remove},
    MapSpecification,
};

use super::common::{assert_linearizable, check, run_processes, Recorder, NUM_OPERATIONS};

const NUM_KEYS: u8 = 4;

#[test]
fn random_operations_are_linearizable() {
    check(|| {
        let map: Arc<SyncMap<u8, u32>> = Arc::new(SyncMap::new());
        let recorder: Arc<Recorder<MapOperation<u8, u32>>> = Arc::new(Recorder::new());

        let shared = recorder.clone();
        run_processes(move |process, step, rng| {
            let recorder = &shared;
            let key = rng.gen_range(0..NUM_KEYS);
            match rng.gen_range(0..4) {
                0 => {
                    let value = (process * NUM_OPERATIONS + step) as u32;
                    recorder.call(process, Insert(key, value, None));
                    let previous = map.insert(key, value);
                    recorder.respond(process, Insert(key, value, Some(previous)));
                }
                1 => {
                    recorder.call(process, Remove(key, None));
                    let previous = map.remove(&key);
                    recorder.respond(process, Remove(key, Some(previous)));
                }
                2 => {
                    recorder.call(process, Get(key, None));
                    let value = map.get(&key);
                    recorder.respond(process, Get(key, Some(value)));
                }
                _ => {
                    recorder.call(process, Len(None));
                    let len = map.len();
                    recorder.respond(process, Len(Some(len)));
                }
            }
        });

        assert_linearizable::<MapSpecification<u8, u32>>(&recorder);
    });
}
