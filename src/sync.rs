#[cfg(feature = "shuttle")]
pub(crate) use shuttle::sync::{mpsc, Mutex, RwLock};
#[cfg(feature = "shuttle")]
pub(crate) use shuttle::thread;
#[cfg(not(feature = "shuttle"))]
pub(crate) use std::sync::{mpsc, Mutex, RwLock};
#[cfg(not(feature = "shuttle"))]
pub(crate) use std::thread;
