mod common;
mod map;
mod sequence;
mod set;
