//! Collections used throughout the crate.
//!
//! Keys are small integer handles, so the Fx hasher is used instead of SipHash.

pub use std::collections::VecDeque;

pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;
