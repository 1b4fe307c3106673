//! A multi-tier storage machine simulator: block replacement policies
//! (FIFO/LRU/LFU/ARC), a generic bounded cache built on top of them, a
//! storage-cache/device model, and a migration engine that routes blocks up
//! and down a configurable device hierarchy while accumulating simulated
//! latency.
//!
//! [`machine::Machine`] is the entry point once a [`config::Configuration`]
//! has been loaded: it owns the device hierarchy and exposes the
//! trace-level operations (`read`/`write`/`update`/`flush`) the `tiersim`
//! binary drives from a [`trace::TraceReader`].

pub mod cache;
pub mod config;
pub mod device;
pub mod error;
pub mod hierarchy;
pub mod latency;
pub mod machine;
pub mod output;
pub mod policy;
pub mod storage_cache;
pub mod trace;
pub mod types;
pub mod workload;

#[cfg(feature = "init_env_logger")]
pub fn init_env_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}
