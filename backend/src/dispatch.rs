//! Lane dispatch
//!
//! An [`ExecutionEngine`] runs a lane body once for every lane id, handing
//! each invocation that lane's exclusive work item (its state view and its
//! output slots). `dispatch` returns only after every lane finished, which
//! is the barrier a compute-then-reduce composition relies on.
//!
//! Engines make no promise about lane order. Because lanes never share
//! mutable state, results do not depend on it.

use crate::error::ConfigError;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Runs lane bodies
pub trait ExecutionEngine {
    /// Invoke `body(lane_id, lanes[lane_id])` exactly once per lane and join
    fn dispatch<T, F>(&self, lanes: Vec<T>, body: F)
    where
        T: Send,
        F: Fn(usize, T) + Sync;
}

/// Runs every lane on the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialEngine {
    reversed: bool,
}

impl SequentialEngine {
    /// Lanes run in ascending id order
    pub fn new() -> Self {
        Self { reversed: false }
    }

    /// Lanes run last to first
    pub fn reversed() -> Self {
        Self { reversed: true }
    }
}

impl ExecutionEngine for SequentialEngine {
    fn dispatch<T, F>(&self, lanes: Vec<T>, body: F)
    where
        T: Send,
        F: Fn(usize, T) + Sync,
    {
        if self.reversed {
            lanes
                .into_iter()
                .enumerate()
                .rev()
                .for_each(|(id, lane)| body(id, lane));
        } else {
            lanes
                .into_iter()
                .enumerate()
                .for_each(|(id, lane)| body(id, lane));
        }
    }
}

/// Runs lanes on a rayon thread pool
pub struct RayonEngine {
    pool: Option<ThreadPool>,
}

impl RayonEngine {
    /// Use rayon's global pool
    pub fn new() -> Self {
        Self { pool: None }
    }

    /// Use a dedicated pool of `threads` workers
    pub fn with_threads(threads: usize) -> Result<Self, ConfigError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("prng-lane-{}", i))
            .build()
            .map_err(|e| ConfigError::Engine(e.to_string()))?;

        Ok(Self { pool: Some(pool) })
    }

    /// Global pool when `threads` is None, a dedicated pool otherwise
    pub fn from_threads(threads: Option<usize>) -> Result<Self, ConfigError> {
        match threads {
            Some(threads) => Self::with_threads(threads),
            None => Ok(Self::new()),
        }
    }

    pub fn current_num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }
}

impl Default for RayonEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RayonEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RayonEngine")
            .field("threads", &self.current_num_threads())
            .field("dedicated", &self.pool.is_some())
            .finish()
    }
}

impl ExecutionEngine for RayonEngine {
    fn dispatch<T, F>(&self, lanes: Vec<T>, body: F)
    where
        T: Send,
        F: Fn(usize, T) + Sync,
    {
        let body = &body;
        let run = move || {
            lanes
                .into_par_iter()
                .enumerate()
                .for_each(|(id, lane)| body(id, lane))
        };

        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}
