//! Parallel fan-out: partition a job list into balanced groups and run each
//! group's batch concurrently.
//!
//! Each group runs on its own OS thread with its own [`Dispatch`] session
//! (its own log file); the thread blocks for the full duration of its engine
//! process, so the parallel units are the engine OS processes themselves.
//! Groups share no mutable state and no completion order is guaranteed
//! across them. Async runtimes buy nothing at this boundary and are not
//! used.

use std::thread;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{info, warn};

use crate::dispatch::Dispatch;
use crate::error::{ConfigError, Error};
use crate::script::Script;

/// Number of available processing units, at least 1.
#[must_use]
pub fn default_workers() -> usize {
    thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

/// Split `jobs` into exactly `groups` groups whose sizes differ by at most
/// one, earlier groups taking the extra element. Concatenating the groups in
/// order reproduces the input exactly. Zero groups is a configuration error.
pub fn partition<T>(jobs: Vec<T>, groups: usize) -> Result<Vec<Vec<T>>, ConfigError> {
    if groups == 0 {
        return Err(ConfigError::InvalidWorkerCount);
    }
    let len = jobs.len();
    let base = len / groups;
    let extra = len % groups;

    let mut result = Vec::with_capacity(groups);
    let mut jobs = jobs.into_iter();
    for index in 0..groups {
        let size = base + usize::from(index < extra);
        result.push(jobs.by_ref().take(size).collect());
    }
    Ok(result)
}

/// Batch-process plans in parallel, resolving the engine on PATH.
///
/// `workers` defaults to [`default_workers`]; zero is a configuration
/// error. Plans are partitioned in order; each non-empty group is executed
/// via one batch invocation in its own session. All groups run to
/// completion; if any failed, the error from the earliest-indexed failed
/// group is returned and the rest are logged.
pub fn run_batches(scripts: Vec<Script>, workers: Option<usize>) -> Result<(), Error> {
    run_groups(scripts, workers, None)
}

/// [`run_batches`] against an explicit engine executable.
pub fn run_batches_with_engine(
    engine: impl Into<Utf8PathBuf>,
    scripts: Vec<Script>,
    workers: Option<usize>,
) -> Result<(), Error> {
    run_groups(scripts, workers, Some(engine.into()))
}

fn run_groups(
    scripts: Vec<Script>,
    workers: Option<usize>,
    engine: Option<Utf8PathBuf>,
) -> Result<(), Error> {
    if scripts.is_empty() {
        return Ok(());
    }
    let workers = match workers {
        Some(0) => return Err(ConfigError::InvalidWorkerCount.into()),
        Some(n) => n,
        None => default_workers(),
    };
    let groups = partition(scripts, workers)?;
    info!(workers, "fanning out batches");

    let engine = engine.as_deref();
    let mut failures: Vec<(usize, Error)> = Vec::new();
    thread::scope(|scope| {
        let handles: Vec<_> = groups
            .into_iter()
            .enumerate()
            .filter(|(_, group)| !group.is_empty())
            .map(|(index, group)| {
                (index, scope.spawn(move || run_group(engine, &group)))
            })
            .collect();
        for (index, handle) in handles {
            // Worker threads return their errors; a panic here would be a
            // bug in this crate, not a failed mission.
            let outcome = handle.join().expect("worker thread panicked");
            if let Err(error) = outcome {
                failures.push((index, error));
            }
        }
    });

    failures.sort_by_key(|(index, _)| *index);
    let mut failures = failures.into_iter();
    match failures.next() {
        None => Ok(()),
        Some((index, first)) => {
            for (other, error) in failures {
                warn!(group = other, %error, "additional batch group failed");
            }
            warn!(group = index, "returning first batch group failure");
            Err(first)
        }
    }
}

fn run_group(engine: Option<&Utf8Path>, group: &[Script]) -> Result<(), Error> {
    let session = match engine {
        Some(path) => Dispatch::with_engine(path)?,
        None => Dispatch::new()?,
    };
    session.build_and_run_batch(group)?;
    Ok(())
}
