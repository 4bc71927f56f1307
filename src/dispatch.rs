//! Engine sessions: externalize a plan, invoke the console engine, map the
//! exit status.
//!
//! All process execution is argv-style (`Command::new().args()`); no shell
//! string is ever evaluated. The engine's own diagnostics go to the session
//! log file; this layer only inspects the exit status.

use std::io::Write;
use std::process::{Command, Stdio};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use crate::error::{DispatchError, Error};
use crate::script::{Script, utf8_path};

/// Engine console executable name, resolved on PATH unless a path is given.
pub const ENGINE_PROGRAM: &str = if cfg!(windows) {
    "GmatConsole.exe"
} else {
    "GmatConsole"
};

/// One engine session.
///
/// A session owns exactly one log file for its entire lifetime; every run
/// issued through it shares that log. The log is allocated at creation and
/// retained after teardown for inspection. A session supports one invocation
/// in flight at a time; the calling thread blocks until the engine process
/// exits, and there is no timeout or cancellation for an in-flight run.
#[derive(Debug)]
pub struct Dispatch {
    engine: Utf8PathBuf,
    log: Utf8PathBuf,
}

impl Dispatch {
    /// Create a session, resolving the engine executable on PATH.
    pub fn new() -> Result<Self, Error> {
        let engine = which::which(ENGINE_PROGRAM).map_err(|e| DispatchError::EngineNotFound {
            program: ENGINE_PROGRAM.to_string(),
            reason: e.to_string(),
        })?;
        Self::with_engine(utf8_path(engine)?)
    }

    /// Create a session against an explicit engine executable.
    pub fn with_engine(engine: impl Into<Utf8PathBuf>) -> Result<Self, Error> {
        let log = allocate_log()?;
        let session = Self {
            engine: engine.into(),
            log,
        };
        debug!(engine = %session.engine, log = %session.log, "created dispatch session");
        Ok(session)
    }

    /// Path of the session log file. Readable while the session lives and
    /// after it is dropped.
    #[must_use]
    pub fn log_path(&self) -> &Utf8Path {
        &self.log
    }

    /// Run one already-written artifact.
    ///
    /// Exit status 0 is success; anything else (including death by signal)
    /// is an [`DispatchError::EngineFailure`] carrying the artifact path and
    /// the session log path.
    pub fn run(&self, artifact: &Utf8Path) -> Result<(), DispatchError> {
        info!(artifact = %artifact, "running mission");
        let status = Command::new(self.engine.as_std_path())
            .args(["--verbose", "off", "--logfile", self.log.as_str(), "--run", artifact.as_str()])
            .stdout(Stdio::null())
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(DispatchError::EngineFailure {
                artifact: Some(artifact.to_owned()),
                code: status.code(),
                log: self.log.clone(),
            })
        }
    }

    /// Serialize the plan to a retained artifact and run it. Returns the
    /// artifact path; the file stays on disk either way for postmortem
    /// inspection.
    pub fn build_and_run(&self, script: &Script) -> Result<Utf8PathBuf, Error> {
        let artifact = script.write_artifact()?;
        self.run(&artifact)?;
        Ok(artifact)
    }

    /// Run an already-written manifest in batch mode.
    ///
    /// A batch failure carries no per-plan attribution: the engine reports
    /// one exit status for the whole manifest, so `artifact` is `None` on
    /// the resulting error.
    pub fn run_batch(&self, manifest: &Utf8Path) -> Result<(), DispatchError> {
        info!(manifest = %manifest, "running batch");
        let status = Command::new(self.engine.as_std_path())
            .args(["--verbose", "off", "--logfile", self.log.as_str(), "--batch", manifest.as_str()])
            .stdout(Stdio::null())
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(DispatchError::EngineFailure {
                artifact: None,
                code: status.code(),
                log: self.log.clone(),
            })
        }
    }

    /// Serialize every plan to its own retained artifact, write a manifest
    /// listing them in order, and run the batch in one engine invocation.
    ///
    /// Returns the artifact paths (retained). The manifest's lifetime truly
    /// ends with this call, so it is released when the call returns.
    pub fn build_and_run_batch(&self, scripts: &[Script]) -> Result<Vec<Utf8PathBuf>, Error> {
        let artifacts = scripts
            .iter()
            .map(Script::write_artifact)
            .collect::<Result<Vec<_>, _>>()?;

        let mut manifest = tempfile::Builder::new()
            .prefix("mission-")
            .suffix(".batch")
            .tempfile()?;
        for artifact in &artifacts {
            writeln!(manifest, "{artifact}")?;
        }
        manifest.flush()?;

        let manifest_path = Utf8Path::from_path(manifest.path())
            .ok_or_else(|| {
                Error::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "non-UTF-8 manifest path",
                ))
            })?
            .to_owned();
        self.run_batch(&manifest_path)?;
        Ok(artifacts)
    }
}

/// Fresh retained `.log` temp file for a new session.
fn allocate_log() -> Result<Utf8PathBuf, Error> {
    let file = tempfile::Builder::new().prefix("gmat-").suffix(".log").tempfile()?;
    let (_, path) = file.keep().map_err(|e| Error::Io(e.error))?;
    Ok(utf8_path(path)?)
}
