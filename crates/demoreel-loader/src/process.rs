//! Demos backed by an external process.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use tracing::{debug, info, warn};

use demoreel_core::{Demo, DemoError, DemoName, DemoResult, Viewport};

use crate::manifest::DemoDef;

/// Environment variable carrying the viewport width.
pub const WIDTH_ENV: &str = "DEMOREEL_WIDTH";
/// Environment variable carrying the viewport height.
pub const HEIGHT_ENV: &str = "DEMOREEL_HEIGHT";

/// A demo that runs as a child process.
///
/// `run` spawns the command with the viewport in [`WIDTH_ENV`] and
/// [`HEIGHT_ENV`]; `stop` kills and reaps it, blocking the calling thread
/// until the child has exited. Dropping a running demo kills the child.
#[derive(Debug)]
pub struct ProcessDemo {
    name: DemoName,
    program: PathBuf,
    args: Vec<String>,
    env: BTreeMap<String, String>,
    cwd: PathBuf,
    child: Option<Child>,
}

impl ProcessDemo {
    /// Create a demo that runs `program` in `cwd`.
    #[must_use]
    pub fn new(name: DemoName, program: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            name,
            program: program.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            cwd: cwd.into(),
            child: None,
        }
    }

    /// Build a demo from a catalog entry whose manifest lives in `catalog_dir`.
    #[must_use]
    pub fn from_def(def: &DemoDef, catalog_dir: &Path) -> Self {
        let cwd = def
            .cwd
            .as_ref()
            .map_or_else(|| catalog_dir.to_path_buf(), |c| catalog_dir.join(c));
        Self::new(def.name.clone(), resolve_program(&def.command, catalog_dir), cwd)
            .with_args(def.args.iter().cloned())
            .with_envs(def.env.clone())
    }

    /// Append program arguments.
    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.args.extend(args);
        self
    }

    /// Add environment variables.
    #[must_use]
    pub fn with_envs(mut self, env: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env.extend(env);
        self
    }

    /// The program that is started.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Working directory of the child.
    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Whether a child is alive.
    pub fn is_running(&mut self) -> bool {
        match self.child.as_mut().map(Child::try_wait) {
            Some(Ok(None)) => true,
            Some(Ok(Some(status))) => {
                debug!(demo = %self.name, %status, "Demo process exited on its own");
                self.child = None;
                false
            },
            Some(Err(e)) => {
                warn!(demo = %self.name, error = %e, "Failed to poll demo process");
                false
            },
            None => false,
        }
    }

    fn stop_failed(&self, e: &std::io::Error) -> DemoError {
        DemoError::StopFailed {
            demo: self.name.to_string(),
            message: e.to_string(),
        }
    }
}

impl Demo for ProcessDemo {
    fn run(&mut self, viewport: Viewport) -> DemoResult<()> {
        if self.is_running() {
            debug!(demo = %self.name, "Demo process already running");
            return Ok(());
        }

        let child = Command::new(&self.program)
            .args(&self.args)
            .envs(&self.env)
            .env(WIDTH_ENV, viewport.width.to_string())
            .env(HEIGHT_ENV, viewport.height.to_string())
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|e| DemoError::StartFailed {
                demo: self.name.to_string(),
                message: format!("{}: {e}", self.program.display()),
            })?;

        info!(demo = %self.name, pid = child.id(), "Started demo process");
        self.child = Some(child);
        Ok(())
    }

    fn stop(&mut self) -> DemoResult<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        if let Ok(Some(status)) = child.try_wait() {
            debug!(demo = %self.name, %status, "Demo process already exited");
            return Ok(());
        }

        let pid = child.id();
        if let Err(e) = child.kill() {
            // InvalidInput means the child exited between try_wait and kill.
            if e.kind() != std::io::ErrorKind::InvalidInput {
                let err = self.stop_failed(&e);
                self.child = Some(child);
                return Err(err);
            }
        }
        let status = child.wait().map_err(|e| self.stop_failed(&e))?;
        info!(demo = %self.name, pid, %status, "Stopped demo process");
        Ok(())
    }
}

impl Drop for ProcessDemo {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Resolve a relative program path containing a separator against `base`.
/// Bare program names are left for `PATH` lookup.
fn resolve_program(command: &str, base: &Path) -> PathBuf {
    let path = Path::new(command);
    if path.is_relative() && path.components().count() > 1 {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}
