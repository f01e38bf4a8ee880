//! Child process execution for picker invocations

use std::os::unix::process::ExitStatusExt;
use std::process::Stdio;
use std::time::Duration;

use nix::errno::Errno;
use nix::sys::signal::{kill, killpg, Signal};
use nix::unistd::Pid;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;
use tracing::debug;

use crate::shell::Invocation;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("output exceeded {limit} bytes")]
    OutputTooLarge { limit: usize },

    #[error("no response after {0:?}")]
    TimedOut(Duration),

    #[error("terminated by signal {0}")]
    Signaled(i32),
}

/// Limits applied to one picker run
#[derive(Debug, Clone, Copy)]
pub struct RunLimits {
    pub max_output_bytes: usize,
    pub timeout: Option<Duration>,
}

/// Exit code and captured streams of a finished picker
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// How to stop a picker that is abandoned before it exits
#[derive(Debug, Clone, Copy)]
enum Teardown {
    /// `kill_on_drop` covers a lone program
    Child,
    /// SIGKILL the pipeline's whole process group
    Group(Pid),
    /// SIGTERM the shell, whose trap stops the picker
    Terminate(Pid),
}

impl Teardown {
    fn for_invocation(invocation: &Invocation, pid: Option<u32>) -> Self {
        let Some(pid) = pid.and_then(|p| i32::try_from(p).ok()).map(Pid::from_raw) else {
            return Self::Child;
        };
        match invocation {
            Invocation::Direct { .. } => Self::Child,
            Invocation::Shell { terminal: false, .. } => Self::Group(pid),
            Invocation::Shell { terminal: true, .. } => Self::Terminate(pid),
        }
    }

    fn signal(self) {
        let result = match self {
            Self::Child => return,
            Self::Group(pgid) => killpg(pgid, Signal::SIGKILL),
            Self::Terminate(pid) => kill(pid, Signal::SIGTERM),
        };
        match result {
            Ok(()) | Err(Errno::ESRCH) => {}
            Err(e) => debug!("Failed to stop abandoned picker ({:?}): {}", self, e),
        }
    }
}

/// A running picker that is stopped on drop unless it was waited for
struct Running {
    child: Child,
    teardown: Teardown,
}

impl Running {
    fn finished(&mut self) {
        self.teardown = Teardown::Child;
    }
}

impl Drop for Running {
    fn drop(&mut self) {
        self.teardown.signal();
    }
}

/// Run `invocation` to completion, capturing stdout and stderr.
///
/// A picker still running when the returned future is dropped or the
/// timeout expires is stopped along with the rest of its pipeline.
pub async fn run(invocation: &Invocation, limits: RunLimits) -> Result<RunOutput, RunError> {
    let mut command = invocation.to_command();
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    // SIGKILL would beat the shell's own trap
    if !matches!(invocation, Invocation::Shell { terminal: true, .. }) {
        command.kill_on_drop(true);
    }
    let child = command.spawn().map_err(|source| RunError::Spawn {
        program: invocation.program().to_string(),
        source,
    })?;

    debug!("Spawned {} (pid {:?})", invocation.program(), child.id());

    let teardown = Teardown::for_invocation(invocation, child.id());
    let mut running = Running { child, teardown };
    let stdout = running.child.stdout.take();
    let stderr = running.child.stderr.take();

    let finished = async {
        let (stdout, stderr) = tokio::try_join!(
            read_capped(stdout, limits.max_output_bytes),
            read_capped(stderr, limits.max_output_bytes)
        )?;
        let status = running.child.wait().await?;
        running.finished();
        Ok::<_, RunError>((status, stdout, stderr))
    };

    let (status, stdout, stderr) = match limits.timeout {
        Some(timeout) => tokio::time::timeout(timeout, finished)
            .await
            .map_err(|_| RunError::TimedOut(timeout))??,
        None => finished.await?,
    };

    let code = match status.code() {
        Some(code) => code,
        None => return Err(RunError::Signaled(status.signal().unwrap_or(0))),
    };
    debug!("{} exited with code {}", invocation.program(), code);

    Ok(RunOutput {
        code,
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
    })
}

async fn read_capped<R>(stream: Option<R>, limit: usize) -> Result<Vec<u8>, RunError>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = Vec::new();
    if let Some(stream) = stream {
        stream.take(limit as u64 + 1).read_to_end(&mut buffer).await?;
    }
    if buffer.len() > limit {
        return Err(RunError::OutputTooLarge { limit });
    }
    Ok(buffer)
}
