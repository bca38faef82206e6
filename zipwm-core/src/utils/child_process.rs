//! Spawning programs from bindings without ever blocking the event loop.
use crate::errors::{Result, ZipwmError};
use nix::sys::wait::waitpid;
use nix::unistd::{fork, setsid, ForkResult};
use std::os::unix::process::CommandExt;
use std::process::{exit, Command, Stdio};

/// Run a shell command detached from the window manager.
///
/// Forks twice so the grandchild is reparented to init: the intermediate
/// child calls `setsid()` to drop the controlling terminal, forks again and
/// exits, and the manager reaps it immediately. The event loop never waits
/// on the spawned program itself.
///
/// # Errors
///
/// Fails when the first fork or the reap of the intermediate child fails.
pub fn spawn(command: &str) -> Result<()> {
    match unsafe { fork() }.map_err(|e| ZipwmError::SpawnProc(e.to_string()))? {
        ForkResult::Parent { child } => {
            waitpid(child, None).map_err(|e| ZipwmError::SpawnProc(e.to_string()))?;
            Ok(())
        }
        ForkResult::Child => {
            let _ = setsid();
            match unsafe { fork() } {
                Ok(ForkResult::Parent { .. }) | Err(_) => exit(0),
                Ok(ForkResult::Child) => {
                    let error = Command::new("sh")
                        .arg("-c")
                        .arg(command)
                        .stdin(Stdio::null())
                        .stdout(Stdio::null())
                        .exec();
                    eprintln!("zipwm: failed to exec {command:?}: {error}");
                    exit(1);
                }
            }
        }
    }
}
