//! Rebuilding the user configuration binary and re-exec'ing into it.
//!
//! The user may drop a standalone `config.rs` into the zipwm config
//! directory. It is compiled into `zipwm-session` whenever it is newer than
//! the binary, and a restart execs that binary; without one the running
//! executable is re-exec'd unchanged. Build errors land in `build.log` and
//! are surfaced with a detached `xmessage`, leaving the running instance
//! alive.
use std::env;
use std::ffi::CString;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use zipwm_core::child_process;

const SOURCE_NAME: &str = "config.rs";
const BINARY_NAME: &str = "zipwm-session";
const BUILD_LOG: &str = "build.log";

fn config_dir() -> Option<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix("zipwm").ok()?;
    let home = dirs.get_config_home();
    fs::create_dir_all(&home).ok()?;
    Some(home)
}

/// Rebuild the user configuration if its source is newer than the compiled
/// binary, or unconditionally when forced. Returns false when a build was
/// attempted and failed; a missing source is not an error.
pub fn recompile(force: bool) -> bool {
    let Some(dir) = config_dir() else {
        return true;
    };
    let source = dir.join(SOURCE_NAME);
    if !source.exists() {
        return true;
    }
    let binary = dir.join(BINARY_NAME);
    if !force && !is_stale(&source, &binary) {
        return true;
    }

    let compiler = env::var("ZIPWM_RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let log_path = dir.join(BUILD_LOG);
    let Ok(log) = fs::File::create(&log_path) else {
        tracing::error!("could not open {}", log_path.display());
        return false;
    };

    tracing::info!("recompiling {}", source.display());
    let status = Command::new(&compiler)
        .arg(&source)
        .arg("-O")
        .arg("-o")
        .arg(&binary)
        .stdout(Stdio::null())
        .stderr(Stdio::from(log))
        .status();

    match status {
        Ok(status) if status.success() => true,
        Ok(_) => {
            surface_build_errors(&log_path);
            false
        }
        Err(err) => {
            tracing::error!("could not run {compiler:?}: {err}");
            false
        }
    }
}

/// Whether the configuration source is newer than its compiled binary.
fn is_stale(source: &Path, binary: &Path) -> bool {
    let Ok(binary_meta) = binary.metadata() else {
        return true;
    };
    match (
        source.metadata().and_then(|m| m.modified()),
        binary_meta.modified(),
    ) {
        (Ok(source_time), Ok(binary_time)) => source_time > binary_time,
        _ => true,
    }
}

fn surface_build_errors(log_path: &Path) {
    let contents = fs::read_to_string(log_path).unwrap_or_default();
    tracing::error!("configuration build failed:\n{contents}");
    let message = format!("xmessage -file {}", log_path.display());
    if let Err(err) = child_process::spawn(&message) {
        tracing::error!("could not display the build log: {err}");
    }
}

/// Replace this process with the freshest binary we have. Only returns on
/// failure; the X clients survive because the server owns them.
pub fn exec_restart(resume_state: Option<String>) {
    let session = config_dir()
        .map(|dir| dir.join(BINARY_NAME))
        .filter(|path| path.exists());
    let target = match session.or_else(|| env::current_exe().ok()) {
        Some(path) => path,
        None => {
            tracing::error!("no binary to restart into");
            return;
        }
    };

    let Ok(program) = CString::new(target.as_os_str().as_bytes()) else {
        return;
    };
    let mut argv = vec![program.clone()];
    if let Some(blob) = resume_state {
        if let (Ok(flag), Ok(state)) = (CString::new("--resume"), CString::new(blob)) {
            argv.push(flag);
            argv.push(state);
        }
    }

    tracing::info!("restarting as {}", target.display());
    let err = nix::unistd::execv(&program, &argv);
    tracing::error!("exec failed: {err:?}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    fn touch(path: &Path, when: SystemTime) {
        fs::write(path, b"x").unwrap();
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(when).unwrap();
    }

    #[test]
    fn a_missing_binary_is_stale() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join(SOURCE_NAME);
        fs::write(&source, b"fn main() {}").unwrap();
        assert!(is_stale(&source, &dir.path().join(BINARY_NAME)));
    }

    #[test]
    fn an_older_source_is_not_stale() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join(SOURCE_NAME);
        let binary = dir.path().join(BINARY_NAME);
        let now = SystemTime::now();
        touch(&source, now - Duration::from_secs(60));
        touch(&binary, now);
        assert!(!is_stale(&source, &binary));
    }

    #[test]
    fn a_newer_source_is_stale() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join(SOURCE_NAME);
        let binary = dir.path().join(BINARY_NAME);
        let now = SystemTime::now();
        touch(&binary, now - Duration::from_secs(60));
        touch(&source, now);
        assert!(is_stale(&source, &binary));
    }
}
