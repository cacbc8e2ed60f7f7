//! Single-invocation lock for a working directory.
//!
//! The lock is an advisory `flock` on `.node-build.lock`. The kernel drops it
//! when the holding process exits for any reason, so a file left behind by an
//! interrupted build does not block the next one.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::core::{BuildError, BuildResult};

/// Name of the lock file created in the working directory.
pub const LOCK_FILE_NAME: &str = ".node-build.lock";

/// Exclusive hold on a working directory, released on drop.
///
/// The downloaded driver and the generated sources are written without any
/// other coordination, so two builds must never share a directory.
#[derive(Debug)]
pub struct BuildLock {
    path: PathBuf,
    // Held for the flock; closing it releases the lock.
    _file: File,
}

impl BuildLock {
    /// Acquire the lock in `dir`, failing if another build holds it.
    pub fn acquire(dir: &Path) -> BuildResult<BuildLock> {
        let path = dir.join(LOCK_FILE_NAME);

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| BuildError::io(&path, e))?;

        if let Err(e) = try_lock_exclusive(&file) {
            if e.kind() == io::ErrorKind::WouldBlock {
                let pid = read_owner_pid(&path);
                return Err(BuildError::Locked { path, pid });
            }
            return Err(BuildError::io(path, e));
        }

        // Owner pid helps when diagnosing contention.
        file.set_len(0)
            .and_then(|()| writeln!(file, "{}", std::process::id()))
            .map_err(|e| BuildError::io(&path, e))?;
        tracing::debug!("acquired build lock {}", path.display());

        Ok(BuildLock { path, _file: file })
    }

    /// Path of the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn read_owner_pid(path: &Path) -> Option<u32> {
    std::fs::read_to_string(path).ok()?.trim().parse().ok()
}

#[cfg(unix)]
fn try_lock_exclusive(file: &File) -> io::Result<()> {
    use rustix::fs::{flock, FlockOperation};
    use std::os::unix::io::AsFd;

    flock(file.as_fd(), FlockOperation::NonBlockingLockExclusive)
        .map_err(|e| io::Error::from_raw_os_error(e.raw_os_error()))
}

#[cfg(not(unix))]
fn try_lock_exclusive(_file: &File) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "build locking requires a unix host",
    ))
}
