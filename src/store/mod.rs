pub mod conflict;
pub mod coordinator;
pub mod lock;
pub mod state;
pub mod status;

use std::path::PathBuf;

/// Directory holding coordination state, created lazily on first write.
pub const STATE_DIR: &str = ".warden";
/// Shared state document inside [`STATE_DIR`].
pub const STATE_FILE: &str = "sync.json";
/// ProcessMutex sentinel inside [`STATE_DIR`], distinct from the state file.
pub const SENTINEL_FILE: &str = "sync.lock";

/// Walk up from the current directory to find an existing `.warden` root;
/// fall back to the current directory so state can be created lazily.
pub fn find_root() -> std::io::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let mut dir = cwd.clone();
    loop {
        if dir.join(STATE_DIR).exists() {
            return Ok(dir);
        }
        if !dir.pop() {
            return Ok(cwd);
        }
    }
}
