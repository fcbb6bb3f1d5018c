//! Errors that end the host process.
//!
//! Failures inside a scripted call never reach this type: argument errors
//! stay Lua errors and boxing failures become string results (see
//! [`crate::lua`]).  Only a script that cannot be loaded or that dies with
//! an uncaught error surfaces here.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("cannot initialise Lua state: {0}")]
    Init(#[from] mlua::Error),

    #[error("{}: {source}", .path.display())]
    Script {
        path: PathBuf,
        source: mlua::Error,
    },
}

// ── Tests ─────────────────────────────────────────────────────────────────────
