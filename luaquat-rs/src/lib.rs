//! Quaternions with operator syntax in Lua scripts.
//!
//! The host registers a `Quat` userdata class in a Lua 5.4 interpreter
//! ([`lua::LuaEngine`]) and runs [`SCRIPT_FILE`].  Scripts get
//! `Quat(x, y, z, w)`, the `*` / `+` operators, `tostring`, and the
//! `rad` / `deg` angle queries, all backed by [`quat::Quat`].

use std::path::Path;
use std::sync::Once;

pub mod error;
pub mod lua;
pub mod quat;

pub use error::HostError;
pub use lua::LuaEngine;
pub use quat::Quat;

/// Script executed by the `luaquat` binary, relative to the working directory.
pub const SCRIPT_FILE: &str = "main.lua";

/// Type tag of the scripted class; also the name of its global constructor.
pub const QUAT_CLASS: &str = "Quat";

static TRACING_INIT: Once = Once::new();

/// Initialise tracing output on stderr.
///
/// Safe to call more than once.  Nothing is installed unless `RUST_LOG` is
/// set, e.g. `RUST_LOG=luaquat=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(filter)
                .init();
        }
    });
}

/// Create an interpreter, run `path` to completion, and close the
/// interpreter again.
///
/// The engine is dropped before this returns, whether the script succeeded
/// or not.
pub fn run_script(path: &Path) -> Result<(), HostError> {
    let engine = LuaEngine::new()?;
    tracing::info!(path = %path.display(), "running script");
    engine
        .load_file(path)
        .map_err(|source| HostError::Script { path: path.to_path_buf(), source })?;
    tracing::info!(path = %path.display(), "script finished");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
