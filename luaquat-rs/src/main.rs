use std::path::Path;

use luaquat::{init_tracing, run_script, SCRIPT_FILE};

fn main() {
    init_tracing();

    // run_script owns the interpreter, so it is closed by the time we exit.
    if let Err(e) = run_script(Path::new(SCRIPT_FILE)) {
        eprintln!("luaquat: {e}");
        std::process::exit(1);
    }
}
