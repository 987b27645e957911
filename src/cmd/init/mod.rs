//! `lbrender init` — generate a starter state file.
//!
//! Supports two modes:
//! - **Template mode** (default): writes a static template state file.
//! - **Interactive mode** (`--interactive`): walks through a step-by-step wizard.

mod interactive;
mod serialize;
mod template;

use crate::cli::InitArgs;
use crate::error::LbrenderError;

pub fn execute(args: &InitArgs) -> Result<(), LbrenderError> {
    if args.interactive {
        interactive::run(args)
    } else {
        template::run(args)
    }
}
