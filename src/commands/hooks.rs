//! `hooks` command.

use hookmap_core::HookResult;

use crate::demo::DemoHooks;
use crate::output::{self, OutputFormat};

/// List the built-in hooks.
pub fn execute(format: OutputFormat) -> HookResult<()> {
    let hooks = DemoHooks::new();
    output::print_list(&hooks.describe(), format)
}
