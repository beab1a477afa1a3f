//! `cmrun [architecture] [build_type] [library_type] [program_name]`

use anyhow::Result;

use crate::cli::Cli;
use cmrun::ops::{cmake_run, RunOptions};
use cmrun::util::{ColorChoice, GlobalContext, Shell, SystemRunner};
use cmrun::Invocation;

pub fn execute(cli: Cli) -> Result<()> {
    let color = if cli.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let shell = Shell::from_flags(cli.quiet, cli.verbose, color);

    let invocation = Invocation::new(
        cli.architecture,
        cli.build_type,
        cli.library_type,
        cli.program_name,
    );

    let mut ctx = GlobalContext::new()?;
    if let Some(ref cmake) = cli.cmake {
        ctx = ctx.with_cmake(cmake);
    }

    let opts = RunOptions {
        dry_run: cli.dry_run,
    };

    // The built program's own exit status never becomes ours.
    let outcome = cmake_run(&ctx, &invocation, &opts, &SystemRunner, &shell)?;
    tracing::debug!("run finished: {:?}", outcome);

    Ok(())
}
