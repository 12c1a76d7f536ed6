//! `goven vendor` command

use anyhow::Result;
use serde::Serialize;

use crate::cli::VendorArgs;
use goven::ops::goven_vendor::{vendor, VendorOptions, VendorResult};
use goven::util::shell::{Shell, Status};
use goven::util::GlobalContext;

#[derive(Serialize)]
struct VendorEvent<'a> {
    reason: &'static str,
    #[serde(flatten)]
    result: &'a VendorResult,
}

pub fn execute(args: VendorArgs, shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new(args.gopath.as_deref())?;

    let opts = vendor_options(args, ctx.config());

    let span = shell.span(Status::Vendoring, &opts.package);
    let result = vendor(&ctx, &opts, shell)?;

    if let Some(report) = &result.report {
        if !report.is_clean() {
            shell.warn(format!(
                "{} file(s) could not be rewritten",
                report.skipped.len()
            ));
        }
    }

    if shell.is_json() {
        shell.json_event(&VendorEvent {
            reason: "vendor-finished",
            result: &result,
        });
    } else {
        span.finish_with_message(summary(&result));
    }

    Ok(())
}

/// Merge command-line flags over the configured defaults.
fn vendor_options(args: VendorArgs, config: &goven::util::Config) -> VendorOptions {
    let mut opts = VendorOptions::from_config(args.package, config);
    opts.copy = !args.no_copy;
    opts.rewrite = !args.no_rewrite;
    if args.prefix.is_some() {
        opts.prefix = args.prefix;
    }
    opts.jobs = args.jobs.or(opts.jobs);
    if args.no_format {
        opts.format = None;
    }
    opts
}

fn summary(result: &VendorResult) -> String {
    match &result.report {
        Some(report) => format!(
            "vendoring {} ({} rewritten, {} unchanged, {} skipped)",
            result.package,
            report.rewritten.len(),
            report.unchanged,
            report.skipped.len()
        ),
        None => format!("vendoring {}", result.package),
    }
}
