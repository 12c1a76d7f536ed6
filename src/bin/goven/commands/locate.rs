//! `goven locate` command

use anyhow::Result;
use serde::Serialize;

use crate::cli::LocateArgs;
use goven::ops::goven_locate::{locate, LocateResult};
use goven::util::shell::{Shell, Status};
use goven::util::GlobalContext;

#[derive(Serialize)]
struct LocateEvent<'a> {
    reason: &'static str,
    #[serde(flatten)]
    result: &'a LocateResult,
}

pub fn execute(args: LocateArgs, shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new(args.gopath.as_deref())?;
    let prefix = args.prefix.or_else(|| ctx.config().vendor.prefix.clone());

    let result = locate(&ctx, &args.package, prefix.as_deref())?;

    if shell.is_json() {
        shell.json_event(&LocateEvent {
            reason: "package-located",
            result: &result,
        });
        return Ok(());
    }

    println!("{}", result.source_dir.display());
    if let (Some(own), Some(vendored_as)) = (&result.own, &result.vendored_as) {
        shell.status(Status::Found, format!("{} vendors it as {}", own, vendored_as));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_locate_args() {
        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            locate: LocateArgs,
        }

        let cli = TestCli::parse_from(["test", "host.example/pkg", "--prefix", "third_party"]);
        assert_eq!(cli.locate.package.as_str(), "host.example/pkg");
        assert_eq!(cli.locate.prefix.as_deref(), Some("third_party"));
    }
}
