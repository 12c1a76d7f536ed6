//! Implementation of `goven locate`.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use crate::core::{PackageId, RewriteMapping};
use crate::util::GlobalContext;

/// Where a package lives and what it would be imported as once vendored.
#[derive(Debug, Clone, Serialize)]
pub struct LocateResult {
    pub package: PackageId,
    pub source_dir: PathBuf,
    /// Import path of the current directory, if it lies in a workspace root
    pub own: Option<PackageId>,
    /// Import path the package gets when vendored here
    pub vendored_as: Option<PackageId>,
}

/// Locate `package` without touching the filesystem.
pub fn locate(
    ctx: &GlobalContext,
    package: &PackageId,
    prefix: Option<&str>,
) -> Result<LocateResult> {
    let source_dir = ctx.roots().require_package(package)?;

    let own = match ctx.roots().resolve_current_package(ctx.cwd()) {
        Ok(own) => Some(own),
        Err(e) => {
            tracing::warn!("{}", e);
            None
        }
    };

    let vendored_as = match &own {
        Some(own) => Some(
            RewriteMapping::new(package.clone(), own, prefix)?
                .new_id()
                .clone(),
        ),
        None => None,
    };

    Ok(LocateResult {
        package: package.clone(),
        source_dir,
        own,
        vendored_as,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::GopathFixture;

    #[test]
    fn test_locate_inside_gopath() {
        let fixture = GopathFixture::new();
        let ctx = GlobalContext::with_cwd(fixture.project_dir(), fixture.roots());

        let result = locate(&ctx, &fixture.package_id(), Some("third_party")).unwrap();

        assert_eq!(result.source_dir, fixture.package_dir());
        assert_eq!(result.own.unwrap().as_str(), "proj.example/app");
        assert_eq!(
            result.vendored_as.unwrap().as_str(),
            "proj.example/app/third_party/host.example/pkg"
        );
        assert!(!fixture.project_dir().join("third_party").exists());
    }

    #[test]
    fn test_locate_outside_gopath() {
        let fixture = GopathFixture::new();
        let elsewhere = tempfile::TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(elsewhere.path().to_path_buf(), fixture.roots());

        let result = locate(&ctx, &fixture.package_id(), None).unwrap();

        assert_eq!(result.source_dir, fixture.package_dir());
        assert!(result.own.is_none());
        assert!(result.vendored_as.is_none());
    }

    #[test]
    fn test_locate_missing_package() {
        let fixture = GopathFixture::new();
        let ctx = GlobalContext::with_cwd(fixture.project_dir(), fixture.roots());
        let missing = PackageId::new("host.example/missing").unwrap();

        let err = locate(&ctx, &missing, None).unwrap_err();

        assert!(err.to_string().contains("could not find package `host.example/missing`"));
    }
}
