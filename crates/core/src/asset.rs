//! Asset path classification and mounting.
//!
//! Link and image targets that point inside the document's directory are
//! rewritten under a URL mount; whoever serves static files maps that mount
//! back to the directory. Nothing here touches the filesystem.

use std::borrow::Cow;

/// Default URL prefix for document-relative assets.
pub const DEFAULT_ASSET_MOUNT: &str = "/assets/";

const ABSOLUTE_PREFIXES: [&str; 4] = ["http://", "https://", "data:", "/"];

/// Rewrites document-relative targets under a fixed mount prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResolver {
    mount: String,
}

impl AssetResolver {
    /// Create a resolver for the given mount. A missing trailing slash is added.
    pub fn new(mount: impl Into<String>) -> Self {
        let mut mount = mount.into();
        if !mount.ends_with('/') {
            mount.push('/');
        }
        Self { mount }
    }

    /// The mount prefix, always ending in `/`.
    pub fn mount(&self) -> &str {
        &self.mount
    }

    /// Resolve a link or image target.
    ///
    /// Absolute URLs, `data:` URIs and root-relative paths are returned as-is;
    /// anything else is prefixed with the mount.
    pub fn resolve<'a>(&self, target: &'a str) -> Cow<'a, str> {
        if is_absolute(target) {
            Cow::Borrowed(target)
        } else {
            Cow::Owned(format!("{}{}", self.mount, target))
        }
    }
}

impl Default for AssetResolver {
    fn default() -> Self {
        Self::new(DEFAULT_ASSET_MOUNT)
    }
}

/// Returns true if the target must not be rewritten under the asset mount.
pub fn is_absolute(target: &str) -> bool {
    ABSOLUTE_PREFIXES.iter().any(|prefix| {
        target
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Resolve a target against [`DEFAULT_ASSET_MOUNT`].
pub fn resolve_asset_path(target: &str) -> Cow<'_, str> {
    if is_absolute(target) {
        Cow::Borrowed(target)
    } else {
        Cow::Owned(format!("{DEFAULT_ASSET_MOUNT}{target}"))
    }
}
