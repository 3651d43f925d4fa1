//! Paths that skip authentication.
//!
//! Matching is a literal byte-prefix test: no trailing-slash collapsing, no case folding.
//! One entry therefore covers its whole sub-tree. Some built-in entries
//! (`/api/blog-service/posts/`, `/api/blog-service/comment(s)/`) open every
//! resource below them; they are kept as-is on purpose and listed in DESIGN.md.

/// Websocket root, exempt on its own.
const WS_ROOT: &str = "/ws";
/// Everything under the websocket root is exempt as well.
const WS_PREFIX: &str = "/ws/";

pub const DEFAULT_PUBLIC_PATHS: &[&str] = &[
    "/api/user-service/signin",
    "/api/user-service/signup",
    "/api/user-service/verify",
    "/api/user-service/health-check",
    "/api/user-service/check-email",
    "/api/user-service/check-nickname",
    "/api/user-service/google",
    "/api/user-service/kakao",
    "/api/user-service/refresh-token",
    "/api/user-service/reset-password",
    "/health-check",
    "/api/summarize-service/health-check",
    "/api/matching-service/health-check",
    "/api/alarm-service/health-check",
    "/api/blog-service/posts/trending",
    "/swagger/blog-service/swagger-ui/",
    "/swagger/blog-service/swagger-ui/index.html",
    "/swagger/blog-service/v3/api-docs",
    "/api/github-service/health-check",
    "/api/user-service/details",
    "/api/user-service/profile-nickname",
    "/api/blog-service/health-check",
    "/api/portfolio-service/health-check",
    "/api/message-service/health-check",
    "/api/roadmap/health-check",
    "/api/alarm-service/notifications/subscribe",
    "/api/blog-service/comment/",
    "/api/blog-service/posts/",
    "/api/blog-service/comments/",
    "/api/blog-service/posts/user/",
];

/// Ordered, immutable list of exempt path prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicPathSet {
    prefixes: Vec<String>,
}

impl PublicPathSet {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prefixes: Vec<String> = prefixes.into_iter().map(Into::into).collect();
        for (i, a) in prefixes.iter().enumerate() {
            for b in prefixes.iter().skip(i + 1) {
                if a != b && (a.starts_with(b.as_str()) || b.starts_with(a.as_str())) {
                    tracing::debug!(
                        outer = %a.min(b),
                        inner = %a.max(b),
                        "overlapping public path prefixes"
                    );
                }
            }
        }
        Self { prefixes }
    }

    /// `true` when `path` needs no token.
    pub fn is_public(&self, path: &str) -> bool {
        if path == WS_ROOT || path.starts_with(WS_PREFIX) {
            return true;
        }
        self.prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }
}

impl Default for PublicPathSet {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_PATHS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_covers_its_subtree() {
        let set = PublicPathSet::default();
        for prefix in DEFAULT_PUBLIC_PATHS {
            for suffix in ["", "/", "x", "/deep/er?q=1", "%2F..", "ñ"] {
                let path = format!("{prefix}{suffix}");
                assert!(set.is_public(&path), "{path} should be public");
            }
        }
    }

    #[test]
    fn unlisted_paths_are_protected() {
        let set = PublicPathSet::default();
        for path in [
            "",
            "/",
            "/api/user-service/me",
            "/api/blog-service/posts",
            "/api/blog-service/post/1",
            "/health",
            "/wsx",
            "/w",
            "/api/ws/room",
        ] {
            assert!(!set.is_public(path), "{path} should be protected");
        }
    }

    #[test]
    fn websocket_root_and_children_are_public() {
        let set = PublicPathSet::new(Vec::<String>::new());
        assert!(set.is_public("/ws"));
        assert!(set.is_public("/ws/"));
        assert!(set.is_public("/ws/room1"));
        assert!(!set.is_public("/wss"));
    }

    #[test]
    fn no_normalization_is_applied() {
        let set = PublicPathSet::new(["/api/open/"]);
        assert!(set.is_public("/api/open/"));
        assert!(!set.is_public("/api/open"));
        assert!(!set.is_public("/API/open/"));
        assert!(!set.is_public("//api/open/"));
    }

    #[test]
    fn classification_is_stable() {
        let set = PublicPathSet::default();
        for path in ["/health-check", "/api/private", "/ws/a"] {
            assert_eq!(set.is_public(path), set.is_public(path));
        }
    }
}
