//! Error plumbing shared across the workspace.
//!
//! Every crate owns its domain error enum (`GatewayError`, `AuthenticationError`, ...)
//! and reports failures as `rootcause::Report<ThatError>`. This module only
//! fixes the alias so signatures read the same everywhere.

use rootcause::Report;

/// Result carrying a rootcause report with context type `C`.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Unreachable;

    impl std::fmt::Display for Unreachable {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "backend unreachable")
        }
    }

    impl std::error::Error for Unreachable {}

    fn fail() -> Result<(), Unreachable> {
        Err(Unreachable.into())
    }

    #[test]
    fn typed_context_converts_into_report() {
        assert!(fail().is_err());
    }

    #[test]
    fn ok_values_pass_through() {
        let ok: Result<&str> = Ok("token");
        assert_eq!(ok.expect("should be ok"), "token");
    }
}
