//! Workspace root package. Exists to host shared dev tooling (git hooks);
//! all functionality lives in the `crates/` members.
