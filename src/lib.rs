//! Workspace root package.
//!
//! Exists so workspace-level tooling such as the rusty-hook pre-commit hooks
//! has a package to attach to. The library lives in `crates/voltroute-lib` and
//! the command line front end in `crates/voltroute-cli`.
