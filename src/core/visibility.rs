//! Should the widget appear at all?
//!
//! Diagnostics tooling must not leak into production builds, but it also
//! must not silently vanish when the environment cannot be told apart.
//! When nothing says "production" the widget stays visible.

/// Environment name that hides the widget when `hide_in_production` is set.
pub const PRODUCTION: &str = "production";

/// Variables consulted, in order, for the ambient runtime environment name.
pub const RUNTIME_ENV_VARS: &[&str] = &["DEVBAR_ENV", "APP_ENV", "RUST_ENV"];

/// Read the ambient runtime environment name from the process environment.
///
/// Returns the first non-empty value of [`RUNTIME_ENV_VARS`], or `None` when
/// none is set.
pub fn runtime_environment_name() -> Option<String> {
    runtime_environment_name_from(|var| std::env::var(var).ok())
}

fn runtime_environment_name_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    RUNTIME_ENV_VARS
        .iter()
        .filter_map(|var| lookup(var))
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

/// Decide visibility.
///
/// * before the host has given the widget a viewport → hidden
/// * `hide_in_production == false` → visible
/// * explicit `environment` → visible unless it is `"production"`
/// * ambient runtime name → visible unless it is `"production"`
/// * nothing known → visible (fail open)
///
/// Empty strings count as "not supplied".
pub fn resolve_visibility(
    hydrated: bool,
    hide_in_production: bool,
    environment: Option<&str>,
    runtime_env: Option<&str>,
) -> bool {
    if !hydrated {
        return false;
    }
    if !hide_in_production {
        return true;
    }
    if let Some(env) = environment.filter(|e| !e.is_empty()) {
        return env != PRODUCTION;
    }
    if let Some(name) = runtime_env.filter(|n| !n.is_empty()) {
        return name != PRODUCTION;
    }
    // fail open
    true
}
