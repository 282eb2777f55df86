//! Supply the build-time size constants the fixtures require.
//!
//! The surrounding build system may override the defaults through the
//! `WIO_PKG_ARENA_SIZE` and `WIO_PKG_BUFFER_SIZE` environment variables.
//! The library checks the supplied values against the expected literals
//! with const assertions, so a misconfigured build fails before anything
//! runs.

use std::env;

fn size_constant(var: &str, default: &str) {
    let value = env::var(var).unwrap_or_else(|_| default.to_string());

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        panic!("{var} must be a decimal integer, got {value:?}");
    }

    println!("cargo:rustc-env={var}={value}");
    println!("cargo:rerun-if-env-changed={var}");
}

fn main() {
    size_constant("WIO_PKG_ARENA_SIZE", "256");
    size_constant("WIO_PKG_BUFFER_SIZE", "256");
}
