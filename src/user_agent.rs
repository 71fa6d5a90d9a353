//! The `User-Agent` this client announces to the API.

use std::sync::OnceLock;

/// Product token identifying this client in API access logs.
pub(crate) const PRODUCT: &str = concat!("right-api-rust/", env!("CARGO_PKG_VERSION"));

/// Returns `right-api-rust/<version> (rust/<msrv>; <os>/<arch>)`.
pub(crate) fn user_agent() -> &'static str {
    static VALUE: OnceLock<String> = OnceLock::new();
    VALUE.get_or_init(|| format!("{} ({})", PRODUCT, platform()))
}

fn platform() -> String {
    let os = match std::env::consts::OS {
        "macos" => "darwin",
        os => os,
    };
    format!(
        "rust/{}; {}/{}",
        env!("CARGO_PKG_RUST_VERSION"),
        os,
        std::env::consts::ARCH
    )
}
