/// HTTP server configuration constants.

/// Interface the HTTP server binds to.
pub const BIND_HOST: &str = "127.0.0.1";

/// Port the HTTP server listens on.
pub const BIND_PORT: u16 = 8080;
