//! Output formats for a loaded log list.

pub mod openssl;
pub mod summary;

pub use openssl::{generate_openssl_conf, write_openssl_conf};
pub use summary::render_summary;
