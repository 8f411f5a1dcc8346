//! Data sources behind the cache
//!
//! - [`RemoteSource`]: the authoritative catalog API
//! - [`LocalFallbackSource`]: bundled data served when the API is unreachable

pub mod local;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod remote;

pub use local::{LocalFallbackSource, StaticCatalog};
#[cfg(any(test, feature = "test-util"))]
pub use mock::{MockCallCounts, MockRemoteSource};
pub use remote::{HttpRemoteSource, RemoteSource};
