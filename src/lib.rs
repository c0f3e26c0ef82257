pub mod console;
pub mod download;
pub mod error;
pub mod fetch;
pub mod target;

pub use error::FetchError;
pub use fetch::{FetchReport, Fetcher};
pub use target::Target;
