pub mod browser;
pub mod catalog;
pub mod cleaner;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod fetcher;
pub mod history;
pub mod logging;
pub mod painting;
pub mod session;
pub mod ui;

pub use config::Config;
pub use error::{FetchError, FetchResult};
pub use painting::PaintingRecord;
pub use session::BrowsingSession;
