pub mod config;
pub mod embed;
pub mod fetcher;
pub mod logging;
pub mod retry;
pub mod url_model;

pub use embed::{embed, embed_resources, embed_resources_default, EmbedOptions};
pub use fetcher::{DefaultFetcher, FetchError, FetchedResource, Fetcher};
