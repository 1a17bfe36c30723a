//! CLI command handlers. Each command is in its own file.

mod embed;
mod io;
mod mime;
mod resolve;
mod urls;

pub use embed::{run_embed, EmbedArgs};
pub use mime::run_mime;
pub use resolve::run_resolve;
pub use urls::run_urls;
