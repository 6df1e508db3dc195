mod link;

pub use link::{create_url_handler, fallback_handler, redirect_handler, shorten_url_handler};
