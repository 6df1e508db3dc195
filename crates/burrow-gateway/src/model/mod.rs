mod link;

pub use link::{ShortenRequest, ShortenResponse};
