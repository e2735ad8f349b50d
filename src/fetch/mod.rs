// src/fetch/mod.rs
//
// Remote-store plumbing: OAuth2 token exchange and the two file endpoints
// the sync needs (recursive listing, content download). No normalization
// logic lives here.

pub mod auth;
pub mod files;

pub use auth::DropboxAuth;
pub use files::{DropboxClient, Entry};
