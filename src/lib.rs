//! funweb - a small HTTP/1.1 server built directly on the byte stream
//!
//! The request is read "manually": no HTTP library sits between the socket
//! and the dispatch logic. One connection is accepted at a time, the header
//! block is consumed line by line, the target is pulled out of the `GET`
//! line, and the response is serialized by hand with newline-only line
//! endings.
//!
//! # Endpoints
//!
//! - `/` - root page with a `${links}` directory-listing substitution
//! - `/random` - the random-image page
//! - `/json` - a random image as JSON instead of HTML
//! - `/file/<path>` - existence check for a raw file
//! - `/multiply?num1=3&num2=4` - integer multiplication
//! - `/github?query=users/<owner>/repos` - proxied GitHub repository listing
//! - `/currentGrade?assign=540&quiz=85&exam=200` - course grade calculator
//! - `/cashier?price=21.50&paid=22.00` - change decomposition
//!
//! Anything else answers `400 Bad Request` with a fixed body.
//!
//! # Examples
//!
//! ```no_run
//! use funweb::{FsAssets, Server};
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() {
//!     Server::builder()
//!         .listener(TcpListener::bind("127.0.0.1:9000").await.unwrap())
//!         .assets(FsAssets::new("www"))
//!         .build()
//!         .launch()
//!         .await;
//! }
//! ```
//!
//! External collaborators (file access, the outbound GitHub fetch, the
//! random-image source) are injected through the [`SiteAssets`] and
//! [`FetchJson`] traits and the router's RNG, so every handler can be unit
//! tested without a socket, a filesystem, or the network.

pub(crate) mod http {
    pub mod query;
    pub(crate) mod request;
    pub mod response;
    pub mod types;
}
pub(crate) mod routes {
    pub(crate) mod github;
    pub(crate) mod math;
    pub mod router;
    pub(crate) mod site;
}
pub(crate) mod server {
    pub(crate) mod connection;
    pub(crate) mod server_impl;
}
pub mod assets;
pub(crate) mod errors;
pub mod fetch;

pub use crate::{
    assets::{FsAssets, SiteAssets},
    fetch::{FetchJson, HttpFetcher},
    http::{
        query,
        request::Request,
        response::Reply,
        types::{ContentType, StatusCode},
    },
    routes::router::Router,
    server::server_impl::{Server, ServerBuilder},
};
