//! UHS API (Universal Http Server API)
//! is a project which aims to create a universal facade API for http servers,
//! allowing developers to create universal features which will work for many server backends,
//! such as carbon_http_server, actix, etc...
//!
//! The facade covers the values every backend agrees on ([`http::StatusCode`],
//! [`header::HeaderMap`], ...) and the two seams a response helper needs from the
//! surrounding server: [`server::RequestHeaders`] and [`server::ResponseWriter`].

pub mod ascii;
pub mod header;
pub mod http;
pub mod server;
