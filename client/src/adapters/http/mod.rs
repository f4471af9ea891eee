//! HTTP adapter
//!
//! reqwest implementation of the newsfeed backend port.

pub mod client;

pub use client::HttpFeedApi;
