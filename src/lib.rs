#![warn(missing_docs)]
//! Modwatch is a reviewer-side client for a trigger moderation backend: it
//! follows a trigger's moderation lifecycle as a live event timeline and
//! performs the reviewer actions (approve, requeue, delete) against it.

pub mod actions;
pub mod client;
pub mod cmd;
pub mod config;
pub mod history;
pub mod http_client;
pub mod models;
pub mod probe;
pub mod session;
pub mod stream;
pub mod timeline;
