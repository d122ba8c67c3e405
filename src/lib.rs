//! Server-rendered front end for a Plone REST API backend.
//!
//! Pages are block trees fetched from the content API and rendered to HTML
//! on the server. Before rendering, each request may be redirected to the
//! visitor's preferred language.

pub mod api;
pub mod blocks;
pub mod config;
pub mod error;
pub mod i18n;
pub mod redirect;
pub mod retry;
pub mod server;
