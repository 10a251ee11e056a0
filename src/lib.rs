// src/lib.rs

//! newsdesk library
//!
//! News administration core: audience policy conversion, news record
//! models and a client for the news REST API.

pub mod audience;
pub mod error;
pub mod models;
pub mod services;
