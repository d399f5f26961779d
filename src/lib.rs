//! Virtual Art Gallery: browse, search and bookmark artworks from the
//! Art Institute of Chicago public catalog.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod favorites;
pub mod gallery;
pub mod gui;
pub mod persistence;
pub mod types;
