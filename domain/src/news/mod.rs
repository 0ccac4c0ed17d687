//! News subdomain
//!
//! A run starts from a batch of short, generated news stories. Each story is
//! pinned to one category and one region drawn from fixed catalogues so the
//! batch stays varied from day to day.

pub mod catalog;
pub mod entities;
