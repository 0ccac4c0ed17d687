//! Quiz subdomain
//!
//! Questions are generated per language from the day's news. A batch of K
//! questions consists of K-1 grammar questions (each tied to one grammar
//! topic and one story) followed by a single vocabulary question built
//! around a randomly drawn word.

pub mod poll;
pub mod question;
pub mod slot;
pub mod topics;
pub mod word;
