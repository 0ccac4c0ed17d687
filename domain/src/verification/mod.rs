//! Cross-verification domain
//!
//! This module contains the rules that decide whether a generated question
//! can be published.
//!
//! # Flow
//!
//! ```text
//!   questions ──► initial opinion (generator's own claim, as option text)
//!        │
//!        ├──► primary verifier ───► OpinionSet ─┐
//!        └──► secondary verifier ─► OpinionSet ─┤  failures resolved by
//!                                               │  VerifierFailurePolicy
//!                                               ▼
//!                           reconcile() per question ──► good / bad
//! ```
//!
//! Every question ends up in exactly one bucket. Rejections carry a
//! human-readable reason so the review channel can audit them.

pub mod opinion;
pub mod outcome;
pub mod policy;
pub mod reconcile;
