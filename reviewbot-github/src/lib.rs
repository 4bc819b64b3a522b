//! Reviewbot GitHub - GitHub integration for reviewbot
//!
//! This crate provides the octocrab-backed implementation of
//! [`reviewbot_core::ReviewerApi`].

mod client;
mod error;
mod reviewers;

pub use client::{GitHubClient, DEFAULT_API_URL};
pub use error::{Error, Result};
