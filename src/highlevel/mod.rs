//! High-level convenience API.
//!
//! This layer provides [`Weat`], an ergonomic runner that owns a
//! [`SimilarityProvider`](crate::kernel::SimilarityProvider) and a
//! [`WeatConfig`](crate::config::WeatConfig), validates inputs, and delegates
//! to the [`stats`](crate::stats) layer.

pub mod client;

pub use client::{TestReport, TestResult, Weat};
