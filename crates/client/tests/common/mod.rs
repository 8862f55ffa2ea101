//! Common test utilities for client testing.
//!
//! This module provides test infrastructure including:
//!
//! - [`harness`] - Fake transport and client construction
//! - [`fixtures`] - Canned feed documents

// Each test binary compiles this module separately and uses a subset.
#![allow(dead_code)]

pub mod fixtures;
pub mod harness;
