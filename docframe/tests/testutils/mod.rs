//! Test utilities for docframe integration tests
//!
//! Every fixture is backed by an in-memory store, so no live server is
//! needed.

pub mod test_fixture;
