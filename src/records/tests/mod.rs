//! Unit tests for platform record keeping.
