//! Integration tests for the design editor and navigation.
//!
//! These tests drive several components together through complete
//! workflows.
