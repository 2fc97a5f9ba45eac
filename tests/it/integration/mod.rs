//! Integration tests for mousenode.
//!
//! These tests verify the interaction between multiple components
//! and test complete workflows end-to-end.

mod tracking_workflow_tests;
