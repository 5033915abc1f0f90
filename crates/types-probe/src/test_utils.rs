//! Test utilities for driving the resolver without a registry.
