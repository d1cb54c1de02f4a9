//! Unit tests for the autodock CLI
//!
//! These tests use scripted runtimes and run fast without a Docker daemon.

mod architecture;
mod diagnosis_service;
mod mcp_tools;
mod mocks;
