//! Spendlog - Conversational Expense Logging Assistant
//!
//! This crate turns free-text purchase descriptions into structured expense
//! records through an LLM extraction oracle, asking follow-up questions for
//! whatever the oracle could not find and persisting completed records.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
