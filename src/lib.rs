//! Pathway Pilot - Clinical Decision Support Service
//!
//! This crate walks a patient through a guideline-derived diagnostic
//! pathway, keeps an audit log of every choice, and aggregates the
//! terminal node's clinical guidance into a downloadable report.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
