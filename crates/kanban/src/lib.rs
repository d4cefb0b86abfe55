//! Kanban - a board-style task tracker.
//!
//! This crate provides both a CLI application and a library for keeping
//! tickets on a board: a column model, grouping and sorting of tickets into
//! lanes, a validated mutation API, and durable view preferences.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod board;
pub mod catalog;
pub mod domain;
pub mod error;
pub mod prefs;
pub mod seed;

// Application context and CLI (needed by binary)
pub mod app;
pub mod cli;

// Command implementations
pub mod commands;

// Text and JSON rendering
pub mod output;
