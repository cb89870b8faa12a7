//! # Qbuild Architecture
//!
//! Qbuild is an **editable model for nested boolean filter queries**: groups of
//! rules joined by AND/OR, where each rule is a field / operator / value
//! triple. The output is a plain JSON tree that downstream translators (SQL,
//! MongoDB, ...) can turn into real queries; that translation is not done here.
//!
//! The library knows nothing about how the tree is drawn. A UI, the bundled
//! CLI, or anything else drives it through ids and receives snapshots back.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, render.rs)                          │
//! │  - Reads/writes query files, renders the tree               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session (api.rs)                                           │
//! │  - Owns the live tree and configuration                     │
//! │  - Dispatches edits, emits a snapshot after each one        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs) + Locate (locate.rs)              │
//! │  - Pure tree edits and lookups addressed by id              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Model (model.rs), Factory (factory.rs), Ids (id.rs)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//!
//! The session is the only owner of the tree. Nodes carry no parent pointer;
//! callers name the parent group by id when inserting or removing. Anything
//! handed out to observers is a deep copy.
//!
//! ## Module Overview
//!
//! - [`api`]: The session, entry point for all edits
//! - [`commands`]: Add, remove and update, one module each
//! - [`locate`]: Finding nodes, parents and nesting levels
//! - [`model`]: `Node`, `Rule`, `Group`, property assignments
//! - [`factory`]: Default rules and groups from configuration
//! - [`id`]: Id generation
//! - [`notify`]: Snapshot delivery to the observer
//! - [`view`]: Per-node display data for a presentation layer
//! - [`config`]: Fields, operators, combinators and display labels
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod factory;
#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures;
pub mod id;
pub mod locate;
pub mod model;
pub mod notify;
pub mod view;
