//! SQLGuard splits raw SQL and procedural-SQL text into executable statements
//! and rejects batches that contain destructive keywords.
//!
//! # Overview
//!
//! Machine-generated SQL tends to arrive as one block of text. This crate turns
//! that block into an ordered list of statements that can be run one at a time,
//! without ever splitting on a semicolon that sits inside a string literal, a
//! quoted identifier, a comment or a dollar-quoted function body.
//!
//! # Key Features
//!
//! - Single-pass lexical segmentation (quotes, comments, `$tag$` bodies)
//! - Statement normalization (trimmed, `;`-terminated, no empty statements)
//! - Case-insensitive keyword guard that fails the whole batch
//! - Payload coercion for `{ "sql": ... }` / `{ "statements": [...] }` bodies
//! - A small executor seam for running accepted statements sequentially
//!
//! # Quick Start
//!
//! ```rust
//! use sqlguard_core::prelude::*;
//!
//! let split = split("SELECT ';' AS x; DO $$ BEGIN RAISE NOTICE 'a;b'; END $$;");
//! assert_eq!(split.statements().len(), 2);
//!
//! let guard = KeywordGuard::default();
//! guard.check(split.statements()).expect("nothing destructive here");
//!
//! let rejected = guard.check(&split_statements("DROP TABLE users;"));
//! assert!(rejected.unwrap_err().is_guard_violation());
//! ```

pub mod batch;
pub mod error;
pub mod exec;
pub mod guard;
pub mod prelude;
pub mod splitter;
