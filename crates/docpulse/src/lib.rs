// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! docpulse library
//!
//! This module exports the configuration, tree model, activity state and
//! command handlers behind the `docpulse` binary, for use in integration
//! tests and by hosts embedding the tree.

pub mod commands;
pub mod config;
pub mod state;
pub mod tree;
