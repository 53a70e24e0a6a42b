/*
 * mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

pub mod diagnostic_collector;
pub mod stringify;
