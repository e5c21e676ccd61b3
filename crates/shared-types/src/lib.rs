// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the swap details service
//!
//! This crate provides the domain types that are shared between the persistence
//! collaborator and the HTTP layer, avoiding circular dependencies.

pub mod filters;
pub mod non_empty_string;
pub mod swap_detail;

pub use filters::{ParsedParam, SwapFilters};
pub use non_empty_string::NonEmptyString;
pub use swap_detail::{NewSwapDetail, SwapDetail, SwapDetailPatch};
