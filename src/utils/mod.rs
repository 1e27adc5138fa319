// Copyright © Senka
// SPDX-License-Identifier: Apache-2.0

//! # Utility Functions
//!
//! Pure helpers shared by every extractor in the decode pipeline.
//!
//! ## Components
//!
//! ### Event access (`event`)
//! - First/all attribute values for a key, order-preserving
//! - First/all events matching a type or type set
//!
//! ### Amount lexing (`amount`)
//! - Splitting compound `quantity+denom` tokens (`1000000ukava`)
//! - Denom aliasing and exact decimal scaling per token
//! - Reward lists parsed out of comma-joined transfer amounts

/// Compound amount-token lexing, denom aliasing and decimal scaling
pub mod amount;

/// Accessors over event lists and their ordered attribute lists
pub mod event;
