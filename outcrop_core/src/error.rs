// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Environment-resolution errors.
//!
//! The tracker itself performs read-only geometry queries and idempotent
//! class mutations, none of which fail. What can fail is resolving the
//! environment in the first place: the configured container may be absent,
//! or there may be no rendering environment at all. Backends surface both
//! as [`TrackerError`] instead of tracking nothing silently.

use alloc::string::String;
use thiserror::Error;

/// Failure to resolve the tracked environment.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    /// The configured container id did not match any element.
    #[error("container element `{id}` not found")]
    ContainerNotFound {
        /// The id that failed to resolve.
        id: String,
    },

    /// No window/document is available in this execution environment.
    #[error("no window or document in this execution environment")]
    NoDocument,
}
