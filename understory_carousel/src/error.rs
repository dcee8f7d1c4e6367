// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host binding errors.

use core::fmt;

/// Error returned when a carousel cannot bind to its host container.
///
/// This is the only failure the component knows about. Out-of-range
/// navigation is handled by policy and never reported as an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BindError {
    /// The container has no slide holder region.
    MissingSlideHolder,
    /// The slide holder exists but has no slides to present.
    EmptySlideHolder,
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSlideHolder => f.write_str("container has no slide holder"),
            Self::EmptySlideHolder => f.write_str("slide holder has no slides"),
        }
    }
}

impl core::error::Error for BindError {}
