// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host implementations.

#[cfg(any(test, feature = "headless_adapter"))]
pub mod headless;
