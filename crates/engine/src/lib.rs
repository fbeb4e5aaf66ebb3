// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! clipflow pipeline drivers

mod clock;
mod handle;
mod simulator;

pub use clock::TokioClock;
pub use handle::ProgressHandle;
pub use simulator::Simulator;
