// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Serialization of cascades over one schedule.
//!
//! A schedule is either `Idle` or `Recomputing`. A caller must hold a
//! [`CascadeGuard`] for the duration of a mutation and its cascade; a second
//! caller is refused rather than queued.

use crate::error::CoreError;
use std::sync::atomic::{AtomicBool, Ordering};

/// Where a schedule is in its recompute cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleState {
    Idle,
    Recomputing,
}

/// Hands out at most one [`CascadeGuard`] at a time.
#[derive(Debug, Default)]
pub struct ScheduleCoordinator {
    recomputing: AtomicBool,
}

impl ScheduleCoordinator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            recomputing: AtomicBool::new(false),
        }
    }

    /// Moves the schedule from `Idle` to `Recomputing`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::CascadeInProgress` if a guard is already held.
    pub fn try_begin(&self) -> Result<CascadeGuard<'_>, CoreError> {
        self.recomputing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CoreError::CascadeInProgress)?;
        Ok(CascadeGuard { coordinator: self })
    }

    #[must_use]
    pub fn state(&self) -> ScheduleState {
        if self.recomputing.load(Ordering::Acquire) {
            ScheduleState::Recomputing
        } else {
            ScheduleState::Idle
        }
    }
}

/// Returns the schedule to `Idle` when dropped.
#[derive(Debug)]
pub struct CascadeGuard<'a> {
    coordinator: &'a ScheduleCoordinator,
}

impl Drop for CascadeGuard<'_> {
    fn drop(&mut self) {
        self.coordinator.recomputing.store(false, Ordering::Release);
    }
}
