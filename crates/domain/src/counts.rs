// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Snapshot of how many tenders exist, split by open and expired.
///
/// Fields are signed so that callers can hand over whatever the remote
/// service reported; [`TenderCounts::normalized`] floors each field at zero.
/// `open + expired == total` is the intended reading but is not enforced,
/// since the three values are computed independently upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenderCounts {
    /// All tenders.
    pub total: i64,
    /// Tenders whose end date has not passed.
    pub open: i64,
    /// Tenders whose end date has passed.
    pub expired: i64,
}

impl TenderCounts {
    /// The all-zero snapshot used on startup and after logout.
    pub const ZERO: Self = Self {
        total: 0,
        open: 0,
        expired: 0,
    };

    /// Creates a counts snapshot as given.
    #[must_use]
    pub const fn new(total: i64, open: i64, expired: i64) -> Self {
        Self {
            total,
            open,
            expired,
        }
    }

    /// Returns a copy with every negative field replaced by zero.
    ///
    /// Non-negative fields are left unchanged and no upper bound is applied.
    #[must_use]
    pub const fn normalized(self) -> Self {
        Self {
            total: floor_zero(self.total),
            open: floor_zero(self.open),
            expired: floor_zero(self.expired),
        }
    }

    /// Returns whether `open + expired` adds up to `total`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.open.checked_add(self.expired) == Some(self.total)
    }
}

const fn floor_zero(value: i64) -> i64 {
    if value < 0 { 0 } else { value }
}
