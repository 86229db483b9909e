// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Transaction handle
//!
//! The minimal view of a server-side unit of work that header generation
//! needs: an id, an optional name, and a timer.

use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// A tracked unit of work.
///
/// Callers pass `Option<&Transaction>` explicitly; `None` means the code is
/// running outside any tracked transaction.
#[derive(Debug)]
pub struct Transaction {
    id: String,
    name: Mutex<Option<String>>,
    started: Instant,
    ended: Mutex<Option<Duration>>,
    queue_time_ms: u64,
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl Transaction {
    /// Start a new unnamed transaction.
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            name: Mutex::new(None),
            started: Instant::now(),
            ended: Mutex::new(None),
            queue_time_ms: 0,
        }
    }

    /// Set the time the request spent queued before reaching the app.
    pub fn with_queue_time_ms(mut self, queue_time_ms: u64) -> Self {
        self.queue_time_ms = queue_time_ms;
        self
    }

    /// Unique hex guid of this transaction.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Name the transaction.
    pub fn set_name(&self, name: impl Into<String>) {
        *self.name.lock() = Some(name.into());
    }

    /// The transaction name, if one was set. An empty name counts as unset.
    pub fn name(&self) -> Option<String> {
        self.name.lock().clone().filter(|n| !n.is_empty())
    }

    /// Stop the timer. Later calls keep the first recorded duration.
    pub fn end(&self) {
        let mut ended = self.ended.lock();
        if ended.is_none() {
            *ended = Some(self.started.elapsed());
        }
    }

    pub fn is_ended(&self) -> bool {
        self.ended.lock().is_some()
    }

    /// Elapsed time in milliseconds, frozen once the transaction has ended.
    pub fn duration_ms(&self) -> u64 {
        let elapsed = (*self.ended.lock()).unwrap_or_else(|| self.started.elapsed());
        u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
    }

    pub fn queue_time_ms(&self) -> u64 {
        self.queue_time_ms
    }
}
