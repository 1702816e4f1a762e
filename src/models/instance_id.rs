use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Upper bound for minted correlation ids.
pub const INSTANCE_ID_MAX: i32 = 1 << 20;

/// Opaque correlation id grouping records of one user action or snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(i32);

impl InstanceId {
    /// The "unset" id used when the caller supplies none.
    pub const DEFAULT: InstanceId = InstanceId(0);

    pub fn fake(id: i32) -> Self {
        Self(id)
    }

    pub fn id(&self) -> i32 {
        self.0
    }

    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub trait InstanceIdSource: Send + Sync {
    fn new_instance_id(&self) -> InstanceId;
}

/// Mints ids uniformly from `1..=max`.
#[derive(Debug, Clone, Copy)]
pub struct InstanceIdSequence {
    max: i32,
}

impl InstanceIdSequence {
    /// `max` is clamped into `1..=INSTANCE_ID_MAX`.
    pub fn new(max: i32) -> Self {
        Self {
            max: max.clamp(1, INSTANCE_ID_MAX),
        }
    }

    pub fn max(&self) -> i32 {
        self.max
    }
}

impl Default for InstanceIdSequence {
    fn default() -> Self {
        Self::new(INSTANCE_ID_MAX)
    }
}

impl InstanceIdSource for InstanceIdSequence {
    fn new_instance_id(&self) -> InstanceId {
        InstanceId(rand::thread_rng().gen_range(1..=self.max))
    }
}
