/// Lowest platform API level whose stats service accepts launcher atoms.
pub const MIN_SINK_API_LEVEL: u32 = 30;

/// Answers "can the sink take records on this platform at all".
pub trait FeatureGate: Send + Sync {
    fn sink_available(&self) -> bool;
}

impl FeatureGate for bool {
    fn sink_available(&self) -> bool {
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformGate {
    api_level: u32,
}

impl PlatformGate {
    pub fn new(api_level: u32) -> Self {
        Self { api_level }
    }

    pub fn api_level(&self) -> u32 {
        self.api_level
    }
}

impl FeatureGate for PlatformGate {
    fn sink_available(&self) -> bool {
        self.api_level >= MIN_SINK_API_LEVEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_gate_opens_at_minimum_level() {
        assert!(!PlatformGate::new(MIN_SINK_API_LEVEL - 1).sink_available());
        assert!(PlatformGate::new(MIN_SINK_API_LEVEL).sink_available());
        assert!(PlatformGate::new(34).sink_available());
    }
}
