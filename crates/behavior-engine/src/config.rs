//! Node configuration.

/// Settings for a [`Repeater`](crate::Repeater).
///
/// The default repeats forever and ignores child failures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepeaterConfig {
    /// Number of completed child activations after which the repeater
    /// succeeds. `None` repeats forever.
    pub limit: Option<u32>,

    /// Stop and report `Failure` the first time the child fails.
    pub stop_on_failure: bool,
}

impl RepeaterConfig {
    /// Repeats forever.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Repeats until the child has completed `limit` activations.
    pub fn times(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Sets whether a child failure ends the repetition.
    pub fn stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }
}
