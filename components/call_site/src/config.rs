//! Dispatch configuration

use type_coercion::NarrowingPolicy;

/// Settings for call-site linking and coercion
///
/// # Example
///
/// ```
/// use call_site::DispatchConfig;
/// use type_coercion::NarrowingPolicy;
///
/// let config = DispatchConfig::default()
///     .with_specialization(false)
///     .with_narrowing(NarrowingPolicy::Checked);
/// assert!(!config.specialize);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Whether call sites may install specialized cache entries
    pub specialize: bool,
    /// Overflow policy for numeric narrowing
    pub narrowing: NarrowingPolicy,
}

impl DispatchConfig {
    /// Enable or disable call-site specialization
    pub fn with_specialization(mut self, enabled: bool) -> Self {
        self.specialize = enabled;
        self
    }

    /// Set the narrowing policy
    pub fn with_narrowing(mut self, policy: NarrowingPolicy) -> Self {
        self.narrowing = policy;
        self
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            specialize: true,
            narrowing: NarrowingPolicy::Truncate,
        }
    }
}
