/// Classification for retry policy.
///
/// | Class | Retry same provider? | Try another provider? |
/// |-------|---------------------|-----------------------|
/// | `Never` | No | No |
/// | `WithBackoff` | Yes, after a delay | Yes |
/// | `NextProvider` | No | Yes |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - bad symbol or terminal failure.
    Never,

    /// Transient failure such as rate limiting (429) or a timeout.
    WithBackoff,

    /// This provider can't serve the request but another one might.
    NextProvider,
}

impl RetryClass {
    /// Whether the same request may succeed if repeated later.
    pub fn is_transient(self) -> bool {
        matches!(self, Self::WithBackoff)
    }
}
