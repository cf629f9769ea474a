//! Small utilities used across the crate.


/// Types that have a notion of “being empty” and can create such an empty
/// instance.
///
/// This is very similar to `Default` from the standard library, but makes
/// it explicit that the returned instance is *empty* and not just any
/// default instance. Pools use this to zero-initialize freshly allocated
/// elements.
pub trait Empty {
    /// Returns an empty value of this type.
    fn empty() -> Self;
}

impl Empty for () {
    fn empty() -> Self {}
}
