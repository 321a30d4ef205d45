//! Base trait for slice actions.

/// Marker trait for actions that target a single slice.
///
/// Actions represent:
/// - Results of API calls (sign-in response, profile update)
/// - Local session events (sign-out)
///
/// Actions are data only: serializable, comparable, and free of callbacks.
pub trait SliceAction: Clone + PartialEq + Send + 'static {
    /// Stable tag in `slice/operation` form, used for logging.
    fn tag(&self) -> &'static str;
}
