//! Base trait for state slices.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Marker trait for state slices.
///
/// Slices should be:
/// - Immutable (Clone to create new values)
/// - Comparable (PartialEq for detecting changes)
/// - Serializable (persisted as part of the snapshot)
pub trait Slice:
    Clone + PartialEq + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
}
