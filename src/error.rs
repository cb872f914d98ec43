//! Error types for constructing simulation state and loading settings.
//!
//! Nothing inside a frame can fail: the per-frame path is total over finite
//! floats and capacity overflow is reported through `Option` returns. Errors
//! only arise when storage is allocated or configuration is read.

use glam::Vec2;
use thiserror::Error;

/// Top-level error enum for the simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// A set was requested with no slots at all.
    #[error("{what} capacity must be greater than zero")]
    ZeroCapacity { what: &'static str },

    /// Slot storage could not be reserved up front.
    #[error("failed to allocate {capacity} {what} slots")]
    Allocation {
        what: &'static str,
        capacity: usize,
        #[source]
        source: std::collections::TryReserveError,
    },

    /// A tunable is outside the range the simulation accepts.
    #[error("setting '{name}' = {value} is outside {range}")]
    InvalidSetting {
        name: &'static str,
        value: f32,
        range: &'static str,
    },

    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

/// Reserve `capacity` zeroed vector slots, failing instead of aborting when
/// the allocator refuses.
pub(crate) fn alloc_slots(what: &'static str, capacity: usize) -> SimResult<Vec<Vec2>> {
    alloc_filled(what, capacity, Vec2::ZERO)
}

/// Reserve `capacity` slots filled with `value`.
pub(crate) fn alloc_filled<T: Clone>(
    what: &'static str,
    capacity: usize,
    value: T,
) -> SimResult<Vec<T>> {
    let mut slots = reserve(what, capacity)?;
    slots.resize(capacity, value);
    Ok(slots)
}

/// Empty vector with room for exactly `capacity` elements.
pub(crate) fn reserve<T>(what: &'static str, capacity: usize) -> SimResult<Vec<T>> {
    if capacity == 0 {
        return Err(SimError::ZeroCapacity { what });
    }
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(capacity)
        .map_err(|source| SimError::Allocation {
            what,
            capacity,
            source,
        })?;
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_slots_zeroed() {
        let slots = alloc_slots("particle", 4).unwrap();
        assert_eq!(slots.len(), 4);
        assert!(slots.iter().all(|v| *v == Vec2::ZERO));
    }

    #[test]
    fn test_alloc_zero_capacity_rejected() {
        let err = alloc_slots("planet", 0).unwrap_err();
        assert!(matches!(err, SimError::ZeroCapacity { what: "planet" }));
        assert_eq!(err.to_string(), "planet capacity must be greater than zero");
    }

    #[test]
    fn test_alloc_huge_capacity_fails_cleanly() {
        let err = alloc_filled("boundary", usize::MAX, 0u8).unwrap_err();
        assert!(matches!(err, SimError::Allocation { .. }));
    }
}
