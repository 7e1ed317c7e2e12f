//! Synthetic pointer gesture paths.
//!
//! A [`GesturePath`] is the unit handed to the automation driver: an ordered
//! sequence of timed pointer samples describing one stroke. Paths are
//! validated at construction and immutable afterwards, so the driver never
//! sees malformed coordinates.

/// Duration used for a plain tap stroke.
pub const TAP_DURATION_MS: u64 = 50;

/// Default duration for a swipe when the caller does not supply one.
pub const DEFAULT_SWIPE_DURATION_MS: u64 = 300;

/// Why a gesture path could not be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GestureError {
    #[error("coordinate is not a finite, non-negative number")]
    InvalidCoordinate,
}

/// One timed pointer sample within a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    pub x: f32,
    pub y: f32,
    /// Offset from the start of the stroke, in milliseconds.
    pub offset_ms: u64,
}

/// An ordered, immutable sequence of pointer samples with a total duration.
#[derive(Debug, Clone, PartialEq)]
pub struct GesturePath {
    samples: Vec<PathSample>,
    duration_ms: u64,
}

impl GesturePath {
    /// Single-point stroke at `(x, y)` with a near-zero duration.
    pub fn tap(x: f32, y: f32) -> Result<Self, GestureError> {
        check_coordinate(x)?;
        check_coordinate(y)?;
        Ok(Self {
            samples: vec![PathSample { x, y, offset_ms: 0 }],
            duration_ms: TAP_DURATION_MS,
        })
    }

    /// Two-point linear stroke from `(x1, y1)` to `(x2, y2)`.
    ///
    /// A zero duration is legal; the path still carries both endpoints and
    /// the driver decides how to replay it.
    pub fn swipe(x1: f32, y1: f32, x2: f32, y2: f32, duration_ms: u64) -> Result<Self, GestureError> {
        for c in [x1, y1, x2, y2] {
            check_coordinate(c)?;
        }
        Ok(Self {
            samples: vec![
                PathSample { x: x1, y: y1, offset_ms: 0 },
                PathSample { x: x2, y: y2, offset_ms: duration_ms },
            ],
            duration_ms,
        })
    }

    pub fn samples(&self) -> &[PathSample] {
        &self.samples
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// First sample of the stroke. A path always has at least one.
    pub fn start(&self) -> PathSample {
        self.samples[0]
    }

    /// Last sample of the stroke.
    pub fn end(&self) -> PathSample {
        self.samples[self.samples.len() - 1]
    }
}

fn check_coordinate(c: f32) -> Result<(), GestureError> {
    if c.is_finite() && c >= 0.0 {
        Ok(())
    } else {
        Err(GestureError::InvalidCoordinate)
    }
}
