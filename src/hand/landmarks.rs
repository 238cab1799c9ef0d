/// Number of landmarks in one hand pose
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Normalized landmark position in frame space
///
/// `x` and `y` are in `[0, 1]` relative to the frame width and height, with `y`
/// growing downward. `z` is relative depth as reported by the estimator.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Mirror horizontally, matching a flipped camera image
    pub fn mirrored(self) -> Self {
        Self {
            x: 1.0 - self.x,
            ..self
        }
    }
}

impl From<[f32; 3]> for Landmark {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Errors raised when building a hand pose
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PoseError {
    /// The collaborator handed over the wrong number of landmarks
    #[error("Invalid pose: expected {expected} landmarks, got {actual}")]
    InvalidPose { expected: usize, actual: usize },
}

/// One detected hand in one frame
///
/// Holds exactly [`LANDMARK_COUNT`] landmarks; the array type makes a short or
/// long pose unrepresentable once constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct HandPose {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl HandPose {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { landmarks }
    }

    // Indices are all below LANDMARK_COUNT, so plain indexing cannot panic
    pub(crate) fn at(&self, index: usize) -> &Landmark {
        &self.landmarks[index]
    }
}

impl TryFrom<Vec<Landmark>> for HandPose {
    type Error = PoseError;

    fn try_from(landmarks: Vec<Landmark>) -> Result<Self, Self::Error> {
        let actual = landmarks.len();
        let landmarks: [Landmark; LANDMARK_COUNT] =
            landmarks.try_into().map_err(|_| PoseError::InvalidPose {
                expected: LANDMARK_COUNT,
                actual,
            })?;
        Ok(Self { landmarks })
    }
}

impl TryFrom<&[Landmark]> for HandPose {
    type Error = PoseError;

    fn try_from(landmarks: &[Landmark]) -> Result<Self, Self::Error> {
        let landmarks: [Landmark; LANDMARK_COUNT] =
            landmarks.try_into().map_err(|_| PoseError::InvalidPose {
                expected: LANDMARK_COUNT,
                actual: landmarks.len(),
            })?;
        Ok(Self { landmarks })
    }
}
