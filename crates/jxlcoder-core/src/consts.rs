//! Constants used throughout the codec

/// Maximum supported image dimension
pub const MAX_IMAGE_DIMENSION: u32 = 268435456; // 2^28

/// Transform block size
pub const BLOCK_SIZE: usize = 8;

/// Maximum number of channels (RGBA)
pub const MAX_CHANNELS: usize = 4;

/// Butteraugli-style distance range for lossy encoding
pub const MIN_DISTANCE: f32 = 0.0;
pub const MAX_DISTANCE: f32 = 15.0;

/// Default lossy distance (visually lossless)
pub const DEFAULT_DISTANCE: f32 = 1.0;

/// Encoding effort range (higher is slower but denser)
pub const MIN_EFFORT: u8 = 1;
pub const MAX_EFFORT: u8 = 9;

/// Default encoding effort
pub const DEFAULT_EFFORT: u8 = 7;

/// Upper bound for an embedded ICC profile
pub const MAX_ICC_SIZE: u32 = 1 << 20;
