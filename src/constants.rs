pub const WINDOW_WIDTH: i32 = 1200;           // Window size when not full-screen
pub const WINDOW_HEIGHT: i32 = 800;
pub const FPS: u32 = 60;                      // Frames per second

pub const COLUMN_COUNT: usize = 3;            // Albums shown side by side
pub const SWIPE_THRESHOLD: f32 = 50.0;        // Minimum vertical travel for a swipe (pixels)
pub const SLIDE_DURATION: f32 = 0.3;          // Duration of a page slide (seconds)

pub const CAPTION_FONT_SIZE: i32 = 20;        // Album name caption
pub const PLACEHOLDER_FONT_SIZE: i32 = 24;    // "Page N" label on placeholder pages

pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "gif"];

// Background colours of the fallback pages shown when an album has no images
pub const PLACEHOLDER_COLORS: [(u8, u8, u8); 5] = [
    (0xFF, 0x6B, 0x6B),
    (0x4E, 0xCD, 0xC4),
    (0x45, 0xB7, 0xD1),
    (0x96, 0xCE, 0xB4),
    (0xFF, 0xEA, 0xA7),
];

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
