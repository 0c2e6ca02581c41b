use raylib::prelude::Color;

pub const WINDOW_WIDTH: i32 = 1280;            // Initial window width
pub const WINDOW_HEIGHT: i32 = 720;            // Initial window height
pub const FPS: u32 = 60;                       // Frames per second

pub const AUTOPLAY_INTERVAL: f32 = 7.0;        // Seconds each slide is shown before auto-advance
pub const MIN_AUTOPLAY_INTERVAL: f32 = 0.1;    // Lower bound for configured intervals (seconds)

pub const SLIDE_FADE_DURATION: f32 = 1.0;      // Cross-fade between slides (seconds)
pub const CONTENT_RISE_DURATION: f32 = 0.8;    // Text block rise-in on activation (seconds)
pub const CONTENT_RISE_OFFSET: f32 = 20.0;     // Pixels the text block rises while fading in
pub const SETTLE_ZOOM_DURATION: f32 = 1.2;     // Image settle from zoomed-in to rest (seconds)
pub const SETTLE_ZOOM_FROM: f32 = 1.1;         // Zoom factor an incoming image starts at

pub const VIDEO_WIDTH: i32 = 1280;             // Decoded video frame width
pub const VIDEO_HEIGHT: i32 = 720;             // Decoded video frame height

pub const ACCENT: Color = Color { r: 29, g: 161, b: 184, a: 255 };      // Eyebrow / highlights
pub const CTA_FILL: Color = Color { r: 102, g: 153, b: 102, a: 255 };   // Call-to-action pill
pub const CTA_HOVER: Color = Color { r: 85, g: 136, b: 85, a: 255 };    // Call-to-action pill, hovered
