//! Pure layout math: control bar geometry, hit testing, text wrapping and
//! the cover-crop rectangle for media. Nothing here touches the window, so
//! the whole module is testable with a fake text measure.

use raylib::prelude::*;

use crate::deck::Slide;

pub const EYEBROW_SIZE: i32 = 20;
pub const HEADING_SIZE: i32 = 64;
pub const DESCRIPTION_SIZE: i32 = 24;
pub const COUNTER_SIZE: i32 = 16;
pub const CTA_TEXT_SIZE: i32 = 20;
pub const TOOLTIP_SIZE: i32 = 14;
pub const BANNER_LABEL_SIZE: i32 = 16;
pub const BANNER_TIME_SIZE: i32 = 14;

const HEADING_LINE_HEIGHT: f32 = 72.0;
const DESCRIPTION_LINE_HEIGHT: f32 = 34.0;
const CONTENT_MARGIN_X: f32 = 64.0;
const CTA_PAD_X: f32 = 32.0;
const CTA_PAD_Y: f32 = 14.0;

const BUTTON_RADIUS: f32 = 22.0;
const BAR_MARGIN_X: f32 = 64.0;
const BAR_OFFSET_Y: f32 = 72.0;
const GROUP_GAP: f32 = 16.0;
const DOT_WIDTH: f32 = 20.0;
const ACTIVE_DOT_WIDTH: f32 = 40.0;
const DOT_GAP: f32 = 4.0;
const DOT_HIT_HEIGHT: f32 = 24.0;
const TRACK_MAX_WIDTH: f32 = 448.0;

/// Every clickable thing on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlId {
    Play,
    Mute,
    Prev,
    Next,
    Dot(usize),
    Fullscreen,
    Cta,
}

/// Hover label for a control, phrased as the action a click performs.
pub fn control_label(control: ControlId, playing: bool, muted: bool) -> String {
    match control {
        ControlId::Play => if playing { "Pause slideshow" } else { "Play slideshow" }.to_string(),
        ControlId::Mute => if muted { "Unmute video" } else { "Mute video" }.to_string(),
        ControlId::Prev => "Previous slide".to_string(),
        ControlId::Next => "Next slide".to_string(),
        ControlId::Dot(index) => format!("Go to slide {}", index + 1),
        ControlId::Fullscreen => "Toggle fullscreen".to_string(),
        ControlId::Cta => "Open call to action".to_string(),
    }
}

pub fn counter_text(current: usize, len: usize) -> String {
    format!("{:02} / {:02}", current + 1, len)
}

pub fn progress_fraction(current: usize, len: usize) -> f32 {
    if len == 0 {
        return 0.0;
    }
    (current + 1) as f32 / len as f32
}

/// Control bar rectangles for one frame. Dot rectangles are hit areas;
/// the drawn pills are inset from them.
#[derive(Debug)]
pub struct ControlLayout {
    pub play: Rectangle,
    pub mute: Option<Rectangle>,
    pub prev: Rectangle,
    pub next: Rectangle,
    pub dots: Vec<Rectangle>,
    pub fullscreen: Option<Rectangle>,
    pub progress_track: Rectangle,
}

impl ControlLayout {
    /// Rectangle of a bar control, used to anchor its hover tooltip. The
    /// call-to-action is not a bar control and has no entry here.
    pub fn rect_of(&self, control: ControlId) -> Option<Rectangle> {
        match control {
            ControlId::Play => Some(self.play),
            ControlId::Mute => self.mute,
            ControlId::Prev => Some(self.prev),
            ControlId::Next => Some(self.next),
            ControlId::Dot(index) => self.dots.get(index).copied(),
            ControlId::Fullscreen => self.fullscreen,
            ControlId::Cta => None,
        }
    }

    pub fn hit_test(&self, point: Vector2) -> Option<ControlId> {
        let hit = |rect: &Rectangle| rect.check_collision_point_rec(point);
        if hit(&self.play) {
            return Some(ControlId::Play);
        }
        if let Some(mute) = &self.mute {
            if hit(mute) {
                return Some(ControlId::Mute);
            }
        }
        if hit(&self.prev) {
            return Some(ControlId::Prev);
        }
        if hit(&self.next) {
            return Some(ControlId::Next);
        }
        for (index, dot) in self.dots.iter().enumerate() {
            if hit(dot) {
                return Some(ControlId::Dot(index));
            }
        }
        if let Some(fullscreen) = &self.fullscreen {
            if hit(fullscreen) {
                return Some(ControlId::Fullscreen);
            }
        }
        None
    }
}

pub fn control_layout(
    screen_w: f32,
    screen_h: f32,
    len: usize,
    current: usize,
    show_mute: bool,
    show_fullscreen: bool,
) -> ControlLayout {
    let bar_y = screen_h - BAR_OFFSET_Y;
    let button = |center_x: f32| Rectangle {
        x: center_x - BUTTON_RADIUS,
        y: bar_y - BUTTON_RADIUS,
        width: BUTTON_RADIUS * 2.0,
        height: BUTTON_RADIUS * 2.0,
    };

    let play = button(BAR_MARGIN_X + BUTTON_RADIUS);
    let mute = show_mute.then(|| button(BAR_MARGIN_X + BUTTON_RADIUS * 3.0 + 12.0));
    let fullscreen = show_fullscreen.then(|| button(screen_w - BAR_MARGIN_X - BUTTON_RADIUS));

    let dot_width = |index: usize| if index == current { ACTIVE_DOT_WIDTH } else { DOT_WIDTH };
    let dots_width: f32 = (0..len).map(dot_width).sum::<f32>()
        + DOT_GAP * len.saturating_sub(1) as f32;
    let group_width = BUTTON_RADIUS * 4.0 + GROUP_GAP * 2.0 + dots_width;
    let group_x = (screen_w - group_width) / 2.0;

    let prev = button(group_x + BUTTON_RADIUS);
    let mut dots = Vec::with_capacity(len);
    let mut x = group_x + BUTTON_RADIUS * 2.0 + GROUP_GAP;
    for index in 0..len {
        let width = dot_width(index);
        dots.push(Rectangle {
            x,
            y: bar_y - DOT_HIT_HEIGHT / 2.0,
            width,
            height: DOT_HIT_HEIGHT,
        });
        x += width + DOT_GAP;
    }
    let next = button(x - DOT_GAP + GROUP_GAP + BUTTON_RADIUS);

    let track_width = (screen_w - BAR_MARGIN_X * 2.0).min(TRACK_MAX_WIDTH);
    let progress_track = Rectangle {
        x: (screen_w - track_width) / 2.0,
        y: screen_h - 110.0,
        width: track_width,
        height: 3.0,
    };

    ControlLayout { play, mute, prev, next, dots, fullscreen, progress_track }
}

/// Laid-out text block of one slide, positions in screen space.
#[derive(Debug)]
pub struct ContentLayout {
    pub counter_pos: Vector2,
    pub eyebrow_pos: Vector2,
    pub heading_lines: Vec<(String, Vector2)>,
    pub description_lines: Vec<(String, Vector2)>,
    pub cta: Rectangle,
}

pub fn content_layout(
    screen_w: f32,
    screen_h: f32,
    slide: &Slide,
    measure: impl Fn(&str, i32) -> f32,
) -> ContentLayout {
    let x = CONTENT_MARGIN_X;
    let max_text_width = (screen_w * 0.55).clamp(240.0, 640.0);
    let mut y = (screen_h * 0.30).max(150.0);

    let counter_pos = Vector2::new(x, y);
    y += COUNTER_SIZE as f32 + 18.0;

    let eyebrow_pos = Vector2::new(x, y);
    y += EYEBROW_SIZE as f32 + 14.0;

    let mut heading_lines = Vec::new();
    for line in slide.heading.split('\n') {
        heading_lines.push((line.to_string(), Vector2::new(x, y)));
        y += HEADING_LINE_HEIGHT;
    }

    y += 10.0;
    let mut description_lines = Vec::new();
    for line in wrap_text(&slide.description, max_text_width, |s| {
        measure(s, DESCRIPTION_SIZE)
    }) {
        description_lines.push((line, Vector2::new(x, y)));
        y += DESCRIPTION_LINE_HEIGHT;
    }

    y += 24.0;
    let cta = Rectangle {
        x,
        y,
        width: measure(&slide.cta_text, CTA_TEXT_SIZE) + CTA_PAD_X * 2.0,
        height: CTA_TEXT_SIZE as f32 + CTA_PAD_Y * 2.0,
    };

    ContentLayout { counter_pos, eyebrow_pos, heading_lines, description_lines, cta }
}

/// Greedy word wrap. A single word wider than the limit gets its own line
/// rather than being split.
pub fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if !line.is_empty() && measure(&candidate) > max_width {
            lines.push(line);
            line = word.to_string();
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Source rectangle that covers the destination like CSS object-fit: cover,
/// cropping the texture's overflow equally on both sides. Zoom above 1
/// tightens the crop around the center.
pub fn cover_source_rect(tex_w: f32, tex_h: f32, dest_w: f32, dest_h: f32, zoom: f32) -> Rectangle {
    let tex_w = tex_w.max(1.0);
    let tex_h = tex_h.max(1.0);
    let zoom = zoom.max(1.0);
    let scale = (dest_w / tex_w).max(dest_h / tex_h) * zoom;
    let src_w = dest_w / scale;
    let src_h = dest_h / scale;
    Rectangle {
        x: (tex_w - src_w) / 2.0,
        y: (tex_h - src_h) / 2.0,
        width: src_w,
        height: src_h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Media;

    fn fake_measure(text: &str, size: i32) -> f32 {
        text.chars().count() as f32 * size as f32 * 0.5
    }

    fn center(rect: &Rectangle) -> Vector2 {
        Vector2::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
    }

    fn slide() -> Slide {
        Slide {
            id: "welcome".to_string(),
            media: Media::Image("welcome.jpg".to_string()),
            eyebrow: "Welcome Home".to_string(),
            heading: "Experience\nDivine Grace".to_string(),
            description: "Join us for uplifting worship, inspiring messages, and a loving \
                          community that feels like family."
                .to_string(),
            cta_text: "Join Us This Sunday".to_string(),
            cta_link: "#join".to_string(),
        }
    }

    #[test]
    fn labels_follow_the_toggle_state() {
        assert_eq!(control_label(ControlId::Play, true, true), "Pause slideshow");
        assert_eq!(control_label(ControlId::Play, false, true), "Play slideshow");
        assert_eq!(control_label(ControlId::Mute, true, true), "Unmute video");
        assert_eq!(control_label(ControlId::Mute, true, false), "Mute video");
        assert_eq!(control_label(ControlId::Dot(2), true, true), "Go to slide 3");
        assert_eq!(control_label(ControlId::Prev, true, true), "Previous slide");
        assert_eq!(control_label(ControlId::Next, true, true), "Next slide");
        assert_eq!(control_label(ControlId::Fullscreen, true, true), "Toggle fullscreen");
    }

    #[test]
    fn counter_is_one_based_and_zero_padded() {
        assert_eq!(counter_text(0, 3), "01 / 03");
        assert_eq!(counter_text(2, 3), "03 / 03");
        assert_eq!(counter_text(9, 12), "10 / 12");
    }

    #[test]
    fn progress_reaches_one_on_the_last_slide() {
        assert_eq!(progress_fraction(0, 4), 0.25);
        assert_eq!(progress_fraction(3, 4), 1.0);
        assert_eq!(progress_fraction(0, 0), 0.0);
    }

    #[test]
    fn bar_controls_sit_inside_the_screen() {
        let layout = control_layout(1280.0, 720.0, 3, 0, true, true);
        let rects = [
            layout.play,
            layout.mute.unwrap(),
            layout.prev,
            layout.next,
            layout.fullscreen.unwrap(),
            layout.progress_track,
        ];
        for rect in rects {
            assert!(rect.x >= 0.0 && rect.y >= 0.0);
            assert!(rect.x + rect.width <= 1280.0);
            assert!(rect.y + rect.height <= 720.0);
        }
        assert_eq!(layout.dots.len(), 3);
    }

    #[test]
    fn hidden_buttons_have_no_rectangles() {
        let layout = control_layout(1280.0, 720.0, 3, 0, false, false);
        assert!(layout.mute.is_none());
        assert!(layout.fullscreen.is_none());
    }

    #[test]
    fn active_dot_is_wider() {
        let layout = control_layout(1280.0, 720.0, 4, 2, true, true);
        for (index, dot) in layout.dots.iter().enumerate() {
            if index == 2 {
                assert_eq!(dot.width, ACTIVE_DOT_WIDTH);
            } else {
                assert_eq!(dot.width, DOT_WIDTH);
            }
        }
    }

    #[test]
    fn nav_cluster_reads_left_to_right() {
        let layout = control_layout(1280.0, 720.0, 3, 1, true, true);
        let first_dot = &layout.dots[0];
        let last_dot = &layout.dots[2];
        assert!(layout.prev.x + layout.prev.width <= first_dot.x);
        assert!(last_dot.x + last_dot.width <= layout.next.x);
    }

    #[test]
    fn progress_track_is_centered() {
        let layout = control_layout(1280.0, 720.0, 3, 0, true, true);
        let track = layout.progress_track;
        assert_eq!(track.x + track.width / 2.0, 640.0);
        assert!(track.width <= TRACK_MAX_WIDTH);
    }

    #[test]
    fn hit_test_finds_each_control() {
        let layout = control_layout(1280.0, 720.0, 3, 0, true, true);
        assert_eq!(layout.hit_test(center(&layout.play)), Some(ControlId::Play));
        assert_eq!(
            layout.hit_test(center(layout.mute.as_ref().unwrap())),
            Some(ControlId::Mute)
        );
        assert_eq!(layout.hit_test(center(&layout.prev)), Some(ControlId::Prev));
        assert_eq!(layout.hit_test(center(&layout.next)), Some(ControlId::Next));
        assert_eq!(layout.hit_test(center(&layout.dots[1])), Some(ControlId::Dot(1)));
        assert_eq!(
            layout.hit_test(center(layout.fullscreen.as_ref().unwrap())),
            Some(ControlId::Fullscreen)
        );
        assert_eq!(layout.hit_test(Vector2::new(5.0, 5.0)), None);
    }

    #[test]
    fn rect_of_mirrors_the_hit_areas() {
        let layout = control_layout(1280.0, 720.0, 3, 0, true, true);
        for control in [
            ControlId::Play,
            ControlId::Mute,
            ControlId::Prev,
            ControlId::Next,
            ControlId::Dot(0),
            ControlId::Dot(2),
            ControlId::Fullscreen,
        ] {
            let rect = layout.rect_of(control).unwrap();
            assert_eq!(layout.hit_test(center(&rect)), Some(control));
        }
        assert!(layout.rect_of(ControlId::Dot(9)).is_none());
        assert!(layout.rect_of(ControlId::Cta).is_none());
    }

    #[test]
    fn hidden_buttons_do_not_hit() {
        let with = control_layout(1280.0, 720.0, 3, 0, true, true);
        let without = control_layout(1280.0, 720.0, 3, 0, false, false);
        let mute_center = center(with.mute.as_ref().unwrap());
        assert_eq!(without.hit_test(mute_center), None);
    }

    #[test]
    fn heading_splits_on_embedded_newlines() {
        let layout = content_layout(1280.0, 720.0, &slide(), fake_measure);
        assert_eq!(layout.heading_lines.len(), 2);
        assert_eq!(layout.heading_lines[0].0, "Experience");
        assert_eq!(layout.heading_lines[1].0, "Divine Grace");
        let line_gap = layout.heading_lines[1].1.y - layout.heading_lines[0].1.y;
        assert_eq!(line_gap, HEADING_LINE_HEIGHT);
    }

    #[test]
    fn content_stacks_top_to_bottom() {
        let layout = content_layout(1280.0, 720.0, &slide(), fake_measure);
        assert!(layout.counter_pos.y < layout.eyebrow_pos.y);
        assert!(layout.eyebrow_pos.y < layout.heading_lines[0].1.y);
        let last_heading = layout.heading_lines.last().unwrap().1.y;
        assert!(last_heading < layout.description_lines[0].1.y);
        let last_description = layout.description_lines.last().unwrap().1.y;
        assert!(last_description < layout.cta.y);
    }

    #[test]
    fn description_wraps_to_the_column_width() {
        let layout = content_layout(1280.0, 720.0, &slide(), fake_measure);
        assert!(layout.description_lines.len() >= 2);
        for (line, _) in &layout.description_lines {
            assert!(fake_measure(line, DESCRIPTION_SIZE) <= 640.0);
        }
    }

    #[test]
    fn cta_wraps_its_text_with_padding() {
        let layout = content_layout(1280.0, 720.0, &slide(), fake_measure);
        let text_width = fake_measure("Join Us This Sunday", CTA_TEXT_SIZE);
        assert_eq!(layout.cta.width, text_width + CTA_PAD_X * 2.0);
        assert_eq!(layout.cta.height, CTA_TEXT_SIZE as f32 + CTA_PAD_Y * 2.0);
    }

    #[test]
    fn wrap_packs_words_greedily() {
        let measure = |s: &str| s.chars().count() as f32 * 10.0;
        assert_eq!(wrap_text("aa bb cc", 50.0, measure), vec!["aa bb", "cc"]);
        assert_eq!(wrap_text("aa bb cc", 200.0, measure), vec!["aa bb cc"]);
    }

    #[test]
    fn wrap_keeps_overlong_words_whole() {
        let measure = |s: &str| s.chars().count() as f32 * 10.0;
        assert_eq!(
            wrap_text("a incomprehensibilities b", 100.0, measure),
            vec!["a", "incomprehensibilities", "b"]
        );
    }

    #[test]
    fn wrap_of_empty_text_is_empty() {
        let measure = |s: &str| s.chars().count() as f32 * 10.0;
        assert!(wrap_text("", 100.0, measure).is_empty());
        assert!(wrap_text("   ", 100.0, measure).is_empty());
    }

    #[test]
    fn cover_crops_the_wide_side() {
        let src = cover_source_rect(2000.0, 1000.0, 1000.0, 1000.0, 1.0);
        assert_eq!(src.width, 1000.0);
        assert_eq!(src.height, 1000.0);
        assert_eq!(src.x, 500.0);
        assert_eq!(src.y, 0.0);
    }

    #[test]
    fn cover_scales_small_textures_up() {
        let src = cover_source_rect(100.0, 100.0, 1000.0, 500.0, 1.0);
        assert_eq!(src.width, 100.0);
        assert_eq!(src.height, 50.0);
        assert_eq!(src.x, 0.0);
        assert_eq!(src.y, 25.0);
    }

    #[test]
    fn zoom_tightens_the_crop_around_the_center() {
        let src = cover_source_rect(2000.0, 1000.0, 1000.0, 1000.0, 2.0);
        assert_eq!(src.width, 500.0);
        assert_eq!(src.height, 500.0);
        assert_eq!(src.x, 750.0);
        assert_eq!(src.y, 250.0);
    }
}
