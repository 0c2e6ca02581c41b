//! All drawing: slide media, scrim, text block, service banner and the
//! control bar. Layout math lives in `layout`; this module only paints.

use raylib::prelude::*;

use crate::constants::{ACCENT, CTA_FILL, CTA_HOVER};
use crate::deck::{ChurchInfo, Slide};
use crate::layout::{self, ContentLayout, ControlId, ControlLayout};
use crate::playback::Playback;

pub fn text_width(text: &str, size: i32) -> f32 {
    let c_text = std::ffi::CString::new(text).unwrap_or_default();
    unsafe { ffi::MeasureText(c_text.as_ptr(), size) as f32 }
}

fn with_alpha(color: Color, alpha: f32) -> Color {
    Color {
        a: (color.a as f32 * alpha.clamp(0.0, 1.0)) as u8,
        ..color
    }
}

fn rect_center(rect: &Rectangle) -> Vector2 {
    Vector2::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
}

pub fn draw_slide_media(
    d: &mut RaylibDrawHandle,
    texture: &Texture2D,
    opacity: f32,
    zoom: f32,
    screen_w: f32,
    screen_h: f32,
) {
    let source = layout::cover_source_rect(
        texture.width() as f32,
        texture.height() as f32,
        screen_w,
        screen_h,
        zoom,
    );
    d.draw_texture_pro(
        texture,
        source,
        Rectangle::new(0.0, 0.0, screen_w, screen_h),
        Vector2::new(0.0, 0.0),
        0.0,
        with_alpha(Color::WHITE, opacity),
    );
}

/// Stand-in for media that failed to load; the deck keeps cycling.
pub fn draw_placeholder(
    d: &mut RaylibDrawHandle,
    slide_id: &str,
    opacity: f32,
    screen_w: f32,
    screen_h: f32,
) {
    d.draw_rectangle(
        0,
        0,
        screen_w as i32,
        screen_h as i32,
        with_alpha(Color::new(24, 28, 32, 255), opacity),
    );
    let note = "media unavailable";
    let note_w = text_width(note, 20);
    d.draw_text(
        note,
        ((screen_w - note_w) / 2.0) as i32,
        (screen_h / 2.0 - 24.0) as i32,
        20,
        with_alpha(Color::new(130, 140, 150, 255), opacity),
    );
    let id_w = text_width(slide_id, 28);
    d.draw_text(
        slide_id,
        ((screen_w - id_w) / 2.0) as i32,
        (screen_h / 2.0 + 6.0) as i32,
        28,
        with_alpha(Color::WHITE, opacity),
    );
}

/// Darkens the left column and the lower edge so text stays readable on
/// bright media.
pub fn draw_scrim(d: &mut RaylibDrawHandle, screen_w: f32, screen_h: f32) {
    d.draw_rectangle_gradient_h(
        0,
        0,
        screen_w as i32,
        screen_h as i32,
        Color::new(0, 0, 0, 160),
        Color::new(0, 0, 0, 30),
    );
    let band_y = screen_h * 0.55;
    d.draw_rectangle_gradient_v(
        0,
        band_y as i32,
        screen_w as i32,
        (screen_h - band_y) as i32,
        Color::new(0, 0, 0, 0),
        Color::new(0, 0, 0, 190),
    );
}

pub fn draw_content(
    d: &mut RaylibDrawHandle,
    slide: &Slide,
    content: &ContentLayout,
    counter: &str,
    alpha: f32,
    rise_px: f32,
    hover_cta: bool,
) {
    if alpha <= 0.0 {
        return;
    }

    let at = |pos: &Vector2| (pos.x as i32, (pos.y + rise_px) as i32);

    let (x, y) = at(&content.counter_pos);
    d.draw_text(counter, x, y, layout::COUNTER_SIZE, with_alpha(Color::WHITE, alpha * 0.7));

    let (x, y) = at(&content.eyebrow_pos);
    d.draw_text(
        &slide.eyebrow.to_uppercase(),
        x,
        y,
        layout::EYEBROW_SIZE,
        with_alpha(ACCENT, alpha),
    );

    for (line, pos) in &content.heading_lines {
        let (x, y) = at(pos);
        d.draw_text(line, x, y, layout::HEADING_SIZE, with_alpha(Color::WHITE, alpha));
    }

    for (line, pos) in &content.description_lines {
        let (x, y) = at(pos);
        d.draw_text(
            line,
            x,
            y,
            layout::DESCRIPTION_SIZE,
            with_alpha(Color::new(232, 235, 238, 255), alpha * 0.92),
        );
    }

    let cta = Rectangle {
        y: content.cta.y + rise_px,
        ..content.cta
    };
    let fill = if hover_cta { CTA_HOVER } else { CTA_FILL };
    d.draw_rectangle_rounded(cta, 0.5, 8, with_alpha(fill, alpha));
    let text_x = cta.x + (cta.width - text_width(&slide.cta_text, layout::CTA_TEXT_SIZE)) / 2.0;
    let text_y = cta.y + (cta.height - layout::CTA_TEXT_SIZE as f32) / 2.0;
    d.draw_text(
        &slide.cta_text,
        text_x as i32,
        text_y as i32,
        layout::CTA_TEXT_SIZE,
        with_alpha(Color::WHITE, alpha),
    );
}

/// Service times strip along the top edge.
pub fn draw_banner(d: &mut RaylibDrawHandle, church: &ChurchInfo, screen_w: f32) {
    let times = &church.service_times;
    let mut entries: Vec<(&str, &str)> = Vec::new();
    if let Some(first) = times.sunday.first() {
        entries.push(("SUNDAY SERVICE", first));
    }
    if let Some(first) = times.wednesday.first() {
        entries.push(("WEDNESDAY PRAYER", first));
    }
    if entries.is_empty() {
        return;
    }

    d.draw_rectangle(0, 0, screen_w as i32, 56, Color::new(0, 0, 0, 120));

    let widths: Vec<(f32, f32)> = entries
        .iter()
        .map(|(label, time)| {
            (
                text_width(label, layout::BANNER_LABEL_SIZE),
                text_width(time, layout::BANNER_TIME_SIZE),
            )
        })
        .collect();
    let total: f32 = widths.iter().map(|(lw, tw)| lw + 10.0 + tw).sum::<f32>()
        + 48.0 * (entries.len() - 1) as f32;

    let mut x = (screen_w - total) / 2.0;
    for ((label, time), (label_w, time_w)) in entries.iter().zip(&widths) {
        d.draw_text(label, x as i32, 20, layout::BANNER_LABEL_SIZE, ACCENT);
        x += label_w + 10.0;
        d.draw_text(time, x as i32, 21, layout::BANNER_TIME_SIZE, Color::WHITE);
        x += time_w + 48.0;
    }
}

pub fn draw_progress(d: &mut RaylibDrawHandle, track: &Rectangle, fraction: f32) {
    d.draw_rectangle_rounded(*track, 1.0, 4, Color::new(255, 255, 255, 50));
    let fill_width = track.width * fraction.clamp(0.0, 1.0);
    if fill_width > 0.0 {
        d.draw_rectangle_rounded(
            Rectangle {
                width: fill_width,
                ..*track
            },
            1.0,
            4,
            ACCENT,
        );
    }
}

pub fn draw_controls(
    d: &mut RaylibDrawHandle,
    controls: &ControlLayout,
    playback: &Playback,
    hover: Option<ControlId>,
) {
    let hovered = |id: ControlId| hover == Some(id);
    let glyph = Color::new(255, 255, 255, 230);

    draw_button_disc(d, &controls.play, hovered(ControlId::Play));
    let center = rect_center(&controls.play);
    if playback.playing() {
        draw_pause_glyph(d, center, glyph);
    } else {
        draw_play_glyph(d, center, glyph);
    }

    if let Some(mute) = &controls.mute {
        draw_button_disc(d, mute, hovered(ControlId::Mute));
        draw_speaker_glyph(d, rect_center(mute), glyph, playback.muted());
    }

    draw_button_disc(d, &controls.prev, hovered(ControlId::Prev));
    draw_chevron_glyph(d, rect_center(&controls.prev), glyph, -1.0);
    draw_button_disc(d, &controls.next, hovered(ControlId::Next));
    draw_chevron_glyph(d, rect_center(&controls.next), glyph, 1.0);

    for (index, dot) in controls.dots.iter().enumerate() {
        let pill = Rectangle::new(dot.x + 4.0, dot.y + (dot.height - 8.0) / 2.0, dot.width - 8.0, 8.0);
        let color = if index == playback.current() {
            ACCENT
        } else if hovered(ControlId::Dot(index)) {
            Color::new(255, 255, 255, 160)
        } else {
            Color::new(255, 255, 255, 100)
        };
        d.draw_rectangle_rounded(pill, 1.0, 8, color);
    }

    if let Some(fullscreen) = &controls.fullscreen {
        draw_button_disc(d, fullscreen, hovered(ControlId::Fullscreen));
        draw_corners_glyph(d, rect_center(fullscreen), glyph);
    }
}

pub fn draw_tooltip(d: &mut RaylibDrawHandle, label: &str, anchor: &Rectangle, screen_w: f32) {
    let width = text_width(label, layout::TOOLTIP_SIZE) + 16.0;
    let height = layout::TOOLTIP_SIZE as f32 + 10.0;
    let x = (anchor.x + anchor.width / 2.0 - width / 2.0).clamp(8.0, (screen_w - width - 8.0).max(8.0));
    let y = anchor.y - height - 8.0;
    d.draw_rectangle_rounded(
        Rectangle::new(x, y, width, height),
        0.4,
        6,
        Color::new(0, 0, 0, 200),
    );
    d.draw_text(
        label,
        (x + 8.0) as i32,
        (y + 5.0) as i32,
        layout::TOOLTIP_SIZE,
        Color::WHITE,
    );
}

fn draw_button_disc(d: &mut RaylibDrawHandle, rect: &Rectangle, hovered: bool) {
    let center = rect_center(rect);
    let radius = rect.width / 2.0;
    let fill = if hovered { 70 } else { 36 };
    d.draw_circle_v(center, radius, Color::new(255, 255, 255, fill));
    d.draw_circle_lines(center.x as i32, center.y as i32, radius, Color::new(255, 255, 255, 90));
}

fn draw_play_glyph(d: &mut RaylibDrawHandle, center: Vector2, color: Color) {
    d.draw_triangle(
        Vector2::new(center.x - 5.0, center.y - 8.0),
        Vector2::new(center.x - 5.0, center.y + 8.0),
        Vector2::new(center.x + 9.0, center.y),
        color,
    );
}

fn draw_pause_glyph(d: &mut RaylibDrawHandle, center: Vector2, color: Color) {
    d.draw_rectangle((center.x - 7.0) as i32, (center.y - 8.0) as i32, 5, 16, color);
    d.draw_rectangle((center.x + 2.0) as i32, (center.y - 8.0) as i32, 5, 16, color);
}

fn draw_chevron_glyph(d: &mut RaylibDrawHandle, center: Vector2, color: Color, direction: f32) {
    let tip = Vector2::new(center.x + 4.0 * direction, center.y);
    let top = Vector2::new(center.x - 3.0 * direction, center.y - 7.0);
    let bottom = Vector2::new(center.x - 3.0 * direction, center.y + 7.0);
    d.draw_line_ex(top, tip, 2.5, color);
    d.draw_line_ex(tip, bottom, 2.5, color);
}

fn draw_speaker_glyph(d: &mut RaylibDrawHandle, center: Vector2, color: Color, muted: bool) {
    let (cx, cy) = (center.x, center.y);
    d.draw_rectangle((cx - 9.0) as i32, (cy - 3.0) as i32, 4, 6, color);
    let near_top = Vector2::new(cx - 5.0, cy - 3.0);
    let near_bottom = Vector2::new(cx - 5.0, cy + 3.0);
    let far_top = Vector2::new(cx + 2.0, cy - 8.0);
    let far_bottom = Vector2::new(cx + 2.0, cy + 8.0);
    d.draw_triangle(near_top, near_bottom, far_top, color);
    d.draw_triangle(far_top, near_bottom, far_bottom, color);
    if muted {
        d.draw_line_ex(
            Vector2::new(cx - 10.0, cy + 9.0),
            Vector2::new(cx + 9.0, cy - 9.0),
            2.0,
            color,
        );
    } else {
        d.draw_line_ex(Vector2::new(cx + 5.0, cy - 4.0), Vector2::new(cx + 5.0, cy + 4.0), 2.0, color);
        d.draw_line_ex(Vector2::new(cx + 8.0, cy - 6.0), Vector2::new(cx + 8.0, cy + 6.0), 2.0, color);
    }
}

fn draw_corners_glyph(d: &mut RaylibDrawHandle, center: Vector2, color: Color) {
    for (sx, sy) in [(-1.0f32, -1.0f32), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
        let corner = Vector2::new(center.x + sx * 9.0, center.y + sy * 9.0);
        d.draw_line_ex(corner, Vector2::new(corner.x - sx * 6.0, corner.y), 2.0, color);
        d.draw_line_ex(corner, Vector2::new(corner.x, corner.y - sy * 6.0), 2.0, color);
    }
}
