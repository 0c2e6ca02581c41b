//! Slide deck loading, validation and the bundled sample deck.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::constants::AUTOPLAY_INTERVAL;

/// Raw deck as it appears on disk. Media is two optional fields here;
/// validation turns them into a single [`Media`] value.
#[derive(Debug, Deserialize, Serialize)]
struct DeckSpec {
    #[serde(default = "default_title")]
    title: String,
    slides: Vec<SlideSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    church: Option<ChurchInfo>,
    #[serde(default)]
    options: DeckOptions,
}

#[derive(Debug, Deserialize, Serialize)]
struct SlideSpec {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    video: Option<String>,
    eyebrow: String,
    heading: String,
    description: String,
    cta_text: String,
    cta_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Media {
    Image(String),
    Video(String),
}

impl Media {
    pub fn path(&self) -> &str {
        match self {
            Media::Image(path) | Media::Video(path) => path,
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, Media::Video(_))
    }
}

#[derive(Debug, Clone)]
pub struct Slide {
    pub id: String,
    pub media: Media,
    pub eyebrow: String,
    pub heading: String,
    pub description: String,
    pub cta_text: String,
    pub cta_link: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChurchInfo {
    pub service_times: ServiceTimes,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceTimes {
    #[serde(default)]
    pub sunday: Vec<String>,
    #[serde(default)]
    pub wednesday: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeckOptions {
    #[serde(default = "default_interval")]
    pub interval_secs: f32,
    #[serde(default = "default_true")]
    pub show_mute_button: bool,
    #[serde(default = "default_true")]
    pub show_fullscreen_button: bool,
    #[serde(default)]
    pub reduced_motion: bool,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            interval_secs: AUTOPLAY_INTERVAL,
            show_mute_button: true,
            show_fullscreen_button: true,
            reduced_motion: false,
        }
    }
}

fn default_title() -> String {
    "Hero Slideshow".to_string()
}

fn default_interval() -> f32 {
    AUTOPLAY_INTERVAL
}

fn default_true() -> bool {
    true
}

/// A validated deck: at least one slide, unique ids, exactly one media
/// source per slide.
#[derive(Debug)]
pub struct Deck {
    pub title: String,
    pub slides: Vec<Slide>,
    pub church: Option<ChurchInfo>,
    pub options: DeckOptions,
}

impl Deck {
    pub fn load(path: &Path) -> Result<Deck> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading deck file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("loading deck {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Deck> {
        let spec: DeckSpec = serde_json::from_str(text).context("deck is not valid JSON")?;
        Self::from_spec(spec)
    }

    fn from_spec(spec: DeckSpec) -> Result<Deck> {
        if spec.slides.is_empty() {
            bail!("deck contains no slides");
        }
        let mut seen = HashSet::new();
        let mut slides = Vec::with_capacity(spec.slides.len());
        for s in spec.slides {
            if !seen.insert(s.id.clone()) {
                bail!("duplicate slide id '{}'", s.id);
            }
            let media = match (s.image, s.video) {
                (Some(image), None) => Media::Image(image),
                (None, Some(video)) => Media::Video(video),
                (Some(_), Some(_)) => bail!("slide '{}' sets both image and video", s.id),
                (None, None) => bail!("slide '{}' sets neither image nor video", s.id),
            };
            slides.push(Slide {
                id: s.id,
                media,
                eyebrow: s.eyebrow,
                heading: s.heading,
                description: s.description,
                cta_text: s.cta_text,
                cta_link: s.cta_link,
            });
        }
        Ok(Deck {
            title: spec.title,
            slides,
            church: spec.church,
            options: spec.options,
        })
    }
}

/// Write a starter deck next to which media files can be dropped in.
pub fn write_sample(path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&sample_spec()).context("serializing sample deck")?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn sample_spec() -> DeckSpec {
    let slide = |id: &str,
                 image: Option<&str>,
                 video: Option<&str>,
                 eyebrow: &str,
                 heading: &str,
                 description: &str,
                 cta_text: &str,
                 cta_link: &str| SlideSpec {
        id: id.to_string(),
        image: image.map(str::to_string),
        video: video.map(str::to_string),
        eyebrow: eyebrow.to_string(),
        heading: heading.to_string(),
        description: description.to_string(),
        cta_text: cta_text.to_string(),
        cta_link: cta_link.to_string(),
    };
    DeckSpec {
        title: "Amazing Grace United Church".to_string(),
        slides: vec![
            slide(
                "welcome",
                Some("assets/welcome.jpg"),
                None,
                "Welcome Home",
                "Experience\nDivine Grace",
                "Join us for uplifting worship, inspiring messages, and a loving community that feels like family.",
                "Join Us This Sunday",
                "#join",
            ),
            slide(
                "community",
                Some("assets/community.jpg"),
                None,
                "Our Community",
                "Growing Together\nin Faith",
                "Discover meaningful connections through our small groups, ministries, and outreach programs.",
                "Learn More",
                "#community",
            ),
            slide(
                "worship",
                None,
                Some("assets/worship.mp4"),
                "Worship With Us",
                "Lift Your Spirit\nIn Praise",
                "Experience the joy of worship through music, prayer, and fellowship every week.",
                "Watch Live",
                "#live",
            ),
        ],
        church: Some(ChurchInfo {
            service_times: ServiceTimes {
                sunday: vec!["8:00 AM".to_string(), "10:00 AM".to_string(), "6:00 PM".to_string()],
                wednesday: vec!["7:00 PM".to_string()],
            },
        }),
        options: DeckOptions::default(),
    }
}
