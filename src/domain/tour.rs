//! Simulated 360° tour: a fixed set of scenes and the viewer's playback state.

use crate::domain::listing::Listing;
use crate::error::{ExplorerError, Result};

const FALLBACK_LIVING_ROOM: &str =
    "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?w=800&h=600&fit=crop";
const FALLBACK_KITCHEN: &str =
    "https://images.unsplash.com/photo-1556912173-3bb406ef7e77?w=800&h=600&fit=crop";
const FALLBACK_BEDROOM: &str =
    "https://images.unsplash.com/photo-1571055107559-3e67626fa8be?w=800&h=600&fit=crop";
const BATHROOM_IMAGE: &str =
    "https://images.unsplash.com/photo-1620626011761-996317b8d101?w=800&h=600&fit=crop";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub name: &'static str,
    pub image: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Playback {
    #[default]
    Idle,
    Playing,
    Paused,
}

#[derive(Debug, Clone)]
pub struct TourViewer {
    listing_id: String,
    scenes: Vec<Scene>,
    current: usize,
    playback: Playback,
    muted: bool,
}

impl TourViewer {
    pub fn for_listing(listing: &Listing) -> Self {
        let image = |i: usize, fallback: &str| {
            listing
                .images
                .get(i)
                .filter(|src| !src.trim().is_empty())
                .map_or_else(|| fallback.to_string(), Clone::clone)
        };
        let scenes = vec![
            Scene {
                name: "Living Room",
                image: image(0, FALLBACK_LIVING_ROOM),
            },
            Scene {
                name: "Kitchen",
                image: image(1, FALLBACK_KITCHEN),
            },
            Scene {
                name: "Bedroom",
                image: image(2, FALLBACK_BEDROOM),
            },
            Scene {
                name: "Bathroom",
                image: BATHROOM_IMAGE.to_string(),
            },
        ];
        Self {
            listing_id: listing.id.clone(),
            scenes,
            current: 0,
            playback: Playback::Idle,
            muted: false,
        }
    }

    pub fn listing_id(&self) -> &str {
        &self.listing_id
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn current_scene(&self) -> &Scene {
        &self.scenes[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn toggle_play(&mut self) -> Playback {
        self.playback = match self.playback {
            Playback::Idle | Playback::Paused => Playback::Playing,
            Playback::Playing => Playback::Paused,
        };
        self.playback
    }

    pub fn reset(&mut self) {
        self.playback = Playback::Idle;
        self.current = 0;
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Jumps to a scene without touching playback.
    pub fn select_scene(&mut self, index: usize) -> Result<&Scene> {
        if index >= self.scenes.len() {
            return Err(ExplorerError::InvalidInput {
                reason: format!(
                    "scene {index} out of range (tour has {} scenes)",
                    self.scenes.len()
                ),
            });
        }
        self.current = index;
        Ok(&self.scenes[index])
    }

    /// "n of m", one-based.
    pub fn position_label(&self) -> String {
        format!("{} of {}", self.current + 1, self.scenes.len())
    }
}
