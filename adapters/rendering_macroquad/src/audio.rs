//! Sound clips keyed by the cues the simulation can request.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Result;
use tile_arena_rendering::SoundCue;

/// Loaded clips plus the global mute switch.
#[derive(Debug)]
pub(crate) struct SoundBank<C> {
    clips: HashMap<SoundCue, C>,
    muted: bool,
}

impl<C> SoundBank<C> {
    /// Loads every known cue from `directory` using `loader`.
    ///
    /// Clips that fail to load are logged and left out; later triggers of
    /// those cues report them as unavailable. Nothing is loaded when muted.
    pub(crate) fn load(
        directory: &Path,
        muted: bool,
        mut loader: impl FnMut(&Path) -> Result<C>,
    ) -> Self {
        let mut bank = Self {
            clips: HashMap::new(),
            muted,
        };
        if muted {
            log::info!("sound effects muted");
            return bank;
        }

        for cue in SoundCue::ALL {
            let path = clip_path(directory, cue);
            match loader(&path) {
                Ok(clip) => {
                    log::debug!("loaded {cue:?} from {}", path.display());
                    let _ = bank.clips.insert(cue, clip);
                }
                Err(error) => log::warn!("sound {cue:?} unavailable: {error:#}"),
            }
        }

        bank
    }

    pub(crate) fn lookup(&self, cue: SoundCue) -> Option<&C> {
        self.clips.get(&cue)
    }

    /// Plays `cue` through `play` when it is loaded and sound is enabled.
    ///
    /// Returns whether the clip was played.
    pub(crate) fn trigger(&self, cue: SoundCue, play: impl FnOnce(&C)) -> bool {
        if self.muted {
            return false;
        }

        match self.lookup(cue) {
            Some(clip) => {
                play(clip);
                true
            }
            None => {
                log::warn!(
                    "sound file '{}' not found; skipping {cue:?}",
                    cue.file_name()
                );
                false
            }
        }
    }
}

pub(crate) fn clip_path(directory: &Path, cue: SoundCue) -> PathBuf {
    directory.join(cue.file_name())
}

/// Decodes raw clip bytes into playable sounds. Requires a live window.
#[cfg(feature = "audio")]
pub(crate) async fn decode(bank: SoundBank<Vec<u8>>) -> SoundBank<macroquad::audio::Sound> {
    let SoundBank { clips, muted } = bank;
    let mut decoded = HashMap::with_capacity(clips.len());
    for (cue, bytes) in clips {
        match macroquad::audio::load_sound_from_bytes(&bytes).await {
            Ok(sound) => {
                let _ = decoded.insert(cue, sound);
            }
            Err(error) => log::warn!("failed to decode '{}': {error:?}", cue.file_name()),
        }
    }

    SoundBank {
        clips: decoded,
        muted,
    }
}
