//! Sound clips loaded once at startup

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use log::{info, warn};
use rodio::{Decoder, OutputStreamHandle, Source};

use crate::catalog::SoundId;
use crate::error::AudioError;

/// Encoded clip bytes, shared with every playback of the clip
type ClipBytes = Arc<[u8]>;

/// The clips that loaded and decoded successfully
#[derive(Debug, Default)]
pub struct SoundBank {
    clips: HashMap<SoundId, ClipBytes>,
}

impl SoundBank {
    /// Load every known clip from `dir`.
    ///
    /// A clip that cannot be read or decoded is logged once and left out;
    /// loading itself never fails.
    pub fn load(dir: &Path) -> Self {
        let mut clips = HashMap::new();
        for id in SoundId::ALL {
            match load_clip(dir, id) {
                Ok(bytes) => {
                    clips.insert(id, bytes);
                }
                Err(err) => warn!("{err}"),
            }
        }
        info!(
            "Loaded {}/{} sound clips from {}",
            clips.len(),
            SoundId::ALL.len(),
            dir.display()
        );
        Self { clips }
    }

    pub fn is_available(&self, id: SoundId) -> bool {
        self.clips.contains_key(&id)
    }

    pub fn available(&self) -> HashSet<SoundId> {
        self.clips.keys().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Play a clip once at `gain`. Unavailable clips are skipped.
    pub fn play(&self, handle: &OutputStreamHandle, id: SoundId, gain: f32) -> Result<(), AudioError> {
        let Some(bytes) = self.clips.get(&id) else {
            return Ok(());
        };
        let source = decode(id, bytes.clone())?;
        handle.play_raw(source.convert_samples().amplify(gain))?;
        Ok(())
    }
}

fn decode(id: SoundId, bytes: ClipBytes) -> Result<Decoder<Cursor<ClipBytes>>, AudioError> {
    Decoder::new(Cursor::new(bytes)).map_err(|source| AudioError::AssetDecode {
        name: id.file_name(),
        source,
    })
}

fn load_clip(dir: &Path, id: SoundId) -> Result<ClipBytes, AudioError> {
    let bytes: ClipBytes = fs::read(dir.join(id.file_name()))
        .map_err(|source| AudioError::AssetRead {
            name: id.file_name(),
            source,
        })?
        .into();
    // Only keep clips that decode
    decode(id, bytes.clone())?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_gives_empty_bank() {
        let bank = SoundBank::load(Path::new("definitely/not/a/sound/dir"));
        assert!(bank.is_empty());
        assert!(bank.available().is_empty());
        assert!(!bank.is_available(SoundId::Correct));
    }

    #[test]
    fn undecodable_clip_is_left_out() {
        let dir = std::env::temp_dir().join(format!("stem_beats_bank_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(SoundId::Drum.file_name()), b"not audio at all").unwrap();

        let err = load_clip(&dir, SoundId::Drum).unwrap_err();
        assert!(matches!(err, AudioError::AssetDecode { name: "drum.mp3", .. }));
        let err = load_clip(&dir, SoundId::Snare).unwrap_err();
        assert!(matches!(err, AudioError::AssetRead { name: "snare.mp3", .. }));

        assert!(SoundBank::load(&dir).is_empty());
        fs::remove_dir_all(&dir).unwrap();
    }
}
