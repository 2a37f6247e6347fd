use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use rodio::source::Source;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::config::Settings;
use crate::game::GameEvent;

const SFX_CHANNELS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sfx {
    Pause,
    Rotate,
    Clear,
}

pub fn sfx_for(event: GameEvent) -> Option<Sfx> {
    match event {
        GameEvent::Rotated => Some(Sfx::Rotate),
        GameEvent::PauseToggled { .. } => Some(Sfx::Pause),
        GameEvent::RowCleared(_) => Some(Sfx::Clear),
        _ => None,
    }
}

/// Encoded audio kept in memory so each play decodes a fresh cursor.
type Clip = Arc<[u8]>;

fn load_clip(path: &Path) -> Result<Clip> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let clip: Clip = bytes.into();
    Decoder::new(Cursor::new(clip.clone()))
        .with_context(|| format!("decoding {}", path.display()))?;
    Ok(clip)
}

/// Missing files are logged and become `None`; playing them is a no-op.
fn load_or_skip(path: &Path) -> Option<Clip> {
    match load_clip(path) {
        Ok(clip) => Some(clip),
        Err(err) => {
            log::warn!("sound unavailable: {err:#}");
            None
        }
    }
}

struct Output {
    _stream: OutputStream,
    _handle: OutputStreamHandle,
    music_sink: Sink,
    sfx_sinks: Vec<Sink>,
    next_channel: usize,
}

impl Output {
    fn open() -> Result<Self> {
        let (stream, handle) = OutputStream::try_default().context("opening audio device")?;
        let music_sink = Sink::try_new(&handle).context("creating music sink")?;
        let sfx_sinks = (0..SFX_CHANNELS)
            .map(|_| Sink::try_new(&handle).context("creating sfx sink"))
            .collect::<Result<Vec<_>>>()?;
        Ok(Output {
            _stream: stream,
            _handle: handle,
            music_sink,
            sfx_sinks,
            next_channel: 0,
        })
    }
}

/// Sound effects and looping music. Without an output device every call is
/// silently ignored.
pub struct AudioBoard {
    output: Option<Output>,
    pause: Option<Clip>,
    rotate: Option<Clip>,
    clear: Option<Clip>,
    music: Option<Clip>,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl AudioBoard {
    pub fn open(settings: &Settings) -> Self {
        let output = match Output::open() {
            Ok(output) => Some(output),
            Err(err) => {
                log::warn!("audio disabled: {err:#}");
                None
            }
        };
        let assets = &settings.assets;
        AudioBoard {
            output,
            pause: load_or_skip(&assets.pause_sound),
            rotate: load_or_skip(&assets.rotate_sound),
            clear: load_or_skip(&assets.clear_sound),
            music: load_or_skip(&assets.music),
            sfx_volume: settings.sfx_volume,
            music_volume: settings.music_volume,
            muted: settings.muted,
        }
    }

    pub fn silent() -> Self {
        AudioBoard {
            output: None,
            pause: None,
            rotate: None,
            clear: None,
            music: None,
            sfx_volume: 0.0,
            music_volume: 0.0,
            muted: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.output.is_some() && !self.muted
    }

    fn clip(&self, sfx: Sfx) -> Option<&Clip> {
        match sfx {
            Sfx::Pause => self.pause.as_ref(),
            Sfx::Rotate => self.rotate.as_ref(),
            Sfx::Clear => self.clear.as_ref(),
        }
    }

    /// Fire and forget. Rotates through a few sinks so effects can overlap.
    pub fn play(&mut self, sfx: Sfx) {
        if self.muted {
            return;
        }
        let Some(clip) = self.clip(sfx).cloned() else { return };
        let volume = self.sfx_volume;
        let Some(output) = self.output.as_mut() else { return };
        let source = match Decoder::new(Cursor::new(clip)) {
            Ok(source) => source,
            Err(err) => {
                log::warn!("failed to decode {sfx:?}: {err}");
                return;
            }
        };
        let sink = &output.sfx_sinks[output.next_channel];
        output.next_channel = (output.next_channel + 1) % output.sfx_sinks.len();
        sink.clear();
        sink.append(source);
        sink.set_volume(volume);
        sink.play();
    }

    /// Starts the background track on an endless loop.
    pub fn play_music(&mut self) {
        let Some(clip) = self.music.clone() else { return };
        let Some(output) = self.output.as_mut() else { return };
        let source = match Decoder::new(Cursor::new(clip)) {
            Ok(source) => source.repeat_infinite(),
            Err(err) => {
                log::warn!("failed to decode music: {err}");
                return;
            }
        };
        output.music_sink.clear();
        output.music_sink.append(source);
        output
            .music_sink
            .set_volume(if self.muted { 0.0 } else { self.music_volume });
        output.music_sink.play();
    }

    pub fn on_event(&mut self, event: GameEvent) {
        if let Some(sfx) = sfx_for(event) {
            self.play(sfx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::PieceKind;

    #[test]
    fn events_map_to_effects() {
        assert_eq!(sfx_for(GameEvent::Rotated), Some(Sfx::Rotate));
        assert_eq!(sfx_for(GameEvent::PauseToggled { paused: true }), Some(Sfx::Pause));
        assert_eq!(sfx_for(GameEvent::RowCleared(17)), Some(Sfx::Clear));
        assert_eq!(sfx_for(GameEvent::Locked(PieceKind::T)), None);
        assert_eq!(sfx_for(GameEvent::Restarted), None);
    }

    #[test]
    fn silent_board_ignores_everything() {
        let mut audio = AudioBoard::silent();
        assert!(!audio.is_enabled());
        audio.play(Sfx::Clear);
        audio.play_music();
        audio.on_event(GameEvent::Rotated);
    }

    #[test]
    fn missing_file_is_an_error_with_path() {
        let err = load_clip(Path::new("does/not/exist.wav")).unwrap_err();
        assert!(format!("{err:#}").contains("does/not/exist.wav"));
    }
}
