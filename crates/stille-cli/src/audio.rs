//! Ambient sound playback through rodio.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use stille_core::{AudioError, AudioPlayer};
use tracing::debug;

/// Plays one looping asset per handle on the default output device.
///
/// The output stream is opened on the first load, so silent sessions work
/// on machines without an audio device.
pub struct RodioPlayer {
    volume: f32,
    output: Option<(OutputStream, OutputStreamHandle)>,
}

pub struct RodioHandle {
    sink: Sink,
    asset: PathBuf,
}

impl RodioPlayer {
    pub fn new(volume: f32) -> Self {
        Self {
            volume: volume.clamp(0.0, 1.0),
            output: None,
        }
    }

    fn output_handle(&mut self) -> Result<&OutputStreamHandle, AudioError> {
        if self.output.is_none() {
            let pair = OutputStream::try_default()
                .map_err(|e| AudioError::new(format!("Failed to open audio output: {e}")))?;
            self.output = Some(pair);
        }
        self.output
            .as_ref()
            .map(|(_, handle)| handle)
            .ok_or_else(|| AudioError::new("Audio output unavailable"))
    }
}

impl AudioPlayer for RodioPlayer {
    type Handle = RodioHandle;

    async fn load(&mut self, asset: &Path) -> Result<RodioHandle, AudioError> {
        let bytes = tokio::fs::read(asset)
            .await
            .map_err(|e| AudioError::for_asset(asset, format!("Failed to read audio file: {e}")))?;
        let source = Decoder::new(Cursor::new(bytes))
            .map_err(|e| AudioError::for_asset(asset, format!("Failed to decode audio file: {e}")))?;

        let sink = Sink::try_new(self.output_handle()?)
            .map_err(|e| AudioError::for_asset(asset, format!("Failed to create audio sink: {e}")))?;
        sink.set_volume(self.volume);
        sink.append(source.repeat_infinite());
        sink.play();

        debug!(asset = %asset.display(), volume = self.volume, "ambient sound playing");
        Ok(RodioHandle {
            sink,
            asset: asset.to_path_buf(),
        })
    }

    async fn stop(&mut self, handle: &RodioHandle) -> Result<(), AudioError> {
        handle.sink.stop();
        debug!(asset = %handle.asset.display(), "ambient sound stopped");
        Ok(())
    }

    async fn unload(&mut self, handle: RodioHandle) -> Result<(), AudioError> {
        let RodioHandle { sink, asset } = handle;
        drop(sink);
        debug!(asset = %asset.display(), "ambient sound unloaded");
        Ok(())
    }
}
