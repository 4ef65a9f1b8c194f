use std::future::Future;
use std::path::Path;

use crate::error::AudioError;

/// Looping playback of ambient sound assets.
///
/// The session controller owns the player and at most one live handle.
/// Every handle it gets from `load` is passed to `stop` and then `unload`
/// exactly once.
pub trait AudioPlayer {
    /// Opaque reference to a playing asset.
    type Handle;

    /// Load `asset` and start playing it on a loop.
    fn load(&mut self, asset: &Path) -> impl Future<Output = Result<Self::Handle, AudioError>>;

    /// Stop playback. The handle stays valid for `unload`.
    fn stop(&mut self, handle: &Self::Handle) -> impl Future<Output = Result<(), AudioError>>;

    /// Release everything held by `handle`.
    fn unload(&mut self, handle: Self::Handle) -> impl Future<Output = Result<(), AudioError>>;
}
