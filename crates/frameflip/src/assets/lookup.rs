use crate::components::frame::AtlasHandle;
use crate::error::AnimError;
use crate::streams::{SheetConfig, SpriteSheetStream};

/// Resolves an atlas by key.
///
/// This is all the animation code needs from a resource cache. Pass an
/// implementation explicitly; closures work too.
pub trait AtlasLookup {
    fn atlas(&self, key: &str) -> Option<AtlasHandle>;
}

impl<F> AtlasLookup for F
where
    F: Fn(&str) -> Option<AtlasHandle>,
{
    fn atlas(&self, key: &str) -> Option<AtlasHandle> {
        self(key)
    }
}

/// Build one stream from a sheet description, resolving its atlas through
/// `lookup`.
pub fn build_sheet(
    lookup: &dyn AtlasLookup,
    atlas: &str,
    config: &SheetConfig,
) -> Result<SpriteSheetStream, AnimError> {
    let Some(handle) = lookup.atlas(atlas) else {
        log::warn!("sheet refers to unknown atlas '{atlas}'");
        return Err(AnimError::UnknownAtlas(atlas.to_string()));
    };
    SpriteSheetStream::from_config(&handle, config)
}
