//! Theme scales used to size generated utilities.

mod handle;
mod length;
mod scale;

pub use handle::ThemeHandle;
pub use length::CssLength;
pub use scale::{Theme, ThemeLookup};
