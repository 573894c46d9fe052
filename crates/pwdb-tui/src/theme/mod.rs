//! Colors used when drawing figures
//!
//! - `palette` - Raw color constants and the series color cycle

pub mod palette;
