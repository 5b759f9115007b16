// Metadata extraction - the boundary to the external yt-dlp engine.

pub mod cli;
pub mod traits;

pub use cli::CliExtractor;
pub use traits::{ExtractorConfig, MetadataExtractor};
