pub mod metadata;
pub mod movie;
pub mod page;
pub mod resolution;

pub use metadata::EnrichedMetadata;
pub use movie::{MovieRecord, TorrentVariant};
pub use page::{Page, PageResult};
pub use resolution::{Resolution, ResolutionFailure};
