pub mod artifacts;
pub mod controller;
pub mod metadata;
pub mod providers;
pub mod recommender;

pub use artifacts::{load_artifacts, Artifacts};
pub use metadata::MetadataLookup;
pub use recommender::{recommend, recommend_by_id, recommend_for_item, DEFAULT_K};
