pub mod collection;
pub mod metadata;
pub mod review;

pub use collection::{CollisionPolicy, InsertOutcome, ReviewCollection};
pub use metadata::{MovieMetadata, SourceRating};
pub use review::{ReviewKey, ReviewRecord};
