pub mod categories;
pub mod flatten;
pub mod social;

pub use categories::{
    BatchFile, CategoryIndex, CategorySummary, DEFAULT_BATCH_SIZE, batch_categories_file,
    invert_categories, plan_batches, safe_name, write_category_batches,
};
pub use flatten::{flatten_file, flatten_results};
pub use social::{
    SocialFormat, normalize_by_platform, normalize_file, normalize_labeled, normalize_record,
};
