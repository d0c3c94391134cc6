// Job acquisition: canonical records, the paginated search client and CSV persistence.

pub mod models;
pub mod persistence;
pub mod source;
