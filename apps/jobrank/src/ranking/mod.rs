// Similarity ranking of fetched jobs against the résumé vector.

pub mod ranker;
pub mod similarity;
