// Résumé handling: section segmentation and the parsed-sections report.

pub mod report;
pub mod sections;
