use serde::{Deserialize, Serialize};

/// A normalized job posting.
///
/// Text fields are never absent: anything the API omits becomes `""`.
/// `similarity_score` is attached by the ranker and is `None` before ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub publisher: String,
    pub employment_type: String,
    pub description: String,
    pub location: String,
    pub similarity_score: Option<f64>,
}

impl JobRecord {
    /// Title, company and description, space-joined. This is the unit that
    /// gets embedded for ranking.
    pub fn composite_text(&self) -> String {
        format!("{} {} {}", self.title, self.company, self.description)
    }
}

/// One page of the job-search response. Only `data` matters here.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<RawJobItem>,
}

/// A job item as the search API returns it. Every field may be missing or null.
#[derive(Debug, Default, Deserialize)]
pub struct RawJobItem {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub employer_name: Option<String>,
    #[serde(default)]
    pub job_publisher: Option<String>,
    #[serde(default)]
    pub job_employment_type: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub job_city: Option<String>,
    #[serde(default)]
    pub job_country: Option<String>,
}

impl From<RawJobItem> for JobRecord {
    fn from(item: RawJobItem) -> Self {
        let city = item.job_city.unwrap_or_default();
        let country = item.job_country.unwrap_or_default();

        JobRecord {
            title: item.job_title.unwrap_or_default(),
            company: item.employer_name.unwrap_or_default(),
            publisher: item.job_publisher.unwrap_or_default(),
            employment_type: item.job_employment_type.unwrap_or_default(),
            description: item.job_description.unwrap_or_default(),
            location: format!("{city}, {country}"),
            similarity_score: None,
        }
    }
}
