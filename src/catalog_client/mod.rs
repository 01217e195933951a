use serde::Deserialize;

use crate::domain::settings::Settings;

/// Page size the remote expects for the first page.
pub const FIRST_PAGE_SIZE: u32 = 20;
/// Page size for every page after the first.
pub const PAGE_SIZE: u32 = 10;

/// Anything that can hand out pages of generated books.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_books(&self, query: &BookQuery) -> anyhow::Result<Vec<BookRecord>>;
}

/// Query parameters for one page of the listing.
#[derive(Debug, Clone, PartialEq)]
pub struct BookQuery {
    pub settings: Settings,
    pub page: u32,
}

impl BookQuery {
    pub fn new(settings: Settings, page: u32) -> Self {
        BookQuery { settings, page }
    }

    pub fn per_page(&self) -> u32 {
        if self.page == 1 {
            FIRST_PAGE_SIZE
        } else {
            PAGE_SIZE
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("language", self.settings.language.code().to_string()),
            ("seed", self.settings.seed.clone()),
            ("likes", self.settings.likes.to_string()),
            ("reviews", self.settings.reviews.to_string()),
            ("page", self.page.to_string()),
            ("perPage", self.per_page().to_string()),
        ]
    }
}

#[derive(Clone, Debug)]
pub struct CatalogClient {
    base_url: String,
    books_path: String,
    client: reqwest::Client,
}

impl CatalogClient {
    /// Create a new client with the given base URL (e.g. "https://books.example.com").
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().build()?;
        let base_url_str = base_url.into();
        tracing::debug!(base_url = %base_url_str, "creating CatalogClient");
        Ok(CatalogClient {
            base_url: base_url_str.trim_end_matches('/').to_string(),
            books_path: "/books".into(),
            client,
        })
    }

    /// Return a client that lists books from `path` instead of `/books`
    pub fn with_books_path(mut self, path: impl Into<String>) -> Self {
        self.books_path = path.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// GET {books_path}?language&seed&likes&reviews&page&perPage
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_books(&self, query: &BookQuery) -> anyhow::Result<Vec<BookRecord>> {
        let url = self.url(&self.books_path);
        tracing::debug!(%url, page = query.page, per_page = query.per_page(), "GET books");
        let req = self.client.get(&url).query(&query.query_pairs());

        let resp = req.send().await?;
        let status = resp.error_for_status()?;
        let body = status.text().await?;
        match serde_json::from_str::<Vec<BookRecord>>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                let mut snippet_len = body.len().min(2000);
                while !body.is_char_boundary(snippet_len) {
                    snippet_len -= 1;
                }
                let snippet = &body[..snippet_len];
                tracing::error!(error = %e, body_snippet = %snippet, "failed to parse book page");
                Err(e.into())
            }
        }
    }
}

#[async_trait::async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch_books(&self, query: &BookQuery) -> anyhow::Result<Vec<BookRecord>> {
        self.get_books(query).await
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    pub index: u64,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub cover_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub year: i32,
    /// 0.0 - 5.0
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub likes: u64,
    /// Aggregate review figure, only some generator versions send it
    #[serde(default, deserialize_with = "crate::catalog_client::de::opt_f64_from_str_or_num")]
    pub reviews: Option<f64>,
    #[serde(default)]
    pub review_list: Vec<Review>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Review {
    pub reviewer: String,
    /// 0 - 5
    pub rating: u8,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub comment: String,
}

/// Internal serde helpers
pub mod de {
    use serde::{Deserialize, Deserializer};

    /// Accept Option<f64> from either a number or a string like "4.5"; null/"" -> None.
    pub fn opt_f64_from_str_or_num<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NumOrStr {
            Num(f64),
            Str(String),
        }

        let val: Option<NumOrStr> = Option::deserialize(deserializer)?;
        Ok(match val {
            None => None,
            Some(NumOrStr::Num(n)) => Some(n),
            Some(NumOrStr::Str(s)) => s.trim().parse::<f64>().ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::Language;

    fn scenario_settings() -> Settings {
        Settings {
            language: Language::En,
            seed: "2535653423".into(),
            likes: 5.0,
            reviews: 4.7,
        }
    }

    #[test]
    fn first_page_is_larger() {
        assert_eq!(BookQuery::new(scenario_settings(), 1).per_page(), 20);
        assert_eq!(BookQuery::new(scenario_settings(), 2).per_page(), 10);
        assert_eq!(BookQuery::new(scenario_settings(), 7).per_page(), 10);
    }

    #[test]
    fn query_pairs_match_wire_contract() {
        let q = BookQuery::new(scenario_settings(), 2);
        assert_eq!(
            q.query_pairs(),
            vec![
                ("language", "en".to_string()),
                ("seed", "2535653423".to_string()),
                ("likes", "5".to_string()),
                ("reviews", "4.7".to_string()),
                ("page", "2".to_string()),
                ("perPage", "10".to_string()),
            ]
        );
    }

    #[test]
    fn url_joins_without_double_slash() {
        let c = CatalogClient::new("https://books.example.com/").unwrap();
        assert_eq!(c.url("/books"), "https://books.example.com/books");
        assert_eq!(c.url("books"), "https://books.example.com/books");
        assert_eq!(c.base_url(), "https://books.example.com");
    }

    #[test]
    fn book_page_deserialize_example() {
        let json = r#"[
            {
                "index": 1,
                "isbn": "978-1-4028-9462-6",
                "title": "The Quiet Harbor",
                "author": "Mara Lindqvist",
                "publisher": "Northwind Press",
                "coverUrl": "https://picsum.photos/seed/1/200/300",
                "description": "A lighthouse keeper finds a letter.",
                "pages": 312,
                "year": 2004,
                "rating": 4.3,
                "likes": 7,
                "reviews": 2,
                "reviewList": [
                    { "reviewer": "J. Doe", "rating": 5, "date": "2021-03-04", "comment": "Loved it" },
                    { "reviewer": "A. Roe", "rating": 3, "date": "2022-11-19", "comment": "Slow start" }
                ]
            },
            {
                "index": 2,
                "isbn": "978-0-306-40615-7",
                "title": "Glass Orchard",
                "author": "Pim de Vries",
                "publisher": "Harbor & Sons",
                "coverUrl": "https://picsum.photos/seed/2/200/300",
                "description": "",
                "pages": 190,
                "year": 1998,
                "rating": 2.9,
                "likes": 0
            }
        ]"#;

        let books: Vec<BookRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].cover_url, "https://picsum.photos/seed/1/200/300");
        assert_eq!(books[0].review_list.len(), 2);
        assert_eq!(books[0].review_list[1].rating, 3);
        assert_eq!(books[0].reviews, Some(2.0));
        assert_eq!(books[1].reviews, None);
        assert!(books[1].review_list.is_empty());
    }

    #[test]
    fn reviews_accepts_string_number() {
        let json = r#"{ "index": 3, "reviews": "4.5" }"#;
        let b: BookRecord = serde_json::from_str(json).unwrap();
        assert_eq!(b.reviews, Some(4.5));
        assert_eq!(b.title, "");
    }

    #[test]
    fn malformed_page_is_an_error() {
        let json = r#"{ "books": [] }"#;
        assert!(serde_json::from_str::<Vec<BookRecord>>(json).is_err());
    }
}
