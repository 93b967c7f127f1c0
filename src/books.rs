use serde::Deserialize;

use crate::error::CatalogResult;

/// Google Books volume search, used only as a last-resort image source.
pub struct BooksClient {
    client: reqwest::Client,
    base_url: String,
}

impl BooksClient {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Thumbnail of the first volume matching `title`.
    pub async fn first_thumbnail(&self, title: &str) -> CatalogResult<Option<String>> {
        let url = format!("{}/volumes", self.base_url.trim_end_matches('/'));
        let resp: VolumesResponse = self
            .client
            .get(url)
            .query(&[("q", title)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp.thumbnail())
    }
}

#[derive(Debug, Default, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

impl VolumesResponse {
    fn thumbnail(self) -> Option<String> {
        self.items
            .into_iter()
            .next()?
            .volume_info?
            .image_links?
            .thumbnail
            .filter(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_only_the_first_volume() {
        let resp: VolumesResponse = serde_json::from_value(serde_json::json!({
            "items": [
                { "volumeInfo": { "title": "No cover" } },
                { "volumeInfo": { "imageLinks": { "thumbnail": "http://books.test/2.jpg" } } }
            ]
        }))
        .unwrap();
        assert_eq!(resp.thumbnail(), None);
    }

    #[test]
    fn missing_items() {
        let resp: VolumesResponse = serde_json::from_value(serde_json::json!({ "totalItems": 0 }))
            .unwrap();
        assert_eq!(resp.thumbnail(), None);

        let resp: VolumesResponse = serde_json::from_value(serde_json::json!({
            "items": [{ "volumeInfo": { "imageLinks": { "thumbnail": "http://books.test/1.jpg" } } }]
        }))
        .unwrap();
        assert_eq!(resp.thumbnail().as_deref(), Some("http://books.test/1.jpg"));
    }
}
