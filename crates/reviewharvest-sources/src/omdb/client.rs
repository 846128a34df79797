use reviewharvest_models::MovieMetadata;
use tracing::{info, warn};

use crate::error::SourceError;
use crate::omdb::api::{sanitize_title, OmdbSource};

/// Metadata lookup for one title.
///
/// `load()` fetches the document once; the accessors read from it and fail
/// with [`SourceError::MissingField`] when the field is absent or nothing
/// has been loaded.
pub struct OmdbClient {
    title: String,
    source: OmdbSource,
    document: Option<MovieMetadata>,
}

impl OmdbClient {
    pub fn new(title: impl Into<String>, api_key: impl Into<String>) -> Result<Self, SourceError> {
        Ok(Self::with_source(title, OmdbSource::new(api_key)?))
    }

    pub fn with_source(title: impl Into<String>, source: OmdbSource) -> Self {
        Self {
            title: title.into(),
            source,
            document: None,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, SourceError> {
        self.source = self.source.with_base_url(base_url)?;
        Ok(self)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The title as it is sent in the `t=` query parameter
    pub fn sanitized_title(&self) -> String {
        sanitize_title(&self.title)
    }

    pub async fn load(&mut self) -> Result<(), SourceError> {
        match self.source.fetch(&self.title).await {
            Ok(document) => {
                info!(
                    title = %self.title,
                    imdb_id = document.imdb_id.as_deref().unwrap_or(""),
                    "Loaded movie metadata"
                );
                self.document = Some(document);
                Ok(())
            }
            Err(e) => {
                warn!(title = %self.title, error = %e, "Failed to load movie metadata");
                self.document = None;
                Err(e)
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    pub fn metadata(&self) -> Option<&MovieMetadata> {
        self.document.as_ref()
    }

    fn field(&self, name: &'static str, get: fn(&MovieMetadata) -> Option<&str>) -> Result<&str, SourceError> {
        self.document
            .as_ref()
            .and_then(get)
            .ok_or(SourceError::MissingField(name))
    }

    pub fn movie_id(&self) -> Result<&str, SourceError> {
        self.field("imdbID", |m| m.imdb_id.as_deref())
    }

    pub fn movie_title(&self) -> Result<&str, SourceError> {
        self.field("Title", |m| m.title.as_deref())
    }

    pub fn year(&self) -> Result<&str, SourceError> {
        self.field("Year", |m| m.year.as_deref())
    }

    pub fn runtime(&self) -> Result<&str, SourceError> {
        self.field("Runtime", |m| m.runtime.as_deref())
    }

    pub fn genre(&self) -> Result<&str, SourceError> {
        self.field("Genre", |m| m.genre.as_deref())
    }

    pub fn release_date(&self) -> Result<&str, SourceError> {
        self.field("Released", |m| m.released.as_deref())
    }

    pub fn imdb_rating(&self) -> Result<&str, SourceError> {
        self.field("imdbRating", |m| m.imdb_rating.as_deref())
    }

    pub fn poster_link(&self) -> Result<&str, SourceError> {
        self.field("Poster", |m| m.poster.as_deref())
    }

    pub fn plot(&self) -> Result<&str, SourceError> {
        self.field("Plot", |m| m.plot.as_deref())
    }

    pub fn writer(&self) -> Result<&str, SourceError> {
        self.field("Writer", |m| m.writer.as_deref())
    }

    pub fn actors(&self) -> Result<&str, SourceError> {
        self.field("Actors", |m| m.actors.as_deref())
    }

    pub fn awards(&self) -> Result<&str, SourceError> {
        self.field("Awards", |m| m.awards.as_deref())
    }

    pub fn language(&self) -> Result<&str, SourceError> {
        self.field("Language", |m| m.language.as_deref())
    }

    pub fn country(&self) -> Result<&str, SourceError> {
        self.field("Country", |m| m.country.as_deref())
    }

    pub fn production(&self) -> Result<&str, SourceError> {
        self.field("Production", |m| m.production.as_deref())
    }

    pub fn director(&self) -> Result<&str, SourceError> {
        self.field("Director", |m| m.director.as_deref())
    }

    /// Per-source ratings, each entry rendered as a JSON object string
    pub fn ratings(&self) -> Result<Vec<String>, SourceError> {
        self.document
            .as_ref()
            .and_then(MovieMetadata::ratings_as_strings)
            .ok_or(SourceError::MissingField("Ratings"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Client;

    fn client(title: &str) -> OmdbClient {
        let source = OmdbSource::with_client(Client::new(), "http://www.omdbapi.com/", "key").unwrap();
        OmdbClient::with_source(title, source)
    }

    #[test]
    fn test_accessors_fail_before_load() {
        let client = client("The Matrix");
        assert!(!client.is_loaded());
        assert!(matches!(client.movie_id(), Err(SourceError::MissingField("imdbID"))));
        assert!(matches!(client.director(), Err(SourceError::MissingField("Director"))));
        assert!(matches!(client.ratings(), Err(SourceError::MissingField("Ratings"))));
    }

    #[test]
    fn test_sanitized_title() {
        assert_eq!(client("The Matrix").sanitized_title(), "The+Matrix");
    }
}
