use serde::{Deserialize, Serialize};

/// One entry of the OMDb `Ratings` array
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceRating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// Decoded OMDb response for a single title.
///
/// Every field is optional: OMDb omits fields freely and replies with a
/// `Response: "False"` envelope when the title is unknown.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MovieMetadata {
    #[serde(rename = "imdbID", default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(rename = "Title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "Year", default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(rename = "Runtime", default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(rename = "Genre", default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(rename = "Released", default, skip_serializing_if = "Option::is_none")]
    pub released: Option<String>,
    #[serde(rename = "imdbRating", default, skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Poster", default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(rename = "Plot", default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(rename = "Writer", default, skip_serializing_if = "Option::is_none")]
    pub writer: Option<String>,
    #[serde(rename = "Actors", default, skip_serializing_if = "Option::is_none")]
    pub actors: Option<String>,
    #[serde(rename = "Awards", default, skip_serializing_if = "Option::is_none")]
    pub awards: Option<String>,
    #[serde(rename = "Language", default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(rename = "Country", default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "Production", default, skip_serializing_if = "Option::is_none")]
    pub production: Option<String>,
    #[serde(rename = "Director", default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(rename = "Ratings", default, skip_serializing_if = "Option::is_none")]
    pub ratings: Option<Vec<SourceRating>>,

    // Response envelope
    #[serde(rename = "Response", default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(rename = "Error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MovieMetadata {
    /// OMDb answers HTTP 200 with `Response: "False"` for unknown titles
    pub fn is_error_response(&self) -> bool {
        self.response
            .as_deref()
            .map(|r| r.eq_ignore_ascii_case("false"))
            .unwrap_or(false)
    }

    /// Ratings entries rendered as compact JSON objects, in document order
    pub fn ratings_as_strings(&self) -> Option<Vec<String>> {
        self.ratings.as_ref().map(|ratings| {
            ratings
                .iter()
                .map(|r| serde_json::to_string(r).unwrap_or_default())
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATRIX_JSON: &str = r#"{
        "Title": "The Matrix",
        "Year": "1999",
        "Released": "31 Mar 1999",
        "Runtime": "136 min",
        "Genre": "Action, Sci-Fi",
        "Director": "Lana Wachowski, Lilly Wachowski",
        "Ratings": [
            {"Source": "Internet Movie Database", "Value": "8.7/10"},
            {"Source": "Rotten Tomatoes", "Value": "83%"}
        ],
        "imdbRating": "8.7",
        "imdbID": "tt0133093",
        "Response": "True"
    }"#;

    #[test]
    fn test_decode_omdb_document() {
        let metadata: MovieMetadata = serde_json::from_str(MATRIX_JSON).unwrap();
        assert_eq!(metadata.imdb_id.as_deref(), Some("tt0133093"));
        assert_eq!(metadata.runtime.as_deref(), Some("136 min"));
        assert_eq!(metadata.awards, None);
        assert!(!metadata.is_error_response());
    }

    #[test]
    fn test_ratings_as_strings_keeps_order() {
        let metadata: MovieMetadata = serde_json::from_str(MATRIX_JSON).unwrap();
        let ratings = metadata.ratings_as_strings().unwrap();
        assert_eq!(
            ratings,
            vec![
                r#"{"Source":"Internet Movie Database","Value":"8.7/10"}"#.to_string(),
                r#"{"Source":"Rotten Tomatoes","Value":"83%"}"#.to_string(),
            ]
        );
    }

    #[test]
    fn test_error_envelope() {
        let metadata: MovieMetadata =
            serde_json::from_str(r#"{"Response":"False","Error":"Movie not found!"}"#).unwrap();
        assert!(metadata.is_error_response());
        assert_eq!(metadata.error.as_deref(), Some("Movie not found!"));
        assert_eq!(metadata.ratings_as_strings(), None);
    }
}
