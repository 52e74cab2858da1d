use serde::{Deserialize, Deserializer, Serialize};

/// Decodes an explicit JSON `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Volume information as returned by the upstream search API.
///
/// Fields the upstream leaves out or sends as `null` decode to their empty
/// value so that completeness is decided by the validator, not by the decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookInformation {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub authors: Vec<String>,
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub categories: Vec<String>,
    #[serde(rename = "pageCount", deserialize_with = "null_as_default")]
    pub page_count: u32,
    #[serde(rename = "imageLinks", deserialize_with = "null_as_default")]
    pub image_links: ImageLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageLinks {
    #[serde(rename = "smallThumbnail", deserialize_with = "null_as_default")]
    pub small_thumbnail: String,
    #[serde(deserialize_with = "null_as_default")]
    pub thumbnail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub book_information: BookInformation,
}

impl From<BookInformation> for Book {
    fn from(book_information: BookInformation) -> Self {
        Self { book_information }
    }
}
