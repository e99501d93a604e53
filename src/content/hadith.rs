use serde::Deserialize;

use crate::content::ContentError;

/// Book used when `/hadits` names none.
pub const DEFAULT_BOOK: &str = "bukhari";

/// Collections served by the hadith API.
pub const BOOKS: [&str; 9] = [
    "abu-daud",
    "ahmad",
    "bukhari",
    "darimi",
    "ibnu-majah",
    "malik",
    "muslim",
    "nasai",
    "tirmidzi",
];

/// A single hadith.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hadith {
    /// Display name of the collection, e.g. `HR. Bukhari`.
    pub book_name: String,
    /// Number within the collection.
    pub number: u32,
    /// Arabic text.
    pub arabic: String,
    /// Indonesian translation.
    pub translation: String,
}

/// Normalizes user input such as `Bukhari` or `ibnu majah` into a book id.
pub fn normalize_book(input: &str) -> Option<&'static str> {
    let normalized = input.trim().to_lowercase().replace([' ', '_'], "-");
    BOOKS.iter().copied().find(|book| *book == normalized)
}

/// Envelope of every hadith API response.
#[derive(Debug, Deserialize)]
pub(crate) struct HadithResponse<T> {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> HadithResponse<T> {
    pub fn into_data(self) -> Result<T, ContentError> {
        match self.data {
            Some(data) if !self.error => Ok(data),
            _ => Err(ContentError::Api(self.message.unwrap_or_else(|| "No data".to_string()))),
        }
    }
}

/// `data` of `GET /books/{book}/{number}`.
#[derive(Debug, Deserialize)]
pub(crate) struct HadithData {
    pub name: String,
    #[serde(default)]
    pub available: u32,
    pub contents: HadithContents,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HadithContents {
    pub number: u32,
    #[serde(default)]
    pub arab: String,
    #[serde(default)]
    pub id: String,
}

/// An entry of `GET /books`.
#[derive(Debug, Deserialize)]
pub(crate) struct BookInfo {
    pub id: String,
    #[serde(default)]
    pub available: u32,
}

impl From<HadithData> for Hadith {
    fn from(data: HadithData) -> Self {
        Self {
            book_name: data.name,
            number: data.contents.number,
            arabic: data.contents.arab,
            translation: data.contents.id,
        }
    }
}
