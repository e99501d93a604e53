use std::{fmt, str::FromStr};

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::content::ContentError;

/// Number of surahs in the Qur'an.
pub const SURAH_COUNT: u32 = 114;

lazy_static! {
    static ref HTML_TAG: Regex = Regex::new("<.*?>").expect("valid regex");
}

/// A `surah:ayat` reference such as `2:255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerseRef {
    /// Surah number, 1 to 114.
    pub surah: u32,
    /// Ayat number within the surah, from 1.
    pub ayat: u32,
}

impl fmt::Display for VerseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.surah, self.ayat)
    }
}

impl FromStr for VerseRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (surah, ayat) =
            s.trim().split_once(':').ok_or_else(|| "Expected format surah:ayat".to_string())?;
        let surah: u32 = surah.trim().parse().map_err(|_| "Invalid surah number".to_string())?;
        let ayat: u32 = ayat.trim().parse().map_err(|_| "Invalid ayat number".to_string())?;

        if !(1..=SURAH_COUNT).contains(&surah) {
            return Err(format!("Surah must be between 1 and {SURAH_COUNT}"));
        }
        if ayat == 0 {
            return Err("Ayat must be greater than 0".to_string());
        }

        Ok(Self { surah, ayat })
    }
}

/// A verse with its Indonesian translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verse {
    /// Latin name of the surah.
    pub surah_name: String,
    /// Where the verse is.
    pub verse_ref: VerseRef,
    /// Arabic text.
    pub arabic: String,
    /// Indonesian translation.
    pub translation: String,
}

/// The Kemenag tafsir of a verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tafsir {
    /// Latin name of the surah.
    pub surah_name: String,
    /// Where the verse is.
    pub verse_ref: VerseRef,
    /// Arabic text of the verse.
    pub verse_text: String,
    /// Tafsir text without HTML tags.
    pub text: String,
}

/// `data` of `GET /surat/{n}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SurahData {
    #[serde(default)]
    pub nama_latin: Option<String>,
    #[serde(default)]
    pub ayat: Vec<AyatData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AyatData {
    #[serde(default)]
    pub nomor_ayat: u32,
    #[serde(default)]
    pub teks_arab: String,
    #[serde(default)]
    pub teks_indonesia: String,
}

/// `data` of `GET /tafsir/{n}`.
#[derive(Debug, Deserialize)]
pub(crate) struct TafsirData {
    #[serde(default)]
    pub tafsir: Vec<TafsirEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TafsirEntry {
    pub ayat: u32,
    #[serde(default)]
    pub teks: Option<String>,
}

/// Envelope shared by every equran.id response.
#[derive(Debug, Deserialize)]
pub(crate) struct EquranResponse<T> {
    pub code: u16,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> EquranResponse<T> {
    pub fn into_data(self) -> Result<T, ContentError> {
        match (self.code, self.data) {
            (200, Some(data)) => Ok(data),
            (code, _) => Err(ContentError::Api(format!(
                "equran.id returned code {code}: {}",
                self.message.unwrap_or_default()
            ))),
        }
    }
}

impl SurahData {
    fn surah_name(&self) -> String {
        self.nama_latin.clone().unwrap_or_else(|| "N/A".to_string())
    }

    /// Picks the requested ayat. Ayat numbers are 1-based.
    pub fn verse(&self, verse_ref: VerseRef) -> Result<Verse, ContentError> {
        let index = verse_ref.ayat.checked_sub(1).ok_or(ContentError::NotFound)? as usize;
        let ayat = self.ayat.get(index).ok_or(ContentError::NotFound)?;
        Ok(self.to_verse(verse_ref, ayat))
    }

    pub fn to_verse(&self, verse_ref: VerseRef, ayat: &AyatData) -> Verse {
        Verse {
            surah_name: self.surah_name(),
            verse_ref,
            arabic: ayat.teks_arab.clone(),
            translation: ayat.teks_indonesia.clone(),
        }
    }
}

impl TafsirData {
    /// Finds the tafsir of the verse and combines it with the verse text.
    pub fn tafsir_for(&self, verse: Verse) -> Result<Tafsir, ContentError> {
        let entry = self
            .tafsir
            .iter()
            .find(|t| t.ayat == verse.verse_ref.ayat)
            .ok_or(ContentError::NotFound)?;
        let raw = entry.teks.as_deref().unwrap_or("Tafsir tidak ditemukan.");

        Ok(Tafsir {
            surah_name: verse.surah_name,
            verse_ref: verse.verse_ref,
            verse_text: verse.arabic,
            text: strip_html(raw),
        })
    }
}

/// Removes HTML tags from API text.
pub fn strip_html(text: &str) -> String {
    HTML_TAG.replace_all(text, "").into_owned()
}
