/// The Asmaul Husna API.
pub mod asmaul_husna;
/// The daily prayer API.
pub mod doa;
/// The hadith API.
pub mod hadith;
/// Built-in words of wisdom.
pub mod quotes;
/// The equran.id API.
pub mod quran;

use async_trait::async_trait;
use mockall::automock;
use rand::{Rng, seq::SliceRandom};
use reqwest::Client;
use thiserror::Error;

use crate::{
    config::Config,
    content::{
        asmaul_husna::{AsmaulHusna, AsmaulHusnaResponse},
        doa::{Doa, DoaResponse},
        hadith::{BookInfo, Hadith, HadithData, HadithResponse},
        quran::{EquranResponse, SURAH_COUNT, SurahData, Tafsir, TafsirData, Verse, VerseRef},
    },
    http::{self, HttpError},
};

/// Errors from the content APIs.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The requested item does not exist.
    #[error("Content not found")]
    NotFound,
    /// The API answered with an error payload.
    #[error("Content API error: {0}")]
    Api(String),
    /// The HTTP request failed.
    #[error("Content request failed: {0}")]
    Request(HttpError),
}

impl From<HttpError> for ContentError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::NotFound => ContentError::NotFound,
            other => ContentError::Request(other),
        }
    }
}

type Result<T> = std::result::Result<T, ContentError>;

/// Client for the religious content APIs.
#[automock]
#[async_trait]
pub trait ContentClient: Send + Sync {
    /// Get the text and translation of a verse.
    async fn get_verse(&self, verse_ref: VerseRef) -> Result<Verse>;

    /// Get the Kemenag tafsir of a verse, together with the verse text.
    async fn get_tafsir(&self, verse_ref: VerseRef) -> Result<Tafsir>;

    /// Get a random verse from a random surah.
    async fn random_verse(&self) -> Result<Verse>;

    /// Get a random daily prayer.
    async fn random_doa(&self) -> Result<Doa>;

    /// Get a hadith from a book. A random one when `number` is `None`.
    async fn get_hadith(&self, book: &str, number: Option<u32>) -> Result<Hadith>;

    /// Get one of the 99 names. A random one when `number` is `None`.
    async fn get_asmaul_husna(&self, number: Option<u32>) -> Result<AsmaulHusna>;
}

/// `ContentClient` over the public REST APIs.
pub struct DefaultContentClient {
    client: Client,
    equran_url: String,
    hadith_url: String,
    doa_url: String,
    asmaul_husna_url: String,
}

impl DefaultContentClient {
    /// Creates a client for the API base URLs of `config`.
    pub fn new(config: &Config) -> std::result::Result<Self, HttpError> {
        Ok(Self {
            client: http::build_client(config.http_timeout_secs)?,
            equran_url: config.equran_api_url.trim_end_matches('/').to_string(),
            hadith_url: config.hadith_api_url.trim_end_matches('/').to_string(),
            doa_url: config.doa_api_url.clone(),
            asmaul_husna_url: config.asmaul_husna_api_url.clone(),
        })
    }

    async fn fetch_surah(&self, surah: u32) -> Result<SurahData> {
        tracing::debug!("Fetching surah {surah}");
        let url = format!("{}/surat/{surah}", self.equran_url);
        http::send_json::<EquranResponse<SurahData>, _>(|| self.client.get(&url))
            .await?
            .into_data()
    }

    async fn fetch_tafsir(&self, surah: u32) -> Result<TafsirData> {
        tracing::debug!("Fetching tafsir of surah {surah}");
        let url = format!("{}/tafsir/{surah}", self.equran_url);
        http::send_json::<EquranResponse<TafsirData>, _>(|| self.client.get(&url))
            .await?
            .into_data()
    }

    async fn available_hadith(&self, book: &str) -> Result<u32> {
        let url = format!("{}/books", self.hadith_url);
        let books = http::send_json::<HadithResponse<Vec<BookInfo>>, _>(|| self.client.get(&url))
            .await?
            .into_data()?;

        books
            .into_iter()
            .find(|b| b.id == book)
            .map(|b| b.available)
            .filter(|available| *available > 0)
            .ok_or(ContentError::NotFound)
    }
}

#[async_trait]
impl ContentClient for DefaultContentClient {
    async fn get_verse(&self, verse_ref: VerseRef) -> Result<Verse> {
        self.fetch_surah(verse_ref.surah).await?.verse(verse_ref)
    }

    async fn get_tafsir(&self, verse_ref: VerseRef) -> Result<Tafsir> {
        let verse = self.get_verse(verse_ref).await?;
        self.fetch_tafsir(verse_ref.surah).await?.tafsir_for(verse)
    }

    async fn random_verse(&self) -> Result<Verse> {
        let surah = rand::thread_rng().gen_range(1..=SURAH_COUNT);
        let data = self.fetch_surah(surah).await?;

        if data.ayat.is_empty() {
            return Err(ContentError::Api(format!("Surah {surah} has no verses")));
        }
        let index = rand::thread_rng().gen_range(0..data.ayat.len());
        let ayat = &data.ayat[index];
        let number = if ayat.nomor_ayat > 0 { ayat.nomor_ayat } else { index as u32 + 1 };

        Ok(data.to_verse(VerseRef { surah, ayat: number }, ayat))
    }

    async fn random_doa(&self) -> Result<Doa> {
        tracing::debug!("Fetching doa list");
        let list = http::send_json::<DoaResponse, _>(|| self.client.get(&self.doa_url))
            .await?
            .into_list();

        list.choose(&mut rand::thread_rng()).cloned().ok_or(ContentError::NotFound)
    }

    async fn get_hadith(&self, book: &str, number: Option<u32>) -> Result<Hadith> {
        let number = match number {
            Some(number) => number,
            None => {
                let available = self.available_hadith(book).await?;
                rand::thread_rng().gen_range(1..=available)
            }
        };

        tracing::debug!("Fetching hadith {book} #{number}");
        let url = format!("{}/books/{book}/{number}", self.hadith_url);
        let data = http::send_json::<HadithResponse<HadithData>, _>(|| self.client.get(&url))
            .await?
            .into_data()?;

        Ok(Hadith::from(data))
    }

    async fn get_asmaul_husna(&self, number: Option<u32>) -> Result<AsmaulHusna> {
        tracing::debug!("Fetching Asmaul Husna");
        let names =
            http::send_json::<AsmaulHusnaResponse, _>(|| self.client.get(&self.asmaul_husna_url))
                .await?
                .data;

        let name = match number {
            Some(number) => names.into_iter().find(|n| n.urutan == number),
            None => names.choose(&mut rand::thread_rng()).cloned(),
        };
        name.ok_or(ContentError::NotFound)
    }
}
