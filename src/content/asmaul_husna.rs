use serde::Deserialize;

/// Number of names.
pub const NAMES_COUNT: u32 = 99;

/// One of the 99 names of Allah.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AsmaulHusna {
    /// Position from 1 to 99.
    #[serde(alias = "index", alias = "id")]
    pub urutan: u32,
    /// Latin transliteration.
    #[serde(default)]
    pub latin: String,
    /// Arabic script.
    #[serde(default, alias = "arabic")]
    pub arab: String,
    /// Indonesian meaning.
    #[serde(default, alias = "translation_id", alias = "meaning")]
    pub arti: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AsmaulHusnaResponse {
    #[serde(default)]
    pub data: Vec<AsmaulHusna>,
}
