use serde::Deserialize;

/// A daily prayer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Doa {
    /// Title.
    #[serde(alias = "doa", alias = "title")]
    pub judul: String,
    /// Arabic text.
    #[serde(default, alias = "ayat", alias = "arabic")]
    pub arab: String,
    /// Latin transliteration.
    #[serde(default)]
    pub latin: String,
    /// Indonesian translation.
    #[serde(default, alias = "artinya", alias = "translation")]
    pub terjemah: String,
}

/// The doa API either returns a bare list or wraps it in `data`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum DoaResponse {
    List(Vec<Doa>),
    Wrapped { data: Vec<Doa> },
}

impl DoaResponse {
    pub fn into_list(self) -> Vec<Doa> {
        match self {
            DoaResponse::List(list) | DoaResponse::Wrapped { data: list } => list,
        }
    }
}
