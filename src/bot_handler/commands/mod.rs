pub mod asmaulhusna;
pub mod ayat;
pub mod batal;
pub mod doa;
pub mod hadits;
pub mod help;
pub mod ingatkan;
pub mod kick;
pub mod kisah;
pub mod mutiarakata;
pub mod rules;
pub mod settings;
pub mod start;
pub mod statistic;
pub mod tafsir;
pub mod tanya;
pub mod unwarn;
pub mod warn;
pub mod warns;
