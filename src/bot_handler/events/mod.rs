pub mod ai_moderation;
pub mod settings_input;
pub mod welcome;
