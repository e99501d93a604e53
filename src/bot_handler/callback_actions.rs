use serde::{Deserialize, Serialize};

use crate::storage::Feature;

/// Payload of inline keyboard buttons. Serialized as JSON, which must stay
/// within Telegram's 64 byte limit for callback data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallbackAction {
    // Settings menu actions, admins only:
    /// Switch a feature on or off.
    ToggleFeature(Feature),
    /// Raise or lower the warning limit.
    AdjustWarnLimit(i8),
    /// Ask for a new welcome message.
    SetWelcome,
    /// Ask for new group rules.
    SetRules,
    /// Remove the settings menu.
    CloseSettings,
    /// Label buttons that do nothing when pressed.
    Noop,
    // Command keyboard actions, should be handled as commands:
    /// Same as `/help`.
    Help,
    /// Same as `/rules`.
    Rules,
    /// Same as `/doa`.
    Doa,
    /// Same as `/mutiarakata`.
    MutiaraKata,
    /// Same as `/asmaulhusna` without a number.
    AsmaulHusna,
}
