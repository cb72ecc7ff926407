// UI Constants
pub const APP_TITLE: &str = "NEURAL.INTERFACE.v2.1";
pub const MODEL_LABEL: &str = "DEEPSEEK-CODER-6.7B";
pub const PROMPT: &str = "user@neural-interface:~$";
pub const INPUT_PLACEHOLDER: &str = "Enter command or query...";

pub const USER_LABEL: &str = "[USER]";
pub const ASSISTANT_LABEL: &str = "[AI_CORE]";
pub const LOADING_TEXT: &str = "PROCESSING...";

pub const SEED_MESSAGE: &str = "SYSTEM INITIALIZED...\nAI NEURAL NETWORK ONLINE\nAWAITING USER INPUT...";

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Katakana and digits used by the matrix rain and the title glitch.
pub const RAIN_GLYPHS: &[char] = &[
    'ｱ', 'ｲ', 'ｳ', 'ｴ', 'ｵ', 'ｶ', 'ｷ', 'ｸ', 'ｹ', 'ｺ', 'ｻ', 'ｼ', 'ｽ', 'ｾ', 'ｿ', 'ﾀ', 'ﾁ', 'ﾂ',
    'ﾃ', 'ﾄ', 'ﾅ', 'ﾆ', 'ﾇ', 'ﾈ', 'ﾉ', 'ﾊ', 'ﾋ', 'ﾌ', 'ﾍ', 'ﾎ', 'ﾏ', 'ﾐ', 'ﾑ', 'ﾒ', 'ﾓ', 'ﾔ',
    'ﾕ', 'ﾖ', 'ﾗ', 'ﾘ', 'ﾙ', 'ﾚ', 'ﾛ', 'ﾜ', 'ﾝ', '0', '1', '2', '3', '4', '5', '6', '7', '8',
    '9',
];

pub const SIDE_PANEL_WIDTH: u16 = 26;
pub const INPUT_AREA_HEIGHT: u16 = 7;
