//! Fixed command replies. These never reach the translation pipeline.

/// Postback payload of the platform's "Get Started" button
pub const GET_STARTED_PAYLOAD: &str = "GET_STARTED";

const HELP_TEXT: &str = "🆘 সাহায্য\n\
\n\
• বাংলায় লিখলে ইংরেজি অনুবাদ পাবেন।\n\
• ইংরেজি বা অন্য ভাষায় লিখলে বাংলা অনুবাদ পাবেন।\n\
• রোমান হরফে বাংলা (যেমন: ami bhalo achi) লিখলেও ইংরেজি অনুবাদ পাবেন।\n\
\n\
কমান্ড: help, about";

const ABOUT_TEXT: &str = "ℹ️ পরিচিতি\n\
\n\
এই বটটি বাংলা ও ইংরেজির মধ্যে স্বয়ংক্রিয়ভাবে অনুবাদ করে।\n\
অনুবাদ অনলাইন অনুবাদ সেবা থেকে আসে, তাই মাঝে মাঝে ভুল হতে পারে।";

const WELCOME_TEXT: &str = "👋 স্বাগতম!\n\
\n\
যেকোনো বার্তা পাঠান, আমি অনুবাদ করে দেব।\n\
বাংলা → ইংরেজি, ইংরেজি → বাংলা।\n\
\n\
সাহায্যের জন্য লিখুন: help";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CannedCommand {
    Help,
    About,
    GetStarted,
}

impl CannedCommand {
    /// Keyword match on the trimmed, lower-cased message text
    pub fn from_text(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "help" => Some(Self::Help),
            "about" => Some(Self::About),
            "get started" => Some(Self::GetStarted),
            _ => None,
        }
    }

    pub fn from_postback(payload: &str) -> Option<Self> {
        (payload == GET_STARTED_PAYLOAD).then_some(Self::GetStarted)
    }

    pub fn reply(&self) -> &'static str {
        match self {
            Self::Help => HELP_TEXT,
            Self::About => ABOUT_TEXT,
            Self::GetStarted => WELCOME_TEXT,
        }
    }
}
