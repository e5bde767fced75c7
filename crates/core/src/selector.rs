use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    Markdown,
    Text,
    Stop,
}

impl ListFormat {
    pub const CHOICES: [ListFormat; 3] = [ListFormat::Markdown, ListFormat::Text, ListFormat::Stop];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Text => "text",
            Self::Stop => "stop",
        }
    }

    /// Output file name, `None` for [`ListFormat::Stop`].
    pub const fn file_name(self) -> Option<&'static str> {
        match self {
            Self::Markdown => Some("exiflist.md"),
            Self::Text => Some("exiflist.txt"),
            Self::Stop => None,
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::CHOICES
            .into_iter()
            .find(|choice| choice.label().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for ListFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Offers a fixed set of choices and returns the pick, or `None` when the
/// operator cancels.
pub trait FormatSelector {
    fn select(&mut self, choices: &[ListFormat]) -> Result<Option<ListFormat>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSelector {
    choice: Option<ListFormat>,
}

impl FixedSelector {
    pub fn new(choice: Option<ListFormat>) -> Self {
        Self { choice }
    }
}

impl FormatSelector for FixedSelector {
    fn select(&mut self, choices: &[ListFormat]) -> Result<Option<ListFormat>> {
        Ok(self.choice.filter(|choice| choices.contains(choice)))
    }
}

pub fn choose_format(selector: &mut dyn FormatSelector) -> Result<Option<ListFormat>> {
    selector.select(&ListFormat::CHOICES)
}
