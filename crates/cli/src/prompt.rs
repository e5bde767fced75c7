use anyhow::{Context, Result};
use console::{style, Key, Term};
use exiflist_core::{FormatSelector, ListFormat};

#[derive(Debug, PartialEq, Eq)]
enum Answer {
    Pick(ListFormat),
    Cancel,
    Invalid,
}

/// Single-key menu on the terminal: a number or the initial of an option
/// picks it, `q` or ESC cancels.
pub struct PromptSelector {
    term: Term,
}

impl PromptSelector {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl Default for PromptSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatSelector for PromptSelector {
    fn select(&mut self, choices: &[ListFormat]) -> Result<Option<ListFormat>> {
        if !self.term.is_term() {
            self.term
                .write_line("端末ではないため出力形式を選択できません。--format で指定してください")
                .context("プロンプトを表示できませんでした")?;
            return Ok(None);
        }

        self.term
            .write_line(&format!("{}", style("出力形式:").bold()))
            .context("プロンプトを表示できませんでした")?;
        for (i, choice) in choices.iter().enumerate() {
            self.term
                .write_line(&format!("  {}) {}", i + 1, choice))
                .context("プロンプトを表示できませんでした")?;
        }

        loop {
            let key = self.term.read_key().context("入力を読み取れませんでした")?;
            match answer_for_key(&key, choices) {
                Answer::Pick(choice) => {
                    self.term
                        .write_line(&format!("> {}", choice))
                        .context("プロンプトを表示できませんでした")?;
                    return Ok(Some(choice));
                }
                Answer::Cancel => return Ok(None),
                Answer::Invalid => {
                    self.term
                        .write_line(&format!(
                            "{}",
                            style("番号または頭文字で選択してください (q / ESC で中止)").yellow()
                        ))
                        .context("プロンプトを表示できませんでした")?;
                }
            }
        }
    }
}

fn answer_for_key(key: &Key, choices: &[ListFormat]) -> Answer {
    let c = match key {
        Key::Escape => return Answer::Cancel,
        Key::Char(c) => c.to_ascii_lowercase(),
        _ => return Answer::Invalid,
    };
    if c == 'q' {
        return Answer::Cancel;
    }
    if let Some(n) = c.to_digit(10) {
        return match (n as usize).checked_sub(1).and_then(|i| choices.get(i)) {
            Some(choice) => Answer::Pick(*choice),
            None => Answer::Invalid,
        };
    }
    choices
        .iter()
        .find(|choice| choice.label().starts_with(c))
        .map_or(Answer::Invalid, |choice| Answer::Pick(*choice))
}
