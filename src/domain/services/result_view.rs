#[cfg(test)]
#[path = "result_view_test.rs"]
mod tests;

use std::mem;

use crate::domain::models::PromptTab;
use crate::domain::models::SessionState;
use crate::domain::models::EXAMPLE_COMMANDS;

pub struct ResultView {}

impl ResultView {
    pub fn title(state: &SessionState, tab: PromptTab) -> String {
        match state {
            SessionState::Idle => {
                return "Transform Any Command Into Professional Prompts".to_string()
            }
            SessionState::Loading => return "Generated Prompts".to_string(),
            SessionState::Failed(_) => return "Error".to_string(),
            SessionState::Success(_) => {
                let titles = [PromptTab::Structured, PromptTab::System]
                    .iter()
                    .map(|t| {
                        if *t == tab {
                            return format!("[{t}]");
                        }
                        return t.to_string();
                    })
                    .collect::<Vec<String>>();

                return format!("{} (Tab to switch)", titles.join(" | "));
            }
        }
    }

    pub fn lines(state: &SessionState, tab: PromptTab) -> Vec<String> {
        match state {
            SessionState::Idle => return idle_lines(),
            SessionState::Loading => return vec!["Generating...".to_string()],
            SessionState::Failed(message) => {
                return vec![
                    format!("Error: {message}"),
                    "".to_string(),
                    "Edit the command and press Enter to try again.".to_string(),
                ];
            }
            SessionState::Success(generation) => {
                let mut lines = generation
                    .prompt(tab)
                    .replace('\t', "  ")
                    .split('\n')
                    .map(|line| return line.trim_end().to_string())
                    .collect::<Vec<String>>();

                lines.push("".to_string());
                lines.push(format!("Original Command: \"{}\"", generation.command));
                lines.push(format!("Generated: {}", generation.created_at_display()));

                return lines;
            }
        }
    }

    /// `lines` broken into rows no wider than `width`, which is what the
    /// result pane draws and scrolls through.
    pub fn wrapped_lines(state: &SessionState, tab: PromptTab, width: usize) -> Vec<String> {
        return ResultView::lines(state, tab)
            .iter()
            .flat_map(|line| return wrap_line(line, width))
            .collect();
    }
}

/// Breaks on spaces where possible. Words longer than `width` are split.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![line.to_string()];
    }

    let mut rows: Vec<String> = vec![];
    let mut current = String::new();
    let mut current_len = 0;
    let mut started = false;

    for word in line.split(' ') {
        let word_len = word.chars().count();
        let needed = if started {
            current_len + 1 + word_len
        } else {
            word_len
        };

        if needed <= width {
            if started {
                current.push(' ');
            }
            current.push_str(word);
            current_len = needed;
            started = true;
            continue;
        }

        if started {
            rows.push(mem::take(&mut current));
        }

        let mut chars = word.chars().collect::<Vec<char>>();
        while chars.len() > width {
            rows.push(chars.drain(..width).collect());
        }
        current_len = chars.len();
        started = !chars.is_empty();
        current = chars.into_iter().collect();
    }

    rows.push(current);
    return rows;
}

fn idle_lines() -> Vec<String> {
    let mut lines = vec![
        "Enter a simple command and watch it transform into a detailed, professional prompt that can be used with any AI agent.",
        "",
        "- Structured Format: organized prompts with clear sections, context, and guidelines.",
        "- System Ready: technical format perfect for AI model system messages.",
        "- One-Click Copy: copy prompts straight into any AI application.",
        "",
        "Try these examples (Ctrl+E):",
    ]
    .iter()
    .map(|line| return line.to_string())
    .collect::<Vec<String>>();

    for example in EXAMPLE_COMMANDS {
        lines.push(format!("- {example}"));
    }

    return lines;
}
