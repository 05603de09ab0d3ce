//! Plain-text rendering of quiz state.

use crate::questions::{OptionId, Question};
use crate::recommend::Recommendation;
use crate::session::Progress;

const BAR_WIDTH: usize = 20;

/// `[############--------] 60% · question 3/5`
pub fn render_progress(progress: &Progress) -> String {
    let percent = progress.percent() as usize;
    let filled = BAR_WIDTH * percent / 100;
    format!(
        "[{}{}] {}% · question {}/{}",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        percent,
        progress.position(),
        progress.total
    )
}

/// The prompt followed by numbered options; the selected one is marked.
pub fn render_question(question: &Question, selected: Option<&OptionId>) -> String {
    let mut lines = vec![question.prompt.clone()];
    for (i, option) in question.options.iter().enumerate() {
        let marker = if selected == Some(&option.id) { "(•)" } else { "( )" };
        let mut line = format!("  {marker} {}. ", i + 1);
        if let Some(ref emoji) = option.emoji {
            line.push_str(emoji);
            line.push(' ');
        }
        line.push_str(&option.text);
        if let Some(ref link) = option.link {
            line.push_str(&format!(" [{}]({})", link.label, link.url));
        }
        lines.push(line);
    }
    lines.join("\n")
}

pub fn render_result(result: &Recommendation) -> String {
    format!(
        "{} Your music style recommendation:\n\n    {}\n\n{}",
        result.emoji, result.style, result.description
    )
}

/// Resolve user input to one of the question's options: a 1-based number
/// or the option id itself.
pub fn parse_choice<'a>(input: &str, question: &'a Question) -> Option<&'a OptionId> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| question.options.get(i))
            .map(|o| &o.id);
    }
    question
        .options
        .iter()
        .find(|o| o.id.as_str().eq_ignore_ascii_case(input))
        .map(|o| &o.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::{OptionLink, QuestionId, QuizOption};

    fn tempo() -> Question {
        Question {
            id: QuestionId(4),
            prompt: "What tempo do you prefer?".into(),
            options: vec![
                QuizOption {
                    id: "slow".into(),
                    text: "Slow".into(),
                    emoji: Some("🐢".into()),
                    link: None,
                },
                QuizOption {
                    id: "fast".into(),
                    text: "Fast".into(),
                    emoji: None,
                    link: Some(OptionLink {
                        url: "https://example.com/fast".into(),
                        label: "listen".into(),
                    }),
                },
            ],
        }
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(
            render_progress(&Progress::new(2, 5)),
            "[############--------] 60% · question 3/5"
        );
        assert_eq!(
            render_progress(&Progress::new(4, 5)),
            "[####################] 100% · question 5/5"
        );
    }

    #[test]
    fn question_lists_numbered_options() {
        let text = render_question(&tempo(), None);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "What tempo do you prefer?");
        assert_eq!(lines[1], "  ( ) 1. 🐢 Slow");
        assert_eq!(lines[2], "  ( ) 2. Fast [listen](https://example.com/fast)");
    }

    #[test]
    fn selected_option_is_marked() {
        let text = render_question(&tempo(), Some(&"fast".into()));
        assert!(text.contains("(•) 2. Fast"));
        assert!(text.contains("( ) 1. 🐢 Slow"));
    }

    #[test]
    fn result_shows_style_and_description() {
        let text = render_result(&Recommendation::new("Classical", "🎻", "Elegant."));
        assert!(text.starts_with("🎻 "));
        assert!(text.contains("Classical"));
        assert!(text.ends_with("Elegant."));
    }

    #[test]
    fn parse_choice_accepts_numbers_and_ids() {
        let q = tempo();
        assert_eq!(parse_choice("1", &q), Some(&OptionId::new("slow")));
        assert_eq!(parse_choice(" 2 ", &q), Some(&OptionId::new("fast")));
        assert_eq!(parse_choice("FAST", &q), Some(&OptionId::new("fast")));
        assert_eq!(parse_choice("0", &q), None);
        assert_eq!(parse_choice("3", &q), None);
        assert_eq!(parse_choice("medium", &q), None);
    }
}
