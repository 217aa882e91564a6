/// A commit message split into its title and body.
///
/// `body` is empty when the model response carried no blank-line separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    pub title: String,
    pub body: String,
}

impl CommitMessage {
    /// Normalize a raw model response: trim it, then split on the first
    /// blank line into title and body.
    pub fn from_response(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.split_once("\n\n") {
            Some((title, body)) => Self {
                title: title.trim().to_string(),
                body: body.trim().to_string(),
            },
            None => Self {
                title: trimmed.to_string(),
                body: String::new(),
            },
        }
    }

    /// Canonical rendering: `title`, or `title + blank line + body`.
    pub fn render(&self) -> String {
        if self.body.is_empty() {
            self.title.clone()
        } else {
            format!("{}\n\n{}", self.title, self.body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_title_and_body_on_first_blank_line() {
        let message =
            CommitMessage::from_response("Title line\n\nBody para one.\n\nBody para two.");
        assert_eq!(message.title, "Title line");
        assert_eq!(message.body, "Body para one.\n\nBody para two.");
        assert_eq!(
            message.render(),
            "Title line\n\nBody para one.\n\nBody para two."
        );
    }

    #[test]
    fn single_line_response_becomes_title_only() {
        let message = CommitMessage::from_response("Add staged diff summarizer");
        assert_eq!(message.title, "Add staged diff summarizer");
        assert!(message.body.is_empty());
        assert_eq!(message.render(), "Add staged diff summarizer");
    }

    #[test]
    fn trims_surrounding_whitespace_from_both_parts() {
        let message = CommitMessage::from_response("  Title  \n\n  Body text.  \n");
        assert_eq!(message.title, "Title");
        assert_eq!(message.body, "Body text.");
    }

    #[test]
    fn title_is_nonempty_for_nonwhitespace_input() {
        let message = CommitMessage::from_response("\n  fix typo  \n");
        assert_eq!(message.title, "fix typo");
    }
}
