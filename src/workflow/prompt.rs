const PROMPT_HEADER: &str = "Analyze these changes and generate a detailed git commit message:";

const PROMPT_RULES: &str = "Requirements for the commit message:
1. Start with a clear, concise title line (50-72 chars) that summarizes WHAT changed
2. Leave one blank line after the title
3. Follow with 2-4 paragraphs explaining:
   - WHY these changes were needed
   - HOW the changes address the need
   - Any important technical details or trade-offs
4. Use present tense and imperative mood
5. If relevant, include at end of body:
   - Breaking changes
   - Related issues
   - Migration notes
   - Credit to contributors

Example format:
Title summarizing the change

Explain why this change was needed and what problem it solves.
Provide context about the approach taken and any important
implementation details that future maintainers should know.

Include any breaking changes, migration notes, or related
issues at the end as trailers.

Generate a commit message following ALL the above rules.";

/// Embed the diff digest verbatim into the fixed instruction template.
pub fn build_prompt(digest: &str) -> String {
    format!("{PROMPT_HEADER}\n{digest}\n\n{PROMPT_RULES}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_digest_verbatim() {
        let prompt = build_prompt("File: lib.rs (1 added, 0 removed)\nChanges:\n+x");
        assert!(prompt.contains("File: lib.rs (1 added, 0 removed)\nChanges:\n+x"));
    }

    #[test]
    fn carries_the_formatting_rules() {
        let prompt = build_prompt("digest");
        assert!(prompt.starts_with("Analyze these changes"));
        assert!(prompt.contains("title line (50-72 chars)"));
        assert!(prompt.contains("present tense and imperative mood"));
        assert!(prompt.contains("Generate a commit message following ALL the above rules."));
    }
}
