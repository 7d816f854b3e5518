use crate::types::AgentTool;

/// Built-in roster used when the catalog document cannot be loaded, so the
/// agent list is never empty.
#[must_use]
pub fn fallback_agents() -> Vec<AgentTool> {
    vec![
        AgentTool::new("ChatGPT", "https://chat.openai.com")
            .with_primary_use(["Coding", "Writing", "Research", "Analysis"])
            .with_strengths([
                "Natural Language",
                "Code Generation",
                "Creative Writing",
                "Context Understanding",
            ]),
        AgentTool::new("Claude", "https://claude.ai")
            .with_primary_use(["Writing", "Analysis", "Summarization"])
            .with_strengths([
                "Long Context",
                "Safety",
                "Detailed Responses",
                "Document Processing",
            ]),
        AgentTool::new("Gemini", "https://gemini.google.com")
            .with_primary_use(["Multimodal", "Coding", "Research"])
            .with_strengths([
                "Image Understanding",
                "Real-time Web Search",
                "Code Execution",
                "Multilingual",
            ]),
        AgentTool::new("Midjourney", "https://www.midjourney.com")
            .with_primary_use(["Image Generation", "Art Creation", "Design"])
            .with_strengths([
                "High Quality",
                "Artistic Styles",
                "Prompt Understanding",
                "Community",
            ]),
        AgentTool::new("Perplexity", "https://www.perplexity.ai")
            .with_primary_use(["Research", "Question Answering", "Fact Checking"])
            .with_strengths([
                "Source Citations",
                "Real-time Data",
                "Accuracy",
                "Concise Answers",
            ]),
    ]
}
