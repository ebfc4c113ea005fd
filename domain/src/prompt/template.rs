//! Prompt templates for council deliberation

use crate::council::DeliberationContext;

/// Sampling temperature for member queries.
pub const MEMBER_TEMPERATURE: f32 = 0.7;

/// Response budget for member queries; the JSON answer is short.
pub const MEMBER_MAX_TOKENS: u32 = 500;

/// Templates for member queries
pub struct CouncilPromptTemplate;

impl CouncilPromptTemplate {
    /// System prompt for one member, parameterized by role
    pub fn member_system(role: &str) -> String {
        format!(
            r#"You are a board member of an autonomous business system.

Your role is: {role}

Analyze the following decision and provide your independent assessment.
Consider:
- Risk factors and potential downsides
- Financial implications and ROI
- Legal and compliance concerns
- Strategic alignment with business goals
- Market timing and opportunity cost

You MUST respond with valid JSON in this exact format:
{{
    "vote": "approve" or "reject" or "abstain",
    "confidence": 0.0 to 1.0,
    "reasoning": "Your detailed reasoning (2-3 sentences)"
}}

Do not include any text outside the JSON object."#
        )
    }

    /// User message embedding the question and flattened context
    pub fn member_query(question: &str, context: &DeliberationContext) -> String {
        format!(
            "Decision Question: {}\n\nContext:\n{}\n\nProvide your assessment as JSON.",
            question,
            context.render_lines()
        )
    }

    /// Question put to the council for a spending action
    pub fn decision_question(action: &str) -> String {
        format!("Should we: {}?", action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_system_embeds_role() {
        let prompt = CouncilPromptTemplate::member_system("Finance Officer");
        assert!(prompt.contains("Your role is: Finance Officer"));
        assert!(prompt.contains("\"vote\": \"approve\" or \"reject\" or \"abstain\""));
        assert!(prompt.ends_with("Do not include any text outside the JSON object."));
    }

    #[test]
    fn test_member_query_format() {
        let context = DeliberationContext::new()
            .with("amount", 300)
            .with("vendor", "Acme");
        let query = CouncilPromptTemplate::member_query("Should we: buy ads?", &context);
        assert_eq!(
            query,
            "Decision Question: Should we: buy ads?\n\nContext:\n- amount: 300\n- vendor: Acme\n\nProvide your assessment as JSON."
        );
    }

    #[test]
    fn test_decision_question() {
        assert_eq!(
            CouncilPromptTemplate::decision_question("buy ads"),
            "Should we: buy ads?"
        );
    }
}
