use super::corpus::ConversationCorpus;

pub const APOLOGY: &str =
    "Sorry, I'm having trouble connecting right now. Please check the API key and try again.";

pub const MISSING_CREDENTIAL: &str =
    "The assistant is not configured: no API key is available for the generation service.";

/// Persona and fixed texts for one assistant bound to one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRules {
    assistant_name: String,
    member_name: String,
}

impl PromptRules {
    pub fn new(assistant_name: impl Into<String>, member_name: impl Into<String>) -> Self {
        Self {
            assistant_name: assistant_name.into(),
            member_name: member_name.into(),
        }
    }

    pub fn assistant_name(&self) -> &str {
        &self.assistant_name
    }

    pub fn greeting(&self) -> String {
        format!(
            "Hi! I'm {}, your AI health assistant. Ask me anything about {}'s journey.",
            self.assistant_name, self.member_name
        )
    }

    /// The exact sentence returned when the history holds no answer.
    pub fn refusal(&self) -> String {
        format!(
            "I'm sorry, I couldn't find information on that in {}'s conversation history.",
            self.member_name
        )
    }

    pub fn build(&self, question: &str, corpus: &ConversationCorpus) -> String {
        let name = &self.assistant_name;
        let member = &self.member_name;
        let refusal = self.refusal();
        let context = corpus.flatten();

        format!(
            r#"### Persona
You are {name}, an empathetic AI health assistant. You help a clinical team understand {member}'s health journey. Be factual, concise and supportive.

### Rules
1. Answer ONLY from the conversation history below. Do not use outside knowledge and do not infer beyond it.
2. End every answer by citing the week(s) you used, exactly like this: (Source: Week 8, Week 9).
3. If the history does not contain the answer, reply with exactly this sentence and nothing else:
{refusal}

### Conversation history: {member}'s journey
{context}

### Question
{question}"#
        )
    }
}
