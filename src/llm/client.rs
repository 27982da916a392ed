use anyhow::Result;
use async_trait::async_trait;

/// Opaque text-generation capability: a system persona plus user text in,
/// raw model text out. Parsing the reply is the caller's job.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String>;
}

/// Canned replies for `--dry-run` and tests. Picks the reply from the opening
/// line of the user prompt, which custom personas never replace.
pub struct MockLlmClient;

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self
    }
}

pub const MOCK_PROCESS_DESCRIPTION: &str = r#"{
  "processDescription": "Sophie Inc. turns a course title into a finished, text-based course for its enterprise library, using subject matter experts, instructional designers, writers and editors.",
  "keyObjectives": [
    "Produce a complete four-hour text course from a title",
    "Keep structure consistent across the library",
    "Ship content that large companies will pay for"
  ],
  "participantsAndRoles": [
    "Managing editor: approves course briefs and final drafts",
    "Subject matter expert: supplies domain knowledge",
    "Instructional designer: builds the table of contents",
    "Content writer: drafts sections",
    "QA specialist: checks accuracy and style"
  ],
  "decisionPoints": [
    "Approve the course brief",
    "Accept or revise the table of contents",
    "Pass or fail QA review"
  ],
  "challengesOrIssues": [
    "Keeping quality consistent across many courses",
    "Keeping technical topics current"
  ],
  "desiredOutcomes": [
    "A published course that meets the house structure",
    "A repeatable workflow for the next title"
  ]
}"#;

// Wrapped in a fence with a preamble, like real model replies often are.
pub const MOCK_PROMPTFLOW_REPLY: &str = r#"Here is the PromptFlow for the course workflow:

```json
{
  "workflowName": "Course Production",
  "initialState": "Planning",
  "statesDescription": [
    { "state": "Planning", "description": "Managing editor drafts the course brief" },
    { "state": "Outline", "description": "Instructional designer builds the table of contents" },
    { "state": "Drafting", "description": "Writers and SME draft every section" },
    { "state": "QA", "description": "QA specialist reviews the draft" },
    { "state": "Published", "description": "Course is added to the library" }
  ],
  "transitions": [
    { "currentState": "Planning", "event": "brief approved", "nextState": "Outline" },
    { "currentState": "Outline", "event": "TOC accepted", "nextState": "Drafting" },
    { "currentState": "Drafting", "event": "draft complete", "nextState": "QA" },
    { "currentState": "QA", "event": "changes requested", "nextState": "Drafting" },
    { "currentState": "QA", "event": "approved", "nextState": "Published" }
  ],
  "finalState": "Published"
}
```"#;

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _system: &str, prompt: &str) -> Result<String> {
        let opening = prompt.lines().next().unwrap_or_default();
        if opening.contains("generate a processDescription object") {
            Ok(MOCK_PROCESS_DESCRIPTION.to_string())
        } else if opening.contains("generate a PromptFlow object") {
            Ok(MOCK_PROMPTFLOW_REPLY.to_string())
        } else {
            Ok(r#"{"status": "mock"}"#.to_string())
        }
    }
}
