//! HTTP providers against a local mock server
use promptflow::llm::client_impl::{AnthropicClient, OpenAIClient};
use promptflow::llm::LlmClient;

#[tokio::test]
async fn test_anthropic_sends_system_and_reads_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .match_header("x-api-key", "test-key")
        .match_body(mockito::Matcher::PartialJsonString(
            r#"{"system": "persona", "messages": [{"role": "user", "content": "hello"}]}"#
                .to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"content": [{"type": "text", "text": "{\"ok\": true}"}]}"#)
        .create_async()
        .await;

    let client = AnthropicClient::with_base_url(
        "test-key".to_string(),
        "claude-test".to_string(),
        format!("{}/v1", server.url()),
        1024,
        10,
    )
    .unwrap();

    let reply = client.complete("persona", "hello").await.unwrap();
    assert_eq!(reply, "{\"ok\": true}");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_anthropic_error_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/messages")
        .with_status(529)
        .with_body("overloaded")
        .create_async()
        .await;

    let client = AnthropicClient::with_base_url(
        "k".to_string(),
        "claude-test".to_string(),
        format!("{}/v1", server.url()),
        1024,
        10,
    )
    .unwrap();

    let err = client.complete("s", "p").await.unwrap_err();
    assert!(err.to_string().contains("Anthropic API error"));
    assert!(err.to_string().contains("overloaded"));
}

#[tokio::test]
async fn test_openai_compatible_without_key_skips_auth() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", mockito::Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": "done"}}]}"#)
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url(
        String::new(),
        "llama3".to_string(),
        format!("{}/v1", server.url()),
        512,
        10,
    )
    .unwrap();

    assert_eq!(client.complete("s", "p").await.unwrap(), "done");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_openai_bearer_auth_and_empty_choices() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices": []}"#)
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url(
        "sk-test".to_string(),
        "gpt-4o".to_string(),
        format!("{}/v1", server.url()),
        512,
        10,
    )
    .unwrap();

    let err = client.complete("s", "p").await.unwrap_err();
    assert!(err.to_string().contains("No choices"));
    mock.assert_async().await;
}
