use rally_smoke::error::HarnessError;
use rally_smoke::harness::{invoke_tool, ServerSettings};
use rally_smoke::protocol::content_ok;
use serde_json::Map;
use std::fs;
use tempfile::TempDir;

/// Write a shell script standing in for the server and build settings
/// pointing at it.
fn fake_server(dir: &TempDir, script: &str) -> ServerSettings {
    let path = dir.path().join("server.sh");
    fs::write(&path, script).unwrap();

    ServerSettings {
        command: "sh".to_string(),
        args: vec![path.to_str().unwrap().to_string()],
        timeout_secs: 10,
        verbose: false,
    }
}

#[tokio::test]
async fn test_invoke_tool_success_with_content() {
    let dir = TempDir::new().unwrap();
    let settings = fake_server(
        &dir,
        "cat > /dev/null\nprintf '{\"content\": [{\"id\": 1}]}'\n",
    );

    let response = invoke_tool("getProjects", Map::new(), &settings)
        .await
        .unwrap();
    assert_eq!(response["content"][0]["id"], 1);
    assert!(content_ok(&response));
}

#[tokio::test]
async fn test_invoke_tool_missing_content_is_soft() {
    let dir = TempDir::new().unwrap();
    let settings = fake_server(&dir, "cat > /dev/null\nprintf '{\"result\": \"empty\"}'\n");

    // Parseable JSON without content still resolves; only the
    // annotation degrades.
    let response = invoke_tool("getTypeDefinition", Map::new(), &settings)
        .await
        .unwrap();
    assert!(!content_ok(&response));
}

#[tokio::test]
async fn test_invoke_tool_rejects_non_json_output() {
    let dir = TempDir::new().unwrap();
    let settings = fake_server(&dir, "cat > /dev/null\necho 'starting server...'\n");

    let err = invoke_tool("getProjects", Map::new(), &settings)
        .await
        .unwrap_err();
    match err {
        HarnessError::ResponseParse { output, .. } => {
            assert!(output.contains("starting server"));
        }
        other => panic!("expected ResponseParse, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invoke_tool_rejects_nonzero_exit() {
    let dir = TempDir::new().unwrap();
    let settings = fake_server(&dir, "cat > /dev/null\necho 'auth failed' >&2\nexit 1\n");

    let err = invoke_tool("getIterations", Map::new(), &settings)
        .await
        .unwrap_err();
    match err {
        HarnessError::ServerExit { code, stderr } => {
            assert_eq!(code, 1);
            assert!(stderr.contains("auth failed"));
        }
        other => panic!("expected ServerExit, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invoke_tool_server_dies_before_reading_stdin() {
    let dir = TempDir::new().unwrap();
    let settings = fake_server(&dir, "exit 7\n");

    // The exit status wins over any broken-pipe write failure
    let err = invoke_tool("getProjects", Map::new(), &settings)
        .await
        .unwrap_err();
    match err {
        HarnessError::ServerExit { code, .. } => assert_eq!(code, 7),
        other => panic!("expected ServerExit, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invoke_tool_server_receives_one_request_line() {
    let dir = TempDir::new().unwrap();
    // Echo stdin back: the response is the request itself
    let settings = fake_server(&dir, "cat\n");

    let response = invoke_tool("getTypeDefinition", Map::new(), &settings)
        .await
        .unwrap();
    assert_eq!(response["type"], "toolCall");
    assert_eq!(response["name"], "getTypeDefinition");
    assert!(response["parameters"].as_object().unwrap().is_empty());
    assert!(response["id"].as_str().unwrap().starts_with("test-"));
}

#[tokio::test]
async fn test_invoke_tool_times_out_on_hung_server() {
    let dir = TempDir::new().unwrap();
    let mut settings = fake_server(&dir, "sleep 30\n");
    settings.timeout_secs = 1;

    let err = invoke_tool("getProjects", Map::new(), &settings)
        .await
        .unwrap_err();
    match err {
        HarnessError::Timeout { secs } => assert_eq!(secs, 1),
        other => panic!("expected Timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invoke_tool_spawn_failure() {
    let settings = ServerSettings {
        command: "/nonexistent/rally-mcp-server".to_string(),
        args: vec![],
        timeout_secs: 10,
        verbose: false,
    };

    let err = invoke_tool("getProjects", Map::new(), &settings)
        .await
        .unwrap_err();
    assert!(matches!(err, HarnessError::IoError(_)));
}
