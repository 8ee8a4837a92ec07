//! stdio transport for MCP JSON-RPC
//!
//! One JSON-RPC message per line. Only protocol traffic goes to stdout.

use crate::backend::EditorBackend;
use crate::mcp::{
    InitializeParams, InitializeResult, ListChangedCapability, PROTOCOL_VERSION, PromptGetParams,
    Request, RequestId, Response, ServerCapabilities, ServerInfo, ToolCallParams,
};
use crate::prompts::{get_prompt, list_prompts};
use crate::tools::{handle_tool_call, list_tools};
use crate::{SERVER_DESCRIPTION, SERVER_NAME, UnityMcpServer};
use serde::Deserialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};
use unity_mcp_core::{Result, UnityMcpError, error_codes};

/// Run the MCP server on stdio, shutting the backend down on EOF
pub async fn run<B: EditorBackend>(server: UnityMcpServer<B>) -> Result<()> {
    info!("Unity MCP server starting on stdio");

    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();
    let served = serve(&server, reader, writer).await;

    // Shutdown backend
    {
        let mut backend = server.backend().lock().await;
        if let Err(e) = backend.shutdown().await {
            warn!("Backend shutdown failed: {}", e);
        }
    }
    info!("Unity MCP server shut down");

    served
}

/// Serve requests from `reader` until EOF, writing responses to `writer`
pub async fn serve<B, R, W>(server: &UnityMcpServer<B>, mut reader: R, mut writer: W) -> Result<()>
where
    B: EditorBackend,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .map_err(|e| UnityMcpError::ProtocolError(format!("Failed to read stdin: {}", e)))?;

        if bytes_read == 0 {
            // EOF - client disconnected
            info!("Client disconnected (EOF)");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        debug!("Received: {}", trimmed);

        let message: Value = match serde_json::from_str(trimmed) {
            Ok(message) => message,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                let response =
                    Response::error(None, error_codes::PARSE_ERROR, format!("Parse error: {}", e));
                write_response(&mut writer, &response).await?;
                continue;
            }
        };

        let response = match Request::deserialize(&message) {
            Ok(request) if request.is_notification() => {
                debug!("Notification: {}", request.method);
                continue;
            }
            Ok(request) => handle_request(&request, server).await,
            Err(e) => {
                error!("Invalid request: {}", e);
                let id = message
                    .get("id")
                    .and_then(|id| RequestId::deserialize(id).ok());
                Response::error(
                    id,
                    error_codes::INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                )
            }
        };

        write_response(&mut writer, &response).await?;
    }

    Ok(())
}

async fn write_response<W: AsyncWrite + Unpin>(writer: &mut W, response: &Response) -> Result<()> {
    let response_json = serde_json::to_string(response)?;
    debug!("Sending: {}", response_json);

    writer
        .write_all(response_json.as_bytes())
        .await
        .map_err(|e| UnityMcpError::ProtocolError(format!("Failed to write stdout: {}", e)))?;
    writer
        .write_all(b"\n")
        .await
        .map_err(|e| UnityMcpError::ProtocolError(format!("Failed to write newline: {}", e)))?;
    writer
        .flush()
        .await
        .map_err(|e| UnityMcpError::ProtocolError(format!("Failed to flush stdout: {}", e)))?;
    Ok(())
}

/// Dispatch one request to its handler
pub async fn handle_request<B: EditorBackend>(
    request: &Request,
    server: &UnityMcpServer<B>,
) -> Response {
    match request.method.as_str() {
        "initialize" => handle_initialize(request, server),
        "ping" => Response::success(request.id.clone(), serde_json::json!({})),
        "tools/list" => handle_tools_list(request),
        "tools/call" => handle_tools_call(request, server).await,
        "prompts/list" => Response::success(
            request.id.clone(),
            serde_json::json!({ "prompts": list_prompts() }),
        ),
        "prompts/get" => handle_prompts_get(request),
        _ => Response::error(
            request.id.clone(),
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        ),
    }
}

fn handle_initialize<B: EditorBackend>(request: &Request, server: &UnityMcpServer<B>) -> Response {
    let params: InitializeParams = match serde_json::from_value(request.params.clone()) {
        Ok(p) => p,
        Err(e) => {
            return Response::error(
                request.id.clone(),
                error_codes::INVALID_PARAMS,
                format!("Invalid initialize params: {}", e),
            );
        }
    };
    info!(
        "Client {} {} connected (protocol {})",
        params.client_info.name, params.client_info.version, params.protocol_version
    );

    let result = InitializeResult {
        protocol_version: PROTOCOL_VERSION.to_string(),
        capabilities: ServerCapabilities {
            tools: ListChangedCapability {
                list_changed: false,
            },
            prompts: ListChangedCapability {
                list_changed: false,
            },
        },
        server_info: ServerInfo {
            name: SERVER_NAME.to_string(),
            version: server.version().to_string(),
        },
        instructions: Some(SERVER_DESCRIPTION.to_string()),
    };

    match serde_json::to_value(result) {
        Ok(value) => Response::success(request.id.clone(), value),
        Err(e) => Response::error(
            request.id.clone(),
            error_codes::INTERNAL_ERROR,
            e.to_string(),
        ),
    }
}

fn handle_tools_list(request: &Request) -> Response {
    let tools = list_tools();
    Response::success(request.id.clone(), serde_json::json!({ "tools": tools }))
}

async fn handle_tools_call<B: EditorBackend>(
    request: &Request,
    server: &UnityMcpServer<B>,
) -> Response {
    let params: ToolCallParams = match serde_json::from_value(request.params.clone()) {
        Ok(p) => p,
        Err(e) => {
            return Response::error(
                request.id.clone(),
                error_codes::INVALID_PARAMS,
                format!("Invalid tool call params: {}", e),
            );
        }
    };

    handle_tool_call(
        &params.name,
        params.arguments,
        request.id.clone(),
        server.backend(),
    )
    .await
}

fn handle_prompts_get(request: &Request) -> Response {
    let params: PromptGetParams = match serde_json::from_value(request.params.clone()) {
        Ok(p) => p,
        Err(e) => {
            return Response::error(
                request.id.clone(),
                error_codes::INVALID_PARAMS,
                format!("Invalid prompt params: {}", e),
            );
        }
    };

    match get_prompt(&params.name) {
        Ok(prompt) => Response::success(request.id.clone(), prompt),
        Err(e) => Response::error(request.id.clone(), e.code(), e.to_string()),
    }
}
