use ingres::models::ResultEnvelope;
use ingres::{IngresClient, IngresConfig, IngresError, Tool, find_tool, tools};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use std::env;
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};

const METHODS: &[&str] = &[
    "initialize",
    "initialized",
    "shutdown",
    "tools/list",
    "tools/call",
];

pub struct IngresMcpServer {
    ingres: IngresClient,
}

impl IngresMcpServer {
    pub async fn bootstrap() -> Result<(), ServerError> {
        let server = Self::new()?;
        let reader = BufReader::new(io::stdin());
        let mut writer = BufWriter::new(io::stdout());
        server.run(reader, &mut writer).await
    }

    fn new() -> Result<Self, ServerError> {
        let mut config = IngresConfig::new();
        if let Ok(url) = env::var("WRIS_BASE_URL") {
            config = config.with_base_url(url);
        }
        if let Ok(ua) = env::var("WRIS_USER_AGENT") {
            config = config.with_user_agent(ua);
        }
        if let Some(size) = env_number::<u32>("WRIS_PAGE_SIZE")? {
            config = config.with_page_size(size);
        }
        if let Some(secs) = env_number::<u64>("WRIS_TIMEOUT_SECS")? {
            config = config.with_timeout(secs);
        }

        tracing::info!(base_url = %config.base_url, page_size = config.page_size, "configured WRIS client");
        Ok(Self::with_client(IngresClient::with_config(config)?))
    }

    fn with_client(ingres: IngresClient) -> Self {
        Self { ingres }
    }

    async fn run<R, W>(&self, reader: R, writer: &mut W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        self.send_ready(writer).await?;

        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let request = match serde_json::from_str::<Request>(trimmed) {
                Ok(request) => request,
                Err(err) => {
                    tracing::warn!("invalid request: {err}");
                    let error = if err.is_data() {
                        ServerError::InvalidRequest(err.to_string())
                    } else {
                        ServerError::Json(err)
                    };
                    let response = Response::error(None, error);
                    self.write_response(writer, &response).await?;
                    continue;
                }
            };

            let shutdown = request.method == "shutdown";
            let response = self.handle_request(request).await;
            self.write_response(writer, &response).await?;
            if shutdown {
                break;
            }
        }

        Ok(())
    }

    async fn send_ready<W: AsyncWrite + Unpin>(&self, writer: &mut W) -> Result<(), ServerError> {
        let ready = json!({
            "jsonrpc": "2.0",
            "id": null,
            "result": {
                "server": "ingres-mcp-server",
                "version": env!("CARGO_PKG_VERSION"),
                "methods": METHODS,
            }
        });

        let payload = serde_json::to_string(&ready).map_err(ServerError::Serialization)?;
        writer.write_all(payload.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        tracing::info!(tools = tools().len(), "ingres MCP server ready");
        Ok(())
    }

    async fn write_response<W: AsyncWrite + Unpin>(
        &self,
        writer: &mut W,
        response: &Response,
    ) -> Result<(), ServerError> {
        let payload = serde_json::to_string(response).map_err(ServerError::Serialization)?;
        writer.write_all(payload.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        Ok(())
    }

    async fn handle_request(&self, request: Request) -> Response {
        match self.dispatch(&request.method, request.params).await {
            Ok(result) => Response::success(request.id, result),
            Err(err) => {
                tracing::debug!(method = %request.method, error = %err, "request failed");
                Response::error(request.id, err)
            }
        }
    }

    async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value, ServerError> {
        if method == "tools/call" {
            let params: CallToolParams = parse_required_params(method, params)?;
            let tool = find_tool(&params.name)
                .ok_or_else(|| ServerError::InvalidMethod(params.name.clone()))?;
            return self.call_tool(&tool, params.arguments).await;
        }

        // Tools may also be invoked directly by name.
        if let Some(tool) = find_tool(method) {
            return self.call_tool(&tool, params).await;
        }

        match method {
            "initialize" => {
                let params: InitializeParams = parse_optional_params(method, params)?;
                let result = InitializeResult::new(params.client_info);
                Ok(serde_json::to_value(result).map_err(ServerError::Serialization)?)
            }
            "initialized" => Ok(Value::Null),
            "shutdown" => Ok(Value::Null),
            "tools/list" => {
                // Pagination is not needed for a fixed tool set; the cursor is only validated.
                let _: ListToolsParams = parse_optional_params(method, params)?;
                let result = ListToolsResult {
                    tools: tool_descriptors(),
                    next_cursor: None,
                };
                Ok(serde_json::to_value(result).map_err(ServerError::Serialization)?)
            }
            other => Err(ServerError::InvalidMethod(other.to_string())),
        }
    }

    async fn call_tool(&self, tool: &Tool, arguments: Option<Value>) -> Result<Value, ServerError> {
        tracing::info!(tool = %tool.name, "tool call");
        let envelope = self
            .ingres
            .call_tool(&tool.name, arguments.unwrap_or(Value::Null))
            .await?;
        let response = ToolResponse::from_envelope(&envelope)?;
        serde_json::to_value(response).map_err(ServerError::Serialization)
    }
}

fn env_number<T: FromStr>(name: &str) -> Result<Option<T>, ServerError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ServerError::Config(format!("{name} must be a number, got `{raw}`"))),
        Err(_) => Ok(None),
    }
}

#[derive(Debug, Deserialize)]
struct Request {
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Option<Value>,
}

#[derive(Debug, Serialize)]
struct Response {
    jsonrpc: &'static str,
    id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ResponseError>,
}

impl Response {
    fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Option<Value>, error: ServerError) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(ResponseError::from(error)),
        }
    }
}

#[derive(Debug, Serialize)]
struct ResponseError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl From<ServerError> for ResponseError {
    fn from(err: ServerError) -> Self {
        let code = match &err {
            ServerError::InvalidRequest(_) => -32600,
            ServerError::InvalidMethod(_) => -32601,
            ServerError::InvalidParams(_) => -32602,
            ServerError::Json(_) => -32700,
            ServerError::Io(_) => -32020,
            ServerError::Config(_) => -32002,
            ServerError::Ingres(_) => -32010,
            ServerError::Serialization(_) => -32603,
        };
        let message = match err {
            ServerError::InvalidRequest(message) | ServerError::InvalidParams(message) => message,
            ServerError::InvalidMethod(method) => format!("Unknown method: {method}"),
            other => other.to_string(),
        };
        Self {
            code,
            message,
            data: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("unknown method: {0}")]
    InvalidMethod(String),
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Ingres(IngresError),
    #[error("serialization error: {0}")]
    Serialization(serde_json::Error),
}

impl From<IngresError> for ServerError {
    fn from(err: IngresError) -> Self {
        match err {
            IngresError::UnknownTool { name } => ServerError::InvalidMethod(name),
            IngresError::ValidationError { message } => ServerError::InvalidParams(message),
            other => ServerError::Ingres(other),
        }
    }
}

type ServerResult<T> = Result<T, ServerError>;

fn parse_required_params<T>(method: &str, params: Option<Value>) -> ServerResult<T>
where
    T: DeserializeOwned,
{
    match params {
        Some(value) => serde_json::from_value(value)
            .map_err(|err| ServerError::InvalidParams(format!("{method}: {err}"))),
        None => Err(ServerError::InvalidParams(format!(
            "{method}: missing parameters"
        ))),
    }
}

fn parse_optional_params<T>(method: &str, params: Option<Value>) -> ServerResult<T>
where
    T: DeserializeOwned + Default,
{
    match params {
        Some(value) => serde_json::from_value(value)
            .map_err(|err| ServerError::InvalidParams(format!("{method}: {err}"))),
        None => Ok(T::default()),
    }
}

#[derive(Debug, Default, Deserialize)]
struct InitializeParams {
    #[serde(default, rename = "clientInfo")]
    client_info: Option<ClientInfo>,
}

#[derive(Debug, Deserialize)]
struct ClientInfo {
    name: String,
    #[serde(default)]
    version: Option<String>,
}

#[derive(Debug, Serialize)]
struct InitializeResult {
    #[serde(rename = "serverInfo")]
    server_info: ServerInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    capabilities: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "clientInfo")]
    client_info: Option<ClientInfoSummary>,
}

impl InitializeResult {
    fn new(client_info: Option<ClientInfo>) -> Self {
        let client_info = client_info.map(|info| ClientInfoSummary {
            name: info.name,
            version: info.version,
        });

        Self {
            server_info: ServerInfo {
                name: "ingres-mcp-server",
                version: env!("CARGO_PKG_VERSION"),
            },
            capabilities: Some(json!({
                "tools": {
                    "list": true
                }
            })),
            client_info,
        }
    }
}

#[derive(Debug, Serialize)]
struct ServerInfo {
    name: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct ClientInfoSummary {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ListToolsParams {
    #[serde(default)]
    #[allow(dead_code)]
    cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

#[derive(Debug, Serialize)]
struct ListToolsResult {
    tools: Vec<ToolDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "nextCursor")]
    next_cursor: Option<String>,
}

#[derive(Debug, Serialize)]
struct ToolDescriptor {
    name: String,
    description: String,
    #[serde(rename = "inputSchema")]
    input_schema: Value,
}

#[derive(Debug, Serialize)]
struct ToolResponse {
    content: Vec<ToolContent>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "isError")]
    is_error: Option<bool>,
}

impl ToolResponse {
    /// Error envelopes are ordinary tool results flagged with `isError`.
    fn from_envelope(envelope: &ResultEnvelope) -> ServerResult<Self> {
        let value = serde_json::to_value(envelope).map_err(ServerError::Serialization)?;
        let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
        Ok(Self {
            content: vec![
                ToolContent::Text { text },
                ToolContent::Json { json: value },
            ],
            is_error: (!envelope.is_success()).then_some(true),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum ToolContent {
    #[serde(rename = "json")]
    Json { json: Value },
    #[serde(rename = "text")]
    Text { text: String },
}

fn tool_descriptors() -> Vec<ToolDescriptor> {
    tools()
        .into_iter()
        .map(|tool| ToolDescriptor {
            description: tool.description(),
            input_schema: tool.input_schema(),
            name: tool.name,
        })
        .collect()
}
