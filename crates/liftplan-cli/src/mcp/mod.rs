//! MCP server implementation for Liftplan
//!
//! Exposes session, multi-focus and weekly builds plus request validation as
//! Model Context Protocol tools, so AI assistants can generate workouts.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use liftplan_core::Engine;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

pub use handlers::{
    BuildMultiSession, BuildSession, BuildWeek, InspectPools, McpResult, ValidateInput,
};

/// MCP server for Liftplan
#[derive(Clone)]
pub struct LiftplanMcpServer {
    engine: Arc<Engine>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl LiftplanMcpServer {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(engine),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.engine.clone())
    }

    #[tool(
        name = "build_session",
        description = "Build one workout session. `input` is a partial request: intent {goal, focuses}, experience (beginner/intermediate/advanced), intensity (low/moderate/high), equipment inventory, time {minutes_per_session: 20-120} and preferences. `focus` overrides the focus (chest, back, shoulders, arms, legs, glutes, core, upper_body, lower_body, full_body, cardio, mobility). Pass the same `seed` to reproduce a session and `history` (recent_names, recent_patterns, recent_muscles; most recent first) to vary it. Returns markdown followed by the session JSON."
    )]
    async fn build_session(&self, params: Parameters<BuildSession>) -> McpResult {
        self.handlers().build_session(params)
    }

    #[tool(
        name = "build_multi_session",
        description = "Build one session covering several focus areas, e.g. [\"chest\", \"back\"]. Each focus gets a share of the time budget; picks are interleaved without duplicates. Takes the same `input`, `seed` and `history` as build_session."
    )]
    async fn build_multi_session(&self, params: Parameters<BuildMultiSession>) -> McpResult {
        self.handlers().build_multi_session(params)
    }

    #[tool(
        name = "build_week",
        description = "Build a weekly plan. The input's schedule names days_available, min_rest_days (0-2), optional sessions_per_week, an optional layout of per-session focuses and an optional week_start date (YYYY-MM-DD). Sessions are spaced by the rest days and each session's picks feed the next one's history."
    )]
    async fn build_week(&self, params: Parameters<BuildWeek>) -> McpResult {
        self.handlers().build_week(params)
    }

    #[tool(
        name = "validate_input",
        description = "Check a partial request and list every problem, including recoverable ones such as an empty equipment inventory. Set weekly=true to also check the schedule."
    )]
    async fn validate_input(&self, params: Parameters<ValidateInput>) -> McpResult {
        self.handlers().validate_input(params)
    }

    #[tool(
        name = "inspect_pools",
        description = "List the primary, secondary, accessory and fallback exercise pools a build for `focus` would draw from, given the request's goal, equipment and preferences."
    )]
    async fn inspect_pools(&self, params: Parameters<InspectPools>) -> McpResult {
        self.handlers().inspect_pools(params)
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for LiftplanMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "liftplan".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(r#"Liftplan builds workout sessions and weekly plans from an exercise catalog.

## Requests
Every tool takes `input`, a partial JSON request merged over defaults:
- `intent`: `goal` (strength, hypertrophy, endurance, cardio, mobility, weight_loss, general) and/or `focuses`
- `experience`, `intensity`
- `equipment`: bodyweight, dumbbells/kettlebells (weights in kg), bands, barbell, machines, bench, pullup_bar
- `time.minutes_per_session` (20-120), `schedule`, `preferences` (disliked exercises, low impact)

## Tools
- `build_session`: one focus, e.g. legs or core
- `build_multi_session`: several focuses in one session
- `build_week`: a schedule of sessions over the available days
- `validate_input`: list problems before building
- `inspect_pools`: see which exercises a focus can draw from

Builds are deterministic: the same input, history and seed give the same result."#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: LiftplanMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Liftplan MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
