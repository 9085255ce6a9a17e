//! Read-only authentication resources advertised alongside the tools.

use rmcp::model::{Annotated, RawResource, ReadResourceResult, Resource, ResourceContents};
use rmcp::ErrorData as McpError;
use serde_json::json;

use crate::session::Session;

pub const AUTH_LOGIN_URI: &str = "auth://login";
pub const AUTH_STATUS_URI: &str = "auth://status";

/// All advertised resources
pub fn list() -> Vec<Resource> {
    vec![
        Annotated {
            raw: RawResource {
                uri: AUTH_LOGIN_URI.into(),
                name: "auth-login".into(),
                title: None,
                description: Some(
                    "How to authenticate: the arguments expected by the 'authenticate' tool."
                        .into(),
                ),
                mime_type: Some("application/json".into()),
                size: None,
                icons: None,
            },
            annotations: None,
        },
        Annotated {
            raw: RawResource {
                uri: AUTH_STATUS_URI.into(),
                name: "auth-status".into(),
                title: None,
                description: Some("Live authentication status of this server session.".into()),
                mime_type: Some("application/json".into()),
                size: None,
                icons: None,
            },
            annotations: None,
        },
    ]
}

/// Static description of the authenticate tool's arguments
pub fn login_document() -> serde_json::Value {
    json!({
        "description": "Authenticate with email and password to unlock the weather tools",
        "tool": "authenticate",
        "schema": {
            "email": { "type": "string", "format": "email", "description": "Email address of the account" },
            "password": { "type": "string", "minLength": 1, "description": "Account password" }
        }
    })
}

/// Current session status
pub fn status_document(session: &Session) -> serde_json::Value {
    let authenticated = session.is_authenticated();
    let message = match (authenticated, session.current_identity()) {
        (true, Some(identity)) => format!("Authenticated as {}", identity.email),
        (true, None) => "User is authenticated".to_string(),
        (false, _) => {
            "User is not authenticated. Use the 'authenticate' tool to log in.".to_string()
        }
    };
    json!({ "authenticated": authenticated, "message": message })
}

/// Reads a resource by URI
pub fn read(session: &Session, uri: &str) -> Result<ReadResourceResult, McpError> {
    let document = match uri {
        AUTH_LOGIN_URI => login_document(),
        AUTH_STATUS_URI => status_document(session),
        _ => {
            return Err(McpError::resource_not_found(
                format!("Unknown resource: {}", uri),
                None,
            ))
        }
    };

    let body = serde_json::to_string_pretty(&document).map_err(|e| {
        McpError::internal_error(format!("Failed to serialize resource: {}", e), None)
    })?;

    Ok(ReadResourceResult {
        contents: vec![ResourceContents::text(body, uri.to_string())],
    })
}
