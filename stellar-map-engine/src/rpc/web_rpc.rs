use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::session::{SessionError, StellarMapSession};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Value,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<Value>,
    pub error: Option<RpcError>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<Value>,
}

/// Resource managing bidirectional RPC communication between the host page and Bevy.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }
}

/// Plugin establishing the WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, RPC listener not installed");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // Hand the closure to JS for the lifetime of the page.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing an incoming RPC message from the host page.
#[derive(Event)]
pub struct IncomingRpcMessage {
    pub content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut session: ResMut<StellarMapSession>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                if let Some(response) = handle_rpc_request(&request, &mut session) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Unparseable RPC message: {}", parse_error);
                rpc_interface.queue_response(create_error_response(
                    Value::Null,
                    -32700,
                    "Parse error",
                    Some(serde_json::json!({ "detail": parse_error.to_string() })),
                ));
            }
        }
    }
}

/// Run one request against the session. Requests without an id are
/// executed as notifications and produce no response.
pub fn handle_rpc_request(
    request: &RpcRequest,
    session: &mut StellarMapSession,
) -> Option<RpcResponse> {
    let params = &request.params;
    let result = match request.method.as_str() {
        "go_home" => handle_go_home(session),
        "exit_detail" => handle_exit_detail(session),
        "focus_on_node" => handle_focus_on_node(params, session),
        "set_speed_factor" => handle_set_speed_factor(params, session),
        "focus_family" => handle_focus_family(params, session),
        "focus_constellation" => handle_focus_constellation(params, session),
        "focus_anchor" => handle_focus_anchor(session),
        "search_groupings" => handle_search_groupings(params, session),
        "list_nodes" => handle_list_nodes(session),
        "get_overview" => handle_get_overview(session),
        "get_camera_state" => Ok(camera_state_json(session)),
        "load_hierarchy" => handle_load_hierarchy(params, session),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return request.id.clone().map(|id| {
                create_error_response(
                    id,
                    -32601,
                    "Method not found",
                    Some(serde_json::json!({"method": request.method})),
                )
            });
        }
    };

    if let Err(error) = &result {
        debug!("RPC {} failed: {}", request.method, error.message);
    }
    let id = request.id.clone()?;

    Some(match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    })
}

fn parse_params<T: for<'de> Deserialize<'de>>(params: &Value, expected: &str) -> Result<T, RpcError> {
    serde_json::from_value::<T>(params.clone())
        .map_err(|_| RpcError::invalid_params(&format!("Expected {expected}")))
}

fn camera_state_json(session: &StellarMapSession) -> Value {
    serde_json::json!({
        "state": session.camera_state(),
        "selected_node": session.selection().selected_node(),
        "focus": session.selection().focus(),
        "speed_factor": session.speed().factor(),
        "speed_overridden": session.speed().is_overridden(),
    })
}

fn handle_go_home(session: &mut StellarMapSession) -> Result<Value, RpcError> {
    session.go_home()?;
    Ok(camera_state_json(session))
}

fn handle_exit_detail(session: &mut StellarMapSession) -> Result<Value, RpcError> {
    session.exit_detail()?;
    Ok(camera_state_json(session))
}

fn handle_focus_on_node(params: &Value, session: &mut StellarMapSession) -> Result<Value, RpcError> {
    #[derive(Deserialize)]
    struct FocusNodeParams {
        node_id: String,
    }

    let parsed: FocusNodeParams = parse_params(params, "'node_id' parameter")?;
    session.focus_on_node(&parsed.node_id)?;
    Ok(camera_state_json(session))
}

fn handle_set_speed_factor(
    params: &Value,
    session: &mut StellarMapSession,
) -> Result<Value, RpcError> {
    #[derive(Deserialize)]
    struct SpeedParams {
        value: f32,
    }

    let parsed: SpeedParams = parse_params(params, "numeric 'value' parameter")?;
    session.set_speed_factor(parsed.value)?;
    Ok(serde_json::json!({
        "success": true,
        "speed_factor": session.speed().factor()
    }))
}

fn handle_focus_family(params: &Value, session: &mut StellarMapSession) -> Result<Value, RpcError> {
    #[derive(Deserialize)]
    struct FamilyParams {
        family: String,
    }

    let parsed: FamilyParams = parse_params(params, "'family' parameter")?;
    session.focus_family(&parsed.family)?;
    Ok(camera_state_json(session))
}

fn handle_focus_constellation(
    params: &Value,
    session: &mut StellarMapSession,
) -> Result<Value, RpcError> {
    #[derive(Deserialize)]
    struct ConstellationParams {
        family: String,
        constellation: String,
    }

    let parsed: ConstellationParams =
        parse_params(params, "'family' and 'constellation' parameters")?;
    session.focus_constellation(&parsed.family, &parsed.constellation)?;
    Ok(camera_state_json(session))
}

fn handle_focus_anchor(session: &mut StellarMapSession) -> Result<Value, RpcError> {
    session.focus_anchor()?;
    Ok(camera_state_json(session))
}

fn handle_search_groupings(params: &Value, session: &StellarMapSession) -> Result<Value, RpcError> {
    #[derive(Deserialize)]
    struct SearchParams {
        query: String,
    }

    let parsed: SearchParams = parse_params(params, "'query' parameter")?;
    Ok(serde_json::json!({
        "matches": session.search_groupings(&parsed.query)
    }))
}

fn handle_list_nodes(session: &StellarMapSession) -> Result<Value, RpcError> {
    Ok(serde_json::json!({
        "nodes": session.list_nodes()
    }))
}

fn handle_get_overview(session: &StellarMapSession) -> Result<Value, RpcError> {
    serde_json::to_value(session.overview())
        .map_err(|e| RpcError::internal_error(&format!("Failed to serialise overview: {e}")))
}

fn handle_load_hierarchy(
    params: &Value,
    session: &mut StellarMapSession,
) -> Result<Value, RpcError> {
    let snapshot = params
        .get("hierarchy")
        .ok_or_else(|| RpcError::invalid_params("Expected 'hierarchy' mapping"))?;

    let warnings = session
        .load_snapshot(snapshot)
        .map_err(|e| RpcError::invalid_params(&e.to_string()))?;

    Ok(serde_json::json!({
        "success": true,
        "families": session.hierarchy().families().len(),
        "nodes": session.hierarchy().node_count(),
        "warnings": warnings.iter().map(ToString::to_string).collect::<Vec<_>>(),
    }))
}

/// Create standardized error response with optional data payload.
fn create_error_response(id: Value, code: i32, message: &str, data: Option<Value>) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }

    /// Well-formed request the camera state does not allow right now.
    pub fn rejected(message: &str, state: Value) -> Self {
        Self {
            code: -32000,
            message: message.to_string(),
            data: Some(serde_json::json!({ "camera_state": state })),
        }
    }
}

impl From<SessionError> for RpcError {
    fn from(error: SessionError) -> Self {
        match &error {
            SessionError::UnknownNode(_)
            | SessionError::UnknownFamily(_)
            | SessionError::UnknownConstellation { .. }
            | SessionError::Speed(_) => RpcError::invalid_params(&error.to_string()),
            SessionError::InputLocked(state) => {
                RpcError::rejected(&error.to_string(), serde_json::json!(state))
            }
            SessionError::Transition(transition) => {
                RpcError::rejected(&error.to_string(), serde_json::json!(transition.from))
            }
            SessionError::SpeedOverridden => RpcError::rejected(&error.to_string(), Value::Null),
        }
    }
}
