use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::engine::navigation::events::{SeekRequestEvent, SeekSource, SeekTarget};
use crate::engine::navigation::scroll_container::{ScrollContainer, ScrollSurface};
use crate::engine::navigation::section_navigator::SectionNavigator;
use crate::engine::particles::trigger_gate::TriggerGate;
use crate::engine::systems::fps_tracking::smoothed_fps;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// Call from the embedding page, e.g. `{"jsonrpc":"2.0","method":"seek_to","params":{"index":2},"id":1}`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// Reply to a request that carried an `id`. Exactly one of `result` and
/// `error` is set.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// Engine-initiated message such as `section_changed` or `fps_update`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    /// -32602: `params` missing or of the wrong shape.
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    /// -32603: the engine cannot serve the call right now, e.g. while the
    /// manifest is still loading.
    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

/// Outbox for the landing page host. Systems queue notifications here and
/// `send_outgoing_messages` flushes them once per frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// postMessage bridge between the engine canvas and the page that embeds it.
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

/// Inbox filled by the browser `message` listener and drained each frame.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Raw JSON text of one message posted by the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

/// Listen for `message` events on the page window. Only string payloads that
/// look like JSON-RPC are kept; everything else the host posts is ignored.
#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::{Arc, Mutex};

    let inbox: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let listener_inbox = inbox.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        let Ok(data) = event.data().dyn_into::<js_sys::JsString>() else {
            return;
        };
        let text: String = data.into();
        if !text.contains("jsonrpc") {
            return;
        }
        if let Ok(mut pending) = listener_inbox.lock() {
            pending.push(text);
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    match window() {
        Some(window) => {
            if let Err(e) =
                window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            {
                error!("Landing page RPC listener not registered: {:?}", e);
            }
        }
        None => error!("No browser window; landing page RPC disabled"),
    }

    // The listener lives as long as the page.
    closure.forget();
    commands.insert_resource(MessageQueue(inbox));
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue) = message_queue else {
        return;
    };

    let drained = match queue.0.lock() {
        Ok(mut pending) => std::mem::take(&mut *pending),
        Err(_) => return,
    };

    for content in drained {
        message_events.write(IncomingRpcMessage { content });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    time: Res<Time>,
    diagnostics: Res<DiagnosticsStore>,
    navigator: Option<Res<SectionNavigator>>,
    container: Option<Res<ScrollContainer>>,
    trigger_gate: Option<Res<TriggerGate>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut seek_events: EventWriter<SeekRequestEvent>,
) {
    let context = RpcContext {
        now: time.elapsed(),
        diagnostics: &diagnostics,
        navigator: navigator.as_deref(),
        container: container.as_deref(),
        trigger_gate: trigger_gate.as_deref(),
    };
    let mut seeks = Vec::new();

    for event in events.read() {
        debug!("Received RPC: {}", event.content);

        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("Discarding malformed RPC message: {}", parse_error);
                continue;
            }
        };

        if let Some(response) = handle_rpc_request(&request, &context, &mut seeks) {
            rpc_interface.queue_response(response);
        }
    }

    for seek in seeks {
        seek_events.write(seek);
    }
}

/// Engine state RPC handlers read from.
struct RpcContext<'a> {
    now: Duration,
    diagnostics: &'a DiagnosticsStore,
    /// Absent until the manifest has been installed.
    navigator: Option<&'a SectionNavigator>,
    container: Option<&'a ScrollContainer>,
    trigger_gate: Option<&'a TriggerGate>,
}

/// Dispatch one request. Accepted seeks are pushed onto `seeks`; the caller
/// forwards them to the navigator. Returns `None` for notifications.
fn handle_rpc_request(
    request: &RpcRequest,
    context: &RpcContext,
    seeks: &mut Vec<SeekRequestEvent>,
) -> Option<RpcResponse> {
    if request.jsonrpc != "2.0" {
        warn!("Rejecting RPC with version '{}'", request.jsonrpc);
        return request
            .id
            .clone()
            .map(|id| create_error_response(id, -32600, "Invalid request", None));
    }

    // Seeks also run when sent as notifications.
    let result = match request.method.as_str() {
        "seek_to" => handle_seek_to(&request.params, context, seeks),
        "skip_to_end" => handle_skip_to_end(context, seeks),
        "get_navigation_state" => handle_get_navigation_state(context),
        "get_fps" => handle_get_fps(context.diagnostics),
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

    let id = request.id.clone()?;
    Some(match result {
        Ok(value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(value),
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

#[derive(Deserialize)]
struct SeekParams {
    index: isize,
}

fn parse_seek_params(params: &serde_json::Value) -> Result<isize, RpcError> {
    serde_json::from_value::<SeekParams>(params.clone())
        .map(|parsed| parsed.index)
        .map_err(|_| RpcError::invalid_params("Expected integer 'index' parameter"))
}

/// Navigator that will accept a seek this frame, or the reason none will.
fn seekable_navigator<'a>(context: &RpcContext<'a>) -> Result<&'a SectionNavigator, RpcError> {
    let navigator = context
        .navigator
        .ok_or_else(|| RpcError::internal_error("Landing page is still loading"))?;
    if !context.container.is_some_and(|container| container.is_mounted()) {
        return Err(RpcError::internal_error("Scroll container is not mounted"));
    }
    Ok(navigator)
}

fn handle_seek_to(
    params: &serde_json::Value,
    context: &RpcContext,
    seeks: &mut Vec<SeekRequestEvent>,
) -> Result<serde_json::Value, RpcError> {
    let index = parse_seek_params(params)?;
    let navigator = seekable_navigator(context)?;
    seeks.push(SeekRequestEvent {
        target: SeekTarget::Index(index),
        source: SeekSource::Rpc,
    });

    Ok(serde_json::json!({
        "success": true,
        "target": navigator.clamp_index(index)
    }))
}

fn handle_skip_to_end(
    context: &RpcContext,
    seeks: &mut Vec<SeekRequestEvent>,
) -> Result<serde_json::Value, RpcError> {
    let navigator = seekable_navigator(context)?;
    seeks.push(SeekRequestEvent {
        target: SeekTarget::Final,
        source: SeekSource::Rpc,
    });

    Ok(serde_json::json!({
        "success": true,
        "target": navigator.section_count() - 1
    }))
}

fn handle_get_navigation_state(context: &RpcContext) -> Result<serde_json::Value, RpcError> {
    let navigator = context
        .navigator
        .ok_or_else(|| RpcError::internal_error("Landing page is still loading"))?;
    let animation_triggered = context.trigger_gate.is_some_and(|gate| gate.fired());

    Ok(navigation_state_json(navigator, animation_triggered, context.now))
}

fn navigation_state_json(
    navigator: &SectionNavigator,
    animation_triggered: bool,
    now: Duration,
) -> serde_json::Value {
    serde_json::json!({
        "current_index": navigator.current_index(),
        "section_count": navigator.section_count(),
        "is_final_section": navigator.is_final_section(),
        "is_snapping": navigator.is_snapping_at(now),
        "animation_triggered": animation_triggered
    })
}

/// Smoothed frame rate, or 0 before the first diagnostic sample.
fn handle_get_fps(diagnostics: &DiagnosticsStore) -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::json!({
        "fps": smoothed_fps(diagnostics).unwrap_or(0.0)
    }))
}

/// Protocol-level failure raised before any method runs.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
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

/// Flush the outbox. Notifications go first so a `section_changed` caused by
/// a seek reaches the host no later than the seek's own response.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        post_to_host(&notification);
    }
    for response in rpc_interface.outgoing_responses.drain(..) {
        post_to_host(&response);
    }
}

/// Post one message to the embedding page. Native builds have no host and
/// drop it.
fn post_to_host<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        let json = match serde_json::to_string(message) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize RPC message: {}", e);
                return;
            }
        };
        let Some(window) = window() else {
            error!("No browser window for RPC message");
            return;
        };
        match window.parent().ok().flatten() {
            Some(host) => {
                if let Err(e) = host.post_message(&JsValue::from_str(&json), "*") {
                    error!("Failed to post RPC message to host page: {:?}", e);
                }
            }
            None => warn!("Engine is not embedded; dropping RPC message"),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::navigation::section_navigator::NavigatorSettings;

    fn mounted_page(section_count: usize) -> (SectionNavigator, ScrollContainer) {
        let mut container = ScrollContainer::new(section_count);
        container.resize(800.0);
        let navigator = SectionNavigator::new(section_count, 800.0, NavigatorSettings::default());
        (navigator, container)
    }

    fn request(json: &str) -> RpcRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn seek_params_require_an_integer_index() {
        assert_eq!(parse_seek_params(&serde_json::json!({"index": 3})).unwrap(), 3);
        assert_eq!(parse_seek_params(&serde_json::json!({"index": -2})).unwrap(), -2);

        let error = parse_seek_params(&serde_json::json!({"index": "two"})).unwrap_err();
        assert_eq!(error.code, -32602);
        assert!(parse_seek_params(&serde_json::Value::Null).is_err());
    }

    #[test]
    fn requests_without_params_deserialize() {
        let request = request(r#"{"jsonrpc":"2.0","method":"skip_to_end","id":7}"#);
        assert_eq!(request.method, "skip_to_end");
        assert!(request.params.is_null());
        assert_eq!(request.id, Some(serde_json::json!(7)));
    }

    #[test]
    fn seek_to_reports_the_clamped_target_and_queues_one_seek() {
        let diagnostics = DiagnosticsStore::default();
        let (navigator, container) = mounted_page(6);
        let context = RpcContext {
            now: Duration::ZERO,
            diagnostics: &diagnostics,
            navigator: Some(&navigator),
            container: Some(&container),
            trigger_gate: None,
        };
        let mut seeks = Vec::new();

        let response = handle_rpc_request(
            &request(r#"{"jsonrpc":"2.0","method":"seek_to","params":{"index":99},"id":1}"#),
            &context,
            &mut seeks,
        )
        .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["success"], true);
        assert_eq!(result["target"], 5);
        assert_eq!(seeks.len(), 1);
        assert!(matches!(seeks[0].target, SeekTarget::Index(99)));
        assert!(matches!(seeks[0].source, SeekSource::Rpc));
    }

    #[test]
    fn skip_to_end_reports_the_last_index() {
        let diagnostics = DiagnosticsStore::default();
        let (navigator, container) = mounted_page(4);
        let context = RpcContext {
            now: Duration::ZERO,
            diagnostics: &diagnostics,
            navigator: Some(&navigator),
            container: Some(&container),
            trigger_gate: None,
        };
        let mut seeks = Vec::new();

        let response = handle_rpc_request(
            &request(r#"{"jsonrpc":"2.0","method":"skip_to_end","id":"end"}"#),
            &context,
            &mut seeks,
        )
        .unwrap();

        assert_eq!(response.result.unwrap()["target"], 3);
        assert!(matches!(seeks[..], [SeekRequestEvent { target: SeekTarget::Final, .. }]));
    }

    #[test]
    fn seeks_fail_while_loading_or_unmounted() {
        let diagnostics = DiagnosticsStore::default();
        let loading = RpcContext {
            now: Duration::ZERO,
            diagnostics: &diagnostics,
            navigator: None,
            container: None,
            trigger_gate: None,
        };
        let mut seeks = Vec::new();
        let seek = request(r#"{"jsonrpc":"2.0","method":"seek_to","params":{"index":1},"id":1}"#);
        let skip = request(r#"{"jsonrpc":"2.0","method":"skip_to_end","id":2}"#);

        for call in [&seek, &skip] {
            let response = handle_rpc_request(call, &loading, &mut seeks).unwrap();
            assert_eq!(response.error.unwrap().code, -32603);
        }

        let navigator = SectionNavigator::new(3, 800.0, NavigatorSettings::default());
        let unmounted_container = ScrollContainer::new(3);
        let unmounted = RpcContext {
            now: Duration::ZERO,
            diagnostics: &diagnostics,
            navigator: Some(&navigator),
            container: Some(&unmounted_container),
            trigger_gate: None,
        };
        let response = handle_rpc_request(&seek, &unmounted, &mut seeks).unwrap();
        assert_eq!(response.error.unwrap().code, -32603);

        assert!(seeks.is_empty());
    }

    #[test]
    fn protocol_errors_use_standard_codes() {
        let diagnostics = DiagnosticsStore::default();
        let (navigator, container) = mounted_page(3);
        let context = RpcContext {
            now: Duration::ZERO,
            diagnostics: &diagnostics,
            navigator: Some(&navigator),
            container: Some(&container),
            trigger_gate: None,
        };
        let mut seeks = Vec::new();

        let unknown = handle_rpc_request(
            &request(r#"{"jsonrpc":"2.0","method":"reload","id":1}"#),
            &context,
            &mut seeks,
        )
        .unwrap();
        let error = unknown.error.unwrap();
        assert_eq!(error.code, -32601);
        assert_eq!(error.data.unwrap()["method"], "reload");

        let wrong_version = handle_rpc_request(
            &request(r#"{"jsonrpc":"1.0","method":"get_fps","id":2}"#),
            &context,
            &mut seeks,
        )
        .unwrap();
        assert_eq!(wrong_version.error.unwrap().code, -32600);
        assert_eq!(wrong_version.id, Some(serde_json::json!(2)));
    }

    #[test]
    fn notifications_get_no_response_but_still_seek() {
        let diagnostics = DiagnosticsStore::default();
        let (navigator, container) = mounted_page(3);
        let context = RpcContext {
            now: Duration::ZERO,
            diagnostics: &diagnostics,
            navigator: Some(&navigator),
            container: Some(&container),
            trigger_gate: None,
        };
        let mut seeks = Vec::new();

        let seek = request(r#"{"jsonrpc":"2.0","method":"seek_to","params":{"index":2}}"#);
        assert!(handle_rpc_request(&seek, &context, &mut seeks).is_none());
        assert_eq!(seeks.len(), 1);

        let unknown = request(r#"{"jsonrpc":"2.0","method":"reload"}"#);
        assert!(handle_rpc_request(&unknown, &context, &mut seeks).is_none());
        let wrong_version = request(r#"{"jsonrpc":"1.0","method":"get_fps"}"#);
        assert!(handle_rpc_request(&wrong_version, &context, &mut seeks).is_none());
        assert_eq!(seeks.len(), 1);
    }

    #[test]
    fn navigation_state_reports_navigator_fields() {
        let (mut navigator, mut container) = mounted_page(4);
        navigator.seek_to(3, Duration::ZERO, &mut container);

        let state = navigation_state_json(&navigator, true, Duration::ZERO);
        assert_eq!(state["current_index"], 3);
        assert_eq!(state["section_count"], 4);
        assert_eq!(state["is_final_section"], true);
        assert_eq!(state["is_snapping"], true);
        assert_eq!(state["animation_triggered"], true);
    }

    #[test]
    fn navigation_state_stops_snapping_once_cooldown_is_due() {
        let (mut navigator, mut container) = mounted_page(4);
        navigator.seek_to(1, Duration::ZERO, &mut container);
        let cooldown = navigator.settings().snap_cooldown();

        // The navigator has not ticked yet, so the cool-down is still armed.
        let state = navigation_state_json(&navigator, false, cooldown);
        assert_eq!(state["is_snapping"], false);
    }

    #[test]
    fn navigation_state_is_unavailable_while_loading() {
        let diagnostics = DiagnosticsStore::default();
        let context = RpcContext {
            now: Duration::ZERO,
            diagnostics: &diagnostics,
            navigator: None,
            container: None,
            trigger_gate: None,
        };
        let error = handle_get_navigation_state(&context).unwrap_err();
        assert_eq!(error.code, -32603);
    }

    #[test]
    fn fps_defaults_to_zero_without_samples() {
        let diagnostics = DiagnosticsStore::default();
        let result = handle_get_fps(&diagnostics).unwrap();
        assert_eq!(result["fps"], 0.0);
    }
}
