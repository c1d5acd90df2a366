//! Turns UI actions into requests and routes their outcomes back to the form.

use std::sync::Arc;

use crossbeam_channel::Sender;
use futures::future::join;
use shared::{
    domain::{validate_state, Splitter, StringProperties, TwoPropObject, SPACE_PLACEHOLDER},
    error::ValidationError,
    protocol::{decode_json_string, json_string_body, Endpoint},
};
use thiserror::Error;
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{debug, error, warn};
use url::Url;

use crate::{
    form::{FormField, FormInputs, FormState, UiUpdate},
    transport::{ApiRequest, Transport},
};

pub const FAILED_GET_STATE: &str = "Failed to get state!";
pub const FAILED_SET_STATE: &str = "Failed to set state!";
pub const FAILED_GET_SPLITTER: &str = "Failed to get splitter!";
pub const FAILED_SET_SPLITTER: &str = "Failed to set splitter!";
pub const FAILED_GET_TWO_PROP: &str = "Failed to get two-property object!";
pub const SERVICE_CRASHED: &str = "Web service has crashed!";
pub const FAILED_GET_SPLIT_STATE: &str = "Failed to get split state!";
pub const FAILED_GET_PROPERTIES: &str = "Failed to get properties!";

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("invalid base url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported scheme '{scheme}' in base url '{url}'")]
    UnsupportedScheme { scheme: String, url: String },
}

/// Base URL of the service, joined with endpoint paths when requests are built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    /// Accepts `http`/`https` URLs or a bare `host[:port]`, which is taken as `http`.
    /// Surrounding whitespace and trailing slashes are dropped.
    pub fn new(base_url: &str) -> Result<Self, EndpointError> {
        let raw = base_url.trim();
        let candidate = if raw.contains("://") {
            raw.to_string()
        } else {
            format!("http://{raw}")
        };

        let parsed = Url::parse(&candidate).map_err(|source| EndpointError::InvalidUrl {
            url: raw.to_string(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(EndpointError::UnsupportedScheme {
                scheme: parsed.scheme().to_string(),
                url: raw.to_string(),
            });
        }

        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GetState,
    SubmitState,
    GetSplitter,
    SubmitSplitter,
    GetTwoProp,
    Crash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessHandler {
    StateUpdated,
    SplitterUpdated,
    TwoProp,
}

pub type RequestBuilder = fn(&Endpoints, &FormInputs) -> ApiRequest;
pub type Validator = fn(&FormInputs) -> Result<(), ValidationError>;

/// Everything needed to run one action: evaluated fresh on every dispatch.
#[derive(Clone, Copy)]
pub struct Binding {
    pub request: RequestBuilder,
    pub field: Option<FormField>,
    pub validator: Option<Validator>,
    pub failure_message: &'static str,
    pub on_success: Option<SuccessHandler>,
}

impl Action {
    pub fn binding(self) -> Binding {
        match self {
            Self::GetState => Binding {
                request: get_state_request,
                field: Some(FormField::State),
                validator: None,
                failure_message: FAILED_GET_STATE,
                on_success: Some(SuccessHandler::StateUpdated),
            },
            Self::SubmitState => Binding {
                request: submit_state_request,
                field: Some(FormField::State),
                validator: Some(validate_state_input),
                failure_message: FAILED_SET_STATE,
                on_success: Some(SuccessHandler::StateUpdated),
            },
            Self::GetSplitter => Binding {
                request: get_splitter_request,
                field: Some(FormField::Splitter),
                validator: None,
                failure_message: FAILED_GET_SPLITTER,
                on_success: Some(SuccessHandler::SplitterUpdated),
            },
            Self::SubmitSplitter => Binding {
                request: submit_splitter_request,
                field: Some(FormField::Splitter),
                validator: Some(validate_splitter_input),
                failure_message: FAILED_SET_SPLITTER,
                on_success: Some(SuccessHandler::SplitterUpdated),
            },
            Self::GetTwoProp => Binding {
                request: get_two_prop_request,
                field: None,
                validator: None,
                failure_message: FAILED_GET_TWO_PROP,
                on_success: Some(SuccessHandler::TwoProp),
            },
            Self::Crash => Binding {
                request: crash_request,
                field: None,
                validator: None,
                failure_message: SERVICE_CRASHED,
                on_success: None,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::GetState => "get_state",
            Self::SubmitState => "submit_state",
            Self::GetSplitter => "get_splitter",
            Self::SubmitSplitter => "submit_splitter",
            Self::GetTwoProp => "get_two_prop",
            Self::Crash => "crash",
        }
    }
}

fn get_state_request(endpoints: &Endpoints, _inputs: &FormInputs) -> ApiRequest {
    ApiRequest::get(endpoints.url(Endpoint::State))
}

fn submit_state_request(endpoints: &Endpoints, inputs: &FormInputs) -> ApiRequest {
    ApiRequest::put_json(
        endpoints.url(Endpoint::State),
        json_string_body(&inputs.state),
    )
}

fn get_splitter_request(endpoints: &Endpoints, _inputs: &FormInputs) -> ApiRequest {
    ApiRequest::get(endpoints.url(Endpoint::Splitter))
}

fn submit_splitter_request(endpoints: &Endpoints, inputs: &FormInputs) -> ApiRequest {
    let splitter = inputs.splitter.replace(SPACE_PLACEHOLDER, " ");
    ApiRequest::put_json(
        endpoints.url(Endpoint::Splitter),
        json_string_body(&splitter),
    )
}

fn get_two_prop_request(endpoints: &Endpoints, _inputs: &FormInputs) -> ApiRequest {
    ApiRequest::get(endpoints.url(Endpoint::TwoProp))
}

fn crash_request(endpoints: &Endpoints, _inputs: &FormInputs) -> ApiRequest {
    ApiRequest::get(endpoints.url(Endpoint::Crash))
}

fn validate_state_input(inputs: &FormInputs) -> Result<(), ValidationError> {
    validate_state(&inputs.state)
}

fn validate_splitter_input(inputs: &FormInputs) -> Result<(), ValidationError> {
    Splitter::from_input(&inputs.splitter).map(|_| ())
}

#[derive(Debug)]
pub enum Dispatched {
    /// Validation failed; nothing was sent.
    Rejected(ValidationError),
    InFlight(JoinHandle<()>),
}

impl Dispatched {
    pub fn into_handle(self) -> Option<JoinHandle<()>> {
        match self {
            Self::Rejected(_) => None,
            Self::InFlight(handle) => Some(handle),
        }
    }
}

#[derive(Clone)]
pub struct Orchestrator {
    transport: Arc<dyn Transport>,
    endpoints: Endpoints,
    ui_tx: Sender<UiUpdate>,
    runtime: Handle,
}

impl Orchestrator {
    pub fn new(
        transport: Arc<dyn Transport>,
        endpoints: Endpoints,
        ui_tx: Sender<UiUpdate>,
        runtime: Handle,
    ) -> Self {
        Self {
            transport,
            endpoints,
            ui_tx,
            runtime,
        }
    }

    pub fn trigger(&self, action: Action, form: &mut FormState) -> Dispatched {
        debug!(action = action.name(), "ui action triggered");
        self.dispatch(&action.binding(), form)
    }

    /// Runs on the UI thread. Validation and the invalid-input indicator are
    /// handled synchronously; the request itself runs on the runtime.
    pub fn dispatch(&self, binding: &Binding, form: &mut FormState) -> Dispatched {
        if let Some(field) = binding.field {
            form.set_invalid(field, false);
        }

        let inputs = form.inputs();
        if let Some(validator) = binding.validator {
            if let Err(err) = validator(&inputs) {
                if let Some(field) = binding.field {
                    form.set_invalid(field, true);
                }
                debug!(error = %err, "input rejected; request not sent");
                return Dispatched::Rejected(err);
            }
        }

        let request = (binding.request)(&self.endpoints, &inputs);
        debug!(method = %request.method, url = %request.url, "dispatching request");

        let this = self.clone();
        let failure_message = binding.failure_message;
        let on_success = binding.on_success;
        let handle = self.runtime.spawn(async move {
            if let Some(body) = this.send(request, failure_message).await {
                if let Some(handler) = on_success {
                    this.handle_success(handler, body).await;
                }
            }
        });
        Dispatched::InFlight(handle)
    }

    /// Fetches the split state and the state properties concurrently.
    pub async fn refresh_derived(&self) {
        join(self.refresh_split_state(), self.refresh_properties()).await;
    }

    async fn send(&self, request: ApiRequest, failure_message: &str) -> Option<String> {
        match self.transport.send(request).await {
            Ok(body) => Some(body),
            Err(err) => {
                error!(target: "net", error = %err, "request failed");
                self.notify(failure_message);
                None
            }
        }
    }

    async fn handle_success(&self, handler: SuccessHandler, body: String) {
        match handler {
            SuccessHandler::StateUpdated => {
                let state = match decode_json_string(&body) {
                    Ok(state) => state,
                    Err(err) => {
                        warn!(target: "parse", error = %err, "state response is not a json string; showing raw text");
                        body
                    }
                };
                self.set_text(FormField::State, state);
                self.refresh_derived().await;
            }
            SuccessHandler::SplitterUpdated => {
                match Splitter::from_response(&body) {
                    Ok(splitter) => self.set_text(FormField::Splitter, splitter.display_text()),
                    Err(err) => warn!(target: "parse", error = %err, "unusable splitter response"),
                }
                self.refresh_derived().await;
            }
            SuccessHandler::TwoProp => match serde_json::from_str::<TwoPropObject>(&body) {
                Ok(object) => {
                    self.set_text(FormField::PropOne, object.prop1);
                    self.set_text(FormField::PropTwo, object.prop2.to_string());
                }
                Err(err) => warn!(target: "parse", error = %err, "malformed two-property object"),
            },
        }
    }

    async fn refresh_split_state(&self) {
        let request = ApiRequest::get(self.endpoints.url(Endpoint::SplitState));
        if let Some(body) = self.send(request, FAILED_GET_SPLIT_STATE).await {
            self.set_text(FormField::SplitState, body);
        }
    }

    async fn refresh_properties(&self) {
        let request = ApiRequest::get(self.endpoints.url(Endpoint::StateProperties));
        let Some(body) = self.send(request, FAILED_GET_PROPERTIES).await else {
            return;
        };

        match serde_json::from_str::<StringProperties>(&body) {
            Ok(properties) => {
                self.set_text(FormField::OriginalText, properties.original_string);
                self.set_text(
                    FormField::FifthChar,
                    properties.fifth_char.unwrap_or_default(),
                );
                self.set_text(FormField::Palindrome, properties.is_palindrome.to_string());
                self.set_text(FormField::Reversed, properties.reversed);
            }
            Err(err) => {
                warn!(target: "parse", error = %err, "malformed state properties");
                self.notify(FAILED_GET_PROPERTIES);
            }
        }
    }

    fn set_text(&self, field: FormField, text: impl Into<String>) {
        self.post(UiUpdate::SetText {
            field,
            text: text.into(),
        });
    }

    fn notify(&self, message: &str) {
        self.post(UiUpdate::Notify(message.to_string()));
    }

    fn post(&self, update: UiUpdate) {
        if self.ui_tx.send(update).is_err() {
            debug!("ui receiver dropped; discarding update");
        }
    }
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
