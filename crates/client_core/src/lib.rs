//! Client-side request orchestration for the string service.

pub mod form;
pub mod orchestrator;
pub mod transport;

pub use form::{FormField, FormInputs, FormState, UiUpdate};
pub use orchestrator::{
    Action, Binding, Dispatched, EndpointError, Endpoints, Orchestrator, SuccessHandler,
};
pub use transport::{ApiRequest, HttpTransport, Transport, TransportError};
