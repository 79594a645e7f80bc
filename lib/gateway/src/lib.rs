//! Client for the timetable-admin backend API.
//!
//! All calls return an [`ApiResponse`] envelope; no call fails outside it.
//! The authentication subset is abstracted behind [`BackendGateway`] so the
//! session controller can be driven by a fake in tests.

pub mod config;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod http;
pub mod types;

pub use config::ClientConfig;
pub use envelope::{ApiResponse, NETWORK_ERROR, normalize};
pub use error::GatewayError;
pub use gateway::BackendGateway;
pub use http::HttpGateway;
pub use types::{
    ChoiceForm, ChoiceFormStatus, ChoicePreferences, ChoiceSubmissionRecord, Credentials,
    Department, GenerationOutcome, LoginPayload, NewChoiceForm, NewDepartment, NewUser,
    StaffCredentials, StaffRegistration, StaffRegistrationReceipt, StaffRegistrationRecord,
    StaffTimetable, TimetableStats, UserRegistrationReceipt, UserSummary, UserUpdate,
    VerifyPayload,
};
