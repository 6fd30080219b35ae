//! HTTP session client for the tool-lending backend
//!
//! [`client::SessionClient`] owns the bearer-token lifecycle: it attaches the
//! stored access token, refreshes it once on a 401 and ends the session when
//! the refresh is rejected. The typed endpoint methods on top of it turn
//! responses into [`client::ClientError`] values.

pub mod client;
pub mod search;
pub mod types;

pub use client::{
    ClientError, FormField, LogNavigator, Navigator, Outcome, PendingRequest, PublicClient,
    SessionClient, SessionClientBuilder,
};
pub use search::{filter_employees, filter_loans, filter_tools};
pub use types::{
    CurrentUser, ExportKind, NewEmployee, NewLoan, Recipient, ToolCondition, ToolForm, ToolImage,
};
