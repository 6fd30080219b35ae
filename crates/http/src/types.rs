//! Request and response types for the lending backend
//!
//! Tool, employee and loan records belong to the backend and are passed
//! through as [`serde_json::Value`]. Only the payloads this client produces,
//! and the few responses it has to look inside, are typed here.

use bytes::Bytes;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::request::FormField;

/// Credentials for `POST /api/token/`
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /api/token/refresh/`
#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Successful refresh response
#[derive(Clone, Deserialize)]
pub struct AccessTokenResponse {
    pub access: String,
}

/// Body of `POST /api/users/register/`
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// `GET /api/users/me/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub is_superuser: bool,
    /// Remaining user fields, untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CurrentUser {
    /// Superusers hold every permission
    pub fn has_permission(&self, permission: &str) -> bool {
        self.is_superuser || self.permissions.iter().any(|p| p == permission)
    }
}

/// Tool condition as accepted by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCondition {
    Good,
    New,
    Recovered,
    Maintenance,
}

impl ToolCondition {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::New => "new",
            Self::Recovered => "recovered",
            Self::Maintenance => "maintenance",
        }
    }
}

/// Image attached to a tool form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolImage {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Fields of the tool create/edit form
///
/// Sent as multipart so an image can travel with it. Unset fields are left
/// out, which makes the same form usable for partial updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub condition: Option<ToolCondition>,
    pub total_quantity: Option<u32>,
    /// Decimal amounts stay strings so no precision is lost on the way
    pub unit_value: Option<String>,
    pub acquisition_date: Option<NaiveDate>,
    pub maintenance_cost: Option<String>,
    pub last_maintenance_date: Option<NaiveDate>,
    pub next_maintenance_date: Option<NaiveDate>,
    pub supplier: Option<String>,
    pub image: Option<ToolImage>,
}

impl ToolForm {
    pub fn into_fields(self) -> Vec<FormField> {
        let mut fields = Vec::new();
        let mut push = |name: &str, value: Option<String>| {
            if let Some(value) = value {
                fields.push(FormField::text(name, value));
            }
        };
        let date = |d: Option<NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string());

        push("name", self.name);
        push("description", self.description);
        push("condition", self.condition.map(|c| c.as_str().to_string()));
        push("total_quantity", self.total_quantity.map(|q| q.to_string()));
        push("unit_value", self.unit_value);
        push("acquisition_date", date(self.acquisition_date));
        push("maintenance_cost", self.maintenance_cost);
        push("last_maintenance_date", date(self.last_maintenance_date));
        push("next_maintenance_date", date(self.next_maintenance_date));
        push("supplier", self.supplier);

        if let Some(image) = self.image {
            fields.push(FormField::File {
                name: "image".to_string(),
                file_name: image.file_name,
                content_type: image.content_type,
                data: image.data,
            });
        }
        fields
    }
}

/// Body of `POST /api/employees/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub registration_number: String,
}

/// Who receives a loan; the backend accepts either field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recipient {
    Employee(u64),
    Borrower(u64),
}

/// Body of `POST /api/loans/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewLoan {
    pub tool: u64,
    #[serde(flatten)]
    pub recipient: Recipient,
    pub quantity: u32,
    /// Server assigns today when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borrowed_date: Option<NaiveDate>,
    pub due_date: NaiveDate,
}

/// Server-generated CSV exports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Tools,
    ActiveLoans,
    LoanHistory,
}

impl ExportKind {
    pub const ALL: [Self; 3] = [Self::Tools, Self::ActiveLoans, Self::LoanHistory];

    pub const fn path(self) -> &'static str {
        match self {
            Self::Tools => "/api/export/tools/",
            Self::ActiveLoans => "/api/export/active-loans/",
            Self::LoanHistory => "/api/export/loan-history/",
        }
    }

    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Tools => "ferramentas.csv",
            Self::ActiveLoans => "emprestimos_ativos.csv",
            Self::LoanHistory => "historico_emprestimos.csv",
        }
    }
}
