//! Tool and employee endpoints

use super::{ClientError, PendingRequest, SessionClient};
use crate::types::{NewEmployee, ToolForm};
use reqwest::StatusCode;
use serde_json::Value;

impl SessionClient {
    /// List all tools
    pub async fn list_tools(&self) -> Result<Vec<Value>, ClientError> {
        self.execute(PendingRequest::get("/api/tools/")).await
    }

    /// Create a tool from a multipart form
    pub async fn create_tool(&self, form: ToolForm) -> Result<Value, ClientError> {
        let request = PendingRequest::post("/api/tools/").form(form.into_fields());
        self.execute(request).await
    }

    /// Partially update a tool; only the fields set in `form` are sent
    pub async fn update_tool(&self, id: u64, form: ToolForm) -> Result<Value, ClientError> {
        let request = PendingRequest::patch(format!("/api/tools/{id}/")).form(form.into_fields());
        self.execute(request).await
    }

    /// Delete a tool
    ///
    /// Only `204 No Content` counts as deleted; any other success status is
    /// reported as [`ClientError::ServerError`].
    pub async fn delete_tool(&self, id: u64) -> Result<(), ClientError> {
        let response = self
            .checked(PendingRequest::delete(format!("/api/tools/{id}/")))
            .await?;

        let status = response.status();
        if status != StatusCode::NO_CONTENT {
            return Err(ClientError::ServerError {
                status: status.as_u16(),
                message: format!("expected 204 No Content when deleting tool {id}, got {status}"),
            });
        }
        Ok(())
    }

    /// List all employees
    pub async fn list_employees(&self) -> Result<Vec<Value>, ClientError> {
        self.execute(PendingRequest::get("/api/employees/")).await
    }

    /// Register an employee
    pub async fn create_employee(&self, employee: &NewEmployee) -> Result<Value, ClientError> {
        let request = PendingRequest::post("/api/employees/").json(employee)?;
        self.execute(request).await
    }

    /// Remove an employee
    pub async fn delete_employee(&self, id: u64) -> Result<(), ClientError> {
        self.execute_empty(PendingRequest::delete(format!("/api/employees/{id}/")))
            .await
    }
}
