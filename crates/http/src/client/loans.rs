//! Loan lifecycle endpoints

use super::{ClientError, PendingRequest, SessionClient};
use crate::types::NewLoan;
use serde_json::Value;

impl SessionClient {
    /// Register a loan
    ///
    /// Quantity checks happen on the server; a rejected loan comes back as
    /// [`ClientError::BadRequest`] with the field errors in its body.
    pub async fn create_loan(&self, loan: &NewLoan) -> Result<Value, ClientError> {
        let request = PendingRequest::post("/api/loans/").json(loan)?;
        self.execute(request).await
    }

    /// Loans not yet returned
    pub async fn active_loans(&self) -> Result<Vec<Value>, ClientError> {
        self.execute(PendingRequest::get("/api/loans/active_loans/"))
            .await
    }

    /// Unreturned loans past their due date
    pub async fn overdue_loans(&self) -> Result<Vec<Value>, ClientError> {
        self.execute(PendingRequest::get("/api/loans/overdue_loans/"))
            .await
    }

    /// Returned loans
    pub async fn loan_history(&self) -> Result<Vec<Value>, ClientError> {
        self.execute(PendingRequest::get("/api/loans/loan_history/"))
            .await
    }

    /// Mark a loan as returned
    pub async fn return_loan(&self, id: u64) -> Result<Value, ClientError> {
        self.execute(PendingRequest::post(format!("/api/loans/{id}/return/")))
            .await
    }
}
