//! Case-insensitive search over fetched records
//!
//! List endpoints return every record; narrowing them down to what the user
//! typed happens on the client. A record matches when any of the searched
//! fields contains the term, ignoring case. Fields that are missing or not
//! strings never match, and an empty term matches everything.

use serde_json::Value;

const TOOL_FIELDS: &[&str] = &["name"];
const LOAN_FIELDS: &[&str] = &["tool_name", "borrower_username"];
const EMPLOYEE_FIELDS: &[&str] = &["name", "registration_number"];

/// Tools whose name contains `term`
pub fn filter_tools<'a>(tools: &'a [Value], term: &str) -> Vec<&'a Value> {
    filter_by(tools, TOOL_FIELDS, term)
}

/// Loans whose tool name or borrower username contains `term`
pub fn filter_loans<'a>(loans: &'a [Value], term: &str) -> Vec<&'a Value> {
    filter_by(loans, LOAN_FIELDS, term)
}

/// Employees whose name or registration number contains `term`
pub fn filter_employees<'a>(employees: &'a [Value], term: &str) -> Vec<&'a Value> {
    filter_by(employees, EMPLOYEE_FIELDS, term)
}

/// Records where any of `fields` contains `term`
pub fn filter_by<'a>(records: &'a [Value], fields: &[&str], term: &str) -> Vec<&'a Value> {
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| record_matches(record, fields, &needle))
        .collect()
}

fn record_matches(record: &Value, fields: &[&str], needle: &str) -> bool {
    fields.iter().any(|field| {
        record
            .get(*field)
            .and_then(Value::as_str)
            .is_some_and(|value| value.to_lowercase().contains(needle))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(records: &[&Value]) -> Vec<u64> {
        records.iter().map(|r| r["id"].as_u64().unwrap()).collect()
    }

    #[test]
    fn tool_search_ignores_case() {
        let tools = vec![
            json!({"id": 1, "name": "Furadeira de Impacto"}),
            json!({"id": 2, "name": "Serra Circular"}),
            json!({"id": 3, "name": "furadeira manual"}),
        ];
        assert_eq!(ids(&filter_tools(&tools, "FURADEIRA")), vec![1, 3]);
        assert_eq!(ids(&filter_tools(&tools, "circ")), vec![2]);
        assert!(filter_tools(&tools, "martelo").is_empty());
    }

    #[test]
    fn empty_term_keeps_everything() {
        let tools = vec![json!({"id": 1, "name": "Serra"}), json!({"id": 2})];
        assert_eq!(ids(&filter_tools(&tools, "")), vec![1, 2]);
    }

    #[test]
    fn loan_search_checks_tool_and_borrower() {
        let loans = vec![
            json!({"id": 10, "tool_name": "Serra", "borrower_username": "maria"}),
            json!({"id": 11, "tool_name": "Martelo", "borrower_username": "Joao"}),
        ];
        assert_eq!(ids(&filter_loans(&loans, "serra")), vec![10]);
        assert_eq!(ids(&filter_loans(&loans, "joão")), Vec::<u64>::new());
        assert_eq!(ids(&filter_loans(&loans, "JOAO")), vec![11]);
    }

    #[test]
    fn missing_or_non_string_fields_never_match() {
        let loans = vec![
            json!({"id": 20, "tool_name": "Serra", "borrower_username": null}),
            json!({"id": 21, "tool_name": "Trena"}),
            json!({"id": 22, "tool_name": 42, "borrower_username": "ana"}),
        ];
        assert_eq!(ids(&filter_loans(&loans, "ana")), vec![22]);
        assert!(filter_loans(&loans, "42").is_empty());
    }

    #[test]
    fn employee_search_checks_registration_number() {
        let employees = vec![
            json!({"id": 1, "name": "Ana Souza", "registration_number": "E-042"}),
            json!({"id": 2, "name": "Bruno Lima", "registration_number": "e-100"}),
        ];
        assert_eq!(ids(&filter_employees(&employees, "e-1")), vec![2]);
        assert_eq!(ids(&filter_employees(&employees, "souza")), vec![1]);
    }
}
