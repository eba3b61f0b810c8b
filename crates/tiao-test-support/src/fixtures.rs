//! Host message and payload builders.
//!
//! Shapes mirror what the host script pushes into the browser surface so tests
//! exercise the same JSON the UI sees in production.

use serde_json::{Value, json};

/// `{"action": "open", "mode": .., "payload": ..}`.
#[must_use]
pub fn open_message(mode: &str, payload: Value) -> Value {
    json!({ "action": "open", "mode": mode, "payload": payload })
}

/// `{"action": "adminData", "key": .., "data": ..}`.
#[must_use]
pub fn admin_data(key: &str, data: Value) -> Value {
    json!({ "action": "adminData", "key": key, "data": data })
}

/// `{"action": "close"}`.
#[must_use]
pub fn close_message() -> Value {
    json!({ "action": "close" })
}

/// `admin_state` body with the given vault balance and inflation mode.
#[must_use]
pub fn admin_state(vault: f64, inflation_mode: &str) -> Value {
    json!({
        "metrics": { "vault": vault, "inflation": 1.02, "taxrate": 2.5, "today": 340 },
        "settings": {
            "mode": { "inflation": inflation_mode, "taxrate": "auto" },
            "manual": { "inflation": 1.0, "taxrate": 3.0 }
        }
    })
}

/// `count` debt rows with predictable names and amounts.
#[must_use]
pub fn debt_rows(count: usize) -> Value {
    Value::Array(
        (1..=count)
            .map(|index| {
                json!({
                    "playerName": format!("Citizen {index}"),
                    "citizenid": format!("CID{index:03}"),
                    "amount": index * 1000,
                    "reason": "IPTU",
                })
            })
            .collect(),
    )
}

/// `admin_logs` body with `count` entries.
#[must_use]
pub fn audit_logs(count: usize) -> Value {
    let logs: Vec<Value> = (1..=count)
        .map(|index| {
            json!({
                "timestamp": format!("2026-01-0{} 10:00", index % 9 + 1),
                "category": "tax",
                "message": format!("entry {index}"),
            })
        })
        .collect();
    json!({ "logs": logs })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debt_rows_are_numbered_from_one() {
        let rows = debt_rows(2);
        assert_eq!(rows[0]["citizenid"], json!("CID001"));
        assert_eq!(rows[1]["amount"], json!(2000));
    }

    #[test]
    fn messages_carry_their_action() {
        assert_eq!(open_message("tax", json!({}))["action"], json!("open"));
        assert_eq!(admin_data("admin_logs", json!(null))["key"], json!("admin_logs"));
        assert_eq!(close_message()["action"], json!("close"));
        assert_eq!(audit_logs(3)["logs"].as_array().map(Vec::len), Some(3));
    }
}
