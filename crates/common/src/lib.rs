pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn ack_serializes_success_flag() {
        let body = serde_json::to_value(types::Ack::ok()).unwrap();
        assert_eq!(body, serde_json::json!({"success": true}));
    }
}
