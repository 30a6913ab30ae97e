use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct LogEntryRequest {
    pub food_id: Uuid,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
}

fn default_quantity() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_defaults_to_one() {
        let req: LogEntryRequest =
            serde_json::from_str(r#"{"food_id": "67e55044-10b1-426f-9247-bb680e5fe0c8"}"#).unwrap();
        assert_eq!(req.quantity, 1.0);
    }
}
