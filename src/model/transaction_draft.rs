use serde::{Deserialize, Serialize};

/// Values of the transaction form at submit time, sent to the node verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionDraft {
    pub sender: String,
    pub recipient: String,
    pub amount: String,
}

#[cfg(test)]
mod tests {
    use super::TransactionDraft;

    #[test]
    fn should_serialize_fields_in_form_order() {
        let draft = TransactionDraft {
            sender: "alice".to_string(),
            recipient: "bob".to_string(),
            amount: "10".to_string(),
        };

        let body = serde_json::to_string(&draft).unwrap();
        assert_eq!(
            body,
            r#"{"sender":"alice","recipient":"bob","amount":"10"}"#
        );
    }

    #[test]
    fn should_keep_empty_and_non_numeric_values() {
        let draft = TransactionDraft {
            sender: String::new(),
            recipient: "bob smith".to_string(),
            amount: "ten".to_string(),
        };

        let body = serde_json::to_string(&draft).unwrap();
        assert_eq!(
            body,
            r#"{"sender":"","recipient":"bob smith","amount":"ten"}"#
        );
    }
}
