use std::sync::{Arc, Mutex};

use thiserror::Error;

pub const MINE_BUTTON: &str = "mine-btn";
pub const MINE_RESULT: &str = "mine-result";

pub const TRANSACTION_FORM: &str = "transaction-form";
pub const SENDER_FIELD: &str = "sender";
pub const RECIPIENT_FIELD: &str = "recipient";
pub const AMOUNT_FIELD: &str = "amount";
pub const TRANSACTION_RESULT: &str = "transaction-result";

pub const VIEW_CHAIN_BUTTON: &str = "view-chain-btn";
pub const CHAIN_DATA: &str = "chain-data";

/// Called with `(sink_id, text)` after every successful write to a sink.
pub type RenderListener = Arc<dyn Fn(&str, &str) + Send + Sync>;

type Entry = (String, String);

#[derive(Error, PartialEq, Debug)]
pub enum PageError {
    #[error("Unknown element `{0}`")]
    UnknownElement(String),

    #[error("Unknown field `{field}` in form `{form}`")]
    UnknownField { form: String, field: String },
}

#[derive(Debug, Clone)]
struct Form {
    id: String,
    fields: Vec<Entry>,
}

#[derive(Debug, Default)]
struct Document {
    sinks: Vec<Entry>,
    forms: Vec<Form>,
}

impl Document {
    fn sink_mut(&mut self, id: &str) -> Result<&mut String, PageError> {
        self.sinks
            .iter_mut()
            .find(|(sink_id, _)| sink_id == id)
            .map(|(_, text)| text)
            .ok_or_else(|| PageError::UnknownElement(id.to_string()))
    }

    fn form_mut(&mut self, id: &str) -> Result<&mut Form, PageError> {
        self.forms
            .iter_mut()
            .find(|form| form.id == id)
            .ok_or_else(|| PageError::UnknownElement(id.to_string()))
    }

    fn field_mut(&mut self, form_id: &str, field: &str) -> Result<&mut String, PageError> {
        let form = self.form_mut(form_id)?;

        form.fields
            .iter_mut()
            .find(|(field_id, _)| field_id == field)
            .map(|(_, value)| value)
            .ok_or_else(|| PageError::UnknownField {
                form: form_id.to_string(),
                field: field.to_string(),
            })
    }
}

/// Headless stand-in for the HTML page: output sinks plus the transaction form.
///
/// Clones share the same document, so worker threads can write results while
/// the console keeps editing the form.
#[derive(Clone)]
pub struct Page {
    document: Arc<Mutex<Document>>,
    listeners: Arc<Mutex<Vec<RenderListener>>>,
    // Held across a sink write and its notifications, so listeners see
    // writes in the order they hit the document.
    rendering: Arc<Mutex<()>>,
}

impl Default for Page {
    fn default() -> Self {
        Page::new()
    }
}

impl Page {
    pub fn new() -> Page {
        let empty = |id: &str| (id.to_string(), String::new());

        let document = Document {
            sinks: vec![
                empty(MINE_RESULT),
                empty(TRANSACTION_RESULT),
                empty(CHAIN_DATA),
            ],
            forms: vec![Form {
                id: TRANSACTION_FORM.to_string(),
                fields: vec![
                    empty(SENDER_FIELD),
                    empty(RECIPIENT_FIELD),
                    empty(AMOUNT_FIELD),
                ],
            }],
        };

        Page {
            document: Arc::new(Mutex::new(document)),
            listeners: Arc::default(),
            rendering: Arc::default(),
        }
    }

    pub fn on_render(&self, listener: RenderListener) {
        self.listeners.lock().unwrap().push(listener);
    }

    pub fn sink_ids(&self) -> Vec<String> {
        let document = self.document.lock().unwrap();

        document.sinks.iter().map(|(id, _)| id.clone()).collect()
    }

    pub fn text(&self, id: &str) -> Result<String, PageError> {
        let mut document = self.document.lock().unwrap();
        let text = document.sink_mut(id)?;

        Ok(text.clone())
    }

    pub fn write_text(&self, id: &str, text: &str) -> Result<(), PageError> {
        let _rendering = self.rendering.lock().unwrap();

        {
            let mut document = self.document.lock().unwrap();
            *document.sink_mut(id)? = text.to_string();
        }

        let listeners = self.listeners.lock().unwrap().clone();
        for listener in listeners {
            listener(id, text);
        }

        Ok(())
    }

    /// Finds the form owning `field`, for commands that name a field only.
    pub fn form_of(&self, field: &str) -> Option<String> {
        let document = self.document.lock().unwrap();

        document
            .forms
            .iter()
            .find(|form| form.fields.iter().any(|(id, _)| id == field))
            .map(|form| form.id.clone())
    }

    pub fn field(&self, form: &str, field: &str) -> Result<String, PageError> {
        let mut document = self.document.lock().unwrap();
        let value = document.field_mut(form, field)?;

        Ok(value.clone())
    }

    pub fn set_field(&self, form: &str, field: &str, value: &str) -> Result<(), PageError> {
        let mut document = self.document.lock().unwrap();
        *document.field_mut(form, field)? = value.to_string();

        Ok(())
    }

    pub fn reset_form(&self, form: &str) -> Result<(), PageError> {
        let mut document = self.document.lock().unwrap();

        for (_, value) in document.form_mut(form)?.fields.iter_mut() {
            value.clear();
        }

        Ok(())
    }
}
