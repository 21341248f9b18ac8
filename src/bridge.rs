use std::{collections::HashMap, sync::Arc, thread::JoinHandle};

use crate::{
    model::{
        Page, PageError, TransactionDraft, UiEvent, AMOUNT_FIELD, CHAIN_DATA, MINE_BUTTON,
        MINE_RESULT, RECIPIENT_FIELD, SENDER_FIELD, TRANSACTION_FORM, TRANSACTION_RESULT,
        VIEW_CHAIN_BUTTON,
    },
    node_client::{NodeApi, NodeRequest, RequestError},
    render::render,
    util::{execution::InFlight, Context},
};

/// What a handler decided on the dispatching thread: the request to send,
/// where its response goes, and which form to clear once it succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub request: NodeRequest,
    pub sink: &'static str,
    pub reset_form: Option<&'static str>,
}

pub type Handler = fn(&Page) -> Result<Call, PageError>;

pub fn trigger_mining(_page: &Page) -> Result<Call, PageError> {
    Ok(Call {
        request: NodeRequest::Mine,
        sink: MINE_RESULT,
        reset_form: None,
    })
}

pub fn submit_transaction(page: &Page) -> Result<Call, PageError> {
    let sender = page.field(TRANSACTION_FORM, SENDER_FIELD)?;
    let recipient = page.field(TRANSACTION_FORM, RECIPIENT_FIELD)?;
    let amount = page.field(TRANSACTION_FORM, AMOUNT_FIELD)?;

    Ok(Call {
        request: NodeRequest::NewTransaction(TransactionDraft {
            sender,
            recipient,
            amount,
        }),
        sink: TRANSACTION_RESULT,
        reset_form: Some(TRANSACTION_FORM),
    })
}

pub fn view_chain(_page: &Page) -> Result<Call, PageError> {
    Ok(Call {
        request: NodeRequest::Chain,
        sink: CHAIN_DATA,
        reset_form: None,
    })
}

fn complete(call: Call, node: &dyn NodeApi, page: &Page) {
    let result = call
        .request
        .send(node)
        .and_then(|value| render(&value).map_err(RequestError::from));

    let text = match result {
        Ok(text) => text,
        Err(err) => {
            error!("Error: {}", err);
            return;
        }
    };

    if let Err(err) = page.write_text(call.sink, &text) {
        error!("Error: {}", err);
        return;
    }

    if let Some(form) = call.reset_form {
        if let Err(err) = page.reset_form(form) {
            error!("Error: {}", err);
        }
    }
}

/// Routes page events to node requests.
///
/// Every dispatch runs its request on a fresh thread. Nothing stops the same
/// control from firing again while a request is pending; the responses then
/// race for the sink and whichever resolves last is what stays on the page.
pub struct Bridge {
    page: Page,
    node: Arc<dyn NodeApi>,
    handlers: HashMap<UiEvent, Handler>,
    in_flight: InFlight,
}

impl Bridge {
    pub fn new(context: &Context) -> Bridge {
        let mut bridge = Bridge::unbound(context.page.clone(), context.node.clone());

        bridge.bind(UiEvent::click(MINE_BUTTON), trigger_mining);
        bridge.bind(UiEvent::submit(TRANSACTION_FORM), submit_transaction);
        bridge.bind(UiEvent::click(VIEW_CHAIN_BUTTON), view_chain);

        bridge
    }

    pub fn unbound(page: Page, node: Arc<dyn NodeApi>) -> Bridge {
        Bridge {
            page,
            node,
            handlers: HashMap::new(),
            in_flight: InFlight::new(),
        }
    }

    pub fn bind(&mut self, event: UiEvent, handler: Handler) {
        self.handlers.insert(event, handler);
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn dispatch(&self, event: &UiEvent) -> Option<JoinHandle<()>> {
        let handler = match self.handlers.get(event) {
            Some(handler) => handler,
            None => {
                warn!("Nothing bound to {}", event);
                return None;
            }
        };

        let call = match handler(&self.page) {
            Ok(call) => call,
            Err(err) => {
                error!("Error: {}", err);
                return None;
            }
        };

        debug!("Requesting {} after {}", call.request.path(), event);

        let page = self.page.clone();
        let node = self.node.clone();
        let thread_name = format!("request-{}", call.sink);

        let spawned = self
            .in_flight
            .spawn(&thread_name, move || complete(call, node.as_ref(), &page));

        match spawned {
            Ok(handle) => Some(handle),
            Err(err) => {
                error!("Error: {}", err);
                None
            }
        }
    }

    /// Blocks until every request dispatched before this call has settled.
    pub fn wait_idle(&self) {
        self.in_flight.wait();
    }
}
