mod event;
mod page;
mod transaction_draft;

pub use event::UiEvent;
pub use page::{
    Page, PageError, RenderListener, AMOUNT_FIELD, CHAIN_DATA, MINE_BUTTON, MINE_RESULT,
    RECIPIENT_FIELD, SENDER_FIELD, TRANSACTION_FORM, TRANSACTION_RESULT, VIEW_CHAIN_BUTTON,
};
pub use transaction_draft::TransactionDraft;
