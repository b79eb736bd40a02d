//! A receipt editing session: form, counter and the store behind it

use crate::config::ReceiptConfig;
use crate::counter::ReceiptCounter;
use crate::form::{FormField, ReceiptForm};
use crate::layout::{render_receipt, ReceiptLayout};
use crate::store::KeyValueStore;
use crate::Result;
use tracing::{debug, info};

/// Form state plus the persisted receipt counter
///
/// The form starts empty and is never persisted. The counter is read once
/// from the store when the session opens and only changes after a
/// successful export.
#[derive(Debug)]
pub struct ReceiptSession<S: KeyValueStore> {
    form: ReceiptForm,
    counter: ReceiptCounter,
    store: S,
}

impl<S: KeyValueStore> ReceiptSession<S> {
    /// Start a session, loading the counter from `store`
    pub fn open(store: S) -> Result<Self> {
        let counter = ReceiptCounter::load(&store)?;
        info!(receipt = %counter, "receipt session opened");
        Ok(Self {
            form: ReceiptForm::new(),
            counter,
            store,
        })
    }

    pub fn form(&self) -> &ReceiptForm {
        &self.form
    }

    /// Number the next export will use
    pub fn counter(&self) -> ReceiptCounter {
        self.counter
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Set one form field
    pub fn update_field(&mut self, field: FormField, value: &str) {
        debug!(field = %field, value, "form field updated");
        self.form.update_field(field, value);
    }

    /// Set a field by name, e.g. `"receiverName"`
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        let field: FormField = name.parse()?;
        self.update_field(field, value);
        Ok(())
    }

    /// Render the current form
    pub fn render(&self, config: &ReceiptConfig) -> ReceiptLayout {
        render_receipt(&config.provider, &config.receipt, &self.form, self.counter)
    }

    /// Move to the next number, persisting it first
    ///
    /// If the store write fails the in-memory counter is left as it was.
    pub(crate) fn advance_counter(&mut self) -> Result<ReceiptCounter> {
        let next = self.counter.next();
        next.persist(&mut self.store)?;
        info!(from = %self.counter, to = %next, "receipt counter advanced");
        self.counter = next;
        Ok(next)
    }
}
