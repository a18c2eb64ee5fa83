use anyhow::Result;

use crate::{
    domain::FormValues,
    form::{FormStore, FormValidator},
};

use super::{
    form_screen::{FormApp, SubmitHandler},
    options::UiOptions,
};

/// Entry point for the interactive customer registration form.
pub struct CustomerForm {
    initial: FormValues,
    options: UiOptions,
    submit_handler: Option<SubmitHandler>,
}

impl std::fmt::Debug for CustomerForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerForm")
            .field("initial", &self.initial)
            .field("options", &self.options)
            .field("submit_handler", &self.submit_handler.is_some())
            .finish()
    }
}

impl Default for CustomerForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerForm {
    pub fn new() -> Self {
        Self {
            initial: FormValues::default(),
            options: UiOptions::default(),
            submit_handler: None,
        }
    }

    /// Starts the form from `values`; they also become the clean baseline.
    pub fn with_initial_data(mut self, values: FormValues) -> Self {
        self.initial = values;
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_submit_handler(
        mut self,
        handler: impl FnMut(&FormValues) -> Result<()> + 'static,
    ) -> Self {
        self.submit_handler = Some(Box::new(handler));
        self
    }

    /// Runs the form; `Ok(None)` when the operator left without saving.
    pub fn run(self) -> Result<Option<FormValues>> {
        let mut app = self.into_app()?;
        app.run()
    }

    pub(crate) fn into_app(self) -> Result<FormApp> {
        let CustomerForm {
            initial,
            options,
            submit_handler,
        } = self;
        let validator = FormValidator::new()?;
        let store = FormStore::new(initial);
        Ok(FormApp::new(store, validator, options, submit_handler))
    }
}
