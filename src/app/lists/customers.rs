use std::future::Future;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;

use crate::{
    api::{ApiClient, ApiError, ListParams, RequestOptions, User},
    app::options::UiOptions,
    presentation::{self, CustomersContext, FooterContext},
    query::{QueryCache, QueryKey, QueryState, customers},
};

use super::{ListScreen, run_screen};

const HELP_TEXT: &str = "↑/↓ select • r refresh • q back";

#[derive(Debug)]
pub(crate) enum CustomersMsg {
    Loaded(Result<Vec<User>, ApiError>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CustomersRequest {
    FetchList,
}

#[derive(Debug, Default)]
pub(crate) struct CustomersScreen {
    cache: QueryCache,
    fetching: bool,
    error: Option<ApiError>,
    selected: usize,
    status: String,
    should_quit: bool,
}

impl CustomersScreen {
    pub(crate) fn new() -> Self {
        Self {
            status: "Loading customers...".to_string(),
            ..Self::default()
        }
    }

    fn list_key() -> QueryKey {
        customers::list_key(&ListParams::default())
    }

    pub(crate) fn state(&self) -> QueryState<Vec<User>> {
        QueryState::resolve(
            self.cache.get(&Self::list_key()),
            self.fetching,
            self.error.as_ref(),
        )
    }

    #[cfg(test)]
    pub(crate) fn selected(&self) -> usize {
        self.selected
    }

    #[cfg(test)]
    pub(crate) fn status(&self) -> &str {
        &self.status
    }

    fn refetch(&mut self) -> Option<CustomersRequest> {
        if self.fetching {
            return None;
        }
        self.fetching = true;
        self.status = "Refreshing...".to_string();
        Some(CustomersRequest::FetchList)
    }

    fn customer_count(&self) -> usize {
        self.cache
            .get::<Vec<User>>(&Self::list_key())
            .map_or(0, |users| users.len())
    }
}

impl ListScreen for CustomersScreen {
    type Msg = CustomersMsg;
    type Request = CustomersRequest;

    fn mount(&mut self) -> Option<CustomersRequest> {
        if self.cache.is_stale(&Self::list_key()) {
            self.refetch()
        } else {
            None
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<CustomersRequest> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('r') => self.refetch(),
            KeyCode::Down | KeyCode::Char('j') => {
                let count = self.customer_count();
                if count > 0 {
                    self.selected = (self.selected + 1).min(count - 1);
                }
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            _ => None,
        }
    }

    fn apply(&mut self, msg: CustomersMsg) -> Option<CustomersRequest> {
        match msg {
            CustomersMsg::Loaded(result) => {
                self.fetching = false;
                match result {
                    Ok(users) => {
                        if let Err(err) = self.cache.set(Self::list_key(), &users) {
                            tracing::warn!(error = %err, "failed to cache customers");
                        }
                        self.error = None;
                        self.selected = self.selected.min(users.len().saturating_sub(1));
                        self.status = format!("{} customers", users.len());
                    }
                    Err(err) if err.is_cancelled() => {}
                    Err(err) => {
                        tracing::warn!(error = %err, "failed to load customers");
                        self.status = err.message.clone();
                        self.error = Some(err);
                    }
                }
            }
        }
        None
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn draw(&self, frame: &mut Frame<'_>, options: &UiOptions) {
        let state = self.state();
        presentation::draw_customers(
            frame,
            CustomersContext {
                state: &state,
                selected: self.selected,
                footer: FooterContext {
                    status_message: &self.status,
                    dirty: false,
                    error_count: usize::from(self.error.is_some()),
                    help: options.show_help.then_some(HELP_TEXT),
                },
            },
        );
    }

    fn execute(
        client: ApiClient,
        request: CustomersRequest,
        options: RequestOptions,
    ) -> impl Future<Output = CustomersMsg> + Send + 'static {
        async move {
            match request {
                CustomersRequest::FetchList => CustomersMsg::Loaded(
                    client.get_users(&ListParams::default(), options).await,
                ),
            }
        }
    }
}

/// Customers list view.
#[derive(Debug, Clone)]
pub struct CustomersView {
    client: ApiClient,
    options: UiOptions,
}

impl CustomersView {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            options: UiOptions::default(),
        }
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    pub fn run(self) -> Result<()> {
        run_screen(&self.client, &self.options, CustomersScreen::new())
    }
}
