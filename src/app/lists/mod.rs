//! REST-backed list screens: customers and posts.

mod customers;
mod fetch;
mod pagination;
mod posts;

use std::future::Future;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{Frame, layout::Rect};

use crate::api::{ApiClient, RequestOptions};

use self::fetch::Fetcher;
use super::{options::UiOptions, terminal::TerminalGuard};

pub use customers::CustomersView;
pub use posts::PostsView;

#[cfg(test)]
pub(crate) use customers::{CustomersMsg, CustomersRequest, CustomersScreen};
#[cfg(test)]
pub(crate) use posts::{PostsMsg, PostsRequest, PostsScreen};

/// A list screen split into pure state transitions and the request each
/// transition asks for. The runner owns the terminal and the network.
pub(crate) trait ListScreen {
    type Msg: Send + 'static;
    type Request;

    /// Request issued when the screen opens.
    fn mount(&mut self) -> Option<Self::Request>;
    fn handle_key(&mut self, key: KeyEvent) -> Option<Self::Request>;
    /// Applies a finished request; may ask for a follow-up refetch.
    fn apply(&mut self, msg: Self::Msg) -> Option<Self::Request>;
    fn should_quit(&self) -> bool;
    fn draw(&self, frame: &mut Frame<'_>, options: &UiOptions);

    fn execute(
        client: ApiClient,
        request: Self::Request,
        options: RequestOptions,
    ) -> impl Future<Output = Self::Msg> + Send + 'static;
}

pub(crate) fn run_screen<S: ListScreen>(
    client: &ApiClient,
    options: &UiOptions,
    mut screen: S,
) -> Result<()> {
    let mut fetcher = Fetcher::<S::Msg>::new()?;
    let submit = |fetcher: &Fetcher<S::Msg>, request: Option<S::Request>| {
        if let Some(request) = request {
            fetcher.spawn(S::execute(client.clone(), request, fetcher.options()));
        }
    };

    let mut terminal = TerminalGuard::new()?;
    submit(&fetcher, screen.mount());
    while !screen.should_quit() {
        for msg in fetcher.drain() {
            let follow_up = screen.apply(msg);
            submit(&fetcher, follow_up);
        }
        terminal.draw(|frame| screen.draw(frame, options))?;
        if !event::poll(options.tick_rate)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let request = screen.handle_key(key);
                submit(&fetcher, request);
            }
            Event::Resize(width, height) => {
                terminal.resize(Rect::new(0, 0, width, height))?;
            }
            _ => {}
        }
    }
    tracing::debug!("list screen closed; cancelling in-flight requests");
    Ok(())
}
