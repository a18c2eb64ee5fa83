use std::future::Future;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;

use crate::{
    api::{ApiClient, ApiError, CreatePost, ListParams, Post, RequestOptions, UpdatePost},
    app::{
        input::{KeyCommand, classify_prompt, edit_buffer},
        options::UiOptions,
    },
    presentation::{self, EditorRender, FooterContext, PostsContext, PromptRender},
    query::{QueryCache, QueryKey, QueryState, posts},
};

use super::{ListScreen, pagination::Pager, run_screen};

const HELP_TEXT: &str =
    "↑/↓ select • ←/→ page • n new • e edit • d delete • r refresh • q back";
const EDITOR_LABELS: [&str; 3] = ["Title", "Body", "User ID"];
const DELETE_PROMPT: PromptRender<'static> = PromptRender {
    title: "Delete Post",
    message: "Are you sure you want to delete this post?",
    confirm_label: "Delete",
};

#[derive(Debug)]
pub(crate) enum PostsMsg {
    Loaded(Result<Vec<Post>, ApiError>),
    Created(Result<Post, ApiError>),
    Updated(u64, Result<Post, ApiError>),
    Deleted(u64, Result<(), ApiError>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PostsRequest {
    FetchList,
    Create(CreatePost),
    Update(u64, UpdatePost),
    Delete(u64),
}

/// Create/edit dialog for one post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostEditor {
    /// `None` while creating.
    target: Option<u64>,
    fields: [String; 3],
    focused: usize,
    error: Option<String>,
    saving: bool,
}

impl PostEditor {
    pub(crate) fn create() -> Self {
        Self {
            target: None,
            fields: [String::new(), String::new(), "1".to_string()],
            focused: 0,
            error: None,
            saving: false,
        }
    }

    pub(crate) fn edit(post: &Post) -> Self {
        Self {
            target: Some(post.id),
            fields: [post.title.clone(), post.body.clone(), post.user_id.to_string()],
            focused: 0,
            error: None,
            saving: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn target(&self) -> Option<u64> {
        self.target
    }

    #[cfg(test)]
    pub(crate) fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn is_saving(&self) -> bool {
        self.saving
    }

    fn title(&self) -> &'static str {
        match self.target {
            Some(_) => "Edit Post",
            None => "Create Post",
        }
    }

    fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.fields.len();
    }

    fn focus_prev(&mut self) {
        self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
    }

    fn edit_focused(&mut self, key: &KeyEvent) {
        if edit_buffer(&mut self.fields[self.focused], key) {
            self.error = None;
        }
    }

    /// Checks the inputs and builds the request body.
    fn build(&self) -> Result<CreatePost, String> {
        let title = self.fields[0].trim();
        let body = self.fields[1].trim();
        if title.is_empty() {
            return Err("Title is required".to_string());
        }
        if body.is_empty() {
            return Err("Body is required".to_string());
        }
        let user_id = match self.fields[2].trim().parse::<u64>() {
            Ok(id) if id >= 1 => id,
            _ => return Err("User ID must be a positive number".to_string()),
        };
        Ok(CreatePost {
            title: title.to_string(),
            body: body.to_string(),
            user_id,
        })
    }

    fn as_render(&self) -> EditorRender<'_> {
        EditorRender {
            title: if self.saving { "Saving..." } else { self.title() },
            fields: EDITOR_LABELS
                .iter()
                .zip(self.fields.iter())
                .map(|(label, value)| (*label, value.as_str()))
                .collect(),
            focused: self.focused,
            error: self.error.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Overlay {
    None,
    Editor(PostEditor),
    ConfirmDelete(u64),
}

pub(crate) struct PostsScreen {
    cache: QueryCache,
    fetching: bool,
    error: Option<ApiError>,
    pager: Pager,
    selected: usize,
    overlay: Overlay,
    status: String,
    should_quit: bool,
}

impl Default for PostsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl PostsScreen {
    pub(crate) fn new() -> Self {
        Self {
            cache: QueryCache::new(),
            fetching: false,
            error: None,
            pager: Pager::default(),
            selected: 0,
            overlay: Overlay::None,
            status: "Loading posts...".to_string(),
            should_quit: false,
        }
    }

    fn list_key() -> QueryKey {
        posts::list_key(&ListParams::default())
    }

    fn all_posts(&self) -> Vec<Post> {
        self.cache.get(&Self::list_key()).unwrap_or_default()
    }

    #[cfg(test)]
    pub(crate) fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub(crate) fn state(&self) -> QueryState<Vec<Post>> {
        QueryState::resolve(
            self.cache.get(&Self::list_key()),
            self.fetching,
            self.error.as_ref(),
        )
    }

    pub(crate) fn page_rows(&self) -> Vec<Post> {
        let all = self.all_posts();
        let range = self.pager.range(all.len());
        all[range].to_vec()
    }

    pub(crate) fn summary(&self) -> String {
        self.pager.summary(self.all_posts().len(), "posts")
    }

    #[cfg(test)]
    pub(crate) fn page(&self) -> usize {
        self.pager.page()
    }

    pub(crate) fn selected_post(&self) -> Option<Post> {
        self.page_rows().get(self.selected).cloned()
    }

    pub(crate) fn editor(&self) -> Option<&PostEditor> {
        match &self.overlay {
            Overlay::Editor(editor) => Some(editor),
            _ => None,
        }
    }

    pub(crate) fn pending_delete(&self) -> Option<u64> {
        match self.overlay {
            Overlay::ConfirmDelete(id) => Some(id),
            _ => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn status(&self) -> &str {
        &self.status
    }

    fn refetch(&mut self) -> Option<PostsRequest> {
        if self.fetching {
            return None;
        }
        self.fetching = true;
        self.status = "Refreshing...".to_string();
        Some(PostsRequest::FetchList)
    }

    fn refetch_if_stale(&mut self) -> Option<PostsRequest> {
        if self.cache.is_stale(&Self::list_key()) && self.error.is_none() {
            self.refetch()
        } else {
            None
        }
    }

    fn clamp_selection(&mut self) {
        let total = self.all_posts().len();
        self.pager.clamp(total);
        let rows = self.pager.range(total).len();
        self.selected = self.selected.min(rows.saturating_sub(1));
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<PostsRequest> {
        let total = self.all_posts().len();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') => return self.refetch(),
            KeyCode::Down | KeyCode::Char('j') => {
                let rows = self.pager.range(total).len();
                if rows > 0 {
                    self.selected = (self.selected + 1).min(rows - 1);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Right | KeyCode::PageDown => {
                if self.pager.next(total) {
                    self.selected = 0;
                }
            }
            KeyCode::Left | KeyCode::PageUp => {
                if self.pager.prev() {
                    self.selected = 0;
                }
            }
            KeyCode::Char('n') => self.overlay = Overlay::Editor(PostEditor::create()),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(post) = self.selected_post() {
                    self.overlay = Overlay::Editor(PostEditor::edit(&post));
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(post) = self.selected_post() {
                    self.overlay = Overlay::ConfirmDelete(post.id);
                }
            }
            _ => {}
        }
        None
    }

    fn handle_editor_key(&mut self, key: KeyEvent) -> Option<PostsRequest> {
        let Overlay::Editor(editor) = &mut self.overlay else {
            return None;
        };
        if editor.saving {
            return None;
        }
        let submit = key.code == KeyCode::Enter
            || (key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('s') | KeyCode::Char('S')));
        if submit {
            return match editor.build() {
                Ok(request) => {
                    editor.saving = true;
                    editor.error = None;
                    Some(match editor.target {
                        Some(id) => PostsRequest::Update(
                            id,
                            UpdatePost {
                                title: Some(request.title),
                                body: Some(request.body),
                                user_id: Some(request.user_id),
                            },
                        ),
                        None => PostsRequest::Create(request),
                    })
                }
                Err(message) => {
                    editor.error = Some(message);
                    None
                }
            };
        }
        match key.code {
            KeyCode::Esc => self.overlay = Overlay::None,
            KeyCode::Tab | KeyCode::Down => editor.focus_next(),
            KeyCode::BackTab | KeyCode::Up => editor.focus_prev(),
            _ => editor.edit_focused(&key),
        }
        None
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, id: u64) -> Option<PostsRequest> {
        match classify_prompt(&key) {
            KeyCommand::Confirm => {
                self.overlay = Overlay::None;
                self.status = "Deleting...".to_string();
                Some(PostsRequest::Delete(id))
            }
            KeyCommand::Cancel => {
                self.overlay = Overlay::None;
                None
            }
            _ => None,
        }
    }

    fn mutation_failed(&mut self, action: &str, err: ApiError) {
        tracing::warn!(error = %err, action, "post mutation failed");
        let message = format!("Error {action} post: {}", err.message);
        if let Overlay::Editor(editor) = &mut self.overlay {
            editor.saving = false;
            editor.error = Some(message.clone());
        }
        self.status = message;
    }

    fn close_editor(&mut self) {
        if matches!(self.overlay, Overlay::Editor(_)) {
            self.overlay = Overlay::None;
        }
    }
}

impl ListScreen for PostsScreen {
    type Msg = PostsMsg;
    type Request = PostsRequest;

    fn mount(&mut self) -> Option<PostsRequest> {
        self.refetch_if_stale()
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<PostsRequest> {
        match self.overlay {
            Overlay::None => self.handle_list_key(key),
            Overlay::Editor(_) => self.handle_editor_key(key),
            Overlay::ConfirmDelete(id) => self.handle_confirm_key(key, id),
        }
    }

    fn apply(&mut self, msg: PostsMsg) -> Option<PostsRequest> {
        match msg {
            PostsMsg::Loaded(Ok(list)) => {
                self.fetching = false;
                self.error = None;
                if let Err(err) = self.cache.set(Self::list_key(), &list) {
                    tracing::warn!(error = %err, "failed to cache posts");
                }
                self.status = format!("{} posts", list.len());
            }
            PostsMsg::Loaded(Err(err)) => {
                self.fetching = false;
                if !err.is_cancelled() {
                    tracing::warn!(error = %err, "failed to load posts");
                    self.status = err.message.clone();
                    self.error = Some(err);
                }
            }
            PostsMsg::Created(Ok(post)) => {
                if let Err(err) = posts::on_create(&mut self.cache, &post) {
                    tracing::warn!(error = %err, "failed to patch posts cache");
                }
                self.close_editor();
                self.status = "Post created".to_string();
            }
            PostsMsg::Updated(_, Ok(post)) => {
                if let Err(err) = posts::on_update(&mut self.cache, &post) {
                    tracing::warn!(error = %err, "failed to patch posts cache");
                }
                self.close_editor();
                self.status = "Post updated".to_string();
            }
            PostsMsg::Deleted(id, Ok(())) => {
                if let Err(err) = posts::on_delete(&mut self.cache, id) {
                    tracing::warn!(error = %err, "failed to patch posts cache");
                }
                self.status = "Post deleted".to_string();
            }
            PostsMsg::Created(Err(err)) => self.mutation_failed("creating", err),
            PostsMsg::Updated(_, Err(err)) => self.mutation_failed("updating", err),
            PostsMsg::Deleted(_, Err(err)) => self.mutation_failed("deleting", err),
        }
        self.clamp_selection();
        self.refetch_if_stale()
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn draw(&self, frame: &mut Frame<'_>, options: &UiOptions) {
        let state = self.state();
        let page_rows = self.page_rows();
        let summary = self.summary();
        let total = self.all_posts().len();
        let page_window = self.pager.window(total);
        let prompt = self.pending_delete().map(|_| DELETE_PROMPT);
        presentation::draw_posts(
            frame,
            PostsContext {
                state: &state,
                page_rows: &page_rows,
                summary: &summary,
                page: self.pager.page(),
                total_pages: self.pager.total_pages(total),
                page_window: &page_window,
                selected: self.selected,
                editor: self.editor().map(PostEditor::as_render),
                prompt,
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
        request: PostsRequest,
        options: RequestOptions,
    ) -> impl Future<Output = PostsMsg> + Send + 'static {
        async move {
            match request {
                PostsRequest::FetchList => {
                    PostsMsg::Loaded(client.get_posts(&ListParams::default(), options).await)
                }
                PostsRequest::Create(body) => {
                    PostsMsg::Created(client.create_post(&body, options).await)
                }
                PostsRequest::Update(id, body) => {
                    PostsMsg::Updated(id, client.update_post(id, &body, options).await)
                }
                PostsRequest::Delete(id) => {
                    PostsMsg::Deleted(id, client.delete_post(id, options).await)
                }
            }
        }
    }
}

/// Posts list view with paging and create/edit/delete.
#[derive(Debug, Clone)]
pub struct PostsView {
    client: ApiClient,
    options: UiOptions,
}

impl PostsView {
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
        run_screen(&self.client, &self.options, PostsScreen::new())
    }
}
