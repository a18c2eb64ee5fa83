use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    api::{
        ApiClient, ApiConfig, ApiError, HttpRequest, HttpResponse, HttpTransport, Method, Post,
        RequestOptions, TransportError, UpdatePost,
    },
    app::lists::{ListScreen, PostsMsg, PostsRequest, PostsScreen},
    query::{QueryState, posts},
};

fn post(id: u64) -> Post {
    Post {
        id,
        title: format!("title {id}"),
        body: format!("body {id}"),
        user_id: 1,
    }
}

fn press(screen: &mut PostsScreen, code: KeyCode) -> Option<PostsRequest> {
    screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(screen: &mut PostsScreen, text: &str) {
    for ch in text.chars() {
        assert_eq!(press(screen, KeyCode::Char(ch)), None);
    }
}

fn loaded(count: u64) -> PostsScreen {
    let mut screen = PostsScreen::new();
    assert_eq!(screen.mount(), Some(PostsRequest::FetchList));
    let follow_up = screen.apply(PostsMsg::Loaded(Ok((1..=count).map(post).collect())));
    assert_eq!(follow_up, None);
    screen
}

#[test]
fn mount_fetches_and_shows_loading() {
    let mut screen = PostsScreen::new();
    assert_eq!(screen.mount(), Some(PostsRequest::FetchList));
    assert!(screen.state().is_loading());
    assert_eq!(screen.mount(), None, "a running fetch is not duplicated");
}

#[test]
fn loaded_posts_are_paged_by_ten() {
    let mut screen = loaded(25);
    assert_eq!(screen.page_rows().len(), 10);
    assert_eq!(screen.summary(), "Showing 1 to 10 of 25 posts");

    press(&mut screen, KeyCode::Right);
    press(&mut screen, KeyCode::Right);
    assert_eq!(screen.page(), 3);
    assert_eq!(screen.page_rows().len(), 5);
    assert_eq!(screen.summary(), "Showing 21 to 25 of 25 posts");

    press(&mut screen, KeyCode::Right);
    assert_eq!(screen.page(), 3);
    press(&mut screen, KeyCode::Left);
    assert_eq!(screen.page(), 2);
    assert_eq!(screen.selected_post().map(|post| post.id), Some(11));
}

#[test]
fn delete_asks_then_patches_the_cache() {
    let mut screen = loaded(3);
    press(&mut screen, KeyCode::Down);
    assert_eq!(press(&mut screen, KeyCode::Char('d')), None);
    assert_eq!(screen.pending_delete(), Some(2));

    assert_eq!(press(&mut screen, KeyCode::Char('n')), None);
    assert_eq!(screen.pending_delete(), None);

    press(&mut screen, KeyCode::Char('d'));
    assert_eq!(
        press(&mut screen, KeyCode::Char('y')),
        Some(PostsRequest::Delete(2))
    );
    assert_eq!(screen.apply(PostsMsg::Deleted(2, Ok(()))), None);

    let ids: Vec<u64> = screen
        .state()
        .data()
        .expect("posts")
        .iter()
        .map(|post| post.id)
        .collect();
    assert_eq!(ids, vec![1, 3]);
    assert!(!screen.cache().contains(&posts::detail_key(2)));
    assert_eq!(screen.status(), "Post deleted");
}

#[test]
fn deleting_the_last_row_of_a_page_moves_back() {
    let mut screen = loaded(11);
    press(&mut screen, KeyCode::Right);
    assert_eq!(screen.page(), 2);
    press(&mut screen, KeyCode::Char('d'));
    assert_eq!(
        press(&mut screen, KeyCode::Enter),
        Some(PostsRequest::Delete(11))
    );
    screen.apply(PostsMsg::Deleted(11, Ok(())));
    assert_eq!(screen.page(), 1);
    assert_eq!(screen.page_rows().len(), 10);
}

#[test]
fn create_validates_then_prepends() {
    let mut screen = loaded(2);
    press(&mut screen, KeyCode::Char('n'));
    assert_eq!(screen.editor().and_then(|editor| editor.target()), None);

    assert_eq!(press(&mut screen, KeyCode::Enter), None);
    assert_eq!(
        screen.editor().and_then(|editor| editor.error()),
        Some("Title is required")
    );

    type_text(&mut screen, "Hello");
    press(&mut screen, KeyCode::Tab);
    type_text(&mut screen, "World");
    let request = press(&mut screen, KeyCode::Enter).expect("create request");
    let body = match request {
        PostsRequest::Create(body) => body,
        other => panic!("expected a create request, got {other:?}"),
    };
    assert_eq!(body.title, "Hello");
    assert_eq!(body.body, "World");
    assert_eq!(body.user_id, 1);
    assert!(screen.editor().is_some_and(|editor| editor.is_saving()));

    let created = Post {
        id: 101,
        title: body.title,
        body: body.body,
        user_id: body.user_id,
    };
    screen.apply(PostsMsg::Created(Ok(created)));
    assert!(screen.editor().is_none());
    assert_eq!(screen.page_rows().first().map(|post| post.id), Some(101));
    assert_eq!(screen.summary(), "Showing 1 to 3 of 3 posts");
}

#[test]
fn edit_sends_a_full_update() {
    let mut screen = loaded(2);
    press(&mut screen, KeyCode::Char('e'));
    assert_eq!(screen.editor().and_then(|editor| editor.target()), Some(1));
    type_text(&mut screen, "!");

    let request = press(&mut screen, KeyCode::Enter);
    assert_eq!(
        request,
        Some(PostsRequest::Update(
            1,
            UpdatePost {
                title: Some("title 1!".into()),
                body: Some("body 1".into()),
                user_id: Some(1),
            }
        ))
    );

    let mut updated = post(1);
    updated.title = "title 1!".into();
    screen.apply(PostsMsg::Updated(1, Ok(updated.clone())));
    assert_eq!(screen.selected_post(), Some(updated));
    assert!(screen.cache().contains(&posts::detail_key(1)));
}

#[test]
fn failed_mutation_keeps_the_editor_open() {
    let mut screen = loaded(1);
    press(&mut screen, KeyCode::Char('n'));
    type_text(&mut screen, "T");
    press(&mut screen, KeyCode::Tab);
    type_text(&mut screen, "B");
    assert!(press(&mut screen, KeyCode::Enter).is_some());

    screen.apply(PostsMsg::Created(Err(ApiError::from_response(
        422,
        r#"{"message":"title taken"}"#,
    ))));
    let editor = screen.editor().expect("editor stays open");
    assert!(!editor.is_saving());
    assert_eq!(editor.error(), Some("Error creating post: title taken"));
}

#[test]
fn load_error_then_retry() {
    let mut screen = PostsScreen::new();
    screen.mount();
    assert_eq!(screen.apply(PostsMsg::Loaded(Err(ApiError::network()))), None);
    assert!(matches!(screen.state(), QueryState::Error(_)));

    assert_eq!(
        press(&mut screen, KeyCode::Char('r')),
        Some(PostsRequest::FetchList)
    );
    assert!(screen.state().is_loading());
    screen.apply(PostsMsg::Loaded(Ok(vec![post(1)])));
    assert_eq!(screen.state().data().map(Vec::len), Some(1));
}

#[test]
fn refresh_keeps_showing_cached_posts() {
    let mut screen = loaded(4);
    assert_eq!(
        press(&mut screen, KeyCode::Char('r')),
        Some(PostsRequest::FetchList)
    );
    assert!(matches!(
        screen.state(),
        QueryState::Success {
            refreshing: true,
            ..
        }
    ));
    assert_eq!(screen.status(), "Refreshing...");
}

#[test]
fn quit_keys_close_the_screen() {
    let mut screen = loaded(1);
    press(&mut screen, KeyCode::Char('q'));
    assert!(screen.should_quit());
}

#[derive(Default)]
struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    body: String,
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().expect("lock").push(request);
        Ok(HttpResponse {
            status: 200,
            body: self.body.clone(),
        })
    }
}

#[tokio::test]
async fn execute_maps_requests_to_endpoints() {
    let transport = Arc::new(RecordingTransport {
        body: r#"[{"id":1,"title":"a","body":"b","userId":7}]"#.to_string(),
        ..RecordingTransport::default()
    });
    let client = ApiClient::with_transport(ApiConfig::default(), transport.clone());

    let msg = PostsScreen::execute(client.clone(), PostsRequest::FetchList, RequestOptions::new())
        .await;
    let list = match msg {
        PostsMsg::Loaded(Ok(list)) => list,
        other => panic!("unexpected message {other:?}"),
    };
    assert_eq!(list[0].user_id, 7);

    let transport_for_delete = Arc::new(RecordingTransport {
        body: "{}".to_string(),
        ..RecordingTransport::default()
    });
    let client = ApiClient::with_transport(ApiConfig::default(), transport_for_delete.clone());
    let msg = PostsScreen::execute(client, PostsRequest::Delete(3), RequestOptions::new()).await;
    assert!(matches!(msg, PostsMsg::Deleted(3, Ok(()))));

    let requests = transport_for_delete.requests.lock().expect("lock");
    assert_eq!(requests[0].method, Method::Delete);
    assert!(requests[0].url.ends_with("/posts/3"));
    let first = transport.requests.lock().expect("lock");
    assert_eq!(first[0].method, Method::Get);
    assert!(first[0].url.ends_with("/posts"));
}
