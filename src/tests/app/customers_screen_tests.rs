use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    api::{ApiError, ApiErrorKind, User},
    app::lists::{CustomersMsg, CustomersRequest, CustomersScreen, ListScreen},
    query::QueryState,
};

fn user(id: u64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
        username: name.to_lowercase(),
        email: format!("{}@example.com", name.to_lowercase()),
        address: Default::default(),
        phone: String::new(),
        website: String::new(),
        company: Default::default(),
    }
}

fn press(screen: &mut CustomersScreen, code: KeyCode) -> Option<CustomersRequest> {
    screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
}

#[test]
fn loads_then_moves_selection_within_bounds() {
    let mut screen = CustomersScreen::new();
    assert_eq!(screen.mount(), Some(CustomersRequest::FetchList));
    screen.apply(CustomersMsg::Loaded(Ok(vec![user(1, "Leanne"), user(2, "Ervin")])));
    assert_eq!(screen.state().data().map(Vec::len), Some(2));
    assert_eq!(screen.status(), "2 customers");

    press(&mut screen, KeyCode::Down);
    press(&mut screen, KeyCode::Down);
    assert_eq!(screen.selected(), 1);
    press(&mut screen, KeyCode::Up);
    press(&mut screen, KeyCode::Up);
    assert_eq!(screen.selected(), 0);
}

#[test]
fn server_error_shows_error_state_until_retry() {
    let mut screen = CustomersScreen::new();
    screen.mount();
    screen.apply(CustomersMsg::Loaded(Err(ApiError::from_response(503, ""))));
    match screen.state() {
        QueryState::Error(err) => assert_eq!(err.kind, ApiErrorKind::ServerError),
        other => panic!("expected error state, got {other:?}"),
    }
    assert_eq!(screen.status(), "Server error");

    assert_eq!(
        press(&mut screen, KeyCode::Char('r')),
        Some(CustomersRequest::FetchList)
    );
    assert_eq!(press(&mut screen, KeyCode::Char('r')), None);
    assert!(screen.state().is_loading());
}

#[test]
fn cancelled_load_is_not_an_error() {
    let mut screen = CustomersScreen::new();
    screen.mount();
    screen.apply(CustomersMsg::Loaded(Err(ApiError::cancelled())));
    assert!(screen.state().is_loading());
}

#[test]
fn empty_list_is_a_success() {
    let mut screen = CustomersScreen::new();
    screen.mount();
    screen.apply(CustomersMsg::Loaded(Ok(Vec::new())));
    assert_eq!(
        screen.state(),
        QueryState::Success {
            data: Vec::new(),
            refreshing: false
        }
    );
    press(&mut screen, KeyCode::Down);
    assert_eq!(screen.selected(), 0);
    press(&mut screen, KeyCode::Esc);
    assert!(screen.should_quit());
}
