// Integration tests for usercore

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use usercore::app::update::{Effect, handle_key};
use usercore::app::{AppState, InputMode, ModalState};
use usercore::error::LoadError;
use usercore::model::User;

const LEANNE_JSON: &str = r#"[
  {
    "id": 1,
    "name": "Leanne Graham",
    "username": "Bret",
    "email": "Sincere@april.biz",
    "address": { "street": "Kulas Light", "suite": "Apt. 556", "city": "Gwenborough", "zipcode": "92998-3874",
                 "geo": { "lat": "-37.3159", "lng": "81.1496" } },
    "phone": "1-770-736-8031 x56442",
    "website": "hildegard.org",
    "company": { "name": "Romaguera-Crona", "catchPhrase": "Multi-layered client-server neural-net", "bs": "harness real-time e-markets" }
  },
  {
    "id": 2,
    "name": "Ervin Howell",
    "username": "Antonette",
    "email": "Shanna@melissa.tv",
    "address": { "street": "Victor Plains", "suite": "Suite 879", "city": "Wisokyburgh", "zipcode": "90566-7771" },
    "phone": "010-692-6593 x09125",
    "website": "anastasia.net",
    "company": { "name": "Deckow-Crist", "catchPhrase": "Proactive didactic contingency" }
  }
]"#;

fn temp_path(tag: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nonce = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    path.push(format!("usercore_{}_{}_{}.conf", tag, std::process::id(), nonce));
    path
}

fn press(app: &mut AppState, code: KeyCode) -> Effect {
    handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(app: &mut AppState, s: &str) {
    for c in s.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn loaded_app() -> AppState {
    let mut app = AppState::default();
    let users = usercore::loader::parse_users(LEANNE_JSON.as_bytes()).unwrap();
    app.apply_load_result(Ok(users));
    app
}

// 1) Theme config roundtrip and init
#[test]
fn theme_roundtrip_and_init() {
    use usercore::app::Theme;

    let path = temp_path("theme");
    let t = Theme::dark();
    t.write_file(&path).expect("write theme");
    let t2 = Theme::from_file(&path).expect("read theme");
    assert_eq!(format!("{:?}", t2.text), format!("{:?}", ratatui::style::Color::Rgb(0xB3, 0xB3, 0xB3)));
    assert_eq!(format!("{:?}", t2.highlight_bg), format!("{:?}", ratatui::style::Color::Reset));

    let init = temp_path("theme_init");
    let _ = std::fs::remove_file(&init);
    let _created = Theme::load_or_init(&init);
    assert!(init.exists());

    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(&init);
}

// 2) Keybinds file written by defaults parses back to the same resolutions
#[test]
fn keybinds_file_roundtrip() {
    use usercore::app::keymap::{KeyAction, Keymap};

    let path = temp_path("keys");
    Keymap::default().write_file(&path).expect("write keybinds");
    let km = Keymap::from_file(&path).expect("read keybinds");
    for (code, action) in [
        (KeyCode::Char('n'), KeyAction::NewUser),
        (KeyCode::Char('r'), KeyAction::Refresh),
        (KeyCode::Enter, KeyAction::ViewSelection),
    ] {
        assert_eq!(km.resolve(&KeyEvent::new(code, KeyModifiers::NONE)), Some(action));
    }
    let _ = std::fs::remove_file(&path);
}

// 3) Loader against a mock HTTP server
#[tokio::test]
async fn loader_fetches_and_normalizes_users() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(LEANNE_JSON, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let loader = usercore::loader::RemoteLoader::new(format!("{}/users", server.uri()));
    let users = loader.fetch_all().await.expect("fetch users");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].name, "Leanne Graham");
    assert_eq!(users[1].image_url, "https://picsum.photos/seed/2/400");
}

#[tokio::test]
async fn loader_reports_non_success_status() {
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let loader = usercore::loader::RemoteLoader::new(format!("{}/users", server.uri()));
    let err = loader.fetch_all().await.unwrap_err();
    assert!(matches!(err, LoadError::Status { status: 500 }));
}

#[tokio::test]
async fn loader_reports_transport_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let loader = usercore::loader::RemoteLoader::new(format!("http://127.0.0.1:{port}/users"));
    let err = loader.fetch_all().await.unwrap_err();
    assert!(matches!(err, LoadError::Http(_)));
}

#[tokio::test]
async fn spawned_fetch_delivers_result_over_channel() {
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(LEANNE_JSON, "application/json"))
        .mount(&server)
        .await;

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let loader = usercore::loader::RemoteLoader::new(server.uri());
    usercore::loader::spawn_fetch(&tokio::runtime::Handle::current(), loader, tx);
    let result = rx.recv().await.expect("result delivered");

    let mut app = AppState::default();
    app.begin_refresh();
    app.apply_load_result(result);
    assert!(!app.store.is_loading());
    assert_eq!(app.store.users().len(), 2);
}

// 4) Add flow through the form: invalid submit stays open, valid submit prepends
#[test]
fn add_user_through_form() {
    let mut app = loaded_app();
    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.input_mode, InputMode::Modal);

    // Empty submit is rejected and never reaches the store
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.store.users().len(), 2);
    match &app.modal {
        Some(ModalState::Form(form)) => assert_eq!(form.errors.len(), 3),
        other => panic!("expected form, got {other:?}"),
    }

    type_text(&mut app, "A");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "a");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "a@a.com");
    press(&mut app, KeyCode::Enter);

    assert!(app.modal.is_none());
    assert_eq!(app.store.users().len(), 3);
    let first = &app.store.users()[0];
    assert_eq!(first.name, "A");
    assert_eq!(first.image_url, usercore::model::image_url_for(first.id));
    assert!(app.store.users()[1..].iter().all(|u| u.id != first.id));
    assert_eq!(app.toast.as_ref().map(|t| t.message.as_str()), Some("Member added successfully"));
}

// 5) Delete flow with confirmation
#[test]
fn delete_user_after_confirmation() {
    let mut app = loaded_app();
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char('d'));
    assert!(matches!(app.modal, Some(ModalState::DeleteConfirm { id: 2, .. })));
    press(&mut app, KeyCode::Enter);

    let ids: Vec<u64> = app.store.users().iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1]);
    assert_eq!(app.selected_index, 0);
    assert_eq!(app.toast.as_ref().map(|t| t.message.as_str()), Some("Member removed from team"));
}

// 6) Search from the keyboard narrows the view; the selection follows it
#[test]
fn search_narrows_view_and_resets_selection() {
    let mut app = loaded_app();
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "ROMAGUERA");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.store.search_term(), "ROMAGUERA");
    assert_eq!(app.selected_user().map(|u| u.id), Some(1));

    press(&mut app, KeyCode::Char('c'));
    assert_eq!(app.store.filtered_view().len(), 2);
}

// 7) A failed reload keeps stale records and can be retried
#[test]
fn failed_reload_keeps_stale_data() {
    let mut app = loaded_app();
    assert_eq!(press(&mut app, KeyCode::Char('r')), Effect::Refresh);
    app.begin_refresh();
    app.apply_load_result(Err(LoadError::Status { status: 503 }));
    assert_eq!(app.store.users().len(), 2);
    assert!(app.store.error().is_some());
    assert!(!app.store.is_loading());

    app.begin_refresh();
    assert!(app.store.is_loading());
    app.apply_load_result(Ok(vec![User { id: 7, name: "Only".to_string(), ..Default::default() }]));
    assert!(app.store.error().is_none());
    assert_eq!(app.store.users().len(), 1);
}

// 8) Rendering smoke test with an in-memory backend
#[test]
fn renders_table_and_details() {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    let mut app = loaded_app();
    let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
    terminal.draw(|f| usercore::ui::render(f, &mut app)).unwrap();
    let screen: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect();
    assert!(screen.contains("Leanne Graham"));
    assert!(screen.contains("Romaguera-Crona"));
    assert!(screen.contains("2 Active"));

    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "zzz");
    terminal.draw(|f| usercore::ui::render(f, &mut app)).unwrap();
    let screen: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect();
    assert!(screen.contains("No results found"));
}

// 9) Local edits stay allowed while a load is pending; the load then replaces the list
#[test]
fn crud_during_pending_load_then_load_wins() {
    use usercore::model::NewUser;

    let mut app = loaded_app();
    app.begin_refresh();
    let id = app.store.add(NewUser { name: "Local".to_string(), ..Default::default() });
    assert!(app.store.is_loading());
    assert_eq!(app.store.users().len(), 3);
    assert_eq!(app.store.users()[0].id, id);
    assert!(app.store.delete(2));
    assert!(app.store.is_loading());

    app.apply_load_result(Ok(vec![User { id: 7, name: "Remote".to_string(), ..Default::default() }]));
    assert!(!app.store.is_loading());
    let ids: Vec<u64> = app.store.users().iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![7]);
}

// 10) Overlapping loads are applied in completion order
#[test]
fn overlapping_loads_last_completion_wins() {
    let mut app = loaded_app();
    app.begin_refresh();
    app.begin_refresh();
    app.apply_load_result(Ok(vec![User { id: 10, name: "First".to_string(), ..Default::default() }]));
    app.apply_load_result(Ok(vec![
        User { id: 20, name: "Second".to_string(), ..Default::default() },
        User { id: 21, name: "Second too".to_string(), ..Default::default() },
    ]));
    let ids: Vec<u64> = app.store.users().iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![20, 21]);

    // A late failure keeps the newest records and only sets the error
    app.apply_load_result(Err(LoadError::Status { status: 502 }));
    assert_eq!(app.store.users().len(), 2);
    assert_eq!(app.store.error(), Some("Failed to fetch users (status 502)"));
}
