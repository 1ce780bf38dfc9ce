use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use zeroize::Zeroize;

use groupstudy::actions::{self, InviteOutcome};
use groupstudy::app::{App, AppScreen, Dialog, NotificationLevel, RoomFormField, Tab};
use groupstudy::client::{StudyApi, StudyClient};
use groupstudy::error::ApiError;
use groupstudy::routes::{self, Route};
use groupstudy::{config, logging, session, ui};

/// Terminal client for group study rooms.
#[derive(Parser, Debug)]
#[command(name = "groupstudy", version, about)]
struct Cli {
    /// Accept a group invite: an invite link, an invite route or a group id
    #[arg(long, value_name = "LINK")]
    invite: Option<String>,

    /// Sign in with email and password before starting
    #[arg(long)]
    login: bool,

    /// Clear the stored session securely
    #[arg(long)]
    logout: bool,

    /// Override the API base URL from the config file
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.logout {
        session::clear_session()?;
        println!("Session cleared from the OS credential store.");
        return Ok(());
    }

    let mut config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(());
        }
    };
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    let _log_guard = logging::init(&config.log_level)?;
    tracing::info!(api = %config.api_base_url, "starting groupstudy");

    let mut invite = match cli.invite.as_deref() {
        Some(raw) => match routes::parse_invite_target(raw) {
            Some(id) => Some(id),
            None => {
                eprintln!("Error: '{}' is not an invite link or group id", raw);
                return Ok(());
            }
        },
        None => None,
    };

    let http_client = reqwest::Client::new();

    if cli.login {
        let s = login_interactive(&http_client, &config).await?;
        session::store_session(&s)?;
        println!("  Signed in! Session stored securely.\n");
        if invite.is_none() {
            invite = session::take_pending_invite()?
                .as_deref()
                .and_then(routes::parse_invite_target);
        }
    }

    let stored = session::load_session()?;

    // Restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let token = stored
        .as_ref()
        .map(|s| s.access_token.clone())
        .unwrap_or_default();
    let api = StudyClient::with_client(http_client, &config.api_base_url, token);

    let mut app = App::new();
    app.web_base_url = config.web_base_url.clone();
    app.refresh_interval = config.refresh_interval();
    app.current_user = stored.as_ref().map(|s| s.user.clone());

    let result = run_app(&mut terminal, &mut app, &api, invite).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    if let Err(ref e) = result {
        eprintln!("Error: {}", e);
    }
    if app.route == Route::Login {
        println!("Sign in with: groupstudy --login");
    }

    result
}

async fn login_interactive(
    client: &reqwest::Client,
    config: &config::Config,
) -> Result<session::Session> {
    println!("\n  Sign in to {}\n", config.api_base_url);
    let email = prompt("  Email: ")?;
    let mut password = prompt("  Password: ")?;
    let result = session::login(client, &config.api_base_url, &email, &password).await;
    password.zeroize();
    result
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Could not read from stdin")?;
    Ok(line.trim().to_string())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    api: &StudyClient,
    invite: Option<i64>,
) -> Result<()> {
    if app.current_user.is_none() {
        if let Some(group_id) = invite {
            if let InviteOutcome::LoginRequired { link } =
                actions::accept_invite(api, app, group_id).await
            {
                session::save_pending_invite(&link)?;
                tracing::info!(group_id, "invite saved until sign-in");
            }
        }
        app.navigate(Route::Login);
        app.screen = AppScreen::Main;
        terminal.draw(|f| ui::draw(f, app))?;
        wait_for_key();
        return Ok(());
    }

    app.screen = AppScreen::Loading {
        message: "그룹 목록을 불러오는 중...".to_string(),
    };
    terminal.draw(|f| ui::draw(f, app))?;

    // Refresh the profile; an expired token shows the login screen
    match api.current_user().await {
        Ok(user) => app.current_user = Some(user),
        Err(ApiError::Unauthorized) => {
            app.notify(NotificationLevel::Error, "세션 만료", "다시 로그인해주세요.");
            app.navigate(Route::Login);
        }
        Err(e) => tracing::warn!(error = %e, "could not refresh profile, using stored one"),
    }

    if app.route != Route::Login {
        actions::load_my_groups(api, app).await;
        app.screen = AppScreen::Main;
        if let Some(group_id) = invite {
            app.navigate(Route::Invite(group_id));
            terminal.draw(|f| ui::draw(f, app))?;
            actions::accept_invite(api, app, group_id).await;
        }
    } else {
        app.screen = AppScreen::Main;
    }
    app.mark_refreshed();

    // Main event loop
    loop {
        app.expire_notification(Instant::now());
        app.apply_due_redirect(Instant::now());
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Ctrl+C always quits
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    break;
                }

                if handle_key(api, app, key).await {
                    break;
                }
            }
        }

        // Auto-refresh room occupancy
        if app.route == Route::Groups
            && app.dialog == Dialog::None
            && !app.loading
            && app.should_refresh()
        {
            actions::refresh_rooms_quietly(api, app).await;
        }
    }

    Ok(())
}

/// Returns true when the app should quit.
async fn handle_key(api: &StudyClient, app: &mut App, key: KeyEvent) -> bool {
    match app.route {
        Route::Login => return true,
        Route::Invite(_) => return false,
        Route::Room(_) => {
            match key.code {
                KeyCode::Char('q') => return true,
                KeyCode::Esc | KeyCode::Backspace => app.navigate(Route::Groups),
                _ => {}
            }
            return false;
        }
        Route::Groups => {}
    }

    match app.dialog {
        Dialog::None => {}
        Dialog::CreateGroup => {
            match key.code {
                KeyCode::Esc => app.close_dialog(),
                KeyCode::Enter => actions::create_group(api, app).await,
                KeyCode::Char(c) => app.group_name_input.insert_char(c),
                KeyCode::Backspace => app.group_name_input.delete_char(),
                KeyCode::Left => app.group_name_input.move_cursor_left(),
                KeyCode::Right => app.group_name_input.move_cursor_right(),
                _ => {}
            }
            return false;
        }
        Dialog::CreateRoom => {
            let on_name = app.room_form.focus == RoomFormField::Name;
            match key.code {
                KeyCode::Esc => app.close_dialog(),
                KeyCode::Enter => actions::create_room(api, app).await,
                KeyCode::Up | KeyCode::BackTab => app.room_form_prev_field(),
                KeyCode::Down | KeyCode::Tab => app.room_form_next_field(),
                KeyCode::Left if on_name => app.room_form.name.move_cursor_left(),
                KeyCode::Right if on_name => app.room_form.name.move_cursor_right(),
                KeyCode::Left => app.room_form_adjust(false),
                KeyCode::Right => app.room_form_adjust(true),
                KeyCode::Char(c) if on_name => app.room_form.name.insert_char(c),
                KeyCode::Backspace if on_name => app.room_form.name.delete_char(),
                _ => {}
            }
            return false;
        }
        Dialog::Members => {
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') => app.close_dialog(),
                KeyCode::Up | KeyCode::Char('k') => app.select_prev_member(),
                KeyCode::Down | KeyCode::Char('j') => app.select_next_member(),
                KeyCode::Char('r') => actions::load_group_members(api, app).await,
                KeyCode::Char('i') => {
                    if !app.open_member_invite_dialog() {
                        app.notify(
                            NotificationLevel::Info,
                            "알림",
                            "방장만 초대 링크를 공유할 수 있습니다.",
                        );
                    }
                }
                KeyCode::Char('x') => {
                    if !app.members.is_empty() && !app.request_remove_selected_member() {
                        app.notify(
                            NotificationLevel::Info,
                            "알림",
                            "방장만 다른 멤버를 추방할 수 있습니다.",
                        );
                    }
                }
                _ => {}
            }
            return false;
        }
        Dialog::ConfirmRemoveMember => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => actions::remove_member(api, app).await,
                KeyCode::Char('n') | KeyCode::Esc => app.close_dialog(),
                _ => {}
            }
            return false;
        }
        Dialog::ConfirmDeleteGroup(group_id) => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => actions::delete_group(api, app, group_id).await,
                KeyCode::Char('n') | KeyCode::Esc => app.close_dialog(),
                _ => {}
            }
            return false;
        }
        Dialog::InviteLink(_) => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                app.close_dialog();
            }
            return false;
        }
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab | KeyCode::BackTab => app.next_tab(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Char('r') => actions::refresh_all(api, app).await,
        KeyCode::Char('g') => app.open_create_group_dialog(),
        KeyCode::Char('c') => {
            if !app.open_create_room_dialog() {
                app.notify_error("먼저 그룹을 만들어주세요.");
            }
        }
        _ => match app.active_tab {
            Tab::Groups => handle_group_tab_key(api, app, key).await,
            Tab::Rooms => handle_room_tab_key(api, app, key).await,
        },
    }
    false
}

async fn handle_group_tab_key(api: &StudyClient, app: &mut App, key: KeyEvent) {
    let Some(group) = app.selected_group().cloned() else {
        return;
    };
    match key.code {
        KeyCode::Enter | KeyCode::Char('m') => actions::open_members(api, app, group).await,
        KeyCode::Char('i') => app.open_invite_dialog(group.id),
        KeyCode::Char('d') => app.dialog = Dialog::ConfirmDeleteGroup(group.id),
        KeyCode::Char('R') => actions::refresh_group_rooms(api, app, group.id).await,
        _ => {}
    }
}

async fn handle_room_tab_key(api: &StudyClient, app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            if let Some(room) = app.selected_room().cloned() {
                actions::join_room(api, app, &room).await;
            }
        }
        KeyCode::Char('f') if app.groups.len() > 1 => app.cycle_room_filter(),
        _ => {}
    }
}

fn wait_for_key() {
    loop {
        if let Ok(true) = event::poll(Duration::from_millis(100)) {
            if let Ok(Event::Key(key)) = event::read() {
                if key.kind == KeyEventKind::Press {
                    break;
                }
            }
        }
    }
}
