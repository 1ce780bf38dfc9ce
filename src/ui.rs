use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::{App, AppScreen, Dialog, NotificationLevel, RoomFormField, Tab};
use crate::models::{GroupMember, StudyRoom};
use crate::routes::Route;

pub fn draw(frame: &mut Frame, app: &App) {
    match &app.screen {
        AppScreen::Loading { message } => draw_loading(frame, message),
        AppScreen::Main => match app.route {
            Route::Groups => draw_main(frame, app),
            Route::Room(room_id) => draw_room(frame, app, room_id),
            Route::Invite(_) => draw_loading(frame, "초대 링크 처리 중..."),
            Route::Login => draw_login_required(frame),
        },
    }
}

fn draw_loading(frame: &mut Frame, message: &str) {
    let area = frame.area();
    let block = Block::default()
        .title(" groupstudy ")
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .split(inner);

    let logo = Paragraph::new(vec![
        Line::from(Span::styled(
            "◆  그 룹 스 터 디",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "친구들과 그룹을 만들어 체계적으로 스터디를 진행하세요",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::Yellow))),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(logo, chunks[1]);
}

fn draw_login_required(frame: &mut Frame) {
    let area = frame.area();
    let popup = centered_rect(60, 8, area);
    frame.render_widget(Clear, popup);
    let text = vec![
        Line::from(Span::styled(
            "로그인이 필요합니다",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "그룹 스터디를 이용하려면 로그인해주세요",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            "groupstudy --login",
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "아무 키나 누르면 종료합니다",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let content = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(content, popup);
}

fn draw_main(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(1), // Tabs
            Constraint::Min(8),    // Body
            Constraint::Length(1), // Notification
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(frame, app, chunks[0]);
    draw_tabs(frame, app, chunks[1]);
    match app.active_tab {
        Tab::Groups => draw_group_list(frame, app, chunks[2]),
        Tab::Rooms => draw_room_list(frame, app, chunks[2]),
    }
    draw_notification(frame, app, chunks[3]);
    draw_status_bar(frame, app, chunks[4]);

    match app.dialog {
        Dialog::None => {}
        Dialog::CreateGroup => draw_create_group_dialog(frame, app),
        Dialog::CreateRoom => draw_create_room_dialog(frame, app),
        Dialog::Members => draw_members_dialog(frame, app),
        Dialog::ConfirmRemoveMember => {
            draw_members_dialog(frame, app);
            draw_confirm_remove_dialog(frame, app);
        }
        Dialog::ConfirmDeleteGroup(group_id) => draw_confirm_delete_dialog(frame, app, group_id),
        Dialog::InviteLink(group_id) => draw_invite_dialog(frame, app, group_id),
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let user_name = app
        .current_user
        .as_ref()
        .and_then(|u| u.username.as_deref())
        .unwrap_or("Unknown");

    let mut spans = vec![
        Span::styled(
            " ◆ 그룹 스터디 ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("  {} ", user_name),
            Style::default().fg(Color::Green),
        ),
    ];
    if app.loading {
        spans.push(Span::styled(" 처리 중...", Style::default().fg(Color::Yellow)));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let selected = match app.active_tab {
        Tab::Groups => 0,
        Tab::Rooms => 1,
    };
    let tabs = Tabs::new(vec![" 내 그룹 ", " 스터디 방 "])
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn draw_group_list(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" 내 그룹 ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.groups.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let empty = Paragraph::new(vec![
            Line::from("참여 중인 그룹이 없습니다"),
            Line::from(Span::styled(
                "g 를 눌러 첫 번째 그룹을 만들어보세요!",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let inner_height = block.inner(area).height as usize;
    let item_height = 3usize;
    let max_visible = inner_height / item_height;
    let scroll_start = if max_visible > 0 && app.selected_group >= max_visible {
        app.selected_group - max_visible + 1
    } else {
        0
    };

    let items: Vec<ListItem> = app
        .groups
        .iter()
        .enumerate()
        .skip(scroll_start)
        .take(max_visible.max(1))
        .map(|(i, group)| {
            let is_selected = i == app.selected_group;
            let name_style = if is_selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let indicator = if is_selected { "▸ " } else { "  " };
            let leader_badge = match app.current_user_id() {
                Some(id) if group.is_led_by(id) => " 방장",
                _ => "",
            };

            ListItem::new(Text::from(vec![
                Line::from(vec![
                    Span::styled(indicator, name_style),
                    Span::styled(group.group_name.clone(), name_style),
                    Span::styled(leader_badge, Style::default().fg(Color::Yellow)),
                ]),
                Line::from(vec![
                    Span::raw("    "),
                    Span::styled(
                        format!("생성일: {}", group.formatted_created_at()),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        format!("  활성 방 {}개", app.room_count(group.id)),
                        Style::default().fg(Color::Magenta),
                    ),
                ]),
                Line::from(""),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn draw_room_list(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.groups.len() > 1 {
        format!(" 스터디 방 │ 그룹 필터: {} ", app.room_filter_label())
    } else {
        " 스터디 방 ".to_string()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let rooms = app.visible_rooms();
    if rooms.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let hint = if app.room_filter == crate::app::RoomFilter::All {
            "c 를 눌러 새로운 스터디 방을 만들어보세요!"
        } else {
            "선택한 그룹에 활성 스터디 방이 없습니다."
        };
        let empty = Paragraph::new(vec![
            Line::from("활성 스터디 방이 없습니다"),
            Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let inner_height = block.inner(area).height as usize;
    let item_height = 3usize;
    let max_visible = inner_height / item_height;
    let scroll_start = if max_visible > 0 && app.selected_room >= max_visible {
        app.selected_room - max_visible + 1
    } else {
        0
    };

    let items: Vec<ListItem> = rooms
        .iter()
        .enumerate()
        .skip(scroll_start)
        .take(max_visible.max(1))
        .map(|(i, room)| room_item(room, i == app.selected_room))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn room_item<'a>(room: &StudyRoom, is_selected: bool) -> ListItem<'a> {
    let full = room.is_full();
    let name_style = match (is_selected, full) {
        (true, _) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        (false, true) => Style::default().fg(Color::DarkGray),
        (false, false) => Style::default().fg(Color::White),
    };
    let indicator = if is_selected { "▸ " } else { "  " };
    let status = if full {
        Span::styled("  입장 불가", Style::default().fg(Color::Red))
    } else {
        Span::styled("  Enter: 입장하기", Style::default().fg(Color::Green))
    };

    ListItem::new(Text::from(vec![
        Line::from(vec![
            Span::styled(indicator, name_style),
            Span::styled(
                format!("[{}] ", room.group_name.as_deref().unwrap_or("?")),
                Style::default().fg(Color::Magenta),
            ),
            Span::styled(room.room_name.clone(), name_style),
        ]),
        Line::from(vec![
            Span::raw("    "),
            Span::styled(room.occupancy_label(), Style::default().fg(Color::Gray)),
            Span::styled(
                format!("  {}", room.remaining_label()),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(
                format!("  #{}", room.study_field),
                Style::default().fg(Color::DarkGray),
            ),
            status,
        ]),
        Line::from(""),
    ]))
}

fn draw_room(frame: &mut Frame, app: &App, room_id: i64) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(frame, app, chunks[0]);

    let block = Block::default()
        .title(format!(" 스터디 방 #{} ", room_id))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let lines = match app.find_room(room_id) {
        Some(room) => vec![
            Line::from(Span::styled(
                room.room_name.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("그룹: {}", room.group_name.as_deref().unwrap_or("?"))),
            Line::from(format!("분야: {}", room.study_field)),
            Line::from(format!("인원: {}", room.occupancy_label())),
            Line::from(room.remaining_label()),
        ],
        None => vec![Line::from(Span::styled(
            "방 정보를 불러오는 중...",
            Style::default().fg(Color::DarkGray),
        ))],
    };
    frame.render_widget(Paragraph::new(lines).block(block), chunks[1]);

    draw_notification(frame, app, chunks[2]);
    let bar = Paragraph::new(Line::from(vec![
        Span::styled(
            " Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" 목록으로 │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            "q",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" 종료 ", Style::default().fg(Color::DarkGray)),
    ]))
    .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(bar, chunks[3]);
}

fn draw_notification(frame: &mut Frame, app: &App, area: Rect) {
    let Some(n) = app.notification.as_ref() else {
        return;
    };
    let color = match n.level {
        NotificationLevel::Success => Color::Green,
        NotificationLevel::Info => Color::Yellow,
        NotificationLevel::Error => Color::Red,
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", n.title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(n.message.clone(), Style::default().fg(color)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    };
    let label = |l: &'static str| Span::styled(l, Style::default().fg(Color::DarkGray));

    let mut spans = vec![key(" Tab"), label(" 탭 │ "), key("↑↓"), label(" 이동 │ ")];
    match app.active_tab {
        Tab::Groups => spans.extend([
            key("g"),
            label(" 그룹 만들기 │ "),
            key("c"),
            label(" 방 만들기 │ "),
            key("m"),
            label(" 멤버 │ "),
            key("i"),
            label(" 초대 링크 │ "),
            key("d"),
            label(" 삭제 │ "),
            key("R"),
            label(" 방 새로고침 │ "),
        ]),
        Tab::Rooms => spans.extend([
            key("Enter"),
            label(" 입장 │ "),
            key("c"),
            label(" 방 만들기 │ "),
            key("f"),
            label(" 필터 │ "),
        ]),
    }
    spans.extend([key("r"), label(" 새로고침 │ "), key("q"), label(" 종료 ")]);

    let bar = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(bar, area);
}

fn draw_create_group_dialog(frame: &mut Frame, app: &App) {
    let popup = centered_rect(60, 8, frame.area());
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" 새 그룹 만들기 ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let input = &app.group_name_input;
    let (display, style) = if input.value.is_empty() {
        ("그룹 이름을 입력하세요", Style::default().fg(Color::DarkGray))
    } else {
        (input.value.as_str(), Style::default().fg(Color::White))
    };
    let submit = if app.loading { "생성 중..." } else { "Enter: 그룹 만들기" };

    let lines = vec![
        Line::from(Span::styled("그룹 이름 *", Style::default().fg(Color::Gray))),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::styled(display, style),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}  │  Esc: 취소", submit),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
    frame.set_cursor_position((inner.x + 2 + input.cursor_column(), inner.y + 1));
}

fn draw_create_room_dialog(frame: &mut Frame, app: &App) {
    let popup = centered_rect(60, 14, frame.area());
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" 새 스터디 방 만들기 ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let form = &app.room_form;
    let group_name = form
        .group_id
        .and_then(|id| app.group_name(id))
        .unwrap_or("그룹을 선택하세요");
    let room_name = if form.name.value.is_empty() {
        "방 제목을 입력하세요"
    } else {
        form.name.value.as_str()
    };

    let row = |field: RoomFormField, label: &'static str, value: String| {
        let focused = form.focus == field;
        let style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        Line::from(vec![
            Span::styled(if focused { "▸ " } else { "  " }, style),
            Span::styled(format!("{:<10}", label), Style::default().fg(Color::Gray)),
            Span::styled(value, style),
        ])
    };

    let submit = if app.loading { "생성 중..." } else { "Enter: 방 만들기" };
    let lines = vec![
        row(RoomFormField::Group, "그룹 *", format!("◂ {} ▸", group_name)),
        row(RoomFormField::Name, "방 제목 *", room_name.to_string()),
        row(
            RoomFormField::StudyField,
            "공부 분야 *",
            format!("◂ {} ▸", form.study_field()),
        ),
        row(
            RoomFormField::MaxMembers,
            "최대 인원",
            format!("◂ {}명 ▸", form.max_members),
        ),
        row(
            RoomFormField::StudyHours,
            "공부 시간",
            format!("◂ {}시간 ▸", form.study_hours),
        ),
        Line::from(""),
        Line::from(Span::styled(
            "↑↓: 항목  │  ←→: 선택 변경",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format!("{}  │  Esc: 취소", submit),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);

    if form.focus == RoomFormField::Name {
        frame.set_cursor_position((inner.x + 12 + form.name.cursor_column(), inner.y + 1));
    }
}

fn member_item<'a>(app: &App, member: &GroupMember, is_selected: bool) -> ListItem<'a> {
    let is_leader = app.is_group_leader(member);
    let is_me = app.is_current_user(member);
    let name = app.member_display_name(member);
    let initial = name.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default();

    let avatar_color = if is_leader {
        Color::Yellow
    } else if is_me {
        Color::Blue
    } else {
        Color::Gray
    };
    let name_style = if is_selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let mut first = vec![
        Span::styled(if is_selected { "▸ " } else { "  " }, name_style),
        Span::styled(
            format!("({}) ", initial),
            Style::default().fg(avatar_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(name, name_style),
    ];
    if is_leader {
        first.push(Span::styled(" 방장", Style::default().fg(Color::Yellow)));
    } else if is_me {
        first.push(Span::styled(" 나", Style::default().fg(Color::Blue)));
    }
    if app.can_remove_member(member) {
        first.push(Span::styled("  x: 추방", Style::default().fg(Color::Red)));
    }

    let mut second = format!("    {}  가입일: {}", member.role, member.formatted_joined_at());
    if let Some(image) = app.member_profile_image(member) {
        second.push_str(&format!("  {}", image));
    }

    ListItem::new(Text::from(vec![
        Line::from(first),
        Line::from(Span::styled(second, Style::default().fg(Color::DarkGray))),
    ]))
}

fn draw_members_dialog(frame: &mut Frame, app: &App) {
    let popup = centered_rect(70, 18, frame.area());
    frame.render_widget(Clear, popup);

    let title = match app.members_group.as_ref() {
        Some(g) => format!(" {} 멤버 ({}명) ", g.group_name, app.members.len()),
        None => " 멤버 ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    if app.loading_members {
        let p = Paragraph::new("불러오는 중...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(p, chunks[0]);
    } else if app.members.is_empty() {
        let p = Paragraph::new("멤버가 없습니다")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(p, chunks[0]);
    } else {
        let max_visible = (chunks[0].height as usize / 2).max(1);
        let scroll_start = if app.selected_member >= max_visible {
            app.selected_member - max_visible + 1
        } else {
            0
        };
        let items: Vec<ListItem> = app
            .members
            .iter()
            .enumerate()
            .skip(scroll_start)
            .take(max_visible)
            .map(|(i, m)| member_item(app, m, i == app.selected_member))
            .collect();
        frame.render_widget(List::new(items), chunks[0]);
    }

    let hint_text = if app.can_share_invite() {
        "↑↓: 선택  │  x: 추방  │  i: 초대 링크 공유  │  Esc: 닫기"
    } else {
        "↑↓: 선택  │  Esc: 닫기"
    };
    let hint = Paragraph::new(hint_text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, chunks[1]);
}

fn draw_confirm_remove_dialog(frame: &mut Frame, app: &App) {
    let Some(member) = app.member_to_remove.as_ref() else {
        return;
    };
    let popup = centered_rect(60, 10, frame.area());
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("정말로 이 멤버를 그룹에서 추방하시겠습니까?"),
        Line::from(""),
        Line::from(Span::styled(
            app.member_display_name(member),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("멤버 ID: {}", member.member_id),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "추방된 사용자는 더 이상 해당 그룹의 스터디에 참여할 수 없습니다.",
            Style::default().fg(Color::Red),
        )),
        Line::from(Span::styled(
            "y: 추방하기  │  n/Esc: 취소",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let content = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" 멤버 추방 확인 ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(content, popup);
}

fn draw_confirm_delete_dialog(frame: &mut Frame, app: &App, group_id: i64) {
    let popup = centered_rect(50, 6, frame.area());
    frame.render_widget(Clear, popup);
    let name = app.group_name(group_id).unwrap_or("?");
    let lines = vec![
        Line::from(format!("정말로 '{}' 그룹을 삭제하시겠습니까?", name)),
        Line::from(""),
        Line::from(Span::styled(
            "y: 삭제  │  n/Esc: 취소",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let content = Paragraph::new(lines).block(
        Block::default()
            .title(" 그룹 삭제 ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(content, popup);
}

fn draw_invite_dialog(frame: &mut Frame, app: &App, group_id: i64) {
    let popup = centered_rect(70, 7, frame.area());
    frame.render_widget(Clear, popup);
    let name = app.group_name(group_id).unwrap_or("?");
    let lines = vec![
        Line::from(Span::styled(
            format!("{} 초대 링크", name),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            app.invite_link(group_id),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "링크를 복사해 공유하세요  │  Esc: 닫기",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let content = Paragraph::new(lines).block(
        Block::default()
            .title(" 초대 링크 ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(content, popup);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(v[1])[1]
}
