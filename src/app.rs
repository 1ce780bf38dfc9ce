use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::models::*;
use crate::routes::{Route, ScheduledRedirect};

/// How long a notification stays on screen.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Groups,
    Rooms,
}

#[derive(Debug, Clone)]
pub enum AppScreen {
    Loading { message: String },
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    None,
    CreateGroup,
    CreateRoom,
    Members,
    ConfirmRemoveMember,
    ConfirmDeleteGroup(i64),
    InviteLink(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
    pub shown_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= NOTIFICATION_TTL
    }
}

/// Which rooms the rooms tab shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomFilter {
    All,
    Group(i64),
}

/// Single-line text field with a byte cursor on char boundaries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
    pub max_chars: Option<usize>,
}

impl TextInput {
    pub fn with_limit(max_chars: usize) -> Self {
        Self {
            max_chars: Some(max_chars),
            ..Self::default()
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(max) = self.max_chars {
            if self.value.chars().count() >= max {
                return;
            }
        }
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            let prev_len = self.value[..self.cursor]
                .chars()
                .last()
                .map(|c| c.len_utf8())
                .unwrap_or(0);
            self.cursor -= prev_len;
            self.value.remove(self.cursor);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            let prev_len = self.value[..self.cursor]
                .chars()
                .last()
                .map(|c| c.len_utf8())
                .unwrap_or(0);
            self.cursor -= prev_len;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.value.len() {
            let next_len = self.value[self.cursor..]
                .chars()
                .next()
                .map(|c| c.len_utf8())
                .unwrap_or(0);
            self.cursor += next_len;
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn cursor_column(&self) -> u16 {
        self.value[..self.cursor].chars().count() as u16
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomFormField {
    Group,
    Name,
    StudyField,
    MaxMembers,
    StudyHours,
}

impl RoomFormField {
    fn next(self) -> Self {
        match self {
            RoomFormField::Group => RoomFormField::Name,
            RoomFormField::Name => RoomFormField::StudyField,
            RoomFormField::StudyField => RoomFormField::MaxMembers,
            RoomFormField::MaxMembers => RoomFormField::StudyHours,
            RoomFormField::StudyHours => RoomFormField::Group,
        }
    }

    fn prev(self) -> Self {
        match self {
            RoomFormField::Group => RoomFormField::StudyHours,
            RoomFormField::Name => RoomFormField::Group,
            RoomFormField::StudyField => RoomFormField::Name,
            RoomFormField::MaxMembers => RoomFormField::StudyField,
            RoomFormField::StudyHours => RoomFormField::MaxMembers,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomForm {
    pub group_id: Option<i64>,
    pub name: TextInput,
    pub field_index: usize,
    pub max_members: u32,
    pub study_hours: u32,
    pub focus: RoomFormField,
}

impl Default for RoomForm {
    fn default() -> Self {
        Self {
            group_id: None,
            name: TextInput::with_limit(ROOM_NAME_MAX_LEN),
            field_index: 0,
            max_members: DEFAULT_MAX_MEMBERS,
            study_hours: DEFAULT_STUDY_HOURS,
            focus: RoomFormField::Group,
        }
    }
}

impl RoomForm {
    pub fn study_field(&self) -> &'static str {
        STUDY_FIELDS[self.field_index % STUDY_FIELDS.len()]
    }
}

pub struct App {
    pub screen: AppScreen,
    pub route: Route,
    pub active_tab: Tab,
    pub current_user: Option<CurrentUser>,
    pub groups: Vec<Group>,
    pub rooms: HashMap<i64, Vec<StudyRoom>>,
    pub selected_group: usize,
    pub selected_room: usize,
    pub room_filter: RoomFilter,
    pub dialog: Dialog,
    pub group_name_input: TextInput,
    pub room_form: RoomForm,
    pub members_group: Option<Group>,
    pub members: Vec<GroupMember>,
    pub selected_member: usize,
    pub member_to_remove: Option<GroupMember>,
    pub loading: bool,
    pub loading_members: bool,
    pub notification: Option<Notification>,
    pub redirect: Option<ScheduledRedirect>,
    pub last_refresh: Instant,
    pub refresh_interval: Duration,
    pub web_base_url: String,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            screen: AppScreen::Loading {
                message: "Starting...".to_string(),
            },
            route: Route::Groups,
            active_tab: Tab::Groups,
            current_user: None,
            groups: Vec::new(),
            rooms: HashMap::new(),
            selected_group: 0,
            selected_room: 0,
            room_filter: RoomFilter::All,
            dialog: Dialog::None,
            group_name_input: TextInput::with_limit(GROUP_NAME_MAX_LEN),
            room_form: RoomForm::default(),
            members_group: None,
            members: Vec::new(),
            selected_member: 0,
            member_to_remove: None,
            loading: false,
            loading_members: false,
            notification: None,
            redirect: None,
            last_refresh: Instant::now(),
            refresh_interval: Duration::from_secs(30),
            web_base_url: crate::config::DEFAULT_WEB_BASE_URL.to_string(),
        }
    }

    pub fn current_user_id(&self) -> Option<i64> {
        self.current_user.as_ref().map(|u| u.id)
    }

    // ---- Notifications & navigation ----

    pub fn notify(&mut self, level: NotificationLevel, title: &str, message: impl Into<String>) {
        self.notification = Some(Notification {
            level,
            title: title.to_string(),
            message: message.into(),
            shown_at: Instant::now(),
        });
    }

    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.notify(NotificationLevel::Error, "오류", message);
    }

    pub fn expire_notification(&mut self, now: Instant) {
        if self.notification.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notification = None;
        }
    }

    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(path = %route.path(), "navigate");
        self.route = route;
    }

    pub fn schedule_redirect(&mut self, route: Route, delay: Duration) {
        self.redirect = Some(ScheduledRedirect::after(route, delay));
    }

    /// Performs a scheduled redirect whose deadline has passed. Returns the
    /// route navigated to.
    pub fn apply_due_redirect(&mut self, now: Instant) -> Option<Route> {
        let due = self.redirect.filter(|r| r.is_due(now))?;
        self.redirect = None;
        self.navigate(due.route);
        Some(due.route)
    }

    // ---- Groups & rooms ----

    pub fn set_groups(&mut self, groups: Vec<Group>) {
        self.rooms.retain(|id, _| groups.iter().any(|g| g.id == *id));
        if let RoomFilter::Group(id) = self.room_filter {
            if !groups.iter().any(|g| g.id == id) {
                self.room_filter = RoomFilter::All;
            }
        }
        self.groups = groups;
        if self.selected_group >= self.groups.len() {
            self.selected_group = self.groups.len().saturating_sub(1);
        }
        self.clamp_room_selection();
    }

    pub fn set_group_rooms(&mut self, group_id: i64, mut rooms: Vec<StudyRoom>) {
        let group_name = self.group_name(group_id).map(String::from);
        for room in &mut rooms {
            room.group_id = group_id;
            room.group_name = group_name.clone();
        }
        self.rooms.insert(group_id, rooms);
        self.clamp_room_selection();
    }

    pub fn upsert_room(&mut self, mut room: StudyRoom) {
        room.group_name = self.group_name(room.group_id).map(String::from);
        let rooms = self.rooms.entry(room.group_id).or_default();
        match rooms.iter_mut().find(|r| r.id == room.id) {
            Some(existing) => *existing = room,
            None => rooms.push(room),
        }
    }

    pub fn group_name(&self, group_id: i64) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| g.id == group_id)
            .map(|g| g.group_name.as_str())
    }

    pub fn room_count(&self, group_id: i64) -> usize {
        self.rooms.get(&group_id).map(Vec::len).unwrap_or(0)
    }

    /// Rooms shown on the rooms tab, in group order.
    pub fn visible_rooms(&self) -> Vec<&StudyRoom> {
        self.groups
            .iter()
            .filter(|g| match self.room_filter {
                RoomFilter::All => true,
                RoomFilter::Group(id) => g.id == id,
            })
            .filter_map(|g| self.rooms.get(&g.id))
            .flatten()
            .collect()
    }

    pub fn find_room(&self, room_id: i64) -> Option<&StudyRoom> {
        self.rooms.values().flatten().find(|r| r.id == room_id)
    }

    pub fn selected_group(&self) -> Option<&Group> {
        self.groups.get(self.selected_group)
    }

    pub fn selected_room(&self) -> Option<&StudyRoom> {
        self.visible_rooms().get(self.selected_room).copied()
    }

    /// All groups, then each group in turn.
    pub fn cycle_room_filter(&mut self) {
        self.room_filter = match self.room_filter {
            RoomFilter::All => match self.groups.first() {
                Some(g) => RoomFilter::Group(g.id),
                None => RoomFilter::All,
            },
            RoomFilter::Group(id) => {
                let pos = self.groups.iter().position(|g| g.id == id);
                match pos.and_then(|p| self.groups.get(p + 1)) {
                    Some(g) => RoomFilter::Group(g.id),
                    None => RoomFilter::All,
                }
            }
        };
        self.selected_room = 0;
    }

    pub fn room_filter_label(&self) -> String {
        match self.room_filter {
            RoomFilter::All => "전체 그룹".to_string(),
            RoomFilter::Group(id) => self.group_name(id).unwrap_or("?").to_string(),
        }
    }

    fn clamp_room_selection(&mut self) {
        let count = self.visible_rooms().len();
        if self.selected_room >= count {
            self.selected_room = count.saturating_sub(1);
        }
    }

    pub fn select_next(&mut self) {
        match self.active_tab {
            Tab::Groups => {
                if !self.groups.is_empty() {
                    self.selected_group = (self.selected_group + 1).min(self.groups.len() - 1);
                }
            }
            Tab::Rooms => {
                let count = self.visible_rooms().len();
                if count > 0 {
                    self.selected_room = (self.selected_room + 1).min(count - 1);
                }
            }
        }
    }

    pub fn select_prev(&mut self) {
        match self.active_tab {
            Tab::Groups => self.selected_group = self.selected_group.saturating_sub(1),
            Tab::Rooms => self.selected_room = self.selected_room.saturating_sub(1),
        }
    }

    pub fn next_tab(&mut self) {
        self.active_tab = match self.active_tab {
            Tab::Groups => Tab::Rooms,
            Tab::Rooms => Tab::Groups,
        };
    }

    // ---- Dialogs ----

    pub fn open_create_group_dialog(&mut self) {
        self.group_name_input.clear();
        self.dialog = Dialog::CreateGroup;
    }

    /// Opens the room dialog with the selected group preselected. Needs at
    /// least one group.
    pub fn open_create_room_dialog(&mut self) -> bool {
        if self.groups.is_empty() {
            return false;
        }
        self.room_form = RoomForm {
            group_id: self.selected_group().map(|g| g.id),
            ..RoomForm::default()
        };
        self.dialog = Dialog::CreateRoom;
        true
    }

    pub fn invite_link(&self, group_id: i64) -> String {
        crate::routes::invite_link(&self.web_base_url, group_id)
    }

    pub fn open_invite_dialog(&mut self, group_id: i64) {
        self.dialog = Dialog::InviteLink(group_id);
    }

    /// The leader can share the invite link from the member list.
    pub fn can_share_invite(&self) -> bool {
        match (self.members_group.as_ref(), self.current_user_id()) {
            (Some(group), Some(user_id)) => group.is_led_by(user_id),
            _ => false,
        }
    }

    pub fn open_member_invite_dialog(&mut self) -> bool {
        let Some(group_id) = self.members_group.as_ref().map(|g| g.id) else {
            return false;
        };
        if !self.can_share_invite() {
            return false;
        }
        self.open_invite_dialog(group_id);
        true
    }

    pub fn open_members_dialog(&mut self, group: Group) {
        self.members_group = Some(group);
        self.members.clear();
        self.selected_member = 0;
        self.member_to_remove = None;
        self.dialog = Dialog::Members;
    }

    /// Closes the top dialog. A removal confirmation, or an invite link
    /// opened from the member list, falls back to that list.
    pub fn close_dialog(&mut self) {
        match self.dialog {
            Dialog::ConfirmRemoveMember => {
                self.member_to_remove = None;
                self.dialog = Dialog::Members;
            }
            Dialog::InviteLink(_) if self.members_group.is_some() => {
                self.dialog = Dialog::Members;
            }
            Dialog::CreateGroup => {
                self.group_name_input.clear();
                self.dialog = Dialog::None;
            }
            Dialog::CreateRoom => {
                self.room_form = RoomForm::default();
                self.dialog = Dialog::None;
            }
            Dialog::Members => {
                self.members_group = None;
                self.members.clear();
                self.selected_member = 0;
                self.dialog = Dialog::None;
            }
            _ => self.dialog = Dialog::None,
        }
    }

    pub fn validated_group_name(&self) -> Result<String, &'static str> {
        let name = self.group_name_input.trimmed();
        if name.is_empty() {
            return Err("그룹 이름을 입력해주세요.");
        }
        Ok(name.to_string())
    }

    pub fn validated_room(&self) -> Result<NewRoom, &'static str> {
        let form = &self.room_form;
        let name = form.name.trimmed();
        let group_id = match form.group_id {
            Some(id) if !name.is_empty() => id,
            _ => return Err("방 제목과 그룹을 선택해주세요."),
        };
        Ok(NewRoom {
            group_id,
            room_name: name.to_string(),
            study_field: form.study_field().to_string(),
            study_hours: form.study_hours,
            max_members: form.max_members,
        })
    }

    pub fn room_form_next_field(&mut self) {
        self.room_form.focus = self.room_form.focus.next();
    }

    pub fn room_form_prev_field(&mut self) {
        self.room_form.focus = self.room_form.focus.prev();
    }

    /// Steps the focused choice field forward or backward, wrapping around.
    pub fn room_form_adjust(&mut self, forward: bool) {
        let form = &mut self.room_form;
        match form.focus {
            RoomFormField::Group => {
                if self.groups.is_empty() {
                    return;
                }
                let pos = form
                    .group_id
                    .and_then(|id| self.groups.iter().position(|g| g.id == id));
                let next = match (pos, forward) {
                    (None, _) => 0,
                    (Some(p), true) => (p + 1) % self.groups.len(),
                    (Some(p), false) => (p + self.groups.len() - 1) % self.groups.len(),
                };
                form.group_id = Some(self.groups[next].id);
            }
            RoomFormField::StudyField => {
                let len = STUDY_FIELDS.len();
                form.field_index = if forward {
                    (form.field_index + 1) % len
                } else {
                    (form.field_index + len - 1) % len
                };
            }
            RoomFormField::MaxMembers => {
                form.max_members = step_in_range(form.max_members, &MAX_MEMBER_CHOICES, forward);
            }
            RoomFormField::StudyHours => {
                form.study_hours = step_in_range(form.study_hours, &STUDY_HOUR_CHOICES, forward);
            }
            RoomFormField::Name => {}
        }
    }

    // ---- Members ----

    /// The signed-in user's own profile wins over what the service reports.
    pub fn member_display_name(&self, member: &GroupMember) -> String {
        if let Some(user) = self.current_user.as_ref().filter(|u| u.id == member.member_id) {
            if let Some(name) = user.username.as_deref().filter(|n| !n.is_empty()) {
                return name.to_string();
            }
        }
        member
            .profile
            .display_name
            .clone()
            .unwrap_or_else(|| member.placeholder_name())
    }

    pub fn member_profile_image(&self, member: &GroupMember) -> Option<String> {
        if let Some(user) = self.current_user.as_ref().filter(|u| u.id == member.member_id) {
            if let Some(image) = user.profile_image.as_deref().filter(|i| !i.is_empty()) {
                return Some(image.to_string());
            }
        }
        member.profile.image_url.clone()
    }

    pub fn is_group_leader(&self, member: &GroupMember) -> bool {
        self.members_group
            .as_ref()
            .is_some_and(|g| g.is_led_by(member.member_id))
    }

    pub fn is_current_user(&self, member: &GroupMember) -> bool {
        self.current_user_id() == Some(member.member_id)
    }

    /// Only the leader may remove members, and never the leader.
    pub fn can_remove_member(&self, member: &GroupMember) -> bool {
        let Some(group) = self.members_group.as_ref() else {
            return false;
        };
        let Some(user_id) = self.current_user_id() else {
            return false;
        };
        group.is_led_by(user_id) && !group.is_led_by(member.member_id)
    }

    pub fn select_next_member(&mut self) {
        if !self.members.is_empty() {
            self.selected_member = (self.selected_member + 1).min(self.members.len() - 1);
        }
    }

    pub fn select_prev_member(&mut self) {
        self.selected_member = self.selected_member.saturating_sub(1);
    }

    /// Asks for confirmation before removing the highlighted member.
    pub fn request_remove_selected_member(&mut self) -> bool {
        let Some(member) = self.members.get(self.selected_member).cloned() else {
            return false;
        };
        if !self.can_remove_member(&member) {
            return false;
        }
        self.member_to_remove = Some(member);
        self.dialog = Dialog::ConfirmRemoveMember;
        true
    }

    // ---- Refresh ----

    pub fn should_refresh(&self) -> bool {
        self.last_refresh.elapsed() >= self.refresh_interval
    }

    pub fn mark_refreshed(&mut self) {
        self.last_refresh = Instant::now();
    }
}

fn step_in_range(value: u32, range: &std::ops::RangeInclusive<u32>, forward: bool) -> u32 {
    let (lo, hi) = (*range.start(), *range.end());
    match (forward, value) {
        (true, v) if v >= hi => lo,
        (true, v) => (v + 1).max(lo),
        (false, v) if v <= lo => hi,
        (false, v) => (v - 1).min(hi),
    }
}
