//! Tests for the app module: state management, selection, dialogs, forms, member display

#[allow(dead_code)]
mod fixtures {
    use groupstudy::models::*;

    pub fn group(id: i64, name: &str, leader_id: i64) -> Group {
        Group {
            id,
            group_name: name.to_string(),
            leader_id,
            created_at: "2024-05-01T10:00:00".to_string(),
        }
    }

    pub fn room(id: i64, group_id: i64, current: u32, max: u32) -> StudyRoom {
        StudyRoom {
            id,
            group_id,
            room_name: format!("Room {}", id),
            study_field: "프로그래밍".to_string(),
            max_members: max,
            current_members: current,
            remaining_minutes: None,
            group_name: None,
        }
    }

    pub fn member(member_id: i64, name: Option<&str>, image: Option<&str>) -> GroupMember {
        GroupMember {
            id: member_id * 100,
            member_id,
            role: "MEMBER".to_string(),
            joined_at: String::new(),
            profile: MemberProfile {
                display_name: name.map(String::from),
                image_url: image.map(String::from),
            },
        }
    }

    pub fn user(id: i64, name: Option<&str>, image: Option<&str>) -> CurrentUser {
        CurrentUser {
            id,
            username: name.map(String::from),
            profile_image: image.map(String::from),
        }
    }
}

#[cfg(test)]
mod tab_navigation {
    use groupstudy::app::{App, Tab};

    #[test]
    fn new_app_starts_on_groups_tab() {
        let app = App::new();
        assert_eq!(app.active_tab, Tab::Groups);
    }

    #[test]
    fn next_tab_toggles() {
        let mut app = App::new();
        app.next_tab();
        assert_eq!(app.active_tab, Tab::Rooms);
        app.next_tab();
        assert_eq!(app.active_tab, Tab::Groups);
    }
}

#[cfg(test)]
mod group_selection {
    use super::fixtures::*;
    use groupstudy::app::App;

    #[test]
    fn select_next_stops_at_end() {
        let mut app = App::new();
        app.set_groups(vec![group(1, "A", 1), group(2, "B", 1)]);
        app.select_next();
        assert_eq!(app.selected_group, 1);
        app.select_next();
        assert_eq!(app.selected_group, 1);
    }

    #[test]
    fn select_prev_stops_at_zero() {
        let mut app = App::new();
        app.set_groups(vec![group(1, "A", 1)]);
        app.select_prev();
        assert_eq!(app.selected_group, 0);
    }

    #[test]
    fn select_next_noop_when_no_groups() {
        let mut app = App::new();
        app.select_next();
        assert_eq!(app.selected_group, 0);
        assert!(app.selected_group().is_none());
    }

    #[test]
    fn shrinking_group_list_clamps_selection() {
        let mut app = App::new();
        app.set_groups(vec![group(1, "A", 1), group(2, "B", 1), group(3, "C", 1)]);
        app.selected_group = 2;
        app.set_groups(vec![group(1, "A", 1)]);
        assert_eq!(app.selected_group, 0);
        assert_eq!(app.selected_group().map(|g| g.id), Some(1));
    }

    #[test]
    fn dropped_groups_lose_their_rooms() {
        let mut app = App::new();
        app.set_groups(vec![group(1, "A", 1), group(2, "B", 1)]);
        app.set_group_rooms(2, vec![room(20, 2, 0, 4)]);
        app.set_groups(vec![group(1, "A", 1)]);
        assert_eq!(app.room_count(2), 0);
        assert!(app.find_room(20).is_none());
    }
}

#[cfg(test)]
mod room_listing {
    use super::fixtures::*;
    use groupstudy::app::{App, RoomFilter, Tab};

    fn app_with_rooms() -> App {
        let mut app = App::new();
        app.set_groups(vec![group(1, "Algorithms", 1), group(2, "English", 2)]);
        app.set_group_rooms(1, vec![room(10, 1, 1, 4), room(11, 1, 4, 4)]);
        app.set_group_rooms(2, vec![room(20, 2, 0, 2)]);
        app
    }

    #[test]
    fn rooms_carry_their_group_name() {
        let app = app_with_rooms();
        let r = app.find_room(20).unwrap();
        assert_eq!(r.group_name.as_deref(), Some("English"));
        assert_eq!(r.group_id, 2);
    }

    #[test]
    fn room_count_per_group() {
        let app = app_with_rooms();
        assert_eq!(app.room_count(1), 2);
        assert_eq!(app.room_count(2), 1);
        assert_eq!(app.room_count(3), 0);
    }

    #[test]
    fn all_filter_lists_rooms_in_group_order() {
        let app = app_with_rooms();
        let ids: Vec<i64> = app.visible_rooms().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![10, 11, 20]);
    }

    #[test]
    fn group_filter_limits_rooms() {
        let mut app = app_with_rooms();
        app.room_filter = RoomFilter::Group(2);
        let ids: Vec<i64> = app.visible_rooms().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![20]);
    }

    #[test]
    fn cycle_filter_walks_groups_then_back_to_all() {
        let mut app = app_with_rooms();
        assert_eq!(app.room_filter_label(), "전체 그룹");
        app.cycle_room_filter();
        assert_eq!(app.room_filter, RoomFilter::Group(1));
        app.cycle_room_filter();
        assert_eq!(app.room_filter, RoomFilter::Group(2));
        assert_eq!(app.room_filter_label(), "English");
        app.cycle_room_filter();
        assert_eq!(app.room_filter, RoomFilter::All);
    }

    #[test]
    fn filter_resets_when_group_disappears() {
        let mut app = app_with_rooms();
        app.room_filter = RoomFilter::Group(2);
        app.set_groups(vec![group(1, "Algorithms", 1)]);
        assert_eq!(app.room_filter, RoomFilter::All);
    }

    #[test]
    fn room_selection_follows_rooms_tab() {
        let mut app = app_with_rooms();
        app.active_tab = Tab::Rooms;
        app.select_next();
        app.select_next();
        app.select_next();
        assert_eq!(app.selected_room, 2);
        assert_eq!(app.selected_room().map(|r| r.id), Some(20));
        assert_eq!(app.selected_group, 0);
    }

    #[test]
    fn upsert_room_adds_then_replaces() {
        let mut app = app_with_rooms();
        app.upsert_room(room(12, 1, 0, 6));
        assert_eq!(app.room_count(1), 3);
        let mut updated = room(12, 1, 3, 6);
        updated.room_name = "Renamed".to_string();
        app.upsert_room(updated);
        assert_eq!(app.room_count(1), 3);
        let r = app.find_room(12).unwrap();
        assert_eq!(r.room_name, "Renamed");
        assert_eq!(r.group_name.as_deref(), Some("Algorithms"));
    }
}

#[cfg(test)]
mod text_input {
    use groupstudy::app::TextInput;

    #[test]
    fn insert_and_delete_multibyte() {
        let mut input = TextInput::default();
        for c in "스터디".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.value, "스터디");
        assert_eq!(input.cursor_column(), 3);
        input.delete_char();
        assert_eq!(input.value, "스터");
        assert_eq!(input.cursor, "스터".len());
    }

    #[test]
    fn cursor_movement_respects_char_boundaries() {
        let mut input = TextInput::default();
        for c in "가a".chars() {
            input.insert_char(c);
        }
        input.move_cursor_left();
        input.move_cursor_left();
        assert_eq!(input.cursor, 0);
        input.move_cursor_left();
        assert_eq!(input.cursor, 0);
        input.move_cursor_right();
        assert_eq!(input.cursor, "가".len());
        input.insert_char('b');
        assert_eq!(input.value, "가ba");
    }

    #[test]
    fn limit_blocks_extra_chars() {
        let mut input = TextInput::with_limit(3);
        for c in "abcd".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.value, "abc");
    }

    #[test]
    fn delete_at_start_is_noop() {
        let mut input = TextInput::default();
        input.delete_char();
        assert_eq!(input.value, "");
    }
}

#[cfg(test)]
mod dialogs_and_forms {
    use super::fixtures::*;
    use groupstudy::app::{App, Dialog, RoomFormField};
    use groupstudy::models::*;

    #[test]
    fn group_name_is_trimmed_and_required() {
        let mut app = App::new();
        app.open_create_group_dialog();
        assert_eq!(app.dialog, Dialog::CreateGroup);
        assert!(app.validated_group_name().is_err());
        for c in "  Algorithms ".chars() {
            app.group_name_input.insert_char(c);
        }
        assert_eq!(app.validated_group_name().unwrap(), "Algorithms");
    }

    #[test]
    fn closing_group_dialog_resets_input() {
        let mut app = App::new();
        app.open_create_group_dialog();
        app.group_name_input.insert_char('x');
        app.close_dialog();
        assert_eq!(app.dialog, Dialog::None);
        assert_eq!(app.group_name_input.value, "");
    }

    #[test]
    fn group_name_limit_is_fifty_chars() {
        let mut app = App::new();
        for _ in 0..60 {
            app.group_name_input.insert_char('a');
        }
        assert_eq!(app.group_name_input.value.chars().count(), GROUP_NAME_MAX_LEN);
    }

    #[test]
    fn room_dialog_needs_a_group() {
        let mut app = App::new();
        assert!(!app.open_create_room_dialog());
        assert_eq!(app.dialog, Dialog::None);
    }

    #[test]
    fn room_dialog_preselects_selected_group_with_defaults() {
        let mut app = App::new();
        app.set_groups(vec![group(1, "A", 1), group(2, "B", 1)]);
        app.selected_group = 1;
        assert!(app.open_create_room_dialog());
        assert_eq!(app.dialog, Dialog::CreateRoom);
        assert_eq!(app.room_form.group_id, Some(2));
        assert_eq!(app.room_form.max_members, 4);
        assert_eq!(app.room_form.study_hours, 2);
        assert_eq!(app.room_form.study_field(), "프로그래밍");
    }

    #[test]
    fn room_validation_requires_name() {
        let mut app = App::new();
        app.set_groups(vec![group(1, "A", 1)]);
        app.open_create_room_dialog();
        assert_eq!(app.validated_room().unwrap_err(), "방 제목과 그룹을 선택해주세요.");
        for c in "Morning Session".chars() {
            app.room_form.name.insert_char(c);
        }
        let new_room = app.validated_room().unwrap();
        assert_eq!(new_room.group_id, 1);
        assert_eq!(new_room.room_name, "Morning Session");
        assert_eq!(new_room.max_members, 4);
        assert_eq!(new_room.study_hours, 2);
    }

    #[test]
    fn room_form_fields_cycle() {
        let mut app = App::new();
        app.set_groups(vec![group(1, "A", 1)]);
        app.open_create_room_dialog();
        assert_eq!(app.room_form.focus, RoomFormField::Group);
        app.room_form_next_field();
        assert_eq!(app.room_form.focus, RoomFormField::Name);
        app.room_form_prev_field();
        app.room_form_prev_field();
        assert_eq!(app.room_form.focus, RoomFormField::StudyHours);
    }

    #[test]
    fn adjusting_choices_wraps_within_limits() {
        let mut app = App::new();
        app.set_groups(vec![group(1, "A", 1), group(2, "B", 1)]);
        app.open_create_room_dialog();

        app.room_form_adjust(true);
        assert_eq!(app.room_form.group_id, Some(2));
        app.room_form_adjust(true);
        assert_eq!(app.room_form.group_id, Some(1));

        app.room_form.focus = RoomFormField::MaxMembers;
        app.room_form.max_members = 10;
        app.room_form_adjust(true);
        assert_eq!(app.room_form.max_members, 2);
        app.room_form_adjust(false);
        assert_eq!(app.room_form.max_members, 10);

        app.room_form.focus = RoomFormField::StudyHours;
        app.room_form.study_hours = 1;
        app.room_form_adjust(false);
        assert_eq!(app.room_form.study_hours, 5);

        app.room_form.focus = RoomFormField::StudyField;
        app.room_form_adjust(false);
        assert_eq!(app.room_form.study_field(), "기타");
    }

    #[test]
    fn invite_dialog_shows_link_for_group() {
        let mut app = App::new();
        app.web_base_url = "https://study.example.com".to_string();
        app.open_invite_dialog(3);
        assert_eq!(app.dialog, Dialog::InviteLink(3));
        assert_eq!(app.invite_link(3), "https://study.example.com/#/group-invite/3");
    }
}

#[cfg(test)]
mod member_display {
    use super::fixtures::*;
    use groupstudy::app::{App, Dialog};

    fn app_as(user_id: i64, name: Option<&str>, image: Option<&str>) -> App {
        let mut app = App::new();
        app.current_user = Some(user(user_id, name, image));
        app
    }

    #[test]
    fn own_profile_name_wins_over_server_record() {
        let app = app_as(5, Some("my-name"), None);
        let m = member(5, Some("server-name"), None);
        assert_eq!(app.member_display_name(&m), "my-name");
    }

    #[test]
    fn own_record_without_profile_name_uses_server_name() {
        let app = app_as(5, None, None);
        let m = member(5, Some("server-name"), None);
        assert_eq!(app.member_display_name(&m), "server-name");
    }

    #[test]
    fn other_member_uses_server_name() {
        let app = app_as(5, Some("my-name"), None);
        let m = member(6, Some("other"), None);
        assert_eq!(app.member_display_name(&m), "other");
    }

    #[test]
    fn missing_names_fall_back_to_placeholder() {
        let app = app_as(5, Some("my-name"), None);
        let m = member(6, None, None);
        assert_eq!(app.member_display_name(&m), "사용자6");
    }

    #[test]
    fn profile_image_precedence() {
        let app = app_as(5, None, Some("me.png"));
        assert_eq!(
            app.member_profile_image(&member(5, None, Some("srv.png"))).as_deref(),
            Some("me.png")
        );
        assert_eq!(
            app.member_profile_image(&member(6, None, Some("srv.png"))).as_deref(),
            Some("srv.png")
        );
        assert_eq!(app.member_profile_image(&member(6, None, None)), None);
    }

    #[test]
    fn leader_can_remove_others_but_not_self() {
        let mut app = app_as(1, None, None);
        app.open_members_dialog(group(9, "G", 1));
        assert!(app.can_remove_member(&member(2, None, None)));
        assert!(!app.can_remove_member(&member(1, None, None)));
    }

    #[test]
    fn non_leader_cannot_remove() {
        let mut app = app_as(2, None, None);
        app.open_members_dialog(group(9, "G", 1));
        assert!(!app.can_remove_member(&member(3, None, None)));
    }

    #[test]
    fn remove_request_opens_confirmation_and_cancel_returns_to_members() {
        let mut app = app_as(1, None, None);
        app.open_members_dialog(group(9, "G", 1));
        app.members = vec![member(1, None, None), member(2, None, None)];

        assert!(!app.request_remove_selected_member());
        assert_eq!(app.dialog, Dialog::Members);

        app.select_next_member();
        assert!(app.request_remove_selected_member());
        assert_eq!(app.dialog, Dialog::ConfirmRemoveMember);
        assert_eq!(app.member_to_remove.as_ref().map(|m| m.member_id), Some(2));

        app.close_dialog();
        assert_eq!(app.dialog, Dialog::Members);
        assert!(app.member_to_remove.is_none());

        app.close_dialog();
        assert_eq!(app.dialog, Dialog::None);
        assert!(app.members.is_empty());
        assert!(app.members_group.is_none());
    }

    #[test]
    fn leader_shares_invite_from_member_list() {
        let mut app = app_as(1, None, None);
        app.open_members_dialog(group(9, "G", 1));
        app.members = vec![member(1, None, None), member(2, None, None)];

        assert!(app.can_share_invite());
        assert!(app.open_member_invite_dialog());
        assert_eq!(app.dialog, Dialog::InviteLink(9));

        app.close_dialog();
        assert_eq!(app.dialog, Dialog::Members);
        assert_eq!(app.members.len(), 2);
    }

    #[test]
    fn non_leader_cannot_share_invite_from_member_list() {
        let mut app = app_as(2, None, None);
        app.open_members_dialog(group(9, "G", 1));

        assert!(!app.can_share_invite());
        assert!(!app.open_member_invite_dialog());
        assert_eq!(app.dialog, Dialog::Members);
    }

    #[test]
    fn leader_and_self_flags() {
        let mut app = app_as(2, None, None);
        app.open_members_dialog(group(9, "G", 1));
        assert!(app.is_group_leader(&member(1, None, None)));
        assert!(!app.is_group_leader(&member(2, None, None)));
        assert!(app.is_current_user(&member(2, None, None)));
    }
}

#[cfg(test)]
mod notifications_and_redirects {
    use groupstudy::app::{App, NotificationLevel, NOTIFICATION_TTL};
    use groupstudy::routes::Route;
    use std::time::{Duration, Instant};

    #[test]
    fn notify_replaces_previous() {
        let mut app = App::new();
        app.notify(NotificationLevel::Success, "성공", "one");
        app.notify_error("two");
        let n = app.notification.as_ref().unwrap();
        assert_eq!(n.level, NotificationLevel::Error);
        assert_eq!(n.title, "오류");
        assert_eq!(n.message, "two");
    }

    #[test]
    fn notification_expires_after_ttl() {
        let mut app = App::new();
        app.notify(NotificationLevel::Info, "알림", "hi");
        app.expire_notification(Instant::now());
        assert!(app.notification.is_some());
        app.expire_notification(Instant::now() + NOTIFICATION_TTL + Duration::from_millis(1));
        assert!(app.notification.is_none());
    }

    #[test]
    fn redirect_applies_only_when_due() {
        let mut app = App::new();
        app.schedule_redirect(Route::Login, Duration::from_secs(60));
        assert_eq!(app.apply_due_redirect(Instant::now()), None);
        assert_eq!(app.route, Route::Groups);

        let later = Instant::now() + Duration::from_secs(61);
        assert_eq!(app.apply_due_redirect(later), Some(Route::Login));
        assert_eq!(app.route, Route::Login);
        assert!(app.redirect.is_none());
    }

    #[test]
    fn navigate_keeps_scheduled_redirect() {
        let mut app = App::new();
        app.schedule_redirect(Route::Login, Duration::from_millis(0));
        app.navigate(Route::Room(3));
        assert_eq!(app.route, Route::Room(3));
        assert_eq!(app.apply_due_redirect(Instant::now()), Some(Route::Login));
    }
}

#[cfg(test)]
mod refresh_tests {
    use groupstudy::app::App;
    use std::time::Duration;

    #[test]
    fn fresh_app_does_not_need_refresh() {
        let app = App::new();
        assert!(!app.should_refresh());
    }

    #[test]
    fn zero_interval_refreshes_immediately() {
        let mut app = App::new();
        app.refresh_interval = Duration::ZERO;
        assert!(app.should_refresh());
        app.mark_refreshed();
        assert!(app.should_refresh());
    }
}
