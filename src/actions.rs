//! User-triggered operations: each one calls the service, updates `App`,
//! posts a notification and navigates where needed. Failures never
//! propagate out of here; they end up on screen and in the log.

use std::collections::HashSet;

use crate::app::{App, Dialog, NotificationLevel};
use crate::client::StudyApi;
use crate::error::{ApiError, ApiResult};
use crate::models::{Group, StudyRoom};
use crate::routes::{Route, SESSION_EXPIRED_REDIRECT_DELAY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InviteOutcome {
    /// Not signed in; the caller should persist `link` and send the user to login.
    LoginRequired { link: String },
    AlreadyMember,
    Joined,
    /// The invited group could not be loaded afterwards.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Entered,
    AlreadyInRoom,
    Full,
    NotSignedIn,
    Busy,
    Failed,
}

/// Groups the user belongs to, in service order, each listed once.
///
/// There is no "my groups" endpoint, so every group's member list is fetched
/// (concurrently). A group whose members cannot be fetched is left out.
pub async fn fetch_my_groups<A: StudyApi + ?Sized>(api: &A, user_id: i64) -> ApiResult<Vec<Group>> {
    let all = api.list_groups().await?;

    let mut seen = HashSet::new();
    let unique: Vec<Group> = all.into_iter().filter(|g| seen.insert(g.id)).collect();

    let checks = unique.iter().map(|group| async move {
        let result = api.get_members(group.id).await;
        (group.id, result)
    });
    let results = futures::future::join_all(checks).await;

    let mut mine = HashSet::new();
    for (group_id, result) in results {
        match result {
            Ok(members) => {
                if members.iter().any(|m| m.member_id == user_id) {
                    mine.insert(group_id);
                }
            }
            Err(e) => tracing::warn!(group_id, error = %e, "member lookup failed, skipping group"),
        }
    }

    Ok(unique.into_iter().filter(|g| mine.contains(&g.id)).collect())
}

/// Reloads the group list and every group's rooms. Returns whether the
/// group list could be loaded.
pub async fn load_my_groups<A: StudyApi + ?Sized>(api: &A, app: &mut App) -> bool {
    let Some(user_id) = app.current_user_id() else {
        return false;
    };

    let was_loading = std::mem::replace(&mut app.loading, true);
    let loaded = match fetch_my_groups(api, user_id).await {
        Ok(groups) => {
            let ids: Vec<i64> = groups.iter().map(|g| g.id).collect();
            app.set_groups(groups);
            for group_id in ids {
                load_group_rooms(api, app, group_id).await;
            }
            tracing::info!(count = app.groups.len(), "loaded my groups");
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to load groups");
            report_load_failure(app, &e, "그룹 목록을 불러오는데 실패했습니다.");
            false
        }
    };
    app.loading = was_loading;
    loaded
}

fn report_load_failure(app: &mut App, error: &ApiError, fallback: &str) {
    if error.is_session_expired() {
        app.notify(NotificationLevel::Error, "세션 만료", "다시 로그인해주세요.");
        app.schedule_redirect(Route::Login, SESSION_EXPIRED_REDIRECT_DELAY);
        return;
    }
    let message = error.to_string();
    app.notify_error(if message.is_empty() { fallback.to_string() } else { message });
}

/// A failure leaves the group's previous room list in place.
pub async fn load_group_rooms<A: StudyApi + ?Sized>(api: &A, app: &mut App, group_id: i64) {
    match api.list_group_rooms(group_id).await {
        Ok(rooms) => app.set_group_rooms(group_id, rooms),
        Err(e) => tracing::error!(group_id, error = %e, "failed to load group rooms"),
    }
}

pub async fn refresh_all<A: StudyApi + ?Sized>(api: &A, app: &mut App) {
    if app.loading {
        return;
    }
    if load_my_groups(api, app).await {
        app.notify(
            NotificationLevel::Success,
            "새로고침 완료",
            "그룹 목록을 업데이트했습니다.",
        );
    }
    app.mark_refreshed();
}

pub async fn refresh_group_rooms<A: StudyApi + ?Sized>(api: &A, app: &mut App, group_id: i64) {
    load_group_rooms(api, app, group_id).await;
    let name = app.group_name(group_id).unwrap_or_default().to_string();
    app.notify(
        NotificationLevel::Success,
        "새로고침 완료",
        format!("{}의 스터디 방 목록을 업데이트했습니다.", name),
    );
}

/// Background refresh of room occupancy; silent unless something fails.
pub async fn refresh_rooms_quietly<A: StudyApi + ?Sized>(api: &A, app: &mut App) {
    let ids: Vec<i64> = app.groups.iter().map(|g| g.id).collect();
    for group_id in ids {
        load_group_rooms(api, app, group_id).await;
    }
    app.mark_refreshed();
}

// ---- Groups ----

pub async fn create_group<A: StudyApi + ?Sized>(api: &A, app: &mut App) {
    let name = match app.validated_group_name() {
        Ok(name) => name,
        Err(msg) => {
            app.notify_error(msg);
            return;
        }
    };
    if app.loading {
        return;
    }

    app.loading = true;
    match api.create_group(&name).await {
        Ok(group) => {
            tracing::info!(group_id = group.id, "group created");
            app.notify(NotificationLevel::Success, "성공", "그룹이 생성되었습니다.");
            app.close_dialog();
            load_my_groups(api, app).await;
        }
        Err(e) => {
            tracing::error!(error = %e, "group creation failed");
            app.notify_error(e.to_string());
        }
    }
    app.loading = false;
}

/// Deletes a group after the confirmation dialog was accepted.
pub async fn delete_group<A: StudyApi + ?Sized>(api: &A, app: &mut App, group_id: i64) {
    if app.loading {
        return;
    }
    app.loading = true;
    match api.delete_group(group_id).await {
        Ok(()) => {
            tracing::info!(group_id, "group deleted");
            app.notify(NotificationLevel::Success, "성공", "그룹이 삭제되었습니다.");
            app.dialog = Dialog::None;
            load_my_groups(api, app).await;
        }
        Err(e) => {
            tracing::error!(group_id, error = %e, "group deletion failed");
            app.notify_error(e.to_string());
        }
    }
    app.loading = false;
}

// ---- Rooms ----

pub async fn create_room<A: StudyApi + ?Sized>(api: &A, app: &mut App) {
    let new_room = match app.validated_room() {
        Ok(room) => room,
        Err(msg) => {
            app.notify_error(msg);
            return;
        }
    };
    if app.loading {
        return;
    }

    app.loading = true;
    match api.create_room(&new_room).await {
        Ok(mut created) => {
            tracing::info!(room_id = created.id, group_id = new_room.group_id, "room created");
            if created.group_id == 0 {
                created.group_id = new_room.group_id;
            }
            let room_id = created.id;
            app.upsert_room(created);
            app.notify(NotificationLevel::Success, "성공", "스터디 방이 생성되었습니다.");
            app.close_dialog();
            app.navigate(Route::Room(room_id));
        }
        Err(e) => {
            tracing::error!(error = %e, "room creation failed");
            app.notify_error(e.to_string());
        }
    }
    app.loading = false;
}

/// Joins `room` and enters it. Full rooms are refused without a call;
/// being in the room already counts as success.
pub async fn join_room<A: StudyApi + ?Sized>(api: &A, app: &mut App, room: &StudyRoom) -> JoinOutcome {
    if room.is_full() {
        app.notify(NotificationLevel::Info, "입장 불가", "최대 인원에 도달했습니다");
        return JoinOutcome::Full;
    }
    let Some(user_id) = app.current_user_id() else {
        app.notify_error("로그인이 필요합니다.");
        return JoinOutcome::NotSignedIn;
    };
    if app.loading {
        return JoinOutcome::Busy;
    }

    app.loading = true;
    let outcome = match api.join_room(room.id, user_id).await {
        Ok(()) => {
            app.notify(NotificationLevel::Success, "성공", "스터디 방에 참여했습니다.");
            app.navigate(Route::Room(room.id));
            JoinOutcome::Entered
        }
        Err(ApiError::AlreadyMember) => {
            app.notify(
                NotificationLevel::Info,
                "알림",
                "이미 참여 중인 방입니다. 입장합니다.",
            );
            app.navigate(Route::Room(room.id));
            JoinOutcome::AlreadyInRoom
        }
        Err(e) => {
            tracing::error!(room_id = room.id, error = %e, "join failed");
            app.notify_error(e.to_string());
            JoinOutcome::Failed
        }
    };
    app.loading = false;
    outcome
}

// ---- Members ----

pub async fn open_members<A: StudyApi + ?Sized>(api: &A, app: &mut App, group: Group) {
    if app.loading_members {
        return;
    }
    app.open_members_dialog(group);
    load_group_members(api, app).await;
}

/// Reloads the member list of the group shown in the members dialog.
pub async fn load_group_members<A: StudyApi + ?Sized>(api: &A, app: &mut App) {
    let Some(group_id) = app.members_group.as_ref().map(|g| g.id) else {
        return;
    };
    app.loading_members = true;
    match api.get_members(group_id).await {
        Ok(members) => {
            app.members = members;
            if app.selected_member >= app.members.len() {
                app.selected_member = app.members.len().saturating_sub(1);
            }
        }
        Err(e) => {
            tracing::error!(group_id, error = %e, "failed to load members");
            app.notify_error("멤버 목록을 불러오는데 실패했습니다.");
            app.members.clear();
        }
    }
    app.loading_members = false;
}

/// Removes the member awaiting confirmation. Only the leader may do this.
pub async fn remove_member<A: StudyApi + ?Sized>(api: &A, app: &mut App) {
    let (Some(member), Some(group), Some(user_id)) = (
        app.member_to_remove.clone(),
        app.members_group.clone(),
        app.current_user_id(),
    ) else {
        return;
    };
    if !app.can_remove_member(&member) || app.loading {
        return;
    }

    app.loading = true;
    match api.remove_member(group.id, member.member_id, user_id).await {
        Ok(()) => {
            tracing::info!(group_id = group.id, member_id = member.member_id, "member removed");
            app.notify(NotificationLevel::Success, "성공", "멤버가 추방되었습니다.");
            app.member_to_remove = None;
            app.dialog = Dialog::Members;
            load_group_members(api, app).await;
        }
        Err(e) => {
            tracing::error!(group_id = group.id, error = %e, "member removal failed");
            app.notify_error(e.to_string());
        }
    }
    app.loading = false;
}

// ---- Invites ----

async fn show_group_members<A: StudyApi + ?Sized>(
    api: &A,
    app: &mut App,
    group_id: i64,
) -> ApiResult<()> {
    let group = api.get_group(group_id).await?;
    app.open_members_dialog(group);
    app.loading_members = true;
    let members = api.get_members(group_id).await;
    app.loading_members = false;
    app.members = members?;
    Ok(())
}

/// Accepts an invite to `group_id` on behalf of the signed-in user.
///
/// Running it again for a group the user already joined is harmless: it only
/// reopens the member list. Every signed-in path ends on the group listing.
pub async fn accept_invite<A: StudyApi + ?Sized>(
    api: &A,
    app: &mut App,
    group_id: i64,
) -> InviteOutcome {
    let Some(user_id) = app.current_user_id() else {
        app.navigate(Route::Login);
        return InviteOutcome::LoginRequired {
            link: app.invite_link(group_id),
        };
    };
    app.navigate(Route::Invite(group_id));

    let already_member = match api.get_members(group_id).await {
        Ok(members) => members.iter().any(|m| m.member_id == user_id),
        Err(e) => {
            tracing::warn!(group_id, error = %e, "membership check failed");
            false
        }
    };

    if already_member {
        app.notify(NotificationLevel::Info, "알림", "이미 그룹 멤버입니다.");
        if let Err(e) = show_group_members(api, app, group_id).await {
            tracing::error!(group_id, error = %e, "failed to load invited group");
        }
        app.navigate(Route::Groups);
        return InviteOutcome::AlreadyMember;
    }

    // A failed add does not stop the flow; the group is still reloaded and shown.
    let message = match api.add_member(group_id, user_id).await {
        Ok(()) | Err(ApiError::AlreadyMember) => "그룹에 참여했습니다.",
        Err(e) => {
            tracing::warn!(group_id, error = %e, "adding member failed, continuing");
            "그룹 초대를 수락했습니다."
        }
    };

    load_my_groups(api, app).await;

    let outcome = match show_group_members(api, app, group_id).await {
        Ok(()) => {
            tracing::info!(group_id, user_id, "invite accepted");
            app.notify(NotificationLevel::Success, "성공", message);
            InviteOutcome::Joined
        }
        Err(e) => {
            tracing::error!(group_id, error = %e, "failed to load invited group");
            app.notify_error("그룹 정보를 불러올 수 없습니다.");
            InviteOutcome::Failed
        }
    };
    app.navigate(Route::Groups);
    outcome
}
