use serde::{Deserialize, Serialize};

/// Study fields offered when creating a room. The service accepts any string.
pub const STUDY_FIELDS: [&str; 8] = [
    "프로그래밍",
    "영어",
    "자격증",
    "공무원",
    "대학입시",
    "취업준비",
    "어학",
    "기타",
];

pub const MAX_MEMBER_CHOICES: std::ops::RangeInclusive<u32> = 2..=10;
pub const STUDY_HOUR_CHOICES: std::ops::RangeInclusive<u32> = 1..=5;
pub const DEFAULT_MAX_MEMBERS: u32 = 4;
pub const DEFAULT_STUDY_HOURS: u32 = 2;
pub const GROUP_NAME_MAX_LEN: usize = 50;
pub const ROOM_NAME_MAX_LEN: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: i64,
    pub group_name: String,
    pub leader_id: i64,
    #[serde(default)]
    pub created_at: String,
}

impl Group {
    pub fn is_led_by(&self, user_id: i64) -> bool {
        self.leader_id == user_id
    }

    pub fn formatted_created_at(&self) -> String {
        format_date(&self.created_at)
    }
}

/// Name and avatar of a member, already resolved from whichever fields the
/// service happened to send.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberProfile {
    pub display_name: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawGroupMember")]
pub struct GroupMember {
    pub id: i64,
    pub member_id: i64,
    pub role: String,
    pub joined_at: String,
    pub profile: MemberProfile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGroupMember {
    #[serde(default)]
    id: i64,
    member_id: i64,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    joined_at: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    nickname: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    profile_image: Option<String>,
    #[serde(default)]
    profile_image_url: Option<String>,
    #[serde(default, rename = "profile_image")]
    profile_image_snake: Option<String>,
    #[serde(default, rename = "profile_image_url")]
    profile_image_url_snake: Option<String>,
}

fn first_present<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
}

impl From<RawGroupMember> for GroupMember {
    fn from(raw: RawGroupMember) -> Self {
        let display_name = first_present([raw.username, raw.nickname, raw.name]);
        let image_url = first_present([
            raw.profile_image,
            raw.profile_image_url,
            raw.profile_image_snake,
            raw.profile_image_url_snake,
        ]);
        GroupMember {
            id: raw.id,
            member_id: raw.member_id,
            role: raw.role.unwrap_or_default(),
            joined_at: raw.joined_at.unwrap_or_default(),
            profile: MemberProfile {
                display_name,
                image_url,
            },
        }
    }
}

impl GroupMember {
    pub fn placeholder_name(&self) -> String {
        placeholder_name(self.member_id)
    }

    pub fn formatted_joined_at(&self) -> String {
        format_date(&self.joined_at)
    }
}

pub fn placeholder_name(member_id: i64) -> String {
    format!("사용자{}", member_id)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyRoom {
    pub id: i64,
    #[serde(default)]
    pub group_id: i64,
    pub room_name: String,
    #[serde(default)]
    pub study_field: String,
    pub max_members: u32,
    #[serde(default)]
    pub current_members: u32,
    #[serde(default)]
    pub remaining_minutes: Option<u32>,
    /// Owning group's name, filled in locally for display.
    #[serde(skip)]
    pub group_name: Option<String>,
}

impl StudyRoom {
    pub fn is_full(&self) -> bool {
        self.current_members >= self.max_members
    }

    pub fn occupancy_label(&self) -> String {
        format!("{}/{}명", self.current_members, self.max_members)
    }

    pub fn remaining_label(&self) -> String {
        match self.remaining_minutes {
            Some(m) if m > 0 => format!("남은 시간: {}분", m),
            _ => "진행 중".to_string(),
        }
    }
}

/// Body of a room creation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoom {
    pub group_id: i64,
    pub room_name: String,
    pub study_field: String,
    pub study_hours: u32,
    pub max_members: u32,
}

/// The signed-in user as known to the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// Renders a service timestamp as a Korean-locale date (`2024. 5. 1.`).
/// Unparseable input is returned unchanged.
pub fn format_date(raw: &str) -> String {
    use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&chrono::Local).date_naive())
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|dt| dt.date())
                .ok()
        })
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok());

    match date {
        Some(d) => format!("{}. {}. {}.", d.year(), d.month(), d.day()),
        None => raw.to_string(),
    }
}
