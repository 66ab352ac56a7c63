//! Request and response types for the backoffice API

use backoffice_core::UserInfo;
use serde::{Deserialize, Serialize};

/// Login request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_id: String,
    pub user_pwd: String,
}

/// Refresh request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Payload of a successful login or refresh.
///
/// `refresh_token` is optional in refresh responses: rotation is
/// backend-driven, and a missing value means the stored one stays valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: UserInfo,
}

/// Full user record from the management endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub user_id: String,
    pub user_email: String,
    pub user_mobile: String,
    pub user_name: String,
    pub user_nick: String,
    #[serde(default)]
    pub user_msg: Option<String>,
    #[serde(default)]
    pub user_desc: Option<String>,
    pub user_stat_cd: String,
    #[serde(default)]
    pub user_snsid: Option<String>,
    pub use_yn: String,
    pub account_non_lock: String,
    pub password_lock_cnt: i32,
    #[serde(default)]
    pub account_start_dt: Option<String>,
    #[serde(default)]
    pub account_end_dt: Option<String>,
    #[serde(default)]
    pub password_expire_dt: Option<String>,
    pub mdm_yn: String,
    #[serde(default)]
    pub sys_insert_dtm: Option<String>,
    #[serde(default)]
    pub sys_update_dtm: Option<String>,
}

/// Role record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleInfo {
    pub role_id: String,
    pub role_name: String,
    #[serde(default)]
    pub role_desc: Option<String>,
    pub use_yn: String,
}

/// Menu record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuInfo {
    pub menu_id: String,
    pub menu_name: String,
    pub menu_lvl: i32,
    pub menu_uri: String,
    #[serde(default)]
    pub menu_img_uri: Option<String>,
    #[serde(default)]
    pub upper_menu_id: Option<String>,
    #[serde(default)]
    pub menu_desc: Option<String>,
    pub menu_seq: i32,
    pub use_yn: String,
}

/// Board master (a board's configuration)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMaster {
    pub brd_id: String,
    pub brd_nm: String,
    #[serde(default)]
    pub brd_desc: Option<String>,
    pub reply_use_yn: String,
    pub file_use_yn: String,
    pub file_max_cnt: i32,
    pub use_yn: String,
}

/// Attachment on a board post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardFile {
    pub file_id: i64,
    pub board_id: i64,
    pub file_path: String,
    pub org_file_nm: String,
    pub file_size: i64,
    pub file_ext: String,
}

/// Board post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub board_id: i64,
    pub brd_id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub contents: Option<String>,
    pub hit_cnt: i64,
    pub secret_yn: String,
    pub use_yn: String,
    #[serde(default)]
    pub sys_insert_dtm: Option<String>,
    #[serde(default)]
    pub sys_insert_user_id: Option<String>,
    #[serde(default)]
    pub sys_update_dtm: Option<String>,
    #[serde(default)]
    pub sys_update_user_id: Option<String>,
    #[serde(default)]
    pub file_list: Option<Vec<BoardFile>>,
}

/// Fields accepted when creating or updating a board post
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardWrite {
    pub brd_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    pub secret_yn: String,
    pub use_yn: String,
}

/// Search parameters for board listings
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSearch {
    pub brd_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub page: u32,
    pub size: u32,
}

/// Role assignment for a user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRolesRequest {
    pub user_id: String,
    pub role_ids: Vec<String>,
}

/// Menu assignment for a role
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignMenusRequest {
    pub role_id: String,
    pub menu_ids: Vec<String>,
}
