//! Management and board endpoints
//!
//! Generic REST CRUD over the guarded transport: `GET` lists take 1-based
//! `page`/`size` params, writes are JSON bodies, deletes go by id.

use crate::client::BackofficeClient;
use crate::error::ClientError;
use crate::types::{
    AssignMenusRequest, AssignRolesRequest, Board, BoardMaster, BoardSearch, BoardWrite, MenuInfo,
    RoleInfo, UserDetail,
};
use backoffice_core::{PageQuery, PageResponse};

impl BackofficeClient {
    // Users

    pub async fn list_users(
        &self,
        page: PageQuery,
    ) -> Result<PageResponse<UserDetail>, ClientError> {
        self.get_query("/api/v1/user/users", &page).await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<UserDetail, ClientError> {
        self.get(&format!("/api/v1/user/users/{user_id}")).await
    }

    pub async fn create_user(&self, user: &UserDetail) -> Result<(), ClientError> {
        self.post_empty("/api/v1/user/users", user).await
    }

    pub async fn update_user(&self, user: &UserDetail) -> Result<(), ClientError> {
        self.put_empty(&format!("/api/v1/user/users/{}", user.user_id), user)
            .await
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<(), ClientError> {
        self.delete_empty(&format!("/api/v1/user/users/{user_id}"))
            .await
    }

    pub async fn assign_user_roles(
        &self,
        request: &AssignRolesRequest,
    ) -> Result<(), ClientError> {
        self.post_empty("/api/v1/user/users/assign-roles", request)
            .await
    }

    // Roles

    pub async fn list_roles(&self, page: PageQuery) -> Result<PageResponse<RoleInfo>, ClientError> {
        self.get_query("/api/v1/user/roles", &page).await
    }

    pub async fn get_role(&self, role_id: &str) -> Result<RoleInfo, ClientError> {
        self.get(&format!("/api/v1/user/roles/{role_id}")).await
    }

    pub async fn create_role(&self, role: &RoleInfo) -> Result<(), ClientError> {
        self.post_empty("/api/v1/user/roles", role).await
    }

    pub async fn update_role(&self, role: &RoleInfo) -> Result<(), ClientError> {
        self.put_empty(&format!("/api/v1/user/roles/{}", role.role_id), role)
            .await
    }

    pub async fn delete_role(&self, role_id: &str) -> Result<(), ClientError> {
        self.delete_empty(&format!("/api/v1/user/roles/{role_id}"))
            .await
    }

    pub async fn assign_role_menus(
        &self,
        request: &AssignMenusRequest,
    ) -> Result<(), ClientError> {
        self.post_empty("/api/v1/user/roles/assign-menus", request)
            .await
    }

    // Menus

    pub async fn list_menus(&self, page: PageQuery) -> Result<PageResponse<MenuInfo>, ClientError> {
        self.get_query("/api/v1/user/menus", &page).await
    }

    pub async fn get_menu(&self, menu_id: &str) -> Result<MenuInfo, ClientError> {
        self.get(&format!("/api/v1/user/menus/{menu_id}")).await
    }

    pub async fn create_menu(&self, menu: &MenuInfo) -> Result<(), ClientError> {
        self.post_empty("/api/v1/user/menus", menu).await
    }

    pub async fn update_menu(&self, menu: &MenuInfo) -> Result<(), ClientError> {
        self.put_empty(&format!("/api/v1/user/menus/{}", menu.menu_id), menu)
            .await
    }

    pub async fn delete_menu(&self, menu_id: &str) -> Result<(), ClientError> {
        self.delete_empty(&format!("/api/v1/user/menus/{menu_id}"))
            .await
    }

    // Board masters

    pub async fn list_board_masters(
        &self,
        page: PageQuery,
    ) -> Result<PageResponse<BoardMaster>, ClientError> {
        self.get_query("/api/v1/mgmt/boards/master", &page).await
    }

    pub async fn get_board_master(&self, brd_id: &str) -> Result<BoardMaster, ClientError> {
        self.get(&format!("/api/v1/mgmt/boards/master/{brd_id}"))
            .await
    }

    pub async fn create_board_master(&self, master: &BoardMaster) -> Result<(), ClientError> {
        self.post_empty("/api/v1/mgmt/boards/master", master).await
    }

    pub async fn update_board_master(&self, master: &BoardMaster) -> Result<(), ClientError> {
        self.put_empty(
            &format!("/api/v1/mgmt/boards/master/{}", master.brd_id),
            master,
        )
        .await
    }

    pub async fn delete_board_master(&self, brd_id: &str) -> Result<(), ClientError> {
        self.delete_empty(&format!("/api/v1/mgmt/boards/master/{brd_id}"))
            .await
    }

    // Boards

    pub async fn list_boards(
        &self,
        search: &BoardSearch,
    ) -> Result<PageResponse<Board>, ClientError> {
        self.get_query("/api/v1/boards/board", search).await
    }

    pub async fn get_board(&self, board_id: i64) -> Result<Board, ClientError> {
        self.get(&format!("/api/v1/boards/board/{board_id}")).await
    }

    pub async fn create_board(&self, board: &BoardWrite) -> Result<(), ClientError> {
        self.post_empty("/api/v1/boards/board", board).await
    }

    pub async fn update_board(&self, board_id: i64, board: &BoardWrite) -> Result<(), ClientError> {
        self.put_empty(&format!("/api/v1/boards/board/{board_id}"), board)
            .await
    }

    pub async fn delete_board(&self, board_id: i64) -> Result<(), ClientError> {
        self.delete_empty(&format!("/api/v1/boards/board/{board_id}"))
            .await
    }
}
