//! 用户管理页

use std::sync::Arc;

use shared::models::User;

use crate::views::forms::UserForm;
use crate::views::state::{Loadable, Notice};
use crate::{ClientError, ClientResult, RmsApi};

pub struct UserAdmin {
    api: Arc<dyn RmsApi>,
    pub users: Loadable<Vec<User>>,
    pub notice: Option<Notice>,
}

impl UserAdmin {
    pub fn new(api: Arc<dyn RmsApi>) -> Self {
        Self {
            api,
            users: Loadable::Loading,
            notice: None,
        }
    }

    pub async fn load(&mut self) {
        self.users = Loadable::Loading;
        match self.api.list_users().await {
            Ok(users) => self.users = Loadable::Ready(users),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load users");
                self.users = Loadable::Failed;
                self.notice = Some(Notice::generic());
            }
        }
    }

    /// Username already taken by a loaded user other than `exclude_id`
    fn ensure_unique(&self, username: &str, exclude_id: Option<&str>) -> ClientResult<()> {
        let taken = self.users.ready().is_some_and(|users| {
            users
                .iter()
                .any(|u| u.username == username && Some(u.id.as_str()) != exclude_id)
        });
        if taken {
            return Err(ClientError::Conflict("Username already exists".into()));
        }
        Ok(())
    }

    fn settle<T>(&mut self, result: ClientResult<T>, success: &str) -> ClientResult<T> {
        self.notice = Some(match &result {
            Ok(_) => Notice::success(success),
            Err(e) => Notice::from_error(e),
        });
        result
    }

    pub async fn create(&mut self, form: &UserForm) -> ClientResult<User> {
        let result = self.try_create(form).await;
        self.settle(result, "User created")
    }

    async fn try_create(&mut self, form: &UserForm) -> ClientResult<User> {
        let payload = form.to_create()?;
        self.ensure_unique(&payload.username, None)?;
        let user = self.api.create_user(&payload).await?;
        if let Some(users) = self.users.ready_mut() {
            users.insert(0, user.clone());
        }
        Ok(user)
    }

    /// Validate, check for a duplicate username, PATCH and replace the row
    pub async fn edit(&mut self, id: &str, form: &UserForm) -> ClientResult<User> {
        let result = self.try_edit(id, form).await;
        self.settle(result, "User updated")
    }

    async fn try_edit(&mut self, id: &str, form: &UserForm) -> ClientResult<User> {
        let payload = form.to_update()?;
        if let Some(username) = &payload.username {
            self.ensure_unique(username, Some(id))?;
        }
        let user = self.api.update_user(id, &payload).await?;
        if let Some(row) = self
            .users
            .ready_mut()
            .and_then(|users| users.iter_mut().find(|u| u.id == user.id))
        {
            *row = user.clone();
        }
        Ok(user)
    }

    pub async fn delete(&mut self, id: &str) -> ClientResult<User> {
        let result = self.api.delete_user(id).await;
        if let (Ok(user), Some(users)) = (&result, self.users.ready_mut()) {
            users.retain(|u| u.id != user.id);
        }
        self.settle(result, "User deleted")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeApi, user};
    use shared::models::Role;

    fn form_for(user: &User) -> UserForm {
        UserForm {
            email: "someone@example.com".into(),
            telephone: "0812345678".into(),
            ..UserForm::from(user)
        }
    }

    #[tokio::test]
    async fn edit_replaces_row_locally() {
        let api = FakeApi::new();
        api.users.lock().unwrap().extend([user("u1", "alice", Role::Staff), user("u2", "bobby", Role::Chef)]);
        let mut admin = UserAdmin::new(api.clone());
        admin.load().await;

        let alice = admin.users.ready().unwrap()[0].clone();
        let form = UserForm {
            name: "Alice Cooper".into(),
            ..form_for(&alice)
        };
        let updated = admin.edit("u1", &form).await.unwrap();
        assert_eq!(updated.name, "Alice Cooper");
        assert_eq!(admin.users.ready().unwrap()[0].name, "Alice Cooper");
        assert_eq!(admin.notice, Some(Notice::success("User updated")));
    }

    #[tokio::test]
    async fn edit_rejects_sibling_username_but_allows_own() {
        let api = FakeApi::new();
        api.users.lock().unwrap().extend([user("u1", "alice", Role::Staff), user("u2", "bobby", Role::Chef)]);
        let mut admin = UserAdmin::new(api.clone());
        admin.load().await;

        let alice = admin.users.ready().unwrap()[0].clone();
        let clash = UserForm {
            username: "bobby".into(),
            ..form_for(&alice)
        };
        let err = admin.edit("u1", &clash).await.unwrap_err();
        assert!(matches!(err, ClientError::Conflict(_)));
        assert_eq!(admin.notice, Some(Notice::error("Username already exists")));
        assert_eq!(api.calls(), vec!["list_users"]);

        // keeping its own username is not a duplicate
        admin.edit("u1", &form_for(&alice)).await.unwrap();
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_server() {
        let api = FakeApi::new();
        api.users.lock().unwrap().push(user("u1", "alice", Role::Staff));
        let mut admin = UserAdmin::new(api.clone());
        admin.load().await;

        let form = UserForm {
            telephone: "123".into(),
            ..form_for(&admin.users.ready().unwrap()[0].clone())
        };
        assert!(admin.edit("u1", &form).await.is_err());
        assert!(admin.notice.as_ref().unwrap().is_error());
        assert_eq!(api.calls(), vec!["list_users"]);
    }

    #[tokio::test]
    async fn load_failure_marks_failed() {
        let api = FakeApi::new();
        api.fail_with(500);
        let mut admin = UserAdmin::new(api);
        admin.load().await;
        assert!(admin.users.is_failed());
        assert_eq!(admin.notice, Some(Notice::generic()));
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let api = FakeApi::new();
        api.users.lock().unwrap().extend([user("u1", "alice", Role::Staff), user("u2", "bobby", Role::Chef)]);
        let mut admin = UserAdmin::new(api);
        admin.load().await;

        admin.delete("u2").await.unwrap();
        let ids: Vec<_> = admin.users.ready().unwrap().iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["u1"]);
    }
}
