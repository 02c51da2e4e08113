//! The to-do page and its actions.

use crate::entities::todo_item::{self, ActiveModel, Entity as TodoItem};
use crate::error::{TodoError, TodoResult};
use crate::forms::{BoundForm, TodoCreateForm};
use crate::templates::{self, Templates, url_function};
use axum::extract::{Form, FromRequest};
use axum::response::Html;
use htmx_view::prelude::{
    Fragment, Request, Response, StatusCode, Swap, UrlResolver, empty, htmx_view,
};
use minijinja::context;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set};

/// One page listing the to-do items, with create, toggle and delete actions.
///
/// Mounted with `htmx_urls("todos", "todo")` it serves:
/// - `POST /todos/create/` (`todo->create`)
/// - `POST /todos/toggle/<int:todo_id>/` (`todo->toggle`)
/// - `POST /todos/delete/<int:todo_id>/` (`todo->delete`)
pub struct TodoView {
    db: DatabaseConnection,
    templates: Templates,
}

#[htmx_view]
impl TodoView {
    pub fn new(db: DatabaseConnection, templates: Templates) -> Self {
        Self { db, templates }
    }

    async fn get(&self, request: Request) -> TodoResult<Html<String>> {
        let urls = UrlResolver::from_extensions(request.extensions())?;
        let todos = TodoItem::find()
            .order_by_asc(todo_item::Column::Id)
            .all(&self.db)
            .await?;
        let body = self.templates.render(
            templates::TODO_PAGE,
            context! {
                form => BoundForm::default(),
                todos => todos,
                url => url_function(urls),
            },
        )?;
        Ok(Html(body))
    }

    #[post]
    async fn hx_create(&self, request: Request) -> TodoResult<Fragment> {
        let urls = UrlResolver::from_extensions(request.extensions())?;
        let Form(input) = Form::<TodoCreateForm>::from_request(request, &()).await?;

        let title = match input.clean() {
            Ok(title) => title,
            Err(form) => {
                tracing::debug!(errors = ?form.errors, "create form rejected");
                let body = self.templates.render_block(
                    templates::TODO_PAGE,
                    "form",
                    context! { form => form, url => url_function(urls) },
                )?;
                return Ok(Fragment::new(body).retarget("this").reswap(Swap::OuterHtml));
            }
        };

        let todo = ActiveModel {
            title: Set(title),
            is_done: Set(false),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        tracing::info!(id = todo.id, "todo item created");

        self.render_item(todo, urls)
    }

    #[post]
    async fn hx_toggle(&self, request: Request, todo_id: i32) -> TodoResult<Fragment> {
        let urls = UrlResolver::from_extensions(request.extensions())?;
        let todo = self.find(todo_id).await?;

        let is_done = !todo.is_done;
        let mut active: ActiveModel = todo.into();
        active.is_done = Set(is_done);
        let todo = active.update(&self.db).await?;
        tracing::info!(id = todo.id, is_done, "todo item toggled");

        self.render_item(todo, urls)
    }

    #[post]
    async fn hx_delete(&self, _request: Request, todo_id: i32) -> TodoResult<Response> {
        let todo = self.find(todo_id).await?;
        todo.delete(&self.db).await?;
        tracing::info!(id = todo_id, "todo item deleted");
        Ok(empty(StatusCode::NO_CONTENT))
    }

    async fn find(&self, todo_id: i32) -> TodoResult<todo_item::Model> {
        TodoItem::find_by_id(todo_id)
            .one(&self.db)
            .await?
            .ok_or(TodoError::NotFound(todo_id))
    }

    fn render_item(&self, todo: todo_item::Model, urls: UrlResolver) -> TodoResult<Fragment> {
        let body = self.templates.render(
            templates::TODO_ITEM,
            context! { todo => todo, url => url_function(urls) },
        )?;
        Ok(Fragment::new(body))
    }
}
