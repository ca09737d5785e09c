use askama::Template;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

const DATE_DISPLAY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Render a date the way the admin forms and tables display it.
pub fn format_date(date: Date) -> String {
    date.format(DATE_DISPLAY_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// One validation message tied to a form field.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminFieldError {
    pub field: &'static str,
    pub message: String,
}

impl AdminFieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Clone)]
pub struct AdminBlogRowView {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub image_href: String,
    pub is_active: bool,
    pub detail_href: String,
    pub edit_href: String,
    pub delete_action: String,
    pub status_action: String,
}

#[derive(Clone)]
pub struct AdminBlogListView {
    pub heading: String,
    pub blogs: Vec<AdminBlogRowView>,
    pub new_blog_href: String,
}

#[derive(Template)]
#[template(path = "blogs/list.html")]
pub struct AdminBlogListTemplate {
    pub view: AdminBlogListView,
}

#[derive(Clone)]
pub struct AdminBlogDetailView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: String,
    pub image_href: String,
    pub is_active: bool,
    pub edit_href: String,
    pub back_href: String,
}

#[derive(Template)]
#[template(path = "blogs/detail.html")]
pub struct AdminBlogDetailTemplate {
    pub view: AdminBlogDetailView,
}

/// Shared between the create and edit forms; `current_image_href` is only
/// set when editing an existing entry.
#[derive(Clone)]
pub struct AdminBlogFormView {
    pub heading: String,
    pub action: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub current_image_href: Option<String>,
    pub field_errors: Vec<AdminFieldError>,
    pub error: Option<String>,
    pub back_href: String,
}

#[derive(Template)]
#[template(path = "blogs/form.html")]
pub struct AdminBlogFormTemplate {
    pub view: AdminBlogFormView,
}
