//! CRUD handlers for blogs - list, detail, create, edit, status, delete.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Multipart;
use tracing::{error, warn};

use crate::{
    application::{
        admin::blogs::{AdminBlogError, CreateBlogCommand, UpdateBlogCommand, validate_photo},
        error::HttpError,
    },
    domain::entities::BlogRecord,
    infra::http::admin::AdminState,
    presentation::{admin::views as admin_views, views::render_template_response},
};

use super::errors::{admin_blog_error, blog_payload_error};
use super::forms::parse_blog_fields;
use super::multipart::{BlogFormPayload, read_blog_form};

const SOURCE_BASE: &str = "infra::http::admin_blogs";

pub(crate) async fn admin_blogs(State(state): State<AdminState>) -> Response {
    let blogs = match state.blogs.list().await {
        Ok(blogs) => blogs,
        Err(err) => return admin_blog_error("infra::http::admin_blogs", err).into_response(),
    };

    let view = admin_views::AdminBlogListView {
        heading: "Blogs".to_string(),
        blogs: blogs.iter().map(blog_row).collect(),
        new_blog_href: "/blogs/new".to_string(),
    };

    render_template_response(admin_views::AdminBlogListTemplate { view }, StatusCode::OK)
}

pub(crate) async fn admin_blog_new() -> Response {
    render_form(new_form_view(None, Vec::new(), None))
}

pub(crate) async fn admin_blog_create(
    State(state): State<AdminState>,
    mut multipart: Multipart,
) -> Response {
    let payload = match read_blog_form(&mut multipart).await {
        Ok(payload) => payload,
        Err(err) => {
            return blog_payload_error("infra::http::admin_blog_create", err).into_response();
        }
    };

    let mut field_errors = Vec::new();

    let fields = match parse_blog_fields(&payload.title, &payload.description, &payload.date) {
        Ok(fields) => Some(fields),
        Err(errors) => {
            field_errors.extend(errors);
            None
        }
    };

    match payload.photo.as_ref() {
        Some(photo) => {
            if let Err(err) = validate_photo(&photo.content_type, photo.data.len() as u64) {
                field_errors.push(admin_views::AdminFieldError::new("Photo", err.to_string()));
            }
        }
        None => {
            field_errors.push(admin_views::AdminFieldError::new("Photo", "Photo is required"));
        }
    }

    let (fields, photo) = match (fields, payload.photo.as_ref(), field_errors.is_empty()) {
        (Some(fields), Some(photo), true) => (fields, photo),
        _ => return render_form(new_form_view(Some(&payload), field_errors, None)),
    };

    let stored = match state.images.store(&photo.filename, photo.data.clone()).await {
        Ok(stored) => stored,
        Err(err) => {
            error!(
                target = SOURCE_BASE,
                error = %err,
                "failed to store uploaded image"
            );
            return render_form(new_form_view(
                Some(&payload),
                Vec::new(),
                Some(format!("Could not store uploaded image: {err}")),
            ));
        }
    };

    let command = CreateBlogCommand {
        title: fields.title,
        description: fields.description,
        date: fields.date,
        image: stored.stored_path.clone(),
    };

    match state.blogs.create_blog(command).await {
        Ok(_) => Redirect::to("/blogs").into_response(),
        Err(err) => {
            error!(
                target = SOURCE_BASE,
                error = %err,
                "failed to persist new blog"
            );
            if let Err(remove_err) = state.images.delete(&stored.stored_path).await {
                warn!(
                    target = SOURCE_BASE,
                    error = %remove_err,
                    "failed to roll back stored image after persistence error"
                );
            }
            render_form(new_form_view(
                Some(&payload),
                Vec::new(),
                Some(err.to_string()),
            ))
        }
    }
}

pub(crate) async fn admin_blog_detail(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> Response {
    let blog = match state.blogs.load(id).await {
        Ok(Some(blog)) => blog,
        Ok(None) => return blog_not_found("infra::http::admin_blog_detail", id),
        Err(err) => return admin_blog_error("infra::http::admin_blog_detail", err).into_response(),
    };

    let view = admin_views::AdminBlogDetailView {
        id: blog.id,
        title: blog.title.clone(),
        description: blog.description.clone(),
        date: admin_views::format_date(blog.date),
        image_href: image_href(&blog.image),
        is_active: blog.is_active,
        edit_href: format!("/blogs/{}/edit", blog.id),
        back_href: "/blogs".to_string(),
    };

    render_template_response(admin_views::AdminBlogDetailTemplate { view }, StatusCode::OK)
}

pub(crate) async fn admin_blog_edit(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> Response {
    let blog = match state.blogs.load(id).await {
        Ok(Some(blog)) => blog,
        Ok(None) => return blog_not_found("infra::http::admin_blog_edit", id),
        Err(err) => return admin_blog_error("infra::http::admin_blog_edit", err).into_response(),
    };

    render_form(edit_form_view(&blog, Vec::new(), None))
}

pub(crate) async fn admin_blog_update(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Response {
    let current = match state.blogs.load(id).await {
        Ok(Some(blog)) => blog,
        Ok(None) => return blog_not_found("infra::http::admin_blog_update", id),
        Err(err) => return admin_blog_error("infra::http::admin_blog_update", err).into_response(),
    };

    let payload = match read_blog_form(&mut multipart).await {
        Ok(payload) => payload,
        Err(err) => {
            return blog_payload_error("infra::http::admin_blog_update", err).into_response();
        }
    };

    let fields = match parse_blog_fields(&payload.title, &payload.description, &payload.date) {
        Ok(fields) => fields,
        Err(errors) => return render_form(edit_form_view(&current, errors, None)),
    };

    let mut new_image = None;
    if let Some(photo) = payload.photo.as_ref() {
        if let Err(err) = validate_photo(&photo.content_type, photo.data.len() as u64) {
            let errors = vec![admin_views::AdminFieldError::new("Photo", err.to_string())];
            return render_form(edit_form_view(&current, errors, None));
        }

        if let Err(delete_err) = state.images.delete(&current.image).await {
            warn!(
                target = SOURCE_BASE,
                error = %delete_err,
                "failed to remove previous image during edit"
            );
        }

        match state.images.store(&photo.filename, photo.data.clone()).await {
            Ok(stored) => new_image = Some(stored),
            Err(err) => {
                error!(
                    target = SOURCE_BASE,
                    error = %err,
                    "failed to store replacement image"
                );
                return render_form(edit_form_view(
                    &current,
                    Vec::new(),
                    Some(format!("Could not store uploaded image: {err}")),
                ));
            }
        }
    }

    let command = UpdateBlogCommand {
        id,
        title: fields.title,
        description: fields.description,
        date: fields.date,
        image: new_image.as_ref().map(|stored| stored.stored_path.clone()),
    };

    match state.blogs.update_blog(command).await {
        Ok(_) => Redirect::to("/blogs").into_response(),
        Err(err) => {
            error!(
                target = SOURCE_BASE,
                error = %err,
                blog_id = id,
                "failed to persist blog update"
            );
            if let Some(stored) = new_image {
                if let Err(remove_err) = state.images.delete(&stored.stored_path).await {
                    warn!(
                        target = SOURCE_BASE,
                        error = %remove_err,
                        "failed to roll back stored image after persistence error"
                    );
                }
            }
            match err {
                AdminBlogError::NotFound => blog_not_found("infra::http::admin_blog_update", id),
                err => render_form(edit_form_view(&current, Vec::new(), Some(err.to_string()))),
            }
        }
    }
}

pub(crate) async fn admin_blog_delete(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> Response {
    match state.blogs.delete_blog(id).await {
        Ok(record) => {
            if let Err(err) = state.images.delete(&record.image).await {
                warn!(
                    target = SOURCE_BASE,
                    error = %err,
                    blog_id = record.id,
                    "failed to remove stored image during delete"
                );
            }
            StatusCode::OK.into_response()
        }
        Err(AdminBlogError::NotFound) => blog_not_found("infra::http::admin_blog_delete", id),
        Err(err) => admin_blog_error("infra::http::admin_blog_delete", err).into_response(),
    }
}

pub(crate) async fn admin_blog_status(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> Response {
    match state.blogs.toggle_status(id).await {
        Ok(record) => Json(record.is_active).into_response(),
        Err(AdminBlogError::NotFound) => blog_not_found("infra::http::admin_blog_status", id),
        Err(err) => admin_blog_error("infra::http::admin_blog_status", err).into_response(),
    }
}

fn blog_not_found(source: &'static str, id: i64) -> Response {
    HttpError::new(
        source,
        StatusCode::NOT_FOUND,
        "Blog not found",
        format!("Blog `{id}` could not be found"),
    )
    .into_response()
}

fn image_href(stored_path: &str) -> String {
    format!("/img/{stored_path}")
}

fn blog_row(blog: &BlogRecord) -> admin_views::AdminBlogRowView {
    admin_views::AdminBlogRowView {
        id: blog.id,
        title: blog.title.clone(),
        date: admin_views::format_date(blog.date),
        image_href: image_href(&blog.image),
        is_active: blog.is_active,
        detail_href: format!("/blogs/{}", blog.id),
        edit_href: format!("/blogs/{}/edit", blog.id),
        delete_action: format!("/blogs/{}/delete", blog.id),
        status_action: format!("/blogs/{}/status", blog.id),
    }
}

fn new_form_view(
    payload: Option<&BlogFormPayload>,
    field_errors: Vec<admin_views::AdminFieldError>,
    error: Option<String>,
) -> admin_views::AdminBlogFormView {
    admin_views::AdminBlogFormView {
        heading: "New blog".to_string(),
        action: "/blogs/create".to_string(),
        title: payload.map(|p| p.title.clone()).unwrap_or_default(),
        description: payload.map(|p| p.description.clone()).unwrap_or_default(),
        date: payload.map(|p| p.date.clone()).unwrap_or_default(),
        current_image_href: None,
        field_errors,
        error,
        back_href: "/blogs".to_string(),
    }
}

fn edit_form_view(
    blog: &BlogRecord,
    field_errors: Vec<admin_views::AdminFieldError>,
    error: Option<String>,
) -> admin_views::AdminBlogFormView {
    admin_views::AdminBlogFormView {
        heading: "Edit blog".to_string(),
        action: format!("/blogs/{}/edit", blog.id),
        title: blog.title.clone(),
        description: blog.description.clone(),
        date: admin_views::format_date(blog.date),
        current_image_href: Some(image_href(&blog.image)),
        field_errors,
        error,
        back_href: "/blogs".to_string(),
    }
}

fn render_form(view: admin_views::AdminBlogFormView) -> Response {
    render_template_response(admin_views::AdminBlogFormTemplate { view }, StatusCode::OK)
}
