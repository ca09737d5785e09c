mod errors;
mod forms;
mod handlers;
mod multipart;

pub(super) use handlers::{
    admin_blog_create, admin_blog_delete, admin_blog_detail, admin_blog_edit, admin_blog_new,
    admin_blog_status, admin_blog_update, admin_blogs,
};
