//! Router-level tests for the blog admin surface, driven against an
//! in-memory repository and a temporary image storage root.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use bytes::Bytes;
use http_body_util::BodyExt;
use tempfile::TempDir;
use time::macros::date;
use tower::ServiceExt;

use vetrina::{
    application::{
        admin::blogs::AdminBlogService,
        repos::{BlogsRepo, CreateBlogParams, RepoError, UpdateBlogParams},
    },
    domain::entities::BlogRecord,
    infra::{
        db::PostgresRepositories,
        http::{AdminState, build_admin_router},
        uploads::ImageStorage,
    },
};

const BOUNDARY: &str = "vetrina-test-boundary";
const UPLOAD_LIMIT_BYTES: u64 = 1024 * 1024;

#[derive(Default)]
struct MemoryBlogsRepo {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    next_id: i64,
    blogs: BTreeMap<i64, BlogRecord>,
}

#[async_trait]
impl BlogsRepo for MemoryBlogsRepo {
    async fn list_all(&self) -> Result<Vec<BlogRecord>, RepoError> {
        let state = self.state.lock().expect("repo lock");
        Ok(state.blogs.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<BlogRecord>, RepoError> {
        let state = self.state.lock().expect("repo lock");
        Ok(state.blogs.get(&id).cloned())
    }

    async fn insert(&self, params: CreateBlogParams) -> Result<BlogRecord, RepoError> {
        let mut state = self.state.lock().expect("repo lock");
        state.next_id += 1;
        let record = BlogRecord {
            id: state.next_id,
            title: params.title,
            description: params.description,
            date: params.date,
            image: params.image,
            is_active: false,
        };
        state.blogs.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, params: UpdateBlogParams) -> Result<BlogRecord, RepoError> {
        let mut state = self.state.lock().expect("repo lock");
        let record = state.blogs.get_mut(&params.id).ok_or(RepoError::NotFound)?;
        record.title = params.title;
        record.description = params.description;
        record.date = params.date;
        if let Some(image) = params.image {
            record.image = image;
        }
        Ok(record.clone())
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<BlogRecord, RepoError> {
        let mut state = self.state.lock().expect("repo lock");
        let record = state.blogs.get_mut(&id).ok_or(RepoError::NotFound)?;
        record.is_active = active;
        Ok(record.clone())
    }

    async fn remove(&self, id: i64) -> Result<(), RepoError> {
        let mut state = self.state.lock().expect("repo lock");
        state.blogs.remove(&id).ok_or(RepoError::NotFound)?;
        Ok(())
    }
}

struct Harness {
    router: Router,
    repo: Arc<MemoryBlogsRepo>,
    storage: Arc<ImageStorage>,
    storage_dir: TempDir,
}

fn harness() -> Harness {
    let repo = Arc::new(MemoryBlogsRepo::default());
    let storage_dir = tempfile::tempdir().expect("tempdir");
    let storage =
        Arc::new(ImageStorage::new(storage_dir.path().to_path_buf()).expect("image storage"));

    let pool = PostgresRepositories::connect_lazy("postgres://localhost/vetrina_test", 1)
        .expect("lazy pool");

    let state = AdminState {
        db: Arc::new(PostgresRepositories::new(pool)),
        blogs: Arc::new(AdminBlogService::new(repo.clone())),
        images: storage.clone(),
        upload_limit_bytes: UPLOAD_LIMIT_BYTES,
    };

    let router = build_admin_router(state, UPLOAD_LIMIT_BYTES as usize);

    Harness {
        router,
        repo,
        storage,
        storage_dir,
    }
}

impl Harness {
    async fn seed_blog(&self, title: &str) -> BlogRecord {
        let stored = self
            .storage
            .store("cover.png", Bytes::from_static(b"seeded-image"))
            .await
            .expect("store seed image");

        self.repo
            .insert(CreateBlogParams {
                title: title.to_string(),
                description: "Seeded description".to_string(),
                date: date!(2024 - 01 - 01),
                image: stored.stored_path,
            })
            .await
            .expect("seed blog")
    }

    fn stored_file_count(&self) -> usize {
        std::fs::read_dir(self.storage_dir.path())
            .expect("read storage dir")
            .count()
    }

    async fn blogs(&self) -> Vec<BlogRecord> {
        self.repo.list_all().await.expect("list blogs")
    }
}

fn multipart_body(fields: &[(&str, &str)], photo: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, content_type, data)) = photo {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"photo\"; \
                 filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request")
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn post_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

const VALID_FIELDS: &[(&str, &str)] = &[
    ("title", "A"),
    ("description", "B"),
    ("date", "2024-01-01"),
];

#[tokio::test]
async fn create_persists_row_and_stored_image() {
    let harness = harness();
    let payload = vec![1u8; 50 * 1024];
    let body = multipart_body(VALID_FIELDS, Some(("x.png", "image/png", &payload)));

    let response = harness
        .router
        .clone()
        .oneshot(multipart_request("/blogs/create", body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/blogs")
    );

    let blogs = harness.blogs().await;
    assert_eq!(blogs.len(), 1);
    let blog = &blogs[0];
    assert_eq!(blog.id, 1);
    assert_eq!(blog.title, "A");
    assert_eq!(blog.description, "B");
    assert_eq!(blog.date, date!(2024 - 01 - 01));
    assert!(!blog.is_active);
    assert!(blog.image.ends_with(".png"));
    assert!(harness.storage.exists(&blog.image));
}

#[tokio::test]
async fn create_rejects_non_image_uploads() {
    let harness = harness();
    let body = multipart_body(
        VALID_FIELDS,
        Some(("notes.pdf", "application/pdf", b"%PDF-1.4")),
    );

    let response = harness
        .router
        .clone()
        .oneshot(multipart_request("/blogs/create", body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("File type must be image"));

    assert!(harness.blogs().await.is_empty());
    assert_eq!(harness.stored_file_count(), 0);
}

#[tokio::test]
async fn create_rejects_oversized_uploads() {
    let harness = harness();
    let payload = vec![1u8; 200 * 1024 + 1];
    let body = multipart_body(VALID_FIELDS, Some(("x.png", "image/png", &payload)));

    let response = harness
        .router
        .clone()
        .oneshot(multipart_request("/blogs/create", body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("File size must be max 200kb"));

    assert!(harness.blogs().await.is_empty());
    assert_eq!(harness.stored_file_count(), 0);
}

#[tokio::test]
async fn create_requires_a_photo() {
    let harness = harness();
    let body = multipart_body(VALID_FIELDS, None);

    let response = harness
        .router
        .clone()
        .oneshot(multipart_request("/blogs/create", body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Photo is required"));
    assert!(harness.blogs().await.is_empty());
}

#[tokio::test]
async fn create_reports_missing_fields() {
    let harness = harness();
    let body = multipart_body(
        &[("title", ""), ("description", ""), ("date", "")],
        Some(("x.png", "image/png", b"fake image bytes")),
    );

    let response = harness
        .router
        .clone()
        .oneshot(multipart_request("/blogs/create", body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Title is required"));
    assert!(html.contains("Description is required"));
    assert!(html.contains("Date is required"));
    assert!(harness.blogs().await.is_empty());
    assert_eq!(harness.stored_file_count(), 0);
}

#[tokio::test]
async fn list_renders_created_blogs() {
    let harness = harness();
    harness.seed_blog("Seeded title").await;

    let response = harness
        .router
        .clone()
        .oneshot(get_request("/blogs"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Seeded title"));
    assert!(html.contains("Inactive"));
}

#[tokio::test]
async fn new_form_renders_empty() {
    let harness = harness();

    let response = harness
        .router
        .clone()
        .oneshot(get_request("/blogs/new"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("New blog"));
    assert!(html.contains("name=\"photo\""));
}

#[tokio::test]
async fn detail_renders_a_single_blog() {
    let harness = harness();
    let blog = harness.seed_blog("Detail title").await;

    let response = harness
        .router
        .clone()
        .oneshot(get_request(&format!("/blogs/{}", blog.id)))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Detail title"));
    assert!(html.contains("Seeded description"));
}

#[tokio::test]
async fn detail_of_unknown_id_is_not_found() {
    let harness = harness();

    let response = harness
        .router
        .clone()
        .oneshot(get_request("/blogs/999"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_is_a_bad_request() {
    let harness = harness();

    let response = harness
        .router
        .clone()
        .oneshot(get_request("/blogs/not-a-number/edit"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn edit_form_is_prefilled() {
    let harness = harness();
    let blog = harness.seed_blog("Edit me").await;

    let response = harness
        .router
        .clone()
        .oneshot(get_request(&format!("/blogs/{}/edit", blog.id)))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Edit me"));
    assert!(html.contains("2024-01-01"));
    assert!(html.contains("Current image"));
}

#[tokio::test]
async fn edit_without_replacement_keeps_the_image() {
    let harness = harness();
    let blog = harness.seed_blog("Before").await;
    let original_image = blog.image.clone();

    let body = multipart_body(
        &[
            ("title", "After"),
            ("description", "Updated description"),
            ("date", "2024-02-02"),
        ],
        None,
    );

    let response = harness
        .router
        .clone()
        .oneshot(multipart_request(&format!("/blogs/{}/edit", blog.id), body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let updated = harness
        .repo
        .find_by_id(blog.id)
        .await
        .expect("find")
        .expect("row still present");
    assert_eq!(updated.title, "After");
    assert_eq!(updated.description, "Updated description");
    assert_eq!(updated.date, date!(2024 - 02 - 02));
    assert_eq!(updated.image, original_image);
    assert!(harness.storage.exists(&original_image));
}

#[tokio::test]
async fn edit_with_replacement_swaps_the_stored_file() {
    let harness = harness();
    let blog = harness.seed_blog("Before").await;
    let original_image = blog.image.clone();

    let body = multipart_body(
        &[
            ("title", "After"),
            ("description", "Updated description"),
            ("date", "2024-02-02"),
        ],
        Some(("replacement.png", "image/png", b"replacement bytes")),
    );

    let response = harness
        .router
        .clone()
        .oneshot(multipart_request(&format!("/blogs/{}/edit", blog.id), body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let updated = harness
        .repo
        .find_by_id(blog.id)
        .await
        .expect("find")
        .expect("row still present");
    assert_ne!(updated.image, original_image);
    assert!(!harness.storage.exists(&original_image));
    assert!(harness.storage.exists(&updated.image));
}

#[tokio::test]
async fn edit_with_invalid_file_leaves_the_row_unchanged() {
    let harness = harness();
    let blog = harness.seed_blog("Untouched").await;

    let body = multipart_body(
        &[
            ("title", "Should not land"),
            ("description", "Should not land"),
            ("date", "2025-01-01"),
        ],
        Some(("y.pdf", "application/pdf", b"%PDF-1.4")),
    );

    let response = harness
        .router
        .clone()
        .oneshot(multipart_request(&format!("/blogs/{}/edit", blog.id), body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("File type must be image"));

    let unchanged = harness
        .repo
        .find_by_id(blog.id)
        .await
        .expect("find")
        .expect("row still present");
    assert_eq!(unchanged.title, "Untouched");
    assert_eq!(unchanged.image, blog.image);
    assert!(harness.storage.exists(&blog.image));
}

#[tokio::test]
async fn edit_of_unknown_id_is_not_found() {
    let harness = harness();
    let body = multipart_body(VALID_FIELDS, None);

    let response = harness
        .router
        .clone()
        .oneshot(multipart_request("/blogs/999/edit", body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_row_and_stored_file() {
    let harness = harness();
    let blog = harness.seed_blog("Doomed").await;

    let response = harness
        .router
        .clone()
        .oneshot(post_request(&format!("/blogs/{}/delete", blog.id)))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(harness.blogs().await.is_empty());
    assert!(!harness.storage.exists(&blog.image));
}

#[tokio::test]
async fn delete_of_unknown_id_mutates_nothing() {
    let harness = harness();
    let blog = harness.seed_blog("Survivor").await;

    let response = harness
        .router
        .clone()
        .oneshot(post_request("/blogs/999/delete"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(harness.blogs().await.len(), 1);
    assert!(harness.storage.exists(&blog.image));
}

#[tokio::test]
async fn status_toggle_returns_the_new_value_and_double_toggle_restores() {
    let harness = harness();
    let blog = harness.seed_blog("Toggle me").await;
    assert!(!blog.is_active);

    let response = harness
        .router
        .clone()
        .oneshot(post_request(&format!("/blogs/{}/status", blog.id)))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "true");

    let response = harness
        .router
        .clone()
        .oneshot(post_request(&format!("/blogs/{}/status", blog.id)))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "false");

    let settled = harness
        .repo
        .find_by_id(blog.id)
        .await
        .expect("find")
        .expect("row still present");
    assert_eq!(settled.is_active, blog.is_active);
}

#[tokio::test]
async fn status_of_unknown_id_is_not_found() {
    let harness = harness();

    let response = harness
        .router
        .clone()
        .oneshot(post_request("/blogs/999/status"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stored_images_are_served_under_img() {
    let harness = harness();
    let blog = harness.seed_blog("With image").await;

    let response = harness
        .router
        .clone()
        .oneshot(get_request(&format!("/img/{}", blog.image)))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("image/png")
    );
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    assert_eq!(&bytes[..], b"seeded-image");
}

#[tokio::test]
async fn unknown_image_paths_are_not_found() {
    let harness = harness();

    let response = harness
        .router
        .clone()
        .oneshot(get_request("/img/missing.png"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn root_redirects_to_the_blog_list() {
    let harness = harness();

    let response = harness
        .router
        .clone()
        .oneshot(get_request("/"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/blogs")
    );
}
