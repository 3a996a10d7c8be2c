//! Shared fixtures for the form integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex, OnceLock, Weak};
use std::time::Duration;

use serde_json::json;

use cover_studio::api::GenClient;
use cover_studio::context::{AppContext, BoxFuture, CoverUpdate};
use cover_studio::forms::FormServices;
use cover_studio::media::MediaFile;
use cover_studio::models::{Cover, User, UserCredits};
use cover_studio::navigation::{History, Navigator, Route};
use cover_studio::notify::{Notifier, Toast, ToastLog};

/// Address nothing listens on; requests fail in transport.
pub const UNREACHABLE: &str = "http://127.0.0.1:9";

/// In-memory context that counts refreshes instead of calling the backend.
#[derive(Default)]
pub struct MockContext {
    user: Mutex<Option<User>>,
    covers: Mutex<Vec<Cover>>,
    refreshes: AtomicUsize,
}

impl MockContext {
    pub fn signed_in(left_credits: i64) -> Self {
        let ctx = Self::default();
        *ctx.user.lock().unwrap() = Some(user_with_credits(left_credits));
        ctx
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn with_covers(self, covers: Vec<Cover>) -> Self {
        *self.covers.lock().unwrap() = covers;
        self
    }

    pub fn set_user(&self, user: Option<User>) {
        *self.user.lock().unwrap() = user;
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

impl AppContext for MockContext {
    fn user(&self) -> Option<User> {
        self.user.lock().unwrap().clone()
    }

    fn covers(&self) -> Vec<Cover> {
        self.covers.lock().unwrap().clone()
    }

    fn set_covers(&self, update: CoverUpdate) {
        let mut covers = self.covers.lock().unwrap();
        let previous = std::mem::take(&mut *covers);
        *covers = update.resolve(previous);
    }

    fn fetch_user_info(&self) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
        })
    }
}

/// Services plus handles to every recorder.
pub struct Harness {
    pub services: FormServices,
    pub context: Arc<MockContext>,
    pub toasts: Arc<ToastLog>,
    pub history: Arc<History>,
}

impl Harness {
    pub fn new(context: MockContext, base_url: &str) -> Self {
        let context = Arc::new(context);
        let toasts = Arc::new(ToastLog::new());
        let history = Arc::new(History::new());
        let client = GenClient::with_base_url(base_url).unwrap();
        let services = FormServices::new(context.clone(), toasts.clone(), history.clone(), client);
        Self {
            services,
            context,
            toasts,
            history,
        }
    }

    pub fn cover_ids(&self) -> Vec<String> {
        self.context.covers().iter().filter_map(Cover::id).collect()
    }
}

pub fn user_with_credits(left_credits: i64) -> User {
    User {
        uuid: "user-1".to_string(),
        email: "user@example.com".to_string(),
        credits: Some(UserCredits {
            left_credits,
            ..UserCredits::default()
        }),
        ..User::default()
    }
}

pub fn cover(id: &str) -> Cover {
    Cover::new(json!({ "id": id }))
}

pub fn png(name: &str) -> MediaFile {
    MediaFile::new(name, "image/png", b"\x89PNG\r\n".to_vec())
}

pub fn jpeg(name: &str) -> MediaFile {
    MediaFile::new(name, "image/jpeg", vec![0xFF, 0xD8, 0xFF])
}

pub fn gif(name: &str) -> MediaFile {
    MediaFile::new(name, "image/gif", b"GIF89a".to_vec())
}

pub fn mp4(name: &str) -> MediaFile {
    MediaFile::new(name, "video/mp4", vec![0, 0, 0, 0x18])
}

pub fn webm(name: &str) -> MediaFile {
    MediaFile::new(name, "video/webm", vec![0x1A, 0x45, 0xDF, 0xA3])
}

pub fn mov(name: &str) -> MediaFile {
    MediaFile::new(name, "video/quicktime", vec![0, 0, 0, 0x14])
}

/// Notifier and navigator that read the form back on every call, the way a
/// UI re-renders while handling a toast or a route change.
pub struct ReadBack<F> {
    form: OnceLock<Weak<F>>,
    read: fn(&F),
    reads: AtomicUsize,
}

impl<F> ReadBack<F> {
    pub fn new(read: fn(&F)) -> Self {
        Self {
            form: OnceLock::new(),
            read,
            reads: AtomicUsize::new(0),
        }
    }

    pub fn attach(&self, form: &Arc<F>) {
        let _ = self.form.set(Arc::downgrade(form));
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn read_back(&self) {
        if let Some(form) = self.form.get().and_then(Weak::upgrade) {
            (self.read)(&form);
            self.reads.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl<F: Send + Sync> Notifier for ReadBack<F> {
    fn notify(&self, _toast: Toast) {
        self.read_back();
    }
}

impl<F: Send + Sync> Navigator for ReadBack<F> {
    fn push(&self, _route: Route) {
        self.read_back();
    }
}

/// Services whose notifier and navigator are `reader`.
pub fn read_back_services<F: Send + Sync + 'static>(
    context: MockContext,
    reader: &Arc<ReadBack<F>>,
) -> FormServices {
    FormServices::new(
        Arc::new(context),
        reader.clone(),
        reader.clone(),
        GenClient::with_base_url(UNREACHABLE).unwrap(),
    )
}

/// Run `f` on a worker thread; `None` if it has not finished within 3 seconds.
pub fn within_timeout<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> Option<T> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let _ = tx.send(f());
    });
    rx.recv_timeout(Duration::from_secs(3)).ok()
}

/// Drive `future` to completion on a fresh single-threaded runtime.
pub fn block_on<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

/// Body of the only request the mock server saw, lossily decoded.
pub async fn single_request_body(server: &wiremock::MockServer) -> String {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "expected exactly one request");
    String::from_utf8_lossy(&requests[0].body).into_owned()
}
