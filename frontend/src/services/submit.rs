//! Upload form submission: one request/response cycle per submit.
//!
//! ```text
//! Idle ──submit──▶ InFlight ──2xx──▶ Succeeded  (loader hidden, link shown)
//!                     │
//!                     └──error──▶ Failed        (loader hidden, alert shown)
//! ```
//!
//! Everything the handler touches is injected: the transport, the file
//! inputs and the view. `submit` does the synchronous part (prevent default,
//! read the inputs, show the loader) before returning the future that
//! performs the request, so `InFlight` is visible before the caller yields.

use std::future::Future;

use crate::config::UploadConfig;
use crate::services::upload::UploadTransport;
use crate::types::{AppResult, ResponseArtifact, SubmitPhase, UploadField, UploadPayload};

/// Prefix of the alert shown on failure.
pub const ALERT_PREFIX: &str = "Something went wrong: ";

/// The submit event of the form.
pub trait FormEvent {
    fn prevent_default(&self);
}

impl FormEvent for web_sys::Event {
    fn prevent_default(&self) {
        web_sys::Event::prevent_default(self);
    }
}

impl FormEvent for web_sys::SubmitEvent {
    fn prevent_default(&self) {
        web_sys::Event::prevent_default(self);
    }
}

/// Where the selected files come from.
pub trait PayloadSource {
    type File;

    /// First file picked for `field`, if any.
    fn selected_file(&self, field: UploadField) -> Option<Self::File>;
}

/// UI surface driven by the handler.
pub trait UploadView {
    fn set_loader_visible(&self, visible: bool);

    fn set_result_visible(&self, visible: bool);

    /// Turn the response body into a URL the browser can download.
    fn create_object_url(&self, artifact: &ResponseArtifact) -> AppResult<String>;

    /// Point the download anchor at `url`.
    fn bind_download(&self, url: &str, file_name: &str);

    /// Blocking user-facing message.
    fn alert(&self, message: &str);
}

/// Hides the loader when dropped, whatever path left the request.
struct LoaderGuard<'a, V: UploadView>(&'a V);

impl<V: UploadView> Drop for LoaderGuard<'_, V> {
    fn drop(&mut self) {
        self.0.set_loader_visible(false);
    }
}

/// Orchestrates submissions of the upload form.
#[derive(Clone, Debug)]
pub struct UploadSubmitHandler<T> {
    transport: T,
    config: UploadConfig,
}

impl<T> UploadSubmitHandler<T>
where
    T: UploadTransport + Clone,
{
    pub fn new(transport: T, config: UploadConfig) -> Self {
        Self { transport, config }
    }

    /// Handle one submit event.
    ///
    /// Concurrent submissions are not serialized; each one drives the same
    /// view and the last to settle wins.
    pub fn submit<E, S, V>(
        &self,
        event: &E,
        inputs: &S,
        view: V,
    ) -> impl Future<Output = SubmitPhase>
    where
        E: FormEvent + ?Sized,
        S: PayloadSource<File = T::File> + ?Sized,
        V: UploadView,
    {
        event.prevent_default();

        let payload = UploadPayload::collect(|field| inputs.selected_file(field));
        let missing = payload.missing();
        if !missing.is_empty() {
            log::debug!("Submitting with empty fields: {:?}", missing);
        }

        view.set_loader_visible(true);
        view.set_result_visible(false);

        let transport = self.transport.clone();
        let endpoint_url = self.config.endpoint_url.clone();

        async move {
            let _loader = LoaderGuard(&view);

            let outcome = async {
                let artifact = transport.post(&endpoint_url, payload).await?;
                let url = view.create_object_url(&artifact)?;
                view.bind_download(&url, artifact.download_name());
                view.set_result_visible(true);
                Ok::<_, crate::AppError>(url)
            }
            .await;

            match outcome {
                Ok(url) => {
                    log::info!("Prompt ready at {}", url);
                    SubmitPhase::Succeeded
                }
                Err(e) => {
                    log::warn!("Upload failed: {}", e);
                    view.alert(&format!("{}{}", ALERT_PREFIX, e.message()));
                    SubmitPhase::Failed
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::upload::GENERATION_FAILED;
    use crate::AppError;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;

    // -------------------------------------------------------------------------
    // Fakes
    // -------------------------------------------------------------------------

    #[derive(Default)]
    struct FakeEvent {
        prevented: Cell<bool>,
    }

    impl FormEvent for FakeEvent {
        fn prevent_default(&self) {
            self.prevented.set(true);
        }
    }

    /// Files keyed by field; each "file" is its content.
    #[derive(Default)]
    struct FakeInputs(HashMap<UploadField, Vec<u8>>);

    impl FakeInputs {
        fn all() -> Self {
            Self(
                UploadField::ALL
                    .iter()
                    .map(|f| (*f, f.form_name().as_bytes().to_vec()))
                    .collect(),
            )
        }
    }

    impl PayloadSource for FakeInputs {
        type File = Vec<u8>;

        fn selected_file(&self, field: UploadField) -> Option<Vec<u8>> {
            self.0.get(&field).cloned()
        }
    }

    #[derive(Default)]
    struct ViewState {
        loader: bool,
        result: bool,
        href: Option<String>,
        download_name: Option<String>,
        alerts: Vec<String>,
        urls: HashMap<String, Vec<u8>>,
    }

    #[derive(Clone, Default)]
    struct FakeView(Rc<RefCell<ViewState>>);

    impl FakeView {
        fn loader(&self) -> bool {
            self.0.borrow().loader
        }

        fn result(&self) -> bool {
            self.0.borrow().result
        }

        fn alerts(&self) -> Vec<String> {
            self.0.borrow().alerts.clone()
        }

        fn href(&self) -> Option<String> {
            self.0.borrow().href.clone()
        }

        /// What the anchor currently downloads.
        fn resolve_href(&self) -> Option<Vec<u8>> {
            let state = self.0.borrow();
            state.href.as_ref().and_then(|h| state.urls.get(h).cloned())
        }
    }

    impl UploadView for FakeView {
        fn set_loader_visible(&self, visible: bool) {
            self.0.borrow_mut().loader = visible;
        }

        fn set_result_visible(&self, visible: bool) {
            self.0.borrow_mut().result = visible;
        }

        fn create_object_url(&self, artifact: &ResponseArtifact) -> AppResult<String> {
            let mut state = self.0.borrow_mut();
            let url = format!("blob:test/{}", state.urls.len() + 1);
            state.urls.insert(url.clone(), artifact.bytes.clone());
            Ok(url)
        }

        fn bind_download(&self, url: &str, file_name: &str) {
            let mut state = self.0.borrow_mut();
            state.href = Some(url.to_string());
            state.download_name = Some(file_name.to_string());
        }

        fn alert(&self, message: &str) {
            self.0.borrow_mut().alerts.push(message.to_string());
        }
    }

    /// View whose object URL creation always fails.
    #[derive(Clone, Default)]
    struct BrokenBlobView(FakeView);

    impl UploadView for BrokenBlobView {
        fn set_loader_visible(&self, visible: bool) {
            self.0.set_loader_visible(visible);
        }

        fn set_result_visible(&self, visible: bool) {
            self.0.set_result_visible(visible);
        }

        fn create_object_url(&self, _artifact: &ResponseArtifact) -> AppResult<String> {
            Err(AppError::Dom("Blob constructor unavailable".into()))
        }

        fn bind_download(&self, url: &str, file_name: &str) {
            self.0.bind_download(url, file_name);
        }

        fn alert(&self, message: &str) {
            self.0.alert(message);
        }
    }

    #[derive(Clone)]
    enum Reply {
        Body(Vec<u8>),
        Status(u16),
        NetworkError,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct SentRequest {
        url: String,
        fields: Vec<(&'static str, Option<Vec<u8>>)>,
    }

    #[derive(Clone)]
    struct FakeTransport {
        reply: Rc<RefCell<Reply>>,
        sent: Rc<RefCell<Vec<SentRequest>>>,
    }

    impl FakeTransport {
        fn replying(reply: Reply) -> Self {
            Self {
                reply: Rc::new(RefCell::new(reply)),
                sent: Rc::default(),
            }
        }

        fn set_reply(&self, reply: Reply) {
            *self.reply.borrow_mut() = reply;
        }

        fn sent(&self) -> Vec<SentRequest> {
            self.sent.borrow().clone()
        }
    }

    impl UploadTransport for FakeTransport {
        type File = Vec<u8>;

        async fn post(
            &self,
            endpoint_url: &str,
            payload: UploadPayload<Vec<u8>>,
        ) -> AppResult<ResponseArtifact> {
            self.sent.borrow_mut().push(SentRequest {
                url: endpoint_url.to_string(),
                fields: payload
                    .entries()
                    .map(|(field, file)| (field.form_name(), file.cloned()))
                    .collect(),
            });

            match self.reply.borrow().clone() {
                Reply::Body(bytes) => Ok(ResponseArtifact::new(
                    bytes,
                    Some("text/plain".into()),
                    Some("RecruitAI_System_Prompt.txt".into()),
                )),
                Reply::Status(_) => Err(AppError::RequestFailed(GENERATION_FAILED.into())),
                Reply::NetworkError => Err(AppError::RequestFailed("Failed to fetch".into())),
            }
        }
    }

    const ENDPOINT: &str = "http://localhost:8000/generate/";

    fn handler(transport: &FakeTransport) -> UploadSubmitHandler<FakeTransport> {
        UploadSubmitHandler::new(transport.clone(), UploadConfig::new(ENDPOINT))
    }

    // -------------------------------------------------------------------------
    // Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_submit_prevents_default() {
        let transport = FakeTransport::replying(Reply::Body(b"ok".to_vec()));
        let event = FakeEvent::default();

        let pending = handler(&transport).submit(&event, &FakeInputs::all(), FakeView::default());
        assert!(event.prevented.get());
        block_on(pending);
    }

    #[test]
    fn test_failure_still_prevents_default() {
        let transport = FakeTransport::replying(Reply::NetworkError);
        let event = FakeEvent::default();

        block_on(handler(&transport).submit(&event, &FakeInputs::all(), FakeView::default()));
        assert!(event.prevented.get());
    }

    #[test]
    fn test_payload_carries_four_named_fields() {
        let transport = FakeTransport::replying(Reply::Body(b"ok".to_vec()));

        block_on(handler(&transport).submit(
            &FakeEvent::default(),
            &FakeInputs::all(),
            FakeView::default(),
        ));

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, ENDPOINT);
        let names: Vec<_> = sent[0].fields.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec!["flow_file", "example_file", "job_desc_file", "job_detail_file"]
        );
        for (name, file) in &sent[0].fields {
            assert_eq!(file.as_deref(), Some(name.as_bytes()));
        }
    }

    #[test]
    fn test_missing_files_are_sent_anyway() {
        let transport = FakeTransport::replying(Reply::Body(b"ok".to_vec()));
        let mut inputs = FakeInputs::default();
        inputs.0.insert(UploadField::JobDesc, b"{}".to_vec());

        let phase = block_on(handler(&transport).submit(
            &FakeEvent::default(),
            &inputs,
            FakeView::default(),
        ));

        assert_eq!(phase, SubmitPhase::Succeeded);
        let fields = &transport.sent()[0].fields;
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0], ("flow_file", None));
        assert_eq!(fields[2], ("job_desc_file", Some(b"{}".to_vec())));
    }

    #[test]
    fn test_in_flight_state_is_set_before_awaiting() {
        let transport = FakeTransport::replying(Reply::Body(b"ok".to_vec()));
        let view = FakeView::default();
        view.set_result_visible(true);

        let pending = handler(&transport).submit(&FakeEvent::default(), &FakeInputs::all(), view.clone());

        assert!(view.loader());
        assert!(!view.result());
        assert!(transport.sent().is_empty());

        block_on(pending);
        assert!(!view.loader());
    }

    #[test]
    fn test_success_binds_download_to_response_bytes() {
        let body = b"You are RecruitAI, a voice assistant...\n\x00\xff".to_vec();
        let transport = FakeTransport::replying(Reply::Body(body.clone()));
        let view = FakeView::default();

        let phase = block_on(handler(&transport).submit(
            &FakeEvent::default(),
            &FakeInputs::all(),
            view.clone(),
        ));

        assert_eq!(phase, SubmitPhase::Succeeded);
        assert!(!view.loader());
        assert!(view.result());
        assert_eq!(view.resolve_href(), Some(body));
        assert_eq!(
            view.0.borrow().download_name.as_deref(),
            Some("RecruitAI_System_Prompt.txt")
        );
        assert!(view.alerts().is_empty());
    }

    #[test]
    fn test_error_status_alerts_and_hides_everything() {
        let transport = FakeTransport::replying(Reply::Status(500));
        let view = FakeView::default();

        let phase = block_on(handler(&transport).submit(
            &FakeEvent::default(),
            &FakeInputs::all(),
            view.clone(),
        ));

        assert_eq!(phase, SubmitPhase::Failed);
        assert!(!view.loader());
        assert!(!view.result());
        assert_eq!(
            view.alerts(),
            vec![format!("{}{}", ALERT_PREFIX, GENERATION_FAILED)]
        );
        assert_eq!(view.href(), None);
    }

    #[test]
    fn test_network_error_alerts_with_message() {
        let transport = FakeTransport::replying(Reply::NetworkError);
        let view = FakeView::default();

        let phase = block_on(handler(&transport).submit(
            &FakeEvent::default(),
            &FakeInputs::all(),
            view.clone(),
        ));

        assert_eq!(phase, SubmitPhase::Failed);
        assert!(!view.loader());
        assert!(!view.result());
        let alerts = view.alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0], "Something went wrong: Failed to fetch");
    }

    #[test]
    fn test_object_url_failure_takes_alert_path() {
        let transport = FakeTransport::replying(Reply::Body(b"ok".to_vec()));
        let view = BrokenBlobView::default();

        let phase = block_on(handler(&transport).submit(
            &FakeEvent::default(),
            &FakeInputs::all(),
            view.clone(),
        ));

        assert_eq!(phase, SubmitPhase::Failed);
        assert!(!view.0.loader());
        assert!(!view.0.result());
        assert_eq!(
            view.0.alerts(),
            vec!["Something went wrong: Blob constructor unavailable".to_string()]
        );
    }

    #[test]
    fn test_second_submission_overwrites_link() {
        let transport = FakeTransport::replying(Reply::Body(b"first".to_vec()));
        let view = FakeView::default();
        let handler = handler(&transport);

        block_on(handler.submit(&FakeEvent::default(), &FakeInputs::all(), view.clone()));
        let first = view.href().unwrap();

        transport.set_reply(Reply::Body(b"second".to_vec()));
        block_on(handler.submit(&FakeEvent::default(), &FakeInputs::all(), view.clone()));
        let second = view.href().unwrap();

        assert_ne!(first, second);
        assert_eq!(view.resolve_href(), Some(b"second".to_vec()));
        // Earlier URLs are never revoked
        assert_eq!(view.0.borrow().urls.get(&first), Some(&b"first".to_vec()));
        assert!(view.result());
    }

    #[test]
    fn test_failure_after_success_hides_previous_result() {
        let transport = FakeTransport::replying(Reply::Body(b"first".to_vec()));
        let view = FakeView::default();
        let handler = handler(&transport);

        block_on(handler.submit(&FakeEvent::default(), &FakeInputs::all(), view.clone()));
        assert!(view.result());

        transport.set_reply(Reply::Status(502));
        let phase = block_on(handler.submit(&FakeEvent::default(), &FakeInputs::all(), view.clone()));

        assert_eq!(phase, SubmitPhase::Failed);
        assert!(!view.result());
        assert!(!view.loader());
    }
}
