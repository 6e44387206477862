//! Upload form component.
//!
//! Renders the form with the DOM ids the page contract expects
//! (`uploadForm`, `flowFile`, `exampleFile`, `jobDescFile`, `jobDetailFile`,
//! `loader`, `resultSection`, `downloadLink`) and feeds submissions to
//! [`UploadSubmitHandler`].

use leptos::html::Input;
use leptos::*;

use crate::services::{alert, create_object_url, FetchTransport, PayloadSource, UploadSubmitHandler, UploadView};
use crate::{AppResult, ResponseArtifact, UploadConfig, UploadField};

/// Where the download anchor points.
#[derive(Clone, Debug, PartialEq)]
pub struct DownloadTarget {
    pub href: String,
    pub file_name: String,
}

/// [`UploadView`] backed by Leptos signals.
#[derive(Clone, Copy)]
pub struct SignalUploadView {
    loader: WriteSignal<bool>,
    result: WriteSignal<bool>,
    download: WriteSignal<Option<DownloadTarget>>,
}

impl UploadView for SignalUploadView {
    fn set_loader_visible(&self, visible: bool) {
        self.loader.set(visible);
    }

    fn set_result_visible(&self, visible: bool) {
        self.result.set(visible);
    }

    fn create_object_url(&self, artifact: &ResponseArtifact) -> AppResult<String> {
        create_object_url(artifact)
    }

    fn bind_download(&self, url: &str, file_name: &str) {
        self.download.set(Some(DownloadTarget {
            href: url.to_string(),
            file_name: file_name.to_string(),
        }));
    }

    fn alert(&self, message: &str) {
        if let Err(e) = alert(message) {
            log::error!("{}", e);
        }
    }
}

/// The four `<input type="file">` elements.
#[derive(Clone, Copy)]
pub struct DomFileInputs {
    flow: NodeRef<Input>,
    example: NodeRef<Input>,
    job_desc: NodeRef<Input>,
    job_detail: NodeRef<Input>,
}

impl DomFileInputs {
    pub fn new() -> Self {
        Self {
            flow: create_node_ref(),
            example: create_node_ref(),
            job_desc: create_node_ref(),
            job_detail: create_node_ref(),
        }
    }

    pub fn node(&self, field: UploadField) -> NodeRef<Input> {
        match field {
            UploadField::Flow => self.flow,
            UploadField::Example => self.example,
            UploadField::JobDesc => self.job_desc,
            UploadField::JobDetail => self.job_detail,
        }
    }
}

impl Default for DomFileInputs {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadSource for DomFileInputs {
    type File = web_sys::File;

    fn selected_file(&self, field: UploadField) -> Option<web_sys::File> {
        let input = self.node(field).get_untracked()?;
        input.files()?.get(0)
    }
}

#[component]
pub fn UploadForm(config: UploadConfig) -> impl IntoView {
    let (loader_visible, set_loader_visible) = create_signal(false);
    let (result_visible, set_result_visible) = create_signal(false);
    let (download, set_download) = create_signal(None::<DownloadTarget>);

    let inputs = DomFileInputs::new();
    let view_handle = SignalUploadView {
        loader: set_loader_visible,
        result: set_result_visible,
        download: set_download,
    };
    let handler = UploadSubmitHandler::new(FetchTransport::new(), config);

    let on_submit = move |ev: ev::SubmitEvent| {
        // Runs synchronously: default prevented and loader shown before yielding
        let pending = handler.submit(&ev, &inputs, view_handle);
        spawn_local(async move {
            let phase = pending.await;
            log::debug!("Submission settled: {:?}", phase);
        });
    };

    let display = |visible: ReadSignal<bool>| move || if visible.get() { "block" } else { "none" };

    view! {
        <form id="uploadForm" class="upload-form" on:submit=on_submit>
            {UploadField::ALL
                .into_iter()
                .map(|field| {
                    let node = inputs.node(field);
                    view! {
                        <div class="file-field">
                            <label for=field.input_id()>{field.label()}</label>
                            <input
                                type="file"
                                id=field.input_id()
                                name=field.form_name()
                                accept=field.accept()
                                node_ref=node
                            />
                        </div>
                    }
                })
                .collect_view()}

            <button type="submit" class="upload-button">"Generate system prompt"</button>
        </form>

        <div id="loader" class="loader" style:display=display(loader_visible)>
            "⏳ Generating prompt..."
        </div>

        <div id="resultSection" class="result-section" style:display=display(result_visible)>
            <p>"Your system prompt is ready."</p>
            <a
                id="downloadLink"
                class="download-link"
                href=move || download.get().map(|d| d.href)
                download=move || download.get().map(|d| d.file_name)
            >
                "Download prompt"
            </a>
        </div>
    }
}
