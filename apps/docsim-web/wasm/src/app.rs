//! Application assembly: element bindings and event wiring.
//!
//! The app is an explicit component instance constructed once, holding
//! its dependencies (document handle, API base, element map) as fields.
//! Every element is resolved by id at construction; slot-to-control
//! association is never inferred from sibling structure.

use std::cell::RefCell;
use std::rc::Rc;

use docsim_core::SubmissionPhase;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlAnchorElement, HtmlButtonElement, HtmlElement, HtmlFormElement,
    HtmlInputElement,
};

use crate::render;
use crate::submit;
use crate::upload::{self, UploadSlot};

/// Element ids the app binds once at construction.
pub mod ids {
    pub const FORM: &str = "upload-form";
    pub const RESULTS: &str = "results";
    pub const REPORT_LINK: &str = "report-link";
    pub const TEXT_SIMILARITY: &str = "text-similarity";
    pub const HANDWRITING_SIMILARITY: &str = "handwriting-similarity";
    pub const SIMILARITY_INDEX: &str = "similarity-index";
    pub const VARIATIONS_DOC1: &str = "variations-doc1";
    pub const VARIATIONS_DOC2: &str = "variations-doc2";
    pub const SEMANTICS_DOC1: &str = "semantics-doc1";
    pub const SEMANTICS_DOC2: &str = "semantics-doc2";
    pub const WEIGHT_SLIDER: &str = "weight-text";

    /// Slot bindings: (drop zone, file input, filename label).
    pub const UPLOAD_SLOTS: [(&str, &str, &str); 2] = [
        ("upload-box-1", "file1", "upload-text-1"),
        ("upload-box-2", "file2", "upload-text-2"),
    ];
}

/// Resolved element handles, bound once at mount.
pub(crate) struct Ui {
    pub document: Document,
    pub form: HtmlFormElement,
    pub submit_button: HtmlButtonElement,
    pub slots: Vec<UploadSlot>,
    pub weight_slider: HtmlInputElement,
    pub results_panel: HtmlElement,
    pub report_link: HtmlAnchorElement,
    pub text_similarity: Element,
    pub handwriting_similarity: Element,
    pub similarity_index: Element,
    pub variations_doc1: Element,
    pub variations_doc2: Element,
    pub semantics_doc1: Element,
    pub semantics_doc2: Element,
}

impl Ui {
    pub fn bind(document: Document) -> Result<Self, JsValue> {
        let form: HtmlFormElement = require(&document, ids::FORM)?;
        let submit_button = form
            .query_selector("button[type='submit']")?
            .ok_or_else(|| JsValue::from_str("Form has no submit button"))?
            .dyn_into::<HtmlButtonElement>()
            .map_err(|_| JsValue::from_str("Submit control is not a button"))?;

        let slots = ids::UPLOAD_SLOTS
            .into_iter()
            .map(|(zone, input, label)| UploadSlot::bind(&document, zone, input, label))
            .collect::<Result<Vec<_>, JsValue>>()?;

        Ok(Self {
            form,
            submit_button,
            slots,
            weight_slider: require(&document, ids::WEIGHT_SLIDER)?,
            results_panel: require(&document, ids::RESULTS)?,
            report_link: require(&document, ids::REPORT_LINK)?,
            text_similarity: require(&document, ids::TEXT_SIMILARITY)?,
            handwriting_similarity: require(&document, ids::HANDWRITING_SIMILARITY)?,
            similarity_index: require(&document, ids::SIMILARITY_INDEX)?,
            variations_doc1: require(&document, ids::VARIATIONS_DOC1)?,
            variations_doc2: require(&document, ids::VARIATIONS_DOC2)?,
            semantics_doc1: require(&document, ids::SEMANTICS_DOC1)?,
            semantics_doc2: require(&document, ids::SEMANTICS_DOC2)?,
            document,
        })
    }
}

fn require<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Element #{id} has an unexpected type")))
}

/// Shared state behind the event handlers.
pub(crate) struct AppContext {
    pub ui: Ui,
    pub phase: RefCell<SubmissionPhase>,
    pub api_base: String,
}

/// The page-level component: element map, lifecycle state, and the
/// injected API base, shared with the event handlers through an `Rc`.
#[wasm_bindgen]
pub struct CompareApp {
    pub(crate) context: Rc<AppContext>,
}

#[wasm_bindgen]
impl CompareApp {
    /// Bind to the current document and wire all event handlers.
    ///
    /// `api_base` is prefixed to the compare endpoint; pass "" for a
    /// same-origin deployment.
    pub fn mount(api_base: &str) -> Result<CompareApp, JsValue> {
        let window =
            web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document object available"))?;
        Self::mount_in(document, api_base)
    }

    /// Whether a submission is currently in flight.
    #[wasm_bindgen(js_name = isBusy)]
    pub fn is_busy(&self) -> bool {
        self.context.phase.borrow().is_submitting()
    }
}

impl CompareApp {
    /// Bind against an explicit document handle (injected in tests).
    pub fn mount_in(document: Document, api_base: &str) -> Result<CompareApp, JsValue> {
        let ui = Ui::bind(document)?;
        let context = Rc::new(AppContext {
            ui,
            phase: RefCell::new(SubmissionPhase::Idle),
            api_base: api_base.to_string(),
        });

        upload::wire_slots(&context)?;
        submit::wire_form(&context)?;
        render::wire_weight_slider(&context.ui)?;

        Ok(CompareApp { context })
    }
}

/// DOM fixtures shared by the browser test modules.
#[cfg(all(test, target_arch = "wasm32"))]
pub(crate) mod fixtures {
    use super::ids;
    use docsim_core::contract;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element};

    const FIXTURE_ROOT: &str = "fixture-root";

    /// Original label of the fixture's submit button.
    pub const SUBMIT_LABEL: &str = "Compare Documents";

    /// Original label of the fixture's upload slots.
    pub const SLOT_LABEL: &str = "Choose a file or drag it here";

    pub fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn element(document: &Document, tag: &str, id: &str) -> Element {
        let element = document.create_element(tag).unwrap();
        element.set_id(id);
        element
    }

    /// Build the full page the app binds against, replacing any
    /// fixture a previous test left behind.
    pub fn build_page(document: &Document) -> Element {
        if let Some(stale) = document.get_element_by_id(FIXTURE_ROOT) {
            stale.remove();
        }

        let root = element(document, "div", FIXTURE_ROOT);

        let form = element(document, "form", ids::FORM);
        let field_names = [contract::FIELD_FILE1, contract::FIELD_FILE2];
        for ((_, input_id, _), field_name) in ids::UPLOAD_SLOTS.into_iter().zip(field_names) {
            let input = element(document, "input", input_id);
            input.set_attribute("type", "file").unwrap();
            input.set_attribute("name", field_name).unwrap();
            form.append_child(&input).unwrap();
        }
        let slider = element(document, "input", ids::WEIGHT_SLIDER);
        slider.set_attribute("type", "range").unwrap();
        slider
            .set_attribute("name", contract::FIELD_WEIGHT_TEXT)
            .unwrap();
        slider.set_attribute("min", "0").unwrap();
        slider.set_attribute("max", "1").unwrap();
        slider.set_attribute("step", "0.1").unwrap();
        slider
            .dyn_ref::<web_sys::HtmlInputElement>()
            .unwrap()
            .set_value("0.5");
        form.append_child(&slider).unwrap();
        let button = document.create_element("button").unwrap();
        button.set_attribute("type", "submit").unwrap();
        button.set_text_content(Some(SUBMIT_LABEL));
        form.append_child(&button).unwrap();
        root.append_child(&form).unwrap();

        for (zone_id, _, label_id) in ids::UPLOAD_SLOTS {
            let zone = element(document, "div", zone_id);
            let label = element(document, "span", label_id);
            label.set_text_content(Some(SLOT_LABEL));
            zone.append_child(&label).unwrap();
            root.append_child(&zone).unwrap();
        }

        let results = element(document, "div", ids::RESULTS);
        for id in [
            ids::TEXT_SIMILARITY,
            ids::HANDWRITING_SIMILARITY,
            ids::SIMILARITY_INDEX,
        ] {
            results.append_child(&element(document, "span", id)).unwrap();
        }
        for id in [
            ids::VARIATIONS_DOC1,
            ids::VARIATIONS_DOC2,
            ids::SEMANTICS_DOC1,
            ids::SEMANTICS_DOC2,
        ] {
            results.append_child(&element(document, "div", id)).unwrap();
        }
        let report_link = element(document, "a", ids::REPORT_LINK);
        results.append_child(&report_link).unwrap();
        root.append_child(&results).unwrap();

        document.body().unwrap().append_child(&root).unwrap();
        root
    }
}
