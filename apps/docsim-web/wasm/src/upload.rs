//! Upload capture: two independent slots, drag and drop plus manual
//! selection.

use std::rc::Rc;

use docsim_core::contract;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DataTransfer, Document, DragEvent, Element, Event, File, HtmlInputElement};

use crate::app::AppContext;

/// Class toggled on a drop zone while a drag hovers over it.
const DRAG_ACTIVE_CLASS: &str = "drag-over";

/// One upload slot: an explicit binding of drop zone, file input, and
/// filename label, resolved by id at construction.
#[derive(Clone)]
pub struct UploadSlot {
    drop_zone: Element,
    input: HtmlInputElement,
    label: Element,
}

impl UploadSlot {
    pub fn bind(
        document: &Document,
        zone_id: &str,
        input_id: &str,
        label_id: &str,
    ) -> Result<Self, JsValue> {
        let missing = |id: &str| JsValue::from_str(&format!("Missing element #{id}"));

        let drop_zone = document
            .get_element_by_id(zone_id)
            .ok_or_else(|| missing(zone_id))?;
        let input = document
            .get_element_by_id(input_id)
            .ok_or_else(|| missing(input_id))?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| JsValue::from_str(&format!("Element #{input_id} is not a file input")))?;
        let label = document
            .get_element_by_id(label_id)
            .ok_or_else(|| missing(label_id))?;

        Ok(Self {
            drop_zone,
            input,
            label,
        })
    }

    /// Take a dropped file into this slot.
    ///
    /// Only a file whose declared type is exactly `application/pdf` is
    /// accepted; anything else is ignored with no feedback. The silent
    /// no-op is a longstanding UX choice, kept as-is.
    pub fn accept_file(&self, file: &File) -> Result<bool, JsValue> {
        if file.type_() != contract::PDF_MIME {
            return Ok(false);
        }

        let transfer = DataTransfer::new()?;
        transfer.items().add_with_file(file)?;
        self.input.set_files(transfer.files().as_ref());
        self.label.set_text_content(Some(&file.name()));
        Ok(true)
    }

    /// Reflect the input's current selection in the label. Manual
    /// selection lands here via the `change` event.
    pub fn refresh_label(&self) {
        if let Some(file) = self.input.files().and_then(|files| files.get(0)) {
            self.label.set_text_content(Some(&file.name()));
        }
    }

    pub fn label_text(&self) -> Option<String> {
        self.label.text_content()
    }

    /// The slot's underlying file input.
    pub fn input(&self) -> &HtmlInputElement {
        &self.input
    }

    fn set_drag_active(&self, active: bool) {
        let class_list = self.drop_zone.class_list();
        let _ = if active {
            class_list.add_1(DRAG_ACTIVE_CLASS)
        } else {
            class_list.remove_1(DRAG_ACTIVE_CLASS)
        };
    }
}

/// Wire drag/drop and change handlers for every slot.
pub(crate) fn wire_slots(context: &Rc<AppContext>) -> Result<(), JsValue> {
    for slot in &context.ui.slots {
        wire_slot(slot)?;
    }
    Ok(())
}

// The closures below are forgotten on purpose: the listeners live for
// the page lifetime.
fn wire_slot(slot: &UploadSlot) -> Result<(), JsValue> {
    let zone = slot.drop_zone.clone();

    let on_drag_over = {
        let slot = slot.clone();
        Closure::<dyn FnMut(DragEvent)>::new(move |event: DragEvent| {
            event.prevent_default();
            slot.set_drag_active(true);
        })
    };
    zone.add_event_listener_with_callback("dragover", on_drag_over.as_ref().unchecked_ref())?;
    on_drag_over.forget();

    let on_drag_leave = {
        let slot = slot.clone();
        Closure::<dyn FnMut(DragEvent)>::new(move |event: DragEvent| {
            event.prevent_default();
            slot.set_drag_active(false);
        })
    };
    zone.add_event_listener_with_callback("dragleave", on_drag_leave.as_ref().unchecked_ref())?;
    on_drag_leave.forget();

    let on_drop = {
        let slot = slot.clone();
        Closure::<dyn FnMut(DragEvent)>::new(move |event: DragEvent| {
            event.prevent_default();
            slot.set_drag_active(false);
            let dropped = event
                .data_transfer()
                .and_then(|transfer| transfer.files())
                .and_then(|files| files.get(0));
            if let Some(file) = dropped {
                if let Err(err) = slot.accept_file(&file) {
                    web_sys::console::error_1(&err);
                }
            }
        })
    };
    zone.add_event_listener_with_callback("drop", on_drop.as_ref().unchecked_ref())?;
    on_drop.forget();

    let on_change = {
        let slot = slot.clone();
        Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            slot.refresh_label();
        })
    };
    slot.input
        .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
    on_change.forget();

    Ok(())
}
