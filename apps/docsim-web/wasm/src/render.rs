//! DOM materialization of a projected result.
//!
//! The projection in `docsim-core::view` decides *what* is shown; this
//! module only writes it to the page. All service-originated free text
//! goes in as text nodes, so it can never become markup.

use docsim_core::contract;
use docsim_core::view::{
    self, ConsistencyView, ResultView, VariationView,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlInputElement, ScrollBehavior, ScrollIntoViewOptions,
};

use crate::app::Ui;

/// Write a projected result to the page, then reveal the results panel
/// and scroll it into view. Re-rendering the same view is a no-op in
/// terms of visible state.
pub(crate) fn render_results(ui: &Ui, result: &ResultView) -> Result<(), JsValue> {
    // Fields the service omitted keep whatever was displayed before.
    if let Some(text) = &result.text_similarity {
        ui.text_similarity.set_text_content(Some(text));
    }
    if let Some(text) = &result.handwriting_similarity {
        ui.handwriting_similarity.set_text_content(Some(text));
    }
    if let Some(text) = &result.similarity_index {
        ui.similarity_index.set_text_content(Some(text));
    }

    render_variations(&ui.document, &ui.variations_doc1, &result.document1_variations)?;
    render_variations(&ui.document, &ui.variations_doc2, &result.document2_variations)?;
    render_consistency(&ui.document, &ui.semantics_doc1, &result.doc1_consistency)?;
    render_consistency(&ui.document, &ui.semantics_doc2, &result.doc2_consistency)?;

    if let Some(url) = &result.report_url {
        ui.report_link.set_href(url);
        reveal(&ui.report_link)?;
    }

    reveal(&ui.results_panel)?;
    scroll_to(&ui.results_panel);

    Ok(())
}

/// Replace a container's content with variation blocks, or the fixed
/// placeholder when there are none.
pub(crate) fn render_variations(
    document: &Document,
    container: &Element,
    variations: &[VariationView],
) -> Result<(), JsValue> {
    container.set_text_content(None);

    if variations.is_empty() {
        let placeholder = document.create_element("div")?;
        placeholder.set_class_name("no-variations");
        placeholder.set_text_content(Some(view::NO_VARIATIONS_TEXT));
        container.append_child(&placeholder)?;
        return Ok(());
    }

    for variation in variations {
        let item = document.create_element("div")?;
        item.set_class_name("variation-item");

        let pages = document.create_element("div")?;
        pages.set_class_name("variation-pages");
        pages.set_text_content(Some(&variation.page_range));
        item.append_child(&pages)?;

        for change in &variation.changes {
            let line = document.create_element("div")?;
            line.set_class_name("variation-change");
            line.set_text_content(Some(change));
            item.append_child(&line)?;
        }

        container.append_child(&item)?;
    }

    Ok(())
}

/// Replace a container's content with consistency rows, or the fixed
/// placeholder when there are none.
pub(crate) fn render_consistency(
    document: &Document,
    container: &Element,
    segments: &[ConsistencyView],
) -> Result<(), JsValue> {
    container.set_text_content(None);

    if segments.is_empty() {
        let placeholder = document.create_element("div")?;
        placeholder.set_class_name("no-inconsistencies");
        placeholder.set_text_content(Some(view::NO_INCONSISTENCIES_TEXT));
        container.append_child(&placeholder)?;
        return Ok(());
    }

    for segment in segments {
        let item = document.create_element("div")?;
        item.set_class_name("semantic-item");

        let first = document.create_element("div")?;
        first.set_class_name("segment-text");
        first.set_text_content(Some(&segment.segment_text));
        item.append_child(&first)?;

        let flow = document.create_element("div")?;
        flow.set_class_name("segment-flow");

        let arrow = document.create_element("span")?;
        arrow.set_class_name("flow-arrow");
        arrow.set_text_content(Some("↓"));
        flow.append_child(&arrow)?;

        let badge = document.create_element("span")?;
        badge.set_class_name(&format!("similarity-indicator {}", segment.tier.css_class()));
        badge.set_text_content(Some(&segment.badge));
        flow.append_child(&badge)?;

        item.append_child(&flow)?;

        let second = document.create_element("div")?;
        second.set_class_name("segment-text");
        second.set_text_content(Some(&segment.next_segment_text));
        item.append_child(&second)?;

        container.append_child(&item)?;
    }

    Ok(())
}

/// Recompute the weight control's visual fill from its current value.
pub(crate) fn update_weight_fill(slider: &HtmlInputElement) {
    if let Some(weight) = contract::parse_weight(&slider.value()) {
        let stop = view::fill_stop(weight);
        let gradient =
            format!("linear-gradient(to right, var(--accent-color) {stop}%, #e5e5e5 {stop}%)");
        let _ = slider.style().set_property("background", &gradient);
    }
}

/// Paint the initial fill and track user-driven changes, independent of
/// the submission flow.
pub(crate) fn wire_weight_slider(ui: &Ui) -> Result<(), JsValue> {
    update_weight_fill(&ui.weight_slider);

    let slider = ui.weight_slider.clone();
    let on_input = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        update_weight_fill(&slider);
    });
    ui.weight_slider
        .add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
    on_input.forget();

    Ok(())
}

fn reveal(element: &HtmlElement) -> Result<(), JsValue> {
    element.style().set_property("display", "block")
}

fn scroll_to(element: &HtmlElement) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::app::{fixtures, Ui};
    use docsim_core::view::SimilarityTier;
    use docsim_core::{CompareResponse, ResultView};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn container(document: &Document) -> Element {
        document.create_element("div").unwrap()
    }

    fn consistency_row(text: &str, next: &str, badge: &str, tier: SimilarityTier) -> ConsistencyView {
        ConsistencyView {
            segment_text: text.to_string(),
            next_segment_text: next.to_string(),
            badge: badge.to_string(),
            tier,
        }
    }

    #[wasm_bindgen_test]
    fn empty_variations_render_the_placeholder() {
        let document = fixtures::document();
        let target = container(&document);

        render_variations(&document, &target, &[]).unwrap();

        assert_eq!(target.children().length(), 1);
        let placeholder = target.first_element_child().unwrap();
        assert_eq!(placeholder.class_name(), "no-variations");
        assert_eq!(
            placeholder.text_content().as_deref(),
            Some(view::NO_VARIATIONS_TEXT)
        );
    }

    #[wasm_bindgen_test]
    fn variation_blocks_render_in_order() {
        let document = fixtures::document();
        let target = container(&document);
        let blocks = vec![
            VariationView {
                page_range: "Pages 1 → 2".to_string(),
                changes: vec!["• Confidence changed by 20.0%".to_string()],
            },
            VariationView {
                page_range: "Pages 2 → 3".to_string(),
                changes: vec![],
            },
        ];

        render_variations(&document, &target, &blocks).unwrap();

        let items = target.children();
        assert_eq!(items.length(), 2);
        let first = items.item(0).unwrap();
        assert_eq!(first.class_name(), "variation-item");
        assert!(first
            .text_content()
            .unwrap()
            .starts_with("Pages 1 → 2"));
        assert!(first.text_content().unwrap().contains("Confidence changed"));
    }

    #[wasm_bindgen_test]
    fn rerendering_replaces_previous_content() {
        let document = fixtures::document();
        let target = container(&document);
        let blocks = vec![VariationView {
            page_range: "Pages 1 → 2".to_string(),
            changes: vec![],
        }];

        render_variations(&document, &target, &blocks).unwrap();
        render_variations(&document, &target, &blocks).unwrap();

        assert_eq!(target.children().length(), 1);
    }

    #[wasm_bindgen_test]
    fn empty_consistency_renders_the_placeholder() {
        let document = fixtures::document();
        let target = container(&document);

        render_consistency(&document, &target, &[]).unwrap();

        let placeholder = target.first_element_child().unwrap();
        assert_eq!(placeholder.class_name(), "no-inconsistencies");
        assert_eq!(
            placeholder.text_content().as_deref(),
            Some(view::NO_INCONSISTENCIES_TEXT)
        );
    }

    #[wasm_bindgen_test]
    fn segment_markup_is_escaped() {
        let document = fixtures::document();
        let target = container(&document);
        let rows = vec![consistency_row(
            "<b>x</b>",
            "<script>alert(1)</script>",
            "10.0% similar",
            SimilarityTier::Low,
        )];

        render_consistency(&document, &target, &rows).unwrap();

        let html = target.inner_html();
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"), "html was {html:?}");
        assert!(!html.contains("<script>"), "html was {html:?}");
        // The markup never became elements either.
        assert!(target.query_selector("b").unwrap().is_none());
        assert!(target.query_selector("script").unwrap().is_none());
    }

    #[wasm_bindgen_test]
    fn badge_carries_the_tier_class() {
        let document = fixtures::document();
        let target = container(&document);
        let rows = vec![consistency_row(
            "a",
            "b",
            "75.0% similar",
            SimilarityTier::High,
        )];

        render_consistency(&document, &target, &rows).unwrap();

        let badge = target
            .query_selector(".similarity-indicator")
            .unwrap()
            .unwrap();
        assert!(badge.class_list().contains("similarity-high"));
        assert_eq!(badge.text_content().as_deref(), Some("75.0% similar"));
    }

    #[wasm_bindgen_test]
    fn absent_similarity_fields_leave_prior_display() {
        let document = fixtures::document();
        fixtures::build_page(&document);
        let ui = Ui::bind(document).unwrap();
        ui.text_similarity.set_text_content(Some("12.3%"));

        let response = CompareResponse {
            handwriting_similarity: Some(0.6),
            ..CompareResponse::default()
        };
        render_results(&ui, &ResultView::project(&response)).unwrap();

        assert_eq!(ui.text_similarity.text_content().as_deref(), Some("12.3%"));
        assert_eq!(
            ui.handwriting_similarity.text_content().as_deref(),
            Some("60.0%")
        );
    }

    #[wasm_bindgen_test]
    fn successful_render_reveals_panel_and_report_link() {
        let document = fixtures::document();
        fixtures::build_page(&document);
        let ui = Ui::bind(document).unwrap();

        let response = CompareResponse {
            text_similarity: Some(0.9),
            handwriting_similarity: Some(0.6),
            similarity_index: Some(0.75),
            report_url: Some("/r/1".to_string()),
            ..CompareResponse::default()
        };
        render_results(&ui, &ResultView::project(&response)).unwrap();

        assert_eq!(ui.text_similarity.text_content().as_deref(), Some("90.0%"));
        assert_eq!(ui.similarity_index.text_content().as_deref(), Some("75.0%"));
        assert_eq!(
            ui.results_panel.style().get_property_value("display").unwrap(),
            "block"
        );
        assert_eq!(
            ui.report_link.style().get_property_value("display").unwrap(),
            "block"
        );
        assert!(ui.report_link.href().ends_with("/r/1"));
        // Both lists fell back to their placeholders.
        assert!(ui
            .variations_doc1
            .query_selector(".no-variations")
            .unwrap()
            .is_some());
        assert!(ui
            .semantics_doc2
            .query_selector(".no-inconsistencies")
            .unwrap()
            .is_some());
    }

    #[wasm_bindgen_test]
    fn weight_fill_tracks_slider_value() {
        let document = fixtures::document();
        fixtures::build_page(&document);
        let ui = Ui::bind(document).unwrap();

        ui.weight_slider.set_value("0.7");
        update_weight_fill(&ui.weight_slider);

        let background = ui
            .weight_slider
            .style()
            .get_property_value("background")
            .unwrap();
        assert!(background.contains("70%"), "background was {background:?}");
    }
}
