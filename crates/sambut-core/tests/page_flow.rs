//! End-to-end page flows driven through `Page` with in-memory view and store.
//!
//! Verifies:
//! 1. A valid submission grows the stored history by one entry at the head
//!    and clears every form field
//! 2. An invalid submission leaves the stored history byte-for-byte
//!    unchanged and shows every field error at once
//! 3. Seven stored entries render five blocks plus "Dan 2 pesan lainnya..."
//! 4. Two alerts in quick succession leave exactly one overlay, and the
//!    first alert's timeout does not dismiss the second
//! 5. A saved name is restored by a later page sharing the same storage
//! 6. A corrupt history record renders the empty placeholder and is
//!    replaced on the next accepted submission; a malformed entry is skipped
//!    and the valid entries around it survive the next submission
//! 7. Visitor text is rendered escaped in the history panel and alerts
//! 8. Menu, anchor, and scroll events reach the page elements

use core::time::Duration;

use pretty_assertions::assert_eq;
use sambut_core::{
    AlertKind, AnchorOutcome, ElementId, FixedTimestamp, FormField, HeaderShadow, KeyValueStore,
    MemoryStore, MemoryView, Page, PageConfig, PageEvent, PageView, StyleProperty, SubmissionHistory,
    SubmitOutcome,
};

const STAMP: &str = "18/10/2026, 09.30.00";

fn page_with(store: MemoryStore) -> Page<MemoryView, MemoryStore> {
    let view = MemoryView::contact_page()
        .with_anchor("beranda", 0.0)
        .with_anchor("kontak", 900.0);
    let mut page = Page::new(view, store, PageConfig::default(), FixedTimestamp::new(STAMP));
    page.handle(PageEvent::Loaded);
    page
}

fn fill(page: &mut Page<MemoryView, MemoryStore>, values: [&str; 4]) {
    let view = page.view_mut();
    for (field, value) in FormField::ALL.into_iter().zip(values) {
        view.set_input(field, value);
    }
}

fn valid_values(i: usize) -> [String; 4] {
    [
        format!("Pengirim {}", "x".repeat(i + 1)),
        format!("p{i}@example.com"),
        "081234567890".to_string(),
        format!("Pesan percobaan nomor {i}"),
    ]
}

fn submit_valid(page: &mut Page<MemoryView, MemoryStore>, i: usize) {
    let values = valid_values(i);
    fill(page, values.each_ref().map(String::as_str));
    assert!(page.submit_form().is_accepted());
}

fn stored_history(store: &MemoryStore) -> Option<String> {
    store.get_item("messageHistory").ok().flatten()
}

fn panel(page: &Page<MemoryView, MemoryStore>) -> String {
    page.view()
        .markup(&ElementId::SubmissionDisplay)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[test]
fn fresh_page_shows_empty_history() {
    let page = page_with(MemoryStore::new());
    assert_eq!(panel(&page), "<p>Belum ada pesan yang dikirim.</p>");
    assert_eq!(page.view().text(&ElementId::UserName), "");
}

#[test]
fn valid_submission_prepends_one_entry_and_clears_fields() {
    let store = MemoryStore::new();
    let mut page = page_with(store.clone());
    submit_valid(&mut page, 1);

    fill(
        &mut page,
        [
            "Budi Santoso",
            "budi@example.com",
            "081298765432",
            "Halo, saya ingin bertanya.",
        ],
    );
    page.handle(PageEvent::FormSubmit);

    let stored: SubmissionHistory =
        serde_json::from_str(&stored_history(&store).unwrap()).unwrap();
    assert_eq!(stored.len(), 2);
    let latest = stored.latest().unwrap();
    assert_eq!(latest.name, "Budi Santoso");
    assert_eq!(latest.timestamp, STAMP);
    assert_eq!(&stored, page.history());

    for field in FormField::ALL {
        assert_eq!(page.view().input(field), "");
        assert_eq!(page.view().field_error(field), "");
    }
    assert_eq!(
        page.view().alert().unwrap().overlay.message,
        "Pesan berhasil dikirim!"
    );
}

#[test]
fn invalid_submission_leaves_store_untouched() {
    let store = MemoryStore::new();
    let mut page = page_with(store.clone());
    submit_valid(&mut page, 1);
    let before = stored_history(&store);

    fill(&mut page, ["", "bukan email", "08a", "pendek"]);
    let outcome = page.submit_form();

    let SubmitOutcome::Rejected(errors) = outcome else {
        panic!("expected rejection, got {outcome:?}");
    };
    assert_eq!(errors.len(), 4);
    assert_eq!(stored_history(&store), before);
    assert_eq!(page.history().len(), 1);

    let shown: Vec<_> = FormField::ALL
        .into_iter()
        .map(|f| page.view().field_error(f).to_string())
        .collect();
    assert_eq!(
        shown,
        [
            "Nama harus diisi",
            "Email tidak valid",
            "Telepon harus angka",
            "Minimal 10 karakter",
        ]
    );
    assert_eq!(page.view().input(FormField::Phone), "08a");
    let alert = page.view().alert().unwrap();
    assert_eq!(alert.overlay.message, "Perbaiki form terlebih dahulu");
    assert_eq!(alert.overlay.kind, AlertKind::Error);
}

#[test]
fn seven_entries_render_five_and_a_remainder_note() {
    let mut page = page_with(MemoryStore::new());
    for i in 0..7 {
        submit_valid(&mut page, i);
    }

    let html = panel(&page);
    assert_eq!(html.matches(r#"class="message-item""#).count(), 5);
    assert!(html.ends_with(r#"<p style="text-align:center">Dan 2 pesan lainnya...</p>"#));
    // Newest first: the last submission leads, the two oldest are hidden.
    assert!(html.find("p6@example.com").unwrap() < html.find("p2@example.com").unwrap());
    assert!(!html.contains("p0@example.com"));
    assert!(!html.contains("p1@example.com"));
}

#[test]
fn rapid_alerts_keep_a_single_overlay() {
    let mut page = page_with(MemoryStore::new());
    page.show_alert("pertama", AlertKind::Info);
    page.advance_to(Duration::from_secs(3));
    page.show_alert("kedua", AlertKind::Success);

    assert_eq!(page.view().alert_mounts(), 2);
    assert_eq!(page.view().alert().unwrap().overlay.message, "kedua");
    assert_eq!(page.view().stylesheets(), ["alert-styles".to_string()]);

    // The first alert would have timed out here.
    page.advance_to(Duration::from_secs(5));
    assert_eq!(page.view().alert().unwrap().overlay.message, "kedua");
    assert_eq!(page.view().alert().unwrap().transform, "translateX(0)");

    page.advance_to(Duration::from_secs(8));
    assert!(page.view().alert().is_none());
    assert_eq!(page.next_deadline(), None);
}

#[test]
fn saved_name_survives_reload() {
    let store = MemoryStore::new();
    {
        let mut page = page_with(store.clone());
        page.view_mut().set_value(&ElementId::NameInput, "  Rina  ");
        page.handle(PageEvent::GreetingSubmit);
        assert_eq!(page.view().text(&ElementId::UserName), "Rina");
        assert_eq!(
            page.view().alert().unwrap().overlay.message,
            "Selamat datang, Rina!"
        );
        assert_eq!(page.view().value(&ElementId::NameInput).as_deref(), Some(""));
    }

    let reloaded = page_with(store);
    assert_eq!(reloaded.view().text(&ElementId::UserName), "Rina");
    assert_eq!(
        reloaded.view().value(&ElementId::NameInput).as_deref(),
        Some("Rina")
    );
}

#[test]
fn rejected_greeting_changes_nothing() {
    let store = MemoryStore::new();
    let mut page = page_with(store.clone());
    page.view_mut().set_value(&ElementId::NameInput, "R2D2");
    page.handle(PageEvent::NameInputKey("Enter".into()));

    assert_eq!(page.view().text(&ElementId::UserName), "");
    assert_eq!(store.get_item("userName").unwrap(), None);
    assert_eq!(
        page.view().alert().unwrap().overlay.message,
        "Nama hanya boleh huruf dan spasi"
    );
}

#[test]
fn corrupt_history_degrades_to_empty() {
    let store = MemoryStore::with_entries([("messageHistory", "{not json")]);
    let mut page = page_with(store.clone());
    assert!(page.history().is_empty());
    assert_eq!(panel(&page), "<p>Belum ada pesan yang dikirim.</p>");

    submit_valid(&mut page, 3);
    let stored: SubmissionHistory =
        serde_json::from_str(&stored_history(&store).unwrap()).unwrap();
    assert_eq!(stored.len(), 1);
}

#[test]
fn malformed_entry_does_not_erase_valid_history() {
    let raw = r#"[
        {"name":"Ani","email":"ani@example.com","phone":"081234567890","message":"Pesan dari Ani","timestamp":"1/10/2026, 08.00.00"},
        {"name":"Bayu","email":"bayu@example.com","message":"Tanpa nomor telepon","timestamp":"2/10/2026, 08.00.00"},
        {"name":"Citra","email":"citra@example.com","phone":"081298765432","message":"Pesan dari Citra","timestamp":"3/10/2026, 08.00.00"}
    ]"#;
    let store = MemoryStore::with_entries([("messageHistory", raw)]);
    let mut page = page_with(store.clone());
    assert_eq!(page.history().len(), 2);
    assert!(panel(&page).contains("Pesan dari Citra"));

    fill(
        &mut page,
        ["Dewi", "dewi@example.com", "081211112222", "Pesan dari Dewi"],
    );
    assert!(page.submit_form().is_accepted());

    let stored: SubmissionHistory =
        serde_json::from_str(&stored_history(&store).unwrap()).unwrap();
    let names: Vec<_> = stored.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, ["Dewi", "Ani", "Citra"]);
}

#[test]
fn visitor_text_is_escaped() {
    let mut page = page_with(MemoryStore::new());
    fill(
        &mut page,
        [
            "Budi",
            "budi@example.com",
            "081234567890",
            "<img src=x onerror=alert(1)> & \"kutip\"",
        ],
    );
    page.handle(PageEvent::FormSubmit);

    let html = panel(&page);
    assert!(!html.contains("<img"));
    assert!(html.contains("&lt;img src=x onerror=alert(1)&gt; &amp; &quot;kutip&quot;"));

    page.show_alert("<b>tebal</b>", AlertKind::Info);
    let overlay = &page.view().alert().unwrap().overlay;
    assert!(overlay.markup.as_str().contains("&lt;b&gt;tebal&lt;/b&gt;"));
}

#[test]
fn navigation_and_scroll_events() {
    let mut page = page_with(MemoryStore::new());

    page.handle(PageEvent::MenuToggle);
    assert!(page.is_menu_open());
    page.handle(PageEvent::AnchorClick("#kontak".into()));
    assert!(!page.is_menu_open());
    assert_eq!(page.view().scroll_y(), 840.0);

    assert_eq!(page.follow_anchor("#beranda"), AnchorOutcome::Scrolled { top: -60.0 });
    assert_eq!(page.view().scroll_y(), 0.0);

    page.view_mut().set_scroll_y(250.0);
    page.handle(PageEvent::Scroll);
    assert_eq!(
        page.view().style(&ElementId::Header, StyleProperty::BoxShadow),
        Some(HeaderShadow::Raised.css())
    );
}

#[test]
fn blur_then_input_round_trip() {
    let mut page = page_with(MemoryStore::new());
    page.view_mut().set_input(FormField::Email, "budi@");
    page.handle(PageEvent::FieldBlur(FormField::Email));
    assert_eq!(page.view().field_error(FormField::Email), "Email tidak valid");

    page.handle(PageEvent::FieldInput(FormField::Email));
    assert_eq!(page.view().field_error(FormField::Email), "");
    assert_eq!(
        page.view()
            .style(&ElementId::Field(FormField::Email), StyleProperty::BorderColor),
        Some("#e2e8f0")
    );
}
