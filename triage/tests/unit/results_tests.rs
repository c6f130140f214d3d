use serde_json::json;
use triage::ui::copy;
use triage::ui::results::{
    DiagnosisOutcome, HIDDEN_CLASS, decode_diagnosis, display_diagnosis_info,
    display_prescription,
};
use triage_markup::prelude::*;

fn panel() -> Element {
    section().id("result-panel").class(HIDDEN_CLASS)
}

#[test]
fn diagnosis_without_condition_is_ignored() {
    let mut panel = panel();
    assert!(!display_diagnosis_info(&mut panel, None));
    assert!(!display_diagnosis_info(&mut panel, Some(&json!({"severity": "轻度"}))));
    assert!(!display_diagnosis_info(&mut panel, Some(&json!({"condition": ""}))));
    assert!(panel.has_class(HIDDEN_CLASS));
    assert!(panel.children().is_empty());
}

#[test]
fn diagnosis_renders_escaped_fields() {
    let mut panel = panel();
    let info = json!({
        "condition": "<script>x</script>感冒",
        "severity": "轻度",
        "explanation": "病毒感染\n注意休息",
        "diagnostic_tests": ["血常规", {"test_name": "咽拭子"}]
    });
    assert!(display_diagnosis_info(&mut panel, Some(&info)));

    let html = panel.render();
    assert!(!panel.has_class(HIDDEN_CLASS));
    assert!(html.contains("&lt;script&gt;x&lt;/script&gt;感冒"));
    assert!(!html.contains("<script>"));
    assert!(html.contains("病毒感染<br>注意休息"));
    assert!(html.contains("血常规、咽拭子"));
}

#[test]
fn diagnosis_rewrites_the_panel() {
    let mut panel = panel();
    display_diagnosis_info(&mut panel, Some(&json!({"condition": "偏头痛"})));
    display_diagnosis_info(&mut panel, Some(&json!({"condition": "紧张性头痛"})));
    let text = panel.text_content();
    assert!(text.contains("紧张性头痛"));
    assert!(!text.contains("偏头痛"));
}

#[test]
fn badly_shaped_diagnosis_falls_back_to_condition() {
    let value = json!({"condition": "胃炎", "severity": {"level": 2}});
    assert!(matches!(
        decode_diagnosis(Some(&value)),
        Some(DiagnosisOutcome::ConditionOnly(c)) if c == "胃炎"
    ));

    let mut panel = panel();
    assert!(display_diagnosis_info(&mut panel, Some(&value)));
    let html = panel.render();
    assert!(html.contains("胃炎"));
    assert!(!html.contains("severity"));
}

#[test]
fn no_prescription_notice_appears_once() {
    let mut panel = panel();
    let empty = json!({"medications": [{"dosage": "1片"}]});
    assert!(!display_prescription(&mut panel, Some(&empty)));
    assert!(!display_prescription(&mut panel, None));
    assert_eq!(panel.text_content().matches(copy::NO_PRESCRIPTION).count(), 1);
}

#[test]
fn prescription_replaces_previous_list() {
    let mut panel = panel();
    display_prescription(
        &mut panel,
        Some(&json!({"medications": [{"name": "阿莫西林"}]})),
    );
    display_prescription(
        &mut panel,
        Some(&json!({"medications": [{"name": "布洛芬", "dosage": "200mg"}]})),
    );

    let html = panel.render();
    assert_eq!(html.matches("medication-list").count(), 1);
    assert!(html.contains("布洛芬"));
    assert!(!html.contains("阿莫西林"));
    assert!(!panel.has_class(HIDDEN_CLASS));
}

#[test]
fn valid_prescription_clears_the_notice() {
    let mut panel = panel();
    display_prescription(&mut panel, None);
    display_prescription(&mut panel, Some(&json!({"medications": [{"name": "维C"}]})));
    assert!(!panel.text_content().contains(copy::NO_PRESCRIPTION));
}

#[test]
fn prescription_fields_and_defaults() {
    let mut panel = panel();
    let value = json!({
        "medications": [{"name": "布洛芬", "dosage": 200}],
        "instructions": ["饭后服用", "<多喝水>"],
        "notes": "如有不适及时就医",
        "pharmacist_notes": "剂量合适"
    });
    assert!(display_prescription(&mut panel, Some(&value)));

    let html = panel.render();
    assert!(html.contains(">200<"));
    assert_eq!(html.matches(copy::AS_DIRECTED).count(), 1);
    assert!(html.contains("饭后服用<br>&lt;多喝水&gt;"));
    assert!(html.contains("如有不适及时就医"));
    assert!(html.contains("剂量合适"));
    assert_eq!(html.matches("class=\"medication\"").count(), 1);
}

#[test]
fn notice_reveals_the_panel() {
    let mut panel = panel();
    assert!(!display_prescription(&mut panel, Some(&json!({"medications": []}))));
    assert!(!panel.has_class(HIDDEN_CLASS));
    assert!(panel.text_content().contains(copy::NO_PRESCRIPTION));
}

#[test]
fn unreadable_medications_are_skipped() {
    let payloads = [
        json!({"medications": [null, {"name": "布洛芬"}]}),
        json!({"medications": ["阿莫西林", {"name": "布洛芬"}]}),
        json!({"medications": [{"name": "布洛芬"}], "instructions": 3}),
    ];

    for value in payloads {
        let mut panel = panel();
        assert!(display_prescription(&mut panel, Some(&value)), "{value}");
        let html = panel.render();
        assert!(html.contains("布洛芬"), "{html}");
        assert_eq!(html.matches("class=\"medication\"").count(), 1, "{html}");
        assert!(!panel.text_content().contains(copy::NO_PRESCRIPTION));
    }
}

#[test]
fn scalar_instructions_are_shown_as_text() {
    let mut panel = panel();
    let value = json!({"medications": [{"name": "布洛芬"}], "instructions": 3});
    assert!(display_prescription(&mut panel, Some(&value)));
    assert!(panel.text_content().contains(copy::INSTRUCTIONS_LABEL));
    assert!(panel.render().contains(">3<"));
}

#[test]
fn notes_are_escaped_and_keep_line_breaks() {
    let mut panel = panel();
    let value = json!({
        "medications": [{"name": "布洛芬"}],
        "notes": "<b>x</b>\n注意",
        "pharmacist_notes": 42
    });
    assert!(display_prescription(&mut panel, Some(&value)));

    let html = panel.render();
    assert!(html.contains("&lt;b&gt;x&lt;/b&gt;<br>注意"), "{html}");
    assert!(!html.contains("<b>x"));
    assert!(html.contains(">42<"));
}

#[test]
fn blank_notes_are_omitted() {
    let mut panel = panel();
    let value = json!({"medications": [{"name": "布洛芬"}], "notes": "  ", "pharmacist_notes": null});
    assert!(display_prescription(&mut panel, Some(&value)));
    let text = panel.text_content();
    assert!(!text.contains(copy::NOTES_LABEL));
    assert!(!text.contains(copy::PHARMACIST_NOTES_LABEL));
}
