use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;

use folio_core::content::load_content;
use folio_core::error::Error;
use folio_core::traits::DraftStore;
use folio_editor::{
    EditorSession, FileDraftStore, MemoryDraftStore, NewTestimonial, Origin, TestimonialPatch, DRAFT_CONTENT_KEY,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .unwrap()
        .join("test_data/content.json")
}

fn session() -> EditorSession<MemoryDraftStore> {
    EditorSession::open(MemoryDraftStore::new(), fixture_path()).unwrap()
}

fn draft_json(s: &EditorSession<MemoryDraftStore>) -> serde_json::Value {
    let raw = s.store().load(DRAFT_CONTENT_KEY).unwrap().expect("draft saved");
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn opens_published_content_without_a_draft() {
    let s = session();
    assert_eq!(s.origin(), Origin::Published);
    assert_eq!(s.content().unwrap().projects.len(), 4);
    assert!(s.store().load(DRAFT_CONTENT_KEY).unwrap().is_none());
}

#[test]
fn text_edit_autosaves_and_leaves_old_snapshot() {
    let mut s = session();
    let before = s.snapshot();
    assert!(s.edit_text("about.skills", "Motion, Houdini ,Nuke").unwrap());

    assert_eq!(s.origin(), Origin::Draft);
    assert_eq!(s.snapshot().root()["about"]["skills"], json!(["Motion", "Houdini", "Nuke"]));
    assert_eq!(before.root()["about"]["skills"], json!(["Motion Design", "3D", "Compositing"]));
    assert_eq!(draft_json(&s)["about"]["skills"], json!(["Motion", "Houdini", "Nuke"]));
}

#[test]
fn unresolvable_edit_saves_nothing() {
    let mut s = session();
    assert!(!s.edit_text("projects[40].title", "x").unwrap());
    assert!(!s.edit_text("about.unknown", "x").unwrap());
    assert_eq!(s.origin(), Origin::Published);
    assert!(s.store().load(DRAFT_CONTENT_KEY).unwrap().is_none());
}

#[test]
fn malformed_path_is_an_error() {
    let mut s = session();
    assert!(s.edit_text("projects[0.title", "x").is_err());
}

#[test]
fn writes_that_break_the_schema_are_rejected() {
    let mut s = session();
    assert!(s.edit_text("projects[0].tools[0]", "Nuke").unwrap());
    let before = s.snapshot();

    let err = s.set_media("projects[0].tools", "not-a-list").unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Schema(_))), "{err:#}");
    assert_eq!(s.snapshot().root(), before.root());
    assert_eq!(draft_json(&s)["projects"][0]["tools"], json!(["Nuke", "Houdini"]));
}

#[test]
fn media_fields_are_created_when_absent() {
    let mut s = session();
    let path = s.project_field_path("paper-worlds", "thumbnail").unwrap();
    assert_eq!(path.to_string(), "projects[3].thumbnail");
    assert!(s.set_media(&path.to_string(), "https://cdn.example/p.png").unwrap());
    let project = s.content().unwrap().project("paper-worlds").cloned().unwrap();
    assert_eq!(project.thumbnail.as_deref(), Some("https://cdn.example/p.png"));

    assert!(s.set_media("projects[3].poster", "u").is_err(), "unknown fields fail validation");
}

#[test]
fn unknown_project_has_no_field_path() {
    let s = session();
    let err = s.project_field_path("nope", "title").unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::NotFound(_))));
}

#[test]
fn delete_project_reports_whether_it_removed() {
    let mut s = session();
    assert!(s.delete_project("neon-city").unwrap());
    assert!(!s.delete_project("neon-city").unwrap());
    let ids: Vec<String> = s.content().unwrap().projects.into_iter().map(|p| p.id).collect();
    assert_eq!(ids, ["aurora-skies", "liquid-type", "paper-worlds"]);
}

#[test]
fn testimonials_are_prepended_with_generated_ids() {
    let mut s = session();
    let id = s
        .add_testimonial(NewTestimonial {
            quote: "Fast and sharp.".into(),
            name: "Ari".into(),
            title: "Director".into(),
            image: None,
        })
        .unwrap();
    let second = s
        .add_testimonial(NewTestimonial { quote: "Again".into(), ..Default::default() })
        .unwrap();
    assert!(id.starts_with("t_"));
    assert_ne!(id, second);

    let content = s.content().unwrap();
    assert_eq!(content.testimonials[0].id, second);
    assert_eq!(content.testimonials[1].id, id);
    assert!(content.testimonials[1].image.starts_with("https://i.pravatar.cc/150?u="));
    assert_eq!(content.testimonials.len(), 4);
}

#[test]
fn testimonial_patch_merges_fields() {
    let mut s = session();
    let patch = TestimonialPatch { quote: Some("Even better.".into()), name: Some(String::new()), ..Default::default() };
    assert!(s.update_testimonial("t_2", patch).unwrap());
    assert!(!s.update_testimonial("t_9", TestimonialPatch::default()).unwrap());

    let t = s.content().unwrap().testimonials.into_iter().find(|t| t.id == "t_2").unwrap();
    assert_eq!(t.quote, "Even better.");
    assert_eq!(t.name, "Sam Okafor");

    assert!(s.delete_testimonial("t_1").unwrap());
    assert!(!s.delete_testimonial("t_1").unwrap());
}

#[test]
fn patch_without_changes_reports_false() {
    let mut s = session();
    assert!(!s.update_testimonial("t_2", TestimonialPatch::default()).unwrap());
    let blank = TestimonialPatch { quote: Some(String::new()), ..Default::default() };
    assert!(!s.update_testimonial("t_2", blank).unwrap());
    let same = TestimonialPatch { name: Some("Sam Okafor".into()), ..Default::default() };
    assert!(!s.update_testimonial("t_2", same).unwrap());
    assert_eq!(s.origin(), Origin::Published);
    assert!(s.store().load(DRAFT_CONTENT_KEY).unwrap().is_none());
}

#[test]
fn reorder_requires_a_permutation() {
    let mut s = session();
    s.reorder_testimonials(&["t_2", "t_1"]).unwrap();
    let ids: Vec<String> = s.content().unwrap().testimonials.into_iter().map(|t| t.id).collect();
    assert_eq!(ids, ["t_2", "t_1"]);

    for bad in [vec!["t_1"], vec!["t_1", "t_1"], vec!["t_1", "t_3"]] {
        let err = s.reorder_testimonials(&bad).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Operation(_))));
    }
}

#[test]
fn draft_survives_reopen_and_reset_restores_published() {
    let dir = TempDir::new().unwrap();
    {
        let mut s = EditorSession::open(FileDraftStore::new(dir.path()), fixture_path()).unwrap();
        assert!(s.edit_text("about.bio", "Updated bio").unwrap());
    }
    assert!(dir.path().join(format!("{DRAFT_CONTENT_KEY}.json")).exists());

    let mut s = EditorSession::open(FileDraftStore::new(dir.path()), fixture_path()).unwrap();
    assert_eq!(s.origin(), Origin::Draft);
    assert_eq!(s.text_at("about.bio").unwrap().as_deref(), Some("Updated bio"));

    s.reset().unwrap();
    assert_eq!(s.origin(), Origin::Published);
    assert!(!dir.path().join(format!("{DRAFT_CONTENT_KEY}.json")).exists());
    assert_eq!(s.content().unwrap(), load_content(&fixture_path()).unwrap());
}

#[test]
fn failed_reset_keeps_the_draft() {
    let raw = std::fs::read_to_string(fixture_path()).unwrap();
    let store = MemoryDraftStore::with_entry(DRAFT_CONTENT_KEY, &raw);
    let dir = TempDir::new().unwrap();
    let mut s = EditorSession::open(store, dir.path().join("missing/content.json")).unwrap();
    assert_eq!(s.origin(), Origin::Draft);

    let err = s.reset().unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::NotFound(_))), "{err:#}");
    assert_eq!(s.store().load(DRAFT_CONTENT_KEY).unwrap().as_deref(), Some(raw.as_str()));
    assert_eq!(s.origin(), Origin::Draft);
}

#[test]
fn unreadable_draft_falls_back_to_published() {
    let store = MemoryDraftStore::with_entry(DRAFT_CONTENT_KEY, "{not json");
    let s = EditorSession::open(store, fixture_path()).unwrap();
    assert_eq!(s.origin(), Origin::Published);
}

#[test]
fn publish_writes_pretty_json() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("export/content.json");
    let mut s = session();
    s.edit_text("projects[1].title", "Neon City II").unwrap();
    s.publish(&out).unwrap();

    let raw = std::fs::read_to_string(&out).unwrap();
    assert!(raw.starts_with("{\n  \"projects\": [\n    {"));
    assert_eq!(raw, s.export_json().unwrap());
    assert_eq!(load_content(&out).unwrap().projects[1].title, "Neon City II");
    assert!(!raw.contains("\"thumbnail\": null"));
}
