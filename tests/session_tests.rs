// Integration tests for persistence and the run action

use yscode::console::{LogPanel, Severity};
use yscode::runner::{run_active, QuickJsHost, RunOutcome};
use yscode::storage::{JsonFileStore, KeyValueStore, MemoryStore, Persistence, FILES_KEY};
use yscode::workspace::{FileId, Language, Workspace};

fn script_workspace(content: &str) -> Workspace {
    let mut ws = Workspace::with_defaults();
    let id = ws.create_file("main.js");
    ws.switch_to(&id, None);
    ws.set_active_content(content);
    ws
}

#[test]
fn test_save_then_load_on_empty_store_gives_seed() {
    let mut persistence = Persistence::new(Box::new(MemoryStore::new()));
    let loaded = persistence.load();
    persistence.save(&loaded).expect("save failed");

    let ws = persistence.load();
    let names: Vec<&str> = ws.store().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["index.html", "index.js", "styles.css"]);
    assert_eq!(ws.active_id(), Some(&FileId::from("1")));
    let open: Vec<&str> = ws.session().open_ids().iter().map(FileId::as_str).collect();
    assert_eq!(open, ["1", "2", "3"]);
}

#[test]
fn test_session_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state").join("storage.json");

    let mut ws = Workspace::with_defaults();
    let id = ws.create_file("notes.md");
    ws.switch_to(&id, None);
    ws.set_active_content("# Notes\n");
    ws.close_tab(&FileId::from("2"));
    Persistence::new(Box::new(JsonFileStore::open(&path)))
        .save(&ws)
        .expect("save failed");

    let restored = Persistence::new(Box::new(JsonFileStore::open(&path))).load();
    let notes = restored.active_file().unwrap();
    assert_eq!(notes.name, "notes.md");
    assert_eq!(notes.language, Language::Markdown);
    assert_eq!(notes.content, "# Notes\n");
    let open: Vec<&str> = restored
        .session()
        .open_ids()
        .iter()
        .map(FileId::as_str)
        .collect();
    assert_eq!(open, ["1", "3", id.as_str()]);
}

#[test]
fn test_files_entry_with_python_tag() {
    let mut store = MemoryStore::new();
    store
        .set(
            FILES_KEY,
            r#"[{"id":"9","name":"a.py","content":"print(1)","lang":"python"}]"#.to_string(),
        )
        .unwrap();
    let ws = Persistence::new(Box::new(store)).load();

    // Saved session entries are missing: active falls back to "1", which is
    // dangling here, so normalize picks the first file
    assert_eq!(ws.active_id(), Some(&FileId::from("9")));
    assert_eq!(ws.active_file().unwrap().language, Language::Python);
}

#[test]
fn test_boom_logs_exactly_one_error_line() {
    let ws = script_workspace(r#"throw new Error("boom");"#);
    let mut host = QuickJsHost::new().expect("runtime");
    let mut panel = LogPanel::new();

    let outcome = run_active(&ws, &mut host, &mut panel);

    assert_eq!(outcome, RunOutcome::Failed);
    let errors: Vec<&str> = panel
        .entries()
        .iter()
        .filter(|e| e.severity == Severity::Error)
        .map(|e| e.message.as_str())
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("boom"));
}

#[test]
fn test_console_output_reaches_panel() {
    let ws = script_workspace("console.log('sum', 1 + 2); alert('done');");
    let mut host = QuickJsHost::new().expect("runtime");
    let mut panel = LogPanel::new();

    assert_eq!(run_active(&ws, &mut host, &mut panel), RunOutcome::Executed);

    let lines: Vec<(Severity, &str)> = panel
        .entries()
        .iter()
        .map(|e| (e.severity, e.message.as_str()))
        .collect();
    assert_eq!(
        lines,
        vec![
            (Severity::Emphasis, "Executing main.js..."),
            (Severity::Neutral, "sum 3"),
            (Severity::Emphasis, "done"),
        ]
    );
}

#[test]
fn test_markup_is_previewed_not_run() {
    let ws = Workspace::with_defaults();
    let mut host = QuickJsHost::new().expect("runtime");
    let mut panel = LogPanel::new();

    assert_eq!(
        run_active(&ws, &mut host, &mut panel),
        RunOutcome::Preview(FileId::from("1"))
    );
    assert!(panel.is_empty());
}
