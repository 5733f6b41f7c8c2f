//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the note workspace to Dart via FRB as plain, index-addressed calls.
//! - Hold the one process-wide workspace session.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - All tree access goes through one mutex, so saves and structural
//!   mutations never interleave.
//! - Save failures do not fail an operation; they surface as `warning`.

use fastnote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppConfig, Color, CommitEdit, JsonStore, ListingEntry, MutationOutcome, NodeId,
    StoreLocation, TreeError, WorkspaceService,
};
use log::warn;
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

static WORKSPACE: Lazy<Mutex<Option<WorkspaceService<JsonStore>>>> =
    Lazy::new(|| Mutex::new(None));

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return "log_dir cannot be empty".to_string();
    }
    match init_logging_inner(level.as_str(), Path::new(trimmed)) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One row of the note list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListItem {
    pub index: u32,
    pub label: String,
    pub color: String,
    pub is_folder: bool,
    pub favourite: bool,
    /// `Favourite` / `Unfavourite`, for the context menu.
    pub favourite_action: String,
}

/// Response envelope for listing-producing calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingResponse {
    pub ok: bool,
    /// Current sequence after the call; empty on failure.
    pub items: Vec<NoteListItem>,
    /// Whether a Back control should be shown.
    pub can_go_back: bool,
    /// Error text when `ok == false`.
    pub message: String,
    /// Persistence warning when the change applied but was not saved.
    pub warning: Option<String>,
}

impl ListingResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            can_go_back: false,
            message: message.into(),
            warning: None,
        }
    }
}

/// Editor payload for one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDetailResponse {
    pub ok: bool,
    /// Stable id to pass back to `note_commit` / `note_delete`.
    pub note_id: Option<String>,
    pub title: String,
    pub content: String,
    pub color: String,
    pub message: String,
}

/// Opens the workspace. `data_dir` overrides the per-user default location.
///
/// # FFI contract
/// - Loads the document once; a missing or corrupt document yields an empty
///   tree rather than an error.
/// - Re-opening replaces the previous session after saving it.
#[flutter_rust_bridge::frb(sync)]
pub fn workspace_open(data_dir: Option<String>) -> ListingResponse {
    let location = match data_dir.map(|raw| raw.trim().to_string()) {
        Some(raw) if !raw.is_empty() => StoreLocation::in_dir(PathBuf::from(raw)),
        _ => match StoreLocation::for_current_user() {
            Ok(location) => location,
            Err(err) => return ListingResponse::failure(format!("workspace_open failed: {err}")),
        },
    };

    let mut guard = lock_workspace();
    if let Some(previous) = guard.take() {
        if let (_, Err(err)) = previous.close() {
            warn!("event=workspace_reopen module=ffi status=unsaved error={err}");
        }
    }
    let workspace = guard.insert(WorkspaceService::open(JsonStore::new(location)));
    listing_response(workspace)
}

/// Returns the listing of the current sequence.
#[flutter_rust_bridge::frb(sync)]
pub fn workspace_listing() -> ListingResponse {
    with_workspace("workspace_listing", |workspace| Ok(listing_response(workspace)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn workspace_add_note(title: String) -> ListingResponse {
    mutate("workspace_add_note", |workspace| workspace.add_note(title))
}

#[flutter_rust_bridge::frb(sync)]
pub fn workspace_add_folder(title: String) -> ListingResponse {
    mutate("workspace_add_folder", |workspace| workspace.add_folder(title))
}

#[flutter_rust_bridge::frb(sync)]
pub fn workspace_rename(index: u32, title: String) -> ListingResponse {
    mutate("workspace_rename", |workspace| {
        workspace.rename(index as usize, title)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn workspace_toggle_favourite(index: u32) -> ListingResponse {
    mutate("workspace_toggle_favourite", |workspace| {
        workspace.toggle_favourite(index as usize)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn workspace_set_color(index: u32, color: String) -> ListingResponse {
    mutate("workspace_set_color", |workspace| {
        workspace.set_color(index as usize, color.as_str())
    })
}

/// Deletes the item at `index`. The UI must confirm before calling.
#[flutter_rust_bridge::frb(sync)]
pub fn workspace_delete(index: u32) -> ListingResponse {
    mutate("workspace_delete", |workspace| workspace.delete(index as usize))
}

/// Deletes every note and folder. The UI must confirm before calling.
#[flutter_rust_bridge::frb(sync)]
pub fn workspace_clear_all() -> ListingResponse {
    mutate("workspace_clear_all", |workspace| workspace.clear_all())
}

#[flutter_rust_bridge::frb(sync)]
pub fn workspace_enter_folder(index: u32) -> ListingResponse {
    with_workspace("workspace_enter_folder", |workspace| {
        workspace.enter_folder(index as usize)?;
        Ok(listing_response(workspace))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn workspace_go_back() -> ListingResponse {
    with_workspace("workspace_go_back", |workspace| {
        workspace.go_back()?;
        Ok(listing_response(workspace))
    })
}

/// Saves and drops the session.
#[flutter_rust_bridge::frb(sync)]
pub fn workspace_close() -> String {
    match lock_workspace().take() {
        None => String::new(),
        Some(workspace) => match workspace.close() {
            (_, Ok(())) => String::new(),
            (_, Err(err)) => format!("workspace_close failed: {err}"),
        },
    }
}

/// Reads the note at `index` for the editor.
#[flutter_rust_bridge::frb(sync)]
pub fn note_open(index: u32) -> NoteDetailResponse {
    let guard = lock_workspace();
    let Some(workspace) = guard.as_ref() else {
        return note_failure("note_open failed: workspace is not open");
    };
    match workspace.open_editor(index as usize) {
        Ok(session) => NoteDetailResponse {
            ok: true,
            note_id: Some(session.id().to_string()),
            title: session.title().to_string(),
            content: session.content().to_string(),
            color: session.color().to_string(),
            message: String::new(),
        },
        Err(err) => note_failure(format!("note_open failed: {err}")),
    }
}

/// Writes editor content and color back to the note and saves.
///
/// # FFI contract
/// - `note_id` comes from `note_open`; indices may have shifted meanwhile.
/// - Invalid ids or colors leave the note untouched.
/// - Passing back the color returned by `note_open` always succeeds.
#[flutter_rust_bridge::frb(sync)]
pub fn note_commit(note_id: String, content: String, color: String) -> ListingResponse {
    let id = match parse_note_id(&note_id) {
        Ok(id) => id,
        Err(message) => return ListingResponse::failure(message),
    };
    mutate("note_commit", |workspace| {
        // Stored colors are opaque; only a changed color is validated.
        let color = match workspace.tree().find(id) {
            Some(node) if node.color.as_str() == color => node.color.clone(),
            _ => Color::parse(&color)?,
        };
        workspace.commit_edit(CommitEdit { id, content, color })
    })
}

/// Deletes the note open in the editor. The UI must confirm before calling.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(note_id: String) -> ListingResponse {
    let id = match parse_note_id(&note_id) {
        Ok(id) => id,
        Err(message) => return ListingResponse::failure(message),
    };
    mutate("note_delete", |workspace| workspace.delete_by_id(id))
}

/// Flips the configured theme and rewrites the config file.
///
/// Returns the new theme, or an error message prefixed with `error:`.
#[flutter_rust_bridge::frb(sync)]
pub fn config_toggle_theme(config_path: String) -> String {
    let mut config = match AppConfig::load(&config_path) {
        Ok(config) => config,
        Err(err) => return format!("error: {err}"),
    };
    let theme = config.toggle_theme().to_string();
    match config.save(&config_path) {
        Ok(()) => theme,
        Err(err) => format!("error: {err}"),
    }
}

fn lock_workspace() -> MutexGuard<'static, Option<WorkspaceService<JsonStore>>> {
    // Mutations validate before touching the tree, so a poisoned guard is
    // still consistent.
    WORKSPACE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn with_workspace(
    operation: &str,
    f: impl FnOnce(&mut WorkspaceService<JsonStore>) -> Result<ListingResponse, TreeError>,
) -> ListingResponse {
    let mut guard = lock_workspace();
    let Some(workspace) = guard.as_mut() else {
        return ListingResponse::failure(format!("{operation} failed: workspace is not open"));
    };
    f(workspace)
        .unwrap_or_else(|err| ListingResponse::failure(format!("{operation} failed: {err}")))
}

fn mutate(
    operation: &str,
    f: impl FnOnce(&mut WorkspaceService<JsonStore>) -> Result<MutationOutcome, TreeError>,
) -> ListingResponse {
    with_workspace(operation, |workspace| {
        let outcome = f(workspace)?;
        let warning = outcome
            .save_error
            .map(|err| format!("{operation} was applied but not saved: {err}"));
        Ok(ListingResponse {
            ok: true,
            items: outcome.listing.into_iter().map(to_list_item).collect(),
            can_go_back: workspace.can_go_back(),
            message: String::new(),
            warning,
        })
    })
}

fn listing_response(workspace: &WorkspaceService<JsonStore>) -> ListingResponse {
    match workspace.listing() {
        Ok(entries) => ListingResponse {
            ok: true,
            items: entries.into_iter().map(to_list_item).collect(),
            can_go_back: workspace.can_go_back(),
            message: String::new(),
            warning: None,
        },
        Err(err) => ListingResponse::failure(err.to_string()),
    }
}

fn to_list_item(entry: ListingEntry) -> NoteListItem {
    NoteListItem {
        index: entry.index as u32,
        favourite_action: entry.favourite_action_label().to_string(),
        label: entry.label,
        color: entry.color,
        is_folder: entry.is_folder,
        favourite: entry.favourite,
    }
}

fn parse_note_id(raw: &str) -> Result<NodeId, String> {
    raw.trim()
        .parse::<NodeId>()
        .map_err(|err| format!("invalid note id `{raw}`: {err}"))
}

fn note_failure(message: impl Into<String>) -> NoteDetailResponse {
    NoteDetailResponse {
        ok: false,
        note_id: None,
        title: String::new(),
        content: String::new(),
        color: String::new(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        config_toggle_theme, core_version, init_logging, note_commit, note_delete, note_open,
        ping, workspace_add_folder, workspace_add_note, workspace_clear_all, workspace_close,
        workspace_delete, workspace_enter_folder, workspace_go_back, workspace_listing,
        workspace_open, workspace_rename, workspace_set_color, workspace_toggle_favourite,
    };
    use std::sync::{Mutex, MutexGuard};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/fastnotes-logs".to_string());
        assert!(error.contains("unsupported log level"));
    }

    #[test]
    fn config_toggle_theme_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let result = config_toggle_theme(path.display().to_string());
        assert!(result.starts_with("error:"));
    }

    // Tests that drive the process-wide session hold this lock.
    static SESSION: Mutex<()> = Mutex::new(());

    fn session_guard() -> MutexGuard<'static, ()> {
        SESSION.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn workspace_session_flow() {
        let _session = session_guard();
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("FastNotes");

        let opened = workspace_open(Some(data_dir.display().to_string()));
        assert!(opened.ok, "{}", opened.message);
        assert!(opened.items.is_empty());

        let added = workspace_add_folder("Work".to_string());
        assert!(added.ok, "{}", added.message);
        assert!(added.warning.is_none());
        assert_eq!(added.items[0].label, "[Folder] Work");

        let blank = workspace_add_note("   ".to_string());
        assert!(!blank.ok);
        assert!(blank.message.contains("blank"));

        let inside = workspace_enter_folder(0);
        assert!(inside.ok && inside.can_go_back && inside.items.is_empty());

        let listing = workspace_add_note("Todo".to_string());
        assert_eq!(listing.items[0].label, "1. Todo");
        let listing = workspace_toggle_favourite(0);
        assert_eq!(listing.items[0].label, "1. Todo ⭐");
        assert_eq!(listing.items[0].favourite_action, "Unfavourite");
        let listing = workspace_set_color(0, "#AABBCC".to_string());
        assert_eq!(listing.items[0].color, "#aabbcc");
        assert!(!workspace_set_color(0, "??".to_string()).ok);
        let listing = workspace_rename(0, "Groceries".to_string());
        assert_eq!(listing.items[0].label, "1. Groceries ⭐");

        let detail = note_open(0);
        assert!(detail.ok, "{}", detail.message);
        assert_eq!(detail.title, "Groceries");
        let note_id = detail.note_id.unwrap();
        let committed = note_commit(note_id.clone(), "buy milk".to_string(), detail.color);
        assert!(committed.ok, "{}", committed.message);
        assert!(!note_commit("not-a-uuid".to_string(), String::new(), "white".to_string()).ok);
        assert_eq!(note_open(0).content, "buy milk");

        let back = workspace_go_back();
        assert!(back.ok && !back.can_go_back);
        assert_eq!(workspace_listing().items.len(), 1);
        assert!(!workspace_delete(5).ok);

        let raw = std::fs::read_to_string(data_dir.join("data.json")).unwrap();
        assert!(raw.contains("buy milk"));

        assert!(workspace_close().is_empty());
        assert!(!workspace_listing().ok);

        let reopened = workspace_open(Some(data_dir.display().to_string()));
        assert_eq!(reopened.items[0].label, "[Folder] Work");
        assert!(workspace_enter_folder(0).ok);
        assert!(note_delete(note_id).ok);
        assert!(workspace_listing().items.is_empty());
        workspace_go_back();

        let cleared = workspace_clear_all();
        assert!(cleared.ok && cleared.items.is_empty());
        assert!(workspace_close().is_empty());
    }

    #[test]
    fn note_with_unvalidated_stored_color_accepts_content_edit() {
        let _session = session_guard();
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("FastNotes");
        std::fs::create_dir_all(&data_dir).unwrap();
        std::fs::write(
            data_dir.join("data.json"),
            r#"[{"title": "Old", "content": "", "color": "SystemButtonFace#1"}]"#,
        )
        .unwrap();

        assert!(workspace_open(Some(data_dir.display().to_string())).ok);
        let detail = note_open(0);
        assert_eq!(detail.color, "SystemButtonFace#1");

        let committed = note_commit(
            detail.note_id.unwrap(),
            "new text".to_string(),
            detail.color,
        );
        assert!(committed.ok, "{}", committed.message);
        let reread = note_open(0);
        assert_eq!(reread.content, "new text");
        assert_eq!(reread.color, "SystemButtonFace#1");

        let recolored = note_commit(
            reread.note_id.clone().unwrap(),
            "new text".to_string(),
            "gray50".to_string(),
        );
        assert!(recolored.ok, "{}", recolored.message);
        assert_eq!(recolored.items[0].color, "gray50");
        assert!(!note_commit(reread.note_id.unwrap(), String::new(), "#12".to_string()).ok);

        assert!(workspace_close().is_empty());
    }
}
